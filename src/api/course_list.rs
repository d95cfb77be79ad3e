//! Course list client.
//!
//! Wraps `GET /api/courses/v1/courses/`, which uses page-number pagination:
//! the client increments the `page` parameter while the response's
//! `pagination` block reports a next page. Large course-key lists are
//! batched into chunks of [`BATCH_SIZE`], iterating pages within each batch
//! and concatenating everything into one lazy sequence.
//!
//! Yields [`CourseDetail`] items; the list view omits the `overview` field.

use std::collections::{HashMap, VecDeque};

use serde::Deserialize;
use serde_json::Value;

use crate::api::course_detail::CourseDetail;
use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// Page size requested from the server.
pub const PAGE_SIZE: usize = 100;

/// Number of course keys per batched request.
pub const BATCH_SIZE: usize = 100;

const COURSE_LIST_URL: &str = "/api/courses/v1/courses/";

/// Filters for the course listing.
#[derive(Clone, Debug, Default)]
pub struct CourseListParams {
    /// Restrict the listing to these course keys. Batched automatically.
    pub course_keys: Vec<String>,
    /// Filter by organization code (e.g. `HarvardX`).
    pub org: Option<String>,
    /// Search term to filter courses.
    pub search_term: Option<String>,
    /// The username whose visible courses to return.
    pub username: Option<String>,
    /// Only return non-ended courses.
    pub active_only: Option<bool>,
}

impl CourseListParams {
    fn into_query(self) -> (HashMap<String, String>, Vec<String>) {
        let mut query = HashMap::new();
        if let Some(org) = self.org {
            query.insert("org".to_string(), org);
        }
        if let Some(search_term) = self.search_term {
            query.insert("search_term".to_string(), search_term);
        }
        if let Some(username) = self.username {
            query.insert("username".to_string(), username);
        }
        if let Some(active_only) = self.active_only {
            query.insert("active_only".to_string(), active_only.to_string());
        }
        query.insert("page_size".to_string(), PAGE_SIZE.to_string());
        (query, self.course_keys)
    }
}

/// Splits course keys into comma-joined batch values of at most
/// [`BATCH_SIZE`] keys each.
fn batch_values(course_keys: &[String]) -> Vec<String> {
    course_keys
        .chunks(BATCH_SIZE)
        .map(|chunk| chunk.join(","))
        .collect()
}

/// The page-number pagination envelope of the course list API.
#[derive(Debug, Default, Deserialize)]
struct CourseListPage {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    pagination: PaginationBlock,
}

#[derive(Debug, Default, Deserialize)]
struct PaginationBlock {
    #[serde(default)]
    next: Option<String>,
}

/// Lazy iteration over the course listing, batch by batch and page by page.
///
/// Each [`next_page`](Self::next_page) call issues exactly one request.
/// When a batch's final page is reached the pager moves to the next batch
/// at page 1; the overall sequence ends after the last batch.
#[derive(Debug)]
pub struct CoursePages<'a> {
    client: &'a HttpClient,
    base_query: HashMap<String, String>,
    /// One entry per batched request series; `None` means no course-key
    /// filter at all.
    batches: VecDeque<Option<String>>,
    current_batch: Option<Option<String>>,
    page: u32,
    buffered: VecDeque<CourseDetail>,
    done: bool,
}

impl CoursePages<'_> {
    /// Fetches the next page of courses, or `None` when the listing is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response, or
    /// [`ApiError::Payload`] if a record cannot be parsed.
    pub async fn next_page(&mut self) -> Result<Option<Vec<CourseDetail>>, ApiError> {
        if self.done {
            return Ok(None);
        }

        if self.current_batch.is_none() {
            match self.batches.pop_front() {
                Some(batch) => {
                    self.current_batch = Some(batch);
                    self.page = 1;
                }
                None => {
                    self.done = true;
                    return Ok(None);
                }
            }
        }

        let mut query = self.base_query.clone();
        query.insert("page".to_string(), self.page.to_string());
        if let Some(Some(course_keys)) = &self.current_batch {
            query.insert("course_keys".to_string(), course_keys.clone());
        }

        let response = self
            .client
            .get(COURSE_LIST_URL, Some(query))
            .await?
            .error_for_status()?;

        let page: CourseListPage = serde_json::from_value(response.body)?;
        let courses = page
            .results
            .into_iter()
            .map(serde_json::from_value::<CourseDetail>)
            .collect::<Result<Vec<_>, _>>()?;

        if page.pagination.next.is_some() {
            self.page += 1;
        } else {
            // Batch exhausted; the next call starts the following batch.
            self.current_batch = None;
            if self.batches.is_empty() {
                self.done = true;
            }
        }

        Ok(Some(courses))
    }

    /// Yields the next course, fetching further pages on demand.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn try_next(&mut self) -> Result<Option<CourseDetail>, ApiError> {
        loop {
            if let Some(course) = self.buffered.pop_front() {
                return Ok(Some(course));
            }
            match self.next_page().await? {
                Some(courses) => self.buffered.extend(courses),
                None => return Ok(None),
            }
        }
    }

    /// Drains the remaining pages into a single vector.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn collect_all(mut self) -> Result<Vec<CourseDetail>, ApiError> {
        let mut all: Vec<CourseDetail> = self.buffered.drain(..).collect();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}

/// Course list client.
#[derive(Clone, Copy, Debug)]
pub struct CourseList<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseList<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Starts a lazy listing of the courses visible to the specified user.
    ///
    /// Handles batching and pagination automatically; no request is issued
    /// until the first page is pulled.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut pages = api.course_list().get_courses(CourseListParams {
    ///     org: Some("edX".to_string()),
    ///     ..Default::default()
    /// });
    /// while let Some(course) = pages.try_next().await? {
    ///     println!("{:?}", course.name);
    /// }
    /// ```
    #[must_use]
    pub fn get_courses(&self, params: CourseListParams) -> CoursePages<'a> {
        let (base_query, course_keys) = params.into_query();
        let batches: VecDeque<Option<String>> = if course_keys.is_empty() {
            VecDeque::from([None])
        } else {
            batch_values(&course_keys).into_iter().map(Some).collect()
        };

        CoursePages {
            client: self.client,
            base_query,
            batches,
            current_batch: None,
            page: 1,
            buffered: VecDeque::new(),
            done: false,
        }
    }
}

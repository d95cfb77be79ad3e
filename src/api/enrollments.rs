//! Student enrollments client and models.
//!
//! Wraps the Open edX enrollment API:
//!
//! - `GET /api/enrollment/v1/enrollments` — cursor-paginated listing
//! - `GET /api/enrollment/v1/enrollment` — the requesting user's enrollments
//! - `POST /api/enrollment/v1/enrollment` — create or deactivate an enrollment
//!
//! The listing is lazy and single-pass: [`EnrollmentPages`] fetches one page
//! per [`next_page`](EnrollmentPages::next_page) call, following the `cursor`
//! query parameter of each response's `next` URL until it is absent. Restart
//! by calling [`CourseEnrollments::list`] again.

use std::collections::{BTreeMap, HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::datetime;
use crate::api::errors::ApiError;
use crate::api::pagination::{cursor_from_next, PaginatedResults};
use crate::clients::HttpClient;

/// The audit enrollment mode (free, no certificate).
pub const MODE_AUDIT: &str = "audit";
/// The honor enrollment mode.
pub const MODE_HONOR: &str = "honor";
/// The verified enrollment mode (paid, certificate-eligible).
pub const MODE_VERIFIED: &str = "verified";

const ENROLLMENT_URL: &str = "/api/enrollment/v1/enrollment";
const ENROLLMENT_LIST_URL: &str = "/api/enrollment/v1/enrollments";

/// An enrollment mode offered by a course, as embedded in enrollment
/// payloads.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EnrollmentCourseMode {
    /// Short name for the enrollment mode.
    #[serde(default)]
    pub slug: Option<String>,
    /// Full name of the enrollment mode.
    #[serde(default)]
    pub name: Option<String>,
    /// Minimum price for which a user can enroll in this mode.
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Suggested prices, as reported by the server.
    #[serde(default)]
    pub suggested_prices: Option<String>,
    /// Currency of the listed prices.
    #[serde(default)]
    pub currency: Option<String>,
    /// Date and time after which users cannot enroll in this mode.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub expiration_datetime: Option<DateTime<Utc>>,
    /// Description of this mode.
    #[serde(default)]
    pub description: Option<String>,
}

/// Course information nested inside an enrollment.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EnrollmentCourseDetails {
    /// Unique identifier for the course.
    #[serde(default)]
    pub course_id: Option<String>,
    /// Date and time when the course opens. `None` means the course opens
    /// immediately when created.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub course_start: Option<DateTime<Utc>>,
    /// Date and time when the course closes. `None` means it never ends.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub course_end: Option<DateTime<Utc>>,
    /// Date and time when users can begin enrolling.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_start: Option<DateTime<Utc>>,
    /// Date and time after which users cannot enroll.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_end: Option<DateTime<Utc>>,
    /// Whether students must be invited to enroll.
    #[serde(default)]
    pub invite_only: bool,
    /// Enrollment modes supported for the course.
    #[serde(default)]
    pub course_modes: Vec<EnrollmentCourseMode>,
}

/// A single course enrollment for a user.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Enrollment {
    /// Username of the enrolled user.
    #[serde(default)]
    pub user: Option<String>,
    /// Enrollment mode of the user in this course.
    #[serde(default)]
    pub mode: Option<String>,
    /// Whether the enrollment is currently active.
    #[serde(default)]
    pub is_active: bool,
    /// Enrollment timestamp.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub created: Option<DateTime<Utc>>,
    /// Nested course information. Listing responses omit it.
    #[serde(default)]
    pub course_details: EnrollmentCourseDetails,
    // Listing records carry the course id at the top level instead of in
    // course_details; kept private so course_id() resolves both shapes.
    #[serde(default, rename = "course_id")]
    course_id_fallback: Option<String>,
}

impl Enrollment {
    /// Returns the course id, preferring the nested course details and
    /// falling back to the top-level field used by listing records.
    #[must_use]
    pub fn course_id(&self) -> Option<&str> {
        self.course_details
            .course_id
            .as_deref()
            .or(self.course_id_fallback.as_deref())
    }

    /// Returns `true` if the enrollment mode is `verified`.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.mode.as_deref() == Some(MODE_VERIFIED)
    }
}

/// The requesting user's enrollments, keyed by course id.
#[derive(Clone, Debug, Default)]
pub struct Enrollments {
    enrollments: BTreeMap<String, Enrollment>,
}

impl Enrollments {
    /// Builds the collection from a list of enrollments.
    ///
    /// Records without a resolvable course id are dropped; the collection
    /// assumes one enrollment per course per user.
    #[must_use]
    pub fn new(enrollments: Vec<Enrollment>) -> Self {
        let enrollments = enrollments
            .into_iter()
            .filter_map(|e| e.course_id().map(str::to_string).map(|id| (id, e)))
            .collect();
        Self { enrollments }
    }

    /// Returns all the courses the user has enrolled in.
    pub fn enrolled_courses(&self) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.values()
    }

    /// Returns the course ids of all enrollments, optionally intersected
    /// with `filter_by`.
    #[must_use]
    pub fn enrolled_course_ids(&self, filter_by: Option<&[&str]>) -> Vec<String> {
        match filter_by {
            Some(filter) => self
                .enrollments
                .keys()
                .filter(|id| filter.contains(&id.as_str()))
                .cloned()
                .collect(),
            None => self.enrollments.keys().cloned().collect(),
        }
    }

    /// Returns whether an enrollment for the provided course id exists.
    #[must_use]
    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrollments.contains_key(course_id)
    }

    /// Returns the enrollment for a specific course, if any.
    #[must_use]
    pub fn enrollment_for_course(&self, course_id: &str) -> Option<&Enrollment> {
        self.enrollments.get(course_id)
    }

    /// Looks up each of the given course ids, yielding `None` for courses
    /// the user is not enrolled in.
    #[must_use]
    pub fn enrollments_for_courses(&self, course_ids: &[&str]) -> Vec<Option<&Enrollment>> {
        course_ids
            .iter()
            .map(|id| self.enrollments.get(*id))
            .collect()
    }

    /// Returns the number of enrollments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    /// Returns `true` if there are no enrollments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }
}

/// Filters for the enrollments listing.
#[derive(Clone, Debug, Default)]
pub struct EnrollmentListParams {
    /// Restrict the listing to enrollments in this course.
    pub course_id: Option<String>,
    /// Restrict the listing to enrollments of these users.
    pub usernames: Vec<String>,
}

impl EnrollmentListParams {
    fn into_query(self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(course_id) = self.course_id {
            query.insert("course_id".to_string(), course_id);
        }
        if !self.usernames.is_empty() {
            query.insert("username".to_string(), self.usernames.join(","));
        }
        query
    }
}

/// An attribute attached to an enrollment at creation time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EnrollmentAttribute {
    /// Attribute namespace (e.g. `order`).
    pub namespace: String,
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: Value,
}

/// Options for creating a student enrollment.
#[derive(Clone, Debug, Default)]
pub struct CreateEnrollmentParams {
    /// Enrollment mode; defaults to [`MODE_AUDIT`].
    pub mode: Option<String>,
    /// Enroll this user instead of the requesting user.
    pub username: Option<String>,
    /// Attributes added directly to the request body.
    pub enrollment_attributes: Vec<EnrollmentAttribute>,
}

/// Lazy, single-pass cursor pagination over the enrollments listing.
///
/// Each [`next_page`](Self::next_page) call issues exactly one request. The
/// sequence is finite: it ends when a response's `next` URL carries no
/// `cursor` parameter.
#[derive(Debug)]
pub struct EnrollmentPages<'a> {
    client: &'a HttpClient,
    query: HashMap<String, String>,
    cursor: Option<String>,
    buffered: VecDeque<Enrollment>,
    done: bool,
}

impl EnrollmentPages<'_> {
    /// Fetches the next page of enrollments, or `None` when the listing is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response or transport
    /// failure, and [`ApiError::Payload`] if a record cannot be parsed.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Enrollment>>, ApiError> {
        if self.done {
            return Ok(None);
        }

        let mut query = self.query.clone();
        if let Some(cursor) = &self.cursor {
            query.insert("cursor".to_string(), cursor.clone());
        }

        let response = self
            .client
            .get(ENROLLMENT_LIST_URL, Some(query))
            .await?
            .error_for_status()?;

        let page = PaginatedResults::from_body(response.body);
        self.cursor = page.next.as_deref().and_then(cursor_from_next);
        if self.cursor.is_none() {
            self.done = true;
        }

        let enrollments = page
            .results
            .into_iter()
            .map(serde_json::from_value::<Enrollment>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(enrollments))
    }

    /// Yields the next enrollment, fetching further pages on demand.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn try_next(&mut self) -> Result<Option<Enrollment>, ApiError> {
        loop {
            if let Some(enrollment) = self.buffered.pop_front() {
                return Ok(Some(enrollment));
            }
            match self.next_page().await? {
                Some(enrollments) => self.buffered.extend(enrollments),
                None => return Ok(None),
            }
        }
    }

    /// Drains the remaining pages into a single vector.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn collect_all(mut self) -> Result<Vec<Enrollment>, ApiError> {
        let mut all: Vec<Enrollment> = self.buffered.drain(..).collect();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}

/// Student enrollments client.
#[derive(Clone, Copy, Debug)]
pub struct CourseEnrollments<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseEnrollments<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Starts a lazy listing of all course enrollments.
    ///
    /// No request is issued until the first page is pulled. Records yielded
    /// by the listing carry no nested course details.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut pages = api.enrollments().list(EnrollmentListParams {
    ///     course_id: Some("course-v1:edX+DemoX+Demo_Course".to_string()),
    ///     ..Default::default()
    /// });
    /// while let Some(enrollment) = pages.try_next().await? {
    ///     println!("{:?}", enrollment.user);
    /// }
    /// ```
    #[must_use]
    pub fn list(&self, params: EnrollmentListParams) -> EnrollmentPages<'a> {
        EnrollmentPages {
            client: self.client,
            query: params.into_query(),
            cursor: None,
            buffered: VecDeque::new(),
            done: false,
        }
    }

    /// Lists all course enrollments, draining every page eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response, or
    /// [`ApiError::Payload`] if a record cannot be parsed.
    pub async fn get_enrollments(
        &self,
        params: EnrollmentListParams,
    ) -> Result<Vec<Enrollment>, ApiError> {
        self.list(params).collect_all().await
    }

    /// Returns the enrollments of the user whose access token was provided
    /// to the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_student_enrollments(&self) -> Result<Enrollments, ApiError> {
        let response = self
            .client
            .get(ENROLLMENT_URL, None)
            .await?
            .error_for_status()?;

        let enrollments: Vec<Enrollment> = serde_json::from_value(response.body)?;
        Ok(Enrollments::new(enrollments))
    }

    /// Creates an enrollment in the given course.
    ///
    /// The request is issued on behalf of the requesting user unless
    /// `params.username` names someone else.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn create_student_enrollment(
        &self,
        course_id: &str,
        params: CreateEnrollmentParams,
    ) -> Result<Enrollment, ApiError> {
        let mode = params.mode.unwrap_or_else(|| MODE_AUDIT.to_string());
        let mut body = json!({
            "mode": mode,
            "course_details": {"course_id": course_id},
        });
        if let Some(username) = params.username {
            body["user"] = json!(username);
        }
        if !params.enrollment_attributes.is_empty() {
            body["enrollment_attributes"] = serde_json::to_value(&params.enrollment_attributes)?;
        }

        let response = self
            .client
            .post_json(ENROLLMENT_URL, body)
            .await?
            .error_for_status()?;

        Ok(serde_json::from_value(response.body)?)
    }

    /// Creates an audit enrollment in the given course.
    ///
    /// # Errors
    ///
    /// See [`create_student_enrollment`](Self::create_student_enrollment).
    pub async fn create_audit_student_enrollment(
        &self,
        course_id: &str,
        username: Option<&str>,
    ) -> Result<Enrollment, ApiError> {
        self.create_student_enrollment(
            course_id,
            CreateEnrollmentParams {
                mode: Some(MODE_AUDIT.to_string()),
                username: username.map(ToString::to_string),
                enrollment_attributes: Vec::new(),
            },
        )
        .await
    }

    /// Deactivates the requesting user's enrollment in the given course
    /// (in other words, the user is unenrolled).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn deactivate_enrollment(&self, course_id: &str) -> Result<Enrollment, ApiError> {
        let body = json!({
            "course_details": {"course_id": course_id},
            "is_active": false,
        });

        let response = self
            .client
            .post_json(ENROLLMENT_URL, body)
            .await?
            .error_for_status()?;

        Ok(serde_json::from_value(response.body)?)
    }
}

//! Course runs client and models (Studio/CMS API).
//!
//! Wraps the course run management API of Open edX Studio:
//!
//! - `GET api/v1/course_runs/{course_id}/` — fetch one run
//! - `GET api/v1/course_runs/` — paged listing (absolute page URLs)
//! - `POST api/v1/course_runs/` — create a run
//! - `PUT api/v1/course_runs/{course_id}/` — update a run
//! - `POST api/v1/course_runs/clone/` — clone a run
//!
//! The paths are relative: they join onto whatever path the configured base
//! URL carries, since Studio deployments commonly live under a prefix.
//!
//! Open edX requires start and end dates to both be present whenever a
//! reschedule is requested; the params builders enforce that before any
//! request is issued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::datetime;
use crate::api::errors::{ApiError, ValidationError};
use crate::clients::HttpClient;

const COURSE_RUN_URL: &str = "api/v1/course_runs/";
const COURSE_RUN_CLONE_URL: &str = "api/v1/course_runs/clone/";

/// The schedule block of a course run.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CourseRunSchedule {
    /// Date the course run begins.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub start: Option<DateTime<Utc>>,
    /// Date the course run ends.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub end: Option<DateTime<Utc>>,
    /// Date enrollment begins.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_start: Option<DateTime<Utc>>,
    /// Date enrollment ends.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_end: Option<DateTime<Utc>>,
}

/// Images attached to a course run.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CourseRunImages {
    /// Card image of the course.
    #[serde(default)]
    pub card_image: Option<String>,
}

/// A scheduled instance (offering) of a course.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CourseRun {
    /// Unique identifier of the course run.
    #[serde(default, rename = "id")]
    pub course_id: Option<String>,
    /// Title of the course.
    #[serde(default)]
    pub title: Option<String>,
    /// Name of the organization that owns the course.
    #[serde(default)]
    pub org: Option<String>,
    /// Course number.
    #[serde(default)]
    pub number: Option<String>,
    /// Run identifier of the course.
    #[serde(default)]
    pub run: Option<String>,
    /// Pacing type: `instructor_paced` or `self_paced`.
    #[serde(default)]
    pub pacing_type: Option<String>,
    /// Course images.
    #[serde(default)]
    pub images: CourseRunImages,
    /// The course run schedule.
    #[serde(default)]
    pub schedule: Option<CourseRunSchedule>,
}

impl CourseRun {
    /// Returns the date the course run begins.
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.schedule.as_ref().and_then(|s| s.start)
    }

    /// Returns the date the course run ends.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.schedule.as_ref().and_then(|s| s.end)
    }

    /// Returns the date enrollment begins.
    #[must_use]
    pub fn enrollment_start(&self) -> Option<DateTime<Utc>> {
        self.schedule.as_ref().and_then(|s| s.enrollment_start)
    }

    /// Returns the date enrollment ends.
    #[must_use]
    pub fn enrollment_end(&self) -> Option<DateTime<Utc>> {
        self.schedule.as_ref().and_then(|s| s.enrollment_end)
    }
}

/// A page of the course runs listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CourseRunList {
    /// URL of the next page of course runs, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page of course runs, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Total number of course runs.
    #[serde(default)]
    pub count: u64,
    /// Total number of pages.
    #[serde(default)]
    pub num_pages: u64,
    /// The current page number.
    #[serde(default)]
    pub current_page: u64,
    /// Offset of the first record on this page.
    #[serde(default)]
    pub start: Option<u64>,
    /// The course runs on this page.
    #[serde(default)]
    pub results: Vec<CourseRun>,
}

/// Parameters for creating a new canonical course run.
#[derive(Clone, Debug, Default)]
pub struct CreateCourseRunParams {
    /// Organization for the new course run.
    pub org: String,
    /// Course number, without the `course-v1` prefix.
    pub number: String,
    /// The run id for the new course run.
    pub run: String,
    /// Title of the new course run.
    pub title: String,
    /// Pacing type for the new course run.
    pub pacing_type: Option<String>,
    /// Start date; requires `end` to also be set.
    pub start: Option<DateTime<Utc>>,
    /// End date; requires `start` to also be set.
    pub end: Option<DateTime<Utc>>,
    /// Enrollment start date.
    pub enrollment_start: Option<DateTime<Utc>>,
    /// Enrollment end date.
    pub enrollment_end: Option<DateTime<Utc>>,
}

/// Parameters for updating an existing course run.
#[derive(Clone, Debug, Default)]
pub struct UpdateCourseRunParams {
    /// New title for the course run.
    pub title: Option<String>,
    /// New pacing type for the course run.
    pub pacing_type: Option<String>,
    /// New start date; requires `end` to also be set.
    pub start: Option<DateTime<Utc>>,
    /// New end date; requires `start` to also be set.
    pub end: Option<DateTime<Utc>>,
    /// New enrollment start date.
    pub enrollment_start: Option<DateTime<Utc>>,
    /// New enrollment end date.
    pub enrollment_end: Option<DateTime<Utc>>,
}

/// Builds the `schedule` sub-object for create/update payloads.
///
/// Open edX requires start and end to both be present when a reschedule is
/// requested; enrollment dates are optional within the schedule.
fn build_schedule(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    enrollment_start: Option<DateTime<Utc>>,
    enrollment_end: Option<DateTime<Utc>>,
) -> Result<Option<Value>, ValidationError> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ValidationError::IncompleteSchedule);
    };

    let mut schedule = json!({
        "start": start.to_rfc3339(),
        "end": end.to_rfc3339(),
    });
    if let Some(enrollment_start) = enrollment_start {
        schedule["enrollment_start"] = json!(enrollment_start.to_rfc3339());
    }
    if let Some(enrollment_end) = enrollment_end {
        schedule["enrollment_end"] = json!(enrollment_end.to_rfc3339());
    }
    Ok(Some(schedule))
}

/// Course runs client for the Studio/CMS API.
#[derive(Clone, Copy, Debug)]
pub struct CourseRuns<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseRuns<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Returns a course run.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_course_run(&self, course_id: &str) -> Result<CourseRun, ApiError> {
        let path = format!("{COURSE_RUN_URL}{course_id}/");
        let response = self.client.get(&path, None).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Returns a page of the course runs listing.
    ///
    /// Pass the previous page's `next` URL to fetch the following page;
    /// `None` fetches the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_course_runs_list(
        &self,
        page_url: Option<&str>,
    ) -> Result<CourseRunList, ApiError> {
        let response = match page_url {
            Some(url) => self.client.get_absolute(url).await?,
            None => self.client.get(COURSE_RUN_URL, None).await?,
        }
        .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Creates a new canonical course run.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if only one of start/end is set,
    /// or [`ApiError::Http`] on any non-2xx response.
    pub async fn create_course_run(
        &self,
        params: CreateCourseRunParams,
    ) -> Result<CourseRun, ApiError> {
        let mut body = json!({
            "org": params.org,
            "number": params.number,
            "run": params.run,
            "title": params.title,
        });
        if let Some(pacing_type) = params.pacing_type {
            body["pacing_type"] = json!(pacing_type);
        }
        if let Some(schedule) = build_schedule(
            params.start,
            params.end,
            params.enrollment_start,
            params.enrollment_end,
        )? {
            body["schedule"] = schedule;
        }

        let response = self
            .client
            .post_json(COURSE_RUN_URL, body)
            .await?
            .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Updates a course run looked up by `course_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if only one of start/end is set,
    /// or [`ApiError::Http`] on any non-2xx response.
    pub async fn update_course_run(
        &self,
        course_id: &str,
        params: UpdateCourseRunParams,
    ) -> Result<CourseRun, ApiError> {
        let mut body = json!({});
        if let Some(title) = params.title {
            body["title"] = json!(title);
        }
        if let Some(pacing_type) = params.pacing_type {
            body["pacing_type"] = json!(pacing_type);
        }
        if let Some(schedule) = build_schedule(
            params.start,
            params.end,
            params.enrollment_start,
            params.enrollment_end,
        )? {
            body["schedule"] = schedule;
        }

        let path = format!("{COURSE_RUN_URL}{course_id}/");
        let response = self
            .client
            .put_json(&path, body)
            .await?
            .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Clones an existing course run into a new course id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn clone_course_run(
        &self,
        source_course_id: &str,
        destination_course_id: &str,
    ) -> Result<(), ApiError> {
        let body = json!({
            "source_course_id": source_course_id,
            "destination_course_id": destination_course_id,
        });
        self.client
            .post_json(COURSE_RUN_CLONE_URL, body)
            .await?
            .error_for_status()?;
        Ok(())
    }
}

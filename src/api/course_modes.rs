//! Course modes client and model.
//!
//! Wraps `GET /api/course_modes/v1/courses/{course_id}` for the full mode
//! list of a course and `GET /api/course_modes/v1/courses/{course_id}/{mode}`
//! for a single mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::datetime;
use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// An enrollment mode configured for a course, with pricing and expiration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CourseMode {
    /// The course id associated with the course mode.
    #[serde(default)]
    pub course_id: Option<String>,
    /// The short name for the course mode.
    #[serde(default)]
    pub mode_slug: Option<String>,
    /// The verbose name for the course mode.
    #[serde(default)]
    pub mode_display_name: Option<String>,
    /// The minimum price for which a user can enroll in this mode.
    #[serde(default)]
    pub min_price: Option<f64>,
    /// The currency of the listed prices.
    #[serde(default)]
    pub currency: Option<String>,
    /// The date and time after which users cannot enroll in the course in
    /// this mode.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub expiration_datetime: Option<DateTime<Utc>>,
    /// Whether the expiration was explicitly set.
    #[serde(default)]
    pub expiration_datetime_is_explicit: Option<bool>,
    /// A description of this mode.
    #[serde(default)]
    pub description: Option<String>,
}

/// Course modes client.
#[derive(Clone, Copy, Debug)]
pub struct CourseModes<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseModes<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Returns all the enrollment modes configured for a course.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_course_modes(&self, course_id: &str) -> Result<Vec<CourseMode>, ApiError> {
        let path = format!("/api/course_modes/v1/courses/{course_id}");
        let response = self.client.get(&path, None).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Returns a single enrollment mode of a course.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response — including 404
    /// when the course has no such mode.
    pub async fn get_mode(
        &self,
        course_id: &str,
        mode_slug: &str,
    ) -> Result<CourseMode, ApiError> {
        let path = format!("/api/course_modes/v1/courses/{course_id}/{mode_slug}");
        let response = self.client.get(&path, None).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

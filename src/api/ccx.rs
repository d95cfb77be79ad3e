//! CCX (Custom Courses on edX) client.
//!
//! Wraps `POST /api/ccx/v0/ccx/`, creating an instructor-scoped variant of
//! a master course.

use serde_json::json;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

const CCX_URL: &str = "/api/ccx/v0/ccx/";

/// CCX client.
#[derive(Clone, Copy, Debug)]
pub struct Ccx<'a> {
    client: &'a HttpClient,
}

impl<'a> Ccx<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Creates a CCX and returns the id of the new CCX course.
    ///
    /// The coach user must already exist on the Open edX instance.
    /// `modules` optionally restricts the CCX to the given module locator
    /// ids.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response (the error body
    /// is logged first), or [`ApiError::UnexpectedPayload`] if the response
    /// carries no `ccx_course_id`.
    pub async fn create(
        &self,
        master_course_id: &str,
        coach_email: &str,
        max_students_allowed: u32,
        title: &str,
        modules: Option<&[String]>,
    ) -> Result<String, ApiError> {
        let mut payload = json!({
            "master_course_id": master_course_id,
            "coach_email": coach_email,
            "max_students_allowed": max_students_allowed,
            "display_name": title,
        });
        if let Some(modules) = modules {
            payload["course_modules"] = json!(modules);
        }

        let response = self.client.post_json(CCX_URL, payload).await?;
        if !response.is_ok() {
            tracing::error!(body = %response.text, "CCX creation failed");
        }
        let response = response.error_for_status()?;

        response
            .body
            .get("ccx_course_id")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| ApiError::UnexpectedPayload {
                context: "missing 'ccx_course_id' in CCX creation response".to_string(),
            })
    }
}

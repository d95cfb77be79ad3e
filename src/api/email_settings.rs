//! Course email settings client.
//!
//! Wraps `POST /api/change_email_settings`, which toggles whether the
//! requesting user receives bulk course emails. The endpoint is a legacy
//! view taking a form-encoded body and reports the outcome in a `success`
//! flag; a failed HTTP exchange is logged and reported as `false` rather
//! than raised, matching the endpoint's forgiving contract.

use serde_json::json;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

const EMAIL_SETTINGS_URL: &str = "/api/change_email_settings";

/// Course email settings client.
#[derive(Clone, Copy, Debug)]
pub struct EmailSettings<'a> {
    client: &'a HttpClient,
}

impl<'a> EmailSettings<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Subscribes the user to receive all course emails.
    ///
    /// Returns the server's `success` flag; a non-2xx response yields
    /// `false` after the error body is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] only on transport failure (the request
    /// never reached the server).
    pub async fn subscribe(&self, course_id: &str) -> Result<bool, ApiError> {
        self.change_settings(json!({
            "course_id": course_id,
            "receive_emails": "on",
        }))
        .await
    }

    /// Unsubscribes the user from receiving course emails.
    ///
    /// Returns the server's `success` flag; a non-2xx response yields
    /// `false` after the error body is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] only on transport failure.
    pub async fn unsubscribe(&self, course_id: &str) -> Result<bool, ApiError> {
        self.change_settings(json!({"course_id": course_id})).await
    }

    async fn change_settings(&self, payload: serde_json::Value) -> Result<bool, ApiError> {
        let response = self.client.post_form(EMAIL_SETTINGS_URL, payload).await?;
        if !response.is_ok() {
            tracing::error!(body = %response.text, "changing email settings failed");
        }
        Ok(response
            .body
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false))
    }
}

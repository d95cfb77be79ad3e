//! Bulk user retirement client and model.
//!
//! Wraps `POST v1/accounts/bulk_retire_users` on the user retirement
//! service. The path is base-relative, since the retirement service
//! commonly lives under its own prefix; requests carry a `JWT`
//! authorization header instead of the usual `Bearer` one.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

const RETIREMENT_URL: &str = "v1/accounts/bulk_retire_users";

/// Outcome of a bulk retirement request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BulkRetirementResponse {
    /// Usernames whose retirement was initiated.
    #[serde(default)]
    pub successful_user_retirements: Vec<String>,
    /// Usernames whose retirement failed.
    #[serde(default)]
    pub failed_user_retirements: Vec<String>,
}

/// Bulk user retirement client.
#[derive(Clone, Copy, Debug)]
pub struct BulkUserRetirement<'a> {
    client: &'a HttpClient,
}

impl<'a> BulkUserRetirement<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Initiates retirement of the given users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn retire_users(
        &self,
        usernames: &[String],
    ) -> Result<BulkRetirementResponse, ApiError> {
        let payload = json!({"usernames": usernames.join(",")});
        let response = self
            .client
            .post_json(RETIREMENT_URL, payload)
            .await?
            .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

//! LTI tools client.
//!
//! Wraps `POST /api/lti-user-fix/`, which repairs an LTI application user
//! with a duplicate email. Requests carry a `JWT` authorization header.

use serde_json::json;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

const LTI_USER_FIX_URL: &str = "/api/lti-user-fix/";

/// LTI tools client.
#[derive(Clone, Copy, Debug)]
pub struct LtiTools<'a> {
    client: &'a HttpClient,
}

impl<'a> LtiTools<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fixes an LTI user with a duplicate email.
    ///
    /// The request is done on behalf of the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn fix_lti_user(&self, email: &str) -> Result<(), ApiError> {
        let payload = json!({"email": email});
        self.client
            .post_json(LTI_USER_FIX_URL, payload)
            .await?
            .error_for_status()?;
        Ok(())
    }
}

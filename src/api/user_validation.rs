//! User registration validation client and model.
//!
//! Wraps `POST /api/user/v1/validation/registration`. Unlike the rest of
//! the API this endpoint takes a form-encoded body, and an empty validation
//! message means the submitted value is valid.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

const VALIDATION_URL: &str = "/api/user/v1/validation/registration";

/// Registration fields to validate.
#[derive(Clone, Debug, Default)]
pub struct RegistrationInfo {
    /// Full name to validate.
    pub name: Option<String>,
    /// Username to validate.
    pub username: Option<String>,
}

/// The server's validation decisions.
///
/// Each decision is a human-readable message; an empty string indicates
/// the value is valid.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserValidationResult {
    #[serde(default)]
    validation_decisions: ValidationDecisions,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct ValidationDecisions {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl UserValidationResult {
    /// Returns the validation message for the name. An empty string
    /// indicates a valid name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.validation_decisions.name.as_deref()
    }

    /// Returns the validation message for the username. An empty string
    /// indicates a valid username.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.validation_decisions.username.as_deref()
    }
}

/// User registration validation client.
#[derive(Clone, Copy, Debug)]
pub struct UserValidation<'a> {
    client: &'a HttpClient,
}

impl<'a> UserValidation<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Validates user data submitted during registration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn validate_user_registration_info(
        &self,
        registration_information: RegistrationInfo,
    ) -> Result<UserValidationResult, ApiError> {
        let mut body = json!({});
        if let Some(name) = registration_information.name {
            body["name"] = json!(name);
        }
        if let Some(username) = registration_information.username {
            body["username"] = json!(username);
        }

        let response = self
            .client
            .post_form(VALIDATION_URL, body)
            .await?
            .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_parses_decisions() {
        let result: UserValidationResult = serde_json::from_value(json!({
            "validation_decisions": {
                "name": "",
                "username": "It looks like this username is already taken",
            },
        }))
        .unwrap();

        assert_eq!(result.name(), Some(""));
        assert!(result.username().unwrap().contains("already taken"));
    }

    #[test]
    fn test_validation_result_without_decisions() {
        let result: UserValidationResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.name().is_none());
        assert!(result.username().is_none());
    }
}

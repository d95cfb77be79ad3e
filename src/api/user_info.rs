//! User info client and models.
//!
//! Wraps `GET /api/mobile/v0.5/my_user_info` for the requesting user's
//! profile and `GET /api/user/v1/accounts/{username}` for another user's
//! account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::datetime;
use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// Information about the requesting user.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Info {
    /// Username of the user.
    #[serde(default)]
    pub username: Option<String>,
    /// Email address of the user.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name of the user.
    #[serde(default)]
    pub name: Option<String>,
    /// Numeric id of the user.
    #[serde(default, rename = "id")]
    pub user_id: Option<i64>,
}

/// An account record from the user accounts API.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Account {
    /// Username of the user.
    #[serde(default)]
    pub username: Option<String>,
    /// Email address of the user.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name of the user.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub is_active: bool,
    /// Country code of the user.
    #[serde(default)]
    pub country: Option<String>,
    /// When the account was created.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub date_joined: Option<DateTime<Utc>>,
}

/// User info client.
#[derive(Clone, Copy, Debug)]
pub struct UserInfo<'a> {
    client: &'a HttpClient,
}

impl<'a> UserInfo<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Returns the profile of the user whose access token was provided to
    /// the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_user_info(&self) -> Result<Info, ApiError> {
        let response = self
            .client
            .get("/api/mobile/v0.5/my_user_info", None)
            .await?
            .error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Returns the account record of the given user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_account(&self, username: &str) -> Result<Account, ApiError> {
        let path = format!("/api/user/v1/accounts/{username}");
        let response = self.client.get(&path, None).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

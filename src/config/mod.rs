//! Configuration types for the Open edX API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with an Open edX instance.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EdxConfig`]: The main configuration struct holding all client settings
//! - [`EdxConfigBuilder`]: A builder for constructing [`EdxConfig`] instances
//! - [`AccessToken`]: A validated access token newtype with masked debug output
//! - [`BaseUrl`]: A validated LMS base URL
//!
//! # Example
//!
//! ```rust
//! use openedx_api::{AccessToken, EdxConfig};
//!
//! let config = EdxConfig::builder()
//!     .access_token(AccessToken::new("opensesame").unwrap())
//!     .base_url("https://courses.edx.org/")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_str(), "https://courses.edx.org/");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL of the edx.org LMS.
pub const DEFAULT_BASE_URL: &str = "https://courses.edx.org/";

/// Default per-request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for the Open edX API client.
///
/// This struct holds everything needed to issue authenticated requests:
/// the access token, the LMS base URL, and the fixed per-request timeout.
/// The timeout is set once at construction and applies to every call made
/// through the client; it cannot be overridden per call.
///
/// # Thread Safety
///
/// `EdxConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use openedx_api::{AccessToken, EdxConfig};
///
/// let config = EdxConfig::builder()
///     .access_token(AccessToken::new("opensesame").unwrap())
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Clone, Debug)]
pub struct EdxConfig {
    access_token: AccessToken,
    base_url: BaseUrl,
    timeout: Duration,
}

impl EdxConfig {
    /// Creates a new builder for constructing an `EdxConfig`.
    #[must_use]
    pub fn builder() -> EdxConfigBuilder {
        EdxConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the LMS base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the fixed per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`EdxConfig`] instances.
///
/// The access token is required; base URL and timeout fall back to
/// [`DEFAULT_BASE_URL`] and [`DEFAULT_TIMEOUT`].
#[derive(Debug, Default)]
pub struct EdxConfigBuilder {
    access_token: Option<AccessToken>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
}

impl EdxConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the LMS base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is not an
    /// absolute http(s) URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, ConfigError> {
        self.base_url = Some(BaseUrl::new(url)?);
        Ok(self)
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`EdxConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no access token was
    /// provided. Open edX lacks support for the client-credentials grant,
    /// so the token must be obtained out of band.
    pub fn build(self) -> Result<EdxConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };
        Ok(EdxConfig {
            access_token,
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

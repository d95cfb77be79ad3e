//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// A validated Open edX access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AccessToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use openedx_api::AccessToken;
///
/// let token = AccessToken::new("opensesame").unwrap();
/// assert_eq!(token.as_ref(), "opensesame");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated base URL of an Open edX instance.
///
/// The URL is normalized to include a trailing slash so relative endpoint
/// paths join correctly. Paths starting with `/` replace the URL path
/// entirely, while bare relative paths (used by the Studio course-runs API
/// and the retirement service) append to it.
///
/// # Example
///
/// ```rust
/// use openedx_api::BaseUrl;
///
/// let base = BaseUrl::new("https://courses.edx.org").unwrap();
/// assert_eq!(base.as_str(), "https://courses.edx.org/");
///
/// let joined = base.join("/api/enrollment/v1/enrollment").unwrap();
/// assert_eq!(joined.as_str(), "https://courses.edx.org/api/enrollment/v1/enrollment");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is not an
    /// absolute http(s) URL.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref();
        let parsed = Url::parse(raw).map_err(|_| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.to_string(),
            });
        }
        Ok(Self(ensure_trailing_slash(parsed)))
    }

    /// Joins an endpoint path against this base URL.
    ///
    /// Follows standard URL-join semantics: a leading `/` makes the path
    /// absolute on the host, otherwise it is resolved relative to the base
    /// URL path.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the path cannot be joined.
    pub fn join(&self, path: &str) -> Result<Url, url::ParseError> {
        self.0.join(path)
    }

    /// Returns the normalized URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Appends a trailing slash to the URL path when absent, so that relative
/// joins treat the last path segment as a directory.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

//! HTTP-specific error types for the Open edX API client.
//!
//! This module contains error types for transport operations. There is no
//! retry machinery anywhere in the client: a failed request propagates
//! immediately to the caller.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use openedx_api::clients::HttpError;
//!
//! match client.get("/api/mobile/v0.5/my_user_info", None).await {
//!     Ok(response) => println!("Status: {}", response.code),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message field carries the raw response body text, which Open edX
/// populates with a JSON error document for most endpoints.
///
/// # Example
///
/// ```rust
/// use openedx_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"detail":"Not found."}"#.to_string(),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("server returned status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body text.
    pub message: String,
}

impl HttpResponseError {
    /// Returns `true` if the status code is in the 5xx range.
    ///
    /// The enrolled-course aggregation helpers re-raise 5xx errors while
    /// silently skipping 4xx ones.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.code >= 500
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST/PUT/PATCH requests
/// - Body provided without `body_type`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT, or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all transport-level errors.
///
/// This enum provides a single error type for HTTP operations, making it
/// easier to handle errors at API boundaries. Use pattern matching to
/// handle specific error types.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A request path or pagination URL could not be resolved into a URL.
    #[error("invalid request URL '{url}'")]
    InvalidUrl {
        /// The path or URL that failed to parse.
        url: String,
    },

    /// Network or connection error, including request timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code if this error carries a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}

//! Error types for resource-level API operations.
//!
//! This module layers resource semantics on top of the transport errors in
//! [`crate::clients::errors`]:
//!
//! - [`ApiError`]: unified error for every resource call
//! - [`ValidationError`]: domain validation failures raised by model
//!   constructors and request builders
//!
//! # Example
//!
//! ```rust,ignore
//! use openedx_api::api::ApiError;
//!
//! match api.course_details().get_detail("course-v1:edX+DemoX+Demo_Course", None).await {
//!     Ok(detail) => println!("{:?}", detail.name),
//!     Err(ApiError::Http(e)) => println!("HTTP failure: {e}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError};

/// Domain validation errors raised before any request is issued, or by
/// collection constructors rejecting inconsistent payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A grade collection mixed records belonging to different users.
    #[error("Only current grades for the same user are allowed: expected '{expected}', found '{found}'")]
    MixedUsers {
        /// Username of the first record in the collection.
        expected: String,
        /// The conflicting username.
        found: String,
    },

    /// A grade collection mixed records belonging to different courses.
    #[error("Only current grades for the same course are allowed: expected '{expected}', found '{found}'")]
    MixedCourses {
        /// Course id of the first record in the collection.
        expected: String,
        /// The conflicting course id.
        found: String,
    },

    /// A course-run schedule provided a start without an end, or vice versa.
    #[error("Both start and end dates must be provided if one is provided.")]
    IncompleteSchedule,
}

/// Unified error type for resource-level API operations.
///
/// Every resource call returns `Result<T, ApiError>`. HTTP failures
/// propagate unchanged from the transport; the only place status codes are
/// classified is the enrolled-course aggregation helpers, which skip 4xx
/// and re-raise 5xx.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A transport-level error, including non-2xx responses.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be deserialized into the expected model.
    #[error("failed to parse response payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The response body parsed but did not have the expected shape.
    #[error("unexpected response payload: {context}")]
    UnexpectedPayload {
        /// What was expected and what was found.
        context: String,
    },

    /// A domain validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<HttpResponseError> for ApiError {
    fn from(error: HttpResponseError) -> Self {
        Self::Http(HttpError::Response(error))
    }
}

impl ApiError {
    /// Returns the HTTP status code if this error carries a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if this error is an HTTP response with status ≥ 500.
    ///
    /// Used by the aggregation helpers to decide between re-raising and
    /// silently skipping a per-course failure.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|code| code >= 500)
    }
}

//! HTTP response types for the Open edX API client.
//!
//! This module provides the [`HttpResponse`] type for accessing API response
//! data. The transport never interprets status codes itself; callers decide
//! whether a non-2xx response is an error via
//! [`error_for_status`](HttpResponse::error_for_status).

use serde_json::Value;

use crate::clients::errors::HttpResponseError;

/// An HTTP response from an Open edX instance.
///
/// Contains the response status code, the parsed JSON body, and the raw
/// body text. Bodies that are empty or not valid JSON parse to an empty
/// object; the raw text is retained for error reporting.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The parsed response body.
    pub body: Value,
    /// The raw response body text.
    pub text: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the body text as JSON.
    ///
    /// Empty or malformed bodies degrade to `{}` rather than failing; the
    /// raw text is kept alongside for diagnostics.
    #[must_use]
    pub fn new(code: u16, text: String) -> Self {
        let body = if text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({}))
        };
        Self { code, body, text }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Converts a non-2xx response into an [`HttpResponseError`].
    ///
    /// This mirrors the "raise on HTTP error" contract each resource call
    /// applies after issuing its request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpResponseError`] carrying the status code and the raw
    /// body text when the status is outside the 2xx range.
    pub fn error_for_status(self) -> Result<Self, HttpResponseError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(HttpResponseError {
                code: self.code,
                message: self.text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, String::new());
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 422, 500, 503] {
            let response = HttpResponse::new(code, String::new());
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_body_parses_json() {
        let response = HttpResponse::new(200, r#"{"username":"staff"}"#.to_string());
        assert_eq!(response.body, json!({"username": "staff"}));
    }

    #[test]
    fn test_empty_body_degrades_to_empty_object() {
        let response = HttpResponse::new(204, String::new());
        assert_eq!(response.body, json!({}));
    }

    #[test]
    fn test_malformed_body_degrades_to_empty_object_keeping_text() {
        let response = HttpResponse::new(502, "<html>Bad Gateway</html>".to_string());
        assert_eq!(response.body, json!({}));
        assert_eq!(response.text, "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_error_for_status_passes_through_success() {
        let response = HttpResponse::new(201, r#"{"ok":true}"#.to_string());
        let response = response.error_for_status().unwrap();
        assert_eq!(response.code, 201);
    }

    #[test]
    fn test_error_for_status_raises_on_client_error() {
        let response = HttpResponse::new(404, r#"{"detail":"Not found."}"#.to_string());
        let error = response.error_for_status().unwrap_err();
        assert_eq!(error.code, 404);
        assert!(error.message.contains("Not found."));
    }

    #[test]
    fn test_error_for_status_raises_on_server_error() {
        let response = HttpResponse::new(500, String::new());
        let error = response.error_for_status().unwrap_err();
        assert_eq!(error.code, 500);
    }
}

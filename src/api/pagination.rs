//! Pagination helpers shared by the listing endpoints.
//!
//! Open edX APIs paginate three different ways:
//!
//! - **Cursor pagination** (enrollments list): the response's `next` URL
//!   carries an opaque `cursor` query parameter to echo back.
//! - **Page-number pagination** (course list): a `pagination` block reports
//!   whether another page exists; the client increments `page`.
//! - **Absolute `next` URL** (course grades, course runs list): the `next`
//!   field is a full URL fetched directly.
//!
//! This module provides the cursor extraction and the `results`/`next`
//! envelope shared by the cursor and absolute-URL flavors. The page-number
//! flavor has its own envelope in [`crate::api::course_list`].

use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Extracts the `cursor` query parameter from a pagination `next` URL.
///
/// Returns `None` when the URL is absent, unparseable, or carries no
/// cursor, which all mean the listing is exhausted.
///
/// # Example
///
/// ```rust
/// use openedx_api::api::pagination::cursor_from_next;
///
/// let next = "https://edx.example.com/api/enrollment/v1/enrollments?cursor=abc123";
/// assert_eq!(cursor_from_next(next), Some("abc123".to_string()));
/// assert_eq!(cursor_from_next("not a url"), None);
/// ```
#[must_use]
pub fn cursor_from_next(next_url: &str) -> Option<String> {
    let url = Url::parse(next_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "cursor")
        .map(|(_, value)| value.into_owned())
}

/// The `results` + `next`/`previous` envelope used by paginated responses.
///
/// Some older Open edX releases return a bare array instead of the
/// envelope; [`from_body`](Self::from_body) accepts both shapes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaginatedResults {
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// The records on this page.
    #[serde(default)]
    pub results: Vec<Value>,
}

impl PaginatedResults {
    /// Parses a response body that is either a pagination envelope or a
    /// bare array of records.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Array(results) => Self {
                next: None,
                previous: None,
                results,
            },
            other => serde_json::from_value(other).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_extracted_from_next_url() {
        let next = "https://edx.example.com/api/enrollment/v1/enrollments?course_id=x&cursor=opaque-cursor-1";
        assert_eq!(cursor_from_next(next), Some("opaque-cursor-1".to_string()));
    }

    #[test]
    fn test_cursor_absent_from_next_url() {
        let next = "https://edx.example.com/api/enrollment/v1/enrollments?page=2";
        assert_eq!(cursor_from_next(next), None);
    }

    #[test]
    fn test_cursor_from_unparseable_url() {
        assert_eq!(cursor_from_next("::::"), None);
    }

    #[test]
    fn test_envelope_body() {
        let page = PaginatedResults::from_body(json!({
            "next": "https://edx.example.com/api/grades/v1/courses/x/?page=2",
            "previous": null,
            "results": [{"username": "staff"}],
        }));
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_bare_array_body() {
        let page = PaginatedResults::from_body(json!([{"username": "staff"}, {"username": "verified"}]));
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_unexpected_body_degrades_to_empty() {
        let page = PaginatedResults::from_body(json!("nope"));
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
    }
}

//! Course detail client and model.
//!
//! Wraps `GET /api/courses/v1/courses/{course_id}/`. The request may be done
//! on behalf of a user via the optional `username` query parameter;
//! depending on how the Open edX instance is set up, the course detail may
//! be limited to `staff` users, and omitting the username performs the
//! request as an anonymous user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::datetime;
use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// A named media item attached to a course (course image, video, ...).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Media {
    /// URI of the media item.
    #[serde(default, alias = "url")]
    pub uri: Option<String>,
}

/// Course metadata from the course detail and course list APIs.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CourseDetail {
    /// Unique identifier of the course; a serialized representation of the
    /// opaque key identifying the course.
    #[serde(default, rename = "id")]
    pub course_id: Option<String>,
    /// Name of the course.
    #[serde(default)]
    pub name: Option<String>,
    /// Catalog number of the course.
    #[serde(default)]
    pub number: Option<String>,
    /// Name of the organization that owns the course.
    #[serde(default)]
    pub org: Option<String>,
    /// A textual description of the course.
    #[serde(default)]
    pub short_description: Option<String>,
    /// URL used to fetch the course blocks.
    #[serde(default)]
    pub blocks_url: Option<String>,
    /// A textual description of the weekly hours of effort expected.
    #[serde(default)]
    pub effort: Option<String>,
    /// Date the course begins.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub start: Option<DateTime<Utc>>,
    /// Date the course ends.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub end: Option<DateTime<Utc>>,
    /// Date enrollment begins.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_start: Option<DateTime<Utc>>,
    /// Date enrollment ends.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub enrollment_end: Option<DateTime<Utc>>,
    /// Date certificates are made available.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub certificate_available_date: Option<DateTime<Utc>>,
    /// Readably formatted start of the course.
    #[serde(default)]
    pub start_display: Option<String>,
    /// Hint describing how `start_display` is set. One of `string`
    /// (manually set), `timestamp` (generated from `start`), or `empty`
    /// (the start date should not be shown).
    #[serde(default)]
    pub start_type: Option<String>,
    /// A possibly verbose HTML description of the course. Only included in
    /// the course detail view, not the course list view.
    #[serde(default)]
    pub overview: Option<String>,
    /// Named media items.
    #[serde(default)]
    pub media: HashMap<String, Media>,
    /// Pacing of the course: `self` or `instructor`.
    #[serde(default)]
    pub pacing: Option<String>,
}

impl CourseDetail {
    /// Returns `true` if the course is self paced.
    ///
    /// Calculated from `pacing`; this is not a field of the detail API.
    #[must_use]
    pub fn is_self_paced(&self) -> bool {
        self.pacing.as_deref() == Some("self")
    }

    /// Returns the URI of a named media item, if present.
    #[must_use]
    pub fn media_uri(&self, kind: &str) -> Option<&str> {
        self.media.get(kind).and_then(|media| media.uri.as_deref())
    }
}

/// Course detail client.
#[derive(Clone, Copy, Debug)]
pub struct CourseDetails<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseDetails<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches course details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn get_detail(
        &self,
        course_id: &str,
        username: Option<&str>,
    ) -> Result<CourseDetail, ApiError> {
        let path = format!("/api/courses/v1/courses/{course_id}/");
        let query = username.map(|username| {
            let mut query = HashMap::new();
            query.insert("username".to_string(), username.to_string());
            query
        });

        let response = self.client.get(&path, query).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

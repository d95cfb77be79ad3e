//! Lenient date-time handling for API payloads.
//!
//! Open edX timestamps are RFC 3339 strings, but fields are frequently
//! `null`, absent, or (on older releases) malformed. Date-valued model
//! fields therefore deserialize through [`lenient`], which maps anything
//! unparseable to `None` instead of failing the whole payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an RFC 3339 timestamp, falling back to a bare `YYYY-MM-DD` date
/// at midnight UTC. Returns `None` for anything else.
#[must_use]
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Serde deserializer for optional date-time fields.
///
/// Absent keys, `null`, non-string values, and malformed strings all become
/// `None`; a parse failure never raises. Use together with
/// `#[serde(default)]` so missing keys are tolerated too:
///
/// ```rust,ignore
/// #[serde(default, deserialize_with = "crate::api::datetime::lenient")]
/// pub created: Option<DateTime<Utc>>,
/// ```
///
/// # Errors
///
/// Never fails on date content; only propagates lower-level deserializer
/// errors (e.g. premature end of input).
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| v.as_str()).and_then(parse))
}

//! Student certificates client and models.
//!
//! Wraps `GET /api/certificates/v0/certificates/{username}/courses/{course_id}/`
//! and provides the enrolled-course fan-out: when no course list is given,
//! the user's enrollments are fetched first and one certificate request is
//! issued per enrolled course. A per-course response with status ≥ 500
//! aborts the whole aggregation; a 4xx response just leaves that course out
//! of the result set.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::datetime;
use crate::api::enrollments::CourseEnrollments;
use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// The verified certificate type.
const CERTIFICATE_TYPE_VERIFIED: &str = "verified";

/// A certificate earned by a user in a course run.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Certificate {
    /// Username of the certificate owner.
    #[serde(default)]
    pub username: Option<String>,
    /// Course the certificate was earned in.
    #[serde(default)]
    pub course_id: Option<String>,
    /// Certificate type (e.g. `honor`, `verified`).
    #[serde(default)]
    pub certificate_type: Option<String>,
    /// Certificate status (e.g. `downloadable`).
    #[serde(default)]
    pub status: Option<String>,
    /// URL the certificate can be downloaded from.
    #[serde(default)]
    pub download_url: Option<String>,
    /// Grade the certificate was issued for, as reported by the server.
    #[serde(default)]
    pub grade: Option<String>,
    /// When the certificate was created.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub created: Option<DateTime<Utc>>,
    /// When the certificate was last modified.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub modified: Option<DateTime<Utc>>,
    /// Whether the user passed the course.
    #[serde(default)]
    pub is_passing: Option<bool>,
}

impl Certificate {
    /// Returns `true` if the certificate type is `verified`.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.certificate_type.as_deref() == Some(CERTIFICATE_TYPE_VERIFIED)
    }
}

/// A user's certificates, keyed by course id.
///
/// Assumes there can be only one certificate per course run and user.
#[derive(Clone, Debug, Default)]
pub struct Certificates {
    certificates: BTreeMap<String, Certificate>,
    verified: BTreeMap<String, Certificate>,
}

impl Certificates {
    /// Builds the collection from a list of certificates.
    ///
    /// Certificates without a course id are dropped.
    #[must_use]
    pub fn new(certificates: Vec<Certificate>) -> Self {
        let mut all = BTreeMap::new();
        let mut verified = BTreeMap::new();
        for certificate in certificates {
            let Some(course_id) = certificate.course_id.clone() else {
                continue;
            };
            if certificate.is_verified() {
                verified.insert(course_id.clone(), certificate.clone());
            }
            all.insert(course_id, certificate);
        }
        Self {
            certificates: all,
            verified,
        }
    }

    /// Returns the course ids of all certificates.
    pub fn all_course_ids(&self) -> impl Iterator<Item = &str> {
        self.certificates.keys().map(String::as_str)
    }

    /// Returns the course ids of the verified certificates.
    pub fn verified_course_ids(&self) -> impl Iterator<Item = &str> {
        self.verified.keys().map(String::as_str)
    }

    /// Returns all the certificates.
    pub fn all_certs(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates.values()
    }

    /// Returns all the verified certificates.
    pub fn verified_certs(&self) -> impl Iterator<Item = &Certificate> {
        self.verified.values()
    }

    /// Returns the certificate for the given course id.
    #[must_use]
    pub fn cert_for_course(&self, course_id: &str) -> Option<&Certificate> {
        self.certificates.get(course_id)
    }

    /// Returns the verified certificate for the given course id.
    #[must_use]
    pub fn verified_cert_for_course(&self, course_id: &str) -> Option<&Certificate> {
        self.verified.get(course_id)
    }

    /// Whether the course has a verified certificate.
    #[must_use]
    pub fn has_verified_cert(&self, course_id: &str) -> bool {
        self.verified.contains_key(course_id)
    }

    /// Returns the number of certificates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Returns `true` if there are no certificates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

/// Student certificates client.
#[derive(Clone, Copy, Debug)]
pub struct UserCertificates<'a> {
    client: &'a HttpClient,
}

impl<'a> UserCertificates<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Returns the user's certificate for a single course.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response — including 404
    /// when the user has no certificate for the course.
    pub async fn get_student_certificate(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<Certificate, ApiError> {
        let path = format!("/api/certificates/v0/certificates/{username}/courses/{course_id}/");
        let response = self.client.get(&path, None).await?.error_for_status()?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Returns the user's certificates for the given courses, or for all
    /// enrolled courses when `course_ids` is `None`.
    ///
    /// Courses answering 4xx (typically 404, no certificate) are silently
    /// omitted from the result set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the enrollment lookup fails, if any
    /// per-course response has status ≥ 500, or on transport failure.
    pub async fn get_student_certificates(
        &self,
        username: &str,
        course_ids: Option<Vec<String>>,
    ) -> Result<Certificates, ApiError> {
        let course_ids = match course_ids {
            Some(ids) => ids,
            None => {
                let enrollments = CourseEnrollments::new(self.client)
                    .get_student_enrollments()
                    .await?;
                enrollments.enrolled_course_ids(None)
            }
        };

        let mut certificates = Vec::new();
        for course_id in course_ids {
            match self.get_student_certificate(username, &course_id).await {
                Ok(certificate) => certificates.push(certificate),
                Err(error) => match error.status() {
                    Some(code) if code < 500 => {}
                    _ => return Err(error),
                },
            }
        }

        Ok(Certificates::new(certificates))
    }
}

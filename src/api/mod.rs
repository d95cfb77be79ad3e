//! Resource clients for the Open edX REST APIs.
//!
//! [`EdxApi`] is the entry point: construct it from an [`EdxConfig`] and
//! obtain a per-resource accessor for each API. Every accessor borrows the
//! shared transport, so an `EdxApi` can hand out any number of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use openedx_api::{AccessToken, EdxApi, EdxConfig};
//!
//! let config = EdxConfig::builder()
//!     .access_token(AccessToken::new("opensesame")?)
//!     .base_url("https://edx.example.com")?
//!     .build()?;
//! let api = EdxApi::new(&config);
//!
//! let enrollments = api.enrollments().get_student_enrollments().await?;
//! let certificates = api
//!     .certificates()
//!     .get_student_certificates("staff", None)
//!     .await?;
//! ```

pub mod bulk_retirement;
pub mod ccx;
pub mod certificates;
pub mod course_detail;
pub mod course_list;
pub mod course_modes;
pub mod course_runs;
pub mod course_structure;
pub mod datetime;
pub mod email_settings;
pub mod enrollments;
pub mod errors;
pub mod grades;
pub mod lti_tools;
pub mod pagination;
pub mod user_info;
pub mod user_validation;

pub use errors::{ApiError, ValidationError};

use crate::clients::{AuthScheme, HttpClient};
use crate::config::EdxConfig;

use bulk_retirement::BulkUserRetirement;
use ccx::Ccx;
use certificates::UserCertificates;
use course_detail::CourseDetails;
use course_list::CourseList;
use course_modes::CourseModes;
use course_runs::CourseRuns;
use course_structure::CourseStructure;
use email_settings::EmailSettings;
use enrollments::CourseEnrollments;
use grades::UserCurrentGrades;
use lti_tools::LtiTools;
use user_info::UserInfo;
use user_validation::UserValidation;

/// A client for speaking with an Open edX instance.
///
/// Owns two transports built once from the configuration: the `Bearer`
/// transport used by almost every API, and the `JWT` transport used by the
/// bulk-retirement and LTI-tools endpoints. Construction performs no I/O.
#[derive(Debug)]
pub struct EdxApi {
    bearer: HttpClient,
    jwt: HttpClient,
}

impl EdxApi {
    /// Creates a new client from the given configuration.
    #[must_use]
    pub fn new(config: &EdxConfig) -> Self {
        Self {
            bearer: HttpClient::new(config, AuthScheme::Bearer),
            jwt: HttpClient::new(config, AuthScheme::Jwt),
        }
    }

    /// Course enrollments API.
    #[must_use]
    pub const fn enrollments(&self) -> CourseEnrollments<'_> {
        CourseEnrollments::new(&self.bearer)
    }

    /// Student certificates API.
    #[must_use]
    pub const fn certificates(&self) -> UserCertificates<'_> {
        UserCertificates::new(&self.bearer)
    }

    /// Current grades API.
    #[must_use]
    pub const fn current_grades(&self) -> UserCurrentGrades<'_> {
        UserCurrentGrades::new(&self.bearer)
    }

    /// Course detail API.
    #[must_use]
    pub const fn course_details(&self) -> CourseDetails<'_> {
        CourseDetails::new(&self.bearer)
    }

    /// Course modes API.
    #[must_use]
    pub const fn course_modes(&self) -> CourseModes<'_> {
        CourseModes::new(&self.bearer)
    }

    /// Course list API.
    #[must_use]
    pub const fn course_list(&self) -> CourseList<'_> {
        CourseList::new(&self.bearer)
    }

    /// Course structure API.
    #[must_use]
    pub const fn course_structure(&self) -> CourseStructure<'_> {
        CourseStructure::new(&self.bearer)
    }

    /// Course runs API (Studio/CMS).
    #[must_use]
    pub const fn course_runs(&self) -> CourseRuns<'_> {
        CourseRuns::new(&self.bearer)
    }

    /// CCX API.
    #[must_use]
    pub const fn ccx(&self) -> Ccx<'_> {
        Ccx::new(&self.bearer)
    }

    /// User info API.
    #[must_use]
    pub const fn user_info(&self) -> UserInfo<'_> {
        UserInfo::new(&self.bearer)
    }

    /// User registration validation API.
    #[must_use]
    pub const fn user_validation(&self) -> UserValidation<'_> {
        UserValidation::new(&self.bearer)
    }

    /// Course email settings API.
    #[must_use]
    pub const fn email_settings(&self) -> EmailSettings<'_> {
        EmailSettings::new(&self.bearer)
    }

    /// Bulk user retirement API (JWT authenticated).
    #[must_use]
    pub const fn bulk_retirement(&self) -> BulkUserRetirement<'_> {
        BulkUserRetirement::new(&self.jwt)
    }

    /// LTI tools API (JWT authenticated).
    #[must_use]
    pub const fn lti_tools(&self) -> LtiTools<'_> {
        LtiTools::new(&self.jwt)
    }
}

//! # Open edX API Rust Client
//!
//! A Rust client for the Open edX platform REST APIs, providing type-safe
//! configuration, authenticated transport, and thin per-resource accessors
//! over the LMS and Studio endpoints.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EdxConfig`] and [`EdxConfigBuilder`]
//! - Validated newtypes for the access token and base URL
//! - An authenticated HTTP transport with a fixed per-request timeout
//! - Per-resource clients: enrollments, certificates, grades, course
//!   detail/modes/list/structure, course runs, CCX, user info/validation,
//!   email settings, LTI tools, and bulk retirement
//! - Lazy pagination over the cursor-, page-number-, and next-URL-paginated
//!   listings
//!
//! There is deliberately no retry logic, caching, or shared mutable state:
//! every resource call is a single request/response translation (or a
//! bounded sequential series of them, for the paginated and aggregated
//! calls), and a failed request propagates immediately.
//!
//! ## Quick Start
//!
//! ```rust
//! use openedx_api::{AccessToken, EdxApi, EdxConfig};
//!
//! // Open edX has no client-credentials grant, so the access token must be
//! // obtained out of band and handed to the client.
//! let config = EdxConfig::builder()
//!     .access_token(AccessToken::new("opensesame").unwrap())
//!     .base_url("https://courses.edx.org/")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let api = EdxApi::new(&config);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! // Enrollments of the requesting user
//! let enrollments = api.enrollments().get_student_enrollments().await?;
//! for enrollment in enrollments.enrolled_courses() {
//!     println!("{:?} ({:?})", enrollment.course_id(), enrollment.mode);
//! }
//!
//! // Certificates across every enrolled course; a course answering 404 is
//! // skipped, a 5xx aborts the aggregation
//! let certificates = api
//!     .certificates()
//!     .get_student_certificates("staff", None)
//!     .await?;
//!
//! // Lazy cursor pagination over the full enrollment listing
//! let mut pages = api.enrollments().list(Default::default());
//! while let Some(enrollment) = pages.try_next().await? {
//!     println!("{:?}", enrollment.user);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Read-only models**: Every model is a typed view over a received
//!   payload; date fields degrade to `None` on malformed input, never error
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use api::{ApiError, EdxApi, ValidationError};
pub use config::{AccessToken, BaseUrl, EdxConfig, EdxConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    AuthScheme, DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

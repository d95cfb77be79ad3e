//! Transport layer for the Open edX API client.
//!
//! This module provides the authenticated HTTP session wrapper and its
//! request/response value types:
//!
//! - [`HttpClient`]: authenticated transport with a fixed per-request timeout
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: explicit request values
//! - [`HttpResponse`]: status + parsed JSON body, with
//!   [`error_for_status`](HttpResponse::error_for_status) for the
//!   raise-on-non-2xx contract
//! - [`HttpError`] and friends: transport error taxonomy
//!
//! The transport applies the `Authorization` header ([`AuthScheme::Bearer`]
//! or [`AuthScheme::Jwt`]) to every call and never interprets status codes;
//! classification is left to the resource clients in [`crate::api`].

pub mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{AuthScheme, HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

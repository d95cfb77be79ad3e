//! HTTP client for Open edX API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to an Open edX instance. The client injects the `Authorization`
//! header and a fixed per-request timeout into every call and otherwise
//! stays out of the way: it never interprets status codes, retries, or
//! caches. Callers apply the "raise on HTTP error" contract per call via
//! [`HttpResponse::error_for_status`].

use std::collections::HashMap;

use url::Url;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::EdxConfig;

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Authorization header scheme applied to every request.
///
/// Most Open edX APIs take `Bearer` tokens; the bulk-retirement and LTI
/// user-fix endpoints are fronted by JWT-authenticated services and take
/// `JWT` tokens instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: JWT <token>`
    Jwt,
}

impl AuthScheme {
    /// Formats the `Authorization` header value for the given token.
    #[must_use]
    pub fn header_value(self, token: &str) -> String {
        match self {
            Self::Bearer => format!("Bearer {token}"),
            Self::Jwt => format!("JWT {token}"),
        }
    }
}

/// HTTP client for making requests to an Open edX instance.
///
/// The client handles:
/// - Joining endpoint paths against the configured base URL
/// - Default headers including `User-Agent` and the `Authorization` token
/// - A fixed timeout applied to every request at construction time
///
/// It deliberately does **not** handle status-code classification, retries,
/// or backoff; each resource call decides how to treat a non-2xx response.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use openedx_api::clients::{AuthScheme, HttpClient};
/// use openedx_api::{AccessToken, EdxConfig};
///
/// let config = EdxConfig::builder()
///     .access_token(AccessToken::new("opensesame").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config, AuthScheme::Bearer);
/// let response = client.get("/api/mobile/v0.5/my_user_info", None).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Configuration providing the base URL.
    config: EdxConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// The configured timeout is baked into the underlying reqwest client,
    /// so it applies uniformly to every request and cannot be overridden
    /// per call.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &EdxConfig, scheme: AuthScheme) -> Self {
        let user_agent = format!("Open edX API Client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            scheme.header_value(config.access_token().as_ref()),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
            default_headers,
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the base URL this client joins endpoint paths against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url().as_str()
    }

    /// Sends an HTTP request to the Open edX instance.
    ///
    /// The request path is joined against the configured base URL: a leading
    /// `/` replaces the base path, a bare relative path appends to it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The path cannot be joined into a URL (`InvalidUrl`)
    /// - A network error or timeout occurs (`Network`)
    ///
    /// A non-2xx response is **not** an error at this layer.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self
            .config
            .base_url()
            .join(&request.path)
            .map_err(|_| HttpError::InvalidUrl {
                url: request.path.clone(),
            })?;

        self.send(
            request.http_method,
            url,
            request.body,
            request.body_type,
            request.query,
            request.extra_headers,
        )
        .await
    }

    /// Sends a GET request to the given endpoint path.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.request(builder.build()?).await
    }

    /// Fetches an absolute URL, typically a pagination `next` link returned
    /// by a previous response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the value is not an absolute
    /// URL, or [`HttpError::Network`] on transport failure.
    pub async fn get_absolute(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let parsed = Url::parse(url).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;
        self.send(HttpMethod::Get, parsed, None, None, None, None)
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .body_type(DataType::Json)
            .build()?;
        self.request(request).await
    }

    /// Sends a POST request with a form-encoded body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post_form(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .body_type(DataType::Form)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .body_type(DataType::Json)
            .build()?;
        self.request(request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Patch, path)
            .body(body)
            .body_type(DataType::Json)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE request to the given endpoint path.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.request(HttpRequest::builder(HttpMethod::Delete, path).build()?)
            .await
    }

    /// Sends a HEAD request to the given endpoint path.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn head(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.request(HttpRequest::builder(HttpMethod::Head, path).build()?)
            .await
    }

    /// Sends an OPTIONS request to the given endpoint path.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn options(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.request(HttpRequest::builder(HttpMethod::Options, path).build()?)
            .await
    }

    /// Builds and dispatches the underlying reqwest call.
    async fn send(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<serde_json::Value>,
        body_type: Option<DataType>,
        query: Option<HashMap<String, String>>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
            HttpMethod::Head => self.client.head(url),
            HttpMethod::Options => self.client.request(reqwest::Method::OPTIONS, url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(extra) = &extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        if let Some(query) = &query {
            let pairs: Vec<(&String, &String)> = query.iter().collect();
            req_builder = req_builder.query(&pairs);
        }

        match (body, body_type) {
            (Some(body), Some(DataType::Json)) => req_builder = req_builder.json(&body),
            (Some(body), Some(DataType::Form)) => {
                req_builder = req_builder.form(&form_pairs(&body));
            }
            _ => {}
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();

        Ok(HttpResponse::new(code, text))
    }
}

/// Flattens a JSON object into form fields, stringifying scalars and
/// skipping nulls.
fn form_pairs(body: &serde_json::Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let serde_json::Value::Object(map) = body {
        for (key, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => pairs.push((key.clone(), s.clone())),
                other => pairs.push((key.clone(), other.to_string())),
            }
        }
    }
    pairs
}

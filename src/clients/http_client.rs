//! HTTP client for REST API communication.
//!
//! This module provides [`HttpClient`], a reqwest-backed implementation of
//! the [`ResourceClient`] contract.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::ResourceClient;
use crate::config::ClientConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a REST API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and Accept
/// - JSON body encoding and decoding
/// - Mapping non-2xx responses to [`HttpResponseError`]
///
/// It never retries and never caches; timeouts are whatever the
/// configuration sets.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use rest_resource::{BaseUrl, ClientConfig, HttpClient};
/// use rest_resource::clients::ResourceClient;
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let bill = client.get("/bills/1").await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The configuration this client was built from.
    config: ClientConfig,
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
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}REST Resource Library v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (name, value) in config.default_headers() {
            default_headers.insert(name.clone(), value.clone());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config: config.clone(),
            default_headers,
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is not valid JSON (`MalformedBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.config.base_url().join(&request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!("Sending {} {}", request.http_method, url);
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let mut response = HttpResponse::new(code, res_headers, Value::Null);
        if !response.is_ok() {
            let message = if body_text.is_empty() {
                "{}".to_string()
            } else {
                body_text
            };
            return Err(HttpError::Response(HttpResponseError {
                code,
                message,
                error_reference: response.request_id().map(str::to_string),
            }));
        }

        response.body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).map_err(|e| HttpError::MalformedBody {
                path: request.path.clone(),
                reason: e.to_string(),
            })?
        };

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    async fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Map<String, Value>>,
    ) -> Result<Map<String, Value>, HttpError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body {
            builder = builder.body(Value::Object(body));
        }
        let request = builder.build()?;
        self.request(request).await?.into_object(path)
    }
}

impl ResourceClient for HttpClient {
    async fn get(&self, path: &str) -> Result<Map<String, Value>, HttpError> {
        self.send_json(HttpMethod::Get, path, None).await
    }

    async fn post(
        &self,
        path: &str,
        body: Map<String, Value>,
    ) -> Result<Map<String, Value>, HttpError> {
        self.send_json(HttpMethod::Post, path, Some(body)).await
    }

    async fn put(
        &self,
        path: &str,
        body: Map<String, Value>,
    ) -> Result<Map<String, Value>, HttpError> {
        self.send_json(HttpMethod::Put, path, Some(body)).await
    }
}

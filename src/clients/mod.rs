//! HTTP client layer.
//!
//! Resources never talk to the network directly. Every `find`, `save` and
//! reference read goes through a [`ResourceClient`], the three-call contract
//! defined here. Any implementation works, which is how tests substitute an
//! in-memory client.
//!
//! # Overview
//!
//! - [`ResourceClient`]: The contract resources consume (`get`, `post`, `put`)
//! - [`HttpClient`]: A reqwest-backed implementation of the contract
//! - [`HttpRequest`]: A request to be sent by [`HttpClient`]
//! - [`HttpResponse`]: A parsed response
//! - [`HttpMethod`]: The methods resources use (GET, POST, PUT)
//! - [`HttpError`]: The error type of the contract
//!
//! # Failure Semantics
//!
//! A client reports network failures, non-2xx statuses and malformed bodies
//! as [`HttpError`]. Resource operations hand these back to their caller
//! unchanged, inside [`ResourceError::Http`](crate::rest::ResourceError::Http).
//! There is no retry layer.

mod errors;
mod http_client;
mod http_request;
mod http_response;

use serde_json::{Map, Value};

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

/// The client contract consumed by resources.
///
/// Paths are absolute endpoint paths produced by endpoint resolution
/// (e.g., `/bills/123`). Bodies and responses are flat JSON objects.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::{HttpError, ResourceClient};
/// use serde_json::{Map, Value};
///
/// /// A client that echoes every body back.
/// struct EchoClient;
///
/// impl ResourceClient for EchoClient {
///     async fn get(&self, _path: &str) -> Result<Map<String, Value>, HttpError> {
///         Ok(Map::new())
///     }
///
///     async fn post(&self, _path: &str, body: Map<String, Value>) -> Result<Map<String, Value>, HttpError> {
///         Ok(body)
///     }
///
///     async fn put(&self, _path: &str, body: Map<String, Value>) -> Result<Map<String, Value>, HttpError> {
///         Ok(body)
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    /// Fetches the JSON object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport, status or body failure.
    async fn get(&self, path: &str) -> Result<Map<String, Value>, HttpError>;

    /// Creates a resource at `path` and returns the server's representation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport, status or body failure.
    async fn post(&self, path: &str, body: Map<String, Value>)
        -> Result<Map<String, Value>, HttpError>;

    /// Updates the resource at `path` and returns the server's representation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport, status or body failure.
    async fn put(&self, path: &str, body: Map<String, Value>)
        -> Result<Map<String, Value>, HttpError>;
}

//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type returned by
//! [`HttpClient::request`](crate::clients::HttpClient::request).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::errors::HttpError;
use crate::rest::json_type_name;

/// An HTTP response from a REST API.
///
/// Header names are lowercased; a header may carry multiple values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the response and returns its body as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::MalformedBody`] if the body is not an object.
    pub fn into_object(self, path: &str) -> Result<Map<String, Value>, HttpError> {
        match self.body {
            Value::Object(map) => Ok(map),
            other => {
                tracing::warn!("Response body from {} is not a JSON object", path);
                Err(HttpError::MalformedBody {
                    path: path.to_string(),
                    reason: format!("expected a JSON object, got {}", json_type_name(&other)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(201, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(422, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123"));
    }

    #[test]
    fn test_into_object_accepts_objects() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"id": 1}));
        let map = response.into_object("/bills/1").unwrap();
        assert_eq!(map.get("id"), Some(&json!(1)));
    }

    #[test]
    fn test_into_object_rejects_arrays() {
        let response = HttpResponse::new(200, HashMap::new(), json!([1, 2]));
        let result = response.into_object("/bills");
        assert!(matches!(
            result,
            Err(HttpError::MalformedBody { path, reason })
                if path == "/bills" && reason.contains("an array")
        ));
    }
}

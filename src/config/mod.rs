//! Configuration types for the HTTP client.
//!
//! This module provides the configuration consumed by
//! [`HttpClient`](crate::clients::HttpClient), the bundled implementation of
//! the [`ResourceClient`](crate::clients::ResourceClient) contract.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated base URL newtype
//!
//! Authentication is not handled here. Credentials that travel as headers
//! can be attached with [`ClientConfigBuilder::default_header`].
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{BaseUrl, ClientConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .default_header("Authorization", "Bearer token")
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for [`HttpClient`](crate::clients::HttpClient).
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL every endpoint path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is required. All other fields are optional.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `default_headers`: empty
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    ///
    /// Later calls with the same name replace the earlier value.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// and [`ConfigError::InvalidHeader`] if a default header name is empty
    /// or contains whitespace.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        if let Some(name) = self
            .default_headers
            .keys()
            .find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::InvalidHeader { name: name.clone() });
        }

        Ok(ClientConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            default_headers: self.default_headers,
            timeout: self.timeout,
        })
    }
}

//! Error types raised before any request is made.
//!
//! This module contains the errors produced while configuring an HTTP client
//! ([`ConfigError`]) and while declaring a resource schema
//! ([`DeclarationError`]).
//!
//! # Error Handling
//!
//! Both error types are fail-fast: they are returned from the `build()` call
//! of the corresponding builder, so an invalid client or schema never exists.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{DeclarationError, ResourceSchema};
//!
//! let user = ResourceSchema::builder("user").build().unwrap();
//! let result = ResourceSchema::builder("order")
//!     .reference_writer("user", &user)
//!     .build();
//! assert!(matches!(result, Err(DeclarationError::MissingIdSuffix { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring an HTTP client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A default header has an empty name.
    #[error("Invalid default header '{name}': header names cannot be empty or contain whitespace.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Errors that can occur while declaring a resource schema.
///
/// Declaration errors are raised by
/// [`ResourceSchemaBuilder::build`](crate::rest::ResourceSchemaBuilder::build),
/// never by instance operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// The resource kind tag is empty.
    #[error("Resource kind cannot be empty.")]
    EmptyKind,

    /// A reference attribute name does not end in `_id`.
    #[error("Reference attribute '{name}' on {kind} must end in '_id' and name a reference (e.g., 'user_id').")]
    MissingIdSuffix {
        /// The resource kind being declared.
        kind: String,
        /// The offending attribute name.
        name: String,
    },

    /// `id` or `uri` was declared as something other than a plain attribute.
    #[error("Attribute '{name}' on {kind} is reserved and is always a plain attribute.")]
    ReservedName {
        /// The resource kind being declared.
        kind: String,
        /// The reserved attribute name.
        name: String,
    },

    /// The same name was declared twice with different kinds.
    #[error("Attribute '{name}' on {kind} is declared as both {first} and {second}.")]
    ConflictingAttribute {
        /// The resource kind being declared.
        kind: String,
        /// The conflicting accessor name.
        name: String,
        /// The kind of the earlier declaration.
        first: &'static str,
        /// The kind of the later declaration.
        second: &'static str,
    },

    /// A permission flag was declared more than once.
    #[error("Permission '{permission}' on {kind} is declared more than once.")]
    DuplicatePermission {
        /// The resource kind being declared.
        kind: String,
        /// The permission name (`creatable` or `updatable`).
        permission: &'static str,
    },
}

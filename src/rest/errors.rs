//! Error types for resource operations.
//!
//! [`ResourceError`] covers every failure an instance can hit after its
//! schema has been declared: bad assignments, endpoint resolution, the
//! permission gate on `save`, and client failures passed through as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::rest::{Resource, ResourceError};
//!
//! match bill.save().await {
//!     Ok(saved) => println!("Saved bill {:?}", saved.id()),
//!     Err(ResourceError::PermissionDenied { resource, operation }) => {
//!         println!("{resource} does not allow {operation}");
//!     }
//!     Err(ResourceError::Http(e)) => println!("Client error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
///
/// Client failures are wrapped in [`ResourceError::Http`], which is
/// transparent: its message and source are those of the client error, and
/// the original [`HttpError`] is recoverable by matching.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::ResourceError;
///
/// let error = ResourceError::UnresolvedEndpoint {
///     resource: "bill".to_string(),
///     template: "/bills/:id".to_string(),
///     placeholder: "id".to_string(),
/// };
/// assert!(error.to_string().contains(":id"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A value could not be assigned to an attribute.
    ///
    /// Raised when a date string does not parse, or a value of the wrong
    /// shape is given to a date or reference attribute.
    #[error("Invalid value for {resource}.{attribute}: {reason}")]
    InvalidAttribute {
        /// The resource kind.
        resource: String,
        /// The attribute being assigned.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A reference writer was given a resource of the wrong kind.
    #[error("Cannot assign a {actual} to {resource}.{attribute}: expected a {expected}")]
    TypeMismatch {
        /// The resource kind being assigned to.
        resource: String,
        /// The reference accessor name (without `_id`).
        attribute: String,
        /// The kind the reference was declared with.
        expected: String,
        /// The kind of the value that was given.
        actual: String,
    },

    /// An endpoint placeholder had no value to substitute.
    #[error("Cannot resolve placeholder ':{placeholder}' in {resource} endpoint '{template}'")]
    UnresolvedEndpoint {
        /// The resource kind.
        resource: String,
        /// The endpoint template being resolved.
        template: String,
        /// The placeholder without a value.
        placeholder: String,
    },

    /// The resource kind declares no endpoint for an operation that needs one.
    #[error("{resource} declares no endpoint for {operation}")]
    MissingEndpoint {
        /// The resource kind.
        resource: String,
        /// The operation being attempted (e.g., "find").
        operation: &'static str,
    },

    /// `save` was called in a state the resource kind does not permit.
    #[error("{resource} is not permitted to {operation}")]
    PermissionDenied {
        /// The resource kind.
        resource: String,
        /// The operation that was refused ("create" or "update").
        operation: &'static str,
    },

    /// The schema declares no accessor with this name.
    #[error("{resource} has no accessor '{accessor}'")]
    NoAccessor {
        /// The resource kind.
        resource: String,
        /// The accessor that was requested (e.g., `created_at`, `user=`).
        accessor: String,
    },

    /// The client reported a failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the request ID if the client reported one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

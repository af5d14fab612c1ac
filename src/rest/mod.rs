//! REST resource infrastructure.
//!
//! This module maps remote REST entities onto local objects:
//!
//! - **[`ResourceSchema`]**: The per-kind attribute registry, endpoint
//!   template and permission flags
//! - **[`Resource`]**: An instance with typed accessors, `find` and `save`
//! - **[`PersistenceState`]**: Transient or persisted, derived from `id`
//! - **Endpoint resolution**: `:placeholder` templates filled positionally or
//!   by field name
//! - **[`FieldValue`]**: Stored values, with dates kept as calendar values
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! # Example: Declaring and Using a Resource
//!
//! ```rust,ignore
//! use rest_resource::{BaseUrl, ClientConfig, HttpClient};
//! use rest_resource::rest::{Resource, ResourceSchema};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let user = ResourceSchema::builder("user")
//!     .endpoint("/users/:id")
//!     .attributes(["name"])
//!     .build()?;
//!
//! let bill = ResourceSchema::builder("bill")
//!     .endpoint("/users/:user_id/bills/:id")
//!     .attributes(["amount"])
//!     .date_accessor(["created_at"])
//!     .reference_accessor("user_id", &user)
//!     .updatable()
//!     .build()?;
//!
//! // GET /users/7/bills/123
//! let mut existing = Resource::find(&bill, &client, [7, 123]).await?;
//!
//! // GET /users/7, every time it is called
//! let owner = existing.reference("user").await?;
//!
//! // PUT /users/7/bills/123
//! existing.set("amount", 25)?;
//! existing.save().await?;
//! ```

mod errors;
mod path;
mod resource;
mod schema;
mod value;

pub use errors::ResourceError;
pub use path::{
    placeholders, render_path_value, resolve_named, resolve_positional, ResourceOperation,
};
pub use resource::{Identifiable, PersistenceState, Resource};
pub use schema::{
    Access, Attribute, AttributeKind, Permissions, Reference, ResourceSchema,
    ResourceSchemaBuilder, BUILTIN_ATTRIBUTES, REFERENCE_SUFFIX,
};
pub use value::{format_date, parse_date, FieldValue, DATE_FORMAT};
pub(crate) use value::json_type_name;

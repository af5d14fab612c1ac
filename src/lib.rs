//! # REST Resource
//!
//! A base abstraction for mapping remote REST resources onto local objects,
//! with declarative attribute typing, persistence-state tracking and CRUD
//! dispatch through a pluggable HTTP client.
//!
//! ## Overview
//!
//! This crate provides:
//! - Per-kind schemas via [`ResourceSchema`]: plain, date and reference
//!   attributes, an endpoint template, and `creatable`/`updatable` flags
//! - Resource instances via [`Resource`], with `find`, `save` and lazy
//!   reference reads
//! - Persistence state derived from the `id` field, never tracked separately
//! - Symmetric conversion between instances and flat JSON mappings
//! - The [`ResourceClient`] contract and a reqwest-backed [`HttpClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_resource::ResourceSchema;
//!
//! let user = ResourceSchema::builder("user")
//!     .endpoint("/users/:id")
//!     .attributes(["name", "email"])
//!     .build()
//!     .unwrap();
//!
//! let bill = ResourceSchema::builder("bill")
//!     .endpoint("/bills/:id")
//!     .attributes(["amount"])
//!     .date_accessor(["created_at"])
//!     .reference_accessor("user_id", &user)
//!     .creatable()
//!     .build()
//!     .unwrap();
//!
//! assert!(bill.is_creatable());
//! assert!(!bill.is_updatable());
//! ```
//!
//! ## Reading and Writing Resources
//!
//! ```rust,ignore
//! use rest_resource::{BaseUrl, ClientConfig, HttpClient, Resource};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com")?)
//!     .default_header("Authorization", "Bearer token")
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! // GET /bills/123
//! let bill = Resource::find(&bill_schema, &client, [123]).await?;
//! println!("{}", bill.to_json());
//!
//! // POST /bills
//! let mut draft = Resource::new(&bill_schema, &client);
//! draft.set("amount", 10)?;
//! draft.set("created_at", "2011-12-12T12:00:00Z")?;
//! draft.set_reference("user", &bill.reference("user").await?.unwrap())?;
//! draft.save().await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Schemas are explicit values, built once and shared
//! - **Fail-fast validation**: Declarations are checked when a schema is built
//! - **Thread-safe**: Schemas, configuration and the HTTP client are `Send + Sync`
//! - **Async-first**: Client calls are the only suspension points
//! - **Errors pass through**: Client failures reach the caller unchanged

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::{ConfigError, DeclarationError};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, ResourceClient,
};

// Re-export resource types
pub use rest::{
    FieldValue, Identifiable, PersistenceState, Resource, ResourceError, ResourceSchema,
    ResourceSchemaBuilder,
};

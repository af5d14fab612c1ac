//! Resource instances.
//!
//! A [`Resource`] is one local mirror of a remote entity. It pairs a shared
//! [`ResourceSchema`] with a borrowed client and its own field map. Every
//! accessor consults the schema; assignments are coerced by attribute kind.
//!
//! # Persistence State
//!
//! An instance is [`Persisted`](PersistenceState::Persisted) exactly when its
//! `id` field holds a value. There is no separate flag: the state is read from
//! the field map on every call, so it cannot drift from the data.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::rest::{Resource, ResourceSchema};
//!
//! let bill = ResourceSchema::builder("bill")
//!     .endpoint("/bills/:id")
//!     .attributes(["amount"])
//!     .date_accessor(["created_at"])
//!     .creatable()
//!     .build()?;
//!
//! // Read path
//! let existing = Resource::find(&bill, &client, [123]).await?;
//! println!("Created at {:?}", existing.date("created_at")?);
//!
//! // Write path
//! let mut draft = Resource::new(&bill, &client);
//! draft.set("amount", 10)?;
//! draft.save().await?;  // POST /bills, then adopts the server's id
//! assert!(draft.is_persisted());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::ResourceClient;
use crate::rest::path::{render_path_value, resolve_named, resolve_positional, ResourceOperation};
use crate::rest::schema::{Attribute, AttributeKind, Reference, ResourceSchema};
use crate::rest::value::{json_type_name, parse_date, FieldValue, DATE_FORMAT};
use crate::rest::ResourceError;

/// Whether an instance corresponds to an existing remote entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceState {
    /// No `id`: `save` creates.
    Transient,
    /// Has an `id`: `save` updates.
    Persisted,
}

/// Anything that can be assigned through a reference writer.
///
/// The kind tag is compared with the kind the reference was declared for.
pub trait Identifiable {
    /// Returns the resource kind tag.
    fn kind(&self) -> &str;

    /// Returns the id as a wire scalar, or `None` if there is none.
    fn id(&self) -> Option<Value>;
}

/// An instance of a resource kind.
///
/// The client is borrowed, not owned. Each instance owns its field map
/// exclusively; instances never share mutable state.
pub struct Resource<'c, C> {
    schema: Arc<ResourceSchema>,
    client: &'c C,
    fields: BTreeMap<String, FieldValue>,
}

impl<'c, C> Resource<'c, C> {
    /// Creates an empty, transient instance.
    #[must_use]
    pub fn new(schema: &Arc<ResourceSchema>, client: &'c C) -> Self {
        Self {
            schema: Arc::clone(schema),
            client,
            fields: BTreeMap::new(),
        }
    }

    /// Materializes an instance from a wire mapping.
    ///
    /// Every recognized key is assigned through its kind's coercion, so date
    /// strings are parsed. Access modes do not apply here: a write-only date
    /// is still populated. Unrecognized keys are ignored. The instance is
    /// persisted iff the mapping holds a non-null `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] if a date or reference
    /// value cannot be coerced.
    pub fn from_hash<I, K, V>(
        schema: &Arc<ResourceSchema>,
        client: &'c C,
        pairs: I,
    ) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut resource = Self::new(schema, client);
        let mut fields = BTreeMap::new();
        resource.assign_all(&mut fields, pairs)?;
        resource.fields = fields;
        Ok(resource)
    }

    /// Returns the schema of this instance's kind.
    #[must_use]
    pub const fn schema(&self) -> &Arc<ResourceSchema> {
        &self.schema
    }

    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.schema.kind()
    }

    /// Returns the client this instance issues requests through.
    #[must_use]
    pub const fn client(&self) -> &'c C {
        self.client
    }

    /// Returns the `id` field.
    #[must_use]
    pub fn id(&self) -> Option<&FieldValue> {
        self.fields.get("id")
    }

    /// Returns the `uri` field.
    #[must_use]
    pub fn uri(&self) -> Option<&FieldValue> {
        self.fields.get("uri")
    }

    /// Returns the persistence state, derived from the `id` field.
    #[must_use]
    pub fn state(&self) -> PersistenceState {
        if self.fields.contains_key("id") {
            PersistenceState::Persisted
        } else {
            PersistenceState::Transient
        }
    }

    /// Returns `true` if the `id` field holds a value.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.state() == PersistenceState::Persisted
    }

    /// Returns the raw stored value of a field.
    ///
    /// This is direct field access: it ignores declared access modes, so the
    /// value behind a write-only date can still be inspected.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Assigns a value through the attribute's writer.
    ///
    /// Plain values are stored as given. Date strings are parsed, calendar
    /// values stored as-is. Reference ids must be scalars. `null` clears the
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoAccessor`] if no writer was declared for
    /// `name`, or [`ResourceError::InvalidAttribute`] if the value cannot be
    /// coerced. On error the field is unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), ResourceError> {
        let attribute = self
            .schema
            .attribute(name)
            .filter(|attribute| attribute.is_writable())
            .ok_or_else(|| self.no_accessor(format!("{name}=")))?;
        let coerced = coerce(self.schema.kind(), attribute, value.into())?;
        store(&mut self.fields, attribute.name(), coerced);
        Ok(())
    }

    /// Reads a date attribute.
    ///
    /// The stored calendar value is returned unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoAccessor`] unless `name` is a date
    /// attribute with a declared reader.
    pub fn date(&self, name: &str) -> Result<Option<&DateTime<Utc>>, ResourceError> {
        self.schema
            .attribute(name)
            .filter(|a| a.kind() == AttributeKind::Date && a.is_readable())
            .ok_or_else(|| self.no_accessor(name.to_string()))?;
        Ok(self.fields.get(name).and_then(FieldValue::as_datetime))
    }

    /// Reads the `<base>_id` scalar of a reference.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoAccessor`] unless a reference reader was
    /// declared for `base`.
    pub fn reference_id(&self, base: &str) -> Result<Option<&FieldValue>, ResourceError> {
        let reference = self.readable_reference(base, format!("{base}_id"))?;
        Ok(self.fields.get(reference.id_attribute()))
    }

    /// Assigns a reference from another resource, storing its id.
    ///
    /// The value's kind tag must match the kind the reference was declared
    /// for. A value without an id clears the `<base>_id` field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoAccessor`] unless a reference writer was
    /// declared for `base`, [`ResourceError::TypeMismatch`] for a value of
    /// the wrong kind, or [`ResourceError::InvalidAttribute`] for an id that
    /// is not a scalar.
    pub fn set_reference<T>(&mut self, base: &str, value: &T) -> Result<(), ResourceError>
    where
        T: Identifiable + ?Sized,
    {
        let (reference, attribute) = self
            .schema
            .reference(base)
            .and_then(|r| self.schema.attribute(r.id_attribute()).map(|a| (r, a)))
            .filter(|(_, attribute)| attribute.is_writable())
            .ok_or_else(|| self.no_accessor(format!("{base}=")))?;

        let expected = reference.target().kind();
        if value.kind() != expected {
            return Err(ResourceError::TypeMismatch {
                resource: self.schema.kind().to_string(),
                attribute: base.to_string(),
                expected: expected.to_string(),
                actual: value.kind().to_string(),
            });
        }

        let id = FieldValue::Scalar(value.id().unwrap_or(Value::Null));
        let coerced = coerce(self.schema.kind(), attribute, id)?;
        store(&mut self.fields, attribute.name(), coerced);
        Ok(())
    }

    /// Returns every populated field with its raw stored value.
    ///
    /// Calendar values are not rendered here; see [`to_wire`](Self::to_wire).
    #[must_use]
    pub fn to_hash(&self) -> BTreeMap<String, FieldValue> {
        self.fields.clone()
    }

    /// Returns the wire mapping: the same keys as [`to_hash`](Self::to_hash)
    /// with calendar values rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json_value()))
            .collect()
    }

    /// Returns the wire mapping as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.to_wire()).to_string()
    }

    fn no_accessor(&self, accessor: String) -> ResourceError {
        ResourceError::NoAccessor {
            resource: self.schema.kind().to_string(),
            accessor,
        }
    }

    fn readable_reference(&self, base: &str, accessor: String) -> Result<&Reference, ResourceError> {
        self.schema
            .reference(base)
            .filter(|r| {
                self.schema
                    .attribute(r.id_attribute())
                    .is_some_and(Attribute::is_readable)
            })
            .ok_or_else(|| self.no_accessor(accessor))
    }

    fn assign_all<I, K, V>(
        &self,
        fields: &mut BTreeMap<String, FieldValue>,
        pairs: I,
    ) -> Result<(), ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (name, value) in pairs {
            let name = name.into();
            match self.schema.attribute(&name) {
                Some(attribute) => {
                    let coerced = coerce(self.schema.kind(), attribute, value.into())?;
                    store(fields, attribute.name(), coerced);
                }
                None => tracing::debug!(
                    "Ignoring unrecognized field '{}' for {}",
                    name,
                    self.schema.kind()
                ),
            }
        }
        Ok(())
    }

    fn save_path(&self, operation: ResourceOperation) -> Result<String, ResourceError> {
        let template = match (operation, self.schema.endpoint()) {
            (ResourceOperation::Create, _) => self.schema.create_path(),
            (_, Some(template)) => template.to_string(),
            (_, None) => self.schema.default_path(),
        };
        let path = resolve_named(self.schema.kind(), &template, |name| {
            self.fields.get(name).and_then(render_path_value)
        })?;
        tracing::debug!(
            "Resolved {} path for {}: {}",
            operation.as_str(),
            self.schema.kind(),
            path
        );
        Ok(path)
    }
}

impl<'c, C: ResourceClient> Resource<'c, C> {
    /// Fetches an instance by resolving the endpoint template positionally.
    ///
    /// The n-th argument fills the n-th placeholder; surplus arguments are
    /// ignored. The response mapping becomes the instance via
    /// [`from_hash`](Self::from_hash).
    ///
    /// # Errors
    ///
    /// - [`ResourceError::MissingEndpoint`] if the kind declares no endpoint
    /// - [`ResourceError::UnresolvedEndpoint`] if an argument is missing
    /// - [`ResourceError::Http`] with the client's error, unchanged
    /// - [`ResourceError::InvalidAttribute`] if the response cannot be coerced
    pub async fn find<I>(
        schema: &Arc<ResourceSchema>,
        client: &'c C,
        args: I,
    ) -> Result<Self, ResourceError>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let template = schema
            .endpoint()
            .ok_or_else(|| ResourceError::MissingEndpoint {
                resource: schema.kind().to_string(),
                operation: ResourceOperation::Find.as_str(),
            })?;
        let args: Vec<String> = args.into_iter().map(|arg| arg.to_string()).collect();
        let path = resolve_positional(schema.kind(), template, &args)?;

        tracing::debug!(
            "{} {} ({})",
            ResourceOperation::Find.default_http_method(),
            path,
            schema.kind()
        );
        let response = client.get(&path).await?;

        Self::from_hash(schema, client, response)
    }

    /// Creates or updates the remote entity, then merges the response.
    ///
    /// A transient instance is POSTed (requires `creatable`) to
    /// [`ResourceSchema::create_path`]. A persisted one is PUT (requires
    /// `updatable`) to the endpoint template, or to the schema's default path
    /// when no template is declared. Placeholders are resolved against this
    /// instance's fields. The body is [`to_wire`](Self::to_wire).
    ///
    /// Merging the response is what moves a created instance to
    /// [`PersistenceState::Persisted`]. A `null` id in the response is
    /// ignored, so a merge never moves an instance back to transient. The
    /// merge is all-or-nothing: if any response value cannot be coerced, no
    /// field changes.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::PermissionDenied`] if the kind does not allow the
    ///   operation; no request is sent
    /// - [`ResourceError::UnresolvedEndpoint`] if a placeholder names an
    ///   empty field
    /// - [`ResourceError::Http`] with the client's error, unchanged; the
    ///   instance keeps its pre-call fields
    /// - [`ResourceError::InvalidAttribute`] if the response cannot be coerced
    pub async fn save(&mut self) -> Result<&mut Self, ResourceError> {
        let operation = match self.state() {
            PersistenceState::Transient => ResourceOperation::Create,
            PersistenceState::Persisted => ResourceOperation::Update,
        };
        if !self.schema.permissions().allows(operation) {
            return Err(ResourceError::PermissionDenied {
                resource: self.schema.kind().to_string(),
                operation: operation.as_str(),
            });
        }

        let path = self.save_path(operation)?;
        let body = self.to_wire();

        tracing::debug!(
            "{} {} ({})",
            operation.default_http_method(),
            path,
            self.schema.kind()
        );
        let response = match operation {
            ResourceOperation::Update => self.client.put(&path, body).await?,
            ResourceOperation::Create | ResourceOperation::Find => {
                self.client.post(&path, body).await?
            }
        };

        let mut response = response;
        if response.get("id").is_some_and(Value::is_null) {
            tracing::debug!(
                "Ignoring null id in {} response for {}",
                operation.as_str(),
                self.schema.kind()
            );
            response.remove("id");
        }

        let mut merged = self.fields.clone();
        self.assign_all(&mut merged, response)?;
        self.fields = merged;
        Ok(self)
    }

    /// Fetches the referenced resource through the target kind's endpoint.
    ///
    /// Every call issues a fresh request; nothing is cached. Returns `None`
    /// without a request when `<base>_id` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoAccessor`] unless a reference reader was
    /// declared for `base`, or any error of [`find`](Self::find).
    pub async fn reference(&self, base: &str) -> Result<Option<Resource<'c, C>>, ResourceError> {
        let reference = self.readable_reference(base, base.to_string())?;
        let Some(id) = self
            .fields
            .get(reference.id_attribute())
            .and_then(render_path_value)
        else {
            return Ok(None);
        };

        Resource::find(reference.target(), self.client, [id])
            .await
            .map(Some)
    }
}

impl<C> Identifiable for Resource<'_, C> {
    fn kind(&self) -> &str {
        self.schema.kind()
    }

    fn id(&self) -> Option<Value> {
        self.fields.get("id").map(FieldValue::to_json_value)
    }
}

impl<C> Clone for Resource<'_, C> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            client: self.client,
            fields: self.fields.clone(),
        }
    }
}

impl<C> fmt::Debug for Resource<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.schema.kind())
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<C> Serialize for Resource<'_, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.fields)
    }
}

fn store(fields: &mut BTreeMap<String, FieldValue>, name: &str, value: Option<FieldValue>) {
    match value {
        Some(value) => {
            fields.insert(name.to_string(), value);
        }
        None => {
            fields.remove(name);
        }
    }
}

/// Coerces a value for an attribute. `None` means the field is absent.
fn coerce(
    resource: &str,
    attribute: &Attribute,
    value: FieldValue,
) -> Result<Option<FieldValue>, ResourceError> {
    if value.is_null() {
        return Ok(None);
    }

    let invalid = |reason: String| ResourceError::InvalidAttribute {
        resource: resource.to_string(),
        attribute: attribute.name().to_string(),
        reason,
    };

    match (attribute.kind(), value) {
        (AttributeKind::Plain, value) => Ok(Some(value)),
        (AttributeKind::Date, FieldValue::DateTime(date)) => Ok(Some(FieldValue::DateTime(date))),
        (AttributeKind::Date, FieldValue::Scalar(Value::String(text))) => parse_date(&text)
            .map(|date| Some(FieldValue::DateTime(date)))
            .map_err(|e| invalid(format!("'{text}' does not match {DATE_FORMAT}: {e}"))),
        (AttributeKind::Date, FieldValue::Scalar(other)) => Err(invalid(format!(
            "expected a date string, got {}",
            json_type_name(&other)
        ))),
        (AttributeKind::ReferenceId, FieldValue::Scalar(Value::Array(_) | Value::Object(_))) => {
            Err(invalid("references are stored as id scalars, not nested values".to_string()))
        }
        (AttributeKind::ReferenceId, FieldValue::DateTime(_)) => {
            Err(invalid("expected an id scalar, got a date".to_string()))
        }
        (AttributeKind::ReferenceId, scalar) => Ok(Some(scalar)),
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PersistenceState>();
    assert_send_sync::<Resource<'static, crate::clients::HttpClient>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpError;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records each call and answers with a fixed mapping.
    #[derive(Default)]
    struct StubClient {
        calls: RefCell<Vec<(&'static str, String, Option<Map<String, Value>>)>>,
        response: Map<String, Value>,
    }

    impl StubClient {
        fn answering(response: Value) -> Self {
            Self {
                calls: RefCell::default(),
                response: response.as_object().cloned().unwrap_or_default(),
            }
        }
    }

    impl ResourceClient for StubClient {
        async fn get(&self, path: &str) -> Result<Map<String, Value>, HttpError> {
            self.calls.borrow_mut().push(("get", path.to_string(), None));
            Ok(self.response.clone())
        }

        async fn post(
            &self,
            path: &str,
            body: Map<String, Value>,
        ) -> Result<Map<String, Value>, HttpError> {
            self.calls
                .borrow_mut()
                .push(("post", path.to_string(), Some(body)));
            Ok(self.response.clone())
        }

        async fn put(
            &self,
            path: &str,
            body: Map<String, Value>,
        ) -> Result<Map<String, Value>, HttpError> {
            self.calls
                .borrow_mut()
                .push(("put", path.to_string(), Some(body)));
            Ok(self.response.clone())
        }
    }

    fn user_schema() -> Arc<ResourceSchema> {
        ResourceSchema::builder("user")
            .endpoint("/users/:id")
            .attributes(["name"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_instance_is_transient() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("resource").build().unwrap();
        let resource = Resource::new(&schema, &client);

        assert_eq!(resource.state(), PersistenceState::Transient);
        assert!(!resource.is_persisted());
        assert!(resource.to_hash().is_empty());
    }

    #[test]
    fn test_persisted_tracks_id_field() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("resource").build().unwrap();
        let mut resource = Resource::from_hash(&schema, &client, [("id", 1)]).unwrap();
        assert!(resource.is_persisted());

        resource.set("id", Value::Null).unwrap();
        assert!(!resource.is_persisted());
    }

    #[test]
    fn test_from_hash_null_id_is_transient() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("resource").build().unwrap();
        let resource = Resource::from_hash(&schema, &client, [("id", Value::Null)]).unwrap();
        assert!(!resource.is_persisted());
    }

    #[test]
    fn test_set_requires_writer() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .reference_reader("user_id", &user_schema())
            .build()
            .unwrap();
        let mut resource = Resource::new(&schema, &client);

        assert!(matches!(
            resource.set("user_id", 1),
            Err(ResourceError::NoAccessor { accessor, .. }) if accessor == "user_id="
        ));
        assert!(matches!(
            resource.set("unknown", 1),
            Err(ResourceError::NoAccessor { .. })
        ));
    }

    #[test]
    fn test_date_reader_requires_declaration() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .date_writer(["created_at"])
            .build()
            .unwrap();
        let mut resource = Resource::new(&schema, &client);
        resource.set("created_at", "2011-12-12T12:00:00Z").unwrap();

        assert!(matches!(
            resource.date("created_at"),
            Err(ResourceError::NoAccessor { .. })
        ));
        assert!(resource.get("created_at").unwrap().as_datetime().is_some());
    }

    #[test]
    fn test_invalid_date_leaves_field_unchanged() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .date_accessor(["created_at"])
            .build()
            .unwrap();
        let mut resource = Resource::new(&schema, &client);
        resource.set("created_at", "2011-12-12T12:00:00Z").unwrap();

        let result = resource.set("created_at", "yesterday");
        assert!(matches!(
            result,
            Err(ResourceError::InvalidAttribute { attribute, .. }) if attribute == "created_at"
        ));
        assert_eq!(
            resource.date("created_at").unwrap().map(|d| d.to_rfc3339()),
            Some("2011-12-12T12:00:00+00:00".to_string())
        );

        assert!(matches!(
            resource.set("created_at", 42),
            Err(ResourceError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_reference_id_rejects_nested_objects() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .reference_accessor("user_id", &user_schema())
            .build()
            .unwrap();
        let mut resource = Resource::new(&schema, &client);

        assert!(matches!(
            resource.set("user_id", json!({"id": 1})),
            Err(ResourceError::InvalidAttribute { .. })
        ));
        resource.set("user_id", "u-1").unwrap();
        assert_eq!(
            resource.reference_id("user").unwrap(),
            Some(&FieldValue::from("u-1"))
        );
    }

    #[test]
    fn test_set_reference_without_id_clears_field() {
        let client = StubClient::default();
        let user = user_schema();
        let schema = ResourceSchema::builder("test")
            .reference_accessor("user_id", &user)
            .build()
            .unwrap();
        let mut resource = Resource::from_hash(&schema, &client, [("user_id", 5)]).unwrap();

        resource
            .set_reference("user", &Resource::new(&user, &client))
            .unwrap();
        assert!(resource.get("user_id").is_none());
    }

    #[test]
    fn test_to_wire_renders_dates() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .attributes(["amount"])
            .date_accessor(["when"])
            .build()
            .unwrap();
        let resource = Resource::from_hash(
            &schema,
            &client,
            [
                ("amount", json!(10)),
                ("when", json!("2011-12-12T12:00:00Z")),
            ],
        )
        .unwrap();

        assert_eq!(
            Value::Object(resource.to_wire()),
            json!({"amount": 10, "when": "2011-12-12T12:00:00Z"})
        );
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            Value::Object(resource.to_wire())
        );
    }

    #[test]
    fn test_find_without_endpoint_fails() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test").build().unwrap();

        let result = tokio_test::block_on(Resource::find(&schema, &client, [1]));
        assert!(matches!(
            result,
            Err(ResourceError::MissingEndpoint { operation: "find", .. })
        ));
        assert!(client.calls.borrow().is_empty());
    }

    #[test]
    fn test_save_uses_default_path_without_endpoint() {
        let client = StubClient::answering(json!({"id": 9}));
        let schema = ResourceSchema::builder("widget")
            .attributes(["x"])
            .creatable()
            .build()
            .unwrap();
        let mut resource = Resource::from_hash(&schema, &client, [("x", 1)]).unwrap();

        tokio_test::block_on(resource.save()).unwrap();

        let calls = client.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "post");
        assert_eq!(calls[0].1, "/widget");
        assert_eq!(resource.id(), Some(&FieldValue::from(9)));
    }

    #[test]
    fn test_create_posts_to_collection_of_id_endpoint() {
        let client = StubClient::answering(json!({"id": 9}));
        let schema = ResourceSchema::builder("bill")
            .endpoint("/bills/:id")
            .attributes(["amount"])
            .creatable()
            .build()
            .unwrap();
        let mut draft = Resource::new(&schema, &client);
        draft.set("amount", 10).unwrap();

        tokio_test::block_on(draft.save()).unwrap();

        let calls = client.calls.borrow();
        assert_eq!(calls[0].0, "post");
        assert_eq!(calls[0].1, "/bills");
        assert!(draft.is_persisted());
    }

    #[test]
    fn test_null_id_in_update_response_keeps_instance_persisted() {
        let client = StubClient::answering(json!({"id": null, "x": 2}));
        let schema = ResourceSchema::builder("test")
            .attributes(["x"])
            .updatable()
            .build()
            .unwrap();
        let mut resource =
            Resource::from_hash(&schema, &client, [("id", json!(1)), ("x", json!(1))]).unwrap();

        tokio_test::block_on(resource.save()).unwrap();

        assert_eq!(resource.state(), PersistenceState::Persisted);
        assert_eq!(resource.id(), Some(&FieldValue::from(1)));
        assert_eq!(resource.get("x"), Some(&FieldValue::from(2)));
    }

    #[test]
    fn test_save_merge_is_all_or_nothing() {
        let client = StubClient::answering(json!({"id": 9, "when": "not a date"}));
        let schema = ResourceSchema::builder("test")
            .date_accessor(["when"])
            .creatable()
            .build()
            .unwrap();
        let mut resource = Resource::new(&schema, &client);

        let result = tokio_test::block_on(resource.save());
        assert!(matches!(result, Err(ResourceError::InvalidAttribute { .. })));
        assert!(!resource.is_persisted());
    }

    #[test]
    fn test_reference_without_id_returns_none() {
        let client = StubClient::default();
        let schema = ResourceSchema::builder("test")
            .reference_reader("user_id", &user_schema())
            .build()
            .unwrap();
        let resource = Resource::new(&schema, &client);

        let user = tokio_test::block_on(resource.reference("user")).unwrap();
        assert!(user.is_none());
        assert!(client.calls.borrow().is_empty());
    }
}

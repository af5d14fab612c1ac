//! Resource schemas: the per-kind attribute registry and permission flags.
//!
//! A [`ResourceSchema`] is the static descriptor of one resource kind. It
//! records which attributes exist and how they behave, the endpoint template,
//! and whether instances may be created or updated. All instance behavior is
//! driven by consulting the schema; nothing is generated per instance.
//!
//! # Declaring a Schema
//!
//! Schemas are declared with [`ResourceSchema::builder`]. Every declaration
//! is validated in [`ResourceSchemaBuilder::build`], so a malformed schema
//! is rejected before any instance exists.
//!
//! ```rust
//! use rest_resource::rest::{AttributeKind, ResourceSchema};
//!
//! let user = ResourceSchema::builder("user")
//!     .endpoint("/users/:id")
//!     .attributes(["name"])
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
//! assert_eq!(bill.attribute("created_at").unwrap().kind(), AttributeKind::Date);
//! assert_eq!(bill.reference("user").unwrap().target().kind(), "user");
//! assert!(bill.is_creatable());
//! assert!(!bill.is_updatable());
//! ```
//!
//! # Attribute Kinds
//!
//! | Declaration | Kind | Accessors |
//! |---|---|---|
//! | `attributes` | Plain | get, set |
//! | `date_writer` | Date | set (string or calendar value) |
//! | `date_accessor` | Date | get, set |
//! | `reference_writer` | `ReferenceId` | set `<base>_id`, set `<base>` |
//! | `reference_reader` | `ReferenceId` | get `<base>_id`, fetch `<base>` |
//! | `reference_accessor` | `ReferenceId` | all four |
//!
//! `id` and `uri` are plain attributes on every schema.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DeclarationError;
use crate::rest::ResourceOperation;

/// Names every schema recognizes as plain attributes.
pub const BUILTIN_ATTRIBUTES: [&str; 2] = ["id", "uri"];

/// The suffix reference attribute names must carry.
pub const REFERENCE_SUFFIX: &str = "_id";

/// The trailing endpoint segment dropped to form the create path.
const ID_SEGMENT: &str = "/:id";

/// How an attribute's values are coerced and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Any JSON value, stored as given.
    Plain,
    /// A calendar value, parsed from the wire date format.
    Date,
    /// The id scalar of another resource.
    ReferenceId,
}

impl AttributeKind {
    /// Returns the kind name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Date => "date",
            Self::ReferenceId => "reference",
        }
    }
}

/// Which accessors were declared for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    /// A reader was declared.
    pub read: bool,
    /// A writer was declared.
    pub write: bool,
}

impl Access {
    /// Reader only.
    pub const READ: Self = Self {
        read: true,
        write: false,
    };
    /// Writer only.
    pub const WRITE: Self = Self {
        read: false,
        write: true,
    };
    /// Reader and writer.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };

    const fn union(self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            write: self.write || other.write,
        }
    }
}

/// A declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    access: Access,
}

impl Attribute {
    /// Returns the attribute (wire field) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute kind.
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Returns the declared accessors.
    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Returns `true` if a reader was declared.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.access.read
    }

    /// Returns `true` if a writer was declared.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.write
    }
}

/// A declared reference from one resource kind to another.
///
/// The reference is stored as the `<base>_id` attribute; `<base>` itself is
/// a computed view resolved through the target schema.
#[derive(Clone)]
pub struct Reference {
    base: String,
    id_attribute: String,
    target: Arc<ResourceSchema>,
}

impl Reference {
    /// Returns the accessor name without the `_id` suffix (e.g., `user`).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the id attribute name (e.g., `user_id`).
    #[must_use]
    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    /// Returns the schema of the referenced kind.
    #[must_use]
    pub const fn target(&self) -> &Arc<ResourceSchema> {
        &self.target
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("base", &self.base)
            .field("id_attribute", &self.id_attribute)
            .field("target", &self.target.kind())
            .finish()
    }
}

/// Type-level permission flags.
///
/// Both flags default to `false` and belong to exactly one schema; a derived
/// schema starts from `false` regardless of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    creatable: bool,
    updatable: bool,
}

impl Permissions {
    /// Returns `true` if unsaved instances may be created.
    #[must_use]
    pub const fn is_creatable(&self) -> bool {
        self.creatable
    }

    /// Returns `true` if persisted instances may be updated.
    #[must_use]
    pub const fn is_updatable(&self) -> bool {
        self.updatable
    }

    /// Returns `true` if the operation is allowed. `Find` always is.
    #[must_use]
    pub const fn allows(&self, operation: ResourceOperation) -> bool {
        match operation {
            ResourceOperation::Find => true,
            ResourceOperation::Create => self.creatable,
            ResourceOperation::Update => self.updatable,
        }
    }
}

/// The static descriptor of a resource kind.
///
/// Schemas are immutable once built and are shared as `Arc<ResourceSchema>`.
#[derive(Debug)]
pub struct ResourceSchema {
    kind: String,
    endpoint: Option<String>,
    default_path: Option<String>,
    attributes: BTreeMap<String, Attribute>,
    references: BTreeMap<String, Reference>,
    permissions: Permissions,
}

impl ResourceSchema {
    /// Creates a new builder for a resource kind.
    ///
    /// The kind is the type tag instances carry; reference writers compare
    /// it on assignment.
    #[must_use]
    pub fn builder(kind: impl Into<String>) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder::new(kind)
    }

    /// Starts a schema for a new kind that inherits this one's attributes,
    /// references, endpoint and default path.
    ///
    /// Permission flags are not inherited: the derived kind starts with
    /// neither `creatable` nor `updatable`.
    #[must_use]
    pub fn derive(&self, kind: impl Into<String>) -> ResourceSchemaBuilder {
        let mut builder = ResourceSchemaBuilder::new(kind);
        builder.endpoint = self.endpoint.clone();
        builder.default_path = self.default_path.clone();
        for attribute in self.attributes.values() {
            if attribute.kind != AttributeKind::ReferenceId {
                builder.declarations.push(Declaration::Attribute {
                    name: attribute.name.clone(),
                    kind: attribute.kind,
                    access: attribute.access,
                });
            }
        }
        for reference in self.references.values() {
            let access = self
                .attributes
                .get(&reference.id_attribute)
                .map_or(Access::READ_WRITE, |a| a.access);
            builder.declarations.push(Declaration::Reference {
                name: reference.id_attribute.clone(),
                access,
                target: Arc::clone(&reference.target),
            });
        }
        builder
    }

    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the endpoint template, if one was declared.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the path `save` uses for persisted instances when no endpoint
    /// template is declared.
    ///
    /// This is the value given to
    /// [`ResourceSchemaBuilder::default_path`], or `/{kind}` otherwise.
    #[must_use]
    pub fn default_path(&self) -> String {
        self.default_path
            .clone()
            .unwrap_or_else(|| format!("/{}", self.kind))
    }

    /// Returns the path template `save` POSTs transient instances to.
    ///
    /// In order of precedence:
    /// 1. the value given to [`ResourceSchemaBuilder::default_path`]
    /// 2. the endpoint template without a trailing `/:id` segment
    ///    (`/users/:user_id/bills/:id` becomes `/users/:user_id/bills`)
    /// 3. `/{kind}`
    ///
    /// Any placeholders left in the result are resolved from the instance's
    /// own fields.
    #[must_use]
    pub fn create_path(&self) -> String {
        if let Some(path) = &self.default_path {
            return path.clone();
        }
        match &self.endpoint {
            Some(template) => template
                .strip_suffix(ID_SEGMENT)
                .unwrap_or(template)
                .to_string(),
            None => format!("/{}", self.kind),
        }
    }

    /// Looks up an attribute by wire name, including `id` and `uri`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Returns every recognized attribute, ordered by name.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Looks up a reference by its base name (e.g., `user` for `user_id`).
    #[must_use]
    pub fn reference(&self, base: &str) -> Option<&Reference> {
        self.references.get(base)
    }

    /// Returns every declared reference, ordered by base name.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.references.values()
    }

    /// Returns the permission flags.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Returns `true` if unsaved instances may be created.
    #[must_use]
    pub const fn is_creatable(&self) -> bool {
        self.permissions.creatable
    }

    /// Returns `true` if persisted instances may be updated.
    #[must_use]
    pub const fn is_updatable(&self) -> bool {
        self.permissions.updatable
    }
}

// Verify ResourceSchema is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceSchema>();
};

#[derive(Debug, Clone)]
enum Declaration {
    Attribute {
        name: String,
        kind: AttributeKind,
        access: Access,
    },
    Reference {
        name: String,
        access: Access,
        target: Arc<ResourceSchema>,
    },
}

/// Builder for [`ResourceSchema`].
///
/// Declarations may be given in any order and repeated; the same name
/// declared twice with the same kind merges its accessors. All validation
/// happens in [`build`](Self::build).
#[derive(Debug)]
pub struct ResourceSchemaBuilder {
    kind: String,
    endpoint: Option<String>,
    default_path: Option<String>,
    declarations: Vec<Declaration>,
    creatable_declarations: u8,
    updatable_declarations: u8,
}

impl ResourceSchemaBuilder {
    fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            endpoint: None,
            default_path: None,
            declarations: Vec::new(),
            creatable_declarations: 0,
            updatable_declarations: 0,
        }
    }

    /// Sets the endpoint template (e.g., `/bills/:id`).
    #[must_use]
    pub fn endpoint(mut self, template: impl Into<String>) -> Self {
        self.endpoint = Some(template.into());
        self
    }

    /// Sets the path `save` POSTs new instances to.
    ///
    /// Without an endpoint template, persisted instances are PUT here too.
    /// The path may contain placeholders, resolved from the instance's fields.
    #[must_use]
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Declares plain attributes.
    #[must_use]
    pub fn attributes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(names, AttributeKind::Plain, Access::READ_WRITE)
    }

    /// Declares date attributes with a writer only.
    #[must_use]
    pub fn date_writer<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(names, AttributeKind::Date, Access::WRITE)
    }

    /// Declares date attributes with a reader and a writer.
    #[must_use]
    pub fn date_accessor<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(names, AttributeKind::Date, Access::READ_WRITE)
    }

    /// Declares the writers of a reference to `target`.
    ///
    /// `name` must end in `_id`.
    #[must_use]
    pub fn reference_writer(self, name: impl Into<String>, target: &Arc<ResourceSchema>) -> Self {
        self.declare_reference(name, target, Access::WRITE)
    }

    /// Declares the readers of a reference to `target`.
    ///
    /// `name` must end in `_id`.
    #[must_use]
    pub fn reference_reader(self, name: impl Into<String>, target: &Arc<ResourceSchema>) -> Self {
        self.declare_reference(name, target, Access::READ)
    }

    /// Declares the readers and writers of a reference to `target`.
    ///
    /// `name` must end in `_id`.
    #[must_use]
    pub fn reference_accessor(
        self,
        name: impl Into<String>,
        target: &Arc<ResourceSchema>,
    ) -> Self {
        self.declare_reference(name, target, Access::READ_WRITE)
    }

    /// Allows unsaved instances to be created with `save`.
    #[must_use]
    pub const fn creatable(mut self) -> Self {
        self.creatable_declarations = self.creatable_declarations.saturating_add(1);
        self
    }

    /// Allows persisted instances to be updated with `save`.
    #[must_use]
    pub const fn updatable(mut self) -> Self {
        self.updatable_declarations = self.updatable_declarations.saturating_add(1);
        self
    }

    fn declare<I, S>(mut self, names: I, kind: AttributeKind, access: Access) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declarations
            .extend(names.into_iter().map(|name| Declaration::Attribute {
                name: name.into(),
                kind,
                access,
            }));
        self
    }

    fn declare_reference(
        mut self,
        name: impl Into<String>,
        target: &Arc<ResourceSchema>,
        access: Access,
    ) -> Self {
        self.declarations.push(Declaration::Reference {
            name: name.into(),
            access,
            target: Arc::clone(target),
        });
        self
    }

    /// Validates the declarations and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeclarationError`] found:
    /// - [`EmptyKind`](DeclarationError::EmptyKind) for an empty kind tag
    /// - [`DuplicatePermission`](DeclarationError::DuplicatePermission) if
    ///   `creatable` or `updatable` was declared twice
    /// - [`MissingIdSuffix`](DeclarationError::MissingIdSuffix) for a
    ///   reference name that does not end in `_id`
    /// - [`ReservedName`](DeclarationError::ReservedName) for `id`/`uri`
    ///   declared as anything but plain
    /// - [`ConflictingAttribute`](DeclarationError::ConflictingAttribute) for
    ///   a name declared with two kinds, or a reference whose accessor
    ///   shadows a declared attribute
    pub fn build(self) -> Result<Arc<ResourceSchema>, DeclarationError> {
        let kind = self.kind;
        if kind.trim().is_empty() {
            return Err(DeclarationError::EmptyKind);
        }

        for (permission, count) in [
            ("creatable", self.creatable_declarations),
            ("updatable", self.updatable_declarations),
        ] {
            if count > 1 {
                return Err(DeclarationError::DuplicatePermission { kind, permission });
            }
        }

        let mut attributes: BTreeMap<String, Attribute> = BUILTIN_ATTRIBUTES
            .iter()
            .map(|name| {
                let attribute = Attribute {
                    name: (*name).to_string(),
                    kind: AttributeKind::Plain,
                    access: Access::READ_WRITE,
                };
                ((*name).to_string(), attribute)
            })
            .collect();
        let mut references: BTreeMap<String, Reference> = BTreeMap::new();

        for declaration in self.declarations {
            match declaration {
                Declaration::Attribute {
                    name,
                    kind: attr_kind,
                    access,
                } => {
                    let reserved = BUILTIN_ATTRIBUTES.contains(&name.as_str());
                    if reserved && attr_kind != AttributeKind::Plain {
                        return Err(DeclarationError::ReservedName { kind, name });
                    }
                    merge_attribute(&kind, &mut attributes, name, attr_kind, access)?;
                }
                Declaration::Reference { name, access, target } => {
                    let base = name
                        .strip_suffix(REFERENCE_SUFFIX)
                        .filter(|base| !base.is_empty())
                        .map(str::to_string);
                    let Some(base) = base else {
                        return Err(DeclarationError::MissingIdSuffix { kind, name });
                    };
                    if let Some(existing) = references.get(&base) {
                        if existing.target.kind() != target.kind() {
                            return Err(DeclarationError::ConflictingAttribute {
                                kind,
                                name: base,
                                first: AttributeKind::ReferenceId.as_str(),
                                second: AttributeKind::ReferenceId.as_str(),
                            });
                        }
                    }
                    merge_attribute(
                        &kind,
                        &mut attributes,
                        name.clone(),
                        AttributeKind::ReferenceId,
                        access,
                    )?;
                    references.insert(
                        base.clone(),
                        Reference {
                            base,
                            id_attribute: name,
                            target,
                        },
                    );
                }
            }
        }

        if let Some((base, shadowed)) = references
            .keys()
            .find_map(|base| attributes.get(base).map(|a| (base, a)))
        {
            return Err(DeclarationError::ConflictingAttribute {
                name: base.clone(),
                first: shadowed.kind.as_str(),
                second: AttributeKind::ReferenceId.as_str(),
                kind,
            });
        }

        Ok(Arc::new(ResourceSchema {
            kind,
            endpoint: self.endpoint,
            default_path: self.default_path,
            attributes,
            references,
            permissions: Permissions {
                creatable: self.creatable_declarations > 0,
                updatable: self.updatable_declarations > 0,
            },
        }))
    }
}

fn merge_attribute(
    kind: &str,
    attributes: &mut BTreeMap<String, Attribute>,
    name: String,
    attr_kind: AttributeKind,
    access: Access,
) -> Result<(), DeclarationError> {
    if let Some(existing) = attributes.get_mut(&name) {
        if existing.kind != attr_kind {
            return Err(DeclarationError::ConflictingAttribute {
                kind: kind.to_string(),
                name,
                first: existing.kind.as_str(),
                second: attr_kind.as_str(),
            });
        }
        existing.access = existing.access.union(access);
        return Ok(());
    }
    attributes.insert(
        name.clone(),
        Attribute {
            name,
            kind: attr_kind,
            access,
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Arc<ResourceSchema> {
        ResourceSchema::builder("user")
            .endpoint("/users/:id")
            .build()
            .unwrap()
    }

    #[test]
    fn test_every_schema_recognizes_id_and_uri() {
        let schema = ResourceSchema::builder("resource").build().unwrap();
        assert_eq!(schema.attribute("id").unwrap().kind(), AttributeKind::Plain);
        assert_eq!(schema.attribute("uri").unwrap().kind(), AttributeKind::Plain);
        assert!(schema.attribute("name").is_none());
    }

    #[test]
    fn test_date_writer_declares_write_only_dates() {
        let schema = ResourceSchema::builder("test")
            .date_writer(["created_at", "modified_at"])
            .build()
            .unwrap();

        for name in ["created_at", "modified_at"] {
            let attribute = schema.attribute(name).unwrap();
            assert_eq!(attribute.kind(), AttributeKind::Date);
            assert!(attribute.is_writable());
            assert!(!attribute.is_readable());
        }
    }

    #[test]
    fn test_date_accessor_declares_readers_and_writers() {
        let schema = ResourceSchema::builder("test")
            .date_accessor(["created_at", "modified_at"])
            .build()
            .unwrap();

        for name in ["created_at", "modified_at"] {
            assert_eq!(
                schema.attribute(name).unwrap().access(),
                Access::READ_WRITE
            );
        }
    }

    #[test]
    fn test_repeated_declarations_merge_access() {
        let schema = ResourceSchema::builder("test")
            .date_writer(["created_at"])
            .date_accessor(["created_at"])
            .build()
            .unwrap();
        assert_eq!(
            schema.attribute("created_at").unwrap().access(),
            Access::READ_WRITE
        );
    }

    #[test]
    fn test_reference_writer_declares_id_and_base() {
        let merchant = ResourceSchema::builder("merchant").build().unwrap();
        let schema = ResourceSchema::builder("test")
            .reference_writer("merchant_id", &merchant)
            .reference_writer("user_id", &user())
            .build()
            .unwrap();

        let attribute = schema.attribute("user_id").unwrap();
        assert_eq!(attribute.kind(), AttributeKind::ReferenceId);
        assert_eq!(attribute.access(), Access::WRITE);

        let reference = schema.reference("merchant").unwrap();
        assert_eq!(reference.id_attribute(), "merchant_id");
        assert_eq!(reference.target().kind(), "merchant");
        assert_eq!(schema.references().count(), 2);
    }

    #[test]
    fn test_reference_reader_and_accessor_access() {
        let schema = ResourceSchema::builder("test")
            .reference_reader("user_id", &user())
            .build()
            .unwrap();
        assert_eq!(schema.attribute("user_id").unwrap().access(), Access::READ);

        let schema = ResourceSchema::builder("test")
            .reference_accessor("user_id", &user())
            .build()
            .unwrap();
        assert_eq!(
            schema.attribute("user_id").unwrap().access(),
            Access::READ_WRITE
        );
    }

    #[test]
    fn test_reference_names_must_end_in_id() {
        let user = user();
        for builder in [
            ResourceSchema::builder("test").reference_writer("user", &user),
            ResourceSchema::builder("test").reference_reader("user", &user),
            ResourceSchema::builder("test").reference_accessor("user", &user),
        ] {
            assert!(matches!(
                builder.build(),
                Err(DeclarationError::MissingIdSuffix { name, .. }) if name == "user"
            ));
        }

        let result = ResourceSchema::builder("test")
            .reference_writer("_id", &self::user())
            .build();
        assert!(matches!(
            result,
            Err(DeclarationError::MissingIdSuffix { .. })
        ));
    }

    #[test]
    fn test_reserved_names_must_stay_plain() {
        let result = ResourceSchema::builder("test").date_writer(["id"]).build();
        assert!(matches!(
            result,
            Err(DeclarationError::ReservedName { name, .. }) if name == "id"
        ));

        let schema = ResourceSchema::builder("test")
            .attributes(["id", "uri", "x"])
            .build()
            .unwrap();
        assert_eq!(schema.attributes().count(), 3);
    }

    #[test]
    fn test_conflicting_kinds_are_rejected() {
        let result = ResourceSchema::builder("test")
            .attributes(["when"])
            .date_accessor(["when"])
            .build();
        assert!(matches!(
            result,
            Err(DeclarationError::ConflictingAttribute { name, first: "plain", second: "date", .. })
                if name == "when"
        ));
    }

    #[test]
    fn test_reference_base_cannot_shadow_attribute() {
        let result = ResourceSchema::builder("test")
            .attributes(["user"])
            .reference_accessor("user_id", &user())
            .build();
        assert!(matches!(
            result,
            Err(DeclarationError::ConflictingAttribute { name, .. }) if name == "user"
        ));
    }

    #[test]
    fn test_permissions_default_to_false() {
        let schema = ResourceSchema::builder("resource").build().unwrap();
        assert!(!schema.is_creatable());
        assert!(!schema.is_updatable());
        assert!(schema.permissions().allows(ResourceOperation::Find));
        assert!(!schema.permissions().allows(ResourceOperation::Create));
    }

    #[test]
    fn test_permissions_are_independent() {
        let creatable = ResourceSchema::builder("c").creatable().build().unwrap();
        let updatable = ResourceSchema::builder("u").updatable().build().unwrap();

        assert!(creatable.is_creatable());
        assert!(!creatable.is_updatable());
        assert!(!updatable.is_creatable());
        assert!(updatable.is_updatable());
    }

    #[test]
    fn test_permissions_are_declared_at_most_once() {
        let result = ResourceSchema::builder("test")
            .creatable()
            .creatable()
            .build();
        assert!(matches!(
            result,
            Err(DeclarationError::DuplicatePermission { permission: "creatable", .. })
        ));
    }

    #[test]
    fn test_empty_kind_is_rejected() {
        assert!(matches!(
            ResourceSchema::builder("  ").build(),
            Err(DeclarationError::EmptyKind)
        ));
    }

    #[test]
    fn test_derive_inherits_attributes_but_not_permissions() {
        let base = ResourceSchema::builder("resource")
            .endpoint("/resources/:id")
            .attributes(["x"])
            .date_accessor(["created_at"])
            .reference_reader("user_id", &user())
            .creatable()
            .updatable()
            .build()
            .unwrap();

        let derived = base.derive("special").attributes(["y"]).build().unwrap();

        assert_eq!(derived.kind(), "special");
        assert_eq!(derived.endpoint(), Some("/resources/:id"));
        assert!(derived.attribute("x").is_some());
        assert!(derived.attribute("y").is_some());
        assert_eq!(
            derived.attribute("created_at").unwrap().kind(),
            AttributeKind::Date
        );
        assert_eq!(derived.attribute("user_id").unwrap().access(), Access::READ);
        assert!(!derived.is_creatable());
        assert!(!derived.is_updatable());

        assert!(base.is_creatable());
        assert!(base.attribute("y").is_none());
    }

    #[test]
    fn test_default_path_falls_back_to_kind() {
        let schema = ResourceSchema::builder("bill").build().unwrap();
        assert_eq!(schema.default_path(), "/bill");

        let schema = ResourceSchema::builder("bill")
            .default_path("/v2/bills")
            .build()
            .unwrap();
        assert_eq!(schema.default_path(), "/v2/bills");
    }

    #[test]
    fn test_create_path_drops_trailing_id_segment() {
        let schema = ResourceSchema::builder("bill")
            .endpoint("/users/:user_id/bills/:id")
            .build()
            .unwrap();
        assert_eq!(schema.create_path(), "/users/:user_id/bills");

        let schema = ResourceSchema::builder("bill")
            .endpoint("/bills")
            .build()
            .unwrap();
        assert_eq!(schema.create_path(), "/bills");

        let schema = ResourceSchema::builder("bill").build().unwrap();
        assert_eq!(schema.create_path(), "/bill");
    }

    #[test]
    fn test_explicit_default_path_overrides_create_path() {
        let schema = ResourceSchema::builder("bill")
            .endpoint("/bills/:id")
            .default_path("/v2/bills/new")
            .build()
            .unwrap();
        assert_eq!(schema.create_path(), "/v2/bills/new");
        assert_eq!(schema.endpoint(), Some("/bills/:id"));
    }
}

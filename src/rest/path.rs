//! Endpoint template resolution.
//!
//! An endpoint template is a path with named placeholders, such as
//! `/users/:user_id/bills/:id`. A placeholder is a `:` followed by a name
//! that starts with a letter or `_` and continues with letters, digits or
//! `_`. Any other `:` is literal.
//!
//! Templates are resolved in two ways:
//!
//! - **Positionally** for `find`: the n-th argument fills the n-th placeholder.
//! - **By name** for `save`: each placeholder is looked up among the
//!   instance's own fields.
//!
//! Substituted values are percent-encoded. A placeholder without a value is
//! an error; it is never left in the path.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::rest::{placeholders, resolve_positional};
//!
//! let template = "/users/:user_id/bills/:id";
//! assert_eq!(placeholders(template), vec!["user_id", "id"]);
//!
//! let path = resolve_positional("bill", template, &["7".to_string(), "123".to_string()]).unwrap();
//! assert_eq!(path, "/users/7/bills/123");
//! ```

use crate::clients::HttpMethod;
use crate::rest::value::{format_date, FieldValue};
use crate::rest::ResourceError;
use serde_json::Value;

/// Operations that issue a request for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource (GET).
    Find,
    /// Create a new resource (POST).
    Create,
    /// Update an existing resource (PUT).
    Update,
}

impl ResourceOperation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_template(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != ':' {
            continue;
        }
        let name_start = i + 1;
        if !template[name_start..].starts_with(is_name_start) {
            continue;
        }
        let name_end = template[name_start..]
            .find(|c: char| !is_name_char(c))
            .map_or(template.len(), |n| name_start + n);

        if literal_start < i {
            segments.push(Segment::Literal(&template[literal_start..i]));
        }
        segments.push(Segment::Placeholder(&template[name_start..name_end]));
        literal_start = name_end;

        while chars.peek().is_some_and(|&(j, _)| j < name_end) {
            chars.next();
        }
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Returns the placeholder names of a template, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    parse_template(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

fn resolve_with<F>(resource: &str, template: &str, mut lookup: F) -> Result<String, ResourceError>
where
    F: FnMut(usize, &str) -> Option<String>,
{
    let mut path = String::with_capacity(template.len());
    let mut position = 0;

    for segment in parse_template(template) {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Placeholder(name) => {
                let value =
                    lookup(position, name).ok_or_else(|| ResourceError::UnresolvedEndpoint {
                        resource: resource.to_string(),
                        template: template.to_string(),
                        placeholder: name.to_string(),
                    })?;
                path.push_str(&urlencoding::encode(&value));
                position += 1;
            }
        }
    }

    Ok(path)
}

/// Resolves a template by filling placeholders with `args` in order.
///
/// Surplus arguments are ignored.
///
/// # Errors
///
/// Returns [`ResourceError::UnresolvedEndpoint`] naming the first
/// placeholder left without an argument.
pub fn resolve_positional(
    resource: &str,
    template: &str,
    args: &[String],
) -> Result<String, ResourceError> {
    let path = resolve_with(resource, template, |position, _| args.get(position).cloned())?;

    let used = placeholders(template).len();
    if args.len() > used {
        tracing::debug!(
            "Ignoring {} surplus argument(s) for {} endpoint '{}'",
            args.len() - used,
            resource,
            template
        );
    }

    Ok(path)
}

/// Resolves a template by looking up each placeholder by name.
///
/// # Errors
///
/// Returns [`ResourceError::UnresolvedEndpoint`] naming the first
/// placeholder for which `lookup` has no value.
pub fn resolve_named<F>(resource: &str, template: &str, lookup: F) -> Result<String, ResourceError>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_with(resource, template, |_, name| lookup(name))
}

/// Renders a stored value for substitution into a path.
///
/// Strings are used verbatim, calendar values in the wire date format, and
/// other scalars as JSON text. `null` has no rendering.
#[must_use]
pub fn render_path_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Scalar(Value::Null) => None,
        FieldValue::Scalar(Value::String(text)) => Some(text.clone()),
        FieldValue::Scalar(other) => Some(other.to_string()),
        FieldValue::DateTime(date) => Some(format_date(date)),
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};

//! Avro naming rules.
//!
//! Names (record, enum, field, symbol) must start with `[A-Za-z_]` and contain
//! only `[A-Za-z0-9_]`. A namespace is a dot-separated sequence of names.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::AvroSchema;

/// Check a single Avro name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Check a dot-separated namespace. The empty string is not valid here;
/// callers decide whether a namespace is required.
pub fn is_valid_namespace(namespace: &str) -> bool {
    namespace.split('.').all(is_valid_name)
}

/// Join a namespace and a name into a full name.
pub fn fullname(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
        _ => name.to_string(),
    }
}

/// Split `a.b.Name` into (`Some("a.b")`, `"Name"`).
pub(crate) fn split_fullname(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once('.') {
        Some((ns, short)) => (Some(ns), short),
        None => (None, name),
    }
}

/// Record and enum names: a valid name that is not a primitive tag.
pub(crate) fn validate_type_name(name: &str, kind: &str) -> SchemaResult<()> {
    if is_valid_name(name) && AvroSchema::from_primitive_tag(name).is_none() {
        Ok(())
    } else {
        Err(SchemaError::InvalidTypeName {
            kind: kind.to_string(),
            name: name.to_string(),
        })
    }
}

pub(crate) fn validate_namespace(namespace: &str, kind: &str) -> SchemaResult<()> {
    if is_valid_namespace(namespace) {
        Ok(())
    } else {
        Err(SchemaError::InvalidTypeName {
            kind: format!("{} namespace", kind),
            name: namespace.to_string(),
        })
    }
}

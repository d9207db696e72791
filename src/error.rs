//! Error types for schema construction and output

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while composing, building or parsing a schema.
///
/// Every variant is produced synchronously by the `build` call that detected
/// the problem and names the offending type, field or symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Types that cannot be combined (nested optionality, non-nullable unions)
    #[error("Invalid type composition: {0}")]
    InvalidTypeComposition(String),

    /// Logical tag unknown or not registered for the given base type
    #[error("Logical type '{tag}' is not compatible with base type '{base}'")]
    IncompatibleLogicalTag { tag: String, base: String },

    /// Enum declared without symbols
    #[error("Enum '{enum_name}' must declare at least one symbol")]
    EmptySymbolList { enum_name: String },

    /// Enum symbol repeated
    #[error("Enum '{enum_name}' declares symbol '{symbol}' more than once")]
    DuplicateSymbol { enum_name: String, symbol: String },

    /// Enum symbol is not an identifier
    #[error("Enum '{enum_name}' has invalid symbol '{symbol}' (expected [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidSymbolName { enum_name: String, symbol: String },

    /// Field name empty or not an identifier
    #[error("Invalid field name '{0}' (expected [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidFieldName(String),

    /// Default value does not fit the declared field type
    #[error("Default for field '{field}' does not match type '{expected}': {reason}")]
    DefaultTypeMismatch {
        field: String,
        expected: String,
        reason: String,
    },

    /// Two fields of one record share a name
    #[error("Record '{record}' declares field '{field}' more than once")]
    DuplicateFieldName { record: String, field: String },

    /// Record built without a namespace
    #[error("Record '{record}' requires a namespace")]
    MissingNamespace { record: String },

    /// Record refers to itself through its fields
    #[error("Record '{record}' refers to itself; recursive types are not supported")]
    CyclicTypeReference { record: String },

    /// Two different definitions share one full name
    #[error("Conflicting definitions for named type '{0}'")]
    ConflictingTypeDefinition(String),

    /// Record/enum name or namespace is not a valid Avro name
    #[error("Invalid {kind} name '{name}'")]
    InvalidTypeName { kind: String, name: String },

    /// Schema text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while writing a rendered schema.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating the parent directory failed
    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the schema file failed
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading an input schema failed
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

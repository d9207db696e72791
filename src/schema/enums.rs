//! Enum type construction.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::names::{self, is_valid_name};
use crate::schema::EnumSchema;

/// Builder for [`EnumSchema`].
///
/// Symbol order is preserved exactly: enum values are encoded by position.
///
/// # Example
/// ```
/// use avsc_forge::schema::EnumBuilder;
///
/// let event_name = EnumBuilder::new("EventName")
///     .with_namespace("tv.pluto.nile.avro")
///     .with_doc("Identifies the Name of the Event being fired.")
///     .with_symbols(["clipStart", "clipEnd"])
///     .build()
///     .unwrap();
/// assert_eq!(event_name.symbols(), ["clipStart", "clipEnd"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumBuilder {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    symbols: Vec<String>,
}

impl EnumBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the namespace. An empty namespace means none.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append symbols after any already present.
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Append one symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// Validate and produce the enum.
    pub fn build(self) -> SchemaResult<EnumSchema> {
        names::validate_type_name(&self.name, "enum")?;
        if let Some(ns) = &self.namespace {
            names::validate_namespace(ns, "enum")?;
        }

        if self.symbols.is_empty() {
            return Err(SchemaError::EmptySymbolList {
                enum_name: self.name,
            });
        }

        let mut seen = HashSet::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            if !is_valid_name(symbol) {
                return Err(SchemaError::InvalidSymbolName {
                    enum_name: self.name.clone(),
                    symbol: symbol.clone(),
                });
            }
            if !seen.insert(symbol.as_str()) {
                return Err(SchemaError::DuplicateSymbol {
                    enum_name: self.name.clone(),
                    symbol: symbol.clone(),
                });
            }
        }

        let schema = EnumSchema {
            name: self.name,
            namespace: self.namespace,
            doc: self.doc,
            symbols: self.symbols,
        };
        debug!(
            enum_name = %schema.fullname(),
            symbols = schema.symbols.len(),
            "built enum schema"
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_declared_order() {
        let e = EnumBuilder::new("EventName")
            .with_symbols(["clipStart", "clipEnd", "appLaunch", "adStart"])
            .build()
            .unwrap();
        assert_eq!(e.symbols(), ["clipStart", "clipEnd", "appLaunch", "adStart"]);
        assert_eq!(e.symbol_index("clipEnd"), Some(1));
        assert_eq!(e.symbol_index("missing"), None);
    }

    #[test]
    fn test_empty_symbols() {
        let err = EnumBuilder::new("Empty").build().unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptySymbolList {
                enum_name: "Empty".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_symbol() {
        let err = EnumBuilder::new("Dup")
            .with_symbols(["a", "a"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateSymbol {
                enum_name: "Dup".to_string(),
                symbol: "a".to_string()
            }
        );
    }

    #[test]
    fn test_symbols_are_case_sensitive() {
        let e = EnumBuilder::new("Case")
            .with_symbols(["ok", "OK", "Ok"])
            .build()
            .unwrap();
        assert_eq!(e.symbols().len(), 3);
    }

    #[test]
    fn test_invalid_symbol() {
        for bad in ["", "1up", "with-dash", "dot.ted"] {
            let err = EnumBuilder::new("Bad").symbol(bad).build().unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidSymbolName { ref symbol, .. } if symbol == bad),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_invalid_enum_name_and_namespace() {
        let err = EnumBuilder::new("Event-Name").symbol("a").build().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTypeName { .. }));

        let err = EnumBuilder::new("EventName")
            .with_namespace("tv..avro")
            .symbol("a")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTypeName { .. }));
    }

    #[test]
    fn test_primitive_tag_as_enum_name() {
        let err = EnumBuilder::new("int").symbol("A").build().unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidTypeName {
                kind: "enum".to_string(),
                name: "int".to_string()
            }
        );
    }

    #[test]
    fn test_empty_namespace_means_none() {
        let e = EnumBuilder::new("Color")
            .with_namespace("")
            .symbol("RED")
            .build()
            .unwrap();
        assert_eq!(e.namespace(), None);
        assert_eq!(e.fullname(), "Color");
    }
}

//! Record type construction.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::names;
use crate::schema::{AvroSchema, FieldSchema, RecordSchema};

/// Builder for [`RecordSchema`].
///
/// Fields serialize in the order they were added. Nested records must be
/// fully built before they are referenced, so a schema graph is always a DAG.
///
/// # Example
/// ```
/// use avsc_forge::schema::{catalog, FieldBuilder, RecordBuilder};
///
/// let record = RecordBuilder::new("ErrorRecord", "tv.pluto.nile.avro")
///     .field(FieldBuilder::new("type", catalog::STRING).build().unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(record.fullname(), "tv.pluto.nile.avro.ErrorRecord");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    name: String,
    namespace: String,
    doc: Option<String>,
    fields: Vec<FieldSchema>,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields in order.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Validate and produce the record.
    pub fn build(self) -> SchemaResult<RecordSchema> {
        names::validate_type_name(&self.name, "record")?;
        if self.namespace.is_empty() {
            return Err(SchemaError::MissingNamespace { record: self.name });
        }
        names::validate_namespace(&self.namespace, "record")?;

        let mut field_names = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !field_names.insert(field.name()) {
                return Err(SchemaError::DuplicateFieldName {
                    record: self.name.clone(),
                    field: field.name().to_string(),
                });
            }
        }

        let fullname = names::fullname(Some(&self.namespace), &self.name);
        let mut registry = NamedTypes::new(&fullname);
        for field in &self.fields {
            registry.visit(field.schema())?;
        }
        let nested_types = registry.seen.len();

        let record = RecordSchema {
            name: self.name,
            namespace: self.namespace,
            doc: self.doc,
            fields: self.fields,
        };
        debug!(
            record = %fullname,
            fields = record.fields.len(),
            nested_types,
            "built record schema"
        );
        Ok(record)
    }
}

/// Walks the named types reachable from a record's fields.
struct NamedTypes<'a> {
    own_name: &'a str,
    seen: HashMap<String, &'a AvroSchema>,
}

impl<'a> NamedTypes<'a> {
    fn new(own_name: &'a str) -> Self {
        Self {
            own_name,
            seen: HashMap::new(),
        }
    }

    fn visit(&mut self, schema: &'a AvroSchema) -> SchemaResult<()> {
        match schema {
            AvroSchema::Record(record) => {
                let fullname = record.fullname();
                if fullname == self.own_name {
                    return Err(SchemaError::CyclicTypeReference { record: fullname });
                }
                if self.register(fullname, schema)? {
                    for field in record.fields() {
                        self.visit(field.schema())?;
                    }
                }
                Ok(())
            }
            AvroSchema::Enum(e) => {
                let fullname = e.fullname();
                if fullname == self.own_name {
                    return Err(SchemaError::ConflictingTypeDefinition(fullname));
                }
                self.register(fullname, schema).map(|_| ())
            }
            AvroSchema::Union(u) => u.members().iter().try_for_each(|m| self.visit(m)),
            AvroSchema::Array(inner) | AvroSchema::Map(inner) => self.visit(inner),
            AvroSchema::Logical(lt) => self.visit(lt.base()),
            _ => Ok(()),
        }
    }

    /// Returns `true` the first time a name is seen. A repeat is fine when it
    /// is the same definition and a conflict otherwise.
    fn register(&mut self, fullname: String, schema: &'a AvroSchema) -> SchemaResult<bool> {
        if !self.seen.contains_key(&fullname) {
            if let Some(short) = self.bare_name_clash(&fullname) {
                return Err(SchemaError::ConflictingTypeDefinition(short));
            }
        }
        match self.seen.entry(fullname) {
            Entry::Occupied(existing) if *existing.get() == schema => Ok(false),
            Entry::Occupied(existing) => Err(SchemaError::ConflictingTypeDefinition(
                existing.key().clone(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(schema);
                Ok(true)
            }
        }
    }

    /// A bare reference to a namespace-less type is resolved against the
    /// enclosing namespace first, so its short name may not also name a
    /// namespaced type anywhere in the graph.
    fn bare_name_clash(&self, fullname: &str) -> Option<String> {
        let (namespace, short) = names::split_fullname(fullname);
        let mut known = std::iter::once(self.own_name).chain(self.seen.keys().map(String::as_str));
        let clash = match namespace {
            None => known.any(|other| other != fullname && names::split_fullname(other).1 == short),
            Some(_) => known.any(|other| other == short),
        };
        clash.then(|| short.to_string())
    }
}

//! Records - One JSON document, its primary key, and its save context.
//!
//! A [`Record`] is a plain value: the store hands out fresh records from
//! `get_item`/`get_collection` and persists them with `save`. Attributes are
//! addressed by dotted paths, so `"address.city"` reaches into nested objects.
//!
//! ## Example
//!
//! ```ignore
//! use flatfile_rust::{Record, Schema};
//!
//! let mut person = Record::new(Schema::new("id"));
//! person.set("id", "alice");
//! person.set("address.city", "Oslo");
//! assert!(person.is_new());
//! ```

mod path;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordError;
use crate::schema::Schema;

/// Attribute name to value mapping held by a record.
pub type Attributes = serde_json::Map<String, Value>;

/// Whether the next save inserts a new file or overwrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    #[default]
    Create,
    Update,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Create => "create",
            Context::Update => "update",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored (or to-be-stored) document.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Option<String>,
    context: Context,
    schema: Schema,
    attributes: Attributes,
}

impl Record {
    /// Create an empty, unsaved record.
    pub fn new(schema: Schema) -> Self {
        Self::from_attributes(schema, Attributes::new())
    }

    /// Create an unsaved record holding the given attributes.
    pub fn from_attributes(schema: Schema, attributes: Attributes) -> Self {
        Self {
            id: None,
            context: Context::Create,
            schema,
            attributes,
        }
    }

    /// Create an unsaved record from any value that serializes to a JSON object.
    pub fn from_serialize<T: Serialize>(schema: Schema, value: &T) -> Result<Self, RecordError> {
        match serde_json::to_value(value).map_err(|e| RecordError::Serde(e.to_string()))? {
            Value::Object(attributes) => Ok(Self::from_attributes(schema, attributes)),
            other => Err(RecordError::Serde(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub(crate) fn loaded(schema: Schema, id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: Some(id.into()),
            context: Context::Update,
            schema,
            attributes,
        }
    }

    /// Deserialize the attributes into a typed value.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, RecordError> {
        serde_json::from_value(Value::Object(self.attributes.clone()))
            .map_err(|e| RecordError::Serde(e.to_string()))
    }

    /// Identifier of the record as of its last load or save.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// True until the record has been loaded from or saved to a file.
    pub fn is_new(&self) -> bool {
        self.context == Context::Create
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the primary-key attribute.
    pub fn pk(&self) -> &str {
        self.schema.pk()
    }

    /// File extension, without the dot.
    pub fn ext(&self) -> &str {
        self.schema.ext()
    }

    /// Current value of the primary-key attribute.
    pub fn pk_value(&self) -> Option<&Value> {
        self.get(self.schema.pk())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Get an attribute by dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::get(&self.attributes, path)
    }

    /// Whether an attribute exists at the dotted path (even if null).
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Set an attribute by dotted path, creating parent objects as needed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        path::set(&mut self.attributes, path, value.into());
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set(path, value);
        self
    }

    /// Remove an attribute by dotted path, returning its value.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        path::remove(&mut self.attributes, path)
    }

    /// Merge top-level attributes into the record, overwriting existing keys.
    pub fn fill(&mut self, attributes: Attributes) {
        self.attributes.extend(attributes);
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.context = Context::Update;
    }
}

/// Dotted-path lookup on a bare attribute map.
pub(crate) fn lookup<'a>(attributes: &'a Attributes, path: &str) -> Option<&'a Value> {
    path::get(attributes, path)
}

/// Values that do not count as a usable key or a present required attribute.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Identifier form of a primary-key value. Only strings and numbers qualify.
pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

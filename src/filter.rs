//! Filters - Attribute-equality matching for collections.

use serde_json::Value;

use crate::record::{lookup, Record};

/// A set of `path == value` conditions. A record matches when every condition
/// holds; an empty set matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    conditions: Vec<(String, Value)>,
}

impl Filters {
    /// No conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition on a dotted attribute path.
    pub fn eq(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((path.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|(path, expected)| lookup(record.attributes(), path) == Some(expected))
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Filters::new(), |filters, (path, value)| filters.eq(path, value))
    }
}

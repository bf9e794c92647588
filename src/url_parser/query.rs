use std::fmt;

use linked_hash_map::LinkedHashMap;
use serde_json::Value;
use tracing::trace;

use super::encoding::{urldecode, urlencode};
use crate::error::{Error, Result};

/// A single query value; `None` is a bare key with no `=`
pub type QueryValue = Option<String>;

/// Ordered multi-map of query parameters
///
/// Keys keep the order in which they were first seen and every key holds its
/// values in insertion order. A segment such as `flag` (no `=`) is stored as
/// `None`, which is distinct from `flag=` (stored as `Some("")`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryString {
    items: LinkedHashMap<String, Vec<QueryValue>>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without its leading `?`
    ///
    /// Parsing never fails: malformed escapes are kept literally.
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::new();
        if raw.is_empty() {
            return query;
        }

        let raw = raw.strip_prefix('?').unwrap_or(raw);
        for segment in raw.split('&') {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (urldecode(key), Some(urldecode(value))),
                None => (urldecode(segment), None),
            };
            trace!("Parsed query pair: {} = {:?}", key, value);
            query.append(key, value);
        }
        query
    }

    /// Builds a query from a JSON object whose members are scalars or arrays
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(Error::RequiredType("object"))?;

        let mut query = Self::new();
        for (key, member) in object {
            let values = match member {
                Value::Array(list) => list.iter().map(value_to_query).collect(),
                other => vec![value_to_query(other)],
            };
            query.items.insert(key.clone(), values);
        }
        Ok(query)
    }

    /// Appends one value to `key`, creating the key at the end if needed
    pub fn append(&mut self, key: impl Into<String>, value: QueryValue) {
        let key = key.into();
        if let Some(values) = self.items.get_mut(&key) {
            values.push(value);
        } else {
            self.items.insert(key, vec![value]);
        }
    }

    /// Replaces every value of `key` with `value`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_all(key, vec![Some(value.into())]);
    }

    /// Replaces every value of `key` with `values`
    ///
    /// An existing key keeps its position; a new key goes last.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<QueryValue>) {
        let key = key.into();
        if let Some(existing) = self.items.get_mut(&key) {
            *existing = values;
        } else {
            self.items.insert(key, values);
        }
    }

    /// First value of `key`, or `""` when the key is missing, empty or bare
    pub fn get(&self, key: &str) -> &str {
        self.items
            .get(key)
            .and_then(|values| values.first())
            .and_then(|value| value.as_deref())
            .unwrap_or("")
    }

    pub fn values(&self, key: &str) -> Option<&[QueryValue]> {
        self.items.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn value_to_query(value: &Value) -> QueryValue {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, values) in self.items.iter() {
            let key = urlencode(key);
            for value in values {
                f.write_str(if first { "?" } else { "&" })?;
                first = false;
                // bare keys are written back as the text "null"
                let value = urlencode(value.as_deref().unwrap_or("null"));
                write!(f, "{}={}", key, value)?;
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.append(key, Some(value.into()));
        }
        query
    }
}

impl From<&str> for QueryString {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

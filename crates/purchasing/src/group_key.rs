//! Composite grouping key.
//!
//! A key is an ordered list of `name -> value` entries. Each grouping dimension
//! appends its own entries, so adding a dimension never changes how existing
//! entries are read.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use splitdate_core::ValueObject;

/// One `name -> value` entry of a [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKeyEntry {
    pub name: String,
    pub value: JsonValue,
}

impl GroupKeyEntry {
    pub fn new(name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Key selecting which receipt an order line is delivered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<GroupKeyEntry>);

impl GroupKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: GroupKeyEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[GroupKeyEntry] {
        &self.0
    }

    /// Entries named `name`, in key order.
    pub fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a JsonValue> {
        self.0.iter().filter(move |e| e.name == name).map(|e| &e.value)
    }

    /// First entry named `name`.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values(name).next()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<GroupKeyEntry> for GroupKey {
    fn extend<T: IntoIterator<Item = GroupKeyEntry>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<GroupKeyEntry> for GroupKey {
    fn from_iter<T: IntoIterator<Item = GroupKeyEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl core::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, entry) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            match &entry.value {
                JsonValue::String(s) => write!(f, "{}={}", entry.name, s)?,
                other => write!(f, "{}={}", entry.name, other)?,
            }
        }
        Ok(())
    }
}

impl ValueObject for GroupKey {}

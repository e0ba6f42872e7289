//! Extraction records
//!
//! `RawField` and `FieldTable` exist only while one document is being
//! extracted. `CanonicalRecord` is the artifact handed back to callers and is
//! always total over the schema it was resolved against.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashSet;

use super::schema::CanonicalSchema;

/// Sentinel for schema fields the page did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// A single label/value pair as found in the markup, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub label: String,
    pub value: String,
}

impl RawField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered normalized-label → value mapping for one fetched document.
///
/// Iteration order is insertion order, which is the collector's strategy
/// priority order; the resolver relies on it to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<(String, String)>,
}

impl FieldTable {
    /// Build from already-normalized pairs. The first occurrence of a label wins.
    pub fn from_normalized<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut seen = HashSet::new();
        let mut entries: Vec<(String, String)> = Vec::new();
        for (label, value) in pairs {
            if label.is_empty() || !seen.insert(label.clone()) {
                continue;
            }
            entries.push((label, value));
        }
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Resolved schema field → value mapping, one entry per schema field, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    entries: Vec<(String, String)>,
}

impl CanonicalRecord {
    /// Build a record over `schema`, asking `lookup` for each field in order.
    /// Missing or blank values become [`NOT_AVAILABLE`].
    pub fn resolve_with<F>(schema: &CanonicalSchema, mut lookup: F) -> Self
    where
        F: FnMut(&super::schema::SchemaField) -> Option<String>,
    {
        let entries = schema
            .fields()
            .iter()
            .map(|field| {
                let value = lookup(field)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                (field.name.clone(), value)
            })
            .collect();
        Self { entries }
    }

    /// A record where every field is [`NOT_AVAILABLE`]
    pub fn unavailable(schema: &CanonicalSchema) -> Self {
        Self::resolve_with(schema, |_| None)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// True when the field exists and holds a real value
    pub fn is_available(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| v != NOT_AVAILABLE)
    }

    pub fn available_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, value)| value != NOT_AVAILABLE)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One named time window read from a muhurta card (choghadiya slot, rahu-kaal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedSegment {
    pub name: String,
    pub start: String,
    pub end: String,
    /// Free text of the card's info line, if the card has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Free text of the card's message line (durations live here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TimedSegment {
    /// All three identifying parts are present
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.start.is_empty() && !self.end.is_empty()
    }

    /// "start - end", or whichever half is known
    pub fn span(&self) -> String {
        match (self.start.is_empty(), self.end.is_empty()) {
            (false, false) => format!("{} - {}", self.start, self.end),
            (false, true) => self.start.clone(),
            (true, false) => self.end.clone(),
            (true, true) => String::new(),
        }
    }
}

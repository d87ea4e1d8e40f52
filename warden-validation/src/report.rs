// Aggregated validation failures

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Failure messages per attribute.
///
/// Only failing attributes have an entry. Entries appear in rule declaration
/// order, which also decides [`first`](Self::first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: IndexMap<String, Vec<String>>,
}

impl ErrorReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing attributes
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages for one attribute
    pub fn get(&self, attribute: &str) -> Option<&[String]> {
        self.errors.get(attribute).map(Vec::as_slice)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.errors.contains_key(attribute)
    }

    /// First message of the first failing attribute
    pub fn first(&self) -> Option<&str> {
        self.errors
            .values()
            .next()
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Failing attribute names in report order
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(attribute, messages)| (attribute.as_str(), messages.as_slice()))
    }

    /// The underlying attribute to messages map
    pub fn as_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }

    pub(crate) fn insert(&mut self, attribute: impl Into<String>, messages: Vec<String>) {
        self.errors.insert(attribute.into(), messages);
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (attribute, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{}: {}", attribute, message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl From<ErrorReport> for IndexMap<String, Vec<String>> {
    fn from(report: ErrorReport) -> Self {
        report.errors
    }
}

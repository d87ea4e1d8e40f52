// Message table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Custom error messages keyed by `"<attribute>.<key>"`.
///
/// `key` is `required`, a validator type such as `integer`, or an option name
/// such as `maxLength`. The engine never looks inside the text; validators use
/// it verbatim instead of their built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    /// Create an empty message table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for an attribute and key
    pub fn with(
        mut self,
        attribute: &str,
        key: &str,
        message: impl Into<String>,
    ) -> Self {
        self.insert(attribute, key, message);
        self
    }

    /// Insert a message for an attribute and key
    pub fn insert(&mut self, attribute: &str, key: &str, message: impl Into<String>) {
        self.messages
            .insert(format!("{}.{}", attribute, key), message.into());
    }

    /// Look up a message
    pub fn get(&self, attribute: &str, key: &str) -> Option<&str> {
        self.messages
            .get(&format!("{}.{}", attribute, key))
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

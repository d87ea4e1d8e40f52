//! Scenario declarations and resolution
//!
//! A scenario names the attributes a single operation cares about, split into
//! required and optional ones. The same rule table can serve a `create` form
//! that requires everything and an `update` form where most fields are
//! optional.

use crate::{ConfigError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Scenario table, keyed by scenario name
pub type ScenarioTable = IndexMap<String, ScenarioDefinition>;

/// A scenario as declared in configuration.
///
/// `required` is mandatory at resolution time, `optional` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Vec<String>>,
}

impl ScenarioDefinition {
    /// Create a definition with the given required attributes
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: Some(required.into_iter().map(Into::into).collect()),
            optional: None,
        }
    }

    /// Set the optional attributes
    pub fn optional<I, S>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional = Some(optional.into_iter().map(Into::into).collect());
        self
    }
}

/// A resolved scenario: the attribute scope of one validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    name: String,
    required: IndexSet<String>,
    optional: IndexSet<String>,
}

impl Scenario {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> &IndexSet<String> {
        &self.required
    }

    pub fn optional(&self) -> &IndexSet<String> {
        &self.optional
    }

    /// Whether the attribute must be present in this scenario.
    ///
    /// An attribute listed as both required and optional is required.
    pub fn is_required(&self, attribute: &str) -> bool {
        self.required.contains(attribute)
    }

    /// Whether the attribute is validated at all in this scenario
    pub fn in_scope(&self, attribute: &str) -> bool {
        self.required.contains(attribute) || self.optional.contains(attribute)
    }

    /// Required followed by optional attributes, without duplicates
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.required.iter().chain(
            self.optional
                .iter()
                .filter(|attribute| !self.required.contains(*attribute)),
        )
        .map(String::as_str)
    }
}

/// Resolves scenario names against a scenario table
pub struct ScenarioResolver;

impl ScenarioResolver {
    /// Resolve `name` to its required and optional attribute sets
    pub fn resolve(table: &ScenarioTable, name: &str) -> Result<Scenario> {
        let definition = table
            .get(name)
            .ok_or_else(|| ConfigError::UnknownScenario(name.to_string()))?;

        let required = definition
            .required
            .as_ref()
            .ok_or_else(|| ConfigError::MissingRequired(name.to_string()))?;

        Ok(Scenario {
            name: name.to_string(),
            required: required.iter().cloned().collect(),
            optional: definition
                .optional
                .iter()
                .flatten()
                .cloned()
                .collect(),
        })
    }
}

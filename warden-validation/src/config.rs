//! Validation configuration
//!
//! Rule, scenario and message tables are declared once and shared read-only by
//! every engine built from them. They can be assembled in code or loaded from
//! a JSON or TOML file:
//!
//! ```toml
//! [rules]
//! name = { type = "string", maxLength = 32 }
//! email = "email"
//! age = { type = "integer", unsigned = true }
//!
//! [scenarios.signup]
//! required = ["name", "email"]
//! optional = ["age"]
//!
//! [messages]
//! "email.required" = "Please tell us your email"
//! ```

use crate::{
    ConfigError, MessageTable, Result, Rule, RuleTable, ScenarioDefinition, ScenarioResolver,
    ScenarioTable, ValidatorRegistry,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Rule, scenario and message tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub rules: RuleTable,

    #[serde(default)]
    pub scenarios: ScenarioTable,

    #[serde(default)]
    pub messages: MessageTable,
}

impl ValidationConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the rule for an attribute
    pub fn rule(mut self, attribute: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(attribute.into(), rule);
        self
    }

    /// Declare a scenario
    pub fn scenario(mut self, name: impl Into<String>, definition: ScenarioDefinition) -> Self {
        self.scenarios.insert(name.into(), definition);
        self
    }

    /// Add a custom message for an attribute and key
    pub fn message(mut self, attribute: &str, key: &str, message: impl Into<String>) -> Self {
        self.messages.insert(attribute, key, message);
        self
    }

    /// Load configuration from a file, detecting the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), format = ?format, "Loading validation config");

        Self::from_str(&content, format)
    }

    /// Parse configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e))),
        }
    }

    /// Check every scenario against the rule table and every rule against the
    /// registry.
    ///
    /// Engines perform the same checks lazily during a run; calling this at
    /// startup surfaces mistakes before the first request.
    pub fn verify(&self, registry: &ValidatorRegistry) -> Result<()> {
        for name in self.scenarios.keys() {
            let scenario = ScenarioResolver::resolve(&self.scenarios, name)?;
            if let Some(missing) = scenario
                .attributes()
                .find(|attribute| !self.rules.contains_key(*attribute))
            {
                return Err(ConfigError::MissingRule(missing.to_string()));
            }
        }

        for (attribute, rule) in &self.rules {
            if !registry.contains(&rule.validator) {
                return Err(ConfigError::UnknownValidator {
                    attribute: attribute.clone(),
                    validator: rule.validator.clone(),
                });
            }
        }

        Ok(())
    }
}

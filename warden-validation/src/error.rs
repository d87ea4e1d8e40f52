// Configuration errors for the validation engine

use thiserror::Error;

/// A misconfigured validator setup.
///
/// These never describe bad user input. Input that fails a rule is recorded in
/// the [`ErrorReport`](crate::ErrorReport) instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Scenario does not exist: {0}")]
    UnknownScenario(String),

    #[error("Scenario {0} does not declare a required list")]
    MissingRequired(String),

    #[error("Scenario not set")]
    ScenarioNotSet,

    #[error("Attribute {0} has no rule")]
    MissingRule(String),

    #[error("Validator type {validator} for attribute {attribute} does not exist")]
    UnknownValidator { attribute: String, validator: String },

    #[error("Validator {validator} for attribute {attribute} has no option {option}")]
    UnknownOption {
        attribute: String,
        validator: String,
        option: String,
    },

    #[error("Invalid option {option} for attribute {attribute}: {reason}")]
    InvalidOption {
        attribute: String,
        option: String,
        reason: String,
    },

    #[error("Callback {callback} for attribute {attribute} is not registered")]
    UnknownCallback { attribute: String, callback: String },

    #[error("Failed to load validation config: {0}")]
    LoadError(String),

    #[error("Failed to parse validation config: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an invalid option error
    pub fn invalid_option(
        attribute: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            attribute: attribute.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from scenario selection
    pub fn is_scenario_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownScenario(_) | Self::MissingRequired(_) | Self::ScenarioNotSet
        )
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::UnknownValidator {
            attribute: "age".to_string(),
            validator: "bogus".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Validator type bogus for attribute age does not exist"
        );
        assert_eq!(ConfigError::ScenarioNotSet.to_string(), "Scenario not set");
    }

    #[test]
    fn test_is_scenario_error() {
        assert!(ConfigError::UnknownScenario("ghost".into()).is_scenario_error());
        assert!(ConfigError::ScenarioNotSet.is_scenario_error());
        assert!(!ConfigError::MissingRule("name".into()).is_scenario_error());
    }
}

//! Validation engine
//!
//! Owns the state of one validation lifecycle: the attribute bag, the active
//! scenario and the error report of the last run. Tables and the validator
//! registry are shared read-only through `Arc`, so building one engine per
//! request is cheap.
//!
//! ```
//! use serde_json::json;
//! use warden_validation::{Rule, ScenarioDefinition, ValidationConfig, ValidationEngine};
//!
//! let config = ValidationConfig::new()
//!     .rule("name", Rule::new("string"))
//!     .rule("age", Rule::new("integer"))
//!     .scenario("signup", ScenarioDefinition::new(["name"]).optional(["age"]));
//!
//! let attributes = json!({"name": "", "age": "x"}).as_object().cloned().unwrap();
//! let mut engine = ValidationEngine::new(config, attributes);
//! engine.set_scenario("signup").unwrap();
//!
//! assert!(!engine.validate().unwrap());
//! assert_eq!(engine.first_error(), "name is required");
//! assert_eq!(engine.errors().get("age").unwrap(), ["age must be an integer"]);
//! ```

use crate::registry::{self, ValidatorRegistry};
use crate::{
    Attributes, ConfigError, ErrorReport, MessageTable, RequestContext, Result, Rule, RuleTable,
    Scenario, ScenarioResolver, ValidationConfig, ValidatorContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Runs scenario-scoped validation over an attribute bag
#[derive(Debug)]
pub struct ValidationEngine {
    config: Arc<ValidationConfig>,
    registry: Arc<ValidatorRegistry>,
    attributes: Attributes,
    request: Option<RequestContext>,
    scenario: Option<Scenario>,
    report: ErrorReport,
}

impl ValidationEngine {
    /// Create an engine using the shared built-in registry
    pub fn new(config: impl Into<Arc<ValidationConfig>>, attributes: Attributes) -> Self {
        Self {
            config: config.into(),
            registry: ValidatorRegistry::shared(),
            attributes,
            request: None,
            scenario: None,
            report: ErrorReport::default(),
        }
    }

    /// Use a custom validator registry
    pub fn with_registry(mut self, registry: Arc<ValidatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Attach the request context handed to validators
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    /// Replace the attribute bag
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Select the scenario for subsequent runs.
    ///
    /// On error the previously selected scenario, if any, stays active.
    pub fn set_scenario(&mut self, name: &str) -> Result<()> {
        let scenario = ScenarioResolver::resolve(&self.config.scenarios, name).inspect_err(|e| {
            warn!(scenario = %name, error = %e, "Scenario selection failed");
        })?;

        debug!(
            scenario = %name,
            required = scenario.required().len(),
            optional = scenario.optional().len(),
            "Scenario selected"
        );
        self.scenario = Some(scenario);
        Ok(())
    }

    /// The active scenario, if one was selected
    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    /// Validate every in-scope attribute of the active scenario.
    ///
    /// Returns `Ok(true)` when no attribute failed. Failures are collected for
    /// all attributes before returning; see [`errors`](Self::errors).
    /// Configuration mistakes abort the run with an `Err`.
    pub fn validate(&mut self) -> Result<bool> {
        let scenario = self.scenario.as_ref().ok_or_else(|| {
            warn!("Validation attempted before a scenario was selected");
            ConfigError::ScenarioNotSet
        })?;
        self.report.clear();

        let rules = &self.config.rules;
        if let Some(missing) = scenario
            .attributes()
            .find(|attribute| !rules.contains_key(*attribute))
        {
            warn!(scenario = %scenario.name(), attribute = %missing, "Attribute has no rule");
            return Err(ConfigError::MissingRule(missing.to_string()));
        }

        debug!(scenario = %scenario.name(), attributes = rules.len(), "Running validation");

        for (attribute, rule) in rules {
            if !scenario.in_scope(attribute) {
                continue;
            }

            let view = EngineView {
                attributes: &self.attributes,
                rules,
                messages: &self.config.messages,
                registry: &self.registry,
                request: self.request.as_ref(),
                scenario,
                errors: &self.report,
            };
            let messages = view.check(attribute, rule, scenario.is_required(attribute))?;

            if !messages.is_empty() {
                debug!(attribute = %attribute, errors = ?messages, "Attribute failed validation");
                self.report.insert(attribute.clone(), messages);
            }
        }

        debug!(
            scenario = %scenario.name(),
            failed = self.report.len(),
            "Validation finished"
        );
        Ok(self.report.is_empty())
    }

    /// Errors of the last run, keyed by attribute
    pub fn errors(&self) -> &ErrorReport {
        &self.report
    }

    /// First message of the first failing attribute, or `""`
    pub fn first_error(&self) -> &str {
        self.report.first().unwrap_or_default()
    }
}

/// Read-only view of a running engine, handed to validators.
///
/// Cross-field rules use it to read sibling attributes, inspect errors already
/// recorded in this run, or run another rule as a sub-check.
#[derive(Clone, Copy)]
pub struct EngineView<'a> {
    pub(crate) attributes: &'a Attributes,
    pub(crate) rules: &'a RuleTable,
    pub(crate) messages: &'a MessageTable,
    pub(crate) registry: &'a ValidatorRegistry,
    pub(crate) request: Option<&'a RequestContext>,
    pub(crate) scenario: &'a Scenario,
    pub(crate) errors: &'a ErrorReport,
}

impl<'a> EngineView<'a> {
    /// Value of any attribute in the bag
    pub fn attribute(&self, name: &str) -> Option<&'a Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &'a Attributes {
        self.attributes
    }

    /// Declared rule of any attribute
    pub fn rule(&self, attribute: &str) -> Option<&'a Rule> {
        self.rules.get(attribute)
    }

    pub fn scenario(&self) -> &'a Scenario {
        self.scenario
    }

    /// Errors recorded so far in this run, for attributes declared earlier
    pub fn errors(&self) -> &'a ErrorReport {
        self.errors
    }

    pub fn registry(&self) -> &'a ValidatorRegistry {
        self.registry
    }

    pub fn request(&self) -> Option<&'a RequestContext> {
        self.request
    }

    /// Run `rule` against `attribute` and return its failure messages.
    ///
    /// An empty list means the value passed.
    pub fn check(&self, attribute: &str, rule: &Rule, is_required: bool) -> Result<Vec<String>> {
        let factory = self.registry.resolve(&rule.validator).ok_or_else(|| {
            warn!(attribute = %attribute, validator = %rule.validator, "Unknown validator type");
            ConfigError::UnknownValidator {
                attribute: attribute.to_string(),
                validator: rule.validator.clone(),
            }
        })?;

        trace!(attribute = %attribute, validator = %rule.validator, is_required, "Dispatching validator");

        let ctx = ValidatorContext {
            is_required,
            validator: &rule.validator,
            options: &rule.options,
            attribute,
            value: self.attributes.get(attribute),
            messages: self.messages,
            attributes: self.attributes,
            request: self.request,
            engine: *self,
        };
        registry::run(factory, ctx)
    }
}

//! The attribute validator capability
//!
//! Every validator, built-in or registered by an application, is constructed
//! from a [`ValidatorContext`] and checks exactly one attribute.

use crate::{Attributes, ConfigError, EngineView, MessageTable, RequestContext, Result, RuleOptions};
use serde_json::Value;

/// Validates a single attribute against a single rule
pub trait AttributeValidator {
    /// Run the check.
    ///
    /// `Ok(false)` means the value failed and [`errors`](Self::errors) explains
    /// why. `Err` is reserved for misconfiguration such as unknown options.
    fn validate(&mut self) -> Result<bool>;

    /// Messages collected by the last failing [`validate`](Self::validate)
    fn errors(&self) -> &[String];
}

/// Everything a validator may look at while checking one attribute
#[derive(Clone, Copy)]
pub struct ValidatorContext<'a> {
    /// Whether the active scenario requires the attribute
    pub is_required: bool,

    /// Validator type name the rule was resolved from
    pub validator: &'a str,

    /// Rule options in declaration order
    pub options: &'a RuleOptions,

    /// Attribute name
    pub attribute: &'a str,

    /// Current value, `None` when the bag has no entry
    pub value: Option<&'a Value>,

    pub messages: &'a MessageTable,

    /// The full attribute bag, for cross-field rules
    pub attributes: &'a Attributes,

    /// Opaque request context supplied by the caller
    pub request: Option<&'a RequestContext>,

    /// Read-only view of the engine running this validator
    pub engine: EngineView<'a>,
}

impl<'a> ValidatorContext<'a> {
    /// Whether the value is absent, `null` or an empty string
    pub fn is_empty(&self) -> bool {
        is_empty_value(self.value)
    }

    /// Custom message for `key`, or the given default
    pub fn message(&self, key: &str, default: impl FnOnce() -> String) -> String {
        self.messages
            .get(self.attribute, key)
            .map(str::to_string)
            .unwrap_or_else(default)
    }

    /// The standard "required" failure message
    pub fn required_message(&self) -> String {
        self.message("required", || format!("{} is required", self.attribute))
    }

    /// Reject any option outside `allowed`
    pub fn ensure_options(&self, allowed: &[&str]) -> Result<()> {
        match self
            .options
            .keys()
            .find(|name| !allowed.contains(&name.as_str()))
        {
            Some(name) => Err(ConfigError::UnknownOption {
                attribute: self.attribute.to_string(),
                validator: self.validator.to_string(),
                option: name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Fetch an option that must be present
    pub fn require_option(&self, name: &str) -> Result<&'a Value> {
        self.options
            .get(name)
            .ok_or_else(|| ConfigError::invalid_option(self.attribute, name, "option is required"))
    }

    pub fn invalid_option(&self, name: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::invalid_option(self.attribute, name, reason)
    }
}

/// Absent, `null` and `""` all count as empty
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Render a scalar the way a form would have submitted it
pub(crate) fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Type and option checks of a built-in rule.
///
/// The required/empty handling is shared by [`BuiltinValidator`]; implementors
/// only describe what a present value must look like. Each check returns
/// `Some(message)` on failure.
pub(crate) trait Checks: Default + 'static {
    /// Option names this rule understands
    const OPTIONS: &'static [&'static str];

    /// Check the value's shape, before any options
    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>>;

    /// Check one option. Options consumed by `check_type` return `Ok(None)`.
    fn check_option(
        &self,
        ctx: &ValidatorContext<'_>,
        name: &str,
        param: &Value,
        value: &Value,
    ) -> Result<Option<String>>;
}

/// Drives a [`Checks`] implementation through the standard validation flow
pub(crate) struct BuiltinValidator<'a, C> {
    ctx: ValidatorContext<'a>,
    checks: C,
    errors: Vec<String>,
}

/// Factory for a built-in rule
pub(crate) fn builtin<'a, C: Checks>(ctx: ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> {
    Box::new(BuiltinValidator {
        ctx,
        checks: C::default(),
        errors: Vec::new(),
    })
}

impl<C: Checks> AttributeValidator for BuiltinValidator<'_, C> {
    fn validate(&mut self) -> Result<bool> {
        self.errors.clear();
        let ctx = self.ctx;
        ctx.ensure_options(C::OPTIONS)?;

        let value = match ctx.value {
            Some(value) if !is_empty_value(Some(value)) => value,
            _ if ctx.is_required => {
                self.errors.push(ctx.required_message());
                return Ok(false);
            }
            _ => return Ok(true),
        };

        if let Some(message) = self.checks.check_type(&ctx, value)? {
            self.errors.push(message);
            return Ok(false);
        }

        for (name, param) in ctx.options {
            if let Some(message) = self.checks.check_option(&ctx, name, param, value)? {
                self.errors.push(message);
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}

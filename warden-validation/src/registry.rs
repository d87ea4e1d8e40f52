//! Validator registry
//!
//! Maps rule type names to validator factories. A rule's `type` is looked up
//! here at validation time, so the vocabulary is open: applications add their
//! own types next to the built-in ones.
//!
//! ```
//! use warden_validation::{AttributeValidator, Result, ValidatorContext, ValidatorRegistry};
//!
//! struct Uppercase<'a> {
//!     ctx: ValidatorContext<'a>,
//!     errors: Vec<String>,
//! }
//!
//! impl AttributeValidator for Uppercase<'_> {
//!     fn validate(&mut self) -> Result<bool> {
//!         let upper = self
//!             .ctx
//!             .value
//!             .and_then(|v| v.as_str())
//!             .is_some_and(|s| s.chars().all(|c| !c.is_lowercase()));
//!         if !upper {
//!             self.errors.push(format!("{} must be uppercase", self.ctx.attribute));
//!         }
//!         Ok(upper)
//!     }
//!
//!     fn errors(&self) -> &[String] {
//!         &self.errors
//!     }
//! }
//!
//! fn uppercase<'a>(ctx: ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> {
//!     Box::new(Uppercase { ctx, errors: Vec::new() })
//! }
//!
//! let registry = ValidatorRegistry::builtin().with_validator("uppercase", uppercase);
//! assert!(registry.contains("uppercase"));
//! assert!(registry.contains("email"));
//! ```

use crate::validators;
use crate::{AttributeValidator, EngineView, Result, ValidatorContext};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a validator for one attribute
pub type ValidatorFactory =
    Arc<dyn for<'a> Fn(ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> + Send + Sync>;

/// A named predicate used by the `call` rule
pub type Callback = Arc<dyn Fn(&Value, &EngineView<'_>) -> bool + Send + Sync>;

static SHARED: Lazy<Arc<ValidatorRegistry>> = Lazy::new(|| Arc::new(ValidatorRegistry::builtin()));

/// Rule type name to validator factory mapping
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    factories: HashMap<String, ValidatorFactory>,
    callbacks: HashMap<String, Callback>,
}

impl ValidatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in validator
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        validators::register_builtins(&mut registry);
        registry
    }

    /// The process-wide built-in registry
    pub fn shared() -> Arc<ValidatorRegistry> {
        Arc::clone(&SHARED)
    }

    /// Register a validator type, replacing any previous one of that name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: for<'a> Fn(ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_validator<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: for<'a> Fn(ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Register a callback for the `call` rule
    pub fn register_callback<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(&Value, &EngineView<'_>) -> bool + Send + Sync + 'static,
    {
        self.callbacks.insert(name.into(), Arc::new(callback));
    }

    /// Builder form of [`register_callback`](Self::register_callback)
    pub fn with_callback<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value, &EngineView<'_>) -> bool + Send + Sync + 'static,
    {
        self.register_callback(name, callback);
        self
    }

    /// Look up the factory for a validator type
    pub fn resolve(&self, name: &str) -> Option<&ValidatorFactory> {
        self.factories.get(name)
    }

    /// Look up a callback
    pub fn callback(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered validator type names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut callbacks: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        callbacks.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .field("callbacks", &callbacks)
            .finish()
    }
}

/// Runs a factory and the resulting validator, returning its messages
pub(crate) fn run(factory: &ValidatorFactory, ctx: ValidatorContext<'_>) -> Result<Vec<String>> {
    let mut validator = factory(ctx);
    if validator.validate()? {
        Ok(Vec::new())
    } else {
        Ok(validator.errors().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let registry = ValidatorRegistry::builtin();
        assert_eq!(
            registry.names(),
            [
                "alpha",
                "alphaNumeric",
                "call",
                "compare",
                "date",
                "double",
                "email",
                "file",
                "image",
                "in",
                "integer",
                "match",
                "phone",
                "string",
                "url",
            ]
        );
        assert!(registry.resolve("bogus").is_none());
    }

    #[test]
    fn test_shared_registry_is_reused() {
        let a = ValidatorRegistry::shared();
        let b = ValidatorRegistry::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_register_callback() {
        let registry = ValidatorRegistry::new().with_callback("always", |_, _| true);
        assert!(registry.callback("always").is_some());
        assert!(registry.callback("never").is_none());
        assert!(registry.names().is_empty());
    }
}

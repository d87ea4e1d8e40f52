//! Scenario-aware attribute validation for Warden
//!
//! One set of rules describes every attribute a form may carry. Scenarios
//! (`create`, `update`, `signup`, ...) pick which attributes are required and
//! which are optional for a given request. Attributes outside the active
//! scenario are never looked at.
//!
//! # Examples
//!
//! ## Validating a form
//!
//! ```
//! use serde_json::json;
//! use warden_validation::{Rule, ScenarioDefinition, ValidationConfig, ValidationEngine};
//!
//! let config = ValidationConfig::new()
//!     .rule("name", Rule::new("string").option("maxLength", 32))
//!     .rule("email", Rule::new("email"))
//!     .rule("age", Rule::new("integer").option("unsigned", true))
//!     .scenario("signup", ScenarioDefinition::new(["name", "email"]).optional(["age"]))
//!     .scenario("update", ScenarioDefinition::new(Vec::<String>::new()).optional(["name", "age"]))
//!     .message("email", "required", "Please tell us your email");
//!
//! let form = json!({"name": "Ann", "age": "-3"});
//! let mut engine = ValidationEngine::new(config, form.as_object().cloned().unwrap());
//!
//! engine.set_scenario("signup").unwrap();
//! assert!(!engine.validate().unwrap());
//! assert_eq!(engine.first_error(), "Please tell us your email");
//! assert_eq!(engine.errors().get("age").unwrap(), ["age must not be negative"]);
//!
//! // Same attributes, different scenario
//! engine.set_scenario("update").unwrap();
//! assert!(!engine.validate().unwrap());
//! assert!(!engine.errors().contains("email"));
//! ```
//!
//! ## Loading rules from a file
//!
//! ```
//! use warden_validation::{FileFormat, ValidationConfig, ValidatorRegistry};
//!
//! let config = ValidationConfig::from_str(
//!     r#"
//!     [rules]
//!     code = { type = "match", pattern = "^[A-Z]{3}$" }
//!
//!     [scenarios.lookup]
//!     required = ["code"]
//!     "#,
//!     FileFormat::Toml,
//! )
//! .unwrap();
//!
//! assert!(config.verify(&ValidatorRegistry::builtin()).is_ok());
//! ```

mod config;
mod engine;
mod error;
mod messages;
mod registry;
mod report;
mod request;
mod rules;
mod scenario;
mod validator;
mod validators;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use messages::*;
pub use registry::{Callback, ValidatorFactory, ValidatorRegistry};
pub use report::*;
pub use request::*;
pub use rules::*;
pub use scenario::*;
pub use validator::{AttributeValidator, ValidatorContext, is_empty_value};

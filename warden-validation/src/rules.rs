// Rule declarations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute values under validation, keyed by attribute name
pub type Attributes = serde_json::Map<String, Value>;

/// Ordered rule options, keyed by option name
pub type RuleOptions = IndexMap<String, Value>;

/// Ordered rule table, keyed by attribute name.
///
/// Declaration order decides both the order validators run in and the order
/// of the resulting error report.
pub type RuleTable = IndexMap<String, Rule>;

/// A single validation rule: a validator type plus its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleRepr")]
pub struct Rule {
    /// Registered validator type name, e.g. `integer`
    #[serde(rename = "type")]
    pub validator: String,

    /// Options in declaration order
    #[serde(flatten)]
    pub options: RuleOptions,
}

impl Rule {
    /// Create a rule without options
    pub fn new(validator: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            options: RuleOptions::new(),
        }
    }

    /// Append an option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Get an option parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}

/// Accepts `"email"` as well as `{ type = "integer", min = 1 }`
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleRepr {
    Name(String),
    Full {
        #[serde(rename = "type")]
        validator: String,
        #[serde(flatten)]
        options: RuleOptions,
    },
}

impl From<RuleRepr> for Rule {
    fn from(repr: RuleRepr) -> Self {
        match repr {
            RuleRepr::Name(validator) => Rule::new(validator),
            RuleRepr::Full { validator, options } => Rule { validator, options },
        }
    }
}

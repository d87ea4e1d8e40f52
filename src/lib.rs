// Warden - scenario-aware attribute validation for Rust
//
// This library re-exports the Warden member crates behind feature flags and
// provides a prelude for the common validation workflow.

// Re-export optional crates
#[cfg(feature = "validation")]
pub use warden_validation;

#[cfg(feature = "validation")]
pub use warden_validation::{
    AttributeValidator, Attributes, ConfigError, ErrorReport, FileFormat, RequestContext, Rule,
    ScenarioDefinition, UploadedFile, ValidationConfig, ValidationEngine, ValidatorContext,
    ValidatorRegistry,
};

// Prelude for common imports
pub mod prelude {
    pub use serde_json::json;

    #[cfg(feature = "validation")]
    pub use crate::{
        AttributeValidator,
        Attributes,
        ConfigError,
        ErrorReport,
        FileFormat,
        RequestContext,
        Rule,
        ScenarioDefinition,
        UploadedFile,
        ValidationConfig,
        ValidationEngine,
        ValidatorContext,
        ValidatorRegistry,
    };
}

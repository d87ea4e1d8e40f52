//! Integration tests for warden-validation

use serde_json::{Value, json};
use std::sync::Arc;
use warden_validation::*;

fn attrs(value: Value) -> Attributes {
    value.as_object().cloned().unwrap()
}

const FORMS: &str = r#"
[rules]
username = { type = "alphaNumeric", minLength = 3, maxLength = 16 }
email = "email"
password = { type = "string", minLength = 8 }
password_confirm = { type = "compare", compareAttribute = "password" }
age = { type = "integer", unsigned = true, min = 13, max = 130 }
role = { type = "in", range = ["admin", "member"] }
website = "url"
birthday = { type = "date", format = "%d/%m/%Y" }

[scenarios.signup]
required = ["username", "email", "password", "password_confirm"]
optional = ["age", "website", "birthday"]

[scenarios.profile]
required = []
optional = ["username", "website", "birthday"]

[scenarios.admin]
required = ["username", "role"]

[messages]
"email.required" = "Please tell us your email"
"password_confirm.compare" = "Passwords do not match"
"#;

fn forms() -> ValidationConfig {
    ValidationConfig::from_str(FORMS, FileFormat::Toml).unwrap()
}

#[test]
fn test_signup_success() {
    let mut engine = ValidationEngine::new(
        forms(),
        attrs(json!({
            "username": "ann42",
            "email": "ann@example.com",
            "password": "correct horse",
            "password_confirm": "correct horse",
            "age": 30,
            "birthday": "28/02/1994",
        })),
    );
    engine.set_scenario("signup").unwrap();

    assert!(engine.validate().unwrap());
    assert!(engine.errors().is_empty());
    assert_eq!(engine.first_error(), "");
}

#[test]
fn test_signup_failures_follow_rule_order() {
    let mut engine = ValidationEngine::new(
        forms(),
        attrs(json!({
            "username": "a!",
            "password": "short",
            "password_confirm": "shorter",
            "age": "12",
            "website": "ftp://nope",
            "role": "not in scope",
        })),
    );
    engine.set_scenario("signup").unwrap();

    assert!(!engine.validate().unwrap());

    let report = engine.errors();
    assert_eq!(
        report.attributes().collect::<Vec<_>>(),
        ["username", "email", "password", "password_confirm", "age", "website"]
    );
    assert_eq!(
        report.get("username").unwrap(),
        ["username must contain only letters and numbers"]
    );
    assert_eq!(report.get("email").unwrap(), ["Please tell us your email"]);
    assert_eq!(
        report.get("password").unwrap(),
        ["password must be at least 8 characters"]
    );
    assert_eq!(
        report.get("password_confirm").unwrap(),
        ["Passwords do not match"]
    );
    assert_eq!(report.get("age").unwrap(), ["age must be at least 13"]);
    assert_eq!(report.get("website").unwrap(), ["website must be a valid URL"]);
    assert!(!report.contains("role"));

    assert_eq!(
        engine.first_error(),
        "username must contain only letters and numbers"
    );
}

#[test]
fn test_scenarios_share_one_rule_table() {
    let form = attrs(json!({"website": "https://example.com", "birthday": "1994-02-28"}));
    let mut engine = ValidationEngine::new(forms(), form);

    engine.set_scenario("profile").unwrap();
    assert!(!engine.validate().unwrap());
    assert_eq!(engine.errors().attributes().collect::<Vec<_>>(), ["birthday"]);
    assert_eq!(
        engine.first_error(),
        "birthday must be a date in the format %d/%m/%Y"
    );

    engine.set_scenario("admin").unwrap();
    assert!(!engine.validate().unwrap());
    assert_eq!(
        engine.errors().attributes().collect::<Vec<_>>(),
        ["username", "role"]
    );
    assert_eq!(engine.errors().get("role").unwrap(), ["role is required"]);
}

#[test]
fn test_validate_is_idempotent() {
    let mut engine = ValidationEngine::new(forms(), attrs(json!({"username": "x"})));
    engine.set_scenario("admin").unwrap();

    assert!(!engine.validate().unwrap());
    let first = engine.errors().clone();
    assert!(!engine.validate().unwrap());
    assert_eq!(engine.errors(), &first);
}

#[test]
fn test_scenario_errors() {
    let mut engine = ValidationEngine::new(forms(), Attributes::new());

    let err = engine.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ScenarioNotSet));
    assert!(err.is_scenario_error());

    let err = engine.set_scenario("ghost").unwrap_err();
    assert_eq!(err.to_string(), "Scenario does not exist: ghost");
}

#[test]
fn test_scenario_without_required_list() {
    let config = forms().scenario("broken", ScenarioDefinition::default().optional(["age"]));
    let mut engine = ValidationEngine::new(config, Attributes::new());

    assert!(matches!(
        engine.set_scenario("broken"),
        Err(ConfigError::MissingRequired(name)) if name == "broken"
    ));
}

#[test]
fn test_unknown_option_is_a_config_error() {
    let config = ValidationConfig::new()
        .rule("age", Rule::new("integer").option("minimum", 3))
        .scenario("s", ScenarioDefinition::new(["age"]));
    let mut engine = ValidationEngine::new(config, attrs(json!({"age": 5})));
    engine.set_scenario("s").unwrap();

    let err = engine.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validator integer for attribute age has no option minimum"
    );
}

fn every_builtin() -> ValidationConfig {
    ValidationConfig::new()
        .rule("integer", Rule::new("integer"))
        .rule("double", Rule::new("double"))
        .rule("alpha", Rule::new("alpha"))
        .rule("alphaNumeric", Rule::new("alphaNumeric"))
        .rule("string", Rule::new("string"))
        .rule("in", Rule::new("in").option("range", json!([1, 2])))
        .rule("date", Rule::new("date"))
        .rule("email", Rule::new("email"))
        .rule("phone", Rule::new("phone"))
        .rule("url", Rule::new("url"))
        .rule("compare", Rule::new("compare").option("compareAttribute", "other"))
        .rule("match", Rule::new("match").option("pattern", "^a$"))
        .rule("call", Rule::new("call").option("callback", "always"))
        .rule("file", Rule::new("file"))
        .rule("image", Rule::new("image"))
}

fn every_builtin_registry() -> Arc<ValidatorRegistry> {
    Arc::new(ValidatorRegistry::builtin().with_callback("always", |_, _| true))
}

#[test]
fn test_absent_required_attributes() {
    let names: Vec<String> = every_builtin().rules.keys().cloned().collect();
    let config = every_builtin().scenario("all", ScenarioDefinition::new(names.clone()));

    let mut engine = ValidationEngine::new(config, Attributes::new())
        .with_registry(every_builtin_registry());
    engine.set_scenario("all").unwrap();

    assert!(!engine.validate().unwrap());
    for name in &names {
        assert_eq!(
            engine.errors().get(name).unwrap(),
            [format!("{} is required", name)],
            "{} should report a missing value",
            name
        );
    }
}

#[test]
fn test_absent_optional_attributes() {
    let names: Vec<String> = every_builtin().rules.keys().cloned().collect();
    let config = every_builtin().scenario(
        "all",
        ScenarioDefinition::new(Vec::<String>::new()).optional(names),
    );

    let empty = attrs(json!({"integer": null, "string": "", "date": ""}));
    let mut engine =
        ValidationEngine::new(config, empty).with_registry(every_builtin_registry());
    engine.set_scenario("all").unwrap();

    assert!(engine.validate().unwrap());
}

#[test]
fn test_callbacks_see_sibling_attributes() {
    let registry = ValidatorRegistry::builtin().with_callback("after_start", |value, engine| {
        match (value.as_i64(), engine.attribute("start").and_then(Value::as_i64)) {
            (Some(end), Some(start)) => end > start,
            _ => false,
        }
    });
    let config = ValidationConfig::new()
        .rule("start", Rule::new("integer"))
        .rule("end", Rule::new("call").option("callback", "after_start"))
        .scenario("range", ScenarioDefinition::new(["start", "end"]))
        .message("end", "call", "end must come after start");

    let mut engine = ValidationEngine::new(config.clone(), attrs(json!({"start": 5, "end": 9})))
        .with_registry(Arc::new(registry.clone()));
    engine.set_scenario("range").unwrap();
    assert!(engine.validate().unwrap());

    engine.set_attributes(attrs(json!({"start": 5, "end": 2})));
    assert!(!engine.validate().unwrap());
    assert_eq!(engine.first_error(), "end must come after start");

    let config = config.rule("end", Rule::new("call").option("callback", "missing"));
    let mut engine = ValidationEngine::new(config, attrs(json!({"start": 5, "end": 9})))
        .with_registry(Arc::new(registry));
    engine.set_scenario("range").unwrap();
    assert!(matches!(
        engine.validate(),
        Err(ConfigError::UnknownCallback { callback, .. }) if callback == "missing"
    ));
}

struct WorkEmail<'a> {
    ctx: ValidatorContext<'a>,
    errors: Vec<String>,
}

impl AttributeValidator for WorkEmail<'_> {
    fn validate(&mut self) -> Result<bool> {
        let ctx = self.ctx;

        // Reuse the built-in email rule, then add a domain check
        self.errors = ctx
            .engine
            .check(ctx.attribute, &Rule::new("email"), ctx.is_required)?;
        if !self.errors.is_empty() {
            return Ok(false);
        }

        let work = ctx
            .value
            .and_then(Value::as_str)
            .is_none_or(|email| email.ends_with("@corp.example"));
        if !work {
            self.errors.push(ctx.message("work", || {
                format!("{} must be a company address", ctx.attribute)
            }));
        }
        Ok(work)
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}

fn work_email<'a>(ctx: ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> {
    Box::new(WorkEmail {
        ctx,
        errors: Vec::new(),
    })
}

#[test]
fn test_custom_validator_composes_builtins() {
    let registry = Arc::new(ValidatorRegistry::builtin().with_validator("workEmail", work_email));
    let config = ValidationConfig::new()
        .rule("email", Rule::new("workEmail"))
        .scenario("invite", ScenarioDefinition::new(["email"]));
    assert!(config.verify(&registry).is_ok());
    assert!(config.verify(&ValidatorRegistry::builtin()).is_err());

    let cases = [
        (json!({"email": "bob@corp.example"}), None),
        (json!({"email": "bob@home.example"}), Some("email must be a company address")),
        (json!({"email": "bob"}), Some("email must be a valid email")),
        (json!({}), Some("email is required")),
    ];

    for (form, expected) in cases {
        let mut engine = ValidationEngine::new(config.clone(), attrs(form))
            .with_registry(Arc::clone(&registry));
        engine.set_scenario("invite").unwrap();

        match expected {
            None => assert!(engine.validate().unwrap()),
            Some(message) => {
                assert!(!engine.validate().unwrap());
                assert_eq!(engine.first_error(), message);
            }
        }
    }
}

#[test]
fn test_uploads_come_from_request_context() {
    let config = ValidationConfig::new()
        .rule("name", Rule::new("string"))
        .rule(
            "resume",
            Rule::new("file")
                .option("mimes", json!(["pdf"]))
                .option("maxSize", 1),
        )
        .scenario("apply", ScenarioDefinition::new(["name", "resume"]));

    let request =
        RequestContext::new().with_file("resume", UploadedFile::new("cv.pdf", vec![0u8; 512]));
    let mut engine = ValidationEngine::new(config.clone(), attrs(json!({"name": "Ann"})))
        .with_request(request);
    engine.set_scenario("apply").unwrap();
    assert!(engine.validate().unwrap());

    let request =
        RequestContext::new().with_file("resume", UploadedFile::new("cv.exe", vec![0u8; 512]));
    let mut engine =
        ValidationEngine::new(config, attrs(json!({"name": "Ann"}))).with_request(request);
    engine.set_scenario("apply").unwrap();
    assert!(!engine.validate().unwrap());
    assert_eq!(engine.first_error(), "resume must be a file of type: pdf");
}

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forms.json");
    std::fs::write(
        &path,
        serde_json::to_string(&json!({
            "rules": {
                "phone": {"type": "phone"},
                "level": {"type": "double", "min": 0.5}
            },
            "scenarios": {
                "contact": {"required": ["phone"], "optional": ["level"]}
            },
            "messages": {"phone.phone": "That does not look like a phone number"}
        }))
        .unwrap(),
    )
    .unwrap();

    let config = ValidationConfig::from_file(&path).unwrap();
    config.verify(&ValidatorRegistry::builtin()).unwrap();

    let mut engine = ValidationEngine::new(config, attrs(json!({"phone": "12", "level": 0.25})));
    engine.set_scenario("contact").unwrap();

    assert!(!engine.validate().unwrap());
    assert_eq!(
        engine.errors().to_json(),
        json!({
            "errors": {
                "phone": ["That does not look like a phone number"],
                "level": ["level must be at least 0.5"],
            }
        })
    );
}

// Text rules

use super::{LENGTH_OPTIONS, check_length, param_str};
use crate::validator::{Checks, value_as_text};
use crate::{Result, ValidatorContext};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{6,14}$").unwrap());

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Declares a rule whose type check is a single regex over the value's text
macro_rules! pattern_rule {
    ($name:ident, $key:literal, $regex:ident, $default:literal) => {
        #[derive(Default)]
        pub(crate) struct $name;

        impl Checks for $name {
            const OPTIONS: &'static [&'static str] = LENGTH_OPTIONS;

            fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
                let valid = value_as_text(value).is_some_and(|text| $regex.is_match(&text));
                Ok((!valid).then(|| ctx.message($key, || format!($default, ctx.attribute))))
            }

            fn check_option(
                &self,
                ctx: &ValidatorContext<'_>,
                name: &str,
                param: &Value,
                value: &Value,
            ) -> Result<Option<String>> {
                check_length(ctx, name, param, &value_as_text(value).unwrap_or_default())
            }
        }
    };
}

pattern_rule!(AlphaChecks, "alpha", ALPHA_REGEX, "{} must contain only letters");
pattern_rule!(
    AlphaNumericChecks,
    "alphaNumeric",
    ALPHANUMERIC_REGEX,
    "{} must contain only letters and numbers"
);
pattern_rule!(EmailChecks, "email", EMAIL_REGEX, "{} must be a valid email");
pattern_rule!(PhoneChecks, "phone", PHONE_REGEX, "{} must be a valid phone number");
pattern_rule!(UrlChecks, "url", URL_REGEX, "{} must be a valid URL");

/// Any JSON string
#[derive(Default)]
pub(crate) struct StringChecks;

impl Checks for StringChecks {
    const OPTIONS: &'static [&'static str] = LENGTH_OPTIONS;

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        Ok((!value.is_string())
            .then(|| ctx.message("string", || format!("{} must be a string", ctx.attribute))))
    }

    fn check_option(
        &self,
        ctx: &ValidatorContext<'_>,
        name: &str,
        param: &Value,
        value: &Value,
    ) -> Result<Option<String>> {
        check_length(ctx, name, param, value.as_str().unwrap_or_default())
    }
}

/// Text matching a caller-supplied `pattern`
#[derive(Default)]
pub(crate) struct MatchChecks;

impl Checks for MatchChecks {
    const OPTIONS: &'static [&'static str] = &["pattern"];

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let pattern = param_str(ctx, "pattern", ctx.require_option("pattern")?)?;
        let regex = Regex::new(pattern).map_err(|e| ctx.invalid_option("pattern", e.to_string()))?;

        let valid = value_as_text(value).is_some_and(|text| regex.is_match(&text));
        Ok((!valid).then(|| {
            ctx.message("match", || format!("{} does not match required pattern", ctx.attribute))
        }))
    }

    fn check_option(
        &self,
        _ctx: &ValidatorContext<'_>,
        _name: &str,
        _param: &Value,
        _value: &Value,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}

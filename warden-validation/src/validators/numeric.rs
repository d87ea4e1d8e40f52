// Integer and decimal rules

use super::{check_length, param_bool, param_f64};
use crate::validator::{Checks, value_as_text};
use crate::{Result, ValidatorContext};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static DOUBLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

const NUMERIC_OPTIONS: &[&str] = &["unsigned", "min", "max", "length", "minLength", "maxLength"];

/// Whole numbers, as JSON integers or digit strings
#[derive(Default)]
pub(crate) struct IntegerChecks;

impl Checks for IntegerChecks {
    const OPTIONS: &'static [&'static str] = NUMERIC_OPTIONS;

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let valid = match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => INTEGER_REGEX.is_match(s),
            _ => false,
        };

        Ok((!valid).then(|| ctx.message("integer", || format!("{} must be an integer", ctx.attribute))))
    }

    fn check_option(
        &self,
        ctx: &ValidatorContext<'_>,
        name: &str,
        param: &Value,
        value: &Value,
    ) -> Result<Option<String>> {
        check_number_option(ctx, name, param, value)
    }
}

/// Decimal numbers, as JSON numbers or digit strings with an optional fraction
#[derive(Default)]
pub(crate) struct DoubleChecks;

impl Checks for DoubleChecks {
    const OPTIONS: &'static [&'static str] = NUMERIC_OPTIONS;

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let valid = match value {
            Value::Number(_) => true,
            Value::String(s) => DOUBLE_REGEX.is_match(s),
            _ => false,
        };

        Ok((!valid).then(|| ctx.message("double", || format!("{} must be a number", ctx.attribute))))
    }

    fn check_option(
        &self,
        ctx: &ValidatorContext<'_>,
        name: &str,
        param: &Value,
        value: &Value,
    ) -> Result<Option<String>> {
        check_number_option(ctx, name, param, value)
    }
}

fn check_number_option(
    ctx: &ValidatorContext<'_>,
    name: &str,
    param: &Value,
    value: &Value,
) -> Result<Option<String>> {
    // The type check already ran, so both conversions succeed.
    let text = value_as_text(value).unwrap_or_default();
    let number = value
        .as_f64()
        .or_else(|| text.parse::<f64>().ok())
        .unwrap_or_default();

    let message = match name {
        "unsigned" => (param_bool(ctx, name, param)? && number < 0.0).then(|| {
            ctx.message(name, || format!("{} must not be negative", ctx.attribute))
        }),
        "min" => (number < param_f64(ctx, name, param)?).then(|| {
            ctx.message(name, || format!("{} must be at least {}", ctx.attribute, param))
        }),
        "max" => (number > param_f64(ctx, name, param)?).then(|| {
            ctx.message(name, || format!("{} must be at most {}", ctx.attribute, param))
        }),
        _ => check_length(ctx, name, param, &text)?,
    };

    Ok(message)
}

// Built-in validators

mod choice;
mod date;
mod numeric;
mod text;
mod upload;

use crate::validator::builtin;
use crate::{Result, ValidatorContext, ValidatorRegistry};
use serde_json::Value;

pub(crate) const LENGTH_OPTIONS: &[&str] = &["length", "minLength", "maxLength"];

pub(crate) fn register_builtins(registry: &mut ValidatorRegistry) {
    registry.register("integer", builtin::<numeric::IntegerChecks>);
    registry.register("double", builtin::<numeric::DoubleChecks>);
    registry.register("alpha", builtin::<text::AlphaChecks>);
    registry.register("alphaNumeric", builtin::<text::AlphaNumericChecks>);
    registry.register("string", builtin::<text::StringChecks>);
    registry.register("email", builtin::<text::EmailChecks>);
    registry.register("phone", builtin::<text::PhoneChecks>);
    registry.register("url", builtin::<text::UrlChecks>);
    registry.register("match", builtin::<text::MatchChecks>);
    registry.register("in", builtin::<choice::InChecks>);
    registry.register("compare", builtin::<choice::CompareChecks>);
    registry.register("call", builtin::<choice::CallChecks>);
    registry.register("date", builtin::<date::DateChecks>);
    registry.register("file", upload::file);
    registry.register("image", upload::image);
}

pub(crate) fn param_usize(ctx: &ValidatorContext<'_>, name: &str, param: &Value) -> Result<usize> {
    param
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| ctx.invalid_option(name, "expected a non-negative integer"))
}

pub(crate) fn param_f64(ctx: &ValidatorContext<'_>, name: &str, param: &Value) -> Result<f64> {
    param
        .as_f64()
        .ok_or_else(|| ctx.invalid_option(name, "expected a number"))
}

pub(crate) fn param_bool(ctx: &ValidatorContext<'_>, name: &str, param: &Value) -> Result<bool> {
    param
        .as_bool()
        .ok_or_else(|| ctx.invalid_option(name, "expected a boolean"))
}

pub(crate) fn param_str<'v>(
    ctx: &ValidatorContext<'_>,
    name: &str,
    param: &'v Value,
) -> Result<&'v str> {
    param
        .as_str()
        .ok_or_else(|| ctx.invalid_option(name, "expected a string"))
}

/// `length`, `minLength` and `maxLength`, counted in characters
pub(crate) fn check_length(
    ctx: &ValidatorContext<'_>,
    name: &str,
    param: &Value,
    text: &str,
) -> Result<Option<String>> {
    let limit = param_usize(ctx, name, param)?;
    let len = text.chars().count();
    let failed = match name {
        "length" => len != limit,
        "minLength" => len < limit,
        "maxLength" => len > limit,
        _ => false,
    };

    Ok(failed.then(|| {
        ctx.message(name, || match name {
            "length" => format!("{} must be exactly {} characters", ctx.attribute, limit),
            "minLength" => format!("{} must be at least {} characters", ctx.attribute, limit),
            _ => format!("{} must be at most {} characters", ctx.attribute, limit),
        })
    }))
}

// Membership, comparison and callback rules

use super::{param_bool, param_str};
use crate::validator::{Checks, value_as_text};
use crate::{ConfigError, Result, ValidatorContext};
use serde_json::Value;

/// Loose equality compares form text, so `"1"` equals `1`
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (value_as_text(a), value_as_text(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// Value must be one of `range`
#[derive(Default)]
pub(crate) struct InChecks;

impl Checks for InChecks {
    const OPTIONS: &'static [&'static str] = &["range", "strict"];

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let range = ctx
            .require_option("range")?
            .as_array()
            .ok_or_else(|| ctx.invalid_option("range", "expected an array"))?;
        let strict = match ctx.options.get("strict") {
            Some(param) => param_bool(ctx, "strict", param)?,
            None => false,
        };

        let found = range
            .iter()
            .any(|candidate| if strict { candidate == value } else { loosely_equal(candidate, value) });

        Ok((!found).then(|| {
            ctx.message("in", || {
                let choices: Vec<String> = range.iter().filter_map(value_as_text).collect();
                format!("{} must be one of: {}", ctx.attribute, choices.join(", "))
            })
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

/// Value must equal the attribute named by `compareAttribute`
#[derive(Default)]
pub(crate) struct CompareChecks;

impl Checks for CompareChecks {
    const OPTIONS: &'static [&'static str] = &["compareAttribute"];

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let other = param_str(ctx, "compareAttribute", ctx.require_option("compareAttribute")?)?;

        let same = ctx
            .attributes
            .get(other)
            .is_some_and(|other_value| loosely_equal(other_value, value));

        Ok((!same).then(|| {
            ctx.message("compare", || format!("{} must match {}", ctx.attribute, other))
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

/// Value must satisfy the registered callback named by `callback`
#[derive(Default)]
pub(crate) struct CallChecks;

impl Checks for CallChecks {
    const OPTIONS: &'static [&'static str] = &["callback"];

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let name = param_str(ctx, "callback", ctx.require_option("callback")?)?;
        let callback = ctx.engine.registry().callback(name).ok_or_else(|| {
            ConfigError::UnknownCallback {
                attribute: ctx.attribute.to_string(),
                callback: name.to_string(),
            }
        })?;

        Ok((!callback(value, &ctx.engine))
            .then(|| ctx.message("call", || format!("{} is invalid", ctx.attribute))))
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

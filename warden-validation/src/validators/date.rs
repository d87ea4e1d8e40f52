// Date rule

use super::param_str;
use crate::validator::Checks;
use crate::{Result, ValidatorContext};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Text that parses with the strftime `format` (default `%Y-%m-%d`)
#[derive(Default)]
pub(crate) struct DateChecks;

impl Checks for DateChecks {
    const OPTIONS: &'static [&'static str] = &["format"];

    fn check_type(&self, ctx: &ValidatorContext<'_>, value: &Value) -> Result<Option<String>> {
        let format = match ctx.options.get("format") {
            Some(param) => param_str(ctx, "format", param)?,
            None => DEFAULT_FORMAT,
        };
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ctx.invalid_option("format", format!("invalid date format {}", format)));
        }

        let valid = value.as_str().is_some_and(|text| {
            NaiveDateTime::parse_from_str(text, format).is_ok()
                || NaiveDate::parse_from_str(text, format).is_ok()
                || NaiveTime::parse_from_str(text, format).is_ok()
        });

        Ok((!valid).then(|| {
            ctx.message("date", || format!("{} must be a date in the format {}", ctx.attribute, format))
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

//! File and image upload rules
//!
//! Uploads are not part of the attribute bag; they are read from the request
//! context under the attribute's name.

use super::{param_f64, param_usize};
use crate::{AttributeValidator, Result, UploadedFile, ValidatorContext};
use serde_json::Value;
use std::io::Cursor;

const FILE_OPTIONS: &[&str] = &["mimes", "maxSize"];

const IMAGE_OPTIONS: &[&str] = &[
    "mimes",
    "maxSize",
    "width",
    "height",
    "minWidth",
    "maxWidth",
    "minHeight",
    "maxHeight",
];

pub(crate) fn file<'a>(ctx: ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> {
    Box::new(UploadValidator {
        ctx,
        image: false,
        errors: Vec::new(),
    })
}

pub(crate) fn image<'a>(ctx: ValidatorContext<'a>) -> Box<dyn AttributeValidator + 'a> {
    Box::new(UploadValidator {
        ctx,
        image: true,
        errors: Vec::new(),
    })
}

/// Pixel dimensions read from the image header
fn dimensions(content: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(content))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

struct UploadValidator<'a> {
    ctx: ValidatorContext<'a>,
    image: bool,
    errors: Vec<String>,
}

impl UploadValidator<'_> {
    fn fail(&mut self, message: String) -> Result<bool> {
        self.errors.push(message);
        Ok(false)
    }

    fn check_option(
        &self,
        name: &str,
        param: &Value,
        file: &UploadedFile,
        dims: Option<(u32, u32)>,
    ) -> Result<Option<String>> {
        let ctx = &self.ctx;
        let message = match name {
            "mimes" => {
                let allowed = param
                    .as_array()
                    .ok_or_else(|| ctx.invalid_option(name, "expected an array"))?;
                let allowed: Vec<String> = allowed
                    .iter()
                    .filter_map(|m| m.as_str())
                    .map(str::to_lowercase)
                    .collect();

                (!mime_allowed(&allowed, file)).then(|| {
                    ctx.message(name, || {
                        format!("{} must be a file of type: {}", ctx.attribute, allowed.join(", "))
                    })
                })
            }
            "maxSize" => {
                let kilobytes = param_f64(ctx, name, param)?;
                (file.size() as f64 > kilobytes * 1024.0).then(|| {
                    ctx.message(name, || {
                        format!("{} may not be greater than {} kilobytes", ctx.attribute, param)
                    })
                })
            }
            _ => {
                let limit = param_usize(ctx, name, param)? as u32;
                let (width, height) = dims.unwrap_or_default();
                let failed = match name {
                    "width" => width != limit,
                    "height" => height != limit,
                    "minWidth" => width < limit,
                    "maxWidth" => width > limit,
                    "minHeight" => height < limit,
                    _ => height > limit,
                };
                failed.then(|| {
                    ctx.message(name, || {
                        format!(
                            "{} has invalid image dimensions ({}x{})",
                            ctx.attribute, width, height
                        )
                    })
                })
            }
        };

        Ok(message)
    }
}

/// Entries may be extensions (`png`), media types (`image/png`) or wildcards (`image/*`)
fn mime_allowed(allowed: &[String], file: &UploadedFile) -> bool {
    let extension = file.extension().unwrap_or_default();
    let mime = file.mime_type();

    allowed.iter().any(|entry| match entry.strip_suffix("/*") {
        Some(prefix) => mime.split('/').next() == Some(prefix),
        None => *entry == extension || *entry == mime,
    })
}

impl AttributeValidator for UploadValidator<'_> {
    fn validate(&mut self) -> Result<bool> {
        self.errors.clear();
        let ctx = self.ctx;
        ctx.ensure_options(if self.image { IMAGE_OPTIONS } else { FILE_OPTIONS })?;

        let Some(file) = ctx.request.and_then(|request| request.file(ctx.attribute)) else {
            if ctx.is_required {
                return self.fail(ctx.required_message());
            }
            return Ok(true);
        };

        let dims = if self.image {
            match dimensions(&file.content) {
                Some(dims) => Some(dims),
                None => {
                    return self
                        .fail(ctx.message("image", || format!("{} must be an image", ctx.attribute)));
                }
            }
        } else {
            None
        };

        for (name, param) in ctx.options {
            if let Some(message) = self.check_option(name, param, file, dims)? {
                return self.fail(message);
            }
        }

        Ok(true)
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}

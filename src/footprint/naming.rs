//! Package naming and text templating.
//!
//! Package names and descriptions are written as templates such as
//! `RESC{size_metric}X{height} ({size_imperial})`. Placeholders are
//! substituted from an explicit, ordered parameter map.
//!
//! # Template Syntax
//!
//! - `{name}` is replaced by the value of parameter `name`
//! - `{{` and `}}` produce literal braces
//!
//! Anything else between braces must be a known parameter name.

use indexmap::IndexMap;

use crate::error::TemplateError;

/// Ordered parameter map for [`apply_template`].
pub type TemplateParams = IndexMap<&'static str, String>;

/// Substitutes `{name}` placeholders in `template`.
///
/// # Errors
///
/// Returns an error if a placeholder names a parameter missing from
/// `params`, or if a brace is not balanced.
///
/// # Examples
///
/// ```
/// use footprint_gen::footprint::naming::{apply_template, TemplateParams};
///
/// let mut params = TemplateParams::new();
/// params.insert("size_metric", "1608".to_string());
/// params.insert("height", "55".to_string());
///
/// let name = apply_template("RESC{size_metric}X{height}", &params).unwrap();
/// assert_eq!(name, "RESC1608X55");
/// ```
pub fn apply_template(template: &str, params: &TemplateParams) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed || name.contains('{') {
                    return Err(TemplateError::UnbalancedBrace {
                        offset,
                        template: template.to_string(),
                    });
                }
                let value = params.get(name.as_str()).ok_or_else(|| {
                    TemplateError::UnknownParameter {
                        name: name.clone(),
                        template: template.to_string(),
                    }
                })?;
                output.push_str(value);
            }
            '}' => {
                return Err(TemplateError::UnbalancedBrace {
                    offset,
                    template: template.to_string(),
                });
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

/// Generates the metric size code of a chip body, e.g. `3216` for a
/// 3.2mm x 1.6mm part.
///
/// Each dimension is truncated (not rounded) to tenths of a millimetre
/// and zero-padded to two digits.
#[must_use]
pub fn metric_size_code(length: f64, width: f64) -> String {
    format!(
        "{length:02}{width:02}",
        length = mm_to_tenths_truncated(length),
        width = mm_to_tenths_truncated(width)
    )
}

/// Converts millimetres to whole tenths, discarding the remainder.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mm_to_tenths_truncated(mm: f64) -> u32 {
    // Chip dimensions are positive and small, so the cast is safe
    (mm * 10.0).trunc() as u32
}

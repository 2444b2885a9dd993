//! Section selection and value rendering.

mod date;
mod number;
mod text;

use crate::ast::{CellFormat, FormatType, Section};
use crate::error::FormatError;
use crate::value::{CellType, CellValue, FormattedValue};

/// Shortest decimal rendering that round-trips, never scientific. This is
/// what `General` produces.
pub(crate) fn general(v: f64) -> String {
    format!("{v}")
}

/// Render one section against a value. Only the selector calls this; the
/// value is already non-negative and the section is one of the renderable
/// types.
pub(crate) fn render(
    section: &Section,
    sv: &str,
    fv: f64,
    date1904: bool,
) -> Result<FormattedValue, FormatError> {
    let (text, value) = match section.format_type {
        FormatType::Time => {
            let (text, timestamp, duration) = date::format_time(&section.tokens, fv, date1904);
            let value = if section.is_duration() {
                CellValue::Duration(duration)
            } else {
                CellValue::DateTime(timestamp)
            };
            (text, value)
        }
        FormatType::Number => (
            number::format_number(&section.tokens, fv),
            CellValue::Number(fv),
        ),
        FormatType::Text => (
            text::format_text(&section.tokens, sv, fv),
            CellValue::Text(sv.to_string()),
        ),
        _ => return Err(FormatError::Internal("section type is not renderable")),
    };
    Ok(FormattedValue {
        value,
        text,
        section: section.clone(),
    })
}

impl CellFormat {
    /// Apply this format to a raw cell value, producing the display string
    /// and the typed value behind it.
    ///
    /// Fails with [`FormatError::ParseNumber`] when `kind` demands a number
    /// and `sv` is not one, and with [`FormatError::UnsupportedCondition`]
    /// when the format carries a conditional section predicate.
    pub fn format_value(
        &self,
        sv: &str,
        kind: CellType,
        date1904: bool,
    ) -> Result<FormattedValue, FormatError> {
        if self.is_conditional() {
            return Err(FormatError::UnsupportedCondition);
        }

        match kind {
            CellType::Bool => {
                let truthy = sv == "1";
                return Ok(FormattedValue {
                    value: CellValue::Bool(truthy),
                    text: if truthy { "TRUE" } else { "FALSE" }.to_string(),
                    section: Section::of_type(FormatType::Bool),
                });
            }
            CellType::Error => {
                return Ok(FormattedValue {
                    value: CellValue::Text(sv.to_string()),
                    text: sv.to_string(),
                    section: Section::of_type(FormatType::Error),
                });
            }
            _ => {}
        }

        let is_number = kind.is_numeric();
        let fv = if is_number {
            sv.parse::<f64>().map_err(|_| FormatError::ParseNumber {
                value: sv.to_string(),
            })?
        } else {
            0.0
        };

        let n = self.sections().len();

        // text with no text section passes through verbatim
        if n < 4 && !is_number {
            return Ok(FormattedValue {
                value: CellValue::Text(sv.to_string()),
                text: sv.to_string(),
                section: Section::of_type(FormatType::Text),
            });
        }
        // an empty format leaves numeric text untouched too
        if n == 0 {
            return Ok(FormattedValue {
                value: CellValue::Number(fv),
                text: sv.to_string(),
                section: Section::of_type(FormatType::Number),
            });
        }

        // ordered, position-sensitive selection; the case order matters
        if n == 1 || (n == 2 && fv == 0.0) || fv > 0.0 {
            // the first section also serves negative values when it is the
            // only one, with an explicit sign prefix
            let mut out = render(&self.sections()[0], sv, fv.abs(), date1904)?;
            if out.section.format_type != FormatType::Time {
                out.value = CellValue::Number(fv);
            }
            if fv < 0.0 {
                out.text.insert(0, '-');
            }
            return Ok(out);
        }
        if n >= 2 && fv < 0.0 {
            // the negative section supplies its own sign markers
            let mut out = render(&self.sections()[1], sv, fv.abs(), date1904)?;
            if out.section.format_type != FormatType::Time {
                out.value = CellValue::Number(fv);
            }
            return Ok(out);
        }
        if n >= 3 && fv == 0.0 && is_number {
            let mut out = render(&self.sections()[2], sv, fv, date1904)?;
            if out.section.format_type != FormatType::Time {
                out.value = CellValue::Number(fv);
            }
            return Ok(out);
        }
        if n > 3 && !is_number {
            let mut out = render(&self.sections()[3], sv, fv.abs(), date1904)?;
            if out.section.format_type != FormatType::Time {
                out.value = CellValue::Text(sv.to_string());
            }
            return Ok(out);
        }

        Err(FormatError::Internal("no section selection rule matched"))
    }
}

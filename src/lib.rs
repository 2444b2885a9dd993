//! cellfmt - spreadsheet cell number-format codes
//!
//! This crate parses ECMA-376 number-format codes (the `#,##0.00;(#,##0.00)`
//! mini-language behind every spreadsheet cell) into a reusable compiled
//! form, and applies that form to raw cell text to produce both a display
//! string and a typed value: number, boolean, timestamp or duration.
//!
//! Parsing never fails; malformed format fragments degrade to literal text,
//! matching what deployed spreadsheet software does. Compatibility extends
//! to the warts, including the 1900 leap-year bug and the phantom serial 60.
//!
//! ```
//! use cellfmt::{CellFormat, CellType};
//!
//! let fmt = CellFormat::parse("#,##0.00;(#,##0.00)");
//! let v = fmt.format_value("-1234.5", CellType::Numeric, false)?;
//! assert_eq!(v.text, "(1,234.50)");
//!
//! let fmt = CellFormat::parse("yyyy-mm-dd hh:mm");
//! let v = fmt.format_value("42099.625", CellType::Numeric, false)?;
//! assert_eq!(v.text, "2015-04-05 15:00");
//! # Ok::<(), cellfmt::FormatError>(())
//! ```

pub mod ast;
pub mod builtin_formats;
pub mod date_serial;
pub mod error;
pub mod value;

mod cache;
mod formatter;
mod numeric;
mod parser;

pub use ast::{CellFormat, FmtToken, FormatSubType, FormatType, Section, TokenKind};
pub use builtin_formats::{builtin_format_code, is_builtin_format};
pub use cache::parse_cached;
pub use error::FormatError;
pub use value::{CellType, CellValue, FormattedValue};

/// Compile a format code. Equivalent to [`CellFormat::parse`].
pub fn parse_format(format_code: &str) -> CellFormat {
    CellFormat::parse(format_code)
}

/// One-shot convenience: compile `format_code` through the global cache and
/// apply it to a raw cell value.
pub fn format_value(
    format_code: &str,
    sv: &str,
    kind: CellType,
    date1904: bool,
) -> Result<FormattedValue, FormatError> {
    parse_cached(format_code).format_value(sv, kind, date1904)
}

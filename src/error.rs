//! Error types for applying a format to a cell value.
//!
//! Parsing a format code never fails: malformed fragments degrade to literal
//! text. Errors only arise when a compiled format is applied to a value.

use thiserror::Error;

/// Errors that can occur when formatting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The cell is tagged numeric but its raw text is not a valid float.
    #[error("cannot parse {value:?} as a number")]
    ParseNumber { value: String },

    /// The format carries a conditional section predicate (e.g. `[>100]`),
    /// which this engine recognises but does not evaluate.
    #[error("conditional format sections are unsupported")]
    UnsupportedCondition,

    /// An unreachable state was reached. Seeing this is a bug.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

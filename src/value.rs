//! Cell input tags and typed formatting output.

use chrono::{NaiveDateTime, TimeDelta};

use crate::ast::Section;

/// The storage type tag accompanying a raw cell value.
///
/// `Formula` cells carry their cached numeric result and format like
/// `Numeric`; `Inline` strings format like `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    String,
    Formula,
    Numeric,
    Bool,
    Inline,
    Error,
}

impl CellType {
    /// True when the raw value must parse as a float before formatting.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellType::Numeric | CellType::Formula)
    }
}

/// The typed result of formatting a cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Duration(TimeDelta),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(true) => Some(1.0),
            CellValue::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            CellValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// A type name for error messages and debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "boolean",
            CellValue::DateTime(_) => "datetime",
            CellValue::Duration(_) => "duration",
        }
    }
}

/// A formatted cell: the display string, the typed value behind it, and the
/// section that produced it (so callers can inspect its type and sub-type).
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue {
    pub value: CellValue,
    pub text: String,
    pub section: Section,
}

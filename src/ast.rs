//! Compiled representation of a format code.
//!
//! A format code is compiled once into a [`CellFormat`]: an ordered list of
//! up to four [`Section`]s, each a flat list of [`FmtToken`]s. The compiled
//! form is immutable and can be applied to any number of values, from any
//! number of threads.

/// The kind of a single format token.
///
/// `m` runs are tokenised as [`TokenKind::Month`] and retagged
/// [`TokenKind::Minute`] in a second pass, based on the nearest non-literal
/// neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Invalid,
    /// `@` — replaced by the raw cell text.
    CellText,
    /// `General` — shortest round-trip numeric rendering.
    General,
    /// `[Red]`, `[Color12]` — colour name in `data`, recognised but not rendered.
    Color,

    /// Integer digit pattern (`#`, `0`, `?`, embedded `,`) in `data`.
    NumInt,
    /// Decimal digit pattern in `data`.
    NumDec,
    /// `.`
    NumDecSign,
    /// Exponent pattern (`E+00` etc.) in `data`; `size` counts its digit placeholders.
    NumExp,
    /// Numerator pattern of a fraction (a promoted `NumInt`).
    NumFracNum,
    /// `/`
    NumFracSign,
    /// Denominator pattern: placeholder digits, or a literal integer like `16`.
    NumFracDenom,
    /// `%` — scales the value by 100.
    NumPct,
    /// `_x` — a blank as wide as the character in `data`.
    Space,
    /// `*x` — the character in `data`, repeated to fill the column.
    Repeat,
    /// `[>=100]` etc. — condition expression in `data`, recognised but not evaluated.
    Condition,

    /// `AM/PM` (`size` 2) or `A/P` (`size` 1); `data` holds the case marker.
    AmPm,
    Month,
    Day,
    Year,
    Hour,
    Minute,
    Second,
    /// `0` run after a second token — sub-second digits, `size` per digit.
    SecFraction,
    /// `[h]` — total elapsed hours.
    TotalHours,
    /// `[m]` — total elapsed minutes.
    TotalMinutes,
    /// `[s]` — total elapsed seconds.
    TotalSeconds,
    Literal,
}

/// One token of a compiled format section.
///
/// `size` carries the source run length (`yyyy` → 4) or placeholder count;
/// `data` carries literal text, patterns, colour names and condition
/// expressions, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmtToken {
    pub kind: TokenKind,
    pub size: usize,
    pub data: String,
}

impl FmtToken {
    pub fn new(kind: TokenKind, size: usize, data: impl Into<String>) -> Self {
        FmtToken {
            kind,
            size,
            data: data.into(),
        }
    }

    /// A token with neither run length nor payload.
    pub fn bare(kind: TokenKind) -> Self {
        FmtToken::new(kind, 0, "")
    }

    /// A run token (`yyyy`, `hh`, …).
    pub fn sized(kind: TokenKind, size: usize) -> Self {
        FmtToken::new(kind, size, "")
    }

    /// A token whose meaning lives in its payload (`NumInt`, `Literal`, …).
    pub fn with_data(kind: TokenKind, data: impl Into<String>) -> Self {
        FmtToken::new(kind, 0, data)
    }
}

/// Broad classification of a section, driving renderer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    #[default]
    None,
    Text,
    Time,
    Number,
    Bool,
    Error,
}

/// Refinement of [`FormatType::Time`] sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSubType {
    #[default]
    None,
    DateTime,
    Date,
    Time,
    Duration,
}

/// One semicolon-separated section of a format code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub format_type: FormatType,
    pub sub_type: FormatSubType,
    pub tokens: Vec<FmtToken>,
}

impl Section {
    /// A token-less section of the given type, used by the selector bypasses.
    pub(crate) fn of_type(format_type: FormatType) -> Self {
        Section {
            format_type,
            ..Section::default()
        }
    }

    /// True for duration sections (`[h]`, `[m]`, `[s]` totals present).
    pub fn is_duration(&self) -> bool {
        self.sub_type == FormatSubType::Duration
    }

    pub fn has_token(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|t| t.kind == kind)
    }
}

/// A compiled format code, ready to be applied to cell values.
///
/// Sections keep their source order. Sections beyond the fourth are compiled
/// and renderable but never chosen by the selector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellFormat {
    sections: Vec<Section>,
    conditional: bool,
}

impl CellFormat {
    pub(crate) fn new(sections: Vec<Section>, conditional: bool) -> Self {
        CellFormat {
            sections,
            conditional,
        }
    }

    /// Compile a format code. Never fails; unrecognised input degrades to
    /// literal text.
    pub fn parse(format_code: &str) -> CellFormat {
        crate::parser::parse(format_code)
    }

    /// The compiled sections, in source order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True if any section carries a condition like `[>100]`. Such formats
    /// are rejected at formatting time.
    pub fn is_conditional(&self) -> bool {
        self.conditional
    }
}

//! Text rendering: `@` sections and literal-only sections.

use crate::ast::{FmtToken, TokenKind};

pub(crate) fn format_text(tokens: &[FmtToken], sv: &str, fv: f64) -> String {
    let mut out = String::new();
    for t in tokens {
        match t.kind {
            TokenKind::CellText => out.push_str(sv),
            TokenKind::General => out.push_str(&super::general(fv)),
            TokenKind::Literal => out.push_str(&t.data),
            _ => {}
        }
    }
    out
}

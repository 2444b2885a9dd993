//! Number rendering: digit patterns, thousands grouping and scaling,
//! percentages, scientific notation and fractions.
//!
//! Rendering is two passes over the section's tokens. Pass A collects the
//! digit patterns and applies the value-scaling operators (`%` multiplies by
//! 100, each trailing comma divides by 1000) and, when a fraction is
//! present, computes the numerator and denominator. Pass B walks the tokens
//! in source order and emits text.

use crate::ast::{FmtToken, TokenKind};
use crate::numeric;

/// Format a non-negative value against a number section. The sign, when
/// needed, is prepended by the section selector.
pub(crate) fn format_number(tokens: &[FmtToken], fv: f64) -> String {
    let mut v = fv;

    let mut int_fmt: Vec<u8> = Vec::new();
    let mut dec_fmt: Vec<u8> = Vec::new();
    let mut exp_prec: i32 = -1;
    let mut dec_prec: usize = 0;
    let mut has_comma = false;
    let mut has_int = false;
    let mut has_exp = false;
    let mut frac_denom_fmt = "";

    for t in tokens {
        match t.kind {
            TokenKind::NumPct => v *= 100.0,
            TokenKind::NumInt => {
                has_int = true;
                let data = strip_trailing_commas(&mut v, &t.data);
                int_fmt.clear();
                for &b in data.as_bytes() {
                    if b == b',' {
                        has_comma = true;
                    } else {
                        int_fmt.push(b);
                    }
                }
            }
            TokenKind::NumDec => {
                let data = strip_trailing_commas(&mut v, &t.data);
                dec_fmt.clear();
                for &b in data.as_bytes() {
                    if matches!(b, b'0' | b'#' | b'?') {
                        dec_fmt.push(b);
                        dec_prec += 1;
                    }
                }
            }
            // keep the integer part unrounded; the fraction carries the rest
            TokenKind::NumFracSign => dec_prec = 1,
            TokenKind::NumFracDenom => frac_denom_fmt = &t.data,
            TokenKind::NumExp => {
                has_exp = true;
                exp_prec = t.size as i32;
            }
            _ => {}
        }
    }

    let (frac_num, frac_denom) = if frac_denom_fmt.is_empty() {
        (0, 0)
    } else {
        // mixed-number form approximates only the fractional part
        let f = if has_int { v.fract() } else { v };
        fraction_parts(f, frac_denom_fmt)
    };

    let (intval, decval, expval) = numeric::split_number(v, exp_prec, dec_prec);

    let mut out = String::new();
    for t in tokens {
        match t.kind {
            TokenKind::NumInt => {
                // a whole-number zero is suppressed by an all-# pattern
                let iv = if intval == "0" && !has_exp {
                    ""
                } else {
                    intval.as_str()
                };
                let (padded, sig_only) = pad_int_pattern(&int_fmt, iv);
                if !(sig_only && padded == "0" && !has_exp) {
                    if has_comma {
                        out.push_str(&numeric::group_thousands(&padded));
                    } else {
                        out.push_str(&padded);
                    }
                }
            }
            TokenKind::NumDecSign => out.push('.'),
            TokenKind::NumDec => out.push_str(&pad_dec_pattern(&dec_fmt, &decval)),
            TokenKind::NumExp => {
                // always renders E+; the original engine never emitted E-
                let digits = expval.get(2..).unwrap_or("");
                let trimmed = digits.trim_start_matches('0');
                let ev = if trimmed.is_empty() { "0" } else { trimmed };
                let (padded, _) = pad_int_pattern(exp_pattern(&t.data), ev);
                out.push_str("E+");
                out.push_str(&padded);
            }
            TokenKind::NumFracSign => out.push('/'),
            TokenKind::NumFracNum => {
                let (padded, _) = pad_int_pattern(t.data.as_bytes(), &frac_num.to_string());
                out.push_str(&padded);
            }
            TokenKind::NumFracDenom => {
                let (padded, _) = pad_int_pattern(t.data.as_bytes(), &frac_denom.to_string());
                out.push_str(&padded);
            }
            TokenKind::NumPct => out.push('%'),
            TokenKind::General => out.push_str(&super::general(fv)),
            TokenKind::Literal => out.push_str(&t.data),
            TokenKind::Space => out.push(' '),
            TokenKind::Repeat => out.push_str(&t.data),
            _ => {}
        }
    }
    out
}

/// Strip trailing commas from a digit pattern, dividing the value by 1000
/// for each one found.
fn strip_trailing_commas<'a>(v: &mut f64, data: &'a str) -> &'a str {
    let mut end = data.len();
    while end > 0 && data.as_bytes()[end - 1] == b',' {
        *v /= 1000.0;
        end -= 1;
    }
    &data[..end]
}

/// Numerator and denominator for a fraction token. A pattern starting with
/// a nonzero digit is a fixed denominator; a placeholder pattern bounds a
/// rational approximation by its width.
fn fraction_parts(f: f64, denom_fmt: &str) -> (i64, i64) {
    match denom_fmt.as_bytes().first() {
        Some(b'1'..=b'9') => match denom_fmt.parse::<i64>() {
            Ok(denom) => ((denom as f64 * f + 0.5).floor() as i64, denom),
            Err(_) => (0, 0),
        },
        _ => {
            let bound = 10i64
                .checked_pow(denom_fmt.len() as u32)
                .map_or(i64::MAX, |p| p - 1);
            numeric::rational_approx(f.abs(), bound)
        }
    }
}

/// Left-pad a digit string per the excess positions of its pattern: `0`
/// pads with zero, `?` with a space, `#` with nothing. `sig_only` reports
/// whether the excess contained `#` placeholders only.
fn pad_int_pattern(fmt: &[u8], val: &str) -> (String, bool) {
    let mut out = String::new();
    let mut sig_only = true;
    for &b in fmt.iter().take(fmt.len().saturating_sub(val.len())) {
        match b {
            b'0' => {
                out.push('0');
                sig_only = false;
            }
            b'?' => {
                out.push(' ');
                sig_only = false;
            }
            _ => {}
        }
    }
    out.push_str(val);
    (out, sig_only)
}

/// Right-pad decimal digits per the tail of their pattern.
fn pad_dec_pattern(fmt: &[u8], val: &str) -> String {
    let mut out = String::from(val);
    for &b in fmt.iter().skip(val.len()) {
        match b {
            b'0' => out.push('0'),
            b'?' => out.push(' '),
            _ => {}
        }
    }
    out
}

/// The digit pattern of an exponent token: everything after the `E`/`e`
/// and optional sign.
fn exp_pattern(data: &str) -> &[u8] {
    let b = data.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'E' | b'e')) {
        i += 1;
    }
    if matches!(b.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    &b[i..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_pattern_padding() {
        assert_eq!(pad_int_pattern(b"0000", "12"), ("0012".to_string(), false));
        assert_eq!(pad_int_pattern(b"?#", "1"), (" 1".to_string(), false));
        assert_eq!(pad_int_pattern(b"#", ""), (String::new(), true));
        assert_eq!(pad_int_pattern(b"#", "1234"), ("1234".to_string(), true));
    }

    #[test]
    fn dec_pattern_padding() {
        assert_eq!(pad_dec_pattern(b"#0", "2"), "20");
        assert_eq!(pad_dec_pattern(b"#?", "2"), "2 ");
        assert_eq!(pad_dec_pattern(b"##", "45"), "45");
        assert_eq!(pad_dec_pattern(b"#", ""), "");
    }

    #[test]
    fn exp_pattern_strips_sign() {
        assert_eq!(exp_pattern("E+00"), b"00");
        assert_eq!(exp_pattern("e-0"), b"0");
        assert_eq!(exp_pattern("E##"), b"##");
    }

    #[test]
    fn trailing_comma_scaling() {
        let mut v = 123456.78;
        assert_eq!(strip_trailing_commas(&mut v, "#,"), "#");
        assert!((v - 123.45678).abs() < 1e-9);

        let mut v = 12345678.0;
        assert_eq!(strip_trailing_commas(&mut v, "#,,"), "#");
        assert!((v - 12.345678).abs() < 1e-9);
    }

    #[test]
    fn fixed_denominator_rounds_numerator() {
        assert_eq!(fraction_parts(0.25, "16"), (4, 16));
        assert_eq!(fraction_parts(0.75, "#"), (3, 4));
    }
}

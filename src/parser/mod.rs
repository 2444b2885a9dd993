//! Format-code parser.
//!
//! A format code is a small language with ambiguous tokens (an `m` is a
//! month or a minute depending on its neighbours) and three lexing contexts:
//! date/time sections, numeric sections, and the characters common to both
//! (quoted strings, escapes, padding markers). The top level dispatches on
//! the first significant byte of each section; unrecognised input degrades
//! to literal text, so parsing never fails.

mod scan;

use crate::ast::{CellFormat, FmtToken, FormatSubType, FormatType, Section, TokenKind};

/// Parse a format code into a [`CellFormat`].
pub(crate) fn parse(format_code: &str) -> CellFormat {
    let mut parser = Parser {
        rem: format_code.as_bytes(),
        tokens: Vec::new(),
        other: Vec::new(),
        sections: Vec::new(),
        conditional: false,
    };
    parser.run();
    CellFormat::new(parser.sections, parser.conditional)
}

struct Parser<'a> {
    rem: &'a [u8],
    /// Tokens of the section being built.
    tokens: Vec<FmtToken>,
    /// Pending literal bytes, flushed into a single `Literal` token whenever
    /// a structural token is emitted.
    other: Vec<u8>,
    sections: Vec<Section>,
    conditional: bool,
}

impl<'a> Parser<'a> {
    fn run(&mut self) {
        while let Some(&ch) = self.rem.first() {
            match ch {
                // a time anchor starts a date/time section ('0' alone is
                // numeric; it only means sub-seconds after a time anchor)
                b'y' | b'm' | b'd' | b'h' | b's' => {
                    self.flush();
                    self.tokenize_time();
                }
                b'#' | b'?' | b'0' | b'.' => {
                    self.flush();
                    self.tokenize_numeric();
                }
                b'g' | b'G' => {
                    if self.rem.len() >= 7 && self.rem[..7].eq_ignore_ascii_case(b"general") {
                        self.flush();
                        self.tokens.push(FmtToken::bare(TokenKind::General));
                        self.advance(7);
                    } else {
                        self.other.push(ch);
                        self.advance(1);
                    }
                }
                b'[' => self.bracket(),
                b';' => {
                    self.flush();
                    self.close_text_section();
                    self.advance(1);
                }
                b'@' => {
                    self.flush();
                    self.tokens.push(FmtToken::bare(TokenKind::CellText));
                    self.advance(1);
                }
                _ => self.common(),
            }
        }
        self.flush();
        if !self.tokens.is_empty() {
            self.close_text_section();
        }
    }

    fn advance(&mut self, n: usize) {
        let rem = self.rem;
        self.rem = &rem[n..];
    }

    /// Flush pending literal bytes as a single `Literal` token.
    fn flush(&mut self) {
        if !self.other.is_empty() {
            let data = String::from_utf8_lossy(&self.other).into_owned();
            self.tokens.push(FmtToken::with_data(TokenKind::Literal, data));
            self.other.clear();
        }
    }

    fn close_text_section(&mut self) {
        self.sections.push(Section {
            format_type: FormatType::Text,
            sub_type: FormatSubType::None,
            tokens: std::mem::take(&mut self.tokens),
        });
    }

    /// `[...]` at the top level: a colour, a condition, a total-unit time
    /// token, or nothing worth keeping.
    fn bracket(&mut self) {
        let rem = self.rem;
        let (entry, after) = scan::read_to_char(&rem[1..], b']');
        let Some(entry) = entry else {
            // no closing bracket: the '[' is literal text
            self.other.push(b'[');
            self.advance(1);
            return;
        };
        if entry.is_empty() {
            self.rem = after; // `[]` carries nothing
            return;
        }
        if is_color(&entry) {
            self.flush();
            self.tokens.push(FmtToken::with_data(
                TokenKind::Color,
                String::from_utf8_lossy(&entry),
            ));
            self.rem = after;
            return;
        }
        match entry[0] {
            b'h' | b'm' | b's' => {
                // a total-unit token: hand the whole bracketed run to the
                // time sub-parser, which reads it in place
                self.flush();
                self.tokenize_time();
            }
            b'<' | b'>' | b'=' => {
                self.flush();
                self.tokens.push(FmtToken::with_data(
                    TokenKind::Condition,
                    String::from_utf8_lossy(&entry),
                ));
                self.conditional = true;
                self.rem = after;
            }
            _ => {
                // not a legal bracket entry; swallow it
                self.rem = after;
            }
        }
    }

    /// Tokenize a date/time section up to the next `;` or end of input.
    fn tokenize_time(&mut self) {
        let mut has_date = false;
        let mut has_time = false;
        let mut has_total = false;

        while let Some(&ch) = self.rem.first() {
            match ch {
                b'y' | b'm' | b'd' | b'h' | b's' | b'0' => {
                    let (rest, ch, count) = scan::read_repeat(self.rem);
                    self.rem = rest;
                    let kind = match ch {
                        b'y' => {
                            has_date = true;
                            TokenKind::Year
                        }
                        b'm' => TokenKind::Month, // month or minute; settled below
                        b'd' => {
                            has_date = true;
                            TokenKind::Day
                        }
                        b'h' => {
                            has_time = true;
                            TokenKind::Hour
                        }
                        b's' => {
                            has_time = true;
                            TokenKind::Second
                        }
                        _ => {
                            has_time = true;
                            TokenKind::SecFraction
                        }
                    };
                    self.flush();
                    self.tokens.push(FmtToken::sized(kind, count));
                }

                b'[' => {
                    // [h]/[m]/[s] elapsed totals; anything else in brackets
                    // inside a time section is literal text
                    if self.rem.len() < 3 {
                        self.other.push(b'[');
                        self.advance(1);
                        continue;
                    }
                    let rem = self.rem;
                    let (rest, unit, count) = scan::read_repeat(&rem[1..]);
                    let kind = match unit {
                        b'h' => TokenKind::TotalHours,
                        b'm' => TokenKind::TotalMinutes,
                        b's' => TokenKind::TotalSeconds,
                        _ => {
                            self.other.push(b'[');
                            self.advance(1);
                            continue;
                        }
                    };
                    if rest.first() != Some(&b']') {
                        self.other.push(b'[');
                        self.advance(1);
                        continue;
                    }
                    has_total = true;
                    self.rem = &rest[1..];
                    self.flush();
                    self.tokens.push(FmtToken::sized(kind, count));
                }

                b'A' | b'a' => {
                    if self.rem.len() >= 5
                        && (&self.rem[..5] == b"AM/PM" || &self.rem[..5] == b"am/pm")
                    {
                        self.flush();
                        self.tokens
                            .push(FmtToken::new(TokenKind::AmPm, 2, (ch as char).to_string()));
                        self.advance(5);
                    } else if self.rem.len() >= 3
                        && (&self.rem[..3] == b"A/P" || &self.rem[..3] == b"a/p")
                    {
                        self.flush();
                        self.tokens
                            .push(FmtToken::new(TokenKind::AmPm, 1, (ch as char).to_string()));
                        self.advance(3);
                    } else {
                        self.other.push(ch);
                        self.advance(1);
                    }
                }

                b';' => {
                    self.advance(1);
                    break;
                }

                _ => self.common(),
            }
        }
        self.flush();

        let mut tokens = std::mem::take(&mut self.tokens);

        // settle 'm': minute iff the nearest significant neighbour on the
        // left is an hour, or on the right a second
        for i in 0..tokens.len() {
            if tokens[i].kind != TokenKind::Month {
                continue;
            }
            let prev = neighbour_kind(tokens[..i].iter().rev());
            let next = neighbour_kind(tokens[i + 1..].iter());
            if prev == TokenKind::Hour
                || prev == TokenKind::TotalHours
                || next == TokenKind::Second
                || next == TokenKind::TotalSeconds
            {
                tokens[i].kind = TokenKind::Minute;
                has_time = true;
            } else {
                has_date = true;
            }
        }

        let sub_type = if has_total {
            FormatSubType::Duration
        } else if has_date && has_time {
            FormatSubType::DateTime
        } else if has_date {
            FormatSubType::Date
        } else if has_time {
            FormatSubType::Time
        } else {
            FormatSubType::None
        };

        self.sections.push(Section {
            format_type: FormatType::Time,
            sub_type,
            tokens,
        });
    }

    /// Tokenize a numeric section up to the next `;` or end of input.
    fn tokenize_numeric(&mut self) {
        let mut in_dec = false;
        let mut in_frac = false;
        let mut has_dec_sign = false;
        let mut has_frac_sign = false;
        let mut has_exp = false;
        let mut has_pct = false;

        while let Some(&ch) = self.rem.first() {
            match ch {
                b'0' | b'?' | b'#' => {
                    let (kind, run) = if in_frac {
                        in_frac = false;
                        let (run, rest) = scan::read_chars(self.rem, b"0?#");
                        self.rem = rest;
                        (TokenKind::NumFracDenom, run)
                    } else if in_dec {
                        in_dec = false;
                        let (run, rest) = scan::read_chars(self.rem, b"0?#,");
                        self.rem = rest;
                        (TokenKind::NumDec, run)
                    } else {
                        let (run, rest) = scan::read_chars(self.rem, b"0?#,");
                        self.rem = rest;
                        (TokenKind::NumInt, run)
                    };
                    self.flush();
                    self.tokens
                        .push(FmtToken::with_data(kind, String::from_utf8_lossy(run)));
                }

                b'.' => {
                    if has_dec_sign {
                        // only one decimal point per section
                        self.other.push(b'.');
                    } else {
                        self.flush();
                        self.tokens.push(FmtToken::bare(TokenKind::NumDecSign));
                        has_dec_sign = true;
                        in_dec = true;
                    }
                    self.advance(1);
                }

                b'/' => {
                    // promote the most recent integer pattern to a numerator;
                    // with nothing to promote the '/' is dropped
                    if !has_frac_sign {
                        if let Some(idx) = last_token_idx(&self.tokens, TokenKind::NumInt) {
                            self.flush();
                            self.tokens[idx].kind = TokenKind::NumFracNum;
                            self.tokens.push(FmtToken::bare(TokenKind::NumFracSign));
                            has_frac_sign = true;
                            in_frac = true;
                        }
                    }
                    self.advance(1);
                }

                b'1'..=b'9' => {
                    if in_frac {
                        // literal fixed denominator
                        let (digits, rest) = scan::read_chars(self.rem, b"0123456789");
                        self.rem = rest;
                        self.flush();
                        self.tokens.push(FmtToken::with_data(
                            TokenKind::NumFracDenom,
                            String::from_utf8_lossy(digits),
                        ));
                        in_frac = false;
                    } else {
                        let (digits, rest) = scan::read_chars(self.rem, b"0123456789.,");
                        self.rem = rest;
                        self.other.extend_from_slice(digits);
                    }
                }

                b'%' => {
                    if has_pct {
                        self.other.push(b'%');
                    } else {
                        self.flush();
                        self.tokens.push(FmtToken::bare(TokenKind::NumPct));
                        has_pct = true;
                    }
                    self.advance(1);
                }

                b'E' | b'e' => {
                    if has_exp {
                        self.other.push(ch);
                        self.advance(1);
                    } else {
                        self.flush();
                        let rem = self.rem;
                        let mut data = vec![ch];
                        let mut rest = &rem[1..];
                        if let Some(&sign) = rest.first() {
                            if sign == b'+' || sign == b'-' {
                                data.push(sign);
                                rest = &rest[1..];
                            }
                        }
                        let (run, rest) = scan::read_chars(rest, b"?#0+");
                        data.extend_from_slice(run);
                        self.rem = rest;
                        let size = run
                            .iter()
                            .filter(|b| matches!(b, b'0' | b'#' | b'?'))
                            .count();
                        self.tokens.push(FmtToken::new(
                            TokenKind::NumExp,
                            size,
                            String::from_utf8_lossy(&data),
                        ));
                        has_exp = true;
                    }
                }

                b';' => {
                    self.advance(1);
                    break;
                }

                _ => self.common(),
            }
        }
        self.flush();

        self.sections.push(Section {
            format_type: FormatType::Number,
            sub_type: FormatSubType::None,
            tokens: std::mem::take(&mut self.tokens),
        });
    }

    /// Characters shared by every context: escapes, quoted strings, padding
    /// markers, and plain literal text.
    fn common(&mut self) {
        match self.rem[0] {
            b'\\' => {
                let (txt, rest) = scan::skip_escape(self.rem);
                self.other.extend_from_slice(txt);
                self.rem = rest;
            }

            b'"' => {
                let rem = self.rem;
                match scan::read_to_char(&rem[1..], b'"') {
                    (Some(quoted), rest) => {
                        self.other.extend_from_slice(&quoted);
                        self.rem = rest;
                    }
                    (None, _) => {
                        // unterminated quote: the rest of the input is literal
                        self.other.extend_from_slice(&rem[1..]);
                        self.rem = &[];
                    }
                }
            }

            ch @ (b'_' | b'*') => {
                if self.rem.len() > 1 {
                    let kind = if ch == b'*' {
                        TokenKind::Repeat
                    } else {
                        TokenKind::Space
                    };
                    let data = String::from_utf8_lossy(&self.rem[1..2]).into_owned();
                    self.flush();
                    self.tokens.push(FmtToken::with_data(kind, data));
                    self.advance(2);
                } else {
                    self.other.push(ch);
                    self.advance(1);
                }
            }

            ch => {
                self.other.push(ch);
                self.advance(1);
            }
        }
    }
}

/// The nearest token kind in the iteration order, skipping literal text and
/// padding markers.
fn neighbour_kind<'t>(tokens: impl Iterator<Item = &'t FmtToken>) -> TokenKind {
    for t in tokens {
        match t.kind {
            TokenKind::Literal | TokenKind::Space | TokenKind::Repeat => {}
            kind => return kind,
        }
    }
    TokenKind::Invalid
}

fn last_token_idx(tokens: &[FmtToken], kind: TokenKind) -> Option<usize> {
    tokens.iter().rposition(|t| t.kind == kind)
}

fn is_color(entry: &[u8]) -> bool {
    let lower = entry.to_ascii_lowercase();
    matches!(
        lower.as_slice(),
        b"black" | b"green" | b"white" | b"blue" | b"magenta" | b"yellow" | b"cyan" | b"red"
    ) || lower.starts_with(b"color")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(format: &str) -> Vec<FmtToken> {
        let cf = parse(format);
        assert_eq!(cf.sections().len(), 1, "format={format:?}");
        cf.sections()[0].tokens.clone()
    }

    #[test]
    fn literal_only_section_is_text() {
        let cf = parse("foo");
        assert_eq!(cf.sections().len(), 1);
        assert_eq!(cf.sections()[0].format_type, FormatType::Text);
        assert_eq!(
            cf.sections()[0].tokens,
            vec![FmtToken::with_data(TokenKind::Literal, "foo")]
        );
    }

    #[test]
    fn escapes_and_quotes_merge_into_one_literal() {
        assert_eq!(
            tokens_of(r#"a"b\"c"\de"#),
            vec![FmtToken::with_data(TokenKind::Literal, r#"ab"cde"#)]
        );
    }

    #[test]
    fn unterminated_quote_becomes_literal_tail() {
        assert_eq!(
            tokens_of(r#"$general"foo"#),
            vec![
                FmtToken::with_data(TokenKind::Literal, "$"),
                FmtToken::bare(TokenKind::General),
                FmtToken::with_data(TokenKind::Literal, "foo"),
            ]
        );
    }

    #[test]
    fn general_is_case_insensitive_and_exact() {
        assert_eq!(tokens_of("GENERAL"), vec![FmtToken::bare(TokenKind::General)]);
        // not "general": stays literal
        assert_eq!(
            tokens_of("gz"),
            vec![FmtToken::with_data(TokenKind::Literal, "gz")]
        );
    }

    #[test]
    fn stray_open_bracket_is_literal() {
        assert_eq!(
            tokens_of("hh:[z"),
            vec![
                FmtToken::sized(TokenKind::Hour, 2),
                FmtToken::with_data(TokenKind::Literal, ":[z"),
            ]
        );
    }

    #[test]
    fn empty_brackets_are_swallowed() {
        assert_eq!(
            tokens_of("x[]y"),
            vec![FmtToken::with_data(TokenKind::Literal, "xy")]
        );
    }

    #[test]
    fn second_decimal_point_degrades_to_literal() {
        assert_eq!(
            tokens_of("0.0.0"),
            vec![
                FmtToken::with_data(TokenKind::NumInt, "0"),
                FmtToken::bare(TokenKind::NumDecSign),
                FmtToken::with_data(TokenKind::NumDec, "0"),
                FmtToken::with_data(TokenKind::Literal, "."),
                FmtToken::with_data(TokenKind::NumInt, "0"),
            ]
        );
    }

    #[test]
    fn trailing_pad_markers_are_literal() {
        assert_eq!(
            tokens_of("h_"),
            vec![
                FmtToken::sized(TokenKind::Hour, 1),
                FmtToken::with_data(TokenKind::Literal, "_"),
            ]
        );
    }

    #[test]
    fn slash_without_an_integer_pattern_is_dropped() {
        assert_eq!(
            tokens_of(".0/"),
            vec![
                FmtToken::bare(TokenKind::NumDecSign),
                FmtToken::with_data(TokenKind::NumDec, "0"),
            ]
        );
    }

    #[test]
    fn color_names() {
        assert!(is_color(b"red"));
        assert!(is_color(b"Red"));
        assert!(is_color(b"COLOR12"));
        assert!(!is_color(b"crimson"));
    }
}

//! Byte-level scanner primitives for the format tokenizers.
//!
//! These are total functions: there is no error channel, and malformed
//! fragments are dealt with at the parser layer by degrading to literal
//! text.

/// Read a maximal run of the byte at `input[0]`, returning the remainder,
/// the byte and the run length. `input` must be non-empty.
pub(crate) fn read_repeat(input: &[u8]) -> (&[u8], u8, usize) {
    let ch = input[0];
    let mut count = 1;
    while count < input.len() && input[count] == ch {
        count += 1;
    }
    (&input[count..], ch, count)
}

/// Read the maximal prefix of `input` whose bytes all appear in `allowed`.
pub(crate) fn read_chars<'a>(input: &'a [u8], allowed: &[u8]) -> (&'a [u8], &'a [u8]) {
    let end = input
        .iter()
        .position(|b| !allowed.contains(b))
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Read until the first unescaped `terminator`, which is consumed. A
/// preceding backslash escapes the terminator and is itself stripped.
/// Returns `(None, input)` when no terminator is found.
pub(crate) fn read_to_char(input: &[u8], terminator: u8) -> (Option<Vec<u8>>, &[u8]) {
    let mut txt = Vec::new();
    let mut rem = input;
    loop {
        let Some(i) = rem.iter().position(|&b| b == terminator) else {
            return (None, input);
        };
        if i == 0 || rem[i - 1] != b'\\' {
            txt.extend_from_slice(&rem[..i]);
            return (Some(txt), &rem[i + 1..]);
        }
        txt.extend_from_slice(&rem[..i - 1]); // drop the backslash
        txt.push(rem[i]); // keep the escaped terminator
        rem = &rem[i + 1..];
    }
}

/// Given input beginning with a backslash, yield the escaped byte verbatim.
/// A bare trailing backslash yields nothing.
pub(crate) fn skip_escape(input: &[u8]) -> (&[u8], &[u8]) {
    if input.len() > 1 {
        (&input[1..2], &input[2..])
    } else {
        (&input[..0], &input[..0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_repeat_runs() {
        let mut input: &[u8] = b"aaabbc";
        for expected in ["aaa", "bb", "c"] {
            let (rest, ch, count) = read_repeat(input);
            assert_eq!(ch, expected.as_bytes()[0]);
            assert_eq!(count, expected.len());
            input = rest;
        }
        assert!(input.is_empty());
    }

    #[test]
    fn read_chars_prefixes() {
        for (input, expected, rem) in [
            ("", "", ""),
            ("a", "a", ""),
            ("agh", "a", "gh"),
            ("abgh", "ab", "gh"),
            ("gh", "", "gh"),
        ] {
            let (out, rest) = read_chars(input.as_bytes(), b"ab");
            assert_eq!(out, expected.as_bytes(), "input={input:?}");
            assert_eq!(rest, rem.as_bytes(), "input={input:?}");
        }
    }

    #[test]
    fn read_to_char_terminators() {
        for (input, txt, rem) in [
            (r#"quoted""#, Some("quoted"), ""),
            (r#"quoted" string"#, Some("quoted"), " string"),
            (r#"quoted esc\"aped" string"#, Some(r#"quoted esc"aped"#), " string"),
            ("", None, ""),
            ("no term", None, "no term"),
        ] {
            let (out, rest) = read_to_char(input.as_bytes(), b'"');
            assert_eq!(
                out.as_deref(),
                txt.map(str::as_bytes),
                "txt mismatch input={input:?}"
            );
            assert_eq!(rest, rem.as_bytes(), "rem mismatch input={input:?}");
        }
    }

    #[test]
    fn read_to_char_unterminated_after_escape_keeps_input() {
        let (out, rest) = read_to_char(br#"a\"b"#, b'"');
        assert_eq!(out, None);
        assert_eq!(rest, &br#"a\"b"#[..]);
    }

    #[test]
    fn skip_escape_bytes() {
        for (input, esc, rem) in [(r"\foo", "f", "oo"), (r"\f", "f", ""), (r"\", "", "")] {
            let (txt, rest) = skip_escape(input.as_bytes());
            assert_eq!(txt, esc.as_bytes(), "txt mismatch input={input:?}");
            assert_eq!(rest, rem.as_bytes(), "rem mismatch input={input:?}");
        }
    }
}

//! Numeric helpers shared by the renderers: thousands grouping, zero
//! padding, fixed/scientific decomposition and rational approximation.

/// Insert a `,` every three digits, counting from the right.
pub(crate) fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}

/// Zero-pad `value` on the left to at least `width` digits.
pub(crate) fn left_pad_digits(width: usize, value: i64) -> String {
    format!("{value:0width$}")
}

/// Split `v` into integer, decimal and exponent string parts.
///
/// With `exp_prec >= 0` the value is rendered in scientific notation and the
/// exponent part keeps its `E±nn` skeleton; otherwise fixed notation with
/// `dec_prec` fractional digits. Trailing zeroes are trimmed from the
/// decimal part (the decimal pattern re-pads them as needed).
pub(crate) fn split_number(v: f64, exp_prec: i32, dec_prec: usize) -> (String, String, String) {
    let (mantissa, expval) = if exp_prec >= 0 {
        let sci = format!("{v:.dec_prec$e}");
        match sci.split_once('e') {
            Some((m, e)) => {
                let exp: i32 = e.parse().unwrap_or(0);
                (m.to_string(), format!("E{exp:+03}"))
            }
            None => (sci, String::new()),
        }
    } else {
        (format!("{v:.dec_prec$}"), String::new())
    };

    if dec_prec > 0 {
        match mantissa.split_once('.') {
            Some((intval, dec)) => {
                let decval = dec.trim_end_matches('0');
                (intval.to_string(), decval.to_string(), expval)
            }
            None => (mantissa, String::new(), expval),
        }
    } else {
        (mantissa, String::new(), expval)
    }
}

/// Closest rational `num/den` to `x >= 0` with `1 <= den <= max_denom`.
///
/// Walks the continued-fraction convergents of `x` (Eppstein's classic
/// `frap`) and returns the better of the last in-bound convergent and the
/// semi-convergent that saturates the denominator bound. Ties go to the
/// convergent, which has the smaller denominator.
pub(crate) fn rational_approx(x: f64, max_denom: i64) -> (i64, i64) {
    if max_denom < 1 || !x.is_finite() {
        return (0, 1);
    }

    // m holds the current and previous convergents as columns.
    let mut m = [[1i64, 0i64], [0i64, 1i64]];
    let mut v = x;
    loop {
        let ai = v as i64;
        let next_den = match m[1][0].checked_mul(ai).and_then(|t| t.checked_add(m[1][1])) {
            Some(d) if d <= max_denom => d,
            _ => break,
        };
        let next_num = match m[0][0].checked_mul(ai).and_then(|t| t.checked_add(m[0][1])) {
            Some(n) => n,
            None => break,
        };
        m[0][1] = m[0][0];
        m[0][0] = next_num;
        m[1][1] = m[1][0];
        m[1][0] = next_den;
        if v == ai as f64 {
            break;
        }
        v = 1.0 / (v - ai as f64);
        if !v.is_finite() {
            break;
        }
    }

    if m[1][0] == 0 {
        // the very first coefficient already overflowed
        return (x.round() as i64, 1);
    }

    let (n1, d1) = (m[0][0], m[1][0]);
    let err1 = (x - n1 as f64 / d1 as f64).abs();

    // semi-convergent completing the bound
    let ai = (max_denom - m[1][1]) / m[1][0];
    let n2 = match m[0][0].checked_mul(ai).and_then(|t| t.checked_add(m[0][1])) {
        Some(n) => n,
        None => return (n1, d1),
    };
    let d2 = match m[1][0].checked_mul(ai).and_then(|t| t.checked_add(m[1][1])) {
        Some(d) if d >= 1 => d,
        _ => return (n1, d1),
    };
    let err2 = (x - n2 as f64 / d2 as f64).abs();

    if err1 <= err2 {
        (n1, d1)
    } else {
        (n2, d2)
    }
}

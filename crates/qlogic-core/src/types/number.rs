//! Numeric parsing and formatting
//!
//! Survey expressions mix free-text answers and numbers, so there are two
//! parsing flavours: a strict one used when a whole string is coerced to a
//! number, and a prefix one used for literals and `intval`/`floatval`.

/// Parse a whole string as a number.
///
/// Surrounding whitespace is ignored and an empty string is `0`. Anything that
/// is not a complete decimal literal (or `Infinity`) is NaN.
pub fn parse_strict(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let well_formed = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the longest numeric prefix of a string (`"12abc"` is 12).
///
/// Returns NaN when the string does not start with a number.
pub fn parse_leading_float(s: &str) -> f64 {
    let text = s.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            end = j;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the longest base-10 integer prefix of a string (`"-3.9"` is -3).
///
/// Returns NaN when the string does not start with an integer.
pub fn parse_leading_int(s: &str) -> f64 {
    let text = s.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return f64::NAN;
    }

    let magnitude = text[digits_start..end].parse::<f64>().unwrap_or(f64::NAN);
    if text.starts_with('-') {
        -magnitude
    } else {
        magnitude
    }
}

/// Render a number the way survey text expects to see it.
///
/// Integral values print without a fractional part, `NaN` and `Infinity` print
/// by name, and very large or very small magnitudes use exponent notation
/// (`1e+21`, `1e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    format!("{}", n)
}

/// Round half toward positive infinity (`2.5` -> 3, `-2.5` -> -2).
pub fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format with a fixed number of decimals.
///
/// Rounding is half away from zero on the exact decimal expansion of the
/// double, so `1.005` (really 1.00499...) keeps `1.00` while `2.5` becomes `3`.
/// Non-finite values and magnitudes of 1e21 or more fall back to
/// [`format_number`].
pub fn to_fixed(x: f64, decimals: usize) -> String {
    if !x.is_finite() || x.abs() >= 1e21 {
        return format_number(x);
    }

    let negative = x < 0.0;
    // 1100 fractional digits covers the longest exact expansion of an f64.
    let exact = format!("{:.1100}", x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    while digits.len() < int_part.len() + decimals {
        digits.push(b'0');
    }

    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|digit| *digit >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| char::from(*d)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| char::from(*d)));
    }
    out
}

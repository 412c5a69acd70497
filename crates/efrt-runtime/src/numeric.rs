//! Numeric coercions
//!
//! Every operation here is total: domain errors turn into NaN or a signed
//! infinity, and values that must be finite (addresses, jump offsets,
//! character codes) are sanitized first.
//!
//! All functions follow IEEE 754 semantics otherwise:
//! - NaN propagates through arithmetic
//! - NaN never compares equal, even to itself
//! - `%` keeps the sign of the dividend

/// Replace NaN and infinities with `0.0`
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Division with explicit zero-divisor handling
///
/// `0 / 0` is NaN, `x / 0` is an infinity carrying the sign of `x`.
/// A NaN dividend over zero yields positive infinity.
pub fn divide(dividend: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        if dividend == 0.0 {
            f64::NAN
        } else if dividend < 0.0 {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    } else {
        dividend / divisor
    }
}

/// -1, 0 or 1 by sign; NaN stays NaN and both zeros give `0.0`
pub fn sign(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value < 0.0 {
        -1.0
    } else if value > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Square root, NaN for negative input
pub fn sqrt(value: f64) -> f64 {
    if value < 0.0 {
        f64::NAN
    } else {
        value.sqrt()
    }
}

/// Base-10 logarithm, NaN for negative input (`log10(0)` is -inf)
pub fn log10(value: f64) -> f64 {
    if value < 0.0 {
        f64::NAN
    } else {
        value.log10()
    }
}

/// `1.0` for true, `0.0` for false
#[inline]
pub fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Character written by the `C` opcode
///
/// Non-finite values print as code point 0, negative values by magnitude.
/// Code points that are not valid scalar values print as U+FFFD.
pub fn to_char(value: f64) -> char {
    let code = finite_or_zero(value).abs();
    char::from_u32(code as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Text written by the `N` opcode
///
/// ```
/// use efrt_runtime::numeric::format_number;
///
/// assert_eq!(format_number(104.0), "104");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(1e20), "1E+20");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        return format_scientific(value);
    }
    format!("{}", value)
}

/// `1.5E-05` style: upper-case E, explicit sign, at least two exponent digits
fn format_scientific(value: f64) -> String {
    let formatted = format!("{:E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

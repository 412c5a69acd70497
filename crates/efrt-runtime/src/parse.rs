//! Lenient decimal parsing for the `O` opcode
//!
//! Input lines are never rejected. Anything that is not part of a plain
//! decimal number is stripped before parsing, and a line without digits is
//! zero.

/// Parse a line of text into a number without ever failing
///
/// - `""` is `0.0`
/// - `Infinity`, `-Infinity` and `NaN` are recognized exactly (case-sensitive)
/// - otherwise only digits, one leading `-` and the first `.` are kept
///
/// ```
/// use efrt_runtime::parse_lenient;
///
/// assert_eq!(parse_lenient("  42 apples"), 42.0);
/// assert_eq!(parse_lenient("-1.2.3"), -1.23);
/// assert_eq!(parse_lenient("none"), 0.0);
/// ```
pub fn parse_lenient(text: &str) -> f64 {
    match text {
        "" => return 0.0,
        "Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        "NaN" => return f64::NAN,
        _ => {}
    }

    let mut kept = String::with_capacity(text.len());
    let mut has_dot = false;
    let mut has_digit = false;
    for ch in text.chars() {
        match ch {
            '0'..='9' => {
                has_digit = true;
                kept.push(ch);
            }
            '-' if kept.is_empty() => kept.push(ch),
            '.' if !has_dot => {
                has_dot = true;
                kept.push(ch);
            }
            _ => {}
        }
    }

    if !has_digit {
        return 0.0;
    }
    kept.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0.0)]
    #[case("12", 12.0)]
    #[case("-12", -12.0)]
    #[case("3.25", 3.25)]
    #[case(".5", 0.5)]
    #[case("7.", 7.0)]
    #[case("1,000", 1000.0)]
    #[case("abc", 0.0)]
    #[case("-", 0.0)]
    #[case("--5", -5.0)]
    #[case("5-3", 53.0)]
    #[case("1e5", 15.0)]
    #[case("x-9", -9.0)]
    #[case("infinity", 0.0)]
    #[case(" 8 ", 8.0)]
    fn test_parse_lenient(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_lenient(input), expected);
    }

    #[test]
    fn test_special_literals() {
        assert_eq!(parse_lenient("Infinity"), f64::INFINITY);
        assert_eq!(parse_lenient("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_lenient("NaN").is_nan());
        assert_eq!(parse_lenient("nan"), 0.0);
    }
}

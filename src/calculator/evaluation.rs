//! Operand evaluation.
//!
//! Operands are kept as strings in the calculator state; this module parses
//! them, applies the pending operation and turns the result back into the
//! canonical decimal string that is stored as the next operand.

use super::state::Operation;

/// Values at or above this magnitude are written in exponent form.
const EXPONENT_UPPER: f64 = 1e21;
/// Values below this magnitude (other than zero) are written in exponent form.
const EXPONENT_LOWER: f64 = 1e-6;

/// Apply `operation` to the two operands.
///
/// Returns an empty string if either operand is missing or not a number, or
/// if there is no operation to apply. Division by zero is not special-cased:
/// the IEEE result (`Infinity`, `-Infinity`, `NaN`) is returned as text.
pub fn evaluate(previous: Option<&str>, current: Option<&str>, operation: Option<Operation>) -> String {
    let (Some(lhs), Some(rhs)) = (parse_operand(previous), parse_operand(current)) else {
        return String::new();
    };

    match operation {
        Some(op) => number_to_string(op.apply(lhs, rhs)),
        None => String::new(),
    }
}

/// Parse an operand as a locale-invariant float, rejecting NaN.
///
/// The only word accepted is `Infinity`, optionally signed; spellings such as
/// `inf` or `nan` that `f64::from_str` would take are rejected.
pub fn parse_operand(operand: Option<&str>) -> Option<f64> {
    let operand = operand?.trim();
    let unsigned = operand.trim_start_matches(['+', '-']);

    if unsigned == "Infinity" {
        return operand.parse::<f64>().ok();
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    operand.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Format a number in its canonical shortest form.
///
/// Integers print without a fractional part, negative zero prints as `0`,
/// and very large or very small magnitudes use `1e+21` / `1e-7` notation.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate(Some("2"), Some("3"), Some(Operation::Add)), "5");
        assert_eq!(evaluate(Some("10"), Some("4"), Some(Operation::Subtract)), "6");
        assert_eq!(evaluate(Some("6"), Some("7"), Some(Operation::Multiply)), "42");
        assert_eq!(evaluate(Some("9"), Some("4"), Some(Operation::Divide)), "2.25");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate(Some("1"), Some("0"), Some(Operation::Divide)), "Infinity");
        assert_eq!(
            evaluate(Some("-1"), Some("0"), Some(Operation::Divide)),
            "-Infinity"
        );
        assert_eq!(evaluate(Some("0"), Some("0"), Some(Operation::Divide)), "NaN");
    }

    #[test]
    fn test_unparsable_operands() {
        assert_eq!(evaluate(None, Some("3"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("2"), None, Some(Operation::Add)), "");
        assert_eq!(evaluate(Some(""), Some("3"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("."), Some("3"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("NaN"), Some("3"), Some(Operation::Add)), "");
    }

    #[test]
    fn test_only_infinity_word_accepted() {
        assert_eq!(evaluate(Some("inf"), Some("1"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("infinity"), Some("1"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("nan"), Some("1"), Some(Operation::Add)), "");
        assert_eq!(evaluate(Some("-Infinity"), Some("1"), Some(Operation::Add)), "-Infinity");
        assert_eq!(parse_operand(Some("Infinity")), Some(f64::INFINITY));
        assert_eq!(parse_operand(Some("1.5e-7")), Some(1.5e-7));
    }

    #[test]
    fn test_missing_operation() {
        assert_eq!(evaluate(Some("2"), Some("3"), None), "");
    }

    #[test]
    fn test_partial_decimals() {
        assert_eq!(evaluate(Some("5."), Some(".5"), Some(Operation::Add)), "5.5");
    }

    #[test]
    fn test_chained_results_parse() {
        assert_eq!(
            evaluate(Some("Infinity"), Some("1"), Some(Operation::Subtract)),
            "Infinity"
        );
        assert_eq!(evaluate(Some("1e+21"), Some("10"), Some(Operation::Divide)), "100000000000000000000");
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(8.0), "8");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(-2.5e22), "-2.5e+22");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(0.000001), "0.000001");
        assert_eq!(number_to_string(123456789.0), "123456789");
    }
}

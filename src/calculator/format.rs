//! Display formatting for operands.

use serde::Serialize;

use super::state::CalculatorState;

/// Default thousands separator.
pub const GROUP_SEPARATOR: char = ',';

/// Format an operand for display with thousand separators.
///
/// Only the integer part is grouped; the fractional part is appended as typed,
/// so a trailing `.` or trailing zeros survive. Returns `None` when there is
/// no operand to show.
pub fn format_operand(operand: Option<&str>) -> Option<String> {
    format_operand_with(operand, GROUP_SEPARATOR)
}

/// Like [`format_operand`], with a custom group separator.
pub fn format_operand_with(operand: Option<&str>, separator: char) -> Option<String> {
    let operand = operand?;

    let formatted = match operand.split_once('.') {
        Some((integer, decimal)) => {
            format!("{}.{}", format_integer(integer, separator), decimal)
        }
        None => format_integer(operand, separator),
    };
    Some(formatted)
}

/// Group the digits of an integer string.
///
/// Redundant leading zeros are dropped and an empty integer part reads as
/// `0`. Whole numbers in exponent form (`1e+21`) are written out in full.
/// Anything else that is not an optionally signed run of digits (`Infinity`,
/// `NaN`) is returned unchanged.
fn format_integer(integer: &str, separator: char) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let expanded = expand_exponent(digits);
    let digits = expanded.as_deref().unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return integer.to_string();
    }

    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }

    let formatted: String = result.chars().rev().collect();
    format!("{}{}", sign, formatted)
}

/// Expand `<digits>e+<n>` into a plain digit string.
fn expand_exponent(digits: &str) -> Option<String> {
    let (mantissa, exponent) = digits.split_once("e+")?;
    if mantissa.is_empty() || !mantissa.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let zeros: usize = exponent.parse().ok()?;
    Some(format!("{}{}", mantissa, "0".repeat(zeros)))
}

/// The two display lines rendered from a state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Formatted previous operand followed by the pending operation symbol.
    pub previous: String,
    /// Formatted current operand.
    pub current: String,
}

impl Readout {
    pub fn from_state(state: &CalculatorState) -> Self {
        Self::from_state_with(state, GROUP_SEPARATOR)
    }

    pub fn from_state_with(state: &CalculatorState, separator: char) -> Self {
        let previous = format_operand_with(state.previous_operand.as_deref(), separator);
        let operation = state.operation.map(|op| op.symbol());

        let previous = match (previous, operation) {
            (Some(operand), Some(symbol)) => format!("{} {}", operand, symbol),
            (Some(operand), None) => operand,
            (None, Some(symbol)) => symbol.to_string(),
            (None, None) => String::new(),
        };

        Self {
            previous,
            current: format_operand_with(state.current_operand.as_deref(), separator)
                .unwrap_or_default(),
        }
    }
}

//! Calculator state and the reducer that drives it.
//!
//! Every keypad action produces a brand-new [`CalculatorState`]; nothing is
//! mutated in place. Incomplete or redundant input leaves the state unchanged.

use serde::Serialize;
use std::fmt;

use super::evaluation::evaluate;

/// A binary operator the calculator can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operation {
    /// All operations, in keypad order.
    pub const ALL: [Operation; 4] = [
        Operation::Divide,
        Operation::Multiply,
        Operation::Add,
        Operation::Subtract,
    ];

    /// The symbol shown next to the previous operand.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "÷",
        }
    }

    /// Look up an operation by its display symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single keypad digit: `0`-`9` or the decimal point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(char);

impl Digit {
    pub const ZERO: Digit = Digit('0');
    pub const POINT: Digit = Digit('.');

    /// Returns `None` for anything that is not an ASCII digit or `.`.
    pub fn new(c: char) -> Option<Self> {
        (c.is_ascii_digit() || c == '.').then_some(Self(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

/// An input event from the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    AddDigit(Digit),
    ChooseOperation(Operation),
    Clear,
    DeleteDigit,
    Evaluate,
}

/// Snapshot of everything the calculator knows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    /// The operand being typed, or the last result.
    pub current_operand: Option<String>,
    /// The committed operand waiting for an operation.
    pub previous_operand: Option<String>,
    /// The pending operator.
    pub operation: Option<Operation>,
    /// When set, the next digit replaces `current_operand` instead of extending it.
    pub overwrite: bool,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the pending operation against the two operands.
    pub fn evaluate(&self) -> String {
        evaluate(
            self.previous_operand.as_deref(),
            self.current_operand.as_deref(),
            self.operation,
        )
    }
}

/// Compute the state that follows `state` after `action`.
pub fn reduce(state: &CalculatorState, action: Action) -> CalculatorState {
    match action {
        Action::AddDigit(digit) => add_digit(state, digit),
        Action::Clear => CalculatorState::default(),
        Action::ChooseOperation(operation) => choose_operation(state, operation),
        Action::Evaluate => evaluate_pending(state),
        Action::DeleteDigit => delete_digit(state),
    }
}

fn add_digit(state: &CalculatorState, digit: Digit) -> CalculatorState {
    if state.overwrite {
        return CalculatorState {
            current_operand: Some(digit.as_char().to_string()),
            overwrite: false,
            ..state.clone()
        };
    }

    let current = state.current_operand.as_deref();
    if digit == Digit::ZERO && current == Some("0") {
        return state.clone();
    }
    if digit == Digit::POINT && current.is_some_and(|c| c.contains('.')) {
        return state.clone();
    }

    let mut next = current.unwrap_or_default().to_string();
    next.push(digit.as_char());
    CalculatorState {
        current_operand: Some(next),
        ..state.clone()
    }
}

fn choose_operation(state: &CalculatorState, operation: Operation) -> CalculatorState {
    match (&state.previous_operand, &state.current_operand) {
        (None, None) => state.clone(),
        (None, Some(current)) => CalculatorState {
            previous_operand: Some(current.clone()),
            current_operand: None,
            operation: Some(operation),
            ..state.clone()
        },
        // Swapping the operator keeps the pending operand.
        (Some(_), None) => CalculatorState {
            operation: Some(operation),
            ..state.clone()
        },
        (Some(_), Some(_)) => CalculatorState {
            previous_operand: Some(state.evaluate()),
            current_operand: None,
            operation: Some(operation),
            ..state.clone()
        },
    }
}

fn evaluate_pending(state: &CalculatorState) -> CalculatorState {
    if state.operation.is_none()
        || state.current_operand.is_none()
        || state.previous_operand.is_none()
    {
        return state.clone();
    }

    CalculatorState {
        current_operand: Some(state.evaluate()),
        previous_operand: None,
        operation: None,
        overwrite: true,
    }
}

fn delete_digit(state: &CalculatorState) -> CalculatorState {
    if state.overwrite {
        return CalculatorState {
            current_operand: None,
            overwrite: false,
            ..state.clone()
        };
    }

    let Some(current) = state.current_operand.as_deref() else {
        return state.clone();
    };

    let mut chars = current.chars();
    chars.next_back();
    let trimmed = chars.as_str();

    CalculatorState {
        current_operand: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        ..state.clone()
    }
}

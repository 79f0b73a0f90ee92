//! Keypad calculator core.
//!
//! This module provides functionality to:
//! - Reduce keypad actions into a new calculator state
//! - Evaluate the pending operation between two operands
//! - Format operands for display

mod evaluation;
mod format;
mod state;

pub use evaluation::{evaluate, number_to_string, parse_operand};
pub use format::{GROUP_SEPARATOR, Readout, format_operand, format_operand_with};
pub use state::{Action, CalculatorState, Digit, Operation, reduce};

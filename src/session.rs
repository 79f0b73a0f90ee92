//! A running calculator session.
//!
//! Owns the single calculator state and replaces it on every dispatched
//! action. Each action runs to completion before the next one is taken.

use tracing::{debug, trace};

use crate::calculator::{Action, CalculatorState, GROUP_SEPARATOR, Readout, reduce};
use crate::keypad::{KeyError, tokenize};

#[derive(Debug)]
pub struct Session {
    state: CalculatorState,
    separator: char,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GROUP_SEPARATOR)
    }
}

impl Session {
    pub fn new(separator: char) -> Self {
        Self {
            state: CalculatorState::new(),
            separator,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn readout(&self) -> Readout {
        Readout::from_state_with(&self.state, self.separator)
    }

    /// Apply one action and return the new state.
    pub fn dispatch(&mut self, action: Action) -> &CalculatorState {
        self.state = reduce(&self.state, action);
        debug!(?action, state = ?self.state, "dispatched");
        &self.state
    }

    /// Feed a line of typed keys. A blank line evaluates.
    ///
    /// Returns the keys that could not be read; every other key is applied.
    pub fn feed(&mut self, line: &str) -> Vec<KeyError> {
        if line.trim().is_empty() {
            self.dispatch(Action::Evaluate);
            return Vec::new();
        }

        let mut errors = Vec::new();
        for key in tokenize(line) {
            match key {
                Ok(action) => {
                    self.dispatch(action);
                }
                Err(e) => {
                    trace!(error = %e, "rejected key");
                    errors.push(e);
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operation;

    #[test]
    fn test_feed_sequence() {
        let mut session = Session::default();
        assert!(session.feed("AC 5 + 3 =").is_empty());
        let state = session.state();
        assert_eq!(state.current_operand.as_deref(), Some("8"));
        assert!(state.overwrite);
        assert_eq!(state.previous_operand, None);
        assert_eq!(state.operation, None);
    }

    #[test]
    fn test_feed_across_lines() {
        let mut session = Session::default();
        session.feed("1200");
        session.feed("*");
        assert_eq!(session.readout().previous, "1,200 *");
        assert_eq!(session.readout().current, "");
        session.feed("3");
        session.feed("");
        assert_eq!(session.readout().current, "3,600");
    }

    #[test]
    fn test_feed_reports_unknown_keys() {
        let mut session = Session::default();
        let errors = session.feed("9 ? 1");
        assert_eq!(errors, vec![KeyError::UnknownKey("?".to_string())]);
        assert_eq!(session.state().current_operand.as_deref(), Some("91"));
    }

    #[test]
    fn test_result_is_overwritten_by_next_digit() {
        let mut session = Session::default();
        session.feed("2*3=4");
        assert_eq!(session.state().current_operand.as_deref(), Some("4"));
    }

    #[test]
    fn test_chained_operations() {
        let mut session = Session::default();
        session.feed("2+3*4=");
        // No precedence: (2 + 3) * 4.
        assert_eq!(session.state().current_operand.as_deref(), Some("20"));
    }

    #[test]
    fn test_dispatch_and_separator() {
        let mut session = Session::new(' ');
        session.feed("1234567");
        session.dispatch(Action::ChooseOperation(Operation::Divide));
        assert_eq!(session.readout().previous, "1 234 567 ÷");
    }

    #[test]
    fn test_huge_result_readout_is_grouped() {
        let mut session = Session::default();
        session.feed("100000000000000000000*10=");
        assert_eq!(session.state().current_operand.as_deref(), Some("1e+21"));
        assert_eq!(session.readout().current, "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_divide_by_zero_readout() {
        let mut session = Session::default();
        session.feed("1/0=");
        assert_eq!(session.readout().current, "Infinity");
    }
}

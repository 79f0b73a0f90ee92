//! Keypad input parsing.
//!
//! Turns typed key tokens into calculator actions. Tokens may be run together
//! (`12+3=`) or separated by whitespace (`12 + 3 =`).

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::calculator::{Action, Digit, Operation};

lazy_static! {
    /// Matches a single key token. Word keys come first so `AC` is not read as `A`, `C`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)AC|DEL|[0-9.+\-*/÷=CD]"
    ).unwrap();
}

/// Errors produced while reading keypad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),
}

/// Parse a single key token.
pub fn parse_key(token: &str) -> Result<Action, KeyError> {
    match token.to_ascii_uppercase().as_str() {
        "AC" | "C" => return Ok(Action::Clear),
        "DEL" | "D" => return Ok(Action::DeleteDigit),
        "=" => return Ok(Action::Evaluate),
        _ => {}
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match Digit::new(c) {
            Some(digit) => Ok(Action::AddDigit(digit)),
            None => parse_operation(token).map(Action::ChooseOperation),
        },
        _ => Err(KeyError::UnknownKey(token.to_string())),
    }
}

/// Parse an operation symbol. `/` is accepted as a typing shortcut for `÷`.
pub fn parse_operation(symbol: &str) -> Result<Operation, KeyError> {
    if symbol == "/" {
        return Ok(Operation::Divide);
    }
    Operation::from_symbol(symbol).ok_or_else(|| KeyError::UnknownOperation(symbol.to_string()))
}

/// Split a line of input into actions.
///
/// Unrecognised characters yield an error in place; the remaining keys are
/// still returned so one typo does not discard the whole line.
pub fn tokenize(line: &str) -> Vec<Result<Action, KeyError>> {
    let mut keys = Vec::new();
    let mut last_end = 0;

    for m in KEY_TOKEN.find_iter(line) {
        push_unknown(&line[last_end..m.start()], &mut keys);
        keys.push(parse_key(m.as_str()));
        last_end = m.end();
    }
    push_unknown(&line[last_end..], &mut keys);

    keys
}

fn push_unknown(gap: &str, keys: &mut Vec<Result<Action, KeyError>>) {
    for word in gap.split_whitespace() {
        keys.push(Err(KeyError::UnknownKey(word.to_string())));
    }
}

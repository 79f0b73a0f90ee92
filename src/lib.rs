//! A small keypad calculator.
//!
//! [`calculator`] holds the pure core: the state reducer, the evaluator and
//! the display formatter. [`keypad`] and [`session`] adapt it to typed input.

pub mod calculator;
pub mod config;
pub mod keypad;
pub mod session;

//! Tests for the step machine
//!
//! Organized by component: scanner, stack/storage, opcodes, control flow,
//! whole programs.

mod helpers;

mod control_tests;
mod scanner_tests;

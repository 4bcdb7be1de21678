//! Test helpers
//!
//! Common utilities for loading programs and running them to completion.

use crate::machine::exec_loop::run_until_done;
use crate::machine::errors::RuntimeError;
use crate::machine::vm::Machine;

/// Load `source` into a fresh machine and run it to completion, panicking
/// on any runtime error.
pub fn run_program(source: &str) -> Machine {
    let mut m = Machine::new();
    m.load(source);
    run_until_done(&mut m).expect("program failed");
    m
}

/// Load `source` with `input` available to `^` and run to completion.
pub fn run_program_with_input(source: &str, input: &str) -> Machine {
    let mut m = Machine::new();
    m.load(source);
    m.feed_input(input);
    run_until_done(&mut m).expect("program failed");
    m
}

/// Load `source` and run until it fails, returning the machine and the
/// terminal error.
pub fn run_program_err(source: &str) -> (Machine, RuntimeError) {
    let mut m = Machine::new();
    m.load(source);
    let err = run_until_done(&mut m).expect_err("program unexpectedly succeeded");
    (m, err)
}

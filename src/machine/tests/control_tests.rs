//! Tests for the control constructs: apply, conditional, while, breakpoint,
//! step granularity, and resumption chain behavior.

use super::helpers::{run_program, run_program_err};
use crate::machine::errors::RuntimeError;
use crate::machine::exec_loop::{run_batch, step};
use crate::machine::vm::{Machine, MachineState, Step};

#[test]
fn test_apply() {
    assert_eq!(run_program("[1 2+]!.").output(), "3");
}

#[test]
fn test_apply_nested() {
    assert_eq!(run_program("[[3]!]!.").output(), "3");
}

#[test]
fn test_apply_deep_nesting_does_not_recurse() {
    // 40 levels of nested apply; the host stack must not be involved.
    let mut program = String::new();
    for _ in 0..40 {
        program.push('[');
    }
    program.push('7');
    for _ in 0..40 {
        program.push_str("]!");
    }
    program.push('.');
    assert_eq!(run_program(&program).output(), "7");
}

#[test]
fn test_apply_non_code_is_type_error() {
    let (_, err) = run_program_err("5!");
    assert!(matches!(
        err,
        RuntimeError::TypeError { expected: "function", .. }
    ));
}

#[test]
fn test_conditional_true_enters_branch() {
    assert_eq!(run_program("1 1=[\"yes\"]?").output(), "yes");
}

#[test]
fn test_conditional_false_skips_branch() {
    let m = run_program("1 2=[\"yes\"]?\"after\"");
    assert_eq!(m.output(), "after");
}

#[test]
fn test_while_counts_up() {
    // Start at 1, increment while not greater than 9.
    assert_eq!(run_program("1[$9>~][1+]#.").output(), "10");
}

#[test]
fn test_while_zero_iterations() {
    assert_eq!(run_program("0[$0>][1-]#.").output(), "0");
}

#[test]
fn test_while_body_and_condition_share_stack() {
    // Sum 1..=5 in storage while counting down.
    let m = run_program("0s: 5[$0>][$s;+s: 1-]#%s;.");
    assert_eq!(m.output(), "15");
}

#[test]
fn test_while_resumption_depth_stays_bounded() {
    let mut m = Machine::new();
    m.load("1[$99>~][1+]#.");

    let mut max_depth = 0;
    loop {
        match step(&mut m).expect("program failed") {
            Step::Done => break,
            _ => {}
        }
        if let Some(r) = &m.resumption {
            max_depth = max_depth.max(r.depth());
        }
    }

    assert_eq!(m.output(), "100");
    // Depth is a small constant regardless of iteration count: the loop
    // rebuilds its cycle instead of chaining onto it.
    assert!(max_depth <= 6, "resumption chain grew to {}", max_depth);
}

#[test]
fn test_breakpoint_reports_paused() {
    let mut m = Machine::new();
    m.load("1`2+.");

    let mut paused = 0;
    loop {
        match step(&mut m).expect("program failed") {
            Step::Paused => paused += 1,
            Step::Done => break,
            Step::Continue => {}
        }
    }

    assert_eq!(paused, 1);
    assert_eq!(m.output(), "3");
}

#[test]
fn test_step_counts_one_unit_per_tick() {
    let mut m = Machine::new();
    m.load("1 2+");
    // Units: "1", " ", "2", "+".
    for expected in 1..=4u64 {
        assert_eq!(step(&mut m).unwrap(), Step::Continue);
        assert_eq!(m.step_count(), expected);
    }
    assert_eq!(step(&mut m).unwrap(), Step::Done);
    assert_eq!(m.step_count(), 4);
}

#[test]
fn test_function_return_does_not_consume_a_step() {
    let m = run_program("[1]!.");
    // "[1]" push, "!", "1", "." - unwinding out of the function is free.
    assert_eq!(m.step_count(), 4);
}

#[test]
fn test_batched_stepping_matches_single_stepping() {
    let mut single = Machine::new();
    single.load("1[$9>~][1+]#.");
    crate::machine::exec_loop::run_until_done(&mut single).unwrap();

    let mut batched = Machine::new();
    batched.load("1[$9>~][1+]#.");
    loop {
        if run_batch(&mut batched, 30).unwrap() == Step::Done {
            break;
        }
    }

    assert_eq!(single.output(), batched.output());
    assert_eq!(single.step_count(), batched.step_count());
}

#[test]
fn test_state_machine_transitions() {
    let mut m = Machine::new();
    assert_eq!(m.state(), MachineState::Idle);
    // Stepping an idle machine does nothing.
    assert_eq!(step(&mut m).unwrap(), Step::Done);

    m.load("1.");
    assert_eq!(m.state(), MachineState::Ready);

    crate::machine::exec_loop::run_until_done(&mut m).unwrap();
    assert_eq!(m.state(), MachineState::Terminated);

    // Terminated is absorbing until reset.
    assert_eq!(step(&mut m).unwrap(), Step::Done);
    assert_eq!(m.state(), MachineState::Terminated);

    m.reset();
    assert_eq!(m.state(), MachineState::Idle);
    assert_eq!(m.step_count(), 0);
    assert_eq!(m.output(), "");
    assert!(m.stack.is_empty());
    assert!(m.storage.is_empty());
}

#[test]
fn test_fatal_error_terminates_and_clears_resumption() {
    let mut m = Machine::new();
    m.load("1 0/");
    let err = crate::machine::exec_loop::run_until_done(&mut m).unwrap_err();
    assert_eq!(err, RuntimeError::DivisionByZero);
    assert_eq!(m.state(), MachineState::Terminated);
    assert!(m.resumption.is_none());
}

//! Core execution loop
//!
//! `step()` is the heart of the interpreter: it performs exactly one unit
//! of work (one literal, one opcode, or entry into a nested function) and
//! installs the resumption describing what runs next. Function returns and
//! the while-loop test are unwound inside the same tick, so they never
//! consume a step of their own, and no host recursion happens anywhere.
//!
//! Drivers layer policy on top of the one-step contract: `run_until_done`
//! steps through breakpoints, `run_batch` trades responsiveness for
//! throughput. Semantics are identical either way.

use std::rc::Rc;

use super::errors::RuntimeError;
use super::opcodes::{execute_opcode, OpEffect};
use super::resume::Resumption;
use super::scanner::{scan, Token};
use super::vm::{Machine, MachineState, Step};

/* ===================== Public API ===================== */

/// Run the machine until it completes.
///
/// Breakpoints are stepped through; a driver that wants to honor them
/// should call `step` itself and inspect the result.
pub fn run_until_done(m: &mut Machine) -> Result<(), RuntimeError> {
    loop {
        match step(m)? {
            Step::Continue | Step::Paused => continue,
            Step::Done => return Ok(()),
        }
    }
}

/// Run at most `count` steps, stopping early on a breakpoint or
/// completion. Returns the last step result.
pub fn run_batch(m: &mut Machine, count: u64) -> Result<Step, RuntimeError> {
    let mut last = Step::Continue;
    for _ in 0..count {
        last = step(m)?;
        if last != Step::Continue {
            break;
        }
    }
    Ok(last)
}

/// Execute one step of the machine.
///
/// On `Err` the machine has already transitioned to `Terminated`; the
/// failing operation left stack and storage consistent (typed-pop failures
/// restore the popped value).
pub fn step(m: &mut Machine) -> Result<Step, RuntimeError> {
    if m.state != MachineState::Ready {
        return Ok(Step::Done);
    }
    match step_inner(m) {
        Ok(Step::Done) => {
            m.state = MachineState::Terminated;
            m.resumption = None;
            Ok(Step::Done)
        }
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            m.state = MachineState::Terminated;
            m.resumption = None;
            Err(e)
        }
    }
}

/* ===================== Step Internals ===================== */

fn step_inner(m: &mut Machine) -> Result<Step, RuntimeError> {
    loop {
        let Some(r) = m.resumption.clone() else {
            return Ok(Step::Done);
        };

        match &*r {
            Resumption::Done => return Ok(Step::Done),

            Resumption::Advance { source, pos, next } => {
                if *pos >= source.len() {
                    // Function exhausted: return to the caller without
                    // consuming a step.
                    m.resumption = Some(next.clone());
                    continue;
                }
                return exec_unit(m, source.clone(), *pos, next.clone());
            }

            Resumption::Enter { code, next } => {
                m.active_source = code.clone();
                m.active_pos = 0;
                if code.is_empty() {
                    m.resumption = Some(next.clone());
                    continue;
                }
                return exec_unit(m, code.clone(), 0, next.clone());
            }

            Resumption::LoopTest { cond, body, after } => {
                // Turn point of a while loop. Rebuilt from fresh nodes each
                // iteration, so chain depth stays constant.
                if m.stack.pop_bool()? {
                    let again = Resumption::loop_test(cond.clone(), body.clone(), after.clone());
                    let recheck = Resumption::enter(cond.clone(), again);
                    m.resumption = Some(Resumption::enter(body.clone(), recheck));
                } else {
                    m.resumption = Some(after.clone());
                }
                continue;
            }
        }
    }
}

/// Execute exactly one classified unit at `pos` in `source`.
fn exec_unit(
    m: &mut Machine,
    source: Rc<str>,
    pos: usize,
    next: Rc<Resumption>,
) -> Result<Step, RuntimeError> {
    m.step_count += 1;

    let scanned = scan(&source[pos..])?;
    let after = pos + scanned.len;
    let mut outcome = Step::Continue;
    let mut installed = None;

    match scanned.token {
        Token::Int(n) => m.stack.push_int(n),
        Token::Name(name) => m.stack.push_text(name),
        Token::CharCode(n) => m.stack.push_int(n),
        Token::Emit(text) => m.output.push_str(&text),
        Token::Comment => {}
        Token::Quote(code) => m.stack.push_code(code),
        Token::Opcode(op) => {
            let ret = Resumption::advance(source.clone(), after, next.clone());
            match execute_opcode(m, op, &ret)? {
                OpEffect::Continue => {}
                OpEffect::Pause => outcome = Step::Paused,
                OpEffect::Install(r) => installed = Some(r),
            }
        }
    }

    match installed {
        Some(r) => m.resumption = Some(r),
        None => {
            m.active_source = source.clone();
            m.active_pos = after;
            m.resumption = Some(Resumption::advance(source, after, next));
        }
    }

    Ok(outcome)
}

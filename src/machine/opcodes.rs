//! Opcode handlers
//!
//! Each single-character opcode pops its operands, computes and pushes its
//! result. The control opcodes (`!`, `?`, `#`) are the only ones that touch
//! control flow, and they do it by installing resumptions rather than
//! recursing: the step loop returns to the driver and the installed
//! resumption runs on the next tick.

use std::rc::Rc;
use tracing::{debug, warn};

use super::errors::RuntimeError;
use super::resume::Resumption;
use super::vm::Machine;

/// How an opcode affects control flow.
#[derive(Debug, Clone)]
pub(crate) enum OpEffect {
    /// Fall through to the next token (`ret`).
    Continue,
    /// Install this resumption instead of advancing.
    Install(Rc<Resumption>),
    /// Fall through, but report a breakpoint to the driver.
    Pause,
}

/// Execute one opcode. `ret` is the resumption that resumes scanning just
/// past the opcode in the current function.
pub(crate) fn execute_opcode(
    m: &mut Machine,
    op: char,
    ret: &Rc<Resumption>,
) -> Result<OpEffect, RuntimeError> {
    match op {
        /* ===================== Arithmetic ===================== */
        '+' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(b.wrapping_add(a));
        }
        '-' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(b.wrapping_sub(a));
        }
        '_' => {
            let a = m.stack.pop_int()?;
            m.stack.push_int(a.wrapping_neg());
        }
        '*' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(b.wrapping_mul(a));
        }
        '/' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            if a == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // Truncates toward zero; wrapping covers i64::MIN / -1.
            m.stack.push_int(b.wrapping_div(a));
        }

        /* ===================== Comparison ===================== */
        '=' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_bool(b == a);
        }
        '>' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_bool(b > a);
        }

        /* ===================== Boolean ===================== */
        '~' => {
            let a = m.stack.pop_bool()?;
            m.stack.push_bool(!a);
        }
        '&' => {
            let a = m.stack.pop_bool()?;
            let b = m.stack.pop_bool()?;
            m.stack.push_bool(a && b);
        }
        '|' => {
            let a = m.stack.pop_bool()?;
            let b = m.stack.pop_bool()?;
            m.stack.push_bool(a || b);
        }

        /* ===================== Bitwise ===================== */
        '¬' => {
            let a = m.stack.pop_int()?;
            m.stack.push_int(!a);
        }
        '∧' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(a & b);
        }
        '∨' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(a | b);
        }
        '⩒' => {
            let a = m.stack.pop_int()?;
            let b = m.stack.pop_int()?;
            m.stack.push_int(a ^ b);
        }

        /* ===================== Stack Shuffling ===================== */
        '$' => m.stack.dup()?,
        '%' => m.stack.discard()?,
        '\\' => m.stack.swap()?,
        '@' => m.stack.rotate3()?,
        'ø' => {
            let n = m.stack.pop_int()?;
            m.stack.pick(n)?;
        }
        '®' => {
            let n = m.stack.pop_int()?;
            m.stack.roll(n)?;
        }

        /* ===================== Storage ===================== */
        ':' => {
            let name = m.stack.pop_text()?;
            let value = m.stack.pop()?;
            m.storage.define(name, value);
        }
        ';' => {
            let name = m.stack.pop_text()?;
            let value = m.storage.lookup(&name)?;
            m.stack.push(value);
        }

        /* ===================== Control ===================== */
        '!' => {
            let code = m.stack.pop_code()?;
            return Ok(OpEffect::Install(Resumption::enter(code, ret.clone())));
        }
        '?' => {
            let code = m.stack.pop_code()?;
            let cond = m.stack.pop_bool()?;
            if cond {
                return Ok(OpEffect::Install(Resumption::enter(code, ret.clone())));
            }
        }
        '#' => {
            let body = m.stack.pop_code()?;
            let cond = m.stack.pop_code()?;
            let test = Resumption::loop_test(cond.clone(), body, ret.clone());
            return Ok(OpEffect::Install(Resumption::enter(cond, test)));
        }

        /* ===================== I/O ===================== */
        '.' => {
            let n = m.stack.pop_int()?;
            m.output.push_str(&n.to_string());
        }
        ',' => {
            let n = m.stack.pop_int()?;
            let c = u32::try_from(n)
                .ok()
                .filter(|&u| u <= 0xFFFF)
                .and_then(char::from_u32)
                .ok_or(RuntimeError::RangeError {
                    op: "opcode ','",
                    arg: n.to_string(),
                })?;
            m.output.push(c);
        }
        '^' => {
            let n = m.input.pop_front().map(|c| c as i64).unwrap_or(-1);
            m.stack.push_int(n);
        }
        'ß' => {
            debug!("opcode 'ß' (flush I/O) ignored");
        }

        /* ===================== Diagnostics ===================== */
        '`' => {
            warn!("breakpoint encountered");
            return Ok(OpEffect::Pause);
        }
        ']' | '}' => {
            warn!(opcode = %op, "unbalanced bracket encountered, ignoring it");
        }
        c if c.is_whitespace() => {}
        other => {
            warn!(character = %other, "invalid character in program, ignoring it");
        }
    }

    Ok(OpEffect::Continue)
}

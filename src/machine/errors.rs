//! Runtime error taxonomy
//!
//! Every variant here is fatal to the run: the machine transitions to
//! `Terminated` and the error is surfaced to the driver exactly once.
//! Recoverable conditions (stray brackets, unknown characters) are logged
//! through `tracing` instead and never appear here.

use thiserror::Error;

/// Fatal runtime errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("attempt to pop on empty stack")]
    StackUnderflow,

    /// A typed pop found a value it cannot coerce. The popped value is
    /// pushed back before this is returned, so the stack is unchanged.
    #[error("type error: {found} found when {expected} expected")]
    TypeError {
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument {arg} out of range for {op}")]
    RangeError { op: &'static str, arg: String },

    #[error("attempt to retrieve uninitialised variable '{0}'")]
    UndefinedVariable(String),

    #[error("attempt to divide by zero")]
    DivisionByZero,

    #[error("literal character missing after ' opcode, end of input reached")]
    UnexpectedEndOfInput,

    #[error("reached end of input while scanning string literal")]
    UnterminatedString,

    #[error("unbalanced braces, reached end of input while scanning comment")]
    UnterminatedComment,

    #[error("unbalanced brackets, reached end of input while scanning function")]
    UnterminatedFunction,
}

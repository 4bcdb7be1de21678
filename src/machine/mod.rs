//! # Stepwise FALSE machine
//!
//! A pausable, resumable interpreter for a FALSE-style concatenative
//! language. Core principles:
//!
//! 1. **One unit per step**: each driver tick executes one literal, one
//!    opcode, or one entry into a nested function, never more.
//! 2. **Resumptions instead of recursion**: `apply`/`if`/`while` install
//!    data-described resumptions interpreted by the step loop, so the host
//!    call stack never grows with program nesting.
//! 3. **Explicit execution context**: stack, storage, output, input and
//!    step counter live in one [`Machine`] value with clear load/reset
//!    points. No ambient globals.
//! 4. **Pure engine**: no I/O beyond the in-memory buffers; diagnostics go
//!    through `tracing` and never affect control flow.

pub mod errors;
pub mod exec_loop;
pub mod opcodes;
pub mod resume;
pub mod scanner;
pub mod stack;
pub mod storage;
pub mod values;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use errors::RuntimeError;
pub use exec_loop::{run_batch, run_until_done, step};
pub use resume::Resumption;
pub use scanner::{scan, Scanned, Token};
pub use stack::Stack;
pub use storage::Storage;
pub use values::Value;
pub use vm::{Machine, MachineState, Snapshot, Step};

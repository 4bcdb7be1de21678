//! Machine state
//!
//! The machine bundles everything one program run owns: operand stack,
//! variable storage, output buffer, input buffer, step counter and the
//! currently installed resumption. There are no ambient globals; a driver
//! creates a machine, loads a program and steps it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use super::resume::Resumption;
use super::stack::Stack;
use super::storage::Storage;

/* ===================== Machine ===================== */

/// Externally visible engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    /// No program loaded.
    Idle,
    /// A resumption is installed, awaiting the next driver tick.
    Ready,
    /// The outermost program finished, or a fatal error occurred.
    /// Absorbing until `reset`.
    Terminated,
}

/// Result of executing one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Step executed, more work remains.
    Continue,
    /// Step executed and hit a breakpoint; the driver decides whether to
    /// keep stepping. The engine itself never blocks.
    Paused,
    /// Execution complete.
    Done,
}

/// Interpreter state for a single program run.
///
/// This contains everything needed to execute (and serialize/resume) a
/// program between driver ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    pub stack: Stack,
    pub storage: Storage,
    pub(crate) output: String,
    pub(crate) input: VecDeque<char>,
    pub(crate) resumption: Option<Rc<Resumption>>,
    pub(crate) state: MachineState,
    pub(crate) step_count: u64,
    /// Source text of the function currently being scanned, for display.
    pub(crate) active_source: Rc<str>,
    /// Byte offset of the next token to execute within `active_source`.
    pub(crate) active_pos: usize,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            stack: Stack::new(),
            storage: Storage::new(),
            output: String::new(),
            input: VecDeque::new(),
            resumption: None,
            state: MachineState::Idle,
            step_count: 0,
            active_source: Rc::from(""),
            active_pos: 0,
        }
    }

    /// Load a program, replacing whatever was there. Equivalent to `reset`
    /// followed by installing the initial resumption.
    pub fn load(&mut self, program: &str) {
        self.reset();
        let source: Rc<str> = Rc::from(program);
        self.active_source = source.clone();
        self.resumption = Some(Resumption::advance(source, 0, Resumption::done()));
        self.state = MachineState::Ready;
    }

    /// Clear stack, storage, buffers, step counter and resumption,
    /// returning to `Idle`.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.storage.clear();
        self.output.clear();
        self.input.clear();
        self.resumption = None;
        self.state = MachineState::Idle;
        self.step_count = 0;
        self.active_source = Rc::from("");
        self.active_pos = 0;
    }

    /// Append characters to the input buffer consumed by the `^` opcode.
    pub fn feed_input(&mut self, text: &str) {
        self.input.extend(text.chars());
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Accumulated output emitted by `.`, `,` and string literals.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The active function text and the offset of the next token in it.
    pub fn active(&self) -> (&str, usize) {
        (&self.active_source, self.active_pos)
    }

    /// Serializable view of the machine for a presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stack: self.stack.iter().map(|v| v.to_string()).collect(),
            storage: self
                .storage
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
            active_function: self.active_source.to_string(),
            active_pos: self.active_pos,
            output: self.output.clone(),
            steps: self.step_count,
            state: self.state,
        }
    }
}

/* ===================== Snapshot ===================== */

/// Rendered machine state after a step, consumed by presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Stack values bottom to top, rendered.
    pub stack: Vec<String>,
    /// Storage bindings, rendered, in name order.
    pub storage: BTreeMap<String, String>,
    pub active_function: String,
    pub active_pos: usize,
    pub output: String,
    pub steps: u64,
    pub state: MachineState,
}

pub mod cli;
pub mod machine;

// Re-export the main types
pub use machine::{
    run_batch, run_until_done, step, Machine, MachineState, Resumption, RuntimeError, Snapshot,
    Stack, Step, Storage, Value,
};

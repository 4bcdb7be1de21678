//! Command-line driver
//!
//! A thin trampoline around the one-step engine contract: load a program,
//! feed any input, then keep invoking steps until the machine terminates.
//! Breakpoints either pause the run (default) or are logged and skipped.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::machine::{run_batch, Machine, Step};

#[derive(Parser)]
#[command(name = "falsevm")]
#[command(about = "Stepwise interpreter for a FALSE-style stack language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program from a file
    Run {
        /// Path to the program source
        file: String,

        #[command(flatten)]
        opts: RunOpts,
    },

    /// Run a program given directly on the command line
    Eval {
        /// Program source text
        program: String,

        #[command(flatten)]
        opts: RunOpts,
    },
}

#[derive(Debug, clap::Args)]
pub struct RunOpts {
    /// Characters made available to the `^` opcode
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    /// Abort after this many steps
    #[arg(long = "max-steps")]
    pub max_steps: Option<u64>,

    /// Steps executed per driver tick
    #[arg(long = "batch", default_value = "30")]
    pub batch: u64,

    /// Keep running when a breakpoint is hit instead of stopping
    #[arg(long = "ignore-breakpoints")]
    pub ignore_breakpoints: bool,

    /// Print the terminal machine snapshot as JSON to stderr
    #[arg(long = "state-json")]
    pub state_json: bool,
}

/// Execute a program under the given options, printing its output to
/// stdout. Returns an error for fatal runtime errors or a blown step
/// budget.
pub fn run_program(source: &str, opts: &RunOpts) -> Result<()> {
    let mut machine = Machine::new();
    machine.load(source);
    if let Some(input) = &opts.input {
        machine.feed_input(input);
    }

    loop {
        let batch = match opts.max_steps {
            Some(max) => {
                let left = max.saturating_sub(machine.step_count());
                if left == 0 {
                    print_output(&machine, opts)?;
                    anyhow::bail!("step budget of {} exhausted", max);
                }
                opts.batch.min(left)
            }
            None => opts.batch,
        };

        let outcome = match run_batch(&mut machine, batch) {
            Ok(outcome) => outcome,
            Err(e) => {
                print_output(&machine, opts)?;
                return Err(e).context("runtime error");
            }
        };

        match outcome {
            Step::Continue => continue,
            Step::Paused => {
                if opts.ignore_breakpoints {
                    tracing::info!(steps = machine.step_count(), "breakpoint skipped");
                    continue;
                }
                print_output(&machine, opts)?;
                anyhow::bail!("paused at breakpoint after {} steps", machine.step_count());
            }
            Step::Done => {
                print_output(&machine, opts)?;
                tracing::debug!(steps = machine.step_count(), "program finished");
                return Ok(());
            }
        }
    }
}

fn print_output(machine: &Machine, opts: &RunOpts) -> Result<()> {
    print!("{}", machine.output());
    if opts.state_json {
        let snapshot = serde_json::to_string_pretty(&machine.snapshot())
            .context("failed to serialize snapshot")?;
        eprintln!("{}", snapshot);
    }
    Ok(())
}

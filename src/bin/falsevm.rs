use clap::Parser;
use tracing_subscriber::EnvFilter;

use falsevm::cli::{self, Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, opts } => {
            let source = std::fs::read_to_string(&file)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {}", file, e))?;
            cli::run_program(&source, &opts)
        }
        Commands::Eval { program, opts } => cli::run_program(&program, &opts),
    }
}

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod join;
mod matching;
mod parsing;
mod storage;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG takes precedence over the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("immedb_join=debug,info")
        } else {
            EnvFilter::new("immedb_join=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    cli::integrate::run(cli.args, cli.verbose)?;

    Ok(())
}

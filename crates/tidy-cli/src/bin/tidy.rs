use anyhow::{Context, Result};
use clap::Parser;

use tidy_cli::args::CliArgs;
use tidy_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Installs a subscriber only when TIDY_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    driver::run(&args, &cwd)
}

//! # Hook Mirror CLI
//!
//! Binary entry point for the `hook-mirror` command-line tool. Parses the
//! command line with `clap` and hands over to the library; any error aborts
//! with its message and a non-zero exit status.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}

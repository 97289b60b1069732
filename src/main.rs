#![warn(clippy::nursery)]
#![allow(clippy::multiple_crate_versions, clippy::option_if_let_else)]

use std::{alloc::System, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use stats_alloc::{StatsAlloc, INSTRUMENTED_SYSTEM};

use cli::SubCmd;

mod cli;

mod commands;

#[macro_use]
mod err;

mod logging;

// Counts every allocation so `run` can report allocation cost per policy.
#[global_allocator]
static ALLOC: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

const ABOUT: &str = "Compare allocating a SHA1 context per input against \
                     reusing pooled contexts on a parallel hashing workload";
const LOG_FILE_HELP: &str = "Write logs to this file instead of stderr. \
                             Filter with RUST_LOG or HASHBENCH_LOG.";

#[derive(Debug, Parser)]
#[command(about = ABOUT)]
struct Cli {
    #[arg(long, global = true, help = LOG_FILE_HELP)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Run(commands::run::RunCli),

    Verify(commands::verify::VerifyCli),
}

impl Command {
    fn run_subcmd(self) -> Result<()> {
        match self {
            Self::Run(cli) => cli.run(),
            Self::Verify(cli) => cli.run(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;
    cli.command.run_subcmd()
}

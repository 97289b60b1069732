use anyhow::Result;
use clap::{Parser, ValueEnum};
use hashbench::PolicyKind;

use crate::cli::{parse_positive, SizingArgs, SubCmd};

const ABOUT: &str = "Time the parallel hashing workload under one or both \
                     unit policies";
const POLICY_HELP: &str = "Which unit policy to run: a fresh SHA1 context \
                           per input, contexts from a shared pool, or both.";
const ITERATIONS_HELP: &str = "The number of timed runs per policy.";
const WARMUP_HELP: &str = "The number of untimed runs per policy before the \
                           timed ones.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Fresh,
    Pooled,
    Both,
}

impl PolicyArg {
    pub fn kinds(self) -> Vec<PolicyKind> {
        match self {
            Self::Fresh => vec![PolicyKind::Fresh],
            Self::Pooled => vec![PolicyKind::Pooled],
            Self::Both => PolicyKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = ABOUT)]
pub struct RunCli {
    #[arg(
        short = 'P',
        long,
        value_enum,
        default_value_t = PolicyArg::Both,
        help = POLICY_HELP,
    )]
    pub policy: PolicyArg,

    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = parse_positive,
        help = ITERATIONS_HELP,
    )]
    pub iterations: usize,

    #[arg(short, long, default_value_t = 1, help = WARMUP_HELP)]
    pub warmup: usize,

    #[command(flatten)]
    pub sizing: SizingArgs,
}

impl SubCmd for RunCli {
    fn run(self) -> Result<()> {
        super::run(self)
    }
}

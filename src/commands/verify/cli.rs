use anyhow::Result;
use clap::Parser;

use crate::cli::{SizingArgs, SubCmd};

const ABOUT: &str = "Run both unit policies on the same inputs and check \
                     every digest against a single-threaded reference";

#[derive(Debug, Parser)]
#[command(about = ABOUT)]
pub struct VerifyCli {
    #[command(flatten)]
    pub sizing: SizingArgs,
}

impl SubCmd for VerifyCli {
    fn run(self) -> Result<()> {
        super::run(self)
    }
}

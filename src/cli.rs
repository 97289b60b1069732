use anyhow::Result;
use clap::Args;
use hashbench::{BenchConfig, Remainder, HASH_COUNT, ITEM_LEN, PARTITION_SIZE};

pub type ClapError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub trait SubCmd {
    fn run(self) -> Result<()>;
}

const COUNT_HELP: &str = "The number of inputs to hash.";
const PARTITION_SIZE_HELP: &str = "The number of consecutive inputs each \
                                   worker thread hashes.";
const ITEM_LEN_HELP: &str = "The length, in bytes, of each input.";
const SEED_HELP: &str = "Seed for the input generator. Inputs differ on \
                         every run if omitted.";
const REMAINDER_HELP: &str = "What to do with the inputs past the last full \
                              partition when the count isn't a multiple of \
                              the partition size: reject the configuration, \
                              skip them, or process them on an extra worker.";

/// Workload shape shared by every subcommand.
#[derive(Debug, Args)]
pub struct SizingArgs {
    #[arg(
        short = 'n',
        long,
        default_value_t = HASH_COUNT,
        value_parser = parse_positive,
        help = COUNT_HELP,
    )]
    pub count: usize,

    #[arg(
        short,
        long,
        default_value_t = PARTITION_SIZE,
        value_parser = parse_positive,
        help = PARTITION_SIZE_HELP,
    )]
    pub partition_size: usize,

    #[arg(
        short = 'l',
        long,
        default_value_t = ITEM_LEN,
        value_parser = parse_positive,
        help = ITEM_LEN_HELP,
    )]
    pub item_len: usize,

    #[arg(short, long, help = SEED_HELP)]
    pub seed: Option<u64>,

    #[arg(
        short,
        long,
        default_value = "reject",
        value_parser = parse_remainder,
        help = REMAINDER_HELP,
    )]
    pub remainder: Remainder,
}

impl SizingArgs {
    pub const fn config(&self) -> BenchConfig {
        BenchConfig {
            hash_count: self.count,
            partition_size: self.partition_size,
            item_len: self.item_len,
            seed: self.seed,
            remainder: self.remainder,
        }
    }
}

pub fn parse_positive(value: &str) -> Result<usize, ClapError> {
    match value.parse::<usize>() {
        Ok(0) => Err("value must be an integer > 0".into()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.into()),
    }
}

pub fn parse_remainder(value: &str) -> Result<Remainder, ClapError> {
    value.parse().map_err(Into::into)
}

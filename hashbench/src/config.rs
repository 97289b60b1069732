use std::{fmt, str::FromStr};

use anyhow::{bail, ensure, Result};

use crate::partition::PartitionPlan;

pub const HASH_COUNT: usize = 5000;
pub const PARTITION_SIZE: usize = 500;
pub const ITEM_LEN: usize = 200;

/// What to do with the items past the last full partition when `hash_count`
/// isn't a multiple of `partition_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Remainder {
    /// Refuse the configuration.
    #[default]
    Reject,
    /// Leave the tail items unhashed; their output slots stay empty.
    Skip,
    /// Give the tail items a shorter partition and worker of their own.
    Process,
}

impl Remainder {
    pub const VARIANTS: &'static [&'static str] = &["reject", "skip", "process"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
            Self::Process => "process",
        }
    }
}

impl fmt::Display for Remainder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Remainder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "reject" => Self::Reject,
            "skip" => Self::Skip,
            "process" => Self::Process,
            _ => bail!(
                "invalid remainder mode: {s} (expected one of: {})",
                Self::VARIANTS.join(", ")
            ),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub hash_count: usize,
    pub partition_size: usize,
    pub item_len: usize,
    /// Seed for the input generator. `None` draws from entropy, so inputs
    /// differ between runs.
    pub seed: Option<u64>,
    pub remainder: Remainder,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            hash_count: HASH_COUNT,
            partition_size: PARTITION_SIZE,
            item_len: ITEM_LEN,
            seed: None,
            remainder: Remainder::default(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.hash_count > 0, "hash count must be greater than 0");
        ensure!(
            self.partition_size > 0,
            "partition size must be greater than 0"
        );
        ensure!(self.item_len > 0, "item length must be greater than 0");
        if self.remainder == Remainder::Reject {
            ensure!(
                self.hash_count % self.partition_size == 0,
                "hash count {} is not a multiple of partition size {} \
                 (use remainder mode `skip` or `process` to allow this)",
                self.hash_count,
                self.partition_size,
            );
        }
        Ok(())
    }

    pub fn plan(&self) -> Result<PartitionPlan> {
        self.validate()?;
        PartitionPlan::new(self.hash_count, self.partition_size, self.remainder)
    }
}

#[cfg(test)]
mod test {
    use test_case::test_case;

    use super::*;

    #[test]
    fn default_uses_benchmark_constants() {
        let config = BenchConfig::default();
        assert_eq!(config.hash_count, 5000);
        assert_eq!(config.partition_size, 500);
        assert_eq!(config.item_len, 200);
        assert_eq!(config.seed, None);
        assert_eq!(config.remainder, Remainder::Reject);
    }

    #[test]
    fn default_is_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test_case(0, 500, 200 ; "zero hash count")]
    #[test_case(5000, 0, 200 ; "zero partition size")]
    #[test_case(5000, 500, 0 ; "zero item length")]
    fn validate_rejects_zero_sizes(
        hash_count: usize,
        partition_size: usize,
        item_len: usize,
    ) {
        let config = BenchConfig {
            hash_count,
            partition_size,
            item_len,
            ..BenchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test_case(Remainder::Reject, false ; "reject refuses uneven counts")]
    #[test_case(Remainder::Skip, true ; "skip allows uneven counts")]
    #[test_case(Remainder::Process, true ; "process allows uneven counts")]
    fn validate_uneven_count(remainder: Remainder, ok: bool) {
        let config = BenchConfig {
            hash_count: 5001,
            remainder,
            ..BenchConfig::default()
        };
        assert_eq!(config.validate().is_ok(), ok);
    }

    #[test_case("reject", Remainder::Reject)]
    #[test_case("skip", Remainder::Skip)]
    #[test_case("process", Remainder::Process)]
    fn remainder_parses_its_own_name(name: &str, expected: Remainder) {
        assert_eq!(name.parse::<Remainder>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn remainder_rejects_unknown_name() {
        assert!("truncate".parse::<Remainder>().is_err());
    }
}

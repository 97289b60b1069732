#![warn(clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]

pub mod bench;

pub mod config;

pub mod executor;

pub mod partition;

pub mod policy;

pub mod unit;

pub mod workload;

#[cfg(test)]
mod test_utils;

pub use bench::Benchmarks;
pub use config::{BenchConfig, Remainder, HASH_COUNT, ITEM_LEN, PARTITION_SIZE};
pub use executor::{hash_in_parallel, RunReport};
pub use policy::{FreshUnitPolicy, Lease, PolicyKind, PooledUnitPolicy, UnitPolicy};
pub use workload::Workload;

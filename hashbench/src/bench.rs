use anyhow::{ensure, Result};
use tracing::info;

use crate::{
    config::BenchConfig,
    executor::{hash_in_parallel, RunReport},
    partition::PartitionPlan,
    policy::{
        default_max_retained, FreshUnitPolicy, PolicyKind, PooledUnitPolicy,
        UnitPolicy,
    },
    workload::Workload,
};

/// One generated workload plus the two benchmark entry points that hash it.
///
/// Each entry point clears the output buffer, hashes every covered input in
/// parallel and leaves the digests in [`Benchmarks::workload`].
pub struct Benchmarks {
    config: BenchConfig,
    plan: PartitionPlan,
    workload: Workload,
}

impl Benchmarks {
    pub fn new(config: BenchConfig) -> Result<Self> {
        let plan = config.plan()?;
        let workload =
            Workload::generate(config.hash_count, config.item_len, config.seed);
        info!(
            items = config.hash_count,
            item_len = config.item_len,
            workers = plan.workers(),
            seeded = config.seed.is_some(),
            "generated workload"
        );
        Ok(Self {
            config,
            plan,
            workload,
        })
    }

    /// Use caller-supplied inputs instead of generating them. `hash_count`
    /// must match the number of inputs.
    pub fn with_workload(config: BenchConfig, workload: Workload) -> Result<Self> {
        ensure!(
            workload.len() == config.hash_count,
            "workload has {} items but the configuration expects {}",
            workload.len(),
            config.hash_count
        );
        let plan = config.plan()?;
        Ok(Self {
            config,
            plan,
            workload,
        })
    }

    pub const fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub const fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    pub const fn workload(&self) -> &Workload {
        &self.workload
    }

    /// A new hash unit for every input.
    pub fn new_hash_algorithm_per_row(&mut self) -> Result<RunReport> {
        self.run_with(&FreshUnitPolicy::new())
    }

    /// Hash units drawn from a pool built for this invocation.
    pub fn using_object_pool(&mut self) -> Result<RunReport> {
        let pool = PooledUnitPolicy::with_max_retained(
            self.plan.workers().max(default_max_retained()),
        );
        self.run_with(&pool)
    }

    pub fn run(&mut self, kind: PolicyKind) -> Result<RunReport> {
        match kind {
            PolicyKind::Fresh => self.new_hash_algorithm_per_row(),
            PolicyKind::Pooled => self.using_object_pool(),
        }
    }

    pub fn run_with<P: UnitPolicy + ?Sized>(
        &mut self,
        policy: &P,
    ) -> Result<RunReport> {
        self.workload.clear_output();
        let (input, output) = self.workload.split_mut();
        hash_in_parallel(input, output, &self.plan, policy)
    }
}

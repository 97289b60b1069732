use std::time::Duration;

use anyhow::{Context, Result};
use hashbench::{Benchmarks, PolicyKind, RunReport};
use itertools::{Itertools, MinMaxResult};
use stats_alloc::{Region, Stats};
use tracing::{debug, info};

use crate::ALLOC;

pub use self::cli::RunCli;

mod cli;

/// One timed run and the heap traffic it caused.
#[derive(Debug)]
struct Measured {
    report: RunReport,
    allocs: Stats,
}

/// Timings for one policy across the timed iterations.
#[derive(Debug)]
struct Summary {
    kind: PolicyKind,
    runs: Vec<Measured>,
}

impl Summary {
    fn per_run(&self, total: usize) -> usize {
        total / self.runs.len().max(1)
    }

    fn mean(&self) -> Duration {
        let total: Duration = self.runs.iter().map(|m| m.report.elapsed).sum();
        total / self.runs.len().max(1) as u32
    }

    fn units_per_run(&self) -> usize {
        self.per_run(self.runs.iter().map(|m| m.report.units.created).sum())
    }

    fn allocations_per_run(&self) -> usize {
        self.per_run(self.runs.iter().map(|m| m.allocs.allocations).sum())
    }

    fn bytes_per_run(&self) -> usize {
        self.per_run(self.runs.iter().map(|m| m.allocs.bytes_allocated).sum())
    }

    fn print(&self) {
        let elapsed = self.runs.iter().map(|m| m.report.elapsed);
        let (min, max) = match elapsed.minmax() {
            MinMaxResult::NoElements => return,
            MinMaxResult::OneElement(only) => (only, only),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        println!(
            "{:<24} mean {:>12?}  min {:>12?}  max {:>12?}  units/run {:>6}  \
             allocs/run {:>8}  bytes/run {:>10}",
            self.kind.bench_name(),
            self.mean(),
            min,
            max,
            self.units_per_run(),
            self.allocations_per_run(),
            self.bytes_per_run(),
        );
    }
}

fn measure_run(benches: &mut Benchmarks, kind: PolicyKind) -> Result<Measured> {
    let region = Region::new(ALLOC);
    let report = benches.run(kind)?;
    let allocs = region.change();
    Ok(Measured { report, allocs })
}

fn run(args: RunCli) -> Result<()> {
    let config = args.sizing.config();
    let mut benches = Benchmarks::new(config)?;

    let summaries = args
        .policy
        .kinds()
        .into_iter()
        .map(|kind| run_policy(&mut benches, kind, args.warmup, args.iterations))
        .collect::<Result<Vec<_>>>()?;

    let plan = benches.plan();
    println!(
        "{} items of {} bytes, {} workers of {} items",
        plan.covered(),
        benches.config().item_len,
        plan.workers(),
        plan.partition_size(),
    );
    if !plan.unprocessed().is_empty() {
        println!("{} trailing items skipped", plan.unprocessed().len());
    }
    summaries.iter().for_each(Summary::print);

    Ok(())
}

fn run_policy(
    benches: &mut Benchmarks,
    kind: PolicyKind,
    warmup: usize,
    iterations: usize,
) -> Result<Summary> {
    for _ in 0..warmup {
        benches
            .run(kind)
            .with_context(|| format!("{kind}: warmup run failed"))?;
    }

    let runs = (0..iterations)
        .map(|i| {
            let measured = measure_run(benches, kind)
                .with_context(|| format!("{kind}: iteration {i} failed"))?;
            debug!(
                iteration = i,
                allocations = measured.allocs.allocations,
                bytes = measured.allocs.bytes_allocated,
                "{}",
                measured.report
            );
            Ok(measured)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(policy = kind.bench_name(), iterations, "policy finished");
    Ok(Summary { kind, runs })
}

use std::{
    fmt, thread,
    time::{Duration, Instant},
};

use anyhow::{bail, ensure, Result};
use hashbench_utils::{hash::Sha1Digest, sync::CountdownLatch};
use tracing::{debug, trace, warn};

use crate::{
    partition::{Partition, PartitionPlan},
    policy::{Lease, UnitPolicy},
    unit::UnitCounts,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub policy: &'static str,
    pub workers: usize,
    pub items_hashed: usize,
    pub unprocessed: usize,
    pub units: UnitCounts,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} items on {} workers in {:?} ({} units created, {} reused)",
            self.policy,
            self.items_hashed,
            self.workers,
            self.elapsed,
            self.units.created,
            self.units.reused,
        )?;
        if self.unprocessed > 0 {
            write!(f, ", {} items left unprocessed", self.unprocessed)?;
        }
        Ok(())
    }
}

/// Hash every input covered by `plan` into the matching output slot, one
/// thread per partition, getting units from `policy`.
///
/// Returns once every worker has finished. If any worker panics the run is
/// reported as an error; the other workers still run to completion.
pub fn hash_in_parallel<P: UnitPolicy + ?Sized>(
    input: &[Vec<u8>],
    output: &mut [Option<Sha1Digest>],
    plan: &PartitionPlan,
    policy: &P,
) -> Result<RunReport> {
    ensure!(
        input.len() == output.len(),
        "input has {} items but output has {} slots",
        input.len(),
        output.len()
    );
    ensure!(
        plan.covered() + plan.unprocessed().len() == input.len(),
        "partition plan is for {} items but input has {}",
        plan.covered() + plan.unprocessed().len(),
        input.len()
    );

    let unprocessed = plan.unprocessed();
    if !unprocessed.is_empty() {
        warn!(
            items = unprocessed.len(),
            start = unprocessed.start,
            "tail items are not assigned to any worker"
        );
    }

    let size = plan.partition_size();
    let covered = plan.covered();
    let latch = CountdownLatch::new(plan.workers());
    let units_before = policy.stats().snapshot();
    let started = Instant::now();

    let failed: Vec<Partition> = thread::scope(|s| {
        let latch = &latch;
        let workers: Vec<_> = plan
            .partitions()
            .iter()
            .zip(input[..covered].chunks(size))
            .zip(output[..covered].chunks_mut(size))
            .map(|((&partition, items), slots)| {
                let handle = s.spawn(move || {
                    hash_partition(partition, items, slots, policy, latch);
                });
                (partition, handle)
            })
            .collect();

        latch.wait();

        workers
            .into_iter()
            .filter_map(|(partition, handle)| {
                handle.join().is_err().then_some(partition)
            })
            .collect()
    });

    let elapsed = started.elapsed();

    if let Some(first) = failed.first() {
        bail!(
            "{} of {} workers failed (first failed partition: {:?})",
            failed.len(),
            plan.workers(),
            first.range(),
        );
    }

    let report = RunReport {
        policy: policy.name(),
        workers: plan.workers(),
        items_hashed: covered,
        unprocessed: unprocessed.len(),
        units: policy.stats().snapshot().since(units_before),
        elapsed,
    };
    debug!(
        policy = report.policy,
        workers = report.workers,
        items = report.items_hashed,
        units_created = report.units.created,
        ?elapsed,
        "parallel hash run finished"
    );
    Ok(report)
}

fn hash_partition<P: UnitPolicy + ?Sized>(
    partition: Partition,
    items: &[Vec<u8>],
    slots: &mut [Option<Sha1Digest>],
    policy: &P,
    latch: &CountdownLatch,
) {
    let _done = latch.signal_on_drop();
    trace!(start = partition.start, end = partition.end, "worker started");

    for (item, slot) in items.iter().zip(slots) {
        let mut unit = Lease::new(policy);
        *slot = Some(unit.compute(item));
    }

    trace!(start = partition.start, end = partition.end, "worker finished");
}

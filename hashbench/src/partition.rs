use std::ops::Range;

use anyhow::{ensure, Result};

use crate::config::Remainder;

/// Half-open index range `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Contiguous partitions starting at index 0, plus whatever tail was left
/// out under [`Remainder::Skip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    partition_size: usize,
    partitions: Vec<Partition>,
    unprocessed: Range<usize>,
}

impl PartitionPlan {
    pub fn new(
        len: usize,
        partition_size: usize,
        remainder: Remainder,
    ) -> Result<Self> {
        ensure!(partition_size > 0, "partition size must be greater than 0");

        let tail = len % partition_size;
        ensure!(
            tail == 0 || remainder != Remainder::Reject,
            "{len} items don't split evenly into partitions of {partition_size}"
        );

        let covered = match remainder {
            Remainder::Process => len,
            Remainder::Reject | Remainder::Skip => len - tail,
        };

        let partitions = (0..covered)
            .step_by(partition_size)
            .map(|start| Partition {
                start,
                end: (start + partition_size).min(covered),
            })
            .collect();

        Ok(Self {
            partition_size,
            partitions,
            unprocessed: covered..len,
        })
    }

    pub const fn partition_size(&self) -> usize {
        self.partition_size
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn workers(&self) -> usize {
        self.partitions.len()
    }

    /// Number of leading items some worker will hash.
    pub const fn covered(&self) -> usize {
        self.unprocessed.start
    }

    pub fn unprocessed(&self) -> Range<usize> {
        self.unprocessed.clone()
    }
}

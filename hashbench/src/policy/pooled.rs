use std::thread;

use crossbeam_queue::ArrayQueue;

use crate::unit::{HashUnit, UnitStats};

use super::UnitPolicy;

/// Hands out idle units from a shared pool, building one only when the pool
/// is empty. Released units go back to the pool unless it already holds
/// `max_retained` of them.
#[derive(Debug)]
pub struct PooledUnitPolicy {
    idle: ArrayQueue<HashUnit>,
    stats: UnitStats,
}

impl PooledUnitPolicy {
    pub const NAME: &'static str = "UsingObjectPool";

    pub fn new() -> Self {
        Self::with_max_retained(default_max_retained())
    }

    /// `max_retained` is clamped to at least 1.
    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            idle: ArrayQueue::new(max_retained.max(1)),
            stats: UnitStats::default(),
        }
    }

    pub fn max_retained(&self) -> usize {
        self.idle.capacity()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}

impl Default for PooledUnitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Twice the available parallelism.
pub fn default_max_retained() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get()) * 2
}

impl UnitPolicy for PooledUnitPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn acquire(&self) -> HashUnit {
        match self.idle.pop() {
            Some(unit) => {
                self.stats.record_reused();
                unit
            }
            None => {
                self.stats.record_created();
                HashUnit::new()
            }
        }
    }

    fn release(&self, mut unit: HashUnit) {
        unit.reset();
        if let Err(unit) = self.idle.push(unit) {
            self.stats.record_discarded();
            drop(unit);
        }
    }

    fn stats(&self) -> &UnitStats {
        &self.stats
    }
}

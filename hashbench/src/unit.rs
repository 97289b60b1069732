use std::sync::atomic::{AtomicUsize, Ordering};

use hashbench_utils::hash::Sha1Digest;
use sha1::{Digest, Sha1};

static NEXT_UNIT_ID: AtomicUsize = AtomicUsize::new(0);

/// A SHA1 context that can be reused for any number of digests.
///
/// The context lives on the heap, so building a unit costs an allocation
/// like constructing any heap-backed hash object.
#[derive(Debug)]
pub struct HashUnit {
    id: usize,
    hasher: Box<Sha1>,
    #[cfg(test)]
    panic_on: Option<Vec<u8>>,
}

impl HashUnit {
    pub fn new() -> Self {
        Self {
            id: NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed),
            hasher: Box::new(Sha1::new()),
            #[cfg(test)]
            panic_on: None,
        }
    }

    /// Process-unique, never reused.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Digest `data`, leaving the context ready for the next input.
    pub fn compute(&mut self, data: &[u8]) -> Sha1Digest {
        #[cfg(test)]
        if self.panic_on.as_deref() == Some(data) {
            panic!("unit {} refused its input", self.id);
        }
        self.hasher.update(data);
        self.hasher.finalize_reset().into()
    }

    pub fn reset(&mut self) {
        self.hasher.reset();
    }

    /// Make [`compute`](Self::compute) panic when handed exactly `marker`.
    #[cfg(test)]
    pub(crate) fn set_panic_on(&mut self, marker: Option<Vec<u8>>) {
        self.panic_on = marker;
    }
}

impl Default for HashUnit {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifetime counters for the units a policy hands out.
#[derive(Debug, Default)]
pub struct UnitStats {
    created: AtomicUsize,
    reused: AtomicUsize,
    discarded: AtomicUsize,
}

impl UnitStats {
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reused(&self) {
        self.reused.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> UnitCounts {
        UnitCounts {
            created: self.created.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitCounts {
    pub created: usize,
    pub reused: usize,
    pub discarded: usize,
}

impl UnitCounts {
    /// Counts accumulated between `earlier` and `self`.
    pub const fn since(self, earlier: Self) -> Self {
        Self {
            created: self.created - earlier.created,
            reused: self.reused - earlier.reused,
            discarded: self.discarded - earlier.discarded,
        }
    }
}

#[cfg(test)]
mod test {
    use hashbench_utils::hash::sha1_digest;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = HashUnit::new();
        let b = HashUnit::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn compute_matches_reference_digest() {
        let mut unit = HashUnit::new();
        assert_eq!(unit.compute(b"abc"), sha1_digest(b"abc"));
    }

    #[test]
    fn compute_does_not_leak_state_between_inputs() {
        let mut unit = HashUnit::new();
        unit.compute(b"first input");
        assert_eq!(unit.compute(b"second"), sha1_digest(b"second"));
    }

    #[test]
    fn reset_discards_partial_input() {
        let mut unit = HashUnit::new();
        unit.hasher.update(b"partial");
        unit.reset();
        assert_eq!(unit.compute(b"abc"), sha1_digest(b"abc"));
    }

    #[test]
    fn counts_since_subtracts_fieldwise() {
        let stats = UnitStats::default();
        stats.record_created();
        let before = stats.snapshot();
        stats.record_created();
        stats.record_reused();
        stats.record_discarded();
        assert_eq!(
            stats.snapshot().since(before),
            UnitCounts {
                created: 1,
                reused: 1,
                discarded: 1
            }
        );
    }
}

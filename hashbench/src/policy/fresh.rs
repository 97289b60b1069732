use crate::unit::{HashUnit, UnitStats};

use super::UnitPolicy;

/// Builds a new unit for every acquisition and drops it on release.
#[derive(Debug, Default)]
pub struct FreshUnitPolicy {
    stats: UnitStats,
}

impl FreshUnitPolicy {
    pub const NAME: &'static str = "NewHashAlgorithmPerRow";

    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitPolicy for FreshUnitPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn acquire(&self) -> HashUnit {
        self.stats.record_created();
        HashUnit::new()
    }

    fn release(&self, unit: HashUnit) {
        self.stats.record_discarded();
        drop(unit);
    }

    fn stats(&self) -> &UnitStats {
        &self.stats
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_acquire_builds_a_new_unit() {
        let policy = FreshUnitPolicy::new();
        let a = policy.acquire();
        let b = policy.acquire();
        assert_ne!(a.id(), b.id());
        assert_eq!(policy.stats().snapshot().created, 2);
    }

    #[test]
    fn release_discards_the_unit() {
        let policy = FreshUnitPolicy::new();
        let unit = policy.acquire();
        policy.release(unit);
        let counts = policy.stats().snapshot();
        assert_eq!(counts.discarded, 1);
        assert_eq!(counts.reused, 0);
    }
}

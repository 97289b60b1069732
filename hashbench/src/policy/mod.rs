use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use hashbench_utils::hash::Sha1Digest;

use crate::unit::{HashUnit, UnitStats};

pub use self::{
    fresh::FreshUnitPolicy,
    pooled::{default_max_retained, PooledUnitPolicy},
};

mod fresh;

mod pooled;

/// How workers get hold of a [`HashUnit`] and what happens to it afterwards.
///
/// Shared by every worker of a run, so implementations synchronize
/// internally.
pub trait UnitPolicy: Sync {
    /// Benchmark name this policy is reported under.
    fn name(&self) -> &'static str;

    fn acquire(&self) -> HashUnit;

    fn release(&self, unit: HashUnit);

    fn stats(&self) -> &UnitStats;
}

/// Scoped acquisition: holds a unit from `policy` and hands it back on drop,
/// whichever way the holder exits.
pub struct Lease<'a, P: UnitPolicy + ?Sized> {
    policy: &'a P,
    unit: Option<HashUnit>,
}

impl<'a, P: UnitPolicy + ?Sized> Lease<'a, P> {
    pub fn new(policy: &'a P) -> Self {
        Self {
            policy,
            unit: Some(policy.acquire()),
        }
    }

    fn unit(&self) -> &HashUnit {
        match &self.unit {
            Some(unit) => unit,
            None => unreachable!("lease is only emptied on drop"),
        }
    }

    fn unit_mut(&mut self) -> &mut HashUnit {
        match &mut self.unit {
            Some(unit) => unit,
            None => unreachable!("lease is only emptied on drop"),
        }
    }

    delegate::delegate! {
        to self.unit() {
            pub fn id(&self) -> usize;
        }
        to self.unit_mut() {
            pub fn compute(&mut self, data: &[u8]) -> Sha1Digest;
        }
    }
}

impl<P: UnitPolicy + ?Sized> Drop for Lease<'_, P> {
    fn drop(&mut self) {
        if let Some(unit) = self.unit.take() {
            self.policy.release(unit);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Fresh,
    Pooled,
}

impl PolicyKind {
    pub const ALL: [Self; 2] = [Self::Fresh, Self::Pooled];

    pub const fn bench_name(self) -> &'static str {
        match self {
            Self::Fresh => FreshUnitPolicy::NAME,
            Self::Pooled => PooledUnitPolicy::NAME,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bench_name())
    }
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "fresh" => Self::Fresh,
            "pooled" => Self::Pooled,
            _ => bail!("invalid policy: {s} (expected `fresh` or `pooled`)"),
        })
    }
}

#[cfg(test)]
mod test {
    use std::{
        panic::{self, AssertUnwindSafe},
        thread,
    };

    use hashbench_utils::hash::sha1_digest;
    use test_case::test_case;

    use super::*;

    #[test]
    fn lease_releases_on_drop() {
        let pool = PooledUnitPolicy::with_max_retained(4);
        {
            let mut lease = Lease::new(&pool);
            assert_eq!(lease.compute(b"abc"), sha1_digest(b"abc"));
            assert_eq!(pool.idle_count(), 0);
        }
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn lease_releases_when_holder_panics() {
        let pool = PooledUnitPolicy::with_max_retained(4);

        let result = thread::scope(|s| {
            s.spawn(|| {
                let _lease = Lease::new(&pool);
                panic!("digest failed");
            })
            .join()
        });

        assert!(result.is_err());
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.stats().snapshot().created, 1);
    }

    #[test]
    fn lease_works_through_a_trait_object() {
        let policy: &dyn UnitPolicy = &FreshUnitPolicy::new();
        let mut lease = Lease::new(policy);
        assert_eq!(lease.compute(b""), sha1_digest(b""));
        drop(lease);
        assert_eq!(policy.stats().snapshot().discarded, 1);
    }

    #[test]
    fn unwinding_through_catch_unwind_still_releases() {
        let pool = PooledUnitPolicy::with_max_retained(1);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let lease = Lease::new(&pool);
            let id = lease.id();
            panic!("unit {id} failed");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle_count(), 1);
    }

    #[test_case("fresh", PolicyKind::Fresh)]
    #[test_case("pooled", PolicyKind::Pooled)]
    fn policy_kind_parses(name: &str, expected: PolicyKind) {
        assert_eq!(name.parse::<PolicyKind>().unwrap(), expected);
    }

    #[test]
    fn policy_kind_displays_bench_name() {
        assert_eq!(PolicyKind::Fresh.to_string(), "NewHashAlgorithmPerRow");
        assert_eq!(PolicyKind::Pooled.to_string(), "UsingObjectPool");
    }
}

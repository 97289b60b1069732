use anyhow::Result;
use hashbench::{Benchmarks, PolicyKind};
use hashbench_utils::hash::{sha1_digest, Sha1Digest};
use tracing::info;

use crate::{err_digest_mismatch, err_slot_state};

pub use self::cli::VerifyCli;

mod cli;

fn run(args: VerifyCli) -> Result<()> {
    let mut benches = Benchmarks::new(args.sizing.config())?;
    let expected = reference_digests(&benches);

    for kind in PolicyKind::ALL {
        let report = benches.run(kind)?;
        check_output(kind, &expected, benches.workload().output())?;
        info!("{report}");
        println!("{kind}: {} digests match", report.items_hashed);
    }

    Ok(())
}

/// Single-threaded digests for the covered inputs; `None` where the plan
/// leaves a slot unprocessed.
fn reference_digests(benches: &Benchmarks) -> Vec<Option<Sha1Digest>> {
    let covered = benches.plan().covered();
    benches
        .workload()
        .input()
        .iter()
        .enumerate()
        .map(|(i, item)| (i < covered).then(|| sha1_digest(item)))
        .collect()
}

fn check_output(
    kind: PolicyKind,
    expected: &[Option<Sha1Digest>],
    actual: &[Option<Sha1Digest>],
) -> Result<()> {
    for (i, (want, got)) in expected.iter().zip(actual).enumerate() {
        match (want, got) {
            (Some(want), Some(got)) if want != got => {
                return Err(err_digest_mismatch!(kind, i, want, got));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(err_slot_state!(kind, i, got.is_some()));
            }
            _ => {}
        }
    }
    Ok(())
}

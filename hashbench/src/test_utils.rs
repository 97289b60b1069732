use hashbench_utils::hash::{sha1_digest, Sha1Digest};

/// Deterministic inputs that differ from each other.
pub fn fixed_inputs(count: usize, item_len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let seed = i.to_le_bytes();
            (0..item_len).map(|j| seed[j % seed.len()] ^ j as u8).collect()
        })
        .collect()
}

pub fn assert_digests_match(inputs: &[Vec<u8>], output: &[Option<Sha1Digest>]) {
    assert_eq!(inputs.len(), output.len());
    for (i, (input, digest)) in inputs.iter().zip(output).enumerate() {
        assert_eq!(*digest, Some(sha1_digest(input)), "digest mismatch at {i}");
    }
}

use fastrand::Rng;
use hashbench_utils::hash::Sha1Digest;

/// Hash inputs plus one output slot per input.
#[derive(Clone, Debug)]
pub struct Workload {
    input: Vec<Vec<u8>>,
    output: Vec<Option<Sha1Digest>>,
}

impl Workload {
    /// `count` buffers of `item_len` random bytes, all drawn from one
    /// generator. Without a seed the generator is seeded from entropy.
    pub fn generate(count: usize, item_len: usize, seed: Option<u64>) -> Self {
        let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);
        let input = (0..count)
            .map(|_| {
                let mut item = vec![0; item_len];
                rng.fill(&mut item);
                item
            })
            .collect();
        Self::from_inputs(input)
    }

    pub fn from_inputs(input: Vec<Vec<u8>>) -> Self {
        let output = vec![None; input.len()];
        Self { input, output }
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn input(&self) -> &[Vec<u8>] {
        &self.input
    }

    pub fn output(&self) -> &[Option<Sha1Digest>] {
        &self.output
    }

    pub fn filled(&self) -> usize {
        self.output.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clear_output(&mut self) {
        self.output.fill(None);
    }

    pub fn split_mut(&mut self) -> (&[Vec<u8>], &mut [Option<Sha1Digest>]) {
        (&self.input, &mut self.output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generate_has_requested_shape() {
        let workload = Workload::generate(5000, 200, None);
        assert_eq!(workload.len(), 5000);
        assert!(workload.input().iter().all(|item| item.len() == 200));
        assert_eq!(workload.output().len(), 5000);
        assert_eq!(workload.filled(), 0);
    }

    #[test]
    fn items_are_not_repeated() {
        let workload = Workload::generate(64, 200, None);
        let first = &workload.input()[0];
        assert!(workload.input()[1..].iter().all(|item| item != first));
    }

    #[test]
    fn same_seed_gives_same_inputs() {
        let seed = fastrand::u64(..);
        let a = Workload::generate(16, 32, Some(seed));
        let b = Workload::generate(16, 32, Some(seed));
        assert_eq!(a.input(), b.input());
    }

    #[test]
    fn different_seeds_give_different_inputs() {
        let a = Workload::generate(16, 32, Some(1));
        let b = Workload::generate(16, 32, Some(2));
        assert_ne!(a.input(), b.input());
    }

    #[test]
    fn clear_output_empties_every_slot() {
        let mut workload = Workload::from_inputs(vec![vec![1], vec![2]]);
        workload.split_mut().1[1] = Some([0; 20]);
        assert_eq!(workload.filled(), 1);
        workload.clear_output();
        assert_eq!(workload.filled(), 0);
    }
}

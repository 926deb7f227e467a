//! Seeded random streams.
//!
//! Every ant draws from its own stream, derived from the master seed of the run and the
//! index of the stream. Results therefore do not depend on the order in which ants are
//! scheduled on threads.

use rand::SeedableRng;
use rand_pcg::Pcg64;

pub type AntRng = Pcg64;

const STREAM_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct SeedSequence {
    master_seed: u64,
    stream: u64,
}

impl SeedSequence {
    pub fn new(master_seed: u64) -> Self {
        SeedSequence {
            master_seed,
            stream: 0,
        }
    }

    /// Returns the next independent stream.
    pub fn next_rng(&mut self) -> AntRng {
        let seed = self
            .master_seed
            .wrapping_add(self.stream.wrapping_mul(STREAM_STEP));
        self.stream += 1;
        Pcg64::seed_from_u64(seed)
    }

    pub fn partition(&mut self, n: usize) -> Vec<AntRng> {
        (0..n).map(|_| self.next_rng()).collect()
    }
}

#[cfg(test)]
mod test_rng {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reproducible() {
        let a: Vec<u64> = SeedSequence::new(7)
            .partition(3)
            .iter_mut()
            .map(|rng| rng.gen())
            .collect();
        let b: Vec<u64> = SeedSequence::new(7)
            .partition(3)
            .iter_mut()
            .map(|rng| rng.gen())
            .collect();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
        assert_ne!(a[1], a[2]);
    }

    #[test]
    fn test_streams_continue() {
        let mut seq = SeedSequence::new(1);
        let mut first = seq.next_rng();
        let mut second = seq.next_rng();
        let mut all = SeedSequence::new(1).partition(2);
        assert_eq!(first.gen::<u64>(), all[0].gen::<u64>());
        assert_eq!(second.gen::<u64>(), all[1].gen::<u64>());
    }
}

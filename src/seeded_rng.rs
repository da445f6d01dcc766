use blake2::{Blake2b512, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Make a random number generator from a global seed and a string id.
///
/// The global seed is the single piece of information controlling all
/// randomness in a generation run. Each independent block of the synthetic
/// visit table (department draws, arrival times, flow derivation, the
/// missing-data mask, etc.) gets its own generator by passing a distinct
/// block id, so that adding or removing one block never perturbs the
/// numbers drawn by the others. That decoupling is what keeps tests which
/// pin down exact generated values stable across unrelated changes.
///
/// The id is concatenated with the global seed and hashed; the hash seeds
/// the generator. Reusing an id with the same global seed reproduces the
/// same draw sequence.
pub fn make_rng(global_seed: u64, block_id: &str) -> ChaCha8Rng {
    let message = format!("{block_id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let seed = hasher.finalize()[0..32]
        .try_into()
        .expect("Unexpectedly failed to obtain correct-length slice");
    ChaCha8Rng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_and_id_reproduce_draws() {
        let mut a = make_rng(42, "arrival");
        let mut b = make_rng(42, "arrival");
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_ids_give_different_streams() {
        let mut a = make_rng(42, "arrival");
        let mut b = make_rng(42, "flow");
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_ne!(xs, ys);
    }
}

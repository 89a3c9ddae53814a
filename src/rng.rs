use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Maps an integer scenario seed onto the `[0, 1)` noise seed used by the
/// terrain generator. The mapping is stable across runs.
pub fn noise_seed_from(seed: u64) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.gen::<f64>()
}

/// Fresh per-session seed for scenarios that do not pin one.
pub fn random_noise_seed() -> f64 {
    rand::thread_rng().gen::<f64>()
}

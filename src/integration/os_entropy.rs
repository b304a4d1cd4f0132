use crate::crypto::rng::EntropySource;
use rand_core::{OsRng, RngCore};

/// Seeds drawn from the operating system's random number generator.
#[derive(Copy, Clone, Debug, Default)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn random_seed(&mut self) -> [u8; 32] {
        let mut seed = [0u8; 32];
        // Panics if the operating system cannot provide randomness. The raw interface catches
        // the panic and reports an initialization failure.
        OsRng.fill_bytes(&mut seed);
        seed
    }
}

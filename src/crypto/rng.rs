use rand_chacha::rand_core::{self, impls, CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroize;

/// Entropy source from which the key generation RNG is seeded.
pub trait EntropySource {
    fn random_seed(&mut self) -> [u8; 32];
}

/// ChaCha20 based RNG that draws a fresh seed from its [EntropySource] every `reseed_threshold`
/// output bytes.
pub struct Rng<E: EntropySource> {
    rng: ChaCha20Rng,
    source: E,
    reseed_threshold: u128,
    bytes_since_seed: u128,
}

impl<E: EntropySource> Rng<E> {
    /// Number of bytes after which the ChaCha20 stream cycles and must be reseeded.
    const CYCLE_LENGTH: u128 = 1 << 70; // 1 ZiB (zebibyte)

    /// # Arguments
    ///
    /// * `source`: Entropy source for the initial seed and every reseed.
    /// * `reseed_threshold`: Optional number of output bytes after which the generator reseeds
    ///   itself. Defaults to the cycle length of the stream. A threshold of zero is treated as one.
    pub fn new(mut source: E, reseed_threshold: Option<u128>) -> Self {
        let rng = Self::seeded(&mut source);
        Rng {
            rng,
            source,
            reseed_threshold: reseed_threshold
                .unwrap_or(Self::CYCLE_LENGTH)
                .clamp(1, Self::CYCLE_LENGTH),
            bytes_since_seed: 0,
        }
    }

    pub fn reseed(&mut self) {
        self.rng = Self::seeded(&mut self.source);
        self.bytes_since_seed = 0;
    }

    fn seeded(source: &mut E) -> ChaCha20Rng {
        let mut seed = source.random_seed();
        let rng = ChaCha20Rng::from_seed(seed);
        seed.zeroize();
        rng
    }
}

impl<E: EntropySource> CryptoRng for Rng<E> {}

impl<E: EntropySource> RngCore for Rng<E> {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut remaining = dest;
        while !remaining.is_empty() {
            let budget = self.reseed_threshold - self.bytes_since_seed;
            let chunk_len = budget.min(remaining.len() as u128) as usize;
            let (now, later) = remaining.split_at_mut(chunk_len);
            self.rng.fill_bytes(now);
            self.bytes_since_seed += chunk_len as u128;
            if self.bytes_since_seed >= self.reseed_threshold {
                self.reseed();
            }
            remaining = later;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#![allow(dead_code)]

use eckeygen::{
    common::key_pair::EncodedKeyPair,
    crypto::{curve::CurveId, ecc::check_key_pair, rng::EntropySource},
    generator::KeyPairGenerator,
};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

pub const NUM_CONTEXTS: usize = 4;

pub type TestGenerator = KeyPairGenerator<NoopRawMutex, TestEntropySource, NUM_CONTEXTS>;
pub type SharedTestGenerator =
    KeyPairGenerator<CriticalSectionRawMutex, TestEntropySource, NUM_CONTEXTS>;

/// Deterministic entropy. Sources created with a different `start` yield different seeds.
#[derive(Default)]
pub struct TestEntropySource {
    counter: u8,
}

impl TestEntropySource {
    pub fn starting_at(start: u8) -> Self {
        Self { counter: start }
    }
}

impl EntropySource for TestEntropySource {
    fn random_seed(&mut self) -> [u8; 32] {
        let mut seed = [0u8; 32];
        for byte in &mut seed {
            *byte = self.counter;
            self.counter = self.counter.wrapping_add(1);
        }
        seed
    }
}

pub fn init_generator() -> TestGenerator {
    TestGenerator::new(TestEntropySource::default(), None)
}

/// Check size limits, encoding and `public = private * G` for a generated key pair.
pub fn assert_valid_key_pair(curve: CurveId, key_pair: &EncodedKeyPair) {
    let params = curve.params();
    let private_key = key_pair.private_key();
    let public_key = key_pair.public_key();
    assert!(!private_key.is_empty());
    assert!(private_key.len() <= params.private_key_size());
    assert_ne!(private_key[0], 0, "private key is not minimal");
    assert_eq!(public_key.len(), params.public_key_size());
    assert_eq!(public_key[0], 0x04);
    check_key_pair(curve, private_key, public_key).expect("public key does not match private key");
}

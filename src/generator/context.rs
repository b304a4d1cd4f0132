use crate::common::key_pair::EncodedKeyPair;
use crate::crypto::curve::{self, CurveId, CurveParams};
use crate::crypto::{ecc, Error};
use rand_chacha::rand_core::{CryptoRng, RngCore};

/// Curve-bound generation state. It only borrows the static parameters of its curve and has no
/// mutable state of its own, so every key pair generated from it is independent of the others.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GenerationContext {
    params: &'static CurveParams,
}

impl GenerationContext {
    /// Resolve `curve_id` and run the one-time checks for its curve.
    pub fn new(curve_id: i32) -> Result<Self, Error> {
        let params = curve::resolve(curve_id)?;
        ecc::check_curve(params)?;
        Ok(Self { params })
    }

    pub fn curve(&self) -> CurveId {
        self.params.id
    }

    pub fn params(&self) -> &'static CurveParams {
        self.params
    }

    pub fn generate<R>(&self, rng: &mut R) -> Result<EncodedKeyPair, Error>
    where
        R: CryptoRng + RngCore,
    {
        ecc::generate_key_pair(self.params.id, rng)
    }
}

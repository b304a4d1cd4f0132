pub mod curve;
pub mod ecc;
pub mod rng;

/// Common errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, displaydoc::Display)]
pub enum Error {
    /// curve identifier {0} does not name a supported curve
    InvalidCurve(i32),
    /// failed to initialize generation state for the curve
    InitializationFailure,
    /// the curve library produced an unusable key pair
    GenerationFailure,
    /// output buffer for the encoded key pair could not be produced
    AllocationFailure,
    /// invalid private key format
    InvalidPrivateKey,
    /// invalid public key format
    InvalidPublicKey,
}

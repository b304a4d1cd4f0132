use crate::crypto;
use crate::generator;

/// Raw status of an operation of the foreign interface. Everything but `Ok` is a failure and comes
/// without any output.
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StatusRaw {
    /// The operation succeeded.
    Ok = 0,
    /// The curve identifier does not name a supported curve.
    InvalidCurve = 1,
    /// Context or key generation setup failed.
    InitializationFailure = 2,
    /// The underlying scalar/point generation failed.
    GenerationFailure = 3,
    /// The output buffer could not be produced.
    AllocationFailure = 4,
    /// The handle does not refer to a live generation context.
    InvalidHandle = 5,
}

impl From<crypto::Error> for StatusRaw {
    fn from(value: crypto::Error) -> Self {
        match value {
            crypto::Error::InvalidCurve(_) => StatusRaw::InvalidCurve,
            crypto::Error::InitializationFailure => StatusRaw::InitializationFailure,
            crypto::Error::GenerationFailure
            | crypto::Error::InvalidPrivateKey
            | crypto::Error::InvalidPublicKey => StatusRaw::GenerationFailure,
            crypto::Error::AllocationFailure => StatusRaw::AllocationFailure,
        }
    }
}

impl From<generator::Error> for StatusRaw {
    fn from(value: generator::Error) -> Self {
        match value {
            generator::Error::Crypto(e) => e.into(),
            generator::Error::InvalidHandle => StatusRaw::InvalidHandle,
            // A full context table is a failure to set up the context
            generator::Error::TooManyContexts => StatusRaw::InitializationFailure,
        }
    }
}

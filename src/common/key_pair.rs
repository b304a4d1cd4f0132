use crate::common::limits::{MAX_PRIVATE_KEY_SIZE, MAX_PUBLIC_KEY_SIZE};
use crate::crypto::Error;
use core::fmt;
use heapless::Vec;
use zeroize::Zeroize;

/// Externally visible form of a freshly generated key pair.
///
/// * The private key is the scalar as a minimal-length big-endian unsigned integer. It carries no
///   sign byte and is **not** left-padded to the field size, so it can be shorter than the curve's
///   nominal key length whenever the leading bits of the scalar are zero. Consumers that need a
///   fixed width have to pad it themselves.
/// * The public key is the SEC1 uncompressed point `0x04 || X || Y` with both coordinates at the
///   fixed field size of the curve.
///
/// The private key bytes are wiped when the value is dropped.
pub struct EncodedKeyPair {
    private_key: Vec<u8, MAX_PRIVATE_KEY_SIZE>,
    public_key: Vec<u8, MAX_PUBLIC_KEY_SIZE>,
}

impl EncodedKeyPair {
    /// Copy already encoded key material into a new key pair.
    ///
    /// returns: `AllocationFailure` if either key does not fit its buffer.
    pub fn try_new(private_key: &[u8], public_key: &[u8]) -> Result<Self, Error> {
        let mut key_pair = EncodedKeyPair {
            private_key: Vec::new(),
            public_key: Vec::new(),
        };
        key_pair
            .private_key
            .extend_from_slice(private_key)
            .map_err(|_| Error::AllocationFailure)?;
        key_pair
            .public_key
            .extend_from_slice(public_key)
            .map_err(|_| Error::AllocationFailure)?;
        Ok(key_pair)
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

impl Drop for EncodedKeyPair {
    fn drop(&mut self) {
        self.private_key[..].zeroize();
    }
}

impl fmt::Debug for EncodedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedKeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key.as_slice())
            .finish()
    }
}

//! `extern "C"` interface around one process-wide [KeyPairGenerator].
//!
//! Curve identifiers are OpenSSL NIDs. Context handles are 64-bit integers where 0 means "no
//! context". Key pairs are written to a caller-provided [RawKeyPair]; the private key is the
//! unpadded big-endian scalar, so `private_key_len` may be smaller than the curve's field size.

use crate::common::key_pair::EncodedKeyPair;
use crate::common::limits::{MAX_PRIVATE_KEY_SIZE, MAX_PUBLIC_KEY_SIZE};
use crate::config::generator::{MAX_CONTEXTS, RESEED_THRESHOLD};
use crate::generator::table::ContextHandle;
use crate::generator::{Error, KeyPairGenerator};
use crate::integration::os_entropy::OsEntropySource;
use crate::integration::raw_errors::StatusRaw;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use once_cell::sync::Lazy;
use std::panic::{self, AssertUnwindSafe};
use zeroize::Zeroize;

type GlobalGenerator = KeyPairGenerator<CriticalSectionRawMutex, OsEntropySource, MAX_CONTEXTS>;

static GENERATOR: Lazy<GlobalGenerator> =
    Lazy::new(|| GlobalGenerator::new(OsEntropySource, Some(RESEED_THRESHOLD)));

/// Raw version of [EncodedKeyPair].
#[repr(C)]
#[derive(Clone)]
pub struct RawKeyPair {
    pub private_key: [u8; MAX_PRIVATE_KEY_SIZE],
    pub private_key_len: usize,
    pub public_key: [u8; MAX_PUBLIC_KEY_SIZE],
    pub public_key_len: usize,
}

impl RawKeyPair {
    pub const EMPTY: RawKeyPair = RawKeyPair {
        private_key: [0u8; MAX_PRIVATE_KEY_SIZE],
        private_key_len: 0,
        public_key: [0u8; MAX_PUBLIC_KEY_SIZE],
        public_key_len: 0,
    };

    pub fn private_key(&self) -> &[u8] {
        &self.private_key[..self.private_key_len.min(MAX_PRIVATE_KEY_SIZE)]
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key[..self.public_key_len.min(MAX_PUBLIC_KEY_SIZE)]
    }

    fn clear(&mut self) {
        self.private_key.zeroize();
        self.public_key.fill(0);
        self.private_key_len = 0;
        self.public_key_len = 0;
    }

    fn fill(&mut self, key_pair: &EncodedKeyPair) {
        let private_key = key_pair.private_key();
        let public_key = key_pair.public_key();
        self.private_key[..private_key.len()].copy_from_slice(private_key);
        self.private_key_len = private_key.len();
        self.public_key[..public_key.len()].copy_from_slice(public_key);
        self.public_key_len = public_key.len();
    }
}

/// Run `f` with the global generator. A panic inside is reported as an initialization failure.
fn with_generator<T>(f: impl FnOnce(&GlobalGenerator) -> Result<T, Error>) -> Result<T, StatusRaw> {
    match panic::catch_unwind(AssertUnwindSafe(|| f(&GENERATOR))) {
        Ok(result) => result.map_err(StatusRaw::from),
        Err(_) => {
            log::error!("key pair generator panicked");
            Err(StatusRaw::InitializationFailure)
        }
    }
}

fn write_key_pair(
    out: &mut RawKeyPair,
    generate: impl FnOnce(&GlobalGenerator) -> Result<EncodedKeyPair, Error>,
) -> StatusRaw {
    out.clear();
    match with_generator(generate) {
        Ok(key_pair) => {
            out.fill(&key_pair);
            StatusRaw::Ok
        }
        Err(status) => status,
    }
}

/// Generate one key pair for `curve_id`.
///
/// # Safety
///
/// `out` must be null or point to a valid, writable [RawKeyPair]. A null `out` is reported as
/// `AllocationFailure` without generating anything.
#[no_mangle]
pub unsafe extern "C" fn eckeygen_generate(curve_id: i32, out: *mut RawKeyPair) -> StatusRaw {
    // SAFETY: The caller guarantees that `out` is either null or valid for writes.
    let Some(out) = (unsafe { out.as_mut() }) else {
        return StatusRaw::AllocationFailure;
    };
    write_key_pair(out, |generator| generator.generate(curve_id))
}

/// Create a generation context for `curve_id`.
///
/// returns: The context handle or 0 on failure.
#[no_mangle]
pub extern "C" fn eckeygen_context_create(curve_id: i32) -> i64 {
    with_generator(|generator| generator.create_context(curve_id))
        .map(ContextHandle::into_raw)
        .unwrap_or(0)
}

/// Release a generation context. 0 and handles that are not live are ignored.
#[no_mangle]
pub extern "C" fn eckeygen_context_free(handle: i64) {
    let Some(handle) = ContextHandle::from_raw(handle) else {
        return;
    };
    let _ = with_generator(|generator| {
        generator.free_context(handle);
        Ok(())
    });
}

/// Generate one key pair from the context behind `handle`.
///
/// # Safety
///
/// `out` must be null or point to a valid, writable [RawKeyPair]. A null `out` is reported as
/// `AllocationFailure` without generating anything.
#[no_mangle]
pub unsafe extern "C" fn eckeygen_context_generate(handle: i64, out: *mut RawKeyPair) -> StatusRaw {
    // SAFETY: The caller guarantees that `out` is either null or valid for writes.
    let Some(out) = (unsafe { out.as_mut() }) else {
        return StatusRaw::AllocationFailure;
    };
    let Some(handle) = ContextHandle::from_raw(handle) else {
        out.clear();
        return StatusRaw::InvalidHandle;
    };
    write_key_pair(out, |generator| generator.generate_from_context(handle))
}

pub mod context;
pub mod table;

use crate::common::key_pair::EncodedKeyPair;
use crate::config::generator::MAX_CONTEXTS;
use crate::crypto;
use crate::crypto::curve::{self, CurveId};
use crate::crypto::ecc;
use crate::crypto::rng::{EntropySource, Rng};
use context::GenerationContext;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use table::{ContextHandle, ContextTable};

#[derive(Copy, Clone, Debug, Eq, PartialEq, displaydoc::Display)]
pub enum Error {
    /// {0}
    Crypto(crypto::Error),
    /// no live generation context for the given handle
    InvalidHandle,
    /// all generation context slots are in use
    TooManyContexts,
}

impl From<crypto::Error> for Error {
    fn from(value: crypto::Error) -> Self {
        Error::Crypto(value)
    }
}

struct Inner<E: EntropySource, const N: usize> {
    rng: Rng<E>,
    contexts: ContextTable<N>,
}

/// Elliptic curve key pair generator offering one-shot generation and reusable, handle based
/// generation contexts.
///
/// All state (the RNG and the context table) sits behind one blocking mutex, so a generator can
/// be shared between threads when `M` is a thread-safe raw mutex. Calls on the same handle from
/// different threads are serialized.
pub struct KeyPairGenerator<M: RawMutex, E: EntropySource, const N: usize = MAX_CONTEXTS> {
    inner: Mutex<M, RefCell<Inner<E, N>>>,
}

impl<M: RawMutex, E: EntropySource, const N: usize> KeyPairGenerator<M, E, N> {
    /// # Arguments
    ///
    /// * `source`: Entropy source used to seed the generator RNG.
    /// * `reseed_threshold`: Optional number of random bytes after which the RNG reseeds itself.
    pub fn new(source: E, reseed_threshold: Option<u128>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                rng: Rng::new(source, reseed_threshold),
                contexts: ContextTable::new(),
            })),
        }
    }

    /// Generate a single key pair for `curve_id` without keeping any state.
    ///
    /// Only the curve lookup precedes generation. The library consistency check of
    /// [GenerationContext::new] is left to context creation.
    pub fn generate(&self, curve_id: i32) -> Result<EncodedKeyPair, Error> {
        let params = curve::resolve(curve_id).inspect_err(|e| {
            log::warn!("one-shot generation for curve {curve_id} rejected: {e}");
        })?;
        self.inner
            .lock(|inner| ecc::generate_key_pair(params.id, &mut inner.borrow_mut().rng))
            .map_err(|e| {
                log::warn!("one-shot generation on {} failed: {e}", params.name);
                e.into()
            })
    }

    /// Create a generation context bound to `curve_id`.
    pub fn create_context(&self, curve_id: i32) -> Result<ContextHandle, Error> {
        let context = GenerationContext::new(curve_id).inspect_err(|e| {
            log::warn!("generation context for curve {curve_id} rejected: {e}");
        })?;
        let handle = self
            .inner
            .lock(|inner| inner.borrow_mut().contexts.insert(context))
            .ok_or_else(|| {
                log::warn!("no free generation context slot left (capacity {})", N);
                Error::TooManyContexts
            })?;
        log::debug!(
            "created {} generation context {:#x}",
            context.params().name,
            handle.into_raw()
        );
        Ok(handle)
    }

    /// Generate a fresh key pair from a live context.
    pub fn generate_from_context(&self, handle: ContextHandle) -> Result<EncodedKeyPair, Error> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            let Inner { rng, contexts } = &mut *inner;
            let Some(context) = contexts.get(handle) else {
                log::warn!("generation on unknown context {:#x}", handle.into_raw());
                return Err(Error::InvalidHandle);
            };
            context.generate(rng).map_err(|e| {
                log::warn!("generation on context {:#x} failed: {e}", handle.into_raw());
                e.into()
            })
        })
    }

    /// Release the context behind `handle`. Unknown or already freed handles are ignored.
    pub fn free_context(&self, handle: ContextHandle) {
        if self
            .inner
            .lock(|inner| inner.borrow_mut().contexts.remove(handle))
        {
            log::debug!("freed generation context {:#x}", handle.into_raw());
        }
    }

    /// Create a generation context that is released when the returned [Session] is dropped.
    pub fn session(&self, curve_id: i32) -> Result<Session<'_, M, E, N>, Error> {
        let handle = self.create_context(curve_id)?;
        Ok(Session {
            generator: self,
            handle,
        })
    }

    /// Curve of a live context.
    pub fn context_curve(&self, handle: ContextHandle) -> Option<CurveId> {
        self.inner.lock(|inner| {
            inner
                .borrow()
                .contexts
                .get(handle)
                .map(|context| context.curve())
        })
    }

    /// Number of contexts that have been created and not yet freed.
    pub fn live_contexts(&self) -> usize {
        self.inner.lock(|inner| inner.borrow().contexts.live_count())
    }
}

/// Exclusively owned generation context. Dropping the session frees the context.
pub struct Session<'g, M: RawMutex, E: EntropySource, const N: usize> {
    generator: &'g KeyPairGenerator<M, E, N>,
    handle: ContextHandle,
}

impl<M: RawMutex, E: EntropySource, const N: usize> Session<'_, M, E, N> {
    pub fn generate(&mut self) -> Result<EncodedKeyPair, Error> {
        self.generator.generate_from_context(self.handle)
    }

    pub fn handle(&self) -> ContextHandle {
        self.handle
    }
}

impl<M: RawMutex, E: EntropySource, const N: usize> Drop for Session<'_, M, E, N> {
    fn drop(&mut self) {
        self.generator.free_context(self.handle);
    }
}

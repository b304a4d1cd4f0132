/// Maximum number of generation contexts that can be live at the same time in one generator.
pub const MAX_CONTEXTS: usize = 64;

/// Number of random bytes after which the generator RNG reseeds itself from its entropy source.
pub const RESEED_THRESHOLD: u128 = 1 << 20; // 1 MiB

/// Largest field size of any supported curve in bytes (NIST P-521).
pub const MAX_COORDINATE_SIZE: usize = 66;

/// Maximum length of an encoded private key. Private keys are never padded, so this is an upper
/// bound only.
pub const MAX_PRIVATE_KEY_SIZE: usize = MAX_COORDINATE_SIZE;

/// Maximum length of an uncompressed SEC1 encoded public key (tag byte plus both coordinates).
pub const MAX_PUBLIC_KEY_SIZE: usize = 1 + 2 * MAX_COORDINATE_SIZE;

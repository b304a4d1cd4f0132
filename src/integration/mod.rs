#[cfg(feature = "ffi")]
pub mod os_entropy;
#[cfg(feature = "ffi")]
pub mod raw;
pub mod raw_errors;

//! Elliptic curve key pair generation.
//!
//! Key pairs are produced either in one shot for a curve identifier or from reusable generation
//! contexts referenced by handles. Both paths share one encoder: the private key is the unpadded
//! big-endian scalar and the public key the uncompressed SEC1 point.
#![no_std]

#[cfg(feature = "ffi")]
extern crate std;

pub mod common;
pub mod config;
pub mod crypto;
pub mod generator;
pub mod integration;

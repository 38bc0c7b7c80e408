//! Error types for the X15 core

use crate::primitives::Algorithm;

/// Errors raised while preparing the hash chain or decoding its inputs.
///
/// Hashing and scanning themselves never fail; only setup and byte-slice
/// constructors do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No registered implementation of this primitive runs on the host
    #[error("no usable implementation registered for {0}")]
    MissingPrimitive(Algorithm),

    /// A byte slice had the wrong length for the value being decoded
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result alias used across the core crate
pub type Result<T> = core::result::Result<T, Error>;

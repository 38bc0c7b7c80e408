//! # X15 Core Algorithm
//!
//! Proof-of-work hashing for X15 coins: a fixed chain of fifteen 512-bit
//! hash primitives, a one-word difficulty pre-filter and the nonce search
//! loop a CPU miner runs per thread.
//!
//! ## Chain
//!
//! ```text
//! header (80B) -> blake -> bmw -> groestl -> skein -> jh -> keccak -> luffa
//!   -> cubehash -> shavite -> simd -> echo -> hamsi -> fugue -> shabal
//!   -> whirlpool -> first 32 bytes = digest
//! ```
//!
//! The header is twenty native-order words serialized big-endian; the
//! nonce is word 19. Digests and targets are compared as 256-bit numbers
//! in eight little-endian words, word 7 most significant.
//!
//! ## Primitives
//!
//! Primitives are supplied through a [`PrimitiveRegistry`]. The registry
//! from [`PrimitiveRegistry::with_builtin`] carries the RustCrypto
//! implementations (Groestl, Skein, JH, Keccak, Shabal, Whirlpool); the
//! remaining stages must be registered by the embedder before
//! [`PrimitiveTemplate::initialize`] succeeds.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use x15_core::{Capabilities, HashChain, Header, NonceRange, PrimitiveRegistry,
//!                PrimitiveTemplate, Target, scan};
//!
//! let mut registry = PrimitiveRegistry::with_builtin();
//! // registry.register(Algorithm::Blake, Backend::Portable, || MyBlake::new());
//! // ...
//! let template = PrimitiveTemplate::initialize(&registry, &Capabilities::detect())?;
//! let chain = HashChain::new(template);
//!
//! let mut header = Header::from_words(words);
//! let report = scan(&chain, &mut header, &Target::with_leading_zero_bits(20),
//!                   NonceRange::new(0, 1 << 20), &AtomicBool::new(false));
//! ```
//!
//! ## no_std Support
//!
//! Without the default `std` feature the crate only needs `alloc`:
//!
//! ```toml
//! [dependencies]
//! x15-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod backend;
mod chain;
mod error;
mod header;
mod mask;
mod params;
mod primitives;
mod scan;
mod target;
mod template;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{Backend, Capabilities};
pub use chain::HashChain;
pub use error::{Error, Result};
pub use header::Header;
pub use mask::{DifficultyMask, MASK_TABLE};
pub use params::*;
pub use primitives::{
    Algorithm, DigestPrimitive, Groestl512, Jh512, Keccak512, Primitive, Shabal512, Skein512,
    Whirlpool512,
};
pub use scan::{NonceRange, ScanOutcome, ScanReport, scan};
pub use target::{Digest, Target};
pub use template::{PrimitiveRegistry, PrimitiveTemplate};

//! Deterministic stand-in primitives for tests and benchmarks
//!
//! Each stand-in is SHA-512 keyed by its stage name: the output of stage
//! `s` on input `m` is `SHA-512(name(s) || m)`. Outputs are NOT X15
//! compatible; they only pin chain order, chaining and truncation so the
//! pipeline and the scanner can be tested without real primitives.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use digest::Digest;
use sha2::Sha512;

use crate::backend::{Backend, Capabilities};
use crate::chain::HashChain;
use crate::params::STAGE_OUTPUT_SIZE;
use crate::primitives::{Algorithm, DigestPrimitive, Primitive};
use crate::template::{PrimitiveRegistry, PrimitiveTemplate};

/// SHA-512 keyed with the stage name
#[derive(Clone)]
pub struct StandIn(DigestPrimitive<Sha512>);

impl StandIn {
    /// Portable stand-in for `algorithm`
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_backend(algorithm, Backend::Portable)
    }

    /// Stand-in reporting `backend`; output is identical for every backend
    pub fn with_backend(algorithm: Algorithm, backend: Backend) -> Self {
        let template = Sha512::new_with_prefix(algorithm.name().as_bytes());
        Self(DigestPrimitive::from_template(algorithm, backend, template))
    }
}

impl Primitive for StandIn {
    fn algorithm(&self) -> Algorithm {
        self.0.algorithm()
    }

    fn backend(&self) -> Backend {
        self.0.backend()
    }

    fn hash_into(&self, input: &[u8], output: &mut [u8; STAGE_OUTPUT_SIZE]) {
        self.0.hash_into(input, output)
    }
}

/// Registry with a portable stand-in for every stage
pub fn registry() -> PrimitiveRegistry {
    let mut registry = PrimitiveRegistry::new();
    for algorithm in Algorithm::CHAIN {
        registry.register(algorithm, Backend::Portable, move || StandIn::new(algorithm));
    }
    registry
}

/// Fully initialized stand-in chain, ready to share between threads
pub fn chain() -> Arc<HashChain> {
    let template = match PrimitiveTemplate::initialize(&registry(), &Capabilities::portable()) {
        Ok(template) => template,
        Err(e) => unreachable!("stand-in registry covers every stage: {e}"),
    };
    Arc::new(HashChain::new(template))
}

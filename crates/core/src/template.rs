//! Primitive registry and the shared context template
//!
//! The registry collects every implementation the embedder can offer, the
//! template is what remains after selection: exactly one initialized
//! primitive per chain stage. The template is built once per process,
//! never mutated afterwards, and shared by reference across all workers.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::backend::{Backend, Capabilities};
use crate::error::{Error, Result};
use crate::params::STAGES;
use crate::primitives::{
    Algorithm, Groestl512, Jh512, Keccak512, Primitive, Shabal512, Skein512, Whirlpool512,
};

type Builder = Box<dyn Fn() -> Box<dyn Primitive> + Send + Sync>;

/// A registered but not yet built implementation
struct Candidate {
    algorithm: Algorithm,
    backend: Backend,
    build: Builder,
}

/// Set of candidate implementations, keyed by algorithm and backend.
///
/// Builders are only invoked for the candidates selected by
/// [`PrimitiveTemplate::initialize`], so expensive table setup of unused
/// variants never runs.
#[derive(Default)]
pub struct PrimitiveRegistry {
    candidates: Vec<Candidate>,
}

impl PrimitiveRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the portable RustCrypto primitives:
    /// Groestl, Skein, JH, Keccak, Shabal and Whirlpool.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(Algorithm::Groestl, Backend::Portable, || {
                Groestl512::new(Algorithm::Groestl)
            })
            .register(Algorithm::Skein, Backend::Portable, || {
                Skein512::new(Algorithm::Skein)
            })
            .register(Algorithm::Jh, Backend::Portable, || Jh512::new(Algorithm::Jh))
            .register(Algorithm::Keccak, Backend::Portable, || {
                Keccak512::new(Algorithm::Keccak)
            })
            .register(Algorithm::Shabal, Backend::Portable, || {
                Shabal512::new(Algorithm::Shabal)
            })
            .register(Algorithm::Whirlpool, Backend::Portable, || {
                Whirlpool512::new(Algorithm::Whirlpool)
            });
        registry
    }

    /// Offer an implementation of `algorithm` for `backend`.
    ///
    /// Registering the same pair twice keeps both; the later one wins.
    pub fn register<F, P>(&mut self, algorithm: Algorithm, backend: Backend, build: F) -> &mut Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: Primitive + 'static,
    {
        self.candidates.push(Candidate {
            algorithm,
            backend,
            build: Box::new(move || Box::new(build()) as Box<dyn Primitive>),
        });
        self
    }

    /// Backends registered for `algorithm`, in registration order
    pub fn backends(&self, algorithm: Algorithm) -> impl Iterator<Item = Backend> + '_ {
        self.candidates
            .iter()
            .filter(move |c| c.algorithm == algorithm)
            .map(|c| c.backend)
    }

    /// Best candidate for `algorithm` that the host can run
    fn select(&self, algorithm: Algorithm, caps: &Capabilities) -> Option<&Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.algorithm == algorithm && c.backend.is_supported_by(caps))
            // max_by_key returns the last maximum, so later registrations win ties
            .max_by_key(|c| c.backend)
    }
}

/// One initialized primitive per chain stage, in chain order.
///
/// Read-only after construction; every hash call works on private clones
/// of these contexts.
pub struct PrimitiveTemplate {
    stages: Vec<Box<dyn Primitive>>,
}

impl PrimitiveTemplate {
    /// Select and build one implementation per stage.
    ///
    /// Fails with [`Error::MissingPrimitive`] naming the first stage that
    /// has no implementation runnable on a host with `caps`.
    pub fn initialize(registry: &PrimitiveRegistry, caps: &Capabilities) -> Result<Self> {
        let mut stages = Vec::with_capacity(STAGES);
        for algorithm in Algorithm::CHAIN {
            let candidate = registry
                .select(algorithm, caps)
                .ok_or(Error::MissingPrimitive(algorithm))?;
            let primitive = (candidate.build)();
            debug_assert_eq!(primitive.algorithm(), algorithm);
            stages.push(primitive);
        }
        Ok(Self { stages })
    }

    /// The primitive running at `stage` (zero-based)
    #[inline]
    pub fn stage(&self, stage: usize) -> &dyn Primitive {
        self.stages[stage].as_ref()
    }

    /// All stages in chain order
    #[inline]
    pub fn stages(&self) -> impl Iterator<Item = &dyn Primitive> + '_ {
        self.stages.iter().map(|p| p.as_ref())
    }

    /// The selected `(algorithm, backend)` pairs, for logging
    pub fn selection(&self) -> impl Iterator<Item = (Algorithm, Backend)> + '_ {
        self.stages().map(|p| (p.algorithm(), p.backend()))
    }
}

impl core::fmt::Debug for PrimitiveTemplate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.selection()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, StandIn};

    #[test]
    fn test_builtin_registry_is_incomplete() {
        let registry = PrimitiveRegistry::with_builtin();
        let err = PrimitiveTemplate::initialize(&registry, &Capabilities::portable()).unwrap_err();
        assert_eq!(err, Error::MissingPrimitive(Algorithm::Blake));
    }

    #[test]
    fn test_builtin_registry_covers_rustcrypto_primitives() {
        let registry = PrimitiveRegistry::with_builtin();
        for algorithm in [
            Algorithm::Groestl,
            Algorithm::Skein,
            Algorithm::Jh,
            Algorithm::Keccak,
            Algorithm::Shabal,
            Algorithm::Whirlpool,
        ] {
            assert_eq!(
                registry.backends(algorithm).collect::<Vec<_>>(),
                vec![Backend::Portable]
            );
        }
        assert_eq!(registry.backends(Algorithm::Echo).count(), 0);
    }

    #[test]
    fn test_missing_stage_is_reported() {
        let mut partial = PrimitiveRegistry::new();
        for algorithm in Algorithm::CHAIN {
            if algorithm != Algorithm::Hamsi {
                partial.register(algorithm, Backend::Portable, move || StandIn::new(algorithm));
            }
        }
        let err = PrimitiveTemplate::initialize(&partial, &Capabilities::portable()).unwrap_err();
        assert_eq!(err, Error::MissingPrimitive(Algorithm::Hamsi));

        partial.register(Algorithm::Hamsi, Backend::Portable, || {
            StandIn::new(Algorithm::Hamsi)
        });
        assert!(PrimitiveTemplate::initialize(&partial, &Capabilities::portable()).is_ok());
    }

    #[test]
    fn test_selection_prefers_supported_accelerated_backend() {
        let mut registry = testing::registry();
        registry.register(Algorithm::Echo, Backend::Aes, || {
            StandIn::with_backend(Algorithm::Echo, Backend::Aes)
        });

        let portable = PrimitiveTemplate::initialize(&registry, &Capabilities::portable()).unwrap();
        assert_eq!(portable.stage(Algorithm::Echo.stage()).backend(), Backend::Portable);

        let caps = Capabilities {
            aes: true,
            avx2: false,
        };
        let accelerated = PrimitiveTemplate::initialize(&registry, &caps).unwrap();
        assert_eq!(accelerated.stage(Algorithm::Echo.stage()).backend(), Backend::Aes);
    }

    #[test]
    fn test_unsupported_backend_alone_is_missing() {
        let mut registry = PrimitiveRegistry::new();
        for algorithm in Algorithm::CHAIN {
            let backend = if algorithm == Algorithm::Simd {
                Backend::Avx2
            } else {
                Backend::Portable
            };
            registry.register(algorithm, backend, move || {
                StandIn::with_backend(algorithm, backend)
            });
        }
        let err = PrimitiveTemplate::initialize(&registry, &Capabilities::portable()).unwrap_err();
        assert_eq!(err, Error::MissingPrimitive(Algorithm::Simd));
    }

    #[test]
    fn test_selection_lists_chain_order() {
        let template =
            PrimitiveTemplate::initialize(&testing::registry(), &Capabilities::portable()).unwrap();
        let algorithms: Vec<Algorithm> = template.selection().map(|(a, _)| a).collect();
        assert_eq!(algorithms, Algorithm::CHAIN.to_vec());
    }
}

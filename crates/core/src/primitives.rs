//! The fifteen X15 hash primitives
//!
//! Every primitive is treated as an opaque, total transform from an input of
//! any length to a 512-bit output. Concrete implementations live behind the
//! [`Primitive`] trait so portable and accelerated variants can be swapped
//! without touching the chain.

use core::fmt;

use digest::Digest;
use digest::consts::U64;

use crate::backend::Backend;
use crate::params::{STAGE_OUTPUT_SIZE, STAGES};

/// Identity of a chain stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Blake,
    Bmw,
    Groestl,
    Skein,
    Jh,
    Keccak,
    Luffa,
    CubeHash,
    Shavite,
    Simd,
    Echo,
    Hamsi,
    Fugue,
    Shabal,
    Whirlpool,
}

impl Algorithm {
    /// Stage order of the chain. Index `i` consumes the output of `i - 1`.
    pub const CHAIN: [Algorithm; STAGES] = [
        Algorithm::Blake,
        Algorithm::Bmw,
        Algorithm::Groestl,
        Algorithm::Skein,
        Algorithm::Jh,
        Algorithm::Keccak,
        Algorithm::Luffa,
        Algorithm::CubeHash,
        Algorithm::Shavite,
        Algorithm::Simd,
        Algorithm::Echo,
        Algorithm::Hamsi,
        Algorithm::Fugue,
        Algorithm::Shabal,
        Algorithm::Whirlpool,
    ];

    /// Zero-based position of this primitive in the chain
    #[inline]
    pub const fn stage(self) -> usize {
        self as usize
    }

    /// Short lowercase name, e.g. `"groestl512"`
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Blake => "blake512",
            Algorithm::Bmw => "bmw512",
            Algorithm::Groestl => "groestl512",
            Algorithm::Skein => "skein512",
            Algorithm::Jh => "jh512",
            Algorithm::Keccak => "keccak512",
            Algorithm::Luffa => "luffa512",
            Algorithm::CubeHash => "cubehash512",
            Algorithm::Shavite => "shavite512",
            Algorithm::Simd => "simd512",
            Algorithm::Echo => "echo512",
            Algorithm::Hamsi => "hamsi512",
            Algorithm::Fugue => "fugue512",
            Algorithm::Shabal => "shabal512",
            Algorithm::Whirlpool => "whirlpool512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One initialized hash primitive.
///
/// The value itself is the context template: `hash_into` must work on a
/// private copy of it and leave `self` untouched, so a single instance can
/// serve any number of threads at once.
pub trait Primitive: Send + Sync {
    /// Which chain stage this implements
    fn algorithm(&self) -> Algorithm;

    /// Implementation family, used for selection and logging
    fn backend(&self) -> Backend {
        Backend::Portable
    }

    /// Hash `input` into a full 512-bit `output`
    fn hash_into(&self, input: &[u8], output: &mut [u8; STAGE_OUTPUT_SIZE]);
}

/// Adapter exposing any RustCrypto 512-bit [`Digest`] as a [`Primitive`].
///
/// The wrapped hasher is built once (optionally with a prefix already
/// absorbed) and cloned for every call.
#[derive(Clone)]
pub struct DigestPrimitive<D> {
    algorithm: Algorithm,
    backend: Backend,
    template: D,
}

impl<D> DigestPrimitive<D>
where
    D: Digest<OutputSize = U64> + Clone + Send + Sync,
{
    /// Wrap a freshly initialized hasher
    pub fn new(algorithm: Algorithm) -> Self {
        Self::from_template(algorithm, Backend::Portable, D::new())
    }

    /// Wrap an already prepared hasher state
    pub fn from_template(algorithm: Algorithm, backend: Backend, template: D) -> Self {
        Self {
            algorithm,
            backend,
            template,
        }
    }
}

impl<D> Primitive for DigestPrimitive<D>
where
    D: Digest<OutputSize = U64> + Clone + Send + Sync,
{
    #[inline]
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    fn backend(&self) -> Backend {
        self.backend
    }

    #[inline]
    fn hash_into(&self, input: &[u8], output: &mut [u8; STAGE_OUTPUT_SIZE]) {
        let mut ctx = self.template.clone();
        ctx.update(input);
        output.copy_from_slice(&ctx.finalize());
    }
}

/// Groestl-512
pub type Groestl512 = DigestPrimitive<groestl::Groestl512>;

/// Skein-512 with a 512-bit output
pub type Skein512 = DigestPrimitive<skein::Skein512<U64>>;

/// JH-512
pub type Jh512 = DigestPrimitive<jh::Jh512>;

/// Keccak-512 with pre-FIPS 202 padding
pub type Keccak512 = DigestPrimitive<sha3::Keccak512>;

/// Shabal-512
pub type Shabal512 = DigestPrimitive<shabal::Shabal512>;

/// Whirlpool (512-bit output)
pub type Whirlpool512 = DigestPrimitive<whirlpool::Whirlpool>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order_matches_stage_index() {
        for (i, algorithm) in Algorithm::CHAIN.iter().enumerate() {
            assert_eq!(algorithm.stage(), i, "{} out of place", algorithm);
        }
    }

    #[test]
    fn test_names_are_unique() {
        for a in Algorithm::CHAIN {
            for b in Algorithm::CHAIN {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn test_keccak512_empty_vector() {
        let keccak = Keccak512::new(Algorithm::Keccak);
        let mut out = [0u8; STAGE_OUTPUT_SIZE];
        keccak.hash_into(b"", &mut out);
        assert_eq!(
            hex::encode(out),
            "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304\
             c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e"
        );
    }

    #[test]
    fn test_whirlpool_empty_vector() {
        let whirlpool = Whirlpool512::new(Algorithm::Whirlpool);
        let mut out = [0u8; STAGE_OUTPUT_SIZE];
        whirlpool.hash_into(b"", &mut out);
        assert_eq!(
            hex::encode(out),
            "19fa61d75522a4669b44e39c1d2e1726c530232130d407f89afee0964997f7a7\
             3e83be698b288febcf88e3e03c4f0757ea8964e59b63d93708b138cc42a66eb3"
        );
    }

    #[test]
    fn test_template_is_not_consumed() {
        let groestl = Groestl512::new(Algorithm::Groestl);
        let mut first = [0u8; STAGE_OUTPUT_SIZE];
        let mut second = [0u8; STAGE_OUTPUT_SIZE];
        groestl.hash_into(b"abc", &mut first);
        groestl.hash_into(b"abc", &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_builtin_outputs_differ() {
        let input = [0x5au8; 80];
        let mut outputs = [[0u8; STAGE_OUTPUT_SIZE]; 6];
        Groestl512::new(Algorithm::Groestl).hash_into(&input, &mut outputs[0]);
        Skein512::new(Algorithm::Skein).hash_into(&input, &mut outputs[1]);
        Jh512::new(Algorithm::Jh).hash_into(&input, &mut outputs[2]);
        Keccak512::new(Algorithm::Keccak).hash_into(&input, &mut outputs[3]);
        Shabal512::new(Algorithm::Shabal).hash_into(&input, &mut outputs[4]);
        Whirlpool512::new(Algorithm::Whirlpool).hash_into(&input, &mut outputs[5]);
        for i in 0..outputs.len() {
            for j in i + 1..outputs.len() {
                assert_ne!(outputs[i], outputs[j]);
            }
        }
    }
}

//! Host capability detection and backend ranking
//!
//! Vectorized or AES-assisted variants of a primitive are registered next
//! to the portable one. Detection runs once, when the template is built,
//! and the chosen variant is then used for every hash in the run.

use core::fmt;

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
cpufeatures::new!(cpuid_aes, "aes");

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
cpufeatures::new!(cpuid_avx2, "avx2");

/// Implementation family of a primitive.
///
/// Ordered by preference: when several registered variants are usable the
/// greatest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    /// Plain Rust, runs everywhere
    Portable,
    /// Uses hardware AES rounds (AES-NI or ARMv8 crypto extensions)
    Aes,
    /// Uses 256-bit AVX2 vectors
    Avx2,
}

impl Backend {
    /// Whether the host described by `caps` can run this backend
    pub fn is_supported_by(self, caps: &Capabilities) -> bool {
        match self {
            Backend::Portable => true,
            Backend::Aes => caps.aes,
            Backend::Avx2 => caps.avx2,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Portable => "portable",
            Backend::Aes => "aes",
            Backend::Avx2 => "avx2",
        })
    }
}

/// CPU features relevant to primitive selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Hardware AES round instructions
    pub aes: bool,
    /// AVX2 integer vectors
    pub avx2: bool,
}

impl Capabilities {
    /// Probe the running CPU.
    ///
    /// The result is cached by `cpufeatures`, so repeated calls are cheap,
    /// but callers are expected to detect once and pass the value around.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self {
                aes: cpuid_aes::get(),
                avx2: cpuid_avx2::get(),
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                aes: cpuid_aes::get(),
                avx2: false,
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::portable()
        }
    }

    /// A host with no optional features; forces portable implementations
    pub const fn portable() -> Self {
        Self {
            aes: false,
            avx2: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portable_always_supported() {
        assert!(Backend::Portable.is_supported_by(&Capabilities::portable()));
        assert!(!Backend::Aes.is_supported_by(&Capabilities::portable()));
        assert!(!Backend::Avx2.is_supported_by(&Capabilities::portable()));
    }

    #[test]
    fn test_backend_preference_order() {
        assert!(Backend::Avx2 > Backend::Aes);
        assert!(Backend::Aes > Backend::Portable);
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(Capabilities::detect(), Capabilities::detect());
    }
}

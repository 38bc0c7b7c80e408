//! Digest and target types, and the full 256-bit comparison
//!
//! Both values are handled as eight 32-bit words with word 7 the most
//! significant. Digest words are the little-endian reading of its bytes, so
//! byte 31 is the top byte of the number.

use core::cmp::Ordering;
use core::fmt;

use crate::error::{Error, Result};
use crate::params::{DIGEST_SIZE, HIGH_WORD, TARGET_WORDS};

/// 32-byte chain output
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_SIZE]);

impl Digest {
    /// Raw bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Word `i` of the 256-bit number (0 = least significant)
    #[inline(always)]
    pub fn word(&self, i: usize) -> u32 {
        let b = &self.0[i * 4..i * 4 + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// All eight words, least significant first
    pub fn words(&self) -> [u32; TARGET_WORDS] {
        let mut words = [0u32; TARGET_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = self.word(i);
        }
        words
    }

    /// The most significant word, inspected by the mask pre-filter
    #[inline(always)]
    pub fn high_word(&self) -> u32 {
        self.word(HIGH_WORD)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

/// 256-bit threshold a digest must not exceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    words: [u32; TARGET_WORDS],
}

impl Target {
    /// Every digest meets this target
    pub const MAX: Target = Target::from_words([u32::MAX; TARGET_WORDS]);

    /// Only the all-zero digest meets this target
    pub const ZERO: Target = Target::from_words([0; TARGET_WORDS]);

    /// Target from words, least significant first
    pub const fn from_words(words: [u32; TARGET_WORDS]) -> Self {
        Self { words }
    }

    /// Target from 32 little-endian bytes (same layout as a digest)
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DIGEST_SIZE {
            return Err(Error::InvalidLength {
                what: "target",
                expected: DIGEST_SIZE,
                actual: bytes.len(),
            });
        }
        let mut words = [0u32; TARGET_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self { words })
    }

    /// Target whose top `bits` bits are zero and all others one.
    ///
    /// A digest meets it exactly when it has at least `bits` leading zero
    /// bits (counted from the most significant end of the number).
    /// `bits` is clamped to 256.
    pub fn with_leading_zero_bits(bits: u32) -> Self {
        let mut words = [u32::MAX; TARGET_WORDS];
        let mut remaining = bits.min(256);
        for word in words.iter_mut().rev() {
            if remaining >= 32 {
                *word = 0;
                remaining -= 32;
            } else {
                *word = u32::MAX >> remaining;
                break;
            }
        }
        Self { words }
    }

    /// Words, least significant first
    #[inline]
    pub fn words(&self) -> &[u32; TARGET_WORDS] {
        &self.words
    }

    /// The most significant word, which selects the difficulty mask
    #[inline]
    pub fn high_word(&self) -> u32 {
        self.words[HIGH_WORD]
    }

    /// Full comparison: `digest <= self`.
    ///
    /// Words are compared from the most significant down; the first
    /// difference decides, and equality counts as a hit.
    pub fn is_met_by(&self, digest: &Digest) -> bool {
        for i in (0..TARGET_WORDS).rev() {
            match digest.word(i).cmp(&self.words[i]) {
                Ordering::Greater => return false,
                Ordering::Less => return true,
                Ordering::Equal => {}
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_with_words(words: [u32; TARGET_WORDS]) -> Digest {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (chunk, w) in bytes.chunks_exact_mut(4).zip(words.iter()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        Digest(bytes)
    }

    #[test]
    fn test_high_word_is_last_four_bytes() {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes[28..32].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(Digest(bytes).high_word(), 0x1234_5678);
    }

    #[test]
    fn test_extreme_targets() {
        let zero = Digest([0u8; DIGEST_SIZE]);
        let full = Digest([0xFF; DIGEST_SIZE]);
        assert!(Target::MAX.is_met_by(&full));
        assert!(Target::MAX.is_met_by(&zero));
        assert!(Target::ZERO.is_met_by(&zero));
        assert!(!Target::ZERO.is_met_by(&full));
    }

    #[test]
    fn test_comparison_decided_by_most_significant_difference() {
        let target = Target::from_words([0, 0, 0, 0, 0, 0, 5, 0x0000_FFFF]);
        // Lower high word wins regardless of the rest
        assert!(target.is_met_by(&digest_with_words([u32::MAX, 0, 0, 0, 0, 0, u32::MAX, 0x0000_FFFE])));
        // Equal high word, next word decides
        assert!(target.is_met_by(&digest_with_words([u32::MAX, 0, 0, 0, 0, 0, 4, 0x0000_FFFF])));
        assert!(!target.is_met_by(&digest_with_words([0, 0, 0, 0, 0, 0, 6, 0x0000_FFFF])));
        // Exactly equal counts
        assert!(target.is_met_by(&digest_with_words(*target.words())));
    }

    #[test]
    fn test_leading_zero_bits() {
        assert_eq!(Target::with_leading_zero_bits(0), Target::MAX);
        assert_eq!(Target::with_leading_zero_bits(256), Target::ZERO);
        assert_eq!(Target::with_leading_zero_bits(300), Target::ZERO);

        let t16 = Target::with_leading_zero_bits(16);
        assert_eq!(t16.high_word(), 0x0000_FFFF);
        assert_eq!(t16.words()[6], u32::MAX);

        let t40 = Target::with_leading_zero_bits(40);
        assert_eq!(t40.high_word(), 0);
        assert_eq!(t40.words()[6], 0x00FF_FFFF);
    }

    #[test]
    fn test_from_le_bytes_matches_digest_layout() {
        let digest = digest_with_words([1, 2, 3, 4, 5, 6, 7, 8]);
        let target = Target::from_le_bytes(digest.as_bytes()).unwrap();
        assert_eq!(target.words(), &digest.words());
        assert!(target.is_met_by(&digest));
        assert!(Target::from_le_bytes(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_digest_display_is_hex() {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes[0] = 0xAB;
        bytes[31] = 0x01;
        let s = format!("{}", Digest(bytes));
        assert_eq!(s.len(), 64);
        assert!(s.starts_with("ab00"));
        assert!(s.ends_with("0001"));
    }
}

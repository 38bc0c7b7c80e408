//! Difficulty mask: a one-word pre-filter in front of the full comparison

use crate::target::{Digest, Target};

/// `(threshold, mask)` pairs, ascending by threshold.
///
/// The first entry whose threshold is at least the target's high word
/// applies. Each mask only covers bits the target's high word has clear,
/// so a digest it rejects is above the target.
pub const MASK_TABLE: [(u32, u32); 6] = [
    (0x0000_0000, 0xFFFF_FFFF),
    (0x0000_000F, 0xFFFF_FFF0),
    (0x0000_00FF, 0xFFFF_FF00),
    (0x0000_0FFF, 0xFFFF_F000),
    (0x0000_FFFF, 0xFFFF_0000),
    (0xFFFF_FFFF, 0x0000_0000),
];

/// Mask selected once per scan from the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyMask(u32);

impl DifficultyMask {
    /// Select the mask for a target high word
    pub const fn select(target_high: u32) -> Self {
        let mut i = 0;
        while i < MASK_TABLE.len() {
            if MASK_TABLE[i].0 >= target_high {
                return Self(MASK_TABLE[i].1);
            }
            i += 1;
        }
        // unreachable: the last threshold is u32::MAX
        Self(0)
    }

    /// Select the mask for `target`
    #[inline]
    pub fn for_target(target: &Target) -> Self {
        Self::select(target.high_word())
    }

    /// Raw mask bits
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether a digest with this high word may meet the target
    #[inline(always)]
    pub const fn admits(self, digest_high: u32) -> bool {
        digest_high & self.0 == 0
    }

    /// [`admits`](Self::admits) on a full digest
    #[inline(always)]
    pub fn admits_digest(self, digest: &Digest) -> bool {
        self.admits(digest.high_word())
    }
}

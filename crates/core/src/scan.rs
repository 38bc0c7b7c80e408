//! Nonce search loop
//!
//! One call scans one contiguous nonce range for a single thread. Threads
//! running side by side each own their header and their range; they only
//! share the read-only [`HashChain`].

use core::sync::atomic::{AtomicBool, Ordering};

use crate::chain::HashChain;
use crate::header::{Header, encode_nonce};
use crate::mask::DifficultyMask;
use crate::target::{Digest, Target};

/// Nonces to scan: `start + 1 ..= max`.
///
/// `start` is the last nonce already tried, matching how a resumed scan
/// picks up from a header's current nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceRange {
    pub start: u32,
    pub max: u32,
}

impl NonceRange {
    pub const fn new(start: u32, max: u32) -> Self {
        Self { start, max }
    }

    /// Number of candidates in the range
    #[inline]
    pub const fn len(&self) -> u64 {
        self.max.saturating_sub(self.start) as u64
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.max
    }
}

/// How a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The last attempted nonce meets the target
    Found(Digest),
    /// Every nonce in the range was tried without success
    Exhausted,
    /// The cancellation flag was seen before the range was complete
    Cancelled,
}

/// Result of one [`scan`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Chain evaluations performed; always `last_nonce - start`
    pub hashes_done: u64,
    /// Last nonce attempted, or `start` if none was
    pub last_nonce: u32,
}

impl ScanReport {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Found(_))
    }

    /// The winning digest, if any
    pub fn digest(&self) -> Option<&Digest> {
        match &self.outcome {
            ScanOutcome::Found(digest) => Some(digest),
            _ => None,
        }
    }
}

/// Scan `range` for a nonce whose digest meets `target`.
///
/// On return `header`'s nonce holds [`ScanReport::last_nonce`]. The
/// `cancel` flag is polled once per nonce, so a stop request takes effect
/// within one chain evaluation. A range that is already complete reports
/// [`ScanOutcome::Exhausted`] even if `cancel` is set.
pub fn scan(
    chain: &HashChain,
    header: &mut Header,
    target: &Target,
    range: NonceRange,
    cancel: &AtomicBool,
) -> ScanReport {
    let mask = DifficultyMask::for_target(target);
    let mut bytes = header.to_be_bytes();
    let mut nonce = range.start;

    let outcome = loop {
        if nonce >= range.max {
            break ScanOutcome::Exhausted;
        }
        if cancel.load(Ordering::Relaxed) {
            break ScanOutcome::Cancelled;
        }

        nonce += 1;
        encode_nonce(&mut bytes, nonce);
        let digest = chain.hash(&bytes);

        if !mask.admits_digest(&digest) {
            continue;
        }
        if target.is_met_by(&digest) {
            break ScanOutcome::Found(digest);
        }
    };

    header.set_nonce(nonce);
    ScanReport {
        outcome,
        hashes_done: u64::from(nonce.saturating_sub(range.start)),
        last_nonce: nonce,
    }
}

//! X15 Algorithm Parameters
//!
//! Sizes of the block header, the per-stage buffers and the target as the
//! scanning loop sees them.

/// Number of 32-bit words in a block header
pub const HEADER_WORDS: usize = 20;

/// Serialized header size in bytes (80)
pub const HEADER_SIZE: usize = HEADER_WORDS * 4;

/// Index of the nonce word inside the header
pub const NONCE_INDEX: usize = 19;

/// Byte offset of the nonce inside the serialized header
pub const NONCE_OFFSET: usize = NONCE_INDEX * 4;

/// Number of primitives in the chain
pub const STAGES: usize = 15;

/// Output size of every stage (512 bits)
pub const STAGE_OUTPUT_SIZE: usize = 64;

/// Final digest size: first half of the last stage output
pub const DIGEST_SIZE: usize = 32;

/// Number of 32-bit words in a target
pub const TARGET_WORDS: usize = 8;

/// Index of the most significant target / digest word
pub const HIGH_WORD: usize = TARGET_WORDS - 1;

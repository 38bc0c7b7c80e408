//! Block header as the scanner sees it

use crate::error::{Error, Result};
use crate::params::{HEADER_SIZE, HEADER_WORDS, NONCE_INDEX, NONCE_OFFSET};

/// Twenty 32-bit header words in native order.
///
/// Hashing always works on the big-endian serialization of the words; see
/// [`Header::to_be_bytes`]. Word 19 is the nonce; the scanner only ever
/// writes that word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    words: [u32; HEADER_WORDS],
}

impl Header {
    /// Header from native-order words
    pub const fn from_words(words: [u32; HEADER_WORDS]) -> Self {
        Self { words }
    }

    /// Header from its 80-byte big-endian serialization
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != HEADER_SIZE {
            return Err(Error::InvalidLength {
                what: "header",
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }
        let mut words = [0u32; HEADER_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self { words })
    }

    /// Native-order words
    #[inline]
    pub fn words(&self) -> &[u32; HEADER_WORDS] {
        &self.words
    }

    /// Current nonce (word 19)
    #[inline]
    pub fn nonce(&self) -> u32 {
        self.words[NONCE_INDEX]
    }

    /// Overwrite the nonce word
    #[inline]
    pub fn set_nonce(&mut self, nonce: u32) {
        self.words[NONCE_INDEX] = nonce;
    }

    /// Byte-swap every word into the 80-byte hashing input
    pub fn to_be_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::from_words([0; HEADER_WORDS])
    }
}

/// Write `nonce` big-endian into an already serialized header
#[inline(always)]
pub(crate) fn encode_nonce(bytes: &mut [u8; HEADER_SIZE], nonce: u32) {
    bytes[NONCE_OFFSET..].copy_from_slice(&nonce.to_be_bytes());
}

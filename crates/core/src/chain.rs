//! The X15 hash chain
//!
//! Stage 1 hashes the 80-byte header, every later stage hashes the previous
//! 64-byte output, and the digest is the first half of the stage 15 output.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::params::{DIGEST_SIZE, HEADER_SIZE, STAGE_OUTPUT_SIZE, STAGES};
use crate::target::Digest;
use crate::template::PrimitiveTemplate;

/// Pure function from a serialized header to its digest.
///
/// Holds only the read-only template; every call works on its own stack
/// buffers and context clones, so one chain can be shared by any number of
/// threads.
#[derive(Debug)]
pub struct HashChain {
    template: PrimitiveTemplate,
}

impl HashChain {
    /// Wrap an initialized template
    pub fn new(template: PrimitiveTemplate) -> Self {
        Self { template }
    }

    /// The primitives this chain runs
    #[inline]
    pub fn template(&self) -> &PrimitiveTemplate {
        &self.template
    }

    /// Hash one serialized header
    pub fn hash(&self, header: &[u8; HEADER_SIZE]) -> Digest {
        let mut current = [0u8; STAGE_OUTPUT_SIZE];
        let mut next = [0u8; STAGE_OUTPUT_SIZE];

        self.template.stage(0).hash_into(header, &mut current);
        for stage in 1..STAGES {
            self.template.stage(stage).hash_into(&current, &mut next);
            core::mem::swap(&mut current, &mut next);
        }

        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&current[..DIGEST_SIZE]);
        Digest(digest)
    }

    /// Every intermediate stage output, in chain order
    pub fn trace(&self, header: &[u8; HEADER_SIZE]) -> [[u8; STAGE_OUTPUT_SIZE]; STAGES] {
        let mut outputs = [[0u8; STAGE_OUTPUT_SIZE]; STAGES];
        self.template.stage(0).hash_into(header, &mut outputs[0]);
        for stage in 1..STAGES {
            let (done, rest) = outputs.split_at_mut(stage);
            self.template
                .stage(stage)
                .hash_into(&done[stage - 1], &mut rest[0]);
        }
        outputs
    }

    /// Hash a batch of headers; results are in input order
    pub fn hash_many(&self, headers: &[[u8; HEADER_SIZE]]) -> Vec<Digest> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            headers.par_iter().map(|h| self.hash(h)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            headers.iter().map(|h| self.hash(h)).collect()
        }
    }
}

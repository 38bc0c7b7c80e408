//! X15 CPU Miner Library
//!
//! Multi-threaded nonce search over the X15 proof-of-work.
//!
//! # Overview
//!
//! The hashing itself lives in [`algorithm`] (the `x15-core` crate): the
//! fifteen-stage chain, the difficulty mask, the full target comparison and
//! the single-threaded scan loop. This crate runs that loop on a pool of
//! threads, splits the nonce space between them, and reports solutions and
//! hash-rate as they happen.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use x15::algorithm::{Capabilities, HashChain, NonceRange, PrimitiveRegistry,
//!                      PrimitiveTemplate, Target};
//! use x15::{Job, Miner, MinerConfig};
//!
//! let registry = my_primitives(PrimitiveRegistry::with_builtin());
//! let template = PrimitiveTemplate::initialize(&registry, &Capabilities::detect())?;
//! let miner = Miner::new(Arc::new(HashChain::new(template)), MinerConfig::from_file("x15.json")?);
//!
//! let session = miner.start(Job {
//!     header,
//!     target: Target::with_leading_zero_bits(24),
//!     range: NonceRange::new(0, u32::MAX),
//! })?;
//! for solution in session.solutions() {
//!     println!("{}", serde_json::to_string(&solution.submission())?);
//! }
//! let summary = session.join()?;
//! ```

// Re-export the core algorithm
pub use x15_core as algorithm;

pub mod config;
pub mod error;
pub mod miner;

// Convenience re-exports
pub use config::MinerConfig;
pub use error::{MinerError, Result};
pub use miner::{
    Job, Miner, MiningSession, SessionSummary, Solution, Submission, WorkerExit, WorkerReport,
};

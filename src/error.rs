//! Miner error types

use std::io;

/// Errors raised while configuring or running a mining session
#[derive(Debug, thiserror::Error)]
pub enum MinerError {
    /// Chain setup or input decoding failed
    #[error(transparent)]
    Algorithm(#[from] x15_core::Error),

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid JSON for [`MinerConfig`](crate::MinerConfig)
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The OS refused to start a worker thread
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    /// A worker thread panicked before reporting
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Result alias for miner operations
pub type Result<T> = std::result::Result<T, MinerError>;

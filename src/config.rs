//! Miner configuration
//!
//! Loaded from JSON; every field is optional and falls back to
//! [`MinerConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MinerError, Result};

/// Default number of nonces a worker scans between telemetry updates
pub const DEFAULT_SCAN_CHUNK: u32 = 1 << 16;

/// Upper bound on worker threads
pub const MAX_THREADS: usize = 1024;

/// Mining session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Worker threads; 0 uses one per logical CPU
    pub threads: usize,
    /// Nonces per scan pass; hash counters are updated after each pass
    pub scan_chunk: u32,
    /// Stop every worker as soon as one finds a solution
    pub stop_on_solution: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            scan_chunk: DEFAULT_SCAN_CHUNK,
            stop_on_solution: true,
        }
    }
}

impl MinerConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.scan_chunk == 0 {
            return Err(MinerError::Config("scan_chunk must be at least 1".to_string()));
        }
        if self.threads > MAX_THREADS {
            return Err(MinerError::Config(format!(
                "threads must be at most {}, got {}",
                MAX_THREADS, self.threads
            )));
        }
        Ok(())
    }

    /// Thread count with 0 resolved to the number of logical CPUs
    pub fn worker_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

//! Configuration error definitions.
//!
//! The simulation paths of the model never fail: out-of-range addresses clamp,
//! protocol misuse runs against stale state and unknown commands are no-ops.
//! The only fallible step is building a model from a configuration, which is
//! what `ConfigError` reports.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON document did not match the configuration schema.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A timing parameter that must count at least one cycle was zero.
    #[error("timing parameter `{field}` must be at least 1 cycle")]
    ZeroTiming {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The read pipeline cannot hold every read in flight at this CAS latency.
    #[error("read pipeline depth {depth} is shallower than CAS latency {cas_latency}")]
    PipelineTooShallow {
        /// Configured pipeline depth.
        depth: usize,
        /// Configured CAS latency.
        cas_latency: u32,
    },

    /// The read pipeline is larger than the model will allocate.
    #[error("read pipeline depth {depth} exceeds the maximum of {max}")]
    PipelineTooDeep {
        /// Configured pipeline depth.
        depth: usize,
        /// Largest accepted depth.
        max: usize,
    },

    /// The store capacity is zero or larger than the 32-bit word address space allows.
    #[error("store capacity of {total_words} words is not addressable")]
    CapacityOverflow {
        /// Configured capacity in words.
        total_words: u64,
    },

    /// The bank, row and column fields of the address map overlap.
    #[error("address fields overlap: {0}")]
    AddressOverlap(&'static str),
}

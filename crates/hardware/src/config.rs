//! Configuration system for the SDRAM model.
//!
//! This module defines the configuration structures used to parameterize the
//! model. It provides:
//! 1. **Defaults:** The reference part's timing, geometry and pipeline depth.
//! 2. **Structures:** Timing, address geometry and read pipeline sections.
//! 3. **Loading:** JSON parsing from a string or file, followed by validation.
//!
//! Every field is optional in JSON; anything omitted keeps its reference value.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::ConfigError;

/// Default configuration values, taken from the reference part.
mod defaults {
    use crate::common::constants;

    pub const fn t_rcd() -> u32 {
        constants::T_RCD
    }

    pub const fn cas_latency() -> u32 {
        constants::CAS_LATENCY
    }

    pub const fn t_rp() -> u32 {
        constants::T_RP
    }

    pub const fn refresh_interval() -> u32 {
        constants::REFRESH_INTERVAL
    }

    pub const fn refresh_duration() -> u32 {
        constants::REFRESH_DURATION
    }

    pub const fn total_words() -> u64 {
        constants::TOTAL_WORDS as u64
    }

    pub const fn bank_shift() -> u32 {
        constants::BANK_SHIFT
    }

    pub const fn row_shift() -> u32 {
        constants::ROW_SHIFT
    }

    pub const fn column_mask() -> u32 {
        constants::COLUMN_MASK
    }

    pub const fn row_mask() -> u32 {
        constants::ROW_MASK
    }

    pub const fn bank_mask() -> u32 {
        constants::BANK_MASK
    }

    pub const fn all_banks_bit() -> u32 {
        constants::ALL_BANKS_BIT
    }

    pub const fn read_pipe_depth() -> usize {
        constants::READ_PIPE_DEPTH
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use sdram_sim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.timing.cas_latency, 3);
/// assert_eq!(config.pipeline.read_pipe_depth, 8);
/// ```
///
/// Overriding a single field from JSON:
///
/// ```
/// use sdram_sim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "timing": { "refresh_interval": 100 } }"#).unwrap();
/// assert_eq!(config.timing.refresh_interval, 100);
/// assert_eq!(config.timing.t_rcd, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Clock-cycle timing of the modeled part.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Capacity and pin-level address layout.
    #[serde(default)]
    pub geometry: GeometryConfig,
    /// CAS-latency read pipeline sizing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Timing parameters, all in clock cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Row activation to column access delay (tRCD).
    #[serde(default = "defaults::t_rcd")]
    pub t_rcd: u32,
    /// Column read to data delay (CL).
    #[serde(default = "defaults::cas_latency")]
    pub cas_latency: u32,
    /// Precharge delay after a cancelled burst (tRP).
    #[serde(default = "defaults::t_rp")]
    pub t_rp: u32,
    /// Cycles between auto-refresh requests.
    #[serde(default = "defaults::refresh_interval")]
    pub refresh_interval: u32,
    /// Cycles the model is unavailable during one refresh.
    #[serde(default = "defaults::refresh_duration")]
    pub refresh_duration: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            t_rcd: defaults::t_rcd(),
            cas_latency: defaults::cas_latency(),
            t_rp: defaults::t_rp(),
            refresh_interval: defaults::refresh_interval(),
            refresh_duration: defaults::refresh_duration(),
        }
    }
}

impl TimingConfig {
    /// Cycles from request acceptance to the first read word (`tRCD + CL`).
    pub const fn read_latency(&self) -> u32 {
        self.t_rcd + self.cas_latency
    }
}

/// Store capacity and the layout used to rebuild word addresses from the pins.
///
/// The reconstructed address is `(bank << bank_shift) | (row << row_shift) | column`.
/// These values must match the controller under validation; the model does
/// not derive them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    /// Store capacity in 16-bit words.
    #[serde(default = "defaults::total_words")]
    pub total_words: u64,
    /// Bit position of the bank field.
    #[serde(default = "defaults::bank_shift")]
    pub bank_shift: u32,
    /// Bit position of the row field.
    #[serde(default = "defaults::row_shift")]
    pub row_shift: u32,
    /// Address bits carrying the column on READ/WRITE.
    #[serde(default = "defaults::column_mask")]
    pub column_mask: u32,
    /// Address bits carrying the row on ACTIVATE.
    #[serde(default = "defaults::row_mask")]
    pub row_mask: u32,
    /// Bank select bits.
    #[serde(default = "defaults::bank_mask")]
    pub bank_mask: u32,
    /// Address bit that turns PRECHARGE into PRECHARGE ALL.
    #[serde(default = "defaults::all_banks_bit")]
    pub all_banks_bit: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            total_words: defaults::total_words(),
            bank_shift: defaults::bank_shift(),
            row_shift: defaults::row_shift(),
            column_mask: defaults::column_mask(),
            row_mask: defaults::row_mask(),
            bank_mask: defaults::bank_mask(),
            all_banks_bit: defaults::all_banks_bit(),
        }
    }
}

/// Read pipeline sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Number of in-flight read slots.
    #[serde(default = "defaults::read_pipe_depth")]
    pub read_pipe_depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            read_pipe_depth: defaults::read_pipe_depth(),
        }
    }
}

impl Config {
    /// Parses and validates a configuration from a JSON document.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; omitted sections and fields keep their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or the parse/validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the invariants the model relies on.
    ///
    /// Every delay must count at least one cycle. The read pipeline must be
    /// at least as deep as the CAS latency so back-to-back reads are never
    /// dropped, and no deeper than `MAX_READ_PIPE_DEPTH`. The capacity must
    /// fit a 32-bit word address and the bank, row and column fields must not
    /// overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        for (field, value) in [
            ("t_rcd", t.t_rcd),
            ("cas_latency", t.cas_latency),
            ("t_rp", t.t_rp),
            ("refresh_interval", t.refresh_interval),
            ("refresh_duration", t.refresh_duration),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTiming { field });
            }
        }

        let depth = self.pipeline.read_pipe_depth;
        if depth < t.cas_latency as usize {
            return Err(ConfigError::PipelineTooShallow {
                depth,
                cas_latency: t.cas_latency,
            });
        }
        if depth > constants::MAX_READ_PIPE_DEPTH {
            return Err(ConfigError::PipelineTooDeep {
                depth,
                max: constants::MAX_READ_PIPE_DEPTH,
            });
        }

        let g = &self.geometry;
        if g.total_words == 0 || g.total_words > u64::from(u32::MAX) + 1 {
            return Err(ConfigError::CapacityOverflow {
                total_words: g.total_words,
            });
        }

        if g.bank_mask as usize >= constants::BANK_COUNT {
            return Err(ConfigError::AddressOverlap(
                "bank mask selects more banks than the device has",
            ));
        }
        if g.all_banks_bit >= 32 {
            return Err(ConfigError::AddressOverlap(
                "all-banks bit lies outside the address bus",
            ));
        }
        let rows = u64::from(g.row_mask)
            .checked_shl(g.row_shift)
            .ok_or(ConfigError::AddressOverlap("row shift exceeds the address width"))?;
        let banks = u64::from(g.bank_mask)
            .checked_shl(g.bank_shift)
            .ok_or(ConfigError::AddressOverlap("bank shift exceeds the address width"))?;
        let columns = u64::from(g.column_mask);
        if (rows | banks | columns) > u64::from(u32::MAX) {
            return Err(ConfigError::AddressOverlap(
                "reconstructed address exceeds 32 bits",
            ));
        }
        if columns & rows != 0 {
            return Err(ConfigError::AddressOverlap("column and row fields"));
        }
        if rows & banks != 0 {
            return Err(ConfigError::AddressOverlap("row and bank fields"));
        }
        if columns & banks != 0 {
            return Err(ConfigError::AddressOverlap("column and bank fields"));
        }

        Ok(())
    }
}

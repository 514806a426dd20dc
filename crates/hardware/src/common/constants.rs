//! Reference Device Constants.
//!
//! This module defines the constants of the reference part (W9825G6KH at
//! 100 MHz) that the model reproduces. It includes:
//! 1. **Timing:** Activation, CAS, precharge and refresh timing in clock cycles.
//! 2. **Geometry:** Bank count, capacity and the pin-level address layout.
//! 3. **Pipeline:** Depth of the CAS-latency read pipeline.
//!
//! These are the defaults behind [`Config`](crate::config::Config); integrations
//! that validate a different controller override them there.

/// Row activation to column access delay (tRCD) in cycles.
pub const T_RCD: u32 = 2;

/// CAS latency (CL) in cycles.
pub const CAS_LATENCY: u32 = 3;

/// Precharge delay (tRP) in cycles.
pub const T_RP: u32 = 2;

/// Auto-refresh interval in cycles.
///
/// 8192 refreshes per 64 ms at 100 MHz is 781.25 cycles per refresh.
pub const REFRESH_INTERVAL: u32 = 781;

/// Cycles `ready` stays low for one auto-refresh.
pub const REFRESH_DURATION: u32 = 6;

/// Number of independently addressable banks.
pub const BANK_COUNT: usize = 4;

/// Total 16-bit words in the 32 MiB device.
pub const TOTAL_WORDS: u32 = 32 * 1024 * 1024 / 2;

/// Bit position of the bank field in a reconstructed word address.
pub const BANK_SHIFT: u32 = 23;

/// Bit position of the row field in a reconstructed word address.
pub const ROW_SHIFT: u32 = 9;

/// Column bits A[8:0] presented with READ/WRITE.
pub const COLUMN_MASK: u32 = 0x1FF;

/// Row bits A[12:0] presented with ACTIVATE.
pub const ROW_MASK: u32 = 0x1FFF;

/// Bank select bits BA[1:0].
pub const BANK_MASK: u32 = 0x3;

/// Address bit selecting all banks on PRECHARGE (A10).
pub const ALL_BANKS_BIT: u32 = 10;

/// Depth of the CAS-latency read pipeline; must be at least `CAS_LATENCY`.
pub const READ_PIPE_DEPTH: usize = 8;

/// Largest read pipeline a configuration may ask for.
pub const MAX_READ_PIPE_DEPTH: usize = 65_535;

/// Words per 4x4 tile in the block-tiled surface layout.
pub const TILE_WORDS: u32 = 16;

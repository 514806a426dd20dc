//! Cycle-accurate SDRAM behavioral model.
//!
//! This crate models a 32 MiB, 4-bank SDR SDRAM for co-simulation with a
//! hardware memory controller. It provides:
//! 1. **Controller:** The request-level view: request/ack handshake, single
//!    32-bit transfers, word bursts with cancel, and auto-refresh gating.
//! 2. **Pins:** The pin-level view: command decoding and a CAS-latency read pipeline.
//! 3. **Chip:** Device state shared by both views (banks, pipeline, refresh, store).
//! 4. **Memory:** The word-addressable store with 32-bit, bulk and surface helpers.
//! 5. **Simulation:** The `Clocked` trait, a clock driver, configuration and statistics.
//!
//! Every evaluation is one rising clock edge; the caller sets the inputs for
//! that edge, evaluates, then reads the outputs.

/// Device state shared by both views.
pub mod chip;
/// Common types and constants (addresses, timing defaults, errors).
pub mod common;
/// Model configuration (timing, geometry, pipeline).
pub mod config;
/// Request-level controller view.
pub mod controller;
/// Word-addressable memory store.
pub mod memory;
/// Pin-level protocol decoder view.
pub mod pins;
/// Clocked model trait and clock driver.
pub mod sim;
/// Model statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Configuration error returned by fallible constructors.
pub use crate::common::error::ConfigError;
/// Request-level view; drive it with `RequestInputs`.
pub use crate::controller::RequestController;
/// Request-level signals.
pub use crate::controller::signals::{ControllerOutputs, RequestInputs};
/// The shared memory store.
pub use crate::memory::MemoryStore;
/// Pin-level view; drive it with `PinInputs`.
pub use crate::pins::PinDecoder;
/// Pin-level signals.
pub use crate::pins::bus::{PinInputs, PinOutputs};
/// Clocked interface and driver.
pub use crate::sim::{ClockDriver, Clocked};

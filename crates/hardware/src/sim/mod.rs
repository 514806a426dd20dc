//! Clocked simulation harness.
//!
//! This module connects the two model views to a clock. It provides:
//! 1. **Traits:** `Clocked`, the evaluate-once-per-edge interface both views implement.
//! 2. **Driver:** `ClockDriver`, a cycle counter with stepping and wait helpers.

/// Clock driver for any `Clocked` model.
pub mod driver;

/// The evaluate-per-edge interface.
pub mod traits;

pub use self::driver::ClockDriver;
pub use self::traits::Clocked;

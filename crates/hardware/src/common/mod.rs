//! Common types shared by both views of the model.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Address Types:** Strong types for byte and word addresses.
//! 2. **Constants:** Reference timing and geometry of the modeled part.
//! 3. **Error Handling:** Configuration errors.

/// Byte and word address types.
pub mod addr;

/// Reference timing and geometry constants.
pub mod constants;

/// Configuration error type.
pub mod error;

pub use addr::{BankRowCol, ByteAddr, WordAddr};
pub use error::ConfigError;

//! # Pin-Level Decoder Tests

/// Command decoding and per-command behavior.
pub mod decoder;

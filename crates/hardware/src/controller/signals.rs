//! Request-level interface signals.
//!
//! The inputs are sampled once per evaluation; the caller holds them stable
//! for the whole cycle, the way the arbiter under test drives its ports.
//! Outputs split into pulses, which last one cycle, and held values, which
//! keep their last driven level.

/// Signals driven into the request-level controller for one clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestInputs {
    /// Request a transfer.
    pub req: bool,
    /// Transfer is a write.
    pub we: bool,
    /// Byte address of the first word.
    pub addr: u32,
    /// Write data for single-word (32-bit) writes, sampled when the write lands.
    pub wdata: u32,
    /// Burst length in 16-bit words; 0 selects single-word mode.
    pub burst_len: u8,
    /// Write data for the current burst word.
    pub burst_wdata: u16,
    /// Terminate the active burst.
    pub burst_cancel: bool,
}

impl RequestInputs {
    /// No request, no cancel.
    pub const fn idle() -> Self {
        Self {
            req: false,
            we: false,
            addr: 0,
            wdata: 0,
            burst_len: 0,
            burst_wdata: 0,
            burst_cancel: false,
        }
    }

    /// A single-word (32-bit) read of `addr`.
    pub const fn read32(addr: u32) -> Self {
        Self {
            req: true,
            addr,
            ..Self::idle()
        }
    }

    /// A single-word (32-bit) write of `wdata` to `addr`.
    pub const fn write32(addr: u32, wdata: u32) -> Self {
        Self {
            req: true,
            we: true,
            addr,
            wdata,
            ..Self::idle()
        }
    }

    /// A burst read of `len` words from `addr`.
    pub const fn burst_read(addr: u32, len: u8) -> Self {
        Self {
            req: true,
            addr,
            burst_len: len,
            ..Self::idle()
        }
    }

    /// A burst write of `len` words to `addr`; data follows on `burst_wdata`.
    pub const fn burst_write(addr: u32, len: u8) -> Self {
        Self {
            req: true,
            we: true,
            addr,
            burst_len: len,
            ..Self::idle()
        }
    }

    /// The same inputs with `req` dropped, as an arbiter holds them after acceptance.
    pub const fn released(self) -> Self {
        Self { req: false, ..self }
    }

    /// The same inputs with `burst_cancel` set.
    pub const fn cancelled(self) -> Self {
        Self {
            burst_cancel: true,
            ..self
        }
    }

    /// The same inputs carrying `word` on `burst_wdata`.
    pub const fn with_burst_wdata(self, word: u16) -> Self {
        Self {
            burst_wdata: word,
            ..self
        }
    }
}

/// Signals driven by the request-level controller after an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOutputs {
    /// Last burst word delivered (held).
    pub rdata: u16,
    /// Last assembled single-word read (held).
    pub rdata32: u32,
    /// Transfer complete (pulse).
    pub ack: bool,
    /// Accepting new requests; low only during auto-refresh.
    pub ready: bool,
    /// `rdata` carries a new burst word (pulse).
    pub burst_data_valid: bool,
    /// Drive the next burst write word on `burst_wdata` (pulse).
    pub burst_wdata_req: bool,
    /// Last word of a burst transferred (pulse).
    pub burst_done: bool,
}

impl Default for ControllerOutputs {
    /// Reset levels: everything low except `ready`.
    fn default() -> Self {
        Self {
            rdata: 0,
            rdata32: 0,
            ack: false,
            ready: true,
            burst_data_valid: false,
            burst_wdata_req: false,
            burst_done: false,
        }
    }
}

impl ControllerOutputs {
    /// Starting point for the next cycle: pulses cleared, held values kept.
    pub const fn next_cycle(&self) -> Self {
        Self {
            ack: false,
            burst_data_valid: false,
            burst_wdata_req: false,
            burst_done: false,
            ..*self
        }
    }
}

//! Controller FSM states.
//!
//! Each state carries only the data that is meaningful in it: the delay
//! countdowns live in the timed states and the transfer bookkeeping travels
//! with the states that move data.

use std::fmt;

use crate::common::addr::WordAddr;

/// Bookkeeping for the transfer accepted in IDLE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Next word to transfer.
    pub word_addr: WordAddr,
    /// Words left in a burst; unused for single-word transfers.
    pub words_remaining: u32,
    /// Direction.
    pub is_write: bool,
    /// Single 32-bit transfer (two words) rather than a burst.
    pub is_single_word: bool,
    /// A cancel arrived while the first burst read word was delivered.
    pub cancel_pending: bool,
}

impl Transfer {
    /// A single 32-bit transfer at `word_addr`.
    pub const fn single(word_addr: WordAddr, is_write: bool) -> Self {
        Self {
            word_addr,
            words_remaining: 0,
            is_write,
            is_single_word: true,
            cancel_pending: false,
        }
    }

    /// A burst of `len` words starting at `word_addr`.
    pub const fn burst(word_addr: WordAddr, len: u32, is_write: bool) -> Self {
        Self {
            word_addr,
            words_remaining: len,
            is_write,
            is_single_word: false,
            cancel_pending: false,
        }
    }

    /// Steps past the word just transferred.
    ///
    /// # Returns
    ///
    /// `true` if that was the last word of the burst.
    pub const fn advance(&mut self) -> bool {
        self.word_addr = self.word_addr.next();
        self.words_remaining = self.words_remaining.saturating_sub(1);
        self.words_remaining == 0
    }
}

/// Request-level controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Waiting for a request or a due refresh.
    #[default]
    Idle,
    /// Row activation, waiting out tRCD.
    Activate {
        /// Cycles left before the column access.
        remaining: u32,
        /// The accepted transfer.
        transfer: Transfer,
    },
    /// Read issued, waiting out CAS latency.
    ReadCas {
        /// Cycles left before data is available.
        remaining: u32,
        /// The accepted transfer.
        transfer: Transfer,
    },
    /// Delivering burst read words, one per cycle.
    ReadBurst(Transfer),
    /// Accepting burst write words, one per cycle.
    WriteBurst(Transfer),
    /// Closing the row after a cancelled burst, waiting out tRP.
    Precharge {
        /// Cycles left before returning to IDLE.
        remaining: u32,
    },
    /// Auto-refresh in progress; `ready` is low.
    Refresh {
        /// Cycles left before the refresh completes.
        remaining: u32,
    },
}

/// Data-free discriminant of [`ControllerState`], for logging and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// See [`ControllerState::Idle`].
    Idle,
    /// See [`ControllerState::Activate`].
    Activate,
    /// See [`ControllerState::ReadCas`].
    ReadCas,
    /// See [`ControllerState::ReadBurst`].
    ReadBurst,
    /// See [`ControllerState::WriteBurst`].
    WriteBurst,
    /// See [`ControllerState::Precharge`].
    Precharge,
    /// See [`ControllerState::Refresh`].
    Refresh,
}

impl ControllerState {
    /// Returns the discriminant.
    pub const fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Activate { .. } => StateKind::Activate,
            Self::ReadCas { .. } => StateKind::ReadCas,
            Self::ReadBurst(_) => StateKind::ReadBurst,
            Self::WriteBurst(_) => StateKind::WriteBurst,
            Self::Precharge { .. } => StateKind::Precharge,
            Self::Refresh { .. } => StateKind::Refresh,
        }
    }

    /// Returns the transfer in flight, if the state carries one.
    pub const fn transfer(&self) -> Option<&Transfer> {
        match self {
            Self::Activate { transfer, .. }
            | Self::ReadCas { transfer, .. }
            | Self::ReadBurst(transfer)
            | Self::WriteBurst(transfer) => Some(transfer),
            Self::Idle | Self::Precharge { .. } | Self::Refresh { .. } => None,
        }
    }

    /// Returns `true` in IDLE.
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::Activate => "ACTIVATE",
            Self::ReadCas => "READ_CAS",
            Self::ReadBurst => "READ_BURST",
            Self::WriteBurst => "WRITE_BURST",
            Self::Precharge => "PRECHARGE",
            Self::Refresh => "REFRESH",
        };
        f.write_str(name)
    }
}

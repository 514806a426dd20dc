//! Controller next-state function.
//!
//! `transition` computes one clock edge without touching the device: it reads
//! the store, and hands back the next state, the outputs and any words to
//! write. The controller applies the result. Keeping the function pure lets
//! the tests walk the FSM state by state.

use super::signals::{ControllerOutputs, RequestInputs};
use super::state::{ControllerState, Transfer};
use crate::common::addr::{ByteAddr, WordAddr};
use crate::config::TimingConfig;
use crate::memory::MemoryStore;

/// Per-edge facts the FSM needs besides its own state.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    /// Timing parameters.
    pub timing: &'a TimingConfig,
    /// The refresh counter has reached the interval this edge.
    pub refresh_due: bool,
}

/// Something worth counting that happened on an edge. At most one occurs per edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// IDLE started an auto-refresh.
    RefreshStarted,
    /// IDLE accepted a request.
    Accepted {
        /// Single 32-bit transfer rather than a burst.
        single: bool,
        /// Direction.
        write: bool,
    },
    /// A single 32-bit read completed.
    SingleReadDone,
    /// A single 32-bit write landed.
    SingleWriteDone,
    /// A burst was cut short and the row is being closed.
    Cancelled,
}

/// Word writes produced by one edge (at most two, for a single 32-bit write).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteBack {
    entries: [(WordAddr, u16); 2],
    len: usize,
}

impl WriteBack {
    fn push(&mut self, addr: WordAddr, data: u16) {
        if let Some(slot) = self.entries.get_mut(self.len) {
            *slot = (addr, data);
            self.len += 1;
        }
    }

    /// Returns the pending writes in order.
    pub fn as_slice(&self) -> &[(WordAddr, u16)] {
        &self.entries[..self.len]
    }

    /// Returns the number of pending writes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the edge wrote nothing.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Result of one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// State after the edge.
    pub next: ControllerState,
    /// Outputs after the edge.
    pub outputs: ControllerOutputs,
    /// Words to commit to the store.
    pub writes: WriteBack,
    /// Countable event, if any.
    pub event: Option<StepEvent>,
}

/// Computes one clock edge of the request-level FSM.
///
/// # Arguments
///
/// * `state` - Current state.
/// * `inputs` - Inputs sampled this edge.
/// * `ctx` - Timing and refresh status.
/// * `store` - Memory contents, read for data delivery.
/// * `prev` - Outputs of the previous edge; held values carry over.
pub fn transition(
    state: &ControllerState,
    inputs: &RequestInputs,
    ctx: &StepContext<'_>,
    store: &MemoryStore,
    prev: &ControllerOutputs,
) -> Step {
    let timing = ctx.timing;
    let mut out = prev.next_cycle();
    let mut writes = WriteBack::default();
    let mut event = None;

    let next = match *state {
        ControllerState::Idle => {
            if ctx.refresh_due {
                event = Some(StepEvent::RefreshStarted);
                ControllerState::Refresh {
                    remaining: timing.refresh_duration,
                }
            } else if inputs.req && prev.ready {
                let word_addr = ByteAddr(inputs.addr).to_word();
                let single = inputs.burst_len == 0;
                let transfer = if single {
                    Transfer::single(word_addr, inputs.we)
                } else {
                    Transfer::burst(word_addr, u32::from(inputs.burst_len), inputs.we)
                };
                event = Some(StepEvent::Accepted {
                    single,
                    write: inputs.we,
                });
                ControllerState::Activate {
                    remaining: timing.t_rcd,
                    transfer,
                }
            } else {
                ControllerState::Idle
            }
        }

        ControllerState::Activate {
            remaining,
            transfer,
        } => {
            let remaining = remaining.saturating_sub(1);
            if remaining > 0 {
                ControllerState::Activate {
                    remaining,
                    transfer,
                }
            } else if !transfer.is_write {
                ControllerState::ReadCas {
                    remaining: timing.cas_latency,
                    transfer,
                }
            } else if transfer.is_single_word {
                writes.push(transfer.word_addr, inputs.wdata as u16);
                writes.push(transfer.word_addr.next(), (inputs.wdata >> 16) as u16);
                out.ack = true;
                event = Some(StepEvent::SingleWriteDone);
                ControllerState::Idle
            } else {
                out.burst_wdata_req = true;
                ControllerState::WriteBurst(transfer)
            }
        }

        ControllerState::ReadCas {
            remaining,
            mut transfer,
        } => {
            let remaining = remaining.saturating_sub(1);
            if remaining > 0 {
                ControllerState::ReadCas {
                    remaining,
                    transfer,
                }
            } else if transfer.is_single_word {
                let low = store.read_word(transfer.word_addr);
                let high = store.read_word(transfer.word_addr.next());
                out.rdata32 = u32::from(low) | (u32::from(high) << 16);
                out.rdata = low;
                out.ack = true;
                event = Some(StepEvent::SingleReadDone);
                ControllerState::Idle
            } else {
                out.rdata = store.read_word(transfer.word_addr);
                out.burst_data_valid = true;
                if transfer.advance() {
                    out.burst_done = true;
                    out.ack = true;
                    ControllerState::Idle
                } else {
                    if inputs.burst_cancel {
                        transfer.cancel_pending = true;
                    }
                    ControllerState::ReadBurst(transfer)
                }
            }
        }

        ControllerState::ReadBurst(mut transfer) => {
            if inputs.burst_cancel || transfer.cancel_pending {
                event = Some(StepEvent::Cancelled);
                ControllerState::Precharge {
                    remaining: timing.t_rp,
                }
            } else {
                out.rdata = store.read_word(transfer.word_addr);
                out.burst_data_valid = true;
                if transfer.advance() {
                    out.burst_done = true;
                    out.ack = true;
                    ControllerState::Idle
                } else {
                    ControllerState::ReadBurst(transfer)
                }
            }
        }

        ControllerState::WriteBurst(mut transfer) => {
            if inputs.burst_cancel || transfer.cancel_pending {
                event = Some(StepEvent::Cancelled);
                ControllerState::Precharge {
                    remaining: timing.t_rp,
                }
            } else {
                writes.push(transfer.word_addr, inputs.burst_wdata);
                if transfer.advance() {
                    out.burst_done = true;
                    out.ack = true;
                    ControllerState::Idle
                } else {
                    out.burst_wdata_req = true;
                    ControllerState::WriteBurst(transfer)
                }
            }
        }

        ControllerState::Precharge { remaining } => {
            let remaining = remaining.saturating_sub(1);
            if remaining > 0 {
                ControllerState::Precharge { remaining }
            } else {
                out.ack = true;
                ControllerState::Idle
            }
        }

        ControllerState::Refresh { remaining } => {
            let remaining = remaining.saturating_sub(1);
            if remaining > 0 {
                ControllerState::Refresh { remaining }
            } else {
                ControllerState::Idle
            }
        }
    };

    out.ready = !matches!(next, ControllerState::Refresh { .. });

    Step {
        next,
        outputs: out,
        writes,
        event,
    }
}

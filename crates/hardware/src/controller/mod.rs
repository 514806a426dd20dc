//! Request-level SDRAM controller.
//!
//! This module models the controller as seen by the arbiter: a request/ack
//! handshake with single 32-bit transfers and word bursts. It provides:
//! 1. **Signals:** `RequestInputs` and `ControllerOutputs`.
//! 2. **States:** `ControllerState` with per-state countdowns and transfer data.
//! 3. **Transition:** The pure next-state function.
//! 4. **Controller:** `RequestController`, which applies transitions to the device.
//!
//! Per edge the refresh counter advances first; a due refresh is taken from
//! IDLE ahead of any request and is never started mid-transfer.

/// Interface signals.
pub mod signals;

/// FSM states.
pub mod state;

/// Pure next-state function.
pub mod transition;

use self::signals::{ControllerOutputs, RequestInputs};
use self::state::ControllerState;
use self::transition::{StepContext, StepEvent, transition};
use crate::chip::SdramChip;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::memory::MemoryStore;
use crate::sim::traits::Clocked;
use crate::stats::SdramStats;

/// Request-level view of the SDRAM model.
#[derive(Debug, Default)]
pub struct RequestController {
    chip: SdramChip,
    state: ControllerState,
    outputs: ControllerOutputs,
}

impl RequestController {
    /// Creates a controller with an empty store sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Ok(Self::from_chip(SdramChip::new(config)?))
    }

    /// Creates a controller over an existing store.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn with_store(config: Config, store: MemoryStore) -> Result<Self, ConfigError> {
        Ok(Self::from_chip(SdramChip::with_store(config, store)?))
    }

    fn from_chip(chip: SdramChip) -> Self {
        Self {
            chip,
            state: ControllerState::Idle,
            outputs: ControllerOutputs::default(),
        }
    }

    /// Evaluates one rising clock edge.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Request signals held for this cycle.
    pub fn eval(&mut self, inputs: &RequestInputs) {
        let refresh_due = self.chip.refresh_mut().tick();
        if refresh_due && !self.state.is_idle() {
            self.chip.stats_mut().refresh_deferred_cycles += 1;
        }

        let timing = *self.chip.timing();
        let ctx = StepContext {
            timing: &timing,
            refresh_due,
        };
        let step = transition(&self.state, inputs, &ctx, self.chip.store(), &self.outputs);

        match step.event {
            Some(StepEvent::RefreshStarted) => {
                let duration = self.chip.refresh_mut().begin();
                tracing::debug!(duration, "auto-refresh started");
                self.chip.stats_mut().refreshes += 1;
            }
            Some(StepEvent::Accepted { single, write }) => {
                tracing::debug!(
                    addr = format_args!("{:#x}", inputs.addr),
                    burst_len = inputs.burst_len,
                    write,
                    "request accepted"
                );
                let stats = self.chip.stats_mut();
                stats.requests += 1;
                match (single, write) {
                    (true, _) => {}
                    (false, true) => stats.burst_writes += 1,
                    (false, false) => stats.burst_reads += 1,
                }
            }
            Some(StepEvent::SingleReadDone) => {
                let stats = self.chip.stats_mut();
                stats.single_reads += 1;
                stats.words_read += 2;
            }
            Some(StepEvent::SingleWriteDone) => self.chip.stats_mut().single_writes += 1,
            Some(StepEvent::Cancelled) => {
                tracing::debug!("burst cancelled");
                self.chip.stats_mut().cancels += 1;
            }
            None => {}
        }

        let (store, stats) = self.chip.store_and_stats_mut();
        for &(addr, data) in step.writes.as_slice() {
            store.write_word(addr, data);
        }
        stats.words_written += step.writes.len() as u64;
        if step.outputs.burst_data_valid {
            stats.words_read += 1;
        }
        stats.cycles += 1;

        if step.next.kind() != self.state.kind() {
            tracing::debug!(from = %self.state.kind(), to = %step.next.kind(), "state change");
        }
        self.state = step.next;
        self.outputs = step.outputs;
    }

    /// Returns the outputs of the most recent edge.
    pub const fn outputs(&self) -> &ControllerOutputs {
        &self.outputs
    }

    /// Returns the current FSM state.
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Returns the cycles counted since the last refresh began.
    pub const fn refresh_counter(&self) -> u32 {
        self.chip.refresh().counter()
    }

    /// Returns the underlying device.
    pub const fn chip(&self) -> &SdramChip {
        &self.chip
    }

    /// Returns the memory store.
    pub const fn store(&self) -> &MemoryStore {
        self.chip.store()
    }

    /// Returns the memory store for seeding and inspection.
    pub const fn store_mut(&mut self) -> &mut MemoryStore {
        self.chip.store_mut()
    }

    /// Consumes the controller and hands back its store.
    pub fn into_store(self) -> MemoryStore {
        self.chip.into_store()
    }

    /// Returns the statistics counters.
    pub const fn stats(&self) -> &SdramStats {
        self.chip.stats()
    }

    /// Returns to IDLE with reset outputs and a cleared refresh counter.
    /// Memory contents and statistics are kept.
    pub fn reset(&mut self) {
        self.chip.reset();
        self.state = ControllerState::Idle;
        self.outputs = ControllerOutputs::default();
    }
}

impl Clocked for RequestController {
    type Inputs = RequestInputs;
    type Outputs = ControllerOutputs;

    fn eval(&mut self, inputs: &RequestInputs) {
        Self::eval(self, inputs);
    }

    fn outputs(&self) -> &ControllerOutputs {
        Self::outputs(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

//! Pin-level SDRAM protocol decoder.
//!
//! This module decodes the raw command bus a controller drives into the same
//! store operations the request-level view performs. It provides:
//! 1. **Commands:** `SdramCommand` decoding from the four control lines.
//! 2. **Bus:** `PinInputs` and `PinOutputs`.
//! 3. **Decoder:** `PinDecoder`, evaluated once per clock edge.
//!
//! Each edge first advances the read pipeline, so data for a READ decoded on
//! edge `n` appears on edge `n + CL - 1`. The decoder runs one cycle after the
//! bus is driven, which brings the observed latency back to CL.

/// Pin-level bus signals.
pub mod bus;

/// Command decoding.
pub mod command;

use self::bus::{PinInputs, PinOutputs};
use self::command::SdramCommand;
use crate::chip::SdramChip;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::memory::MemoryStore;
use crate::sim::traits::Clocked;
use crate::stats::SdramStats;

/// Pin-level view of the SDRAM model.
#[derive(Debug, Default)]
pub struct PinDecoder {
    chip: SdramChip,
    outputs: PinOutputs,
    last_command: Option<SdramCommand>,
}

impl PinDecoder {
    /// Creates a decoder with an empty store sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Ok(Self::from_chip(SdramChip::new(config)?))
    }

    /// Creates a decoder over an existing store.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn with_store(config: Config, store: MemoryStore) -> Result<Self, ConfigError> {
        Ok(Self::from_chip(SdramChip::with_store(config, store)?))
    }

    const fn from_chip(chip: SdramChip) -> Self {
        Self {
            chip,
            outputs: PinOutputs { dq: 0, dq_valid: false },
            last_command: None,
        }
    }

    /// Evaluates one rising clock edge.
    ///
    /// # Arguments
    ///
    /// * `pins` - Bus levels driven for this edge.
    pub fn eval(&mut self, pins: &PinInputs) {
        let matured = self.chip.advance_reads();
        self.outputs = PinOutputs {
            dq: matured.unwrap_or(0),
            dq_valid: matured.is_some(),
        };

        let cmd = pins.decoded();
        self.execute(cmd, pins);
        self.last_command = Some(cmd);
        self.chip.stats_mut().cycles += 1;
    }

    fn execute(&mut self, cmd: SdramCommand, pins: &PinInputs) {
        let map = *self.chip.map();
        let bank = map.bank(pins.ba);
        match cmd {
            SdramCommand::Activate => self.chip.activate(bank, map.row(pins.a)),
            SdramCommand::Read => {
                let countdown = self.chip.timing().cas_latency.saturating_sub(1);
                let target = self.chip.schedule_read(bank, map.column(pins.a), countdown);
                tracing::trace!(%target, bank, countdown, "READ");
            }
            SdramCommand::Write => {
                let target = self
                    .chip
                    .write_column(bank, map.column(pins.a), pins.dq, pins.dqm);
                tracing::trace!(
                    %target,
                    data = format_args!("{:#06x}", pins.dq),
                    dqm = pins.dqm,
                    "WRITE"
                );
            }
            SdramCommand::Precharge => self.chip.precharge(bank, map.is_all_banks(pins.a)),
            SdramCommand::Nop
            | SdramCommand::AutoRefresh
            | SdramCommand::LoadMode
            | SdramCommand::BurstTerminate => {
                self.chip.stats_mut().inert_commands += 1;
            }
            SdramCommand::Deselect => {}
        }
    }

    /// Returns the outputs of the most recent edge.
    pub const fn outputs(&self) -> &PinOutputs {
        &self.outputs
    }

    /// Returns the command decoded on the most recent edge.
    pub const fn last_command(&self) -> Option<SdramCommand> {
        self.last_command
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

    /// Consumes the decoder and hands back its store.
    pub fn into_store(self) -> MemoryStore {
        self.chip.into_store()
    }

    /// Returns the statistics counters.
    pub const fn stats(&self) -> &SdramStats {
        self.chip.stats()
    }

    /// Closes every bank and drops every in-flight read. Memory contents and
    /// statistics are kept.
    pub fn reset(&mut self) {
        self.chip.reset();
        self.outputs = PinOutputs::default();
        self.last_command = None;
    }
}

impl Clocked for PinDecoder {
    type Inputs = PinInputs;
    type Outputs = PinOutputs;

    fn eval(&mut self, inputs: &PinInputs) {
        Self::eval(self, inputs);
    }

    fn outputs(&self) -> &PinOutputs {
        Self::outputs(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

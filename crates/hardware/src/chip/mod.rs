//! The modeled SDRAM device.
//!
//! Both public views of the model drive the same device state, kept here so the
//! address math and timing constants exist once. It provides:
//! 1. **Store:** The word-addressable memory array.
//! 2. **Banks:** Open-row tracking for ACTIVATE/PRECHARGE.
//! 3. **Read Pipeline:** CAS-latency delay for pin-level READs.
//! 4. **Refresh:** The free-running auto-refresh counter.
//! 5. **Statistics:** Diagnostic counters for everything above.
//!
//! Nothing in here can fail once constructed; misuse runs against whatever
//! state is recorded.

/// Word address composition from bank/row/column.
pub mod address;

/// Open-row state per bank.
pub mod bank;

/// CAS-latency read pipeline.
pub mod pipeline;

/// Auto-refresh counter.
pub mod refresh;

use self::address::AddressMap;
use self::bank::BankTable;
use self::pipeline::ReadPipeline;
use self::refresh::RefreshScheduler;
use crate::common::addr::WordAddr;
use crate::common::error::ConfigError;
use crate::config::{Config, TimingConfig};
use crate::memory::{DQM_HIGH, DQM_LOW, MemoryStore};
use crate::stats::SdramStats;

/// Device state shared by the request-level and pin-level views.
#[derive(Debug)]
pub struct SdramChip {
    config: Config,
    map: AddressMap,
    store: MemoryStore,
    banks: BankTable,
    read_pipe: ReadPipeline,
    refresh: RefreshScheduler,
    stats: SdramStats,
}

impl Default for SdramChip {
    /// Creates a device with the reference configuration and an empty store.
    fn default() -> Self {
        Self::build(Config::default(), None)
    }
}

impl SdramChip {
    /// Creates a device with an empty store sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, None))
    }

    /// Creates a device over an existing store, e.g. one pre-seeded by a test.
    ///
    /// The store keeps its own capacity; `geometry.total_words` only sizes
    /// stores the device allocates itself.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn with_store(config: Config, store: MemoryStore) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Some(store)))
    }

    fn build(config: Config, store: Option<MemoryStore>) -> Self {
        let store =
            store.unwrap_or_else(|| MemoryStore::new(config.geometry.total_words as usize));
        Self {
            map: AddressMap::new(&config.geometry),
            read_pipe: ReadPipeline::new(config.pipeline.read_pipe_depth),
            refresh: RefreshScheduler::new(&config.timing),
            banks: BankTable::default(),
            stats: SdramStats::default(),
            store,
            config,
        }
    }

    /// Returns the configuration the device was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the timing section of the configuration.
    pub const fn timing(&self) -> &TimingConfig {
        &self.config.timing
    }

    /// Returns the pin-level address map.
    pub const fn map(&self) -> &AddressMap {
        &self.map
    }

    /// Returns the memory store.
    pub const fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the memory store for direct seeding.
    pub const fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    /// Consumes the device and hands back its store.
    pub fn into_store(self) -> MemoryStore {
        self.store
    }

    /// Returns the bank table.
    pub const fn banks(&self) -> &BankTable {
        &self.banks
    }

    /// Returns the read pipeline.
    pub const fn read_pipe(&self) -> &ReadPipeline {
        &self.read_pipe
    }

    /// Returns the refresh scheduler.
    pub const fn refresh(&self) -> &RefreshScheduler {
        &self.refresh
    }

    /// Returns the refresh scheduler for the request-level controller.
    pub(crate) const fn refresh_mut(&mut self) -> &mut RefreshScheduler {
        &mut self.refresh
    }

    /// Returns the statistics counters.
    pub const fn stats(&self) -> &SdramStats {
        &self.stats
    }

    /// Returns the statistics counters for updating.
    pub(crate) const fn stats_mut(&mut self) -> &mut SdramStats {
        &mut self.stats
    }

    /// Returns the store and the counters together for the controller's write-back.
    pub(crate) const fn store_and_stats_mut(&mut self) -> (&mut MemoryStore, &mut SdramStats) {
        (&mut self.store, &mut self.stats)
    }

    /// Resets banks, pipeline and refresh counter. The store and the
    /// statistics survive a reset.
    pub fn reset(&mut self) {
        self.banks.reset();
        self.read_pipe.reset();
        self.refresh.reset();
    }

    /// Opens `row` in `bank`.
    pub fn activate(&mut self, bank: u8, row: u32) {
        tracing::debug!(bank, row = format_args!("{row:#x}"), "ACTIVATE");
        self.banks.activate(bank, row);
        self.stats.activates += 1;
    }

    /// Closes `bank`, or every bank when `all` is set.
    pub fn precharge(&mut self, bank: u8, all: bool) {
        if all {
            tracing::debug!("PRECHARGE ALL");
            self.banks.precharge_all();
        } else {
            tracing::debug!(bank, "PRECHARGE");
            self.banks.precharge(bank);
        }
        self.stats.precharges += 1;
    }

    /// Resolves a column access against the row recorded for `bank`.
    #[inline]
    pub fn column_address(&self, bank: u8, column: u32) -> WordAddr {
        self.map.compose(bank, self.banks.active_row(bank), column)
    }

    /// Schedules a READ of `column` in `bank`, maturing after `countdown` advances.
    ///
    /// # Returns
    ///
    /// The word address the read will return.
    pub fn schedule_read(&mut self, bank: u8, column: u32, countdown: u32) -> WordAddr {
        let target = self.column_address(bank, column);
        let issued = self.read_pipe.issue(target, countdown);
        if issued.overwrote {
            tracing::warn!(
                %target,
                slot = issued.slot,
                depth = self.read_pipe.depth(),
                "READ overwrote a pending pipeline slot"
            );
            self.stats.pipeline_overwrites += 1;
        }
        self.stats.read_commands += 1;
        target
    }

    /// Advances the read pipeline by one cycle.
    ///
    /// # Returns
    ///
    /// The data of the read that matured this cycle, if any.
    pub fn advance_reads(&mut self) -> Option<u16> {
        let target = self.read_pipe.advance()?;
        let data = self.store.read_word(target);
        tracing::trace!(%target, data = format_args!("{data:#06x}"), "READ data driven");
        self.stats.words_read += 1;
        Some(data)
    }

    /// Applies a WRITE of `data` to `column` in `bank` under byte mask `dqm`.
    ///
    /// A clear DQM bit enables its byte: `dqm == 0` writes the whole word,
    /// otherwise the masked byte(s) keep their stored value.
    ///
    /// # Returns
    ///
    /// The word address written.
    pub fn write_column(&mut self, bank: u8, column: u32, data: u16, dqm: u8) -> WordAddr {
        let target = self.column_address(bank, column);
        let dqm = dqm & (DQM_LOW | DQM_HIGH);
        self.store.write_masked(target, data, dqm);
        self.stats.write_commands += 1;
        self.stats.words_written += 1;
        if dqm != 0 {
            self.stats.masked_writes += 1;
        }
        target
    }
}


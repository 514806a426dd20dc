//! Model statistics collection and reporting.
//!
//! This module tracks what the model has been asked to do. It provides:
//! 1. **Cycles:** Evaluated clock edges.
//! 2. **Request view:** Accepted requests by kind, words moved, cancels and refreshes.
//! 3. **Pin view:** Decoded commands by kind, masked writes and pipeline overwrites.
//!
//! The counters are diagnostic only and never influence timing.

use serde::Serialize;

/// Counters shared by both views of the model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SdramStats {
    /// Evaluated clock edges.
    pub cycles: u64,

    /// Requests accepted by the request-level controller.
    pub requests: u64,
    /// Single-word (32-bit) reads completed.
    pub single_reads: u64,
    /// Single-word (32-bit) writes completed.
    pub single_writes: u64,
    /// Burst reads accepted.
    pub burst_reads: u64,
    /// Burst writes accepted.
    pub burst_writes: u64,
    /// 16-bit words delivered to the requester.
    pub words_read: u64,
    /// 16-bit words written into the store.
    pub words_written: u64,
    /// Bursts terminated through the cancel input.
    pub cancels: u64,
    /// Auto-refresh cycles started.
    pub refreshes: u64,
    /// Cycles where a refresh was due but a transfer held it off.
    pub refresh_deferred_cycles: u64,

    /// ACTIVATE commands decoded.
    pub activates: u64,
    /// PRECHARGE commands decoded.
    pub precharges: u64,
    /// READ commands decoded.
    pub read_commands: u64,
    /// WRITE commands decoded.
    pub write_commands: u64,
    /// WRITE commands with at least one byte masked.
    pub masked_writes: u64,
    /// READ commands that displaced a still-pending pipeline slot.
    pub pipeline_overwrites: u64,
    /// NOP, AUTO REFRESH, LOAD MODE and BURST TERMINATE commands. Deselect is not counted.
    pub inert_commands: u64,
}

impl SdramStats {
    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Serializes the counters as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the counters to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("SDRAM MODEL STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("----------------------------------------------------------");
        println!("REQUEST INTERFACE");
        println!("  requests               {}", self.requests);
        println!("  single.reads           {}", self.single_reads);
        println!("  single.writes          {}", self.single_writes);
        println!("  burst.reads            {}", self.burst_reads);
        println!("  burst.writes           {}", self.burst_writes);
        println!("  words.read             {}", self.words_read);
        println!("  words.written          {}", self.words_written);
        println!("  burst.cancels          {}", self.cancels);
        println!("  refreshes              {}", self.refreshes);
        println!("  refresh.deferred       {}", self.refresh_deferred_cycles);
        println!("----------------------------------------------------------");
        println!("PIN INTERFACE");
        println!("  cmd.activate           {}", self.activates);
        println!("  cmd.precharge          {}", self.precharges);
        println!("  cmd.read               {}", self.read_commands);
        println!("  cmd.write              {}", self.write_commands);
        println!("  cmd.write.masked       {}", self.masked_writes);
        println!("  cmd.inert              {}", self.inert_commands);
        println!("  pipe.overwrites        {}", self.pipeline_overwrites);
        println!("==========================================================");
    }
}

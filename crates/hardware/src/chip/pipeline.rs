//! CAS-latency read pipeline.
//!
//! A READ command does not return data until CL cycles later, and the
//! controller may issue further READs in the meantime. The pipeline holds the
//! reads in flight and provides:
//! 1. **Issue:** Place a read in the first free slot, scanning from the head.
//! 2. **Advance:** Count every pending read down once per cycle.
//! 3. **Delivery:** Report the read whose countdown reached zero this cycle.
//!
//! Slots are reused first-free, not in FIFO order. Each slot carries its own
//! target and deadline, so ordering between slots does not matter.

use crate::common::addr::WordAddr;
use crate::common::constants::MAX_READ_PIPE_DEPTH;

/// A read waiting for its CAS latency to elapse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadSlot {
    /// Slot holds a pending read.
    pub valid: bool,
    /// Word the read will return.
    pub target: WordAddr,
    /// Advances left before the data is driven.
    pub remaining: u32,
}

/// Where an issued read landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedRead {
    /// Index of the slot that now holds the read.
    pub slot: usize,
    /// The slot still held a pending read, which has been discarded.
    pub overwrote: bool,
}

/// Fixed-depth ring of pending reads.
#[derive(Clone, Debug)]
pub struct ReadPipeline {
    slots: Vec<ReadSlot>,
    /// Where the next free-slot scan starts.
    head: usize,
}

impl ReadPipeline {
    /// Creates an empty pipeline with `depth` slots.
    ///
    /// `depth` is clamped to `1..=MAX_READ_PIPE_DEPTH` so `issue` always has
    /// a slot to use; validated configurations already lie in that range.
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![ReadSlot::default(); depth.clamp(1, MAX_READ_PIPE_DEPTH)],
            head: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of reads in flight.
    pub fn in_flight(&self) -> usize {
        self.slots.iter().filter(|s| s.valid).count()
    }

    /// Returns the slot the next free-slot scan starts from.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns every slot, valid or not.
    pub fn slots(&self) -> &[ReadSlot] {
        &self.slots
    }

    /// Counts every pending read down by one cycle.
    ///
    /// # Returns
    ///
    /// The target of the read that matured this cycle, if any. Matured slots
    /// are freed. Should two reads mature together (impossible with one READ
    /// per cycle), the highest-numbered slot wins the bus.
    pub fn advance(&mut self) -> Option<WordAddr> {
        let mut matured = None;
        for slot in self.slots.iter_mut().filter(|s| s.valid) {
            slot.remaining = slot.remaining.saturating_sub(1);
            if slot.remaining == 0 {
                slot.valid = false;
                matured = Some(slot.target);
            }
        }
        matured
    }

    /// Schedules a read of `target` to mature after `countdown` advances.
    ///
    /// The first free slot at or after the head is used; if every slot is
    /// pending, the head slot is overwritten and its read is lost. With a depth
    /// of at least the CAS latency and one READ per cycle that cannot happen.
    pub fn issue(&mut self, target: WordAddr, countdown: u32) -> IssuedRead {
        let depth = self.slots.len();
        let free = (0..depth)
            .map(|i| (self.head + i) % depth)
            .find(|&idx| !self.slots[idx].valid);
        let (slot, overwrote) = match free {
            Some(idx) => (idx, false),
            None => (self.head, true),
        };

        self.slots[slot] = ReadSlot {
            valid: true,
            target,
            remaining: countdown,
        };
        self.head = (slot + 1) % depth;

        IssuedRead { slot, overwrote }
    }

    /// Drops every pending read.
    pub fn reset(&mut self) {
        self.slots.fill(ReadSlot::default());
        self.head = 0;
    }
}

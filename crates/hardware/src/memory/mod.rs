//! Word-addressable memory store.
//!
//! This module implements the storage shared by both views of the model. It
//! provides:
//! 1. **Buffer:** Lazily allocated backing storage (`WordBuffer`).
//! 2. **Store:** Clamped 16-bit word access plus 32-bit and bulk helpers.
//! 3. **Surfaces:** Rectangular extraction and fill in linear or 4x4 tiled layout.
//!
//! Out-of-range addresses never fault: reads return 0 and writes are dropped.
//! The hardware under test may compute such addresses during fault injection
//! and the simulation has to keep running.

/// Backing word buffer (mmap on Unix, heap elsewhere).
pub mod buffer;

/// Rectangular surface layouts for bulk seeding and readback.
pub mod surface;

use self::buffer::WordBuffer;
use crate::common::addr::{ByteAddr, WordAddr};
use crate::common::constants;

pub use self::surface::SurfaceLayout;

/// DQM bit that masks the low byte of a write.
pub const DQM_LOW: u8 = 0b01;

/// DQM bit that masks the high byte of a write.
pub const DQM_HIGH: u8 = 0b10;

/// The memory array behind the model: one 16-bit value per word address.
#[derive(Debug)]
pub struct MemoryStore {
    words: WordBuffer,
}

impl Default for MemoryStore {
    /// Creates a store sized for the reference 32 MiB part.
    fn default() -> Self {
        Self::new(constants::TOTAL_WORDS as usize)
    }
}

impl MemoryStore {
    /// Creates a zeroed store of `total_words` words.
    ///
    /// # Arguments
    ///
    /// * `total_words` - Capacity in 16-bit words.
    pub fn new(total_words: usize) -> Self {
        Self {
            words: WordBuffer::new(total_words),
        }
    }

    /// Returns the capacity in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the store has zero capacity.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `addr` falls inside the store.
    #[inline]
    pub fn contains(&self, addr: WordAddr) -> bool {
        (addr.val() as usize) < self.words.len()
    }

    /// Reads one word; out-of-range and never-written words read as 0.
    #[inline]
    pub fn read_word(&self, addr: WordAddr) -> u16 {
        self.words
            .as_slice()
            .get(addr.val() as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Writes one word; out-of-range writes are dropped.
    #[inline]
    pub fn write_word(&mut self, addr: WordAddr, data: u16) {
        if let Some(slot) = self.words.as_mut_slice().get_mut(addr.val() as usize) {
            *slot = data;
        }
    }

    /// Writes the bytes of `data` not masked by `dqm`.
    ///
    /// `dqm` bit 0 masks the low byte and bit 1 the high byte. A fully masked
    /// write leaves the word untouched; a partial one is a read-modify-write.
    pub fn write_masked(&mut self, addr: WordAddr, data: u16, dqm: u8) {
        if dqm & (DQM_LOW | DQM_HIGH) == 0 {
            self.write_word(addr, data);
            return;
        }
        let mut merged = self.read_word(addr);
        if dqm & DQM_LOW == 0 {
            merged = (merged & 0xFF00) | (data & 0x00FF);
        }
        if dqm & DQM_HIGH == 0 {
            merged = (merged & 0x00FF) | (data & 0xFF00);
        }
        self.write_word(addr, merged);
    }

    /// Reads a 32-bit value from the two words at `byte_addr`.
    ///
    /// # Returns
    ///
    /// `low | high << 16`, where the low half is the word containing
    /// `byte_addr` and the high half the word after it.
    pub fn read_word32(&self, byte_addr: ByteAddr) -> u32 {
        let base = byte_addr.to_word();
        let low = self.read_word(base);
        let high = self.read_word(base.next());
        u32::from(low) | (u32::from(high) << 16)
    }

    /// Writes a 32-bit value as two words, low half first.
    pub fn write_word32(&mut self, byte_addr: ByteAddr, value: u32) {
        let base = byte_addr.to_word();
        self.write_word(base, value as u16);
        self.write_word(base.next(), (value >> 16) as u16);
    }

    /// Reads `buffer.len()` consecutive words starting at `start`.
    pub fn burst_read(&self, start: WordAddr, buffer: &mut [u16]) {
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.read_word(start.offset(i as u32));
        }
    }

    /// Writes `data` to consecutive words starting at `start`.
    pub fn burst_write(&mut self, start: WordAddr, data: &[u16]) {
        for (i, &word) in data.iter().enumerate() {
            self.write_word(start.offset(i as u32), word);
        }
    }

    /// Uploads raw bytes as little-endian words starting at `base`.
    ///
    /// A trailing odd byte has no partner to form a word and is ignored.
    pub fn upload_raw(&mut self, base: WordAddr, bytes: &[u8]) {
        for (i, pair) in bytes.chunks_exact(2).enumerate() {
            self.write_word(base.offset(i as u32), u16::from_le_bytes([pair[0], pair[1]]));
        }
    }

    /// Zeroes the whole store.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Returns the raw word contents.
    pub fn as_words(&self) -> &[u16] {
        self.words.as_slice()
    }
}

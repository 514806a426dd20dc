//! Rectangular surface access.
//!
//! Test setup seeds textures and reads back framebuffers as rectangles of
//! 16-bit pixels. Which layout a surface uses belongs to the caller; this
//! module only maps `(x, y)` to a word offset and moves the pixels.

use super::MemoryStore;
use crate::common::addr::WordAddr;
use crate::common::constants::TILE_WORDS;

/// How pixel `(x, y)` of a surface maps to a word offset from its base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceLayout {
    /// Row-major with a fixed row pitch: `y * stride_words + x`.
    Linear {
        /// Words between the starts of consecutive rows.
        stride_words: u32,
    },
    /// 4x4 blocks of 16 words each, blocks in row-major order.
    ///
    /// `block = ((y >> 2) << (width_log2 - 2)) | (x >> 2)` and
    /// `offset = block * 16 + (y & 3) * 4 + (x & 3)`. Widths too large for
    /// the row term to fit a 32-bit shift contribute no row offset.
    BlockTiled {
        /// Log2 of the surface width in pixels; at least 2.
        width_log2: u32,
    },
}

impl SurfaceLayout {
    /// Returns the word offset of pixel `(x, y)` from the surface base.
    pub const fn word_offset(self, x: u32, y: u32) -> u32 {
        match self {
            Self::Linear { stride_words } => y.wrapping_mul(stride_words).wrapping_add(x),
            Self::BlockTiled { width_log2 } => {
                let blocks_per_row_log2 = width_log2.saturating_sub(2);
                let row_blocks = if blocks_per_row_log2 < u32::BITS {
                    (y >> 2) << blocks_per_row_log2
                } else {
                    0
                };
                let block = row_blocks | (x >> 2);
                block
                    .wrapping_mul(TILE_WORDS)
                    .wrapping_add((y & 3) * 4 + (x & 3))
            }
        }
    }

    /// Returns the word address of pixel `(x, y)` for a surface at `base`.
    pub const fn word_addr(self, base: WordAddr, x: u32, y: u32) -> WordAddr {
        base.offset(self.word_offset(x, y))
    }
}

impl MemoryStore {
    /// Reads a `width` x `height` surface into a row-major pixel vector.
    ///
    /// # Arguments
    ///
    /// * `base` - Word address of pixel `(0, 0)`.
    /// * `layout` - Address mapping of the surface.
    /// * `width` - Pixels per row to read.
    /// * `height` - Rows to read.
    pub fn extract_surface(
        &self,
        base: WordAddr,
        layout: SurfaceLayout,
        width: u32,
        height: u32,
    ) -> Vec<u16> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.read_word(layout.word_addr(base, x, y)));
            }
        }
        pixels
    }

    /// Writes row-major `pixels` into a surface of the given `width`.
    ///
    /// The number of rows is `pixels.len() / width`; a trailing partial row is
    /// written as far as it goes. A zero width writes nothing.
    pub fn fill_surface(&mut self, base: WordAddr, layout: SurfaceLayout, width: u32, pixels: &[u16]) {
        if width == 0 {
            return;
        }
        for (row, chunk) in pixels.chunks(width as usize).enumerate() {
            for (x, &pixel) in chunk.iter().enumerate() {
                self.write_word(layout.word_addr(base, x as u32, row as u32), pixel);
            }
        }
    }
}

//! Byte and word address types.
//!
//! The request-level interface speaks byte addresses while the store and the
//! pin-level bus speak 16-bit word addresses. This module keeps the two apart:
//! 1. **Type Safety:** `ByteAddr` and `WordAddr` cannot be mixed by accident.
//! 2. **Conversion:** Byte-to-word conversion drops bit 0, matching the bus width.
//! 3. **Bank Geometry:** `BankRowCol` is the decomposed form used on the pin bus.

use std::fmt;

/// A byte address as presented on the request-level interface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteAddr(pub u32);

/// A 16-bit word address into the memory store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordAddr(pub u32);

impl ByteAddr {
    /// Returns the raw byte address.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Converts to the word address containing this byte.
    ///
    /// # Returns
    ///
    /// The word address (`byte / 2`); the low byte-select bit is discarded.
    #[inline(always)]
    pub const fn to_word(self) -> WordAddr {
        WordAddr(self.0 >> 1)
    }
}

impl WordAddr {
    /// Returns the raw word address.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the byte address of the first byte of this word.
    #[inline(always)]
    pub const fn to_byte(self) -> ByteAddr {
        ByteAddr(self.0.wrapping_shl(1))
    }

    /// Returns the next sequential word address, wrapping at `u32::MAX`.
    ///
    /// Burst transfers auto-increment with this; a wrapped address is simply
    /// out of range and clamps like any other.
    #[inline(always)]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the address `n` words further on, wrapping at `u32::MAX`.
    #[inline(always)]
    pub const fn offset(self, n: u32) -> Self {
        Self(self.0.wrapping_add(n))
    }
}

impl From<u32> for WordAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl From<u32> for ByteAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Display for ByteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{:#08x}", self.0)
    }
}

impl fmt::Display for WordAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{:#08x}", self.0)
    }
}

/// A word address split into the fields driven on the SDRAM pins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankRowCol {
    /// Bank select (BA[1:0]).
    pub bank: u8,
    /// Row address presented with ACTIVATE.
    pub row: u32,
    /// Column address presented with READ/WRITE.
    pub column: u32,
}

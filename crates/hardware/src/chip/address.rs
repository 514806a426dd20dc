//! Pin-level address mapping.
//!
//! The controller under test splits a word address into bank, row and column
//! and drives them on separate commands. The model rebuilds the flat word
//! address as `(bank << bank_shift) | (row << row_shift) | column`. With the
//! reference layout bank 2 and 3 land above the 16 Mi word store and clamp,
//! exactly as they do against the controller's own decomposition.

use crate::common::addr::{BankRowCol, WordAddr};
use crate::config::GeometryConfig;

/// Field layout used to compose and split word addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressMap {
    bank_shift: u32,
    row_shift: u32,
    column_mask: u32,
    row_mask: u32,
    bank_mask: u32,
    all_banks_bit: u32,
}

impl Default for AddressMap {
    fn default() -> Self {
        Self::new(&GeometryConfig::default())
    }
}

impl AddressMap {
    /// Builds the map from a (validated) geometry section.
    pub const fn new(geometry: &GeometryConfig) -> Self {
        Self {
            bank_shift: geometry.bank_shift,
            row_shift: geometry.row_shift,
            column_mask: geometry.column_mask,
            row_mask: geometry.row_mask,
            bank_mask: geometry.bank_mask,
            all_banks_bit: geometry.all_banks_bit,
        }
    }

    /// Rebuilds a word address from bank, row and column.
    #[inline]
    pub const fn compose(&self, bank: u8, row: u32, column: u32) -> WordAddr {
        let bank = (bank as u32 & self.bank_mask).wrapping_shl(self.bank_shift);
        let row = (row & self.row_mask).wrapping_shl(self.row_shift);
        WordAddr(bank | row | (column & self.column_mask))
    }

    /// Splits a word address into the fields a controller would drive.
    pub const fn decompose(&self, addr: WordAddr) -> BankRowCol {
        BankRowCol {
            bank: (addr.0.wrapping_shr(self.bank_shift) & self.bank_mask) as u8,
            row: addr.0.wrapping_shr(self.row_shift) & self.row_mask,
            column: addr.0 & self.column_mask,
        }
    }

    /// Extracts the bank from the BA lines.
    #[inline]
    pub const fn bank(&self, ba: u8) -> u8 {
        (ba as u32 & self.bank_mask) as u8
    }

    /// Extracts the row presented with ACTIVATE.
    #[inline]
    pub const fn row(&self, a: u16) -> u32 {
        a as u32 & self.row_mask
    }

    /// Extracts the column presented with READ/WRITE.
    #[inline]
    pub const fn column(&self, a: u16) -> u32 {
        a as u32 & self.column_mask
    }

    /// Returns `true` if a PRECHARGE with address `a` closes every bank.
    #[inline]
    pub const fn is_all_banks(&self, a: u16) -> bool {
        (a as u32).wrapping_shr(self.all_banks_bit) & 1 != 0
    }
}

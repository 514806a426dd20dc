//! Per-bank row state.
//!
//! ACTIVATE opens a row in a bank and PRECHARGE closes it. The recorded row is
//! trusted: a READ or WRITE to a bank that was never activated, or has since
//! been precharged, uses whatever row the table last held. A real part would
//! return garbage there; the model stays deterministic instead.

use crate::common::constants::BANK_COUNT;

/// Row state of a single bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankState {
    /// A row is open in this bank.
    pub row_active: bool,
    /// Row last opened by ACTIVATE.
    pub active_row: u32,
}

/// Row state for all banks of the device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankTable {
    banks: [BankState; BANK_COUNT],
}

impl BankTable {
    #[inline(always)]
    fn index(bank: u8) -> usize {
        usize::from(bank) % BANK_COUNT
    }

    /// Opens `row` in `bank`.
    pub fn activate(&mut self, bank: u8, row: u32) {
        self.banks[Self::index(bank)] = BankState {
            row_active: true,
            active_row: row,
        };
    }

    /// Closes the open row in `bank`; the recorded row number is kept.
    pub fn precharge(&mut self, bank: u8) {
        self.banks[Self::index(bank)].row_active = false;
    }

    /// Closes the open row in every bank.
    pub fn precharge_all(&mut self) {
        for bank in &mut self.banks {
            bank.row_active = false;
        }
    }

    /// Returns the row last opened in `bank`, open or not.
    #[inline]
    pub fn active_row(&self, bank: u8) -> u32 {
        self.banks[Self::index(bank)].active_row
    }

    /// Returns the state of `bank`.
    pub fn get(&self, bank: u8) -> BankState {
        self.banks[Self::index(bank)]
    }

    /// Returns the number of banks with an open row.
    pub fn open_count(&self) -> usize {
        self.banks.iter().filter(|b| b.row_active).count()
    }

    /// Closes every bank and forgets every row.
    pub fn reset(&mut self) {
        self.banks = [BankState::default(); BANK_COUNT];
    }
}

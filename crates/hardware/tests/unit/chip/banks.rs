//! Bank Table Unit Tests.
//!
//! Verifies that ACTIVATE and PRECHARGE track open rows per bank and that
//! column accesses resolve against the recorded row.

use sdram_sim_core::chip::SdramChip;
use sdram_sim_core::chip::address::AddressMap;
use sdram_sim_core::common::{BankRowCol, WordAddr};

#[test]
fn activate_opens_row_in_one_bank() {
    let mut chip = SdramChip::default();
    chip.activate(1, 0x42);
    assert!(chip.banks().get(1).row_active);
    assert_eq!(chip.banks().active_row(1), 0x42);
    assert!(!chip.banks().get(0).row_active);
    assert_eq!(chip.banks().open_count(), 1);
}

#[test]
fn precharge_single_bank_keeps_others_open() {
    let mut chip = SdramChip::default();
    chip.activate(0, 1);
    chip.activate(1, 2);
    chip.precharge(0, false);
    assert!(!chip.banks().get(0).row_active);
    assert!(chip.banks().get(1).row_active);
}

#[test]
fn precharge_all_closes_every_bank() {
    let mut chip = SdramChip::default();
    for bank in 0..4 {
        chip.activate(bank, u32::from(bank) + 10);
    }
    chip.precharge(2, true);
    assert_eq!(chip.banks().open_count(), 0);
    // The row number survives; only the open flag is cleared.
    assert_eq!(chip.banks().active_row(3), 13);
}

#[test]
fn column_address_uses_recorded_row() {
    let mut chip = SdramChip::default();
    chip.activate(1, 0x10);
    assert_eq!(
        chip.column_address(1, 0x5),
        WordAddr((1 << 23) | (0x10 << 9) | 0x5)
    );
}

#[test]
fn never_activated_bank_resolves_against_row_zero() {
    let chip = SdramChip::default();
    assert_eq!(chip.column_address(0, 0x7), WordAddr(0x7));
}

#[test]
fn reset_closes_banks_but_keeps_store() {
    let mut chip = SdramChip::default();
    chip.activate(0, 3);
    chip.store_mut().write_word(WordAddr(9), 0xAB);
    chip.reset();
    assert_eq!(chip.banks().open_count(), 0);
    assert_eq!(chip.banks().active_row(0), 0);
    assert_eq!(chip.store().read_word(WordAddr(9)), 0xAB);
}

#[test]
fn address_map_round_trip() {
    let map = AddressMap::default();
    let fields = BankRowCol {
        bank: 3,
        row: 0x1ABC,
        column: 0x1F0,
    };
    let addr = map.compose(fields.bank, fields.row, fields.column);
    assert_eq!(map.decompose(addr), fields);
}

#[test]
fn address_map_masks_oversized_fields() {
    let map = AddressMap::default();
    assert_eq!(map.row(0xFFFF), 0x1FFF);
    assert_eq!(map.column(0xFFFF), 0x1FF);
    assert_eq!(map.bank(0xFF), 3);
}

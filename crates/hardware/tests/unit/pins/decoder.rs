//! Pin Decoder Unit Tests.
//!
//! Verifies command decoding from the control lines, bank bookkeeping, read
//! latency through the pipeline and DQM-masked writes.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sdram_sim_core::common::WordAddr;
use sdram_sim_core::pins::PinDecoder;
use sdram_sim_core::pins::bus::PinInputs;
use sdram_sim_core::pins::command::SdramCommand;
use sdram_sim_core::sim::ClockDriver;

use crate::common::harness;

fn addr(bank: u32, row: u32, column: u32) -> WordAddr {
    WordAddr((bank << 23) | (row << 9) | column)
}

/// Drives `sequence` one edge each, then NOPs, and returns `(cycle, dq)` for
/// every edge with valid read data.
fn run(drv: &mut ClockDriver<PinDecoder>, sequence: &[PinInputs], tail: u64) -> Vec<(u64, u16)> {
    let mut data = Vec::new();
    let nops = std::iter::repeat_n(PinInputs::nop(), tail as usize);
    for pins in sequence.iter().copied().chain(nops) {
        let out = *drv.step(&pins);
        if out.dq_valid {
            data.push((drv.cycle(), out.dq));
        }
    }
    data
}

// ══════════════════════════════════════════════════════════
// 1. Command decoding
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(false, true, true, true, SdramCommand::Nop)]
#[case(false, false, true, true, SdramCommand::Activate)]
#[case(false, true, false, true, SdramCommand::Read)]
#[case(false, true, false, false, SdramCommand::Write)]
#[case(false, false, true, false, SdramCommand::Precharge)]
#[case(false, false, false, true, SdramCommand::AutoRefresh)]
#[case(false, false, false, false, SdramCommand::LoadMode)]
#[case(false, true, true, false, SdramCommand::BurstTerminate)]
#[case(true, false, true, false, SdramCommand::Deselect)]
#[case(true, true, true, true, SdramCommand::Deselect)]
fn control_lines_decode(
    #[case] csn: bool,
    #[case] rasn: bool,
    #[case] casn: bool,
    #[case] wen: bool,
    #[case] expected: SdramCommand,
) {
    let pins = PinInputs {
        csn,
        rasn,
        casn,
        wen,
        ..PinInputs::nop()
    };
    assert_eq!(pins.decoded(), expected);
}

#[test]
fn builders_drive_their_command() {
    assert_eq!(PinInputs::default().decoded(), SdramCommand::Nop);
    assert_eq!(PinInputs::activate(1, 2).decoded(), SdramCommand::Activate);
    assert_eq!(PinInputs::read(1, 2).decoded(), SdramCommand::Read);
    assert_eq!(PinInputs::write(1, 2, 3, 0).decoded(), SdramCommand::Write);
    assert_eq!(PinInputs::precharge(1).decoded(), SdramCommand::Precharge);
    assert_eq!(PinInputs::precharge_all().a, 1 << 10);
}

// ══════════════════════════════════════════════════════════
// 2. Bank bookkeeping
// ══════════════════════════════════════════════════════════

#[test]
fn activate_and_precharge_track_banks() {
    let mut drv = harness::decoder();
    let _ = run(
        &mut drv,
        &[
            PinInputs::activate(0, 0x11),
            PinInputs::activate(3, 0x22),
            PinInputs::precharge(0),
        ],
        0,
    );
    let banks = drv.model().chip().banks();
    assert!(!banks.get(0).row_active);
    assert!(banks.get(3).row_active);
    assert_eq!(banks.active_row(3), 0x22);

    let _ = drv.step(&PinInputs::precharge_all());
    assert_eq!(drv.model().chip().banks().open_count(), 0);
    assert_eq!(drv.model().last_command(), Some(SdramCommand::Precharge));
}

#[test]
fn inert_commands_change_nothing() {
    let mut drv = harness::decoder();
    let _ = run(&mut drv, &[PinInputs::activate(1, 7)], 0);
    let before = drv.model().chip().banks().clone();
    let inert = [
        PinInputs::command(SdramCommand::AutoRefresh),
        PinInputs::command(SdramCommand::LoadMode),
        PinInputs::command(SdramCommand::BurstTerminate),
        PinInputs::command(SdramCommand::Deselect),
        PinInputs::nop(),
    ];
    let data = run(&mut drv, &inert, 0);
    assert!(data.is_empty());
    assert_eq!(drv.model().chip().banks(), &before);
    assert!(drv.model().store().as_words().iter().take(1024).all(|&w| w == 0));
    // Deselect is not a command at all.
    assert_eq!(drv.model().stats().inert_commands, 4);
}

// ══════════════════════════════════════════════════════════
// 3. Reads
// ══════════════════════════════════════════════════════════

#[test]
fn read_data_appears_cas_latency_minus_one_edges_later() {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(addr(0, 5, 3), 0xBEEF);
    let data = run(
        &mut drv,
        &[PinInputs::activate(0, 5), PinInputs::read(0, 3)],
        4,
    );
    assert_eq!(data, vec![(4, 0xBEEF)]);
}

#[test]
fn dq_is_zero_when_nothing_matures() {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(addr(0, 0, 0), 0x1234);
    let out = *drv.step(&PinInputs::read(0, 0));
    assert_eq!(out.dq, 0);
    assert!(!out.dq_valid);
}

#[test]
fn back_to_back_reads_stream_in_order() {
    let mut drv = harness::decoder();
    for col in 0..16u32 {
        drv.model_mut()
            .store_mut()
            .write_word(addr(1, 9, col), 0x100 + col as u16);
    }
    let mut sequence = vec![PinInputs::activate(1, 9)];
    sequence.extend((0..16).map(|col| PinInputs::read(1, col)));
    let data = run(&mut drv, &sequence, 4);

    let expected: Vec<(u64, u16)> = (0..16u16).map(|col| (4 + u64::from(col), 0x100 + col)).collect();
    assert_eq!(data, expected);
    assert_eq!(drv.model().stats().pipeline_overwrites, 0);
    assert_eq!(drv.model().stats().read_commands, 16);
}

#[test]
fn read_from_never_activated_bank_uses_stale_row() {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(addr(1, 0, 8), 0x7777);
    let data = run(&mut drv, &[PinInputs::read(1, 8)], 3);
    assert_eq!(data, vec![(3, 0x7777)]);
}

#[test]
fn read_after_precharge_uses_last_row() {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(addr(0, 4, 1), 0x4242);
    let data = run(
        &mut drv,
        &[
            PinInputs::activate(0, 4),
            PinInputs::precharge(0),
            PinInputs::read(0, 1),
        ],
        3,
    );
    assert_eq!(data, vec![(5, 0x4242)]);
}

#[test]
fn upper_banks_clamp_with_reference_layout() {
    let mut drv = harness::decoder();
    let _ = run(
        &mut drv,
        &[
            PinInputs::activate(2, 0),
            PinInputs::write(2, 0, 0xABCD, 0),
            PinInputs::read(2, 0),
        ],
        3,
    );
    assert_eq!(drv.model().store().read_word(WordAddr(0)), 0);
    assert_eq!(drv.model().outputs().dq, 0);
    assert_eq!(drv.model().stats().words_written, 1);
}

#[test]
fn reset_drops_in_flight_reads() {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(WordAddr(0), 0x1111);
    let _ = drv.step(&PinInputs::read(0, 0));
    drv.reset();
    let data = run(&mut drv, &[], 4);
    assert!(data.is_empty());
    assert_eq!(drv.model().store().read_word(WordAddr(0)), 0x1111);
}

// ══════════════════════════════════════════════════════════
// 4. Writes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::full(0b00, 0xBEEF)]
#[case::high_byte_only(0b01, 0xBE34)]
#[case::low_byte_only(0b10, 0x12EF)]
#[case::none(0b11, 0x1234)]
fn write_honours_dqm(#[case] dqm: u8, #[case] expected: u16) {
    let mut drv = harness::decoder();
    drv.model_mut().store_mut().write_word(addr(0, 3, 0x10), 0x1234);
    let _ = run(
        &mut drv,
        &[PinInputs::activate(0, 3), PinInputs::write(0, 0x10, 0xBEEF, dqm)],
        0,
    );
    assert_eq!(drv.model().store().read_word(addr(0, 3, 0x10)), expected);
    let masked = u64::from(dqm != 0);
    assert_eq!(drv.model().stats().masked_writes, masked);
}

#[test]
fn write_then_read_round_trip() {
    let mut drv = harness::decoder();
    let data = run(
        &mut drv,
        &[
            PinInputs::activate(1, 0x1FFF),
            PinInputs::write(1, 0x1FF, 0xC0DE, 0),
            PinInputs::read(1, 0x1FF),
        ],
        3,
    );
    assert_eq!(data, vec![(5, 0xC0DE)]);
    assert_eq!(drv.model().store().read_word(addr(1, 0x1FFF, 0x1FF)), 0xC0DE);
}

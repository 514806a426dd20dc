//! Controller Burst Tests.
//!
//! Verifies burst writes driven through the `burst_wdata_req` handshake,
//! burst read data integrity, and termination through `burst_cancel`.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sdram_sim_core::common::WordAddr;
use sdram_sim_core::controller::signals::RequestInputs;
use sdram_sim_core::controller::state::{StateKind, Transfer};

use crate::common::harness::{self, record};

// ══════════════════════════════════════════════════════════
// 1. Burst writes
// ══════════════════════════════════════════════════════════

#[test]
fn burst_write_requests_each_word() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_write(0x100, 4);
    let mut reqs = Vec::new();
    let mut inputs = request;
    let mut next = 0u16;
    for _ in 0..10 {
        let out = *drv.step(&inputs);
        inputs = inputs.released();
        if out.burst_wdata_req {
            reqs.push(drv.cycle());
            inputs = inputs.with_burst_wdata(0x5000 + next);
            next += 1;
        }
        if out.ack {
            assert!(out.burst_done);
            assert_eq!(drv.cycle(), 7);
            break;
        }
    }
    // First request when the row is open, then one per accepted word.
    assert_eq!(reqs, vec![3, 4, 5, 6]);
    let mut words = [0u16; 4];
    drv.model().store().burst_read(WordAddr(0x80), &mut words);
    assert_eq!(words, [0x5000, 0x5001, 0x5002, 0x5003]);
}

#[test]
fn accepted_burst_carries_its_transfer() {
    let mut drv = harness::controller();
    let _ = drv.step(&RequestInputs::burst_read(0x100, 4));
    assert_eq!(
        drv.model().state().transfer().copied(),
        Some(Transfer::burst(WordAddr(0x80), 4, false))
    );
    assert!(drv.run_until(&RequestInputs::idle(), 16, |o| o.burst_done).is_some());
    assert_eq!(drv.model().state().transfer(), None);
}

#[test]
fn burst_write_then_burst_read() {
    let mut drv = harness::controller();
    let data: Vec<u16> = (0..32).map(|i| 0x1234 ^ (i * 0x0101)).collect();
    let _ = harness::burst_write(&mut drv, 0x4000, &data);
    assert_eq!(harness::burst_read(&mut drv, 0x4000, 32), data);
}

#[test]
fn burst_words_cross_rows_linearly() {
    let mut drv = harness::controller();
    // Word 0x1FE is two words before a 512-word row boundary.
    let data = [1, 2, 3, 4];
    let _ = harness::burst_write(&mut drv, 0x1FE * 2, &data);
    assert_eq!(drv.model().store().read_word(WordAddr(0x200)), 3);
    assert_eq!(harness::burst_read(&mut drv, 0x1FE * 2, 4), data.to_vec());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn burst_write_read_integrity(
        word in 0u32..0x10_0000,
        data in prop::collection::vec(any::<u16>(), 1..=24),
    ) {
        let mut drv = harness::controller();
        let _ = harness::burst_write(&mut drv, word * 2, &data);
        let len = u8::try_from(data.len()).unwrap();
        prop_assert_eq!(harness::burst_read(&mut drv, word * 2, len), data);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Cancellation
// ══════════════════════════════════════════════════════════

#[test]
fn cancel_mid_burst_read_acks_after_precharge() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_read(0, 8);
    let mut edges = record(&mut drv, request, request.released(), 7);
    // Words on 6 and 7, cancel on 8.
    edges.extend(record(&mut drv, request.released().cancelled(), request.released(), 5));

    let valid: Vec<u64> = edges
        .iter()
        .filter(|e| e.out.burst_data_valid)
        .map(|e| e.cycle)
        .collect();
    assert_eq!(valid, vec![6, 7]);
    let acks: Vec<u64> = edges.iter().filter(|e| e.out.ack).map(|e| e.cycle).collect();
    assert_eq!(acks, vec![10]);
    assert!(edges.iter().all(|e| !e.out.burst_done));
    assert_eq!(drv.model().stats().cancels, 1);
}

#[test]
fn cancel_with_first_word_is_latched() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_read(0, 8);
    let mut edges = record(&mut drv, request, request.released(), 5);
    // Cancel arrives together with the first word and is dropped afterwards.
    edges.extend(record(&mut drv, request.released().cancelled(), request.released(), 6));

    let valid: Vec<u64> = edges
        .iter()
        .filter(|e| e.out.burst_data_valid)
        .map(|e| e.cycle)
        .collect();
    assert_eq!(valid, vec![6]);
    let acks: Vec<u64> = edges.iter().filter(|e| e.out.ack).map(|e| e.cycle).collect();
    assert_eq!(acks, vec![9]);
}

#[test]
fn cancel_on_last_word_is_ignored() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_read(0, 1);
    let mut edges = record(&mut drv, request, request.released(), 5);
    edges.extend(record(&mut drv, request.released().cancelled(), request.released(), 4));
    let done = edges.iter().find(|e| e.out.burst_done).expect("done");
    assert_eq!(done.cycle, 6);
    assert!(done.out.ack);
    assert_eq!(edges.iter().filter(|e| e.out.ack).count(), 1);
    assert_eq!(drv.model().stats().cancels, 0);
}

#[test]
fn cancel_burst_write_stops_writing() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_write(0, 8);
    // Edges 1-3 open the row; edge 4 writes the first word.
    let _ = record(&mut drv, request, request.released(), 3);
    let out = *drv.step(&request.released().with_burst_wdata(0xAAAA));
    assert!(out.burst_wdata_req);
    let out = *drv.step(&request.released().with_burst_wdata(0xBBBB).cancelled());
    assert!(!out.burst_wdata_req);
    assert_eq!(drv.model().state().kind(), StateKind::Precharge);
    let acked = drv.run_until(&request.released(), 4, |o| o.ack);
    assert_eq!(acked, Some(2));

    let mut words = [0u16; 3];
    drv.model().store().burst_read(WordAddr(0), &mut words);
    assert_eq!(words, [0xAAAA, 0, 0]);
}

#[test]
fn cancel_while_idle_does_nothing() {
    let mut drv = harness::controller();
    let edges = record(
        &mut drv,
        RequestInputs::idle().cancelled(),
        RequestInputs::idle().cancelled(),
        10,
    );
    assert!(edges.iter().all(|e| !e.out.ack));
    assert_eq!(drv.model().state().kind(), StateKind::Idle);
}

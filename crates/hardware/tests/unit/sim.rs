//! # Clock Driver Tests
//!
//! Verifies cycle counting, waiting with a limit and reset through the
//! `Clocked` interface, for both views.

use sdram_sim_core::controller::signals::{ControllerOutputs, RequestInputs};
use sdram_sim_core::pins::bus::PinInputs;
use sdram_sim_core::sim::Clocked;

use crate::common::harness;

#[test]
fn step_and_idle_count_cycles() {
    let mut drv = harness::controller();
    let _ = drv.step(&RequestInputs::idle());
    drv.idle(9);
    assert_eq!(drv.cycle(), 10);
    assert_eq!(drv.model().stats().cycles, 10);
}

#[test]
fn run_until_reports_edges_taken() {
    let mut drv = harness::controller();
    let request = RequestInputs::burst_read(0, 4);
    let taken = drv.run_until(&request, 20, |o| o.burst_data_valid);
    assert_eq!(taken, Some(6));
    assert_eq!(drv.cycle(), 6);
}

#[test]
fn run_until_gives_up_at_the_limit() {
    let mut drv = harness::controller();
    let taken = drv.run_until(&RequestInputs::idle(), 50, |o| o.ack);
    assert_eq!(taken, None);
    assert_eq!(drv.cycle(), 50);
}

#[test]
fn hold_repeats_inputs() {
    let mut drv = harness::decoder();
    drv.hold(&PinInputs::activate(2, 1), 3);
    assert_eq!(drv.model().stats().activates, 3);
    assert_eq!(drv.cycle(), 3);
}

#[test]
fn reset_keeps_memory() {
    let mut drv = harness::controller();
    harness::write32(&mut drv, 8, 0x0BAD_F00D);
    drv.reset();
    assert_eq!(drv.cycle(), 0);
    assert_eq!(*drv.outputs(), ControllerOutputs::default());
    assert_eq!(harness::read32(&mut drv, 8), 0x0BAD_F00D);
}

fn drive_idle<M: Clocked>(model: &mut M, inputs: &M::Inputs, cycles: usize) {
    for _ in 0..cycles {
        model.eval(inputs);
    }
}

#[test]
fn both_views_are_clocked() {
    let mut ctrl = harness::controller().into_inner();
    drive_idle(&mut ctrl, &RequestInputs::idle(), 781);
    assert!(!Clocked::outputs(&ctrl).ready);

    let mut pins = harness::decoder().into_inner();
    drive_idle(&mut pins, &PinInputs::nop(), 5);
    assert!(!Clocked::outputs(&pins).dq_valid);
    assert_eq!(pins.stats().cycles, 5);
}

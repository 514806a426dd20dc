//! Refresh Counter Unit Tests.

use sdram_sim_core::chip::refresh::RefreshScheduler;
use sdram_sim_core::config::TimingConfig;

#[test]
fn due_once_interval_is_reached() {
    let mut refresh = RefreshScheduler::new(&TimingConfig::default());
    for _ in 0..780 {
        assert!(!refresh.tick());
    }
    assert!(refresh.tick());
    assert_eq!(refresh.counter(), 781);
}

#[test]
fn stays_due_until_begun() {
    let mut refresh = RefreshScheduler::new(&TimingConfig::default());
    for _ in 0..781 {
        let _ = refresh.tick();
    }
    assert!(refresh.tick());
    assert!(refresh.is_due());
    assert_eq!(refresh.begin(), 6);
    assert_eq!(refresh.counter(), 0);
    assert!(!refresh.is_due());
}

#[test]
fn reset_clears_counter() {
    let mut refresh = RefreshScheduler::new(&TimingConfig::default());
    let _ = refresh.tick();
    refresh.reset();
    assert_eq!(refresh.counter(), 0);
    assert_eq!(refresh.interval(), 781);
    assert_eq!(refresh.duration(), 6);
}

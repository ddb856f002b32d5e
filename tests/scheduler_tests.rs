// Host-side tests for the frame-driven interval scheduler and boot sequencer.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod boot {
        include!("../src/core/boot.rs");
    }
    pub mod scheduler {
        include!("../src/core/scheduler.rs");
    }
}

use crate::core::boot::*;
use crate::core::constants::*;
use crate::core::scheduler::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Job {
    Scratch,
    Name,
}

fn demo_scheduler() -> Scheduler<Job> {
    let mut s = Scheduler::new();
    s.every(SCRATCH_INTERVAL_MS, Job::Scratch)
        .every(NAME_INTERVAL_MS, Job::Name);
    s
}

#[test]
fn idle_scheduler_never_fires() {
    let mut s = demo_scheduler();
    assert!(!s.is_running());
    assert!(s.advance(10_000.0).is_empty());
}

#[test]
fn start_is_idempotent() {
    let mut s = demo_scheduler();
    assert!(s.start());
    assert!(!s.start());
    assert_eq!(s.len(), 2);
    // a second start must not double the firing rate
    assert_eq!(s.advance(SCRATCH_INTERVAL_MS).as_slice(), &[Job::Scratch]);
}

#[test]
fn non_positive_intervals_are_ignored() {
    let mut s: Scheduler<Job> = Scheduler::new();
    s.every(0.0, Job::Scratch).every(-5.0, Job::Name).every(f64::NAN, Job::Name);
    assert!(s.is_empty());
}

#[test]
fn fires_on_interval_boundaries() {
    let mut s = demo_scheduler();
    s.start();
    let mut scratches = 0;
    let mut names = 0;
    // ~9.2 seconds at 60 fps
    for _ in 0..550 {
        for job in s.advance(1000.0 / 60.0) {
            match job {
                Job::Scratch => scratches += 1,
                Job::Name => names += 1,
            }
        }
    }
    assert_eq!(scratches, 8);
    assert_eq!(names, 1);
}

#[test]
fn long_frame_fires_each_task_once() {
    let mut s = demo_scheduler();
    s.start();
    assert!(s.advance(16.0).is_empty());
    // a minute in a hidden tab comes back as one frame
    let fired = s.advance(60_000.0);
    assert_eq!(fired.as_slice(), &[Job::Scratch, Job::Name]);
    assert!(s.advance(16.0).is_empty());
}

#[test]
fn long_frame_keeps_the_phase() {
    let mut s = demo_scheduler();
    s.start();
    let fired = s.advance(2.5 * SCRATCH_INTERVAL_MS);
    assert_eq!(fired.as_slice(), &[Job::Scratch]);
    // 550 ms carried over
    assert!(s.advance(400.0).is_empty());
    assert_eq!(s.advance(200.0).as_slice(), &[Job::Scratch]);
}

#[test]
fn stop_resets_phase() {
    let mut s = demo_scheduler();
    s.start();
    s.advance(1000.0);
    s.stop();
    assert!(s.advance(5000.0).is_empty());
    s.start();
    assert!(s.advance(200.0).is_empty());
    assert_eq!(s.advance(900.0).as_slice(), &[Job::Scratch]);
}

#[test]
fn bad_dt_is_ignored() {
    let mut s = demo_scheduler();
    s.start();
    assert!(s.advance(-100.0).is_empty());
    assert!(s.advance(f64::NAN).is_empty());
    assert_eq!(s.advance(SCRATCH_INTERVAL_MS).as_slice(), &[Job::Scratch]);
}

#[test]
fn boot_starts_loading_with_disabled_button() {
    let b = BootSequencer::new(BOOT_DELAY_MS, BOOT_FADE_MS);
    assert_eq!(b.phase(), BootPhase::Loading);
    let v = b.view();
    assert_eq!(v.loader_fraction, 0.0);
    assert!(!v.button_ready);
    assert!(v.overlay_visible);
    assert!(!v.hud_visible);
}

#[test]
fn boot_click_before_ready_is_ignored() {
    let mut b = BootSequencer::new(BOOT_DELAY_MS, BOOT_FADE_MS);
    b.advance(BOOT_DELAY_MS / 2.0);
    assert!((b.view().loader_fraction - 0.5).abs() < 1e-6);
    assert!(!b.activate());
    assert_eq!(b.phase(), BootPhase::Loading);
}

#[test]
fn boot_runs_through_fade() {
    let mut b = BootSequencer::new(BOOT_DELAY_MS, BOOT_FADE_MS);
    assert_eq!(b.advance(BOOT_DELAY_MS), Some(BootPhase::Ready));
    assert!(b.is_ready());
    assert!(b.view().button_ready);

    assert!(b.activate());
    assert!(!b.activate(), "second click must be rejected");
    assert_eq!(b.phase(), BootPhase::Fading);

    assert_eq!(b.advance(BOOT_FADE_MS / 2.0), None);
    assert!((b.view().overlay_opacity - 0.5).abs() < 1e-6);

    assert_eq!(b.advance(BOOT_FADE_MS / 2.0), Some(BootPhase::Running));
    assert!(b.is_running());
    let v = b.view();
    assert_eq!(v.overlay_opacity, 0.0);
    assert!(!v.overlay_visible);
    assert!(v.hud_visible);
}

#[test]
fn boot_waits_for_click_when_ready() {
    let mut b = BootSequencer::new(BOOT_DELAY_MS, BOOT_FADE_MS);
    b.advance(BOOT_DELAY_MS);
    assert_eq!(b.advance(60_000.0), None);
    assert_eq!(b.phase(), BootPhase::Ready);
    assert_eq!(b.view().overlay_opacity, 1.0);
}

#[test]
fn zero_fade_goes_straight_to_running() {
    let mut b = BootSequencer::new(0.0, 0.0);
    assert_eq!(b.advance(0.0), Some(BootPhase::Ready));
    assert!(b.activate());
    assert!(b.is_running());
}

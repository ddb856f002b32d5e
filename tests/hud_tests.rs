// Host-side tests for the declarative HUD state.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod hud {
        include!("../src/core/hud.rs");
    }
}

use crate::core::constants::*;
use crate::core::hud::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn bar_heights_round_to_pixels() {
    assert_eq!(Bar::from_amplitude(0), Bar { height_px: 0, peak: false });
    assert_eq!(Bar::from_amplitude(255), Bar { height_px: 80, peak: true });
    // 128 / 255 * 80 = 40.16
    assert_eq!(Bar::from_amplitude(128).height_px, 40);
}

#[test]
fn peak_flag_uses_unrounded_height() {
    // 223 -> 69.96px, 224 -> 70.27px; both show as 70px
    let below = Bar::from_amplitude(223);
    let above = Bar::from_amplitude(224);
    assert_eq!(below.height_px, 70);
    assert_eq!(above.height_px, 70);
    assert!(!below.peak);
    assert!(above.peak);
}

#[test]
fn spectrum_maps_first_bins_only() {
    let mut spectrum = [0u8; SPECTRUM_BINS];
    spectrum[0] = 255;
    spectrum[VU_BAR_COUNT] = 255;
    let s = HudState::default().with_spectrum(&spectrum);
    assert_eq!(s.bars[0].height_px, 80);
    assert!(s.bars[1..].iter().all(|b| b.height_px == 0));
}

#[test]
fn short_spectrum_reads_as_silence() {
    let s = HudState::default().with_spectrum(&[255, 255]);
    assert!(s.bars[1].peak);
    assert_eq!(s.bars[2], Bar::default());
}

#[test]
fn diff_of_identical_state_is_empty() {
    let s = HudState::default().with_spectrum(&[40; SPECTRUM_BINS]).with_name(MEMBERS[0]);
    assert!(s.diff(&s.clone()).is_empty());
}

#[test]
fn diff_reports_only_changed_bars() {
    let shown = HudState::default().with_spectrum(&[10; SPECTRUM_BINS]);
    let mut spectrum = [10u8; SPECTRUM_BINS];
    spectrum[3] = 200;
    let next = shown.with_spectrum(&spectrum);
    let changes = next.diff(&shown);
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0],
        HudChange::Bar {
            index: 3,
            bar: Bar::from_amplitude(200)
        }
    );
}

#[test]
fn diff_reports_new_name() {
    let shown = HudState::default();
    let next = shown.with_name("LUDOVIC");
    assert_eq!(next.diff(&shown).as_slice(), &[HudChange::Name("LUDOVIC")]);
    assert!(next.with_name("LUDOVIC").diff(&next).is_empty());
}

#[test]
fn spectrum_update_keeps_the_name() {
    let s = HudState::default().with_name("ROSS COHEN").with_spectrum(&[0; SPECTRUM_BINS]);
    assert_eq!(s.name, Some("ROSS COHEN"));
}

#[test]
fn rotator_picks_from_the_list() {
    let mut r = NameRotator::new(&MEMBERS, StdRng::seed_from_u64(7));
    for _ in 0..50 {
        let name = r.next_name().expect("name");
        assert!(MEMBERS.contains(&name));
    }
}

#[test]
fn rotator_eventually_covers_every_name() {
    let mut r = NameRotator::new(&MEMBERS, StdRng::seed_from_u64(1));
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.extend(r.next_name());
    }
    assert_eq!(seen.len(), MEMBERS.len());
}

#[test]
fn rotator_is_roughly_uniform() {
    let mut r = NameRotator::new(&MEMBERS, StdRng::seed_from_u64(99));
    let draws = 9_000;
    let mut counts = std::collections::HashMap::new();
    for _ in 0..draws {
        if let Some(name) = r.next_name() {
            *counts.entry(name).or_insert(0usize) += 1;
        }
    }
    let expected = draws as f64 / MEMBERS.len() as f64;
    for name in MEMBERS {
        let n = counts.get(name).copied().unwrap_or(0) as f64;
        assert!((n - expected).abs() / expected < 0.15, "{} drawn {} times", name, n);
    }
}

#[test]
fn empty_rotator_yields_nothing() {
    static NONE: [&str; 0] = [];
    let mut r = NameRotator::new(&NONE, StdRng::seed_from_u64(0));
    assert_eq!(r.next_name(), None);
}

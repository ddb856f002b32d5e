// Host-side tests for variant selection, presets, key bindings and constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod controls {
        include!("../src/core/controls.rs");
    }
}

use crate::core::config::*;
use crate::core::constants::*;
use crate::core::controls::*;

#[test]
fn variant_parses_loosely() {
    assert_eq!("synth".parse::<Variant>(), Ok(Variant::Synth));
    assert_eq!(" Synthesized ".parse::<Variant>(), Ok(Variant::Synth));
    assert_eq!("SAMPLED".parse::<Variant>(), Ok(Variant::Sampled));
    assert_eq!("samples".parse::<Variant>(), Ok(Variant::Sampled));
}

#[test]
fn unknown_variant_reports_value() {
    let err = "granular".parse::<Variant>().unwrap_err();
    assert_eq!(err, UnknownVariant("granular".into()));
    assert!(err.to_string().contains("granular"));
}

#[test]
fn missing_query_uses_sampled_defaults() {
    let (cfg, err) = DemoConfig::from_query(None);
    assert!(err.is_none());
    assert_eq!(cfg, DemoConfig::default());
    assert!(cfg.uses_samples());
    assert_eq!(cfg.path_points, PATH_POINTS);
    assert_eq!(cfg.samples.kick, KICK_URL);
}

#[test]
fn bad_query_falls_back_with_error() {
    let (cfg, err) = DemoConfig::from_query(Some("nope"));
    assert_eq!(cfg.variant, Variant::Sampled);
    assert_eq!(err, Some(UnknownVariant("nope".into())));
}

#[test]
fn synth_preset_overrides_scene() {
    let (cfg, err) = DemoConfig::from_query(Some("synth"));
    assert!(err.is_none());
    assert_eq!(cfg.variant, Variant::Synth);
    assert!(!cfg.uses_samples());
    assert_eq!(cfg.path_points, 80);
    assert!(cfg.bloom_strength > BLOOM_STRENGTH);
    // shared tunables stay put
    assert_eq!(cfg.scratch_interval_ms, SCRATCH_INTERVAL_MS);
    assert_eq!(cfg.shake_decay, SHAKE_DECAY);
}

#[test]
fn beat_interval_from_bpm() {
    let mut cfg = DemoConfig::for_variant(Variant::Synth);
    assert!((cfg.beat_interval_ms() - 60_000.0 / 124.0).abs() < 1e-9);
    cfg.bpm = 0.0;
    assert!(cfg.beat_interval_ms().is_finite());
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(action_for_key(" "), Some(KeyAction::TogglePause));
    assert_eq!(action_for_key("h"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("H"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("ArrowUp"), Some(KeyAction::VolumeUp));
    assert_eq!(action_for_key("ArrowDown"), Some(KeyAction::VolumeDown));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::ExitFullscreen));
    assert_eq!(action_for_key("x"), None);
    assert_eq!(action_for_key(""), None);
}

#[test]
fn volume_steps_clamp() {
    assert!((stepped_volume(0.5, MASTER_VOLUME_STEP) - 0.55).abs() < 1e-6);
    assert_eq!(stepped_volume(0.98, MASTER_VOLUME_STEP), 1.0);
    assert_eq!(stepped_volume(0.02, -MASTER_VOLUME_STEP), 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_consistent() {
    assert_eq!(SPECTRUM_BINS, 32);
    assert!(VU_BAR_COUNT <= SPECTRUM_BINS);
    assert!(VU_PEAK_HEIGHT_PX < VU_MAX_HEIGHT_PX);
    assert!(LOOKAHEAD_OFFSET > 0.0 && LOOKAHEAD_OFFSET < 0.1);
    assert!(SHAKE_DECAY > 0.0 && SHAKE_DECAY < 1.0);
    assert!(EMISSIVE_REST < EMISSIVE_PEAK);
    assert!(SCRATCH_THRESHOLD > 0.0 && SCRATCH_THRESHOLD < 1.0);
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(TUBE_RADIUS < PATH_Z_STEP);
}

#[test]
fn member_names_are_uppercase_and_unique() {
    let mut seen = std::collections::HashSet::new();
    for name in MEMBERS {
        assert!(!name.is_empty());
        assert_eq!(name, name.to_uppercase());
        assert!(seen.insert(name));
    }
}

#[test]
fn sample_urls_are_https_mp3() {
    for url in [KICK_URL, SCRATCH_URL, SHIMMER_URL] {
        assert!(url.starts_with("https://"));
        assert!(url.ends_with(".mp3"));
    }
}

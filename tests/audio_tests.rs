// Host-side tests for the sound bank, loop layering and synthesized patches.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod mixer {
        include!("../src/core/mixer.rs");
    }
    pub mod synth {
        include!("../src/core/synth.rs");
    }
}

use crate::core::mixer::*;
use crate::core::synth::*;

#[test]
fn bank_tracks_missing_samples() {
    let mut bank: SoundBank<&str> = SoundBank::default();
    assert!(bank.is_empty());
    assert_eq!(bank.missing().count(), 3);

    bank.insert(SoundId::Kick, "kick.mp3");
    bank.insert(SoundId::Shimmer, "shimmer.mp3");
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.get(SoundId::Kick), Some(&"kick.mp3"));
    assert_eq!(bank.get(SoundId::Scratch), None);
    assert_eq!(bank.missing().collect::<Vec<_>>(), vec![SoundId::Scratch]);
}

#[test]
fn pad_is_not_a_sampled_slot() {
    assert!(!SoundId::SAMPLED.contains(&SoundId::Pad));
    let labels: Vec<_> = SoundId::SAMPLED.iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["kick", "scratch", "shimmer"]);
}

#[test]
fn same_sound_can_layer_repeatedly() {
    let mut loops: LoopLayers<u32> = LoopLayers::default();
    let a = loops.add(SoundId::Kick, 1);
    let b = loops.add(SoundId::Kick, 2);
    loops.add(SoundId::Shimmer, 3);
    assert_ne!(a, b);
    assert_eq!(loops.len(), 3);
    assert_eq!(loops.count_of(SoundId::Kick), 2);

    assert_eq!(loops.remove(a), Some(1));
    assert_eq!(loops.remove(a), None);
    assert_eq!(loops.count_of(SoundId::Kick), 1);
}

#[test]
fn drain_hands_back_every_source() {
    let mut loops: LoopLayers<u32> = LoopLayers::default();
    loops.add(SoundId::Kick, 10);
    loops.add(SoundId::Pad, 20);
    let mut stopped: Vec<u32> = loops.drain().collect();
    stopped.sort();
    assert_eq!(stopped, vec![10, 20]);
    assert!(loops.is_empty());
}

#[test]
fn kick_sweeps_down() {
    let k = kick_patch();
    assert_eq!(k.kind, PatchKind::Sine);
    assert!(k.freq_start > k.freq_end);
    assert!(k.decay_sec > k.attack_sec);
}

#[test]
fn scratch_pitch_shortens_and_raises() {
    let low = scratch_patch(0.8);
    let high = scratch_patch(2.3);
    assert_eq!(low.kind, PatchKind::BandNoise);
    assert!(high.freq_start > low.freq_start);
    assert!(high.decay_sec < low.decay_sec);
    // silly pitches stay usable
    let zero = scratch_patch(0.0);
    assert!(zero.freq_start > 0.0 && zero.decay_sec > 0.0);
}

#[test]
fn volume_scales_peak_above_floor() {
    let s = with_volume(shimmer_patch(1.5), 0.1);
    assert!((s.peak - 0.1).abs() < 1e-6);
    assert_eq!(s.kind, PatchKind::Triangle);
    assert!(with_volume(kick_patch(), 0.0).peak > ENVELOPE_FLOOR);
}

#[test]
fn pad_fills_the_loop_within_range() {
    let pad = render_pad(8000.0, 4.0);
    assert_eq!(pad.len(), 32_000);
    assert!(pad.iter().all(|s| (-1.0..=1.0).contains(s)));
    let energy: f32 = pad.iter().map(|s| s * s).sum::<f32>() / pad.len() as f32;
    assert!(energy > 1e-3, "pad is silent");
}

#[test]
fn pad_loops_without_a_click() {
    let pad = render_pad(8000.0, 4.0);
    let max_step = pad
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0f32, f32::max);
    let seam = (pad[0] - pad[pad.len() - 1]).abs();
    assert!(seam <= max_step * 1.25, "seam {} vs max step {}", seam, max_step);
}

#[test]
fn noise_is_seeded() {
    let a = render_noise(8000.0, 0.25, 42);
    let b = render_noise(8000.0, 0.25, 42);
    let c = render_noise(8000.0, 0.25, 43);
    assert_eq!(a.len(), 2000);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|s| (-1.0..=1.0).contains(s)));
}

use rand::{Rng, SeedableRng};

/// Envelope and pitch description of a synthesized hit.
///
/// The web audio side turns this into an oscillator (or noise source) with
/// exponential attack/decay ramps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneShotPatch {
    pub kind: PatchKind,
    /// Start frequency in Hz (band centre for noise).
    pub freq_start: f32,
    /// Frequency reached at the end of the sweep.
    pub freq_end: f32,
    pub attack_sec: f64,
    pub decay_sec: f64,
    pub peak: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchKind {
    Sine,
    Triangle,
    BandNoise,
}

// Exponential ramps cannot reach zero.
pub const ENVELOPE_FLOOR: f32 = 1e-4;

pub fn kick_patch() -> OneShotPatch {
    OneShotPatch {
        kind: PatchKind::Sine,
        freq_start: 150.0,
        freq_end: 40.0,
        attack_sec: 0.005,
        decay_sec: 0.45,
        peak: 1.0,
    }
}

/// Scratch burst; `pitch` scales the band centre and shortens the burst.
pub fn scratch_patch(pitch: f32) -> OneShotPatch {
    let pitch = pitch.max(0.1);
    OneShotPatch {
        kind: PatchKind::BandNoise,
        freq_start: 1200.0 * pitch,
        freq_end: 400.0 * pitch,
        attack_sec: 0.01,
        decay_sec: (0.25 / pitch as f64).clamp(0.05, 0.6),
        peak: 1.0,
    }
}

pub fn shimmer_patch(pitch: f32) -> OneShotPatch {
    OneShotPatch {
        kind: PatchKind::Triangle,
        freq_start: 880.0 * pitch.max(0.1),
        freq_end: 880.0 * pitch.max(0.1),
        attack_sec: 0.08,
        decay_sec: 1.2,
        peak: 1.0,
    }
}

/// Scale a patch's peak by a volume, keeping it above the ramp floor.
pub fn with_volume(patch: OneShotPatch, volume: f32) -> OneShotPatch {
    OneShotPatch {
        peak: (patch.peak * volume).max(ENVELOPE_FLOOR * 2.0),
        ..patch
    }
}

// A major pad voicing (A2, E3, A3, C#4, E4).
const PAD_FREQS: [f32; 5] = [110.0, 164.81, 220.0, 277.18, 329.63];

/// Render a seamless pad loop of `seconds` at `sample_rate`.
///
/// Every partial is snapped to a whole number of cycles over the loop so the
/// last sample flows into the first. Output peaks stay within `[-1, 1]`.
pub fn render_pad(sample_rate: f32, seconds: f32) -> Vec<f32> {
    let sr = sample_rate as f64;
    let len = (sr * seconds as f64).round().max(1.0) as usize;
    let loop_sec = len as f64 / sr;
    let tau = std::f64::consts::TAU;
    let freqs: Vec<f64> = PAD_FREQS
        .iter()
        .map(|&f| (f as f64 * loop_sec).round().max(1.0) / loop_sec)
        .collect();
    // slow tremolo, also whole-cycle over the loop
    let lfo = (0.5 * loop_sec).round().max(1.0) / loop_sec;
    let norm = 1.0 / freqs.len() as f64;

    (0..len)
        .map(|n| {
            let t = n as f64 / sr;
            let chord: f64 = freqs
                .iter()
                .enumerate()
                .map(|(k, f)| (tau * f * t).sin() / (k as f64 + 1.0).sqrt())
                .sum();
            let trem = 0.75 + 0.25 * (tau * lfo * t).sin();
            (chord * norm * trem).clamp(-1.0, 1.0) as f32
        })
        .collect()
}

/// White noise for the scratch burst source, deterministic for a given seed.
pub fn render_noise(sample_rate: f32, seconds: f32, seed: u64) -> Vec<f32> {
    let len = (sample_rate * seconds).round().max(1.0) as usize;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0f32..=1.0)).collect()
}

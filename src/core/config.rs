use crate::core::constants::*;
use std::str::FromStr;

/// Which sound source the demo runs on.
///
/// - `Sampled` fetches kick/scratch/shimmer recordings from the CDN
/// - `Synth` renders the pad procedurally and synthesizes every hit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Sampled,
    Synth,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown variant `{0}` (expected `sampled` or `synth`)")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sampled" | "sample" | "samples" => Ok(Variant::Sampled),
            "synth" | "synthesized" => Ok(Variant::Synth),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// URLs of the three recordings used by the sampled variant.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleUrls {
    pub kick: String,
    pub scratch: String,
    pub shimmer: String,
}

impl Default for SampleUrls {
    fn default() -> Self {
        Self {
            kick: KICK_URL.to_string(),
            scratch: SCRATCH_URL.to_string(),
            shimmer: SHIMMER_URL.to_string(),
        }
    }
}

/// Every tunable of the demo in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub variant: Variant,
    pub path_points: usize,
    pub progress_base_step: f32,
    pub progress_bass_gain: f32,
    pub lookahead: f32,
    pub shake_kick: f32,
    pub shake_decay: f32,
    pub boot_delay_ms: f64,
    pub boot_fade_ms: f64,
    pub scratch_interval_ms: f64,
    pub name_interval_ms: f64,
    pub kick_volume: f32,
    pub pad_volume: f32,
    pub bpm: f32,
    pub bloom_strength: f32,
    pub bloom_threshold: f32,
    pub samples: SampleUrls,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Sampled,
            path_points: PATH_POINTS,
            progress_base_step: PROGRESS_BASE_STEP,
            progress_bass_gain: PROGRESS_BASS_GAIN,
            lookahead: LOOKAHEAD_OFFSET,
            shake_kick: SHAKE_KICK,
            shake_decay: SHAKE_DECAY,
            boot_delay_ms: BOOT_DELAY_MS,
            boot_fade_ms: BOOT_FADE_MS,
            scratch_interval_ms: SCRATCH_INTERVAL_MS,
            name_interval_ms: NAME_INTERVAL_MS,
            kick_volume: KICK_LOOP_VOLUME,
            pad_volume: PAD_LOOP_VOLUME,
            bpm: SYNTH_BPM,
            bloom_strength: BLOOM_STRENGTH,
            bloom_threshold: BLOOM_THRESHOLD,
            samples: SampleUrls::default(),
        }
    }
}

impl DemoConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Sampled => Self::default(),
            Variant::Synth => Self {
                variant,
                path_points: 80,
                bloom_strength: 1.1,
                ..Self::default()
            },
        }
    }

    /// Resolve the config from the raw `variant` query value, if any.
    /// Unknown values fall back to the default preset; the error is returned
    /// alongside so the caller can log it.
    pub fn from_query(value: Option<&str>) -> (Self, Option<UnknownVariant>) {
        match value.map(Variant::from_str) {
            None => (Self::default(), None),
            Some(Ok(v)) => (Self::for_variant(v), None),
            Some(Err(e)) => (Self::default(), Some(e)),
        }
    }

    /// Milliseconds between synthesized kicks.
    pub fn beat_interval_ms(&self) -> f64 {
        60_000.0 / self.bpm.max(1.0) as f64
    }

    pub fn uses_samples(&self) -> bool {
        self.variant == Variant::Sampled
    }
}

use crate::core::constants::*;
use crate::core::curve::TunnelCurve;
use glam::{Quat, Vec3};

/// Advance a normalized progress value, wrapping back to 0 once it reaches 1.
///
/// Negative and non-finite steps are ignored so the result always stays in `[0,1)`.
#[inline]
pub fn advance_progress(progress: f32, step: f32) -> f32 {
    let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
    let next = progress + step;
    if !(0.0..1.0).contains(&next) {
        0.0
    } else {
        next
    }
}

/// Progress step for one frame given the current bass bin (0..255).
#[inline]
pub fn progress_step(base_step: f32, bass_gain: f32, bass_bin: u8) -> f32 {
    base_step + bass_bin as f32 * bass_gain
}

/// Light intensity driven by the lowest frequency bin.
#[inline]
pub fn light_intensity(sub_bin: u8) -> f32 {
    LIGHT_BASE_INTENSITY + sub_bin as f32 * LIGHT_BASS_GAIN
}

/// Camera perturbation for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShakeOffset {
    pub offset: Vec3,
    pub roll: f32,
}

/// Geometrically decaying camera shake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shake {
    intensity: f32,
    decay: f32,
}

impl Shake {
    pub fn new(decay: f32) -> Self {
        Self {
            intensity: 0.0,
            decay: decay.clamp(0.0, 0.999),
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn kick(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    /// Offset for this frame, then decay. `time_ms` drives the oscillation phase.
    pub fn step(&mut self, time_ms: f64) -> ShakeOffset {
        if self.intensity <= 0.0 {
            return ShakeOffset::default();
        }
        let phase = time_ms * SHAKE_PHASE_RATE;
        let (s, c) = (phase.sin() as f32, phase.cos() as f32);
        let i = self.intensity;
        self.intensity *= self.decay;
        ShakeOffset {
            offset: Vec3::new(s * i, c * i, 0.0),
            roll: s * i * SHAKE_ROLL_PER_UNIT,
        }
    }
}

/// Yoyo tween of the tube's emissive intensity: rest → peak → rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissivePulse {
    elapsed: Option<f32>,
}

impl Default for EmissivePulse {
    fn default() -> Self {
        Self { elapsed: None }
    }
}

impl EmissivePulse {
    pub fn trigger(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn advance(&mut self, dt_sec: f32) {
        if let Some(t) = self.elapsed.as_mut() {
            *t += dt_sec.max(0.0);
            if *t >= 2.0 * EMISSIVE_HALF_PERIOD_SEC {
                self.elapsed = None;
            }
        }
    }

    pub fn value(&self) -> f32 {
        let Some(t) = self.elapsed else {
            return EMISSIVE_REST;
        };
        let half = EMISSIVE_HALF_PERIOD_SEC;
        let x = if t < half { t / half } else { (2.0 * half - t) / half };
        let x = x.clamp(0.0, 1.0);
        // power1.out on the way up, mirrored on the way down
        let eased = 1.0 - (1.0 - x) * (1.0 - x);
        EMISSIVE_REST + (EMISSIVE_PEAK - EMISSIVE_REST) * eased
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightFrame {
    pub camera: CameraPose,
    pub light_position: Vec3,
    pub light_intensity: f32,
    pub emissive: f32,
}

/// Camera flight state: progress along the curve plus shake and pulse effects.
#[derive(Clone, Debug)]
pub struct FlightState {
    pub progress: f32,
    pub shake: Shake,
    pub pulse: EmissivePulse,
    base_step: f32,
    bass_gain: f32,
    lookahead: f32,
}

impl FlightState {
    pub fn new(base_step: f32, bass_gain: f32, lookahead: f32, shake_decay: f32) -> Self {
        Self {
            progress: 0.0,
            shake: Shake::new(shake_decay),
            pulse: EmissivePulse::default(),
            base_step,
            bass_gain,
            lookahead,
        }
    }

    /// Scratch hit: kick the shake and flash the tube.
    pub fn scratch(&mut self, intensity: f32) {
        self.shake.kick(intensity);
        self.pulse.trigger();
    }

    /// Static pose used before playback starts.
    pub fn idle_frame(&self, curve: &TunnelCurve) -> FlightFrame {
        let eye = curve.point_at(self.progress);
        FlightFrame {
            camera: self.look(curve, eye),
            light_position: eye,
            light_intensity: LIGHT_IDLE_INTENSITY,
            emissive: self.pulse.value(),
        }
    }

    /// One playing frame. `spectrum` is the analyser byte snapshot.
    pub fn step(&mut self, curve: &TunnelCurve, spectrum: &[u8], time_ms: f64, dt_sec: f32) -> FlightFrame {
        let sub = spectrum.first().copied().unwrap_or(0);
        let bass = spectrum.get(1).copied().unwrap_or(0);

        self.progress = advance_progress(self.progress, progress_step(self.base_step, self.bass_gain, bass));
        let on_curve = curve.point_at(self.progress);
        let mut camera = self.look(curve, on_curve);

        let shake = self.shake.step(time_ms);
        if shake != ShakeOffset::default() {
            camera.eye += shake.offset;
            let forward = (camera.target - camera.eye).normalize_or_zero();
            if forward != Vec3::ZERO {
                camera.up = Quat::from_axis_angle(forward, shake.roll) * camera.up;
            }
        }

        self.pulse.advance(dt_sec);
        FlightFrame {
            camera,
            light_position: on_curve,
            light_intensity: light_intensity(sub),
            emissive: self.pulse.value(),
        }
    }

    fn look(&self, curve: &TunnelCurve, eye: Vec3) -> CameraPose {
        let ahead = (self.progress + self.lookahead).rem_euclid(1.0);
        let mut target = curve.point_at(ahead);
        // At the wrap point the look-ahead jumps back to the start; keep facing forward.
        if (target - eye).length_squared() < 1e-6 || ahead < self.progress {
            target = eye + curve.tangent_at(self.progress);
        }
        CameraPose {
            eye,
            target,
            up: Vec3::Y,
        }
    }
}

// Host-side tests for the camera flight: progress, shake, pulse and light.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod curve {
        include!("../src/core/curve.rs");
    }
    pub mod flight {
        include!("../src/core/flight.rs");
    }
}
mod camera {
    include!("../src/camera.rs");
}

use crate::core::constants::*;
use crate::core::curve::*;
use crate::core::flight::*;
use glam::{Vec3, Vec4};

fn curve() -> TunnelCurve {
    let points = tunnel_control_points(
        PATH_POINTS,
        PATH_SWAY_X_FREQ,
        PATH_SWAY_Y_FREQ,
        PATH_SWAY_AMPLITUDE,
        PATH_Z_STEP,
    );
    TunnelCurve::new(points, ARC_LENGTH_DIVISIONS).expect("curve")
}

fn flight() -> FlightState {
    FlightState::new(PROGRESS_BASE_STEP, PROGRESS_BASS_GAIN, LOOKAHEAD_OFFSET, SHAKE_DECAY)
}

#[test]
fn progress_advances_and_wraps_to_zero() {
    assert_eq!(advance_progress(0.25, 0.25), 0.5);
    assert_eq!(advance_progress(0.99995, 0.0001), 0.0);
    assert_eq!(advance_progress(0.5, 0.5), 0.0);
}

#[test]
fn progress_ignores_bad_steps() {
    assert_eq!(advance_progress(0.3, -0.1), 0.3);
    assert_eq!(advance_progress(0.3, f32::NAN), 0.3);
    assert_eq!(advance_progress(0.3, f32::INFINITY), 0.3);
}

#[test]
fn progress_stays_in_unit_range() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let mut p = 0.0f32;
    for _ in 0..10_000 {
        p = advance_progress(p, rng.gen_range(-0.05f32..0.3));
        assert!((0.0..1.0).contains(&p), "progress escaped: {}", p);
    }
}

#[test]
fn progress_step_scales_with_bass() {
    assert_eq!(progress_step(PROGRESS_BASE_STEP, PROGRESS_BASS_GAIN, 0), PROGRESS_BASE_STEP);
    let loud = progress_step(PROGRESS_BASE_STEP, PROGRESS_BASS_GAIN, 255);
    assert!((loud - (0.000_03 + 255.0 * 0.000_000_8)).abs() < 1e-9);
}

#[test]
fn light_tracks_sub_bin() {
    assert_eq!(light_intensity(0), 100.0);
    assert_eq!(light_intensity(255), 610.0);
}

#[test]
fn shake_oscillates_then_decays() {
    let mut s = Shake::new(SHAKE_DECAY);
    assert_eq!(s.step(123.0), ShakeOffset::default());

    s.kick(SHAKE_KICK);
    let first = s.step(0.0);
    // sin(0) = 0, cos(0) = 1
    assert!(first.offset.x.abs() < 1e-6);
    assert!((first.offset.y - SHAKE_KICK).abs() < 1e-6);
    assert_eq!(first.offset.z, 0.0);
    assert!(first.roll.abs() < 1e-6);
    assert!((s.intensity() - SHAKE_KICK * SHAKE_DECAY).abs() < 1e-6);

    for _ in 0..60 {
        s.step(1000.0);
    }
    assert!(s.intensity() < 0.001);
}

#[test]
fn shake_decays_geometrically() {
    let mut s = Shake::new(SHAKE_DECAY);
    s.kick(SHAKE_KICK);
    for k in 1..=20 {
        s.step(k as f64 * 16.0);
        let expected = SHAKE_KICK * SHAKE_DECAY.powi(k);
        assert!((s.intensity() - expected).abs() < 1e-5, "frame {}", k);
        assert!(s.intensity() >= 0.0);
    }
}

#[test]
fn shake_roll_follows_sine_component() {
    let mut s = Shake::new(SHAKE_DECAY);
    s.kick(2.0);
    // 0.5 rad/ms * pi ms = pi/2
    let o = s.step(std::f64::consts::PI);
    assert!((o.offset.x - 2.0).abs() < 1e-4);
    assert!((o.roll - 2.0 * SHAKE_ROLL_PER_UNIT).abs() < 1e-5);
}

#[test]
fn emissive_pulse_yoyos_back_to_rest() {
    let mut p = EmissivePulse::default();
    assert_eq!(p.value(), EMISSIVE_REST);
    p.trigger();
    assert!(p.is_active());
    assert!((p.value() - EMISSIVE_REST).abs() < 1e-6);

    p.advance(EMISSIVE_HALF_PERIOD_SEC / 2.0);
    let mid = p.value();
    assert!(mid > EMISSIVE_REST && mid < EMISSIVE_PEAK);

    p.advance(EMISSIVE_HALF_PERIOD_SEC / 2.0);
    assert!((p.value() - EMISSIVE_PEAK).abs() < 1e-3);

    p.advance(EMISSIVE_HALF_PERIOD_SEC);
    assert!(!p.is_active());
    assert_eq!(p.value(), EMISSIVE_REST);
}

#[test]
fn idle_frame_holds_start_pose() {
    let c = curve();
    let f = flight();
    let frame = f.idle_frame(&c);
    assert_eq!(frame.camera.eye, c.point_at(0.0));
    assert_eq!(frame.light_intensity, LIGHT_IDLE_INTENSITY);
    assert!(frame.camera.target.z > frame.camera.eye.z);
}

#[test]
fn silent_step_moves_at_base_speed() {
    let c = curve();
    let mut f = flight();
    let frame = f.step(&c, &[0u8; SPECTRUM_BINS], 0.0, 1.0 / 60.0);
    assert!((f.progress - PROGRESS_BASE_STEP).abs() < 1e-9);
    assert_eq!(frame.camera.eye, c.point_at(f.progress));
    assert_eq!(frame.light_position, frame.camera.eye);
    assert_eq!(frame.light_intensity, LIGHT_BASE_INTENSITY);
    assert_eq!(frame.camera.up, Vec3::Y);
}

#[test]
fn loud_bass_flies_faster() {
    let c = curve();
    let mut quiet = flight();
    let mut loud = flight();
    let mut spectrum = [0u8; SPECTRUM_BINS];
    quiet.step(&c, &spectrum, 0.0, 0.016);
    spectrum[1] = 255;
    loud.step(&c, &spectrum, 0.0, 0.016);
    assert!(loud.progress > quiet.progress);
}

#[test]
fn scratch_shakes_camera_and_flashes_tube() {
    let c = curve();
    let mut f = flight();
    f.scratch(SHAKE_KICK);
    let frame = f.step(&c, &[0u8; SPECTRUM_BINS], 0.0, 0.016);
    let on_curve = c.point_at(f.progress);
    assert!((frame.camera.eye.y - on_curve.y - SHAKE_KICK).abs() < 1e-3);
    assert!(frame.emissive > EMISSIVE_REST);
    // light stays on the curve, not on the shaken camera
    assert_eq!(frame.light_position, on_curve);
}

#[test]
fn look_ahead_keeps_facing_forward_at_wrap() {
    let c = curve();
    let mut f = flight();
    f.progress = 0.998;
    let frame = f.idle_frame(&c);
    let forward = frame.camera.target - frame.camera.eye;
    assert!(forward.z > 0.0, "camera looked backwards: {:?}", forward);
}

#[test]
fn view_projection_puts_target_in_front() {
    let c = curve();
    let frame = flight().idle_frame(&c);
    let vp = camera::view_projection(&frame.camera, 16.0 / 9.0);
    let clip = vp * Vec4::from((frame.camera.target, 1.0));
    assert!(clip.w > 0.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn view_projection_survives_zero_aspect() {
    let c = curve();
    let frame = flight().idle_frame(&c);
    let m = camera::view_projection(&frame.camera, 0.0);
    assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
}

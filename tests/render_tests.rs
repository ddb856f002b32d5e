// Host-side tests for how the frame loop handles surface errors.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

mod recovery {
    include!("../src/render/recovery.rs");
}

use recovery::*;

#[test]
fn lost_or_stale_surface_is_reconfigured() {
    assert_eq!(surface_recovery(&wgpu::SurfaceError::Lost), SurfaceRecovery::Reconfigure);
    assert_eq!(surface_recovery(&wgpu::SurfaceError::Outdated), SurfaceRecovery::Reconfigure);
}

#[test]
fn timeout_only_skips_the_frame() {
    assert_eq!(surface_recovery(&wgpu::SurfaceError::Timeout), SurfaceRecovery::SkipFrame);
}

#[test]
fn out_of_memory_stops_rendering() {
    assert_eq!(surface_recovery(&wgpu::SurfaceError::OutOfMemory), SurfaceRecovery::GiveUp);
}

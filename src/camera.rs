use crate::core::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR};
use crate::core::flight::CameraPose;
use glam::Mat4;

/// Combined projection * view for a flight camera pose.
///
/// - `pose`: eye/target/up from the flight state
/// - `aspect`: backing-store width / height of the canvas
///
/// Uses a right-handed view and a 0..1 depth range as wgpu expects.
#[inline]
pub fn view_projection(pose: &CameraPose, aspect: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let proj = Mat4::perspective_rh(
        CAMERA_FOV_Y_DEG.to_radians(),
        aspect,
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    let view = Mat4::look_at_rh(pose.eye, pose.target, pose.up);
    proj * view
}

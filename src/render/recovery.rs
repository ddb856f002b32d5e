/// How the frame loop reacts to a failed `get_current_texture`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRecovery {
    /// Configure the surface again and draw on the next frame.
    Reconfigure,
    SkipFrame,
    /// Stop rendering; the rest of the demo keeps running.
    GiveUp,
}

pub fn surface_recovery(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceRecovery::GiveUp,
        _ => SurfaceRecovery::SkipFrame,
    }
}

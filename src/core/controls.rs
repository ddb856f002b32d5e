/// What a key press asks the demo to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    ToggleHud,
    VolumeUp,
    VolumeDown,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::TogglePause),
        "h" | "H" => Some(KeyAction::ToggleHud),
        "ArrowUp" => Some(KeyAction::VolumeUp),
        "ArrowDown" => Some(KeyAction::VolumeDown),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

/// Step a 0..1 volume by `delta`, clamped.
#[inline]
pub fn stepped_volume(current: f32, delta: f32) -> f32 {
    (current + delta).clamp(0.0, 1.0)
}

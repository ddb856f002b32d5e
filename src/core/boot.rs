/// Boot overlay lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootPhase {
    Loading,
    Ready,
    Fading,
    Running,
}

/// What the DOM should show for the boot overlay this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BootView {
    pub loader_fraction: f32,
    pub button_ready: bool,
    pub overlay_opacity: f32,
    pub overlay_visible: bool,
    pub hud_visible: bool,
}

#[derive(Clone, Debug)]
pub struct BootSequencer {
    phase: BootPhase,
    elapsed_ms: f64,
    fade_elapsed_ms: f64,
    delay_ms: f64,
    fade_ms: f64,
}

impl BootSequencer {
    pub fn new(delay_ms: f64, fade_ms: f64) -> Self {
        Self {
            phase: BootPhase::Loading,
            elapsed_ms: 0.0,
            fade_elapsed_ms: 0.0,
            delay_ms: delay_ms.max(0.0),
            fade_ms: fade_ms.max(0.0),
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == BootPhase::Ready
    }

    pub fn is_running(&self) -> bool {
        self.phase == BootPhase::Running
    }

    /// Advance wall-clock time. Returns the new phase when it changed.
    pub fn advance(&mut self, dt_ms: f64) -> Option<BootPhase> {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        match self.phase {
            BootPhase::Loading => {
                self.elapsed_ms += dt_ms;
                if self.elapsed_ms >= self.delay_ms {
                    self.phase = BootPhase::Ready;
                    return Some(self.phase);
                }
            }
            BootPhase::Fading => {
                self.fade_elapsed_ms += dt_ms;
                if self.fade_elapsed_ms >= self.fade_ms {
                    self.phase = BootPhase::Running;
                    return Some(self.phase);
                }
            }
            BootPhase::Ready | BootPhase::Running => {}
        }
        None
    }

    /// Accept the start click. Only succeeds once, and only when ready.
    pub fn activate(&mut self) -> bool {
        if self.phase != BootPhase::Ready {
            return false;
        }
        self.phase = if self.fade_ms > 0.0 {
            BootPhase::Fading
        } else {
            BootPhase::Running
        };
        true
    }

    pub fn view(&self) -> BootView {
        let loader_fraction = if self.delay_ms > 0.0 {
            (self.elapsed_ms / self.delay_ms).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        let overlay_opacity = match self.phase {
            BootPhase::Loading | BootPhase::Ready => 1.0,
            BootPhase::Fading => (1.0 - self.fade_elapsed_ms / self.fade_ms.max(1e-9)).clamp(0.0, 1.0) as f32,
            BootPhase::Running => 0.0,
        };
        BootView {
            loader_fraction,
            button_ready: self.phase != BootPhase::Loading,
            overlay_opacity,
            overlay_visible: self.phase != BootPhase::Running,
            hud_visible: self.phase == BootPhase::Running,
        }
    }
}

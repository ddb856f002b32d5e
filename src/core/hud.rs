use crate::core::constants::{VU_BAR_COUNT, VU_MAX_HEIGHT_PX, VU_PEAK_HEIGHT_PX};
use rand::Rng;
use smallvec::SmallVec;

/// One VU meter bar: whole-pixel height and peak flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bar {
    pub height_px: u32,
    pub peak: bool,
}

impl Bar {
    /// Map a byte amplitude (0..255) to a bar.
    #[inline]
    pub fn from_amplitude(amplitude: u8) -> Self {
        let h = amplitude as f32 / 255.0 * VU_MAX_HEIGHT_PX;
        Self {
            height_px: h.round() as u32,
            peak: h > VU_PEAK_HEIGHT_PX,
        }
    }
}

/// A single change to apply to the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HudChange {
    Bar { index: usize, bar: Bar },
    Name(&'static str),
}

/// Declarative HUD state, recomputed each frame and diffed against what is on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudState {
    pub bars: [Bar; VU_BAR_COUNT],
    pub name: Option<&'static str>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            bars: [Bar::default(); VU_BAR_COUNT],
            name: None,
        }
    }
}

impl HudState {
    /// Bars from the first `VU_BAR_COUNT` spectrum bins; missing bins read as silence.
    pub fn with_spectrum(&self, spectrum: &[u8]) -> Self {
        let mut next = self.clone();
        for (i, bar) in next.bars.iter_mut().enumerate() {
            *bar = Bar::from_amplitude(spectrum.get(i).copied().unwrap_or(0));
        }
        next
    }

    pub fn with_name(&self, name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..self.clone()
        }
    }

    /// Changes needed to go from `prev` (what is displayed) to `self`.
    pub fn diff(&self, prev: &HudState) -> SmallVec<[HudChange; VU_BAR_COUNT]> {
        let mut changes = SmallVec::new();
        for (index, (now, before)) in self.bars.iter().zip(prev.bars.iter()).enumerate() {
            if now != before {
                changes.push(HudChange::Bar { index, bar: *now });
            }
        }
        if let Some(name) = self.name {
            if prev.name != Some(name) {
                changes.push(HudChange::Name(name));
            }
        }
        changes
    }
}

/// Uniform random pick from a fixed name list.
pub struct NameRotator<R: Rng> {
    names: &'static [&'static str],
    rng: R,
}

impl<R: Rng> NameRotator<R> {
    pub fn new(names: &'static [&'static str], rng: R) -> Self {
        Self { names, rng }
    }

    pub fn next_name(&mut self) -> Option<&'static str> {
        if self.names.is_empty() {
            return None;
        }
        let i = self.rng.gen_range(0..self.names.len());
        Some(self.names[i])
    }
}

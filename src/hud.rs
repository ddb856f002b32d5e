use crate::core::constants::VU_BAR_COUNT;
use crate::core::hud::{HudChange, HudState};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM side of the HUD: meter bars under `#vumeter` and the `#active-member` label.
pub struct HudView {
    bars: Vec<web::HtmlElement>,
    name: Option<web::HtmlElement>,
    shown: HudState,
}

impl HudView {
    /// Creates the meter bars once. Missing containers leave the HUD inert.
    pub fn build(document: &web::Document) -> Self {
        let mut bars = Vec::with_capacity(VU_BAR_COUNT);
        match document.get_element_by_id("vumeter") {
            Some(container) => {
                for _ in 0..VU_BAR_COUNT {
                    let bar = document
                        .create_element("div")
                        .ok()
                        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
                    if let Some(bar) = bar {
                        bar.set_class_name("vu-bar");
                        _ = container.append_child(&bar);
                        bars.push(bar);
                    }
                }
            }
            None => log::warn!("[hud] missing #vumeter"),
        }
        Self {
            bars,
            name: dom::html_element(document, "active-member"),
            shown: HudState::default(),
        }
    }

    /// Apply only what differs from the state currently on screen.
    pub fn apply(&mut self, next: &HudState) {
        for change in next.diff(&self.shown) {
            match change {
                HudChange::Bar { index, bar } => {
                    if let Some(el) = self.bars.get(index) {
                        dom::set_style(el, "height", &format!("{}px", bar.height_px));
                        let cl = el.class_list();
                        _ = if bar.peak {
                            cl.add_1("peak")
                        } else {
                            cl.remove_1("peak")
                        };
                    }
                }
                HudChange::Name(name) => {
                    if let Some(el) = &self.name {
                        el.set_inner_text(name);
                    }
                }
            }
        }
        self.shown = next.clone();
    }
}

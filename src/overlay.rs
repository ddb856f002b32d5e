use crate::core::boot::BootView;
use crate::dom;
use web_sys as web;

const BOOT_SCREEN_ID: &str = "boot-screen";
const LOADER_ID: &str = "loader-progress";
const START_BUTTON_ID: &str = "init-btn";
const HUD_ID: &str = "hud";

/// Boot overlay and HUD container, updated only when the view changes.
pub struct BootOverlay {
    screen: Option<web::HtmlElement>,
    loader: Option<web::HtmlElement>,
    button: Option<web::HtmlElement>,
    hud: Option<web::HtmlElement>,
    applied: Option<BootView>,
    hud_hidden_by_user: bool,
}

impl BootOverlay {
    pub fn new(document: &web::Document) -> Self {
        Self {
            screen: dom::html_element(document, BOOT_SCREEN_ID),
            loader: dom::html_element(document, LOADER_ID),
            button: dom::html_element(document, START_BUTTON_ID),
            hud: dom::html_element(document, HUD_ID),
            applied: None,
            hud_hidden_by_user: false,
        }
    }

    pub fn apply(&mut self, view: BootView) {
        let prev = self.applied;
        if prev == Some(view) {
            return;
        }
        if prev.map(|p| p.loader_fraction) != Some(view.loader_fraction) {
            if let Some(l) = &self.loader {
                dom::set_style(l, "width", &format!("{:.1}%", view.loader_fraction * 100.0));
            }
        }
        if prev.map(|p| p.button_ready) != Some(view.button_ready) {
            if let Some(b) = &self.button {
                if view.button_ready {
                    _ = b.class_list().add_1("ready");
                    dom::set_style(b, "opacity", "1");
                } else {
                    _ = b.class_list().remove_1("ready");
                    dom::set_style(b, "opacity", "0.3");
                }
            }
        }
        if let Some(s) = &self.screen {
            if prev.map(|p| p.overlay_opacity) != Some(view.overlay_opacity) {
                dom::set_style(s, "opacity", &format!("{:.3}", view.overlay_opacity));
            }
            if prev.map(|p| p.overlay_visible) != Some(view.overlay_visible) {
                dom::set_style(s, "display", if view.overlay_visible { "" } else { "none" });
            }
        }
        if prev.map(|p| p.hud_visible) != Some(view.hud_visible) {
            self.apply_hud_opacity(view.hud_visible);
        }
        self.applied = Some(view);
    }

    /// User toggle (H key); only meaningful once the HUD has been revealed.
    pub fn toggle_hud(&mut self) {
        self.hud_hidden_by_user = !self.hud_hidden_by_user;
        let revealed = self.applied.map(|v| v.hud_visible).unwrap_or(false);
        self.apply_hud_opacity(revealed);
    }

    fn apply_hud_opacity(&self, revealed: bool) {
        if let Some(h) = &self.hud {
            let on = revealed && !self.hud_hidden_by_user;
            dom::set_style(h, "opacity", if on { "1" } else { "0" });
        }
    }
}

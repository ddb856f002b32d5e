use crate::core::controls::{action_for_key, KeyAction};
use crate::demo::Demo;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn toggle_fullscreen(canvas: &web::HtmlCanvasElement) {
    if let Some(doc) = crate::dom::window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        } else {
            _ = canvas.request_fullscreen();
        }
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    demo: &Rc<RefCell<Demo>>,
    canvas: &web::HtmlCanvasElement,
) {
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::TogglePause => {
            demo.borrow_mut().toggle_pause();
            ev.prevent_default();
        }
        KeyAction::ToggleHud => demo.borrow_mut().toggle_hud(),
        KeyAction::VolumeUp => {
            demo.borrow().nudge_volume(crate::core::MASTER_VOLUME_STEP);
            ev.prevent_default();
        }
        KeyAction::VolumeDown => {
            demo.borrow().nudge_volume(-crate::core::MASTER_VOLUME_STEP);
            ev.prevent_default();
        }
        KeyAction::ToggleFullscreen => {
            toggle_fullscreen(canvas);
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if let Some(doc) = crate::dom::window_document() {
                doc.exit_fullscreen();
            }
        }
    }
}

pub fn wire_global_keydown(demo: Rc<RefCell<Demo>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &demo, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

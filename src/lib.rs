#![cfg(target_arch = "wasm32")]
use crate::core::DemoConfig;
use crate::demo::Demo;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod core;
mod demo;
mod dom;
mod events;
mod frame;
mod hud;
mod overlay;
mod render;

const CANVAS_ID: &str = "main-canvas";
const START_BUTTON_ID: &str = "init-btn";

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_start_button(document: &web::Document, app: &Rc<RefCell<Demo>>) {
    let app = app.clone();
    dom::add_click_listener(document, START_BUTTON_ID, move || {
        // borrow ends before the audio task can touch the demo
        let started = app.borrow_mut().activate();
        if started {
            demo::start_audio(app.clone());
        }
    });
}

fn wire_page_lifecycle(app: &Rc<RefCell<Demo>>) {
    let Some(window) = web::window() else {
        return;
    };
    let hide_app = app.clone();
    let on_hide = Closure::wrap(Box::new(move |e: web::PageTransitionEvent| {
        hide_app.borrow_mut().page_hidden(e.persisted());
    }) as Box<dyn FnMut(web::PageTransitionEvent)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let show_app = app.clone();
    let on_show = Closure::wrap(Box::new(move |e: web::PageTransitionEvent| {
        if e.persisted() {
            show_app.borrow_mut().page_shown();
        }
    }) as Box<dyn FnMut(web::PageTransitionEvent)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}

fn resolve_config() -> DemoConfig {
    let raw = dom::query_param("variant");
    let (config, err) = DemoConfig::from_query(raw.as_deref());
    if let Some(e) = err {
        log::warn!("[config] {}; using {:?}", e, config.variant);
    }
    config
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("tunnel-deck already started");
        return Ok(());
    }
    log::info!("tunnel-deck starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = resolve_config();
    log::info!("[config] variant {:?}", config.variant);
    let (curve, mesh) =
        demo::build_scene(&config).ok_or_else(|| anyhow::anyhow!("tunnel path has too few points"))?;

    let bloom = render::BloomSettings {
        strength: config.bloom_strength,
        threshold: config.bloom_threshold,
    };
    let app = Rc::new(RefCell::new(Demo::new(config, curve, &document, canvas.clone())));

    wire_start_button(&document, &app);
    events::wire_global_keydown(app.clone(), canvas.clone());
    wire_page_lifecycle(&app);

    // The boot overlay runs whether or not a GPU adapter shows up
    let gpu = frame::init_gpu(&canvas, &mesh, bloom).await;
    app.borrow_mut().gpu = gpu;
    frame::start_loop(app);
    Ok(())
}

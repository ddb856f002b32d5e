use crate::demo::Demo;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

impl Demo {
    /// One animation frame: boot overlay, timers, HUD, flight and render.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();
        let dt_ms = dt_sec as f64 * 1000.0;

        if let Some(phase) = self.boot.advance(dt_ms) {
            log::info!("[boot] {:?}", phase);
        }
        self.overlay.apply(self.boot.view());

        let flight_frame = if self.playing && !self.paused {
            if let Some(a) = &self.audio {
                a.spectrum(&mut self.spectrum);
            }
            for task in self.scheduler.advance(dt_ms) {
                self.run_task(task);
            }
            self.hud_state = self.hud_state.with_spectrum(&self.spectrum);
            self.hud.apply(&self.hud_state);
            self.flight
                .step(&self.curve, &self.spectrum, js_sys::Date::now(), dt_sec)
        } else {
            // before the start click and while paused the camera holds its pose
            self.flight.idle_frame(&self.curve)
        };

        let ambient = self.spectrum[0] as f32 / 255.0;
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let mut lost_gpu = false;
        if let Some(g) = &mut self.gpu {
            g.set_frame(flight_frame);
            g.set_ambient(ambient);
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(dt_sec) {
                match render::surface_recovery(&e) {
                    render::SurfaceRecovery::Reconfigure => {
                        log::warn!("surface {:?}; reconfiguring", e);
                        g.reconfigure();
                    }
                    render::SurfaceRecovery::SkipFrame => log::debug!("frame skipped: {:?}", e),
                    render::SurfaceRecovery::GiveUp => {
                        log::error!("render error: {:?}; rendering stopped", e);
                        lost_gpu = true;
                    }
                }
            }
        }
        if lost_gpu {
            self.gpu = None;
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    mesh: &crate::core::TubeMesh,
    bloom: render::BloomSettings,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, mesh, bloom).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(demo: Rc<RefCell<Demo>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        demo.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

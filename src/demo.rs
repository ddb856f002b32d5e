use crate::audio::{self, AudioEngine, Spectrum};
use crate::core::constants::*;
use crate::core::controls::stepped_volume;
use crate::core::synth;
use crate::core::{
    tunnel_control_points, BootPhase, BootSequencer, DemoConfig, FlightState, HudState,
    LifecycleAction, NameRotator, PageLifecycle, Scheduler, SoundId, TubeMesh, TunnelCurve, Variant,
};
use crate::hud::HudView;
use crate::overlay::BootOverlay;
use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Fixed-interval jobs run while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTask {
    Scratch,
    RotateName,
    Beat,
}

/// The whole application state. Owned by one `Rc<RefCell<_>>` shared by the
/// frame loop and the DOM listeners.
pub struct Demo {
    pub config: DemoConfig,
    pub(crate) curve: TunnelCurve,
    pub(crate) flight: FlightState,
    pub(crate) boot: BootSequencer,
    pub(crate) scheduler: Scheduler<TimerTask>,
    pub(crate) hud_state: HudState,
    pub(crate) hud: HudView,
    pub(crate) overlay: BootOverlay,
    names: NameRotator<StdRng>,
    rng: StdRng,
    pub(crate) audio: Option<AudioEngine>,
    pub(crate) spectrum: Spectrum,
    pub(crate) playing: bool,
    pub(crate) paused: bool,
    page: PageLifecycle,
    timers_parked: bool,
    pub(crate) gpu: Option<render::GpuState<'static>>,
    pub(crate) canvas: web::HtmlCanvasElement,
    pub(crate) last_instant: Instant,
}

/// Curve and tube geometry for a config. Falls back to the default point
/// count if the configured one cannot form a curve.
pub fn build_scene(config: &DemoConfig) -> Option<(TunnelCurve, TubeMesh)> {
    let make = |n: usize| {
        TunnelCurve::new(
            tunnel_control_points(n, PATH_SWAY_X_FREQ, PATH_SWAY_Y_FREQ, PATH_SWAY_AMPLITUDE, PATH_Z_STEP),
            ARC_LENGTH_DIVISIONS,
        )
    };
    let curve = make(config.path_points).or_else(|| {
        log::warn!("[scene] {} control points is too few; using {}", config.path_points, PATH_POINTS);
        make(PATH_POINTS)
    })?;
    let mesh = TubeMesh::build(&curve, TUBE_SEGMENTS, TUBE_RADIUS, TUBE_RADIAL_SEGMENTS);
    log::info!(
        "[scene] path {:.0} units, {} vertices, {} edges",
        curve.length(),
        mesh.positions.len(),
        mesh.edge_count()
    );
    Some((curve, mesh))
}

impl Demo {
    pub fn new(
        config: DemoConfig,
        curve: TunnelCurve,
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler
            .every(config.scratch_interval_ms, TimerTask::Scratch)
            .every(config.name_interval_ms, TimerTask::RotateName);
        if config.variant == Variant::Synth {
            scheduler.every(config.beat_interval_ms(), TimerTask::Beat);
        }

        Self {
            flight: FlightState::new(
                config.progress_base_step,
                config.progress_bass_gain,
                config.lookahead,
                config.shake_decay,
            ),
            boot: BootSequencer::new(config.boot_delay_ms, config.boot_fade_ms),
            scheduler,
            hud_state: HudState::default(),
            hud: HudView::build(document),
            overlay: BootOverlay::new(document),
            names: NameRotator::new(&MEMBERS, StdRng::from_entropy()),
            rng: StdRng::from_entropy(),
            audio: None,
            spectrum: [0; SPECTRUM_BINS],
            playing: false,
            paused: false,
            page: PageLifecycle::default(),
            timers_parked: false,
            gpu: None,
            canvas,
            last_instant: Instant::now(),
            curve,
            config,
        }
    }

    /// Start click. Returns `false` when the boot screen is not ready or the
    /// demo already started, so repeated clicks do nothing.
    pub fn activate(&mut self) -> bool {
        if !self.boot.activate() {
            log::info!("[boot] start ignored in phase {:?}", self.boot.phase());
            return false;
        }
        self.playing = true;
        log::info!("[boot] start ({:?} variant)", self.config.variant);
        true
    }

    /// Audio graph is up: lay down the loop bed and start the timers.
    /// An engine that arrives after teardown is closed unused.
    pub fn attach_audio(&mut self, mut engine: AudioEngine) {
        if self.page.is_closed() {
            engine.close();
            log::info!("[audio] engine arrived after teardown; closed");
            return;
        }
        if self.config.variant == Variant::Synth {
            let pad = synth::render_pad(engine.context().sample_rate(), PAD_LOOP_SECONDS);
            match engine.buffer_from_samples(&pad) {
                Ok(buf) => {
                    if let Err(e) = engine.play_loop(SoundId::Pad, &buf, 1.0, self.config.pad_volume) {
                        log::error!("[audio] pad loop: {}", e);
                    }
                }
                Err(e) => log::error!("[audio] pad render: {}", e),
            }
        }
        if !self.page.is_live() {
            engine.suspend();
        }
        self.audio = Some(engine);
        self.start_timers();
    }

    /// Audio could not start; the visuals and timers carry on silently.
    pub fn audio_failed(&mut self, err: &audio::AudioError) {
        log::error!("[audio] setup failed: {}", err);
        self.start_timers();
    }

    /// A recording finished decoding. Kick and shimmer join the loop bed.
    pub fn sample_loaded(&mut self, id: SoundId, buffer: web::AudioBuffer) {
        let Some(engine) = self.audio.as_mut() else {
            return;
        };
        let volume = match id {
            SoundId::Kick => Some(self.config.kick_volume),
            SoundId::Shimmer => Some(self.config.pad_volume),
            SoundId::Scratch | SoundId::Pad => None,
        };
        if let Some(volume) = volume {
            if let Err(e) = engine.play_loop(id, &buffer, 1.0, volume) {
                log::error!("[audio] {} loop: {}", id.label(), e);
            }
        }
        engine.bank.insert(id, buffer);
        let missing: Vec<_> = engine.bank.missing().map(SoundId::label).collect();
        log::info!(
            "[audio] {} ready; {} loops running, waiting on {:?}",
            id.label(),
            engine.loop_count(),
            missing
        );
    }

    fn start_timers(&mut self) {
        if self.paused {
            return;
        }
        if !self.page.is_live() {
            self.timers_parked = !self.page.is_closed();
            return;
        }
        if self.scheduler.start() {
            log::info!("[timers] started {} tasks", self.scheduler.len());
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.playing || self.boot.phase() != BootPhase::Running {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.scheduler.stop();
            if let Some(a) = &self.audio {
                a.suspend();
            }
        } else {
            if let Some(a) = &self.audio {
                a.resume();
            }
            self.start_timers();
        }
        log::info!("[keys] paused={}", self.paused);
    }

    pub fn toggle_hud(&mut self) {
        self.overlay.toggle_hud();
    }

    pub fn nudge_volume(&self, delta: f32) {
        if let Some(a) = &self.audio {
            let v = stepped_volume(a.master_volume(), delta);
            a.set_master_volume(v);
            log::info!("[keys] master volume {:.2}", v);
        }
    }

    /// `pagehide`. A page kept in the back/forward cache is only suspended.
    pub fn page_hidden(&mut self, persisted: bool) {
        match self.page.hide(persisted) {
            LifecycleAction::Suspend => {
                self.timers_parked = self.scheduler.is_running();
                self.scheduler.stop();
                if let Some(a) = &self.audio {
                    a.suspend();
                }
                log::info!("[page] frozen");
            }
            LifecycleAction::Teardown => self.teardown(),
            LifecycleAction::Resume | LifecycleAction::Ignore => {}
        }
    }

    /// `pageshow`. Picks up where a frozen page left off, respecting pause.
    pub fn page_shown(&mut self) {
        if self.page.show() != LifecycleAction::Resume {
            return;
        }
        log::info!("[page] restored");
        // the frame loop was parked; don't count the gap as one frame
        self.last_instant = Instant::now();
        if self.paused {
            return;
        }
        if let Some(a) = &self.audio {
            a.resume();
        }
        if std::mem::take(&mut self.timers_parked) {
            self.start_timers();
        }
    }

    /// Stop timers and release the audio graph.
    fn teardown(&mut self) {
        self.scheduler.stop();
        if let Some(mut a) = self.audio.take() {
            a.close();
        }
        self.playing = false;
        log::info!("[demo] torn down");
    }

    pub(crate) fn run_task(&mut self, task: TimerTask) {
        let synth = self.config.variant == Variant::Synth;
        match task {
            TimerTask::Scratch => {
                if self.rng.gen::<f64>() > SCRATCH_THRESHOLD {
                    let pitch = SCRATCH_PITCH_MIN + self.rng.gen::<f32>() * SCRATCH_PITCH_SPAN;
                    if let Some(a) = self.audio.as_mut() {
                        if let Err(e) = a.trigger_one_shot(SoundId::Scratch, pitch, SCRATCH_VOLUME, synth) {
                            log::error!("[audio] scratch: {}", e);
                        }
                    }
                    self.flight.scratch(self.config.shake_kick);
                }
            }
            TimerTask::RotateName => {
                if let Some(name) = self.names.next_name() {
                    self.hud_state = self.hud_state.with_name(name);
                    if let Some(a) = self.audio.as_mut() {
                        if let Err(e) = a.trigger_one_shot(SoundId::Shimmer, SHIMMER_PITCH, SHIMMER_VOLUME, synth) {
                            log::error!("[audio] shimmer: {}", e);
                        }
                    }
                }
            }
            TimerTask::Beat => {
                if let Some(a) = self.audio.as_mut() {
                    if let Err(e) = a.trigger_one_shot(SoundId::Kick, 1.0, self.config.kick_volume, true) {
                        log::error!("[audio] kick: {}", e);
                    }
                }
            }
        }
    }
}

/// Kick off audio after the start click. Sample loads run independently; a
/// failed load leaves that layer silent.
pub fn start_audio(demo: Rc<RefCell<Demo>>) {
    spawn_local(async move {
        let engine = match AudioEngine::initialize().await {
            Ok(e) => e,
            Err(e) => {
                demo.borrow_mut().audio_failed(&e);
                return;
            }
        };
        let ctx = engine.context().clone();
        let config = demo.borrow().config.clone();
        demo.borrow_mut().attach_audio(engine);
        if !config.uses_samples() {
            return;
        }

        let urls = [
            (SoundId::Kick, config.samples.kick),
            (SoundId::Scratch, config.samples.scratch),
            (SoundId::Shimmer, config.samples.shimmer),
        ];
        for (id, url) in urls {
            let demo = demo.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match audio::load_sample(&ctx, &url).await {
                    Ok(buf) => demo.borrow_mut().sample_loaded(id, buf),
                    Err(e) => log::error!("[audio] {} stays silent: {}", id.label(), e),
                }
            });
        }
    });
}

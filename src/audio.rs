use crate::core::constants::{ANALYSER_FFT_SIZE, MASTER_VOLUME, SPECTRUM_BINS};
use crate::core::mixer::{LayerId, LoopLayers, SoundBank, SoundId};
use crate::core::synth::{self, OneShotPatch, PatchKind, ENVELOPE_FLOOR};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Byte frequency snapshot read back from the analyser.
pub type Spectrum = [u8; SPECTRUM_BINS];

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio context: {0}")]
    Context(String),
    #[error("audio graph: {0}")]
    Graph(String),
    #[error("fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("decode {url}: {reason}")]
    Decode { url: String, reason: String },
}

#[inline]
fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn graph_err(what: &str) -> impl Fn(JsValue) -> AudioError + '_ {
    move |e| AudioError::Graph(format!("{}: {}", what, js_err(e)))
}

fn create_gain(ctx: &web::AudioContext, value: f32) -> Result<web::GainNode, AudioError> {
    let g = ctx.create_gain().map_err(graph_err("GainNode"))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Fetch and decode one recording. No retry and no timeout.
pub async fn load_sample(ctx: &web::AudioContext, url: &str) -> Result<web::AudioBuffer, AudioError> {
    let fetch_err = |e: JsValue| AudioError::Fetch {
        url: url.to_string(),
        reason: js_err(e),
    };
    let window = web::window().ok_or_else(|| AudioError::Fetch {
        url: url.to_string(),
        reason: "no window".into(),
    })?;
    let resp_val = JsFuture::from(window.fetch_with_str(url)).await.map_err(fetch_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(fetch_err)?;
    if !resp.ok() {
        return Err(AudioError::HttpStatus {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let bytes = JsFuture::from(resp.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    let bytes: js_sys::ArrayBuffer = bytes.dyn_into().map_err(fetch_err)?;

    let decode_err = |e: JsValue| AudioError::Decode {
        url: url.to_string(),
        reason: js_err(e),
    };
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes).map_err(decode_err)?)
        .await
        .map_err(decode_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(decode_err)
}

/// The shared audio graph: sources → per-source gain → master → analyser → output.
pub struct AudioEngine {
    ctx: web::AudioContext,
    master: web::GainNode,
    analyser: web::AnalyserNode,
    pub bank: SoundBank<web::AudioBuffer>,
    loops: LoopLayers<web::AudioBufferSourceNode>,
    noise: Option<web::AudioBuffer>,
}

impl AudioEngine {
    /// Must run from a user gesture. Resumes a suspended context before returning.
    pub async fn initialize() -> Result<Self, AudioError> {
        let ctx = web::AudioContext::new().map_err(|e| AudioError::Context(js_err(e)))?;
        if ctx.state() == web::AudioContextState::Suspended {
            let p = ctx.resume().map_err(|e| AudioError::Context(js_err(e)))?;
            JsFuture::from(p)
                .await
                .map_err(|e| AudioError::Context(js_err(e)))?;
        }

        let master = create_gain(&ctx, MASTER_VOLUME)?;
        let analyser = ctx.create_analyser().map_err(graph_err("AnalyserNode"))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        master
            .connect_with_audio_node(&analyser)
            .map_err(graph_err("master → analyser"))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(graph_err("analyser → destination"))?;

        log::info!(
            "[audio] context ready: {} Hz, {} bins",
            ctx.sample_rate(),
            analyser.frequency_bin_count()
        );
        Ok(Self {
            ctx,
            master,
            analyser,
            bank: SoundBank::default(),
            loops: LoopLayers::default(),
            noise: None,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    /// Wrap mono samples in an `AudioBuffer` at the context's rate.
    pub fn buffer_from_samples(&self, samples: &[f32]) -> Result<web::AudioBuffer, AudioError> {
        let len = samples.len().max(1) as u32;
        let buf = self
            .ctx
            .create_buffer(1, len, self.ctx.sample_rate())
            .map_err(graph_err("AudioBuffer"))?;
        let mut data = samples.to_vec();
        buf.copy_to_channel(&mut data, 0)
            .map_err(graph_err("copy_to_channel"))?;
        Ok(buf)
    }

    /// Start an endless loop on a fresh source. Calling twice layers twice.
    pub fn play_loop(
        &mut self,
        sound: SoundId,
        buffer: &web::AudioBuffer,
        rate: f32,
        volume: f32,
    ) -> Result<LayerId, AudioError> {
        let src = self.source_into_master(buffer, rate, volume)?;
        src.set_loop(true);
        src.start().map_err(graph_err("loop start"))?;
        let id = self.loops.add(sound, src);
        log::info!("[audio] loop {} layer {:?} (x{})", sound.label(), id, self.loops.count_of(sound));
        Ok(id)
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// One non-looping playback of a decoded buffer, pitch-shifted via playback rate.
    pub fn trigger_buffer(&self, buffer: &web::AudioBuffer, pitch: f32, volume: f32) -> Result<(), AudioError> {
        let src = self.source_into_master(buffer, pitch, volume)?;
        src.start().map_err(graph_err("one-shot start"))
    }

    /// One synthesized hit: oscillator or band-passed noise with exponential envelope.
    pub fn trigger_patch(&mut self, patch: OneShotPatch) -> Result<(), AudioError> {
        let t0 = self.ctx.current_time() + 0.005;
        let t_peak = t0 + patch.attack_sec;
        let t_end = t_peak + patch.decay_sec;

        let env = create_gain(&self.ctx, 0.0)?;
        let g = env.gain();
        _ = g.set_value_at_time(ENVELOPE_FLOOR, t0);
        _ = g.exponential_ramp_to_value_at_time(patch.peak.max(ENVELOPE_FLOOR), t_peak);
        _ = g.exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, t_end);
        env.connect_with_audio_node(&self.master)
            .map_err(graph_err("envelope → master"))?;

        match patch.kind {
            PatchKind::Sine | PatchKind::Triangle => {
                let osc = self.ctx.create_oscillator().map_err(graph_err("OscillatorNode"))?;
                osc.set_type(if patch.kind == PatchKind::Sine {
                    web::OscillatorType::Sine
                } else {
                    web::OscillatorType::Triangle
                });
                let f = osc.frequency();
                _ = f.set_value_at_time(patch.freq_start, t0);
                if (patch.freq_end - patch.freq_start).abs() > f32::EPSILON {
                    _ = f.exponential_ramp_to_value_at_time(patch.freq_end.max(1.0), t_end);
                }
                osc.connect_with_audio_node(&env)
                    .map_err(graph_err("osc → envelope"))?;
                osc.start_with_when(t0).map_err(graph_err("osc start"))?;
                osc.stop_with_when(t_end + 0.05).map_err(graph_err("osc stop"))?;
            }
            PatchKind::BandNoise => {
                let noise = self.noise_buffer()?;
                let src = self.ctx.create_buffer_source().map_err(graph_err("noise source"))?;
                src.set_buffer(Some(&noise));
                let band = self.ctx.create_biquad_filter().map_err(graph_err("BiquadFilterNode"))?;
                band.set_type(web::BiquadFilterType::Bandpass);
                band.q().set_value(4.0);
                _ = band.frequency().set_value_at_time(patch.freq_start, t0);
                _ = band
                    .frequency()
                    .exponential_ramp_to_value_at_time(patch.freq_end.max(1.0), t_end);
                src.connect_with_audio_node(&band)
                    .map_err(graph_err("noise → band"))?;
                band.connect_with_audio_node(&env)
                    .map_err(graph_err("band → envelope"))?;
                src.start_with_when(t0).map_err(graph_err("noise start"))?;
                src.stop_with_when(t_end + 0.05).map_err(graph_err("noise stop"))?;
            }
        }
        Ok(())
    }

    /// Play `sound` once: the decoded buffer when one exists, otherwise the
    /// synthesized patch when `synth_fallback` is set. Missing samples stay silent.
    pub fn trigger_one_shot(&mut self, sound: SoundId, pitch: f32, volume: f32, synth_fallback: bool) -> Result<(), AudioError> {
        if let Some(buf) = self.bank.get(sound) {
            return self.trigger_buffer(buf, pitch, volume);
        }
        if !synth_fallback {
            return Ok(());
        }
        let patch = match sound {
            SoundId::Kick => synth::kick_patch(),
            SoundId::Scratch => synth::scratch_patch(pitch),
            SoundId::Shimmer => synth::shimmer_patch(pitch),
            SoundId::Pad => return Ok(()),
        };
        self.trigger_patch(synth::with_volume(patch, volume))
    }

    /// Copy the current byte spectrum into `out`.
    pub fn spectrum(&self, out: &mut Spectrum) {
        let bins = (self.analyser.frequency_bin_count() as usize).min(out.len());
        self.analyser.get_byte_frequency_data(&mut out[..bins]);
        for v in &mut out[bins..] {
            *v = 0;
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master.gain().value()
    }

    pub fn set_master_volume(&self, volume: f32) {
        self.master.gain().set_value(volume.clamp(0.0, 1.0));
    }

    pub fn suspend(&self) {
        match self.ctx.suspend() {
            Ok(_) => log::info!("[audio] suspended"),
            Err(e) => log::error!("[audio] suspend failed: {}", js_err(e)),
        }
    }

    pub fn resume(&self) {
        match self.ctx.resume() {
            Ok(_) => log::info!("[audio] resumed"),
            Err(e) => log::error!("[audio] resume failed: {}", js_err(e)),
        }
    }

    /// Stop every loop layer and close the context.
    pub fn close(&mut self) {
        for src in self.loops.drain() {
            _ = src.stop();
        }
        if let Err(e) = self.ctx.close() {
            log::error!("[audio] close failed: {}", js_err(e));
        }
    }

    fn source_into_master(
        &self,
        buffer: &web::AudioBuffer,
        rate: f32,
        volume: f32,
    ) -> Result<web::AudioBufferSourceNode, AudioError> {
        let src = self
            .ctx
            .create_buffer_source()
            .map_err(graph_err("AudioBufferSourceNode"))?;
        src.set_buffer(Some(buffer));
        src.playback_rate().set_value(rate);
        let gain = create_gain(&self.ctx, volume)?;
        src.connect_with_audio_node(&gain)
            .map_err(graph_err("source → gain"))?;
        gain.connect_with_audio_node(&self.master)
            .map_err(graph_err("gain → master"))?;
        Ok(src)
    }

    fn noise_buffer(&mut self) -> Result<web::AudioBuffer, AudioError> {
        if let Some(b) = &self.noise {
            return Ok(b.clone());
        }
        let samples = synth::render_noise(self.ctx.sample_rate(), 1.0, 0x5C2A_7C11);
        let b = self.buffer_from_samples(&samples)?;
        self.noise = Some(b.clone());
        Ok(b)
    }
}

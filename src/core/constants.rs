// Shared scene/audio tuning constants. `DemoConfig` starts from these and
// variant presets override a handful of them.

// Flight path
pub const PATH_POINTS: usize = 60;
pub const PATH_SWAY_X_FREQ: f32 = 0.2; // radians per control point
pub const PATH_SWAY_Y_FREQ: f32 = 0.1;
pub const PATH_SWAY_AMPLITUDE: f32 = 15.0;
pub const PATH_Z_STEP: f32 = 150.0; // forward advance per control point
pub const ARC_LENGTH_DIVISIONS: usize = 200;

// Tube mesh
pub const TUBE_SEGMENTS: usize = 600;
pub const TUBE_RADIUS: f32 = 6.0;
pub const TUBE_RADIAL_SEGMENTS: usize = 12;

// Progress along the curve (per frame)
pub const PROGRESS_BASE_STEP: f32 = 0.000_03;
pub const PROGRESS_BASS_GAIN: f32 = 0.000_000_8; // per unit of bin[1] (0..255)
pub const LOOKAHEAD_OFFSET: f32 = 0.005;

// Camera shake after a scratch
pub const SHAKE_KICK: f32 = 2.5;
pub const SHAKE_DECAY: f32 = 0.85; // multiplicative, per frame
pub const SHAKE_PHASE_RATE: f64 = 0.5; // radians per millisecond
pub const SHAKE_ROLL_PER_UNIT: f32 = 0.02; // radians of roll per unit intensity

// Tube emissive pulse
pub const EMISSIVE_REST: f32 = 0.6;
pub const EMISSIVE_PEAK: f32 = 2.0;
pub const EMISSIVE_HALF_PERIOD_SEC: f32 = 0.1;

// Point light
pub const LIGHT_IDLE_INTENSITY: f32 = 150.0;
pub const LIGHT_BASE_INTENSITY: f32 = 100.0;
pub const LIGHT_BASS_GAIN: f32 = 2.0; // per unit of bin[0]
pub const LIGHT_DISTANCE: f32 = 300.0;
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.0, 1.0]; // #ff00ff

// Materials and atmosphere
pub const TUBE_COLOR: [f32; 3] = [0.0, 0.949, 1.0]; // #00f2ff
pub const FOG_COLOR: [f32; 3] = [0.0, 0.020, 0.031]; // #000508
pub const FOG_DENSITY: f32 = 0.008;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 65.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;

// Analyser and HUD
pub const ANALYSER_FFT_SIZE: u32 = 64;
pub const SPECTRUM_BINS: usize = (ANALYSER_FFT_SIZE / 2) as usize;
pub const VU_BAR_COUNT: usize = 15;
pub const VU_MAX_HEIGHT_PX: f32 = 80.0;
pub const VU_PEAK_HEIGHT_PX: f32 = 70.0;

// Timers (milliseconds)
pub const BOOT_DELAY_MS: f64 = 3000.0;
pub const BOOT_FADE_MS: f64 = 1000.0;
pub const SCRATCH_INTERVAL_MS: f64 = 1100.0;
pub const NAME_INTERVAL_MS: f64 = 5000.0;

// Scratch trigger
pub const SCRATCH_THRESHOLD: f64 = 0.6; // a uniform draw above this fires a scratch
pub const SCRATCH_PITCH_MIN: f32 = 0.8;
pub const SCRATCH_PITCH_SPAN: f32 = 1.5;
pub const SCRATCH_VOLUME: f32 = 0.2;

// Layer volumes
pub const KICK_LOOP_VOLUME: f32 = 0.7;
pub const PAD_LOOP_VOLUME: f32 = 0.3;
pub const SHIMMER_PITCH: f32 = 1.5;
pub const SHIMMER_VOLUME: f32 = 0.1;
pub const MASTER_VOLUME: f32 = 1.0;
pub const MASTER_VOLUME_STEP: f32 = 0.05;

// Synth variant
pub const SYNTH_BPM: f32 = 124.0;
pub const PAD_LOOP_SECONDS: f32 = 4.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;

pub const MEMBERS: [&str; 9] = [
    "ALISHER FARHADI",
    "ROSS COHEN",
    "EPIC TECH",
    "ADAM NORMANDIN",
    "LUDOVIC",
    "CHUCK BAGGETT",
    "MIMI BROWN",
    "MATTHEW LEIGH",
    "CHRIS CONLEY",
];

pub const KICK_URL: &str = "https://cdn.pixabay.com/audio/2022/03/10/audio_c976f920f3.mp3";
pub const SCRATCH_URL: &str = "https://cdn.pixabay.com/audio/2021/11/24/audio_985532588e.mp3";
pub const SHIMMER_URL: &str = "https://cdn.pixabay.com/audio/2022/03/15/audio_27607a513c.mp3";

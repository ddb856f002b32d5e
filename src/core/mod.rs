pub mod boot;
pub mod config;
pub mod constants;
pub mod controls;
pub mod curve;
pub mod flight;
pub mod hud;
pub mod lifecycle;
pub mod mixer;
pub mod scheduler;
pub mod synth;
pub mod tube;

pub use boot::*;
pub use config::*;
pub use constants::*;
pub use curve::*;
pub use flight::*;
pub use hud::*;
pub use lifecycle::*;
pub use mixer::*;
pub use scheduler::*;
pub use tube::*;

// Shaders bundled as string constants
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
pub static TUNNEL_WGSL: &str = include_str!("../../shaders/tunnel.wgsl");

//! Ledge Runner - a tile-grid platformer character controller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, movement, level tick)
//! - `platform`: Two-phase frame driver (input sampling + fixed simulation)
//! - `settings`: Data-driven tuning and collision configuration
//! - `services`: Level sequencing and event dispatch to outside collaborators
//! - `audio`, `animation`, `camera`: Presentation glue fed by simulation state

pub mod animation;
pub mod audio;
pub mod camera;
pub mod error;
pub mod platform;
pub mod services;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, LevelError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Displacements smaller than this are not resolved at all
    pub const MOVE_EPSILON: f32 = 0.001;
    /// Gap between the actor's feet and the ground probe
    pub const GROUND_CHECK_MARGIN: f32 = 0.05;
    /// Binary search iterations for contact refinement (precision = distance / 64)
    pub const SAFE_DISTANCE_ITERATIONS: u32 = 6;
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

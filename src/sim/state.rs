//! Level phase, per-tick input and the events the simulation emits

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle of one level instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Simulating every tick
    Active,
    /// Dead; movement is skipped until the countdown expires
    Respawning { ticks_remaining: u32 },
    /// Reached an exit. Terminal for this level instance.
    ExitingLevel,
}

impl LevelPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, LevelPhase::Active)
    }
}

/// Input sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Jump pressed this frame (edge, not held)
    pub jump_pressed: bool,
}

impl TickInput {
    pub fn new(horizontal: f32, jump_pressed: bool) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            jump_pressed,
        }
    }
}

/// Where an exit leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitTarget {
    /// A specific level by name
    Named(String),
    /// The next level in order, wrapping to the first
    Next,
}

/// Fire-and-forget notifications for audio, animation and scene glue.
///
/// Drained by the host after each frame; none of them feed back into the
/// simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Level began (music cue)
    LevelStarted { name: String, play_music: bool },
    /// A jump was taken
    Jumped,
    /// Touched a hazard
    Died { position: Vec2 },
    /// Back at spawn after the respawn delay
    Respawned { position: Vec2 },
    /// Touched an exit; the host should load the target level
    LevelExit { target: ExitTarget },
}

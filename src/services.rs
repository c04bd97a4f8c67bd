//! Level sequencing and event dispatch
//!
//! Services are passed in explicitly; nothing here is global.

use crate::animation::AnimationController;
use crate::audio::{AudioManager, SoundEffect};
use crate::error::LevelError;
use crate::sim::{ExitTarget, GameEvent, Level};

/// Ordered set of levels and the one currently loaded
#[derive(Debug, Clone)]
pub struct LevelSequence {
    levels: Vec<Level>,
    current: usize,
}

impl LevelSequence {
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self { levels, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    /// Resolve an exit: by name, else the next index, else wrap to the first
    pub fn resolve(&mut self, target: &ExitTarget) -> Result<Level, LevelError> {
        let index = match target {
            ExitTarget::Named(name) => self
                .levels
                .iter()
                .position(|l| &l.name == name)
                .ok_or_else(|| LevelError::UnknownLevel(name.clone()))?,
            ExitTarget::Next => {
                let next = self.current + 1;
                if next < self.levels.len() {
                    next
                } else {
                    log::info!("Out of levels, wrapping to the first");
                    0
                }
            }
        };
        self.current = index;
        log::info!("Loading level {} '{}'", index, self.levels[index].name);
        Ok(self.levels[index].clone())
    }

    /// Fresh copy of the current level (retry)
    pub fn restart_current(&self) -> Level {
        self.levels[self.current].clone()
    }

    /// Back to the first level
    pub fn load_first(&mut self) -> Level {
        self.current = 0;
        self.levels[0].clone()
    }
}

/// What the host must do after dispatching a frame's events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    LoadLevel(ExitTarget),
}

/// Route simulation events to audio and animation.
///
/// Returns `Dispatch::LoadLevel` when an exit was reached; loading is left
/// to the caller, which owns the level sequence and the controller.
pub fn dispatch_events(
    events: Vec<GameEvent>,
    audio: &mut AudioManager,
    animation: &mut AnimationController,
) -> Dispatch {
    let mut dispatch = Dispatch::Continue;
    for event in events {
        match event {
            GameEvent::LevelStarted { play_music, .. } => {
                if play_music {
                    audio.play_level_music(false);
                }
            }
            GameEvent::Jumped => audio.play(SoundEffect::Jump),
            GameEvent::Died { .. } => {
                animation.set_death_state(true);
                audio.play_level_music(true);
                audio.play(SoundEffect::Death);
            }
            GameEvent::Respawned { .. } => animation.set_death_state(false),
            GameEvent::LevelExit { target } => dispatch = Dispatch::LoadLevel(target),
        }
    }
    dispatch
}

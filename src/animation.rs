//! Sprite animation parameters derived from actor state

use crate::settings::AnimationSettings;
use crate::sim::LevelController;

/// Values an animator state machine reads each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Horizontal speed magnitude
    pub speed: f32,
    pub is_grounded: bool,
    pub velocity_y: f32,
    pub is_dead: bool,
    /// Sprite mirrored to face left
    pub flip_x: bool,
}

impl AnimationParams {
    /// Sample the actor with facing and death state supplied by the caller
    pub fn from_actor(controller: &LevelController, is_dead: bool, flip_x: bool) -> Self {
        let velocity = controller.velocity();
        Self {
            speed: velocity.x.abs(),
            is_grounded: controller.movement().is_grounded(),
            velocity_y: velocity.y,
            is_dead,
            flip_x,
        }
    }
}

/// Tracks facing and the death flag between frames
#[derive(Debug, Clone)]
pub struct AnimationController {
    settings: AnimationSettings,
    flip_x: bool,
    is_dead: bool,
}

impl AnimationController {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            settings,
            flip_x: false,
            is_dead: false,
        }
    }

    /// Set by the death / respawn events
    pub fn set_death_state(&mut self, is_dead: bool) {
        self.is_dead = is_dead;
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Sample the actor. Facing only changes above the walk threshold.
    pub fn update(&mut self, controller: &LevelController) -> AnimationParams {
        let velocity = controller.velocity();

        if self.settings.flip_sprite_on_direction
            && velocity.x.abs() > self.settings.walk_speed_threshold
        {
            self.flip_x = velocity.x < 0.0;
        }

        AnimationParams::from_actor(controller, self.is_dead, self.flip_x)
    }
}

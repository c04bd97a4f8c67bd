//! Kinematic actor movement: run, gravity, jump, coyote time, jump buffer

use glam::Vec2;

use super::state::GameEvent;
use crate::move_towards;
use crate::settings::MovementSettings;

/// Velocity and jump timers for one actor
#[derive(Debug, Clone)]
pub struct ActorMovement {
    settings: MovementSettings,
    velocity: Vec2,
    is_grounded: bool,
    /// Coyote countdown (seconds remaining)
    grounded_timer: f32,
    /// Buffered jump countdown (seconds remaining)
    jump_buffer_timer: f32,
}

impl ActorMovement {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            settings,
            velocity: Vec2::ZERO,
            is_grounded: false,
            grounded_timer: 0.0,
            jump_buffer_timer: 0.0,
        }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Grounded state is decided by the level tick
    pub fn set_grounded(&mut self, grounded: bool) {
        self.is_grounded = grounded;
    }

    pub fn grounded_timer(&self) -> f32 {
        self.grounded_timer
    }

    pub fn jump_buffer_timer(&self) -> f32 {
        self.jump_buffer_timer
    }

    /// Sample input. Runs at input rate, not simulation rate.
    pub fn handle_input(&mut self, horizontal: f32, jump_pressed: bool, dt: f32) {
        if horizontal.abs() > self.settings.input_deadzone {
            let target = horizontal * self.settings.move_speed;
            self.velocity.x = move_towards(self.velocity.x, target, self.settings.acceleration * dt);
        } else if self.is_grounded {
            self.velocity.x = move_towards(self.velocity.x, 0.0, self.settings.friction * dt);
        }
        // Airborne with no input keeps its horizontal speed

        // A fresh press always gets the full window, however long this frame was
        self.jump_buffer_timer -= dt;
        if jump_pressed {
            self.jump_buffer_timer = self.settings.jump_buffer_time;
        }
    }

    /// Integrate gravity. Must run before collision each tick.
    pub fn apply_gravity(&mut self, dt: f32) {
        if !self.is_grounded {
            self.velocity.y -= self.settings.gravity * dt;
            self.velocity.y = self.velocity.y.max(-self.settings.max_fall_speed);
        } else if self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }
    }

    /// Buffered press plus ground contact or coyote grace
    pub fn should_jump(&self) -> bool {
        self.jump_buffer_timer > 0.0 && (self.is_grounded || self.grounded_timer > 0.0)
    }

    pub fn jump(&mut self, events: &mut Vec<GameEvent>) {
        self.velocity.y = self.settings.jump_force;
        self.is_grounded = false;
        // No second jump from leftover coyote time
        self.grounded_timer = 0.0;
        events.push(GameEvent::Jumped);
    }

    /// Refill or drain the coyote window. Runs once per tick after collision.
    pub fn update_timers(&mut self, dt: f32) {
        if self.is_grounded {
            self.grounded_timer = self.settings.coyote_time;
        } else {
            self.grounded_timer -= dt;
        }
    }

    pub fn consume_jump_buffer(&mut self) {
        self.jump_buffer_timer = 0.0;
    }

    /// Zero velocity, grounded state and buffered input
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.is_grounded = false;
        self.consume_jump_buffer();
    }
}

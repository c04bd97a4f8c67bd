//! Smoothed follow camera
//!
//! Reads the actor position after the simulation has run; never writes back.

use glam::Vec2;

/// Critically damped spring toward `target`. Returns the new position and
/// updates `velocity` in place.
pub fn smooth_damp(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    dt: f32,
) -> Vec2 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Never overshoot the target
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = (output - target) / dt.max(f32::EPSILON);
    }
    output
}

#[derive(Debug, Clone)]
pub struct CameraFollow {
    position: Vec2,
    offset: Vec2,
    velocity: Vec2,
    smooth_time: f32,
}

impl CameraFollow {
    /// Keeps the initial camera-to-target offset for the rest of the level
    pub fn new(camera_position: Vec2, target: Vec2, smooth_time: f32) -> Self {
        Self {
            position: camera_position,
            offset: camera_position - target,
            velocity: Vec2::ZERO,
            smooth_time,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn update(&mut self, target: Vec2, dt: f32) -> Vec2 {
        let goal = target + self.offset;
        self.position = smooth_damp(self.position, goal, &mut self.velocity, self.smooth_time, dt);
        self.position
    }
}

//! Frame driver
//!
//! Splits each rendered frame into two phases:
//! - input sampling at frame rate (`LevelController::handle_input`)
//! - zero or more fixed simulation ticks paid for by accumulated frame time

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{LevelController, TickInput};

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct GameLoop {
    fixed_dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl GameLoop {
    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Unsimulated time carried into the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run one frame. Returns the number of fixed ticks executed.
    pub fn frame(
        &mut self,
        controller: &mut LevelController,
        frame_dt: f32,
        input: TickInput,
    ) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);

        controller.handle_input(&input, dt);

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            controller.tick();
            self.accumulator -= self.fixed_dt;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.fixed_dt {
            log::debug!(
                "Frame behind by {:.3}s, dropping excess",
                self.accumulator
            );
            self.accumulator %= self.fixed_dt;
        }

        substeps
    }
}

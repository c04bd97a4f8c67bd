//! Axis-separated swept collision against the tile grid
//!
//! The actor moves one axis at a time. A move whose destination overlaps a
//! solid tile is replaced by the binary-searched safe distance, the matching
//! velocity component is zeroed (no bounce, no slide) and a contact flag is
//! raised for the side that was hit.

use glam::Vec2;

use super::grid::TileCollisionGrid;
use crate::consts::{GROUND_CHECK_MARGIN, MOVE_EPSILON};
use crate::error::ConfigError;
use crate::settings::CollisionSettings;

/// Actor box: full size plus a uniform skin shrink for tile tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    size: Vec2,
    skin_width: f32,
}

impl CollisionBox {
    /// Validated box. Zero or negative extents, or a skin that would
    /// collapse the box, are configuration errors.
    pub fn new(size: Vec2, skin_width: f32) -> Result<Self, ConfigError> {
        let settings = CollisionSettings { size, skin_width };
        settings.validate()?;
        Ok(Self { size, skin_width })
    }

    pub fn from_settings(settings: &CollisionSettings) -> Result<Self, ConfigError> {
        Self::new(settings.size, settings.skin_width)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    /// Unshrunk half extents, used for hazard and exit overlap
    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Half extents used against tiles
    #[inline]
    pub fn collision_half_size(&self) -> Vec2 {
        self.half_size() - Vec2::splat(self.skin_width)
    }

    /// Thin probe rectangle (center, half size) just under the actor's feet
    pub fn ground_probe(&self, position: Vec2) -> (Vec2, Vec2) {
        let half = self.half_size();
        let center = position - Vec2::new(0.0, half.y + GROUND_CHECK_MARGIN);
        let probe_half = Vec2::new(self.collision_half_size().x, GROUND_CHECK_MARGIN);
        (center, probe_half)
    }
}

/// Sides touched during the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ContactState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Owns the actor box and one tick's worth of contacts
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    collision_box: CollisionBox,
    contacts: ContactState,
}

impl CollisionResolver {
    pub fn new(collision_box: CollisionBox) -> Self {
        Self {
            collision_box,
            contacts: ContactState::default(),
        }
    }

    pub fn collision_box(&self) -> &CollisionBox {
        &self.collision_box
    }

    pub fn contacts(&self) -> ContactState {
        self.contacts
    }

    /// Clear all contact flags; called once at the start of every tick
    pub fn reset_contacts(&mut self) {
        self.contacts.reset();
    }

    /// Sweep along X. Sets `left`/`right` and zeroes `velocity.x` on impact.
    pub fn move_horizontal(
        &mut self,
        grid: &TileCollisionGrid<'_>,
        from: Vec2,
        delta_x: f32,
        velocity: &mut Vec2,
    ) -> Vec2 {
        if delta_x.abs() < MOVE_EPSILON {
            return from;
        }

        let Some(to) = self.sweep(grid, from, Vec2::new(delta_x, 0.0)) else {
            return from + Vec2::new(delta_x, 0.0);
        };

        velocity.x = 0.0;
        if delta_x < 0.0 {
            self.contacts.left = true;
        } else {
            self.contacts.right = true;
        }
        log::trace!("horizontal contact at {to:?} (dx {delta_x})");
        to
    }

    /// Sweep along Y. Sets `bottom`/`top` and zeroes `velocity.y` on impact.
    ///
    /// The returned flag is true only when this call landed on something;
    /// a move that hits nothing, or no move at all, reports false.
    pub fn move_vertical(
        &mut self,
        grid: &TileCollisionGrid<'_>,
        from: Vec2,
        delta_y: f32,
        velocity: &mut Vec2,
    ) -> (Vec2, bool) {
        if delta_y.abs() < MOVE_EPSILON {
            return (from, false);
        }

        let Some(to) = self.sweep(grid, from, Vec2::new(0.0, delta_y)) else {
            return (from + Vec2::new(0.0, delta_y), false);
        };

        velocity.y = 0.0;
        let landed = delta_y < 0.0;
        if landed {
            self.contacts.bottom = true;
        } else {
            self.contacts.top = true;
        }
        log::trace!("vertical contact at {to:?} (dy {delta_y})");
        (to, landed)
    }

    /// Destination clamped to the safe distance, or `None` if the full move is clear
    fn sweep(&self, grid: &TileCollisionGrid<'_>, from: Vec2, delta: Vec2) -> Option<Vec2> {
        let half = self.collision_box.collision_half_size();
        if !grid.overlaps_solid(from + delta, half) {
            return None;
        }
        let distance = delta.length();
        let direction = delta / distance;
        let safe = grid.max_safe_distance(from, direction, distance, half);
        Some(from + direction * safe)
    }

    /// Whether solid ground sits just under the actor. Touches no state.
    pub fn is_ground_below(&self, grid: &TileCollisionGrid<'_>, position: Vec2) -> bool {
        let (center, half) = self.collision_box.ground_probe(position);
        grid.overlaps_solid(center, half)
    }
}

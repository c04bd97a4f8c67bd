//! Static overlap regions: hazards and level exits

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::ExitTarget;
use crate::error::LevelError;

/// Axis-aligned rectangle with an enabled flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub center: Vec2,
    pub half_size: Vec2,
    pub enabled: bool,
}

impl Zone {
    /// Zone from its full size. Sizes must be positive.
    pub fn new(center: Vec2, size: Vec2) -> Result<Self, LevelError> {
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(LevelError::InvalidZoneSize {
                x: size.x,
                y: size.y,
            });
        }
        Ok(Self {
            center,
            half_size: size * 0.5,
            enabled: true,
        })
    }

    /// Touching edges count as overlap. Disabled zones never overlap.
    pub fn overlaps(&self, center: Vec2, half_size: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        let d = (center - self.center).abs();
        let reach = half_size + self.half_size;
        d.x <= reach.x && d.y <= reach.y
    }
}

/// Region that kills the actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardZone {
    pub zone: Zone,
}

impl HazardZone {
    pub fn new(center: Vec2, size: Vec2) -> Result<Self, LevelError> {
        Ok(Self {
            zone: Zone::new(center, size)?,
        })
    }

    pub fn overlaps(&self, center: Vec2, half_size: Vec2) -> bool {
        self.zone.overlaps(center, half_size)
    }
}

/// Region that ends the level
#[derive(Debug, Clone, PartialEq)]
pub struct ExitZone {
    pub zone: Zone,
    pub target: ExitTarget,
}

impl ExitZone {
    pub fn new(center: Vec2, size: Vec2, target: ExitTarget) -> Result<Self, LevelError> {
        Ok(Self {
            zone: Zone::new(center, size)?,
            target,
        })
    }

    pub fn overlaps(&self, center: Vec2, half_size: Vec2) -> bool {
        self.zone.overlaps(center, half_size)
    }
}

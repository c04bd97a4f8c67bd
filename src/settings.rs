//! Controller tuning and presentation settings
//!
//! Loaded from a JSON file; any missing field falls back to its default.
//! Everything that feeds the simulation is validated before a level starts.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Horizontal run and jump tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Top horizontal speed (units/s)
    pub move_speed: f32,
    /// Horizontal ramp toward the input target (units/s²)
    pub acceleration: f32,
    /// Ground deceleration without input (units/s²)
    pub friction: f32,
    /// Upward speed applied by a jump (units/s)
    pub jump_force: f32,
    /// Downward acceleration while airborne (units/s²)
    pub gravity: f32,
    /// Terminal fall speed (units/s, positive)
    pub max_fall_speed: f32,
    /// Grace window after leaving the ground during which a jump is still allowed
    pub coyote_time: f32,
    /// How long a jump press stays buffered
    pub jump_buffer_time: f32,
    /// Horizontal axis magnitude treated as no input
    pub input_deadzone: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            acceleration: 25.0,
            friction: 15.0,
            jump_force: 12.0,
            gravity: 30.0,
            max_fall_speed: 20.0,
            coyote_time: 0.12,
            jump_buffer_time: 0.08,
            input_deadzone: 0.01,
        }
    }
}

/// Actor collision box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Full width and height of the actor box
    pub size: Vec2,
    /// Uniform shrink applied before tile tests
    pub skin_width: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            size: Vec2::new(0.45, 0.9),
            skin_width: 0.01,
        }
    }
}

/// Per-level flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Seconds between death and reappearing at spawn
    pub respawn_delay: f32,
    /// Start the level track when a level begins
    pub play_level_music_on_start: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            respawn_delay: 0.4,
            play_level_music_on_start: true,
        }
    }
}

/// Volumes (0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub jump_volume: f32,
    pub death_volume: f32,
    pub menu_music_volume: f32,
    pub level_music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            jump_volume: 1.0,
            death_volume: 1.0,
            menu_music_volume: 0.7,
            level_music_volume: 0.7,
            muted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Approximate time to catch up with the target (seconds)
    pub smooth_time: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { smooth_time: 0.25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Minimum horizontal speed before the sprite turns around
    pub walk_speed_threshold: f32,
    pub flip_sprite_on_direction: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            walk_speed_threshold: 0.1,
            flip_sprite_on_direction: true,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementSettings,
    pub collision: CollisionSettings,
    pub level: LevelSettings,
    pub audio: AudioSettings,
    pub camera: CameraSettings,
    pub animation: AnimationSettings,
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl MovementSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("movement.move_speed", self.move_speed)?;
        non_negative("movement.acceleration", self.acceleration)?;
        non_negative("movement.friction", self.friction)?;
        non_negative("movement.jump_force", self.jump_force)?;
        non_negative("movement.gravity", self.gravity)?;
        positive("movement.max_fall_speed", self.max_fall_speed)?;
        non_negative("movement.coyote_time", self.coyote_time)?;
        non_negative("movement.jump_buffer_time", self.jump_buffer_time)?;
        non_negative("movement.input_deadzone", self.input_deadzone)
    }
}

impl CollisionSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size.x > 0.0 && self.size.y > 0.0 && self.size.is_finite()) {
            return Err(ConfigError::InvalidBoxSize {
                x: self.size.x,
                y: self.size.y,
            });
        }
        let half = self.size * 0.5;
        if !(self.skin_width >= 0.0 && self.skin_width < half.min_element()) {
            return Err(ConfigError::InvalidSkinWidth {
                skin: self.skin_width,
                hx: half.x,
                hy: half.y,
            });
        }
        Ok(())
    }
}

impl Settings {
    /// Check every value the simulation depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.collision.validate()?;
        non_negative("level.respawn_delay", self.level.respawn_delay)?;
        positive("camera.smooth_time", self.camera.smooth_time)?;
        non_negative(
            "animation.walk_speed_threshold",
            self.animation.walk_speed_threshold,
        )
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(path, &json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, using defaults when the file does not exist.
    ///
    /// A file that exists but is malformed or invalid is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

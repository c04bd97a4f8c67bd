//! Error types
//!
//! Only configuration and level loading can fail. Once a level is running,
//! every odd situation is a policy decision (clamp, zero, ignore), not an error.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("collision box size must be positive, got ({x}, {y})")]
    InvalidBoxSize { x: f32, y: f32 },

    #[error("skin width {skin} must be non-negative and smaller than half extents ({hx}, {hy})")]
    InvalidSkinWidth { skin: f32, hx: f32, hy: f32 },

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be a non-negative finite number, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Malformed level data or an unresolvable level request.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no tile rows")]
    EmptyGrid,

    #[error("tile row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: usize, column: usize },

    #[error("zone size must be positive, got ({x}, {y})")]
    InvalidZoneSize { x: f32, y: f32 },

    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),

    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no level named {0:?}")]
    UnknownLevel(String),

    #[error("level sequence is empty")]
    NoLevels,
}

//! Level geometry and its JSON description
//!
//! Tile rows are written top-down: the first row is the highest one.
//!
//! | glyph       | tile        |
//! |-------------|-------------|
//! | `#`         | solid       |
//! | `~`         | decorative  |
//! | `.` / space | empty       |

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::grid::{Tile, TileMap};
use super::state::ExitTarget;
use super::zone::{ExitZone, HazardZone};
use crate::error::LevelError;

fn default_cell_size() -> f32 {
    1.0
}

fn default_zone_size() -> Vec2 {
    Vec2::ONE
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardDef {
    pub center: Vec2,
    #[serde(default = "default_zone_size")]
    pub size: Vec2,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub center: Vec2,
    #[serde(default = "default_zone_size")]
    pub size: Vec2,
    /// Level to load; the next one in order when absent
    #[serde(default)]
    pub next_level: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// On-disk level description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// World position of the grid's lower-left corner
    #[serde(default)]
    pub origin: Vec2,
    #[serde(default)]
    pub rows: Vec<String>,
    pub spawn: Vec2,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
}

/// A loaded level: geometry, spawn point and registered zones
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    /// `None` for a level without tile geometry
    pub tiles: Option<TileMap>,
    pub spawn: Vec2,
    pub hazards: Vec<HazardZone>,
    pub exits: Vec<ExitZone>,
}

impl Level {
    /// Level with no geometry or zones
    pub fn new(name: impl Into<String>, spawn: Vec2) -> Self {
        Self {
            name: name.into(),
            tiles: None,
            spawn,
            hazards: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub fn with_tiles(mut self, tiles: TileMap) -> Self {
        self.tiles = Some(tiles);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        Self::from_file(&file)
    }

    pub fn from_file(file: &LevelFile) -> Result<Self, LevelError> {
        if !(file.cell_size > 0.0 && file.cell_size.is_finite()) {
            return Err(LevelError::InvalidCellSize(file.cell_size));
        }

        let tiles = if file.rows.is_empty() {
            None
        } else {
            Some(parse_rows(&file.rows, file.cell_size, file.origin)?)
        };

        let hazards = file
            .hazards
            .iter()
            .map(|def| {
                let mut hazard = HazardZone::new(def.center, def.size)?;
                hazard.zone.enabled = def.enabled;
                Ok(hazard)
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let exits = file
            .exits
            .iter()
            .map(|def| {
                let target = match &def.next_level {
                    Some(name) if !name.is_empty() => ExitTarget::Named(name.clone()),
                    _ => ExitTarget::Next,
                };
                let mut exit = ExitZone::new(def.center, def.size, target)?;
                exit.zone.enabled = def.enabled;
                Ok(exit)
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Ok(Self {
            name: file.name.clone(),
            tiles,
            spawn: file.spawn,
            hazards,
            exits,
        })
    }
}

/// Build a tile map from top-down glyph rows
pub fn parse_rows(rows: &[String], cell_size: f32, origin: Vec2) -> Result<TileMap, LevelError> {
    let expected = rows.first().map(|r| r.chars().count()).unwrap_or(0);
    if expected == 0 {
        return Err(LevelError::EmptyGrid);
    }

    let height = rows.len();
    let mut map = TileMap::new(expected as u32, height as u32, cell_size, origin);

    for (row, line) in rows.iter().enumerate() {
        let width = line.chars().count();
        if width != expected {
            return Err(LevelError::RaggedRow {
                row,
                width,
                expected,
            });
        }
        let y = (height - 1 - row) as i32;
        for (column, glyph) in line.chars().enumerate() {
            let tile = match glyph {
                '#' => Tile::Solid,
                '~' => Tile::Decorative,
                '.' | ' ' => Tile::Empty,
                _ => {
                    return Err(LevelError::UnknownGlyph {
                        glyph,
                        row,
                        column,
                    });
                }
            };
            map.set(IVec2::new(column as i32, y), tile);
        }
    }

    Ok(map)
}

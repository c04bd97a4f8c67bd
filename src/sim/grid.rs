//! Tile grid storage and solidity queries
//!
//! `TileMap` is the level-owned grid. `TileCollisionGrid` is a borrowed,
//! read-only view over any `TileSource` that answers box overlap queries and
//! refines contact distance by binary search.

use glam::{IVec2, Vec2};

use crate::consts::SAFE_DISTANCE_ITERATIONS;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    /// Tile with a collider shape
    Solid,
    /// Tile drawn but never collided with
    Decorative,
}

impl Tile {
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

/// Anything that can answer per-cell solidity and map world space to cells
pub trait TileSource {
    /// True if the cell holds a tile with a collider
    fn is_solid_cell(&self, cell: IVec2) -> bool;
    /// True if the cell holds any tile at all
    fn has_tile(&self, cell: IVec2) -> bool;
    /// Cell containing a world position (floor division)
    fn world_to_cell(&self, pos: Vec2) -> IVec2;
    /// World-space size of a cell
    fn cell_size(&self) -> Vec2;
    /// World-space center of a cell
    fn cell_center_world(&self, cell: IVec2) -> Vec2;
}

/// Dense rectangular grid anchored at `origin` (world position of cell (0, 0)'s
/// lower-left corner). Cells outside the rectangle are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Empty map of `width` x `height` cells
    pub fn new(width: u32, height: u32, cell_size: f32, origin: Vec2) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cell_size,
            origin,
            tiles: vec![Tile::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        Some((cell.y * self.width + cell.x) as usize)
    }

    pub fn get(&self, cell: IVec2) -> Tile {
        self.index(cell).map_or(Tile::Empty, |i| self.tiles[i])
    }

    /// Set a cell. Writes outside the grid are ignored.
    pub fn set(&mut self, cell: IVec2, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    /// Fill an inclusive rectangle of cells
    pub fn fill(&mut self, min: IVec2, max: IVec2, tile: Tile) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set(IVec2::new(x, y), tile);
            }
        }
    }

    /// Number of solid cells
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_solid()).count()
    }
}

impl TileSource for TileMap {
    fn is_solid_cell(&self, cell: IVec2) -> bool {
        self.get(cell).is_solid()
    }

    fn has_tile(&self, cell: IVec2) -> bool {
        self.get(cell) != Tile::Empty
    }

    fn world_to_cell(&self, pos: Vec2) -> IVec2 {
        ((pos - self.origin) / self.cell_size).floor().as_ivec2()
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::splat(self.cell_size)
    }

    fn cell_center_world(&self, cell: IVec2) -> Vec2 {
        self.origin + (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }
}

/// Read-only collision queries against an optional tile source.
///
/// With no source every query reports "no solid tile".
#[derive(Clone, Copy)]
pub struct TileCollisionGrid<'a> {
    source: Option<&'a dyn TileSource>,
}

impl<'a> TileCollisionGrid<'a> {
    pub fn new(source: &'a dyn TileSource) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A grid with nothing in it
    pub fn empty() -> Self {
        Self { source: None }
    }

    pub fn from_option(source: Option<&'a dyn TileSource>) -> Self {
        Self { source }
    }

    pub fn is_solid_cell(&self, cell: IVec2) -> bool {
        self.source.is_some_and(|s| s.is_solid_cell(cell))
    }

    /// Inclusive cell range covered by a box; both corners are floored
    /// independently so partially covered boundary cells are included.
    fn covered_cells(source: &dyn TileSource, center: Vec2, half_size: Vec2) -> (IVec2, IVec2) {
        let min = source.world_to_cell(center - half_size);
        let max = source.world_to_cell(center + half_size);
        (min, max)
    }

    /// True if any cell under the box is solid
    pub fn overlaps_solid(&self, center: Vec2, half_size: Vec2) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        let (min, max) = Self::covered_cells(source, center, half_size);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                if source.is_solid_cell(IVec2::new(x, y)) {
                    return true;
                }
            }
        }
        false
    }

    /// Largest distance along `direction` (unit, axis-aligned) in
    /// `[0, max_distance]` at which the box is known to be clear.
    ///
    /// Fixed iteration count; the result is a lower bound within
    /// `max_distance / 64` of the true free distance. Assumes `origin` is clear.
    pub fn max_safe_distance(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        half_size: Vec2,
    ) -> f32 {
        let mut min = 0.0;
        let mut max = max_distance;

        for _ in 0..SAFE_DISTANCE_ITERATIONS {
            let mid = (min + max) * 0.5;
            if self.overlaps_solid(origin + direction * mid, half_size) {
                max = mid;
            } else {
                min = mid;
            }
        }

        min
    }

    /// Every occupied cell (solid or decorative) under the box, for debug drawing
    pub fn overlapping_cells(&self, center: Vec2, half_size: Vec2) -> Vec<IVec2> {
        let Some(source) = self.source else {
            return Vec::new();
        };
        let (min, max) = Self::covered_cells(source, center, half_size);
        let mut cells = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let cell = IVec2::new(x, y);
                if source.has_tile(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    pub fn cell_center_world(&self, cell: IVec2) -> Vec2 {
        self.source
            .map_or(Vec2::ZERO, |s| s.cell_center_world(cell))
    }

    pub fn cell_size(&self) -> Vec2 {
        self.source.map_or(Vec2::ONE, |s| s.cell_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 map with a floor on row 0 and a wall on column 6
    fn test_map() -> TileMap {
        let mut map = TileMap::new(10, 10, 1.0, Vec2::ZERO);
        map.fill(IVec2::new(0, 0), IVec2::new(9, 0), Tile::Solid);
        map.fill(IVec2::new(6, 1), IVec2::new(6, 9), Tile::Solid);
        map.set(IVec2::new(2, 3), Tile::Decorative);
        map
    }

    #[test]
    fn test_world_to_cell_floors() {
        let map = TileMap::new(4, 4, 0.5, Vec2::new(-1.0, 0.0));
        assert_eq!(map.world_to_cell(Vec2::new(-1.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(map.world_to_cell(Vec2::new(-0.51, 0.49)), IVec2::new(0, 0));
        assert_eq!(map.world_to_cell(Vec2::new(-0.5, 0.5)), IVec2::new(1, 1));
        assert_eq!(map.world_to_cell(Vec2::new(-1.1, -0.1)), IVec2::new(-1, -1));
        assert_eq!(map.cell_center_world(IVec2::new(1, 1)), Vec2::new(-0.25, 0.75));
    }

    #[test]
    fn test_decorative_tiles_are_not_solid() {
        let map = test_map();
        let grid = TileCollisionGrid::new(&map);
        assert!(!grid.is_solid_cell(IVec2::new(2, 3)));
        assert!(!grid.overlaps_solid(Vec2::new(2.5, 3.5), Vec2::splat(0.4)));
        assert_eq!(
            grid.overlapping_cells(Vec2::new(2.5, 3.5), Vec2::splat(0.4)),
            vec![IVec2::new(2, 3)]
        );
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let map = test_map();
        let grid = TileCollisionGrid::new(&map);
        assert!(!grid.is_solid_cell(IVec2::new(-1, 0)));
        assert!(!grid.is_solid_cell(IVec2::new(0, 10)));
    }

    #[test]
    fn test_overlap_includes_partially_covered_cells() {
        let map = test_map();
        let grid = TileCollisionGrid::new(&map);
        // Box bottom edge dips 0.01 into row 0
        assert!(grid.overlaps_solid(Vec2::new(3.0, 1.49), Vec2::splat(0.5)));
        // Box clear of the floor
        assert!(!grid.overlaps_solid(Vec2::new(3.0, 1.6), Vec2::splat(0.5)));
        // Box right edge just past x = 6
        assert!(grid.overlaps_solid(Vec2::new(5.6, 5.0), Vec2::splat(0.45)));
    }

    #[test]
    fn test_empty_grid_never_blocks() {
        let grid = TileCollisionGrid::empty();
        assert!(!grid.is_solid_cell(IVec2::ZERO));
        assert!(!grid.overlaps_solid(Vec2::ZERO, Vec2::splat(100.0)));
        assert!(grid.overlapping_cells(Vec2::ZERO, Vec2::ONE).is_empty());
        let d = grid.max_safe_distance(Vec2::ZERO, Vec2::X, 1.0, Vec2::splat(0.5));
        assert!((d - 63.0 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_max_safe_distance_stops_before_wall() {
        let map = test_map();
        let grid = TileCollisionGrid::new(&map);
        let half = Vec2::splat(0.4);
        let origin = Vec2::new(4.5, 5.0);
        // Box right edge at 4.9; wall starts at 6.0, so 1.1 of free travel
        let d = grid.max_safe_distance(origin, Vec2::X, 2.0, half);
        assert!(d <= 1.1);
        assert!(d >= 1.1 - 2.0 / 64.0);
        assert!(!grid.overlaps_solid(origin + Vec2::X * d, half));
    }

    #[test]
    fn test_max_safe_distance_downward() {
        let map = test_map();
        let grid = TileCollisionGrid::new(&map);
        let half = Vec2::new(0.2, 0.4);
        let origin = Vec2::new(3.5, 2.0);
        // Feet at 1.6, floor top at 1.0
        let d = grid.max_safe_distance(origin, Vec2::NEG_Y, 1.0, half);
        assert!(d <= 0.6);
        assert!(d >= 0.6 - 1.0 / 64.0);
    }
}

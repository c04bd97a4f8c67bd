//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registration order for zones)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod grid;
pub mod level;
pub mod movement;
pub mod state;
pub mod tick;
pub mod zone;

pub use collision::{CollisionBox, CollisionResolver, ContactState};
pub use grid::{Tile, TileCollisionGrid, TileMap, TileSource};
pub use level::{Level, LevelFile};
pub use movement::ActorMovement;
pub use state::{ExitTarget, GameEvent, LevelPhase, TickInput};
pub use tick::LevelController;
pub use zone::{ExitZone, HazardZone, Zone};

//! Fixed timestep level tick
//!
//! One `LevelController` per actor per level. Each fixed tick applies, in
//! order: gravity, jump admission, contact reset, horizontal sweep, ground
//! re-probe, vertical sweep, timer update, hazard check, exit check.

use glam::{IVec2, Vec2};

use super::collision::{CollisionBox, CollisionResolver, ContactState};
use super::grid::{TileCollisionGrid, TileSource};
use super::level::Level;
use super::movement::ActorMovement;
use super::state::{GameEvent, LevelPhase, TickInput};
use super::zone::{ExitZone, HazardZone};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Runs the simulation for one actor inside one level
#[derive(Debug, Clone)]
pub struct LevelController {
    level: Level,
    movement: ActorMovement,
    resolver: CollisionResolver,
    /// Authoritative actor position
    position: Vec2,
    phase: LevelPhase,
    dt: f32,
    respawn_ticks: u32,
    time_ticks: u64,
    deaths: u32,
    events: Vec<GameEvent>,
}

impl LevelController {
    /// Validate settings and place the actor at the level's spawn point
    pub fn new(level: Level, settings: &Settings, dt: f32) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ConfigError::NonPositive {
                name: "fixed timestep",
                value: dt,
            });
        }

        let collision_box = CollisionBox::from_settings(&settings.collision)?;
        let respawn_ticks = ((settings.level.respawn_delay / dt).round() as u32).max(1);

        log::info!(
            "Level '{}' loaded: {} solid tiles, {} hazards, {} exits",
            level.name,
            level.tiles.as_ref().map_or(0, |t| t.solid_count()),
            level.hazards.len(),
            level.exits.len()
        );

        let events = vec![GameEvent::LevelStarted {
            name: level.name.clone(),
            play_music: settings.level.play_level_music_on_start,
        }];

        Ok(Self {
            position: level.spawn,
            level,
            movement: ActorMovement::new(settings.movement.clone()),
            resolver: CollisionResolver::new(collision_box),
            phase: LevelPhase::Active,
            dt,
            respawn_ticks,
            time_ticks: 0,
            deaths: 0,
            events,
        })
    }

    pub fn register_hazard(&mut self, hazard: HazardZone) {
        self.level.hazards.push(hazard);
    }

    /// Exits are checked in registration order
    pub fn register_exit(&mut self, exit: ExitZone) {
        self.level.exits.push(exit);
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.movement.velocity()
    }

    pub fn movement(&self) -> &ActorMovement {
        &self.movement
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn contacts(&self) -> ContactState {
        self.resolver.contacts()
    }

    pub fn collision_box(&self) -> &CollisionBox {
        self.resolver.collision_box()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Fixed ticks between death and reappearing
    pub fn respawn_ticks(&self) -> u32 {
        self.respawn_ticks
    }

    fn grid(&self) -> TileCollisionGrid<'_> {
        let tiles = self.level.tiles.as_ref().map(|t| t as &dyn TileSource);
        TileCollisionGrid::from_option(tiles)
    }

    /// Ground probe rectangle (center, half size) for debug drawing
    pub fn ground_probe(&self) -> (Vec2, Vec2) {
        self.resolver.collision_box().ground_probe(self.position)
    }

    /// Occupied cells under the actor's collision box, for debug drawing
    pub fn overlapping_cells(&self) -> Vec<IVec2> {
        let half = self.resolver.collision_box().collision_half_size();
        self.grid().overlapping_cells(self.position, half)
    }

    /// Occupied cells under the actor paired with their world centers
    pub fn overlapping_cell_centers(&self) -> Vec<(IVec2, Vec2)> {
        let grid = self.grid();
        self.overlapping_cells()
            .into_iter()
            .map(|cell| (cell, grid.cell_center_world(cell)))
            .collect()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Input sampling phase. Ignored unless the level is active.
    pub fn handle_input(&mut self, input: &TickInput, dt: f32) {
        if !self.phase.is_active() {
            return;
        }
        self.movement
            .handle_input(input.horizontal, input.jump_pressed, dt);
    }

    /// Advance one fixed tick
    pub fn tick(&mut self) {
        match self.phase {
            LevelPhase::Active => self.simulate(),
            LevelPhase::Respawning { ticks_remaining } => {
                let ticks_remaining = ticks_remaining.saturating_sub(1);
                if ticks_remaining == 0 {
                    self.finish_respawn();
                } else {
                    self.phase = LevelPhase::Respawning { ticks_remaining };
                }
            }
            LevelPhase::ExitingLevel => return,
        }
        self.time_ticks += 1;
    }

    fn simulate(&mut self) {
        let dt = self.dt;

        self.movement.apply_gravity(dt);

        if self.movement.should_jump() {
            self.movement.jump(&mut self.events);
            self.movement.consume_jump_buffer();
        }

        self.resolver.reset_contacts();

        let mut velocity = self.movement.velocity();
        let delta = velocity * dt;

        let tiles = self.level.tiles.as_ref().map(|t| t as &dyn TileSource);
        let grid = TileCollisionGrid::from_option(tiles);

        let mut position = self
            .resolver
            .move_horizontal(&grid, self.position, delta.x, &mut velocity);

        // Walking off a ledge drops ground contact regardless of the vertical sweep
        if !self.resolver.is_ground_below(&grid, position) {
            self.movement.set_grounded(false);
        }

        let (landed_position, grounded) =
            self.resolver
                .move_vertical(&grid, position, delta.y, &mut velocity);
        position = landed_position;
        self.movement.set_grounded(grounded);

        self.movement.set_velocity(velocity);
        self.position = position;
        self.movement.update_timers(dt);

        if self.touching_hazard() {
            self.kill();
        } else if let Some(index) = self.touching_exit() {
            self.exit_level(index);
        }
    }

    fn touching_hazard(&self) -> bool {
        let half = self.resolver.collision_box().half_size();
        self.level
            .hazards
            .iter()
            .any(|h| h.overlaps(self.position, half))
    }

    /// First overlapping exit in registration order
    fn touching_exit(&self) -> Option<usize> {
        let half = self.resolver.collision_box().half_size();
        self.level
            .exits
            .iter()
            .position(|e| e.overlaps(self.position, half))
    }

    /// Start the respawn sequence. No-op unless active.
    pub fn kill(&mut self) {
        if !self.phase.is_active() {
            return;
        }

        self.movement.halt();
        self.deaths += 1;
        self.phase = LevelPhase::Respawning {
            ticks_remaining: self.respawn_ticks,
        };
        log::info!(
            "Died at ({:.2}, {:.2}), respawning in {} ticks",
            self.position.x,
            self.position.y,
            self.respawn_ticks
        );
        self.events.push(GameEvent::Died {
            position: self.position,
        });
    }

    fn finish_respawn(&mut self) {
        self.position = self.level.spawn;
        self.movement.halt();
        self.resolver.reset_contacts();
        self.phase = LevelPhase::Active;
        log::info!("Respawned at ({:.2}, {:.2})", self.position.x, self.position.y);
        self.events.push(GameEvent::Respawned {
            position: self.position,
        });
    }

    fn exit_level(&mut self, index: usize) {
        if !self.phase.is_active() {
            return;
        }
        let target = self.level.exits[index].target.clone();
        self.phase = LevelPhase::ExitingLevel;
        log::info!("Level '{}' exit reached: {:?}", self.level.name, target);
        self.events.push(GameEvent::LevelExit { target });
    }
}

//! End-to-end level runs through the public controller API

use glam::{IVec2, Vec2};
use ledge_runner::Settings;
use ledge_runner::consts::SIM_DT;
use ledge_runner::platform::GameLoop;
use ledge_runner::services::LevelSequence;
use ledge_runner::sim::{
    ExitTarget, GameEvent, Level, LevelController, LevelPhase, TickInput, Tile, TileMap,
};

const LEVEL_1: &str = include_str!("../levels/level_1.json");
const LEVEL_2: &str = include_str!("../levels/level_2.json");

fn controller(level: Level) -> LevelController {
    LevelController::new(level, &Settings::default(), SIM_DT).unwrap()
}

/// Long flat floor on row 0
fn runway() -> Level {
    let mut map = TileMap::new(200, 10, 1.0, Vec2::ZERO);
    map.fill(IVec2::new(0, 0), IVec2::new(199, 0), Tile::Solid);
    Level::new("runway", Vec2::new(2.0, 1.46)).with_tiles(map)
}

/// Floor ends at x = 6 over an empty drop
fn ledge() -> Level {
    let mut map = TileMap::new(30, 10, 1.0, Vec2::ZERO);
    map.fill(IVec2::new(0, 4), IVec2::new(5, 4), Tile::Solid);
    Level::new("ledge", Vec2::new(4.0, 5.46)).with_tiles(map)
}

fn step(c: &mut LevelController, horizontal: f32, jump: bool) {
    c.handle_input(&TickInput::new(horizontal, jump), SIM_DT);
    c.tick();
}

fn jumped(c: &mut LevelController) -> bool {
    c.drain_events().contains(&GameEvent::Jumped)
}

#[test]
fn test_run_speed_approaches_move_speed_without_exceeding_it() {
    let mut c = controller(runway());
    let move_speed = Settings::default().movement.move_speed;

    let mut last = 0.0;
    for _ in 0..40 {
        step(&mut c, 1.0, false);
        let vx = c.velocity().x;
        assert!(vx <= move_speed);
        assert!(vx >= last);
        last = vx;
    }
    assert_eq!(c.velocity().x, move_speed);
    assert!(!c.contacts().left && !c.contacts().right);
}

#[test]
fn test_fall_speed_settles_at_terminal_velocity() {
    let mut c = controller(Level::new("void", Vec2::ZERO));
    for _ in 0..100 {
        c.tick();
        assert!(c.velocity().y >= -20.0);
    }
    assert_eq!(c.velocity().y, -20.0);
}

#[test]
fn test_run_into_pit_respawns_after_delay() {
    let mut c = controller(Level::from_json(LEVEL_1).unwrap());
    c.drain_events();

    let mut ticks = 0;
    while c.phase().is_active() {
        step(&mut c, 1.0, false);
        ticks += 1;
        assert!(ticks < 500, "never reached the pit");
    }
    assert_eq!(c.deaths(), 1);
    assert!(c.position().x > 7.0);

    let respawn_ticks = c.respawn_ticks();
    assert_eq!(respawn_ticks, 20);
    for _ in 0..respawn_ticks - 1 {
        step(&mut c, 1.0, true);
        assert!(matches!(c.phase(), LevelPhase::Respawning { .. }));
    }
    step(&mut c, 1.0, false);

    assert_eq!(c.phase(), LevelPhase::Active);
    assert_eq!(c.position(), Vec2::new(1.5, 1.46));
    // Input taken during this tick's sampling was dropped while respawning
    assert_eq!(c.velocity(), Vec2::ZERO);

    let events = c.drain_events();
    assert!(matches!(events.first(), Some(GameEvent::Died { .. })));
    assert!(matches!(events.last(), Some(GameEvent::Respawned { .. })));
    assert!(!events.contains(&GameEvent::Jumped));
}

#[test]
fn test_standing_at_pit_edge_is_safe() {
    let mut level = Level::from_json(LEVEL_1).unwrap();
    // Last floor cell before the pit spans x 7..8
    level.spawn = Vec2::new(8.0, 1.46);
    let mut c = controller(level);

    for _ in 0..50 {
        step(&mut c, 0.0, false);
    }
    assert_eq!(c.phase(), LevelPhase::Active);
    assert_eq!(c.deaths(), 0);
    assert!(c.position().y > 1.4);
}

#[test]
fn test_only_first_of_two_overlapping_exits_fires() {
    let json = r#####"{
        "name": "exits",
        "rows": ["....", "####"],
        "spawn": [2.0, 1.46],
        "exits": [
            { "center": [2.0, 1.5], "next_level": "first" },
            { "center": [2.0, 1.5], "next_level": "second" }
        ]
    }"#####;
    let mut c = controller(Level::from_json(json).unwrap());
    c.drain_events();

    for _ in 0..5 {
        step(&mut c, 0.0, false);
    }
    assert_eq!(c.phase(), LevelPhase::ExitingLevel);
    assert_eq!(
        c.drain_events(),
        vec![GameEvent::LevelExit {
            target: ExitTarget::Named("first".into())
        }]
    );
}

#[test]
fn test_coyote_jump_just_after_leaving_ledge() {
    let mut c = controller(ledge());
    for _ in 0..10 {
        step(&mut c, 0.0, false);
    }

    // Run until the box has fully cleared the edge
    let half_width = c.collision_box().collision_half_size().x;
    while c.position().x - half_width <= 6.0 {
        step(&mut c, 1.0, false);
    }
    assert!(!c.movement().is_grounded());
    assert!(c.movement().grounded_timer() > 0.0);
    c.drain_events();

    step(&mut c, 1.0, true);
    assert!(jumped(&mut c));
    assert!(c.velocity().y > 0.0);
}

#[test]
fn test_no_jump_once_coyote_time_has_run_out() {
    let mut c = controller(ledge());
    for _ in 0..10 {
        step(&mut c, 0.0, false);
    }

    let half_width = c.collision_box().collision_half_size().x;
    while c.position().x - half_width <= 6.0 {
        step(&mut c, 1.0, false);
    }
    while c.movement().grounded_timer() > 0.0 {
        step(&mut c, 0.0, false);
    }
    c.drain_events();

    step(&mut c, 0.0, true);
    assert!(!jumped(&mut c));
    assert!(c.velocity().y < 0.0);
}

/// Ticks until the first landing, found on a throwaway copy
fn ticks_until_landing(c: &LevelController) -> u32 {
    let mut copy = c.clone();
    let mut ticks = 0;
    loop {
        step(&mut copy, 0.0, false);
        ticks += 1;
        if copy.contacts().bottom {
            return ticks;
        }
        assert!(ticks < 200, "never landed");
    }
}

#[test]
fn test_jump_pressed_just_before_landing_is_buffered() {
    let mut level = runway();
    level.spawn = Vec2::new(2.0, 4.0);
    let mut c = controller(level);
    let landing = ticks_until_landing(&c);
    assert!(landing > 3);

    for _ in 0..landing - 2 {
        step(&mut c, 0.0, false);
    }
    c.drain_events();

    step(&mut c, 0.0, true);
    step(&mut c, 0.0, false);
    assert!(c.contacts().bottom);
    assert!(!jumped(&mut c));

    step(&mut c, 0.0, false);
    assert!(jumped(&mut c));
}

#[test]
fn test_jump_pressed_too_early_expires() {
    let mut level = runway();
    level.spawn = Vec2::new(2.0, 4.0);
    let mut c = controller(level);
    let landing = ticks_until_landing(&c);
    assert!(landing > 6);

    for _ in 0..landing - 6 {
        step(&mut c, 0.0, false);
    }
    c.drain_events();

    step(&mut c, 0.0, true);
    for _ in 0..8 {
        step(&mut c, 0.0, false);
    }
    assert!(!jumped(&mut c));
}

#[test]
fn test_bundled_levels_load_and_sequence() {
    let first = Level::from_json(LEVEL_1).unwrap();
    let second = Level::from_json(LEVEL_2).unwrap();

    assert_eq!(first.name, "Level_1");
    let tiles = first.tiles.as_ref().unwrap();
    assert_eq!((tiles.width(), tiles.height()), (24, 8));
    assert_eq!(first.hazards.len(), 1);
    assert_eq!(first.exits[0].target, ExitTarget::Next);

    assert_eq!(second.exits.len(), 2);
    assert!(!second.exits[1].zone.enabled);
    assert_eq!(second.exits[1].target, ExitTarget::Named("Level_1".into()));

    let mut sequence = LevelSequence::new(vec![first, second]).unwrap();
    assert_eq!(sequence.resolve(&ExitTarget::Next).unwrap().name, "Level_2");
    assert_eq!(sequence.resolve(&ExitTarget::Next).unwrap().name, "Level_1");
}

#[test]
fn test_game_loop_drives_controller_at_fixed_rate() {
    let mut c = controller(runway());
    let mut game_loop = GameLoop::new(SIM_DT);

    let mut total = 0;
    for _ in 0..60 {
        total += game_loop.frame(&mut c, 1.0 / 60.0, TickInput::new(1.0, false));
    }
    // One second of frames buys about fifty ticks
    assert!((49..=50).contains(&total));
    assert_eq!(c.time_ticks(), total as u64);
    assert!(c.position().x > 2.0);
}

//! Ledge Runner entry point
//!
//! Headless driver: loads settings and the bundled levels, then plays them
//! with a scripted input track, logging every level transition.

use std::path::PathBuf;

use ledge_runner::Settings;
use ledge_runner::animation::AnimationController;
use ledge_runner::audio::{AudioManager, LogBackend};
use ledge_runner::camera::CameraFollow;
use ledge_runner::consts::SIM_DT;
use ledge_runner::platform::GameLoop;
use ledge_runner::services::{Dispatch, LevelSequence, dispatch_events};
use ledge_runner::sim::{Level, LevelController, TickInput};

const BUNDLED_LEVELS: [&str; 2] = [
    include_str!("../levels/level_1.json"),
    include_str!("../levels/level_2.json"),
];

/// Simulated frame rate of the headless run
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const RUN_SECONDS: f32 = 60.0;

/// Hold right, tap jump twice a second
fn scripted_input(frame: u32) -> TickInput {
    TickInput::new(1.0, frame % 30 == 0)
}

fn main() {
    env_logger::init();
    log::info!("Ledge Runner (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };

    let levels = BUNDLED_LEVELS
        .iter()
        .map(|json| Level::from_json(json))
        .collect::<Result<Vec<_>, _>>()?;
    let mut sequence = LevelSequence::new(levels)?;

    let mut audio = AudioManager::new(Box::new(LogBackend), settings.audio.clone());
    let mut animation = AnimationController::new(settings.animation.clone());
    let mut controller = LevelController::new(sequence.current().clone(), &settings, SIM_DT)?;
    let mut camera = CameraFollow::new(
        controller.position() + glam::Vec2::new(0.0, 2.0),
        controller.position(),
        settings.camera.smooth_time,
    );
    let mut game_loop = GameLoop::new(SIM_DT);

    let total_frames = (RUN_SECONDS / FRAME_DT) as u32;
    let mut levels_cleared = 0;

    for frame in 0..total_frames {
        game_loop.frame(&mut controller, FRAME_DT, scripted_input(frame));
        camera.update(controller.position(), FRAME_DT);
        let params = animation.update(&controller);
        log::trace!("frame {frame}: {params:?} camera {:?}", camera.position());

        if let Dispatch::LoadLevel(target) =
            dispatch_events(controller.drain_events(), &mut audio, &mut animation)
        {
            levels_cleared += 1;
            let level = sequence.resolve(&target)?;
            controller = LevelController::new(level, &settings, SIM_DT)?;
            camera = CameraFollow::new(
                camera.position(),
                controller.position(),
                settings.camera.smooth_time,
            );
        }
    }

    log::info!(
        "Finished: {} levels cleared, {} deaths in the current level, now on '{}'",
        levels_cleared,
        controller.deaths(),
        sequence.current().name
    );
    Ok(())
}

//! Arena Sim - headless campaign runner
//!
//! Run with: `cargo run --bin arena_sim -- [--seed N] [--levels path.json] [--frames N]`
//!
//! Plays the campaign at 60 Hz with a scripted bot: it turns toward the
//! nearest live enemy, holds the trigger and strafes back and forth. Mode
//! transitions, wave spawns and level results are logged (`RUST_LOG=debug`
//! for kills and dropped shots).

use std::env;

use glam::Vec2;
use manor_arena_engine::CameraRig;
use manor_arena_engine::game::config::{LevelDescriptor, builtin_levels, load_levels};
use manor_arena_engine::game::types::wrap_angle;
use manor_arena_engine::game::{GameConfig, GameController, GameMode, GameRng, HeadlessFrontend};
use manor_arena_engine::input::InputFrame;

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60 * 10;
/// Seconds per strafe direction
const STRAFE_PERIOD: f32 = 1.5;
/// Largest look delta the bot feeds per frame
const MAX_LOOK_STEP: f32 = 40.0;
const MAX_RETRIES: u32 = 3;

struct Args {
    seed: Option<u64>,
    levels: Option<String>,
    frames: u64,
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| a.as_str() != flag)
        .nth(1)
        .map(String::as_str)
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let seed = flag_value(&args, "--seed").and_then(|s| match s.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring invalid --seed {s:?}");
            None
        }
    });
    let frames = flag_value(&args, "--frames")
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    Args {
        seed,
        levels: flag_value(&args, "--levels").map(str::to_string),
        frames,
    }
}

fn level_table(path: Option<&str>) -> Vec<LevelDescriptor> {
    let Some(path) = path else {
        return builtin_levels();
    };
    match load_levels(path) {
        Ok(levels) => {
            log::info!("loaded {} levels from {path}", levels.len());
            levels
        }
        Err(e) => {
            log::warn!("could not load levels from {path}: {e}; using built-in campaign");
            builtin_levels()
        }
    }
}

/// One frame of bot input for the current world state.
fn bot_input(game: &GameController<HeadlessFrontend>, sim_time: f32) -> InputFrame {
    let player = game.player().position;
    let target = game
        .director()
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            a.position
                .distance_squared(player)
                .total_cmp(&b.position.distance_squared(player))
        });

    let strafe = if (sim_time / STRAFE_PERIOD) as u32 % 2 == 0 {
        1.0
    } else {
        -1.0
    };

    let Some(enemy) = target else {
        return InputFrame {
            movement: Vec2::new(strafe * 0.5, 0.0),
            ..Default::default()
        };
    };

    // Camera forward is (-sin yaw, 0, cos yaw)
    let to_enemy = enemy.position - player;
    let desired_yaw = (-to_enemy.x).atan2(to_enemy.z);
    let yaw_error = wrap_angle(desired_yaw - game.frontend().yaw());
    let look = (yaw_error / game.config.look_sensitivity).clamp(-MAX_LOOK_STEP, MAX_LOOK_STEP);

    InputFrame {
        movement: Vec2::new(strafe * 0.6, 0.2),
        aim_delta: Vec2::new(look, 0.0),
        shooting: yaw_error.abs() < 0.2,
        ..Default::default()
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = parse_args();
    let rng = match args.seed {
        Some(seed) => GameRng::from_seed(seed),
        None => GameRng::from_entropy(),
    };
    let levels = level_table(args.levels.as_deref());

    let mut game = GameController::new(GameConfig::default(), levels, HeadlessFrontend::new(), rng);
    game.start();

    let mut retries = 0;
    let mut sim_time = 0.0_f32;
    for _ in 0..args.frames {
        match game.mode() {
            GameMode::Playing => {
                let input = bot_input(&game, sim_time);
                let frontend = game.frontend_mut();
                frontend.push_script(input);
                frontend.apply_next_script();
            }
            GameMode::LevelComplete => {
                game.next_level();
            }
            GameMode::GameOver if retries < MAX_RETRIES => {
                retries += 1;
                log::info!("retry {retries}/{MAX_RETRIES}");
                game.retry();
            }
            GameMode::GameOver | GameMode::Victory | GameMode::Menu => break,
            GameMode::Paused => {
                game.resume();
            }
        }
        game.frame(FRAME_DT);
        sim_time += FRAME_DT;
    }

    let stats = game.stats();
    println!(
        "final mode: {:?}, level {} '{}', run kills: {}, sim time {:.1}s",
        game.mode(),
        stats.level,
        stats.name,
        game.total_killed(),
        sim_time
    );
}

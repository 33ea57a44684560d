//! Vampire Arena headless runner
//!
//! Plays a full match with a simple autopilot and logs what happens.
//!
//! Usage: `vampire-arena [tuning.json] [seed]`

use glam::Vec2;

use vampire_arena::Tuning;
use vampire_arena::consts::TICKS_PER_SECOND;
use vampire_arena::sim::{GameState, MapBounds, SimTime, TickInput, tick};

/// Map used by the runner
const MAP_WIDTH: f32 = 1920.0;
const MAP_HEIGHT: f32 = 1440.0;

/// Give up after ten simulated minutes
const MAX_TICKS: u64 = TICKS_PER_SECOND * 600;

/// Distance (between sprite centres) at which the autopilot stabs
const STRIKE_RANGE: f32 = 90.0;

fn main() {
    env_logger::init();
    log::info!("Vampire Arena (headless) starting...");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {e}");
            std::process::exit(2);
        }
        None => 0x5EED,
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut state = GameState::new(seed, MapBounds::new(MAP_WIDTH, MAP_HEIGHT), tuning);

    for t in 0..MAX_TICKS {
        let input = autopilot(&state, t);
        tick(&mut state, &input, SimTime::from_tick(t));

        for event in state.drain_events() {
            log::info!("[tick {}] {:?}", state.time_ticks, event);
        }
        if state.rounds.is_match_over() {
            break;
        }
    }

    match state.rounds.winner() {
        Some(side) => log::info!(
            "{} wins {} - {} after {} ticks",
            side.name(),
            state.rounds.vampire_wins,
            state.rounds.penguin_wins,
            state.time_ticks
        ),
        None => log::warn!("No winner after {} ticks", state.time_ticks),
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => log::debug!("Final frame:\n{json}"),
        Err(e) => log::warn!("Could not serialize final frame: {e}"),
    }
}

/// Press through menus, walk at the penguin and stab when close
fn autopilot(state: &GameState, t: u64) -> TickInput {
    if state.rounds.ui_control().is_some() {
        return TickInput {
            confirm: true,
            ..Default::default()
        };
    }
    if !state.enemy.visible || !state.player.is_alive() {
        return TickInput::default();
    }

    let half = Vec2::splat(state.tuning.sprite_size / 2.0);
    let delta = (state.enemy.pos + half) - (state.player.pos + half);
    let mut input = TickInput::default();

    // Step along the dominant axis so facing points at the penguin
    if delta.x.abs() >= delta.y.abs() {
        input.left = delta.x < 0.0;
        input.right = delta.x > 0.0;
    } else {
        input.up = delta.y < 0.0;
        input.down = delta.y > 0.0;
    }
    input.attack = delta.length() < STRIKE_RANGE && t % 2 == 0;
    input
}

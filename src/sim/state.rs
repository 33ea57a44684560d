//! Game state and core simulation types
//!
//! One `GameState` owns everything the simulation mutates. Only
//! [`crate::sim::tick`] advances it, once per fixed step.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::MapBounds;
use super::combat::AttackHitbox;
use super::enemy::{Enemy, SpawnSide};
use super::player::{Facing, Player};
use super::round::{MatchState, Side};
use super::view::FrameView;
use crate::{Tuning, clamp_upper};

/// Something noteworthy that happened during a tick (audio, HUD, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    AttackStarted { facing: Facing },
    EnemyHit { health_left: u32 },
    EnemyKilled,
    PlayerKilled,
    EnemyVanished,
    EnemyReappeared { side: SpawnSide },
    RoundWon { winner: Side },
    MatchWon { winner: Side },
}

/// Top-left of the view, following the vampire
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Centre on `target`, never showing past the map edge
    pub fn follow(&mut self, target: Vec2, tuning: &Tuning, bounds: &MapBounds) {
        self.pos = Vec2::new(
            clamp_upper(
                target.x - tuning.screen_width / 2.0,
                bounds.width - tuning.screen_width,
            ),
            clamp_upper(
                target.y - tuning.screen_height / 2.0,
                bounds.height - tuning.screen_height,
            ),
        );
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub bounds: MapBounds,
    pub player: Player,
    pub enemy: Enemy,
    /// Live attack hitboxes, oldest first
    pub attacks: Vec<AttackHitbox>,
    pub rounds: MatchState,
    pub camera: Camera,
    /// Successful strikes this round
    pub hits_landed: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the caller last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a match waiting for its first start
    pub fn new(seed: u64, bounds: MapBounds, tuning: Tuning) -> Self {
        let spawn = spawn_point(&bounds, &tuning);
        let mut state = Self {
            seed,
            player: Player::new(spawn),
            enemy: Enemy::new(&tuning),
            attacks: Vec::new(),
            rounds: MatchState::new(tuning.match_target),
            camera: Camera::default(),
            hits_landed: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            bounds,
        };
        state.camera.follow(state.player.pos, &state.tuning, &state.bounds);
        state
    }

    /// Start a round: vampire to the map centre, penguin reset just off-screen
    pub fn respawn(&mut self) {
        self.player = Player::new(spawn_point(&self.bounds, &self.tuning));
        self.attacks.clear();
        self.hits_landed = 0;

        self.enemy.reset(&self.tuning);
        let side = SpawnSide::random(&mut self.rng);
        self.enemy
            .place_near(self.player.pos, side, &self.tuning, &self.bounds);

        self.camera
            .follow(self.player.pos, &self.tuning, &self.bounds);
        self.rounds.begin_round();
        self.events.push(GameEvent::RoundStarted {
            round: self.rounds.round,
        });
    }

    /// Zero the scoreboard and start round one
    pub fn start_new_match(&mut self) {
        log::info!("New match (first to {})", self.rounds.target);
        self.rounds.reset_scores();
        self.respawn();
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Plain-data view of the current frame for the renderer
    pub fn snapshot(&self) -> FrameView {
        FrameView::capture(self)
    }
}

/// Vampire start position: sprite centred on the map
fn spawn_point(bounds: &MapBounds, tuning: &Tuning) -> Vec2 {
    let half = Vec2::splat(tuning.sprite_size / 2.0);
    bounds.clamp(bounds.center() - half, tuning.sprite_size)
}

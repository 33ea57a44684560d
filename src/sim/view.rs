//! Per-frame output for the renderer
//!
//! Everything a draw pass needs, as plain serializable data.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::enemy::{EnemyAnim, EnemyMode};
use super::player::Facing;
use super::round::{RoundPhase, UiControl};
use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub facing: Facing,
    /// Row in the vampire sheets for `facing`
    pub sheet_row: u32,
    pub frame: u32,
    pub alive: bool,
    pub attacking: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub visible: bool,
    pub anim: EnemyAnim,
    pub frame: u32,
    pub mode: EnemyMode,
    pub health: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub vampire_wins: u32,
    pub penguin_wins: u32,
    pub target: u32,
    pub round: u32,
    pub phase: RoundPhase,
    pub match_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub camera: Vec2,
    pub player: PlayerView,
    pub enemy: EnemyView,
    /// Live attack hitboxes (debug overlay)
    pub attacks: Vec<Rect>,
    pub score: ScoreView,
    /// Button to draw, if any
    pub ui: Option<UiControl>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let enemy = &state.enemy;
        let rounds = &state.rounds;

        Self {
            tick: state.time_ticks,
            camera: state.camera.pos,
            player: PlayerView {
                pos: player.pos,
                facing: player.facing,
                sheet_row: player.facing.sheet_row(),
                frame: player.anim.frame,
                alive: player.is_alive(),
                attacking: player.is_attacking(),
            },
            enemy: EnemyView {
                pos: enemy.pos,
                visible: enemy.visible,
                anim: enemy.anim_state,
                frame: enemy.anim.frame,
                mode: enemy.mode,
                health: enemy.health,
            },
            attacks: state.attacks.iter().map(|a| a.rect).collect(),
            score: ScoreView {
                vampire_wins: rounds.vampire_wins,
                penguin_wins: rounds.penguin_wins,
                target: rounds.target,
                round: rounds.round,
                phase: rounds.phase,
                match_over: rounds.is_match_over(),
            },
            ui: rounds.ui_control(),
        }
    }
}

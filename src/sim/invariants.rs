//! Game invariants - sanity checks that detect bugs.
//!
//! The simulation prevents these by construction (clamping, unsigned
//! health, enum-encoded states). If any check fires, a tick has a bug.

use thiserror::Error;

use super::player::PlayerState;
use super::round::RoundPhase;
use super::state::GameState;

/// Invariant violation error.
#[derive(Debug, Clone, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let tuning = &state.tuning;
    let sprite = tuning.sprite_size;

    // Positions stay on the map
    if !state.bounds.contains(state.player.pos, sprite) {
        violations.push(InvariantViolation::new(format!(
            "Vampire at {:?} is outside the map",
            state.player.pos
        )));
    }
    if !state.bounds.contains(state.enemy.pos, sprite) {
        violations.push(InvariantViolation::new(format!(
            "Penguin at {:?} is outside the map",
            state.enemy.pos
        )));
    }

    // Frame indices fit the active clip
    let player_clip = state.player.clip(tuning);
    if state.player.anim.frame >= player_clip.frames {
        violations.push(InvariantViolation::new(format!(
            "Vampire frame {} out of range for {:?} ({} frames)",
            state.player.anim.frame, state.player.state, player_clip.frames
        )));
    }
    let enemy_clip = state.enemy.clip(tuning);
    if state.enemy.anim.frame >= enemy_clip.frames {
        violations.push(InvariantViolation::new(format!(
            "Penguin frame {} out of range for {:?} ({} frames)",
            state.enemy.anim.frame, state.enemy.anim_state, enemy_clip.frames
        )));
    }

    // Attack latch
    if let PlayerState::Attacking { ticks_left } = state.player.state {
        if ticks_left == 0 || ticks_left > tuning.attack_latch_ticks() {
            violations.push(InvariantViolation::new(format!(
                "Attack latch {ticks_left} outside 1..={}",
                tuning.attack_latch_ticks()
            )));
        }
    }

    // Health and death agree
    if state.enemy.health > tuning.enemy_health {
        violations.push(InvariantViolation::new(format!(
            "Penguin health {} exceeds starting health {}",
            state.enemy.health, tuning.enemy_health
        )));
    }
    if state.enemy.is_dying() != (state.enemy.health == 0) {
        violations.push(InvariantViolation::new(format!(
            "Penguin health {} inconsistent with {:?}",
            state.enemy.health, state.enemy.anim_state
        )));
    }

    // Round bookkeeping
    let rounds = &state.rounds;
    if rounds.pending_winner.is_some() && (!rounds.is_active() || state.player.is_alive()) {
        violations.push(InvariantViolation::new(format!(
            "Pending winner {:?} in {:?} with vampire alive={}",
            rounds.pending_winner,
            rounds.phase,
            state.player.is_alive()
        )));
    }
    if !rounds.is_active() && !state.attacks.is_empty() {
        violations.push(InvariantViolation::new(format!(
            "{} attack hitboxes alive in {:?}",
            state.attacks.len(),
            rounds.phase
        )));
    }
    let target_reached = rounds.vampire_wins >= rounds.target || rounds.penguin_wins >= rounds.target;
    if target_reached != (rounds.phase == RoundPhase::MatchOver) {
        violations.push(InvariantViolation::new(format!(
            "Score {}-{} (target {}) inconsistent with {:?}",
            rounds.vampire_wins, rounds.penguin_wins, rounds.target, rounds.phase
        )));
    }

    violations
}

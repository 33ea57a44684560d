//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a tick
//! the steps always run in this order:
//!
//! 1. Menu gate: outside an active round only start/respawn/new-match input
//!    is handled
//! 2. Vampire movement, attack trigger, latch and animation
//! 3. Camera follow
//! 4. Penguin AI (teleport cycle, animation, steering)
//! 5. Penguin pose from contact with the vampire
//! 6. Contact kill
//! 7. Body pushback
//! 8. Attack resolution
//! 9. Round end checks
//! 10. Prune expired hitboxes

use glam::Vec2;

use super::collision::{Rect, resolve_pushback};
use super::combat::{HitOutcome, apply_attack};
use super::enemy::Teleport;
use super::round::{RoundPhase, Side, UiControlKind};
use super::state::{GameEvent, GameState};
use super::time::SimTime;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Attack key went down this tick
    pub attack: bool,
    /// Confirm key went down this tick (start / respawn / new match)
    pub confirm: bool,
    /// Pointer click this tick, in screen coordinates
    pub click: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
///
/// `now` is read once by the caller and used for every cooldown,
/// invulnerability and hitbox-lifetime check in this tick.
pub fn tick(state: &mut GameState, input: &TickInput, now: SimTime) {
    state.time_ticks += 1;

    if !state.rounds.is_active() {
        handle_menu(state, input);
        return;
    }

    if let Some(hitbox) = state
        .player
        .update(input, now, &state.tuning, &state.bounds)
    {
        state.attacks.push(hitbox);
        state.events.push(GameEvent::AttackStarted {
            facing: state.player.facing,
        });
    }

    state
        .camera
        .follow(state.player.pos, &state.tuning, &state.bounds);

    update_enemy(state);
    resolve_contact(state);
    resolve_attacks(state, now);
    check_round_end(state);

    state.attacks.retain(|a| !a.is_expired(now));

    #[cfg(debug_assertions)]
    for violation in super::invariants::check_invariants(state) {
        log::error!("{violation}");
    }
}

/// Start, respawn or new match via the confirm key or a button click
fn handle_menu(state: &mut GameState, input: &TickInput) {
    let Some(control) = state.rounds.ui_control() else {
        return;
    };
    if !input.confirm && !control.is_clicked(input.click) {
        return;
    }

    match control.kind {
        UiControlKind::Start | UiControlKind::Respawn => state.respawn(),
        UiControlKind::NewMatch => state.start_new_match(),
    }
}

fn update_enemy(state: &mut GameState) {
    let player_pos = state.player.pos;
    let teleport = state
        .enemy
        .update(player_pos, &state.tuning, &state.bounds, &mut state.rng);

    match teleport {
        Some(Teleport::Vanished) => {
            log::debug!("Penguin vanished");
            state.events.push(GameEvent::EnemyVanished);
        }
        Some(Teleport::Reappeared(side)) => {
            log::debug!("Penguin reappeared {:?} of the vampire", side);
            state.events.push(GameEvent::EnemyReappeared { side });
        }
        None => {}
    }
}

/// Body contact between the tight colliders: pose, kill and pushback
fn resolve_contact(state: &mut GameState) {
    let sprite = state.tuning.sprite_size;
    let touching = state.enemy.visible
        && state
            .player
            .collider(sprite)
            .overlaps(&state.enemy.collider(sprite));

    state.enemy.set_engaged(touching);
    if !touching {
        return;
    }

    if state.player.is_alive() && state.enemy.is_lethal() {
        state.player.kill();
        state.rounds.pending_winner = Some(Side::Penguin);
        state.events.push(GameEvent::PlayerKilled);
        log::info!("Vampire caught by the penguin");
    }

    // Shove the penguin only; the vampire holds its ground
    if !state.enemy.is_dying() {
        let mut body = Rect::sprite(state.enemy.pos, sprite);
        if resolve_pushback(&mut body, &Rect::sprite(state.player.pos, sprite)) {
            state.enemy.pos = state.bounds.clamp(body.origin(), sprite);
        }
    }
}

fn resolve_attacks(state: &mut GameState, now: SimTime) {
    if !state.player.is_alive() || !state.enemy.visible || state.enemy.health == 0 {
        return;
    }

    for hitbox in &mut state.attacks {
        match apply_attack(hitbox, &mut state.enemy, now, &state.tuning, &state.bounds) {
            HitOutcome::Miss => {}
            HitOutcome::Wounded { health_left } => {
                state.hits_landed += 1;
                state.events.push(GameEvent::EnemyHit { health_left });
            }
            HitOutcome::Killed => {
                state.hits_landed += 1;
                state.events.push(GameEvent::EnemyKilled);
            }
        }
    }
}

/// Score the round once the loser's death animation has finished
fn check_round_end(state: &mut GameState) {
    if state.enemy.visible && state.enemy.death_finished(&state.tuning) {
        state.enemy.visible = false;
        end_round(state, Side::Vampire);
        return;
    }

    if state.rounds.pending_winner == Some(Side::Penguin)
        && state.player.death_finished(&state.tuning)
    {
        state.enemy.calm();
        end_round(state, Side::Penguin);
    }
}

fn end_round(state: &mut GameState, winner: Side) {
    state.attacks.clear();
    let phase = state.rounds.award(winner);
    state.events.push(GameEvent::RoundWon { winner });
    if phase == RoundPhase::MatchOver {
        state.events.push(GameEvent::MatchWon { winner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::collision::MapBounds;
    use crate::sim::enemy::{EnemyAnim, EnemyMode};
    use crate::sim::player::Facing;

    fn started(tuning: Tuning) -> GameState {
        let mut state = GameState::new(12345, MapBounds::new(3000.0, 3000.0), tuning);
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, SimTime::ZERO);
        assert_eq!(state.rounds.phase, RoundPhase::RoundActive);
        state.drain_events();
        state
    }

    /// Run idle ticks until the round leaves `RoundActive`
    fn run_until_round_over(state: &mut GameState, from_tick: u64) -> u64 {
        let mut t = from_tick;
        while state.rounds.is_active() {
            assert!(t < from_tick + 1000, "round never ended");
            tick(state, &TickInput::default(), SimTime::from_tick(t));
            t += 1;
        }
        t
    }

    #[test]
    fn test_start_by_click_only_inside_button() {
        let mut state = GameState::new(1, MapBounds::new(2000.0, 2000.0), Tuning::default());
        let miss = TickInput {
            click: Some(Vec2::new(10.0, 10.0)),
            ..Default::default()
        };
        tick(&mut state, &miss, SimTime::ZERO);
        assert_eq!(state.rounds.phase, RoundPhase::NotStarted);

        let hit = TickInput {
            click: Some(Vec2::new(320.0, 220.0)),
            ..Default::default()
        };
        tick(&mut state, &hit, SimTime::ZERO);
        assert_eq!(state.rounds.phase, RoundPhase::RoundActive);
        assert_eq!(state.rounds.round, 1);
    }

    #[test]
    fn test_no_gameplay_before_start() {
        let mut state = GameState::new(1, MapBounds::new(2000.0, 2000.0), Tuning::default());
        let pos = state.player.pos;
        let input = TickInput {
            right: true,
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &input, SimTime::ZERO);
        assert_eq!(state.player.pos, pos);
        assert!(state.attacks.is_empty());
    }

    #[test]
    fn test_kill_penguin_scores_after_death_animation() {
        let mut tuning = Tuning::default();
        tuning.enemy_health = 1;
        let mut state = started(tuning);

        state.player.facing = Facing::Right;
        state.enemy.pos = state.player.pos + Vec2::new(100.0, 0.0);
        let attack = TickInput {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, SimTime::from_tick(1));

        assert_eq!(state.enemy.health, 0);
        assert_eq!(state.enemy.anim_state, EnemyAnim::Death);
        assert_eq!(state.hits_landed, 1);
        // Not scored until the death animation finishes
        assert_eq!(state.rounds.vampire_wins, 0);
        assert!(state.rounds.is_active());

        let frozen = state.enemy.pos;
        let t = run_until_round_over(&mut state, 2);
        assert_eq!(state.enemy.pos, frozen);
        assert_eq!(state.rounds.phase, RoundPhase::RoundEnded);
        assert_eq!((state.rounds.vampire_wins, state.rounds.penguin_wins), (1, 0));
        assert!(!state.enemy.visible);
        assert!(state.attacks.is_empty());

        // Waiting for respawn: nothing else is scored
        for extra in 0..100 {
            tick(&mut state, &TickInput::default(), SimTime::from_tick(t + extra));
        }
        assert_eq!((state.rounds.vampire_wins, state.rounds.penguin_wins), (1, 0));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyKilled));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::RoundWon { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_chasing_contact_kills_vampire() {
        let mut state = started(Tuning::default());
        state.enemy.pos = state.player.pos + Vec2::new(30.0, 0.0);

        tick(&mut state, &TickInput::default(), SimTime::from_tick(1));
        assert!(!state.player.is_alive());
        assert_eq!(state.rounds.pending_winner, Some(Side::Penguin));

        run_until_round_over(&mut state, 2);
        assert_eq!(state.rounds.phase, RoundPhase::RoundEnded);
        assert_eq!((state.rounds.vampire_wins, state.rounds.penguin_wins), (0, 1));
        assert_eq!(state.rounds.pending_winner, None);
        assert_eq!(state.enemy.anim_state, EnemyAnim::Idle);
    }

    #[test]
    fn test_fleeing_contact_only_pushes() {
        let mut state = started(Tuning::default());
        state.enemy.mode = EnemyMode::Flee;
        state.enemy.pos = state.player.pos + Vec2::new(30.0, 0.0);

        tick(&mut state, &TickInput::default(), SimTime::from_tick(1));
        assert!(state.player.is_alive());
        assert_eq!(state.enemy.anim_state, EnemyAnim::Attack);

        // Flee step to +32.5, then shoved right by the 63.5 overlap
        let sprite = state.tuning.sprite_size;
        assert_eq!(state.enemy.pos.x, state.player.pos.x + sprite);
        assert_eq!(state.enemy.pos.y, state.player.pos.y);
        assert!(!Rect::sprite(state.enemy.pos, sprite).overlaps(&Rect::sprite(state.player.pos, sprite)));
    }

    #[test]
    fn test_attack_spawns_and_prunes_hitbox() {
        let mut state = started(Tuning::default());
        let attack = TickInput {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, SimTime::from_millis(1000));
        assert_eq!(state.attacks.len(), 1);
        assert!(state.player.is_attacking());

        tick(&mut state, &TickInput::default(), SimTime::from_millis(1140));
        assert_eq!(state.attacks.len(), 1);
        tick(&mut state, &TickInput::default(), SimTime::from_millis(1141));
        assert!(state.attacks.is_empty());
    }

    #[test]
    fn test_new_match_after_match_over() {
        let mut tuning = Tuning::default();
        tuning.match_target = 1;
        let mut state = started(tuning);
        state.enemy.pos = state.player.pos + Vec2::new(30.0, 0.0);
        tick(&mut state, &TickInput::default(), SimTime::from_tick(1));
        let t = run_until_round_over(&mut state, 2);

        assert_eq!(state.rounds.phase, RoundPhase::MatchOver);
        assert_eq!(state.rounds.winner(), Some(Side::Penguin));
        assert!(state.drain_events().contains(&GameEvent::MatchWon {
            winner: Side::Penguin
        }));

        // Gameplay is frozen
        let pos = state.player.pos;
        let walk = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &walk, SimTime::from_tick(t));
        assert_eq!(state.player.pos, pos);

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, SimTime::from_tick(t + 1));
        assert_eq!(state.rounds.phase, RoundPhase::RoundActive);
        assert_eq!((state.rounds.vampire_wins, state.rounds.penguin_wins), (0, 0));
        assert_eq!(state.enemy.health, state.tuning.enemy_health);
        assert!(state.player.is_alive());
    }

    #[test]
    fn test_respawn_from_round_ended() {
        let mut state = started(Tuning::default());
        state.enemy.pos = state.player.pos + Vec2::new(30.0, 0.0);
        tick(&mut state, &TickInput::default(), SimTime::from_tick(1));
        let t = run_until_round_over(&mut state, 2);
        assert!(state.rounds.awaiting_respawn());

        let click = TickInput {
            click: Some(Vec2::new(300.0, 210.0)),
            ..Default::default()
        };
        tick(&mut state, &click, SimTime::from_tick(t));
        assert!(state.rounds.is_active());
        assert_eq!(state.rounds.round, 2);
        assert_eq!(state.rounds.penguin_wins, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let script: Vec<TickInput> = (0..900)
            .map(|i| TickInput {
                up: i % 7 < 3,
                right: i % 11 < 5,
                attack: i % 13 == 0,
                confirm: i % 97 == 0,
                ..Default::default()
            })
            .collect();

        let run = || {
            let mut state =
                GameState::new(99999, MapBounds::new(2400.0, 1800.0), Tuning::default());
            for (i, input) in script.iter().enumerate() {
                tick(&mut state, input, SimTime::from_tick(i as u64));
            }
            state
        };

        let (a, b) = (run(), run());
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemy.pos, b.enemy.pos);
        assert_eq!(a.rounds.round, b.rounds.round);
        assert_eq!(a.rounds.vampire_wins, b.rounds.vampire_wins);
        assert_eq!(a.rounds.penguin_wins, b.rounds.penguin_wins);
    }
}

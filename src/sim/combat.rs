//! Melee combat: attack hitboxes and hit resolution
//!
//! Each stab spawns a short-lived hitbox in front of the vampire. A hitbox
//! lands at most once; a landed hit also grants the penguin a brief
//! invulnerability window so one swing cannot chain damage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{MapBounds, Rect};
use super::enemy::Enemy;
use super::player::Facing;
use super::time::SimTime;
use crate::Tuning;

/// A transient attack area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackHitbox {
    pub rect: Rect,
    pub created: SimTime,
    pub lifetime_ms: u64,
    pub damage: u32,
    /// Set once the hitbox has landed; it never counts again
    pub consumed: bool,
}

impl AttackHitbox {
    pub fn is_expired(&self, now: SimTime) -> bool {
        now.millis_since(self.created) > self.lifetime_ms
    }

    pub fn is_live(&self, now: SimTime) -> bool {
        !self.consumed && !self.is_expired(now)
    }
}

/// Result of testing one hitbox against the penguin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Miss,
    Wounded { health_left: u32 },
    Killed,
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, HitOutcome::Miss)
    }
}

/// Build the hitbox for a stab started at `now`
///
/// The box abuts the sprite edge on the facing side and is centred on the
/// other axis.
pub fn build_attack_hitbox(
    player_pos: Vec2,
    facing: Facing,
    now: SimTime,
    tuning: &Tuning,
) -> AttackHitbox {
    let (w, h) = (tuning.attack_width, tuning.attack_height);
    let s = tuning.sprite_size;
    let Vec2 { x, y } = player_pos;

    let origin = match facing {
        Facing::Right => Vec2::new(x + s, y + (s - h) / 2.0),
        Facing::Left => Vec2::new(x - w, y + (s - h) / 2.0),
        Facing::Up => Vec2::new(x + (s - w) / 2.0, y - h),
        Facing::Down => Vec2::new(x + (s - w) / 2.0, y + s),
    };

    AttackHitbox {
        rect: Rect::new(origin.x, origin.y, w, h),
        created: now,
        lifetime_ms: tuning.attack_lifetime_ms,
        damage: tuning.attack_damage,
        consumed: false,
    }
}

/// Resolve one hitbox against the penguin
///
/// Does nothing if the hitbox is spent or expired, or the penguin is hidden,
/// invulnerable or already dying. A landed hit consumes the hitbox, deals
/// damage, and either starts the death animation or knocks the penguin back
/// and sends it fleeing.
pub fn apply_attack(
    hitbox: &mut AttackHitbox,
    enemy: &mut Enemy,
    now: SimTime,
    tuning: &Tuning,
    bounds: &MapBounds,
) -> HitOutcome {
    if !hitbox.is_live(now) || !enemy.visible || enemy.is_dying() || enemy.is_invulnerable(now) {
        return HitOutcome::Miss;
    }

    let target = enemy.collider(tuning.sprite_size);
    if !hitbox.rect.overlaps(&target) {
        return HitOutcome::Miss;
    }

    hitbox.consumed = true;
    enemy.health = enemy.health.saturating_sub(hitbox.damage);
    enemy.invulnerable_until = now.after_millis(tuning.invulnerability_ms);

    if enemy.health == 0 {
        enemy.enter_death();
        log::debug!("Penguin killed at {:?}", enemy.pos);
        return HitOutcome::Killed;
    }

    let away = (target.center() - hitbox.rect.center()).normalize_or_zero();
    enemy.pos = bounds.clamp(enemy.pos + away * tuning.knockback, tuning.sprite_size);
    enemy.start_fleeing(tuning.flee_speed_floor);
    log::debug!("Penguin hit, {} health left", enemy.health);

    HitOutcome::Wounded {
        health_left: enemy.health,
    }
}

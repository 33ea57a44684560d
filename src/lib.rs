//! Vampire Arena - a vampire-versus-penguin arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, enemy AI, rounds)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Sprite sheets are authored at 32px and drawn at 3x
    pub const SPRITE_SCALE: f32 = 3.0;
    pub const SPRITE_SIZE: f32 = 32.0 * SPRITE_SCALE;

    /// Logical screen (camera view) size
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Extra distance beyond the half-screen when spawning the penguin
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Player walk speed (units per tick, per pressed direction)
    pub const PLAYER_SPEED: f32 = 2.0;

    /// Penguin defaults
    pub const ENEMY_START_HEALTH: u32 = 3;
    pub const ENEMY_CHASE_SPEED: f32 = 2.5;
    /// Minimum speed after being hit (flee mode)
    pub const ENEMY_FLEE_SPEED_FLOOR: f32 = 2.5;
    /// Ticks visible before the penguin vanishes (~10 s)
    pub const SCARE_INTERVAL_TICKS: u32 = 600;
    /// Ticks invisible before the penguin reappears (~1 s)
    pub const REAPPEAR_DELAY_TICKS: u32 = 60;

    /// Attack hitbox (24x20 sheet pixels at 3x)
    pub const ATTACK_WIDTH: f32 = 24.0 * SPRITE_SCALE;
    pub const ATTACK_HEIGHT: f32 = 20.0 * SPRITE_SCALE;
    pub const ATTACK_LIFETIME_MS: u64 = 140;
    pub const ATTACK_DAMAGE: u32 = 1;
    pub const ATTACK_COOLDOWN_MS: u64 = 300;
    /// Damage immunity after a registered hit
    pub const INVULNERABILITY_MS: u64 = 200;
    /// Instant shove applied to the penguin on a non-lethal hit
    pub const KNOCKBACK_DISTANCE: f32 = 12.0;

    /// First side to this many round wins takes the match
    pub const MATCH_TARGET: u32 = 5;
}

/// Sign of a value as -1, 0 or 1 (unlike `f32::signum`, zero maps to zero)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Clamp to `[0, max]`, collapsing to 0 when `max` is negative
#[inline]
pub fn clamp_upper(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}

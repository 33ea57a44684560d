//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Missing
//! fields in a JSON file fall back to the defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::AnimClip;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Drawn sprite edge length (square sprites)
    pub sprite_size: f32,
    /// Camera view size
    pub screen_width: f32,
    pub screen_height: f32,
    /// Distance beyond the half-screen where the penguin (re)appears
    pub spawn_margin: f32,

    // === Vampire ===
    pub player_speed: f32,
    pub player_walk: AnimClip,
    pub player_attack: AnimClip,
    pub player_death: AnimClip,

    // === Attack ===
    pub attack_width: f32,
    pub attack_height: f32,
    pub attack_lifetime_ms: u64,
    pub attack_damage: u32,
    pub attack_cooldown_ms: u64,
    pub invulnerability_ms: u64,
    pub knockback: f32,

    // === Penguin ===
    pub enemy_health: u32,
    pub chase_speed: f32,
    pub flee_speed_floor: f32,
    pub scare_interval_ticks: u32,
    pub reappear_delay_ticks: u32,
    pub enemy_idle: AnimClip,
    pub enemy_attack: AnimClip,
    pub enemy_death: AnimClip,

    // === Match ===
    pub match_target: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sprite_size: SPRITE_SIZE,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            player_speed: PLAYER_SPEED,
            player_walk: AnimClip::looping(6, 5),
            player_attack: AnimClip::looping(12, 5),
            player_death: AnimClip::once(6, 5),

            attack_width: ATTACK_WIDTH,
            attack_height: ATTACK_HEIGHT,
            attack_lifetime_ms: ATTACK_LIFETIME_MS,
            attack_damage: ATTACK_DAMAGE,
            attack_cooldown_ms: ATTACK_COOLDOWN_MS,
            invulnerability_ms: INVULNERABILITY_MS,
            knockback: KNOCKBACK_DISTANCE,

            enemy_health: ENEMY_START_HEALTH,
            chase_speed: ENEMY_CHASE_SPEED,
            flee_speed_floor: ENEMY_FLEE_SPEED_FLOOR,
            scare_interval_ticks: SCARE_INTERVAL_TICKS,
            reappear_delay_ticks: REAPPEAR_DELAY_TICKS,
            enemy_idle: AnimClip::looping(2, 10),
            enemy_attack: AnimClip::looping(3, 8),
            enemy_death: AnimClip::once(2, 6),

            match_target: MATCH_TARGET,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Infer penguin clip frame counts from sprite-sheet pixel sizes
    ///
    /// Each sheet is a single row; see [`crate::sim::columns_from_sheet`].
    pub fn with_enemy_sheets(
        mut self,
        idle: (u32, u32),
        attack: (u32, u32),
        death: (u32, u32),
    ) -> Self {
        self.enemy_idle = self.enemy_idle.with_sheet(idle.0, idle.1);
        self.enemy_attack = self.enemy_attack.with_sheet(attack.0, attack.1);
        self.enemy_death = self.enemy_death.with_sheet(death.0, death.1);
        self
    }

    /// Ticks the attack latch holds (the full attack animation)
    pub fn attack_latch_ticks(&self) -> u32 {
        self.player_attack.duration_ticks()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(self.sprite_size > 0.0) {
            return invalid("sprite_size", "must be positive");
        }
        if !(self.player_speed > 0.0) {
            return invalid("player_speed", "must be positive");
        }
        if !(self.chase_speed > 0.0) {
            return invalid("chase_speed", "must be positive");
        }
        if !(self.flee_speed_floor > 0.0) {
            return invalid("flee_speed_floor", "must be positive");
        }
        if !(self.attack_width > 0.0 && self.attack_height > 0.0) {
            return invalid("attack_width", "attack box must have positive area");
        }
        if !(self.knockback >= 0.0) {
            return invalid("knockback", "must not be negative");
        }
        if self.attack_damage == 0 {
            return invalid("attack_damage", "must be at least 1");
        }
        if self.enemy_health == 0 {
            return invalid("enemy_health", "must be at least 1");
        }
        if self.scare_interval_ticks == 0 {
            return invalid("scare_interval_ticks", "must be at least 1");
        }
        if self.reappear_delay_ticks == 0 {
            return invalid("reappear_delay_ticks", "must be at least 1");
        }
        if self.match_target == 0 {
            return invalid("match_target", "must be at least 1");
        }

        let clips = [
            ("player_walk", &self.player_walk),
            ("player_attack", &self.player_attack),
            ("player_death", &self.player_death),
            ("enemy_idle", &self.enemy_idle),
            ("enemy_attack", &self.enemy_attack),
            ("enemy_death", &self.enemy_death),
        ];
        for (field, clip) in clips {
            if clip.frames == 0 || clip.ticks_per_frame == 0 {
                return invalid(field, "clip needs at least one frame and a nonzero cadence");
            }
        }

        Ok(())
    }
}

//! The penguin: teleport cycle, chase/flee steering and animation
//!
//! Behaviour mode (chase or flee) is orthogonal to the animation state
//! (idle, attack, death). Death is entered only through combat and left only
//! by a round reset.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::collision::{MapBounds, Rect, enemy_collider};
use super::time::SimTime;
use crate::{Tuning, sign};

/// Steering mode relative to the vampire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMode {
    Chase,
    Flee,
}

/// Animation state, chosen by contact with the vampire or by death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAnim {
    Idle,
    Attack,
    Death,
}

/// Where the penguin appears relative to the vampire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl SpawnSide {
    pub const ALL: [SpawnSide; 4] = [
        SpawnSide::Top,
        SpawnSide::Bottom,
        SpawnSide::Left,
        SpawnSide::Right,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Offset from the vampire that lands just outside the camera view
    pub fn offset(self, tuning: &Tuning) -> Vec2 {
        let dx = tuning.screen_width / 2.0 + tuning.spawn_margin;
        let dy = tuning.screen_height / 2.0 + tuning.spawn_margin;
        match self {
            SpawnSide::Top => Vec2::new(0.0, -dy),
            SpawnSide::Bottom => Vec2::new(0.0, dy),
            SpawnSide::Left => Vec2::new(-dx, 0.0),
            SpawnSide::Right => Vec2::new(dx, 0.0),
        }
    }
}

/// Teleport cycle transition that happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teleport {
    Vanished,
    Reappeared(SpawnSide),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Sprite top-left in map coordinates
    pub pos: Vec2,
    pub health: u32,
    pub mode: EnemyMode,
    pub visible: bool,
    /// Units per tick on each axis
    pub speed: f32,
    pub anim_state: EnemyAnim,
    pub anim: Animator,
    /// Ticks spent in the current visible/invisible phase
    pub teleport_timer: u32,
    /// Visible ticks before a forced vanish
    pub scare_interval: u32,
    pub invulnerable_until: SimTime,
}

impl Enemy {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            health: tuning.enemy_health,
            mode: EnemyMode::Chase,
            visible: true,
            speed: tuning.chase_speed,
            anim_state: EnemyAnim::Idle,
            anim: Animator::default(),
            teleport_timer: 0,
            scare_interval: tuning.scare_interval_ticks,
            invulnerable_until: SimTime::ZERO,
        }
    }

    /// Restore every field except position to its round-start value
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self {
            pos: self.pos,
            ..Self::new(tuning)
        };
    }

    /// Move to `side` of the vampire, kept on the map
    pub fn place_near(
        &mut self,
        player_pos: Vec2,
        side: SpawnSide,
        tuning: &Tuning,
        bounds: &MapBounds,
    ) {
        self.pos = bounds.clamp(player_pos + side.offset(tuning), tuning.sprite_size);
    }

    pub fn collider(&self, sprite_size: f32) -> Rect {
        enemy_collider(self.pos, sprite_size)
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        self.anim_state == EnemyAnim::Death
    }

    #[inline]
    pub fn is_invulnerable(&self, now: SimTime) -> bool {
        now < self.invulnerable_until
    }

    /// Only a visible, chasing, living penguin kills on contact
    pub fn is_lethal(&self) -> bool {
        self.visible && self.mode == EnemyMode::Chase && !self.is_dying()
    }

    pub fn clip<'a>(&self, tuning: &'a Tuning) -> &'a AnimClip {
        match self.anim_state {
            EnemyAnim::Idle => &tuning.enemy_idle,
            EnemyAnim::Attack => &tuning.enemy_attack,
            EnemyAnim::Death => &tuning.enemy_death,
        }
    }

    /// Pick Idle or Attack from contact with the vampire; no-op while dying
    pub fn set_engaged(&mut self, engaged: bool) {
        if self.is_dying() {
            return;
        }
        let next = if engaged {
            EnemyAnim::Attack
        } else {
            EnemyAnim::Idle
        };
        if next != self.anim_state {
            self.anim_state = next;
            self.anim.reset();
        }
    }

    /// Force the calm idle pose (used after the vampire loses a round)
    pub fn calm(&mut self) {
        self.set_engaged(false);
    }

    pub fn enter_death(&mut self) {
        self.anim_state = EnemyAnim::Death;
        self.anim.reset();
    }

    /// Switch to flee mode, never slower than `floor`
    pub fn start_fleeing(&mut self, floor: f32) {
        self.mode = EnemyMode::Flee;
        self.speed = self.speed.max(floor);
    }

    pub fn death_finished(&self, tuning: &Tuning) -> bool {
        self.is_dying() && self.anim.is_finished(&tuning.enemy_death)
    }

    /// Run one AI tick: teleport cycle, animation, then steering
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        player_pos: Vec2,
        tuning: &Tuning,
        bounds: &MapBounds,
        rng: &mut R,
    ) -> Option<Teleport> {
        let teleport = if self.is_dying() {
            None
        } else {
            self.advance_teleport(player_pos, tuning, bounds, rng)
        };

        if !self.visible {
            return teleport;
        }

        let clip = *self.clip(tuning);
        self.anim.advance(&clip);

        if !self.is_dying() {
            self.steer(player_pos, tuning, bounds);
        }
        teleport
    }

    fn advance_teleport<R: Rng + ?Sized>(
        &mut self,
        player_pos: Vec2,
        tuning: &Tuning,
        bounds: &MapBounds,
        rng: &mut R,
    ) -> Option<Teleport> {
        self.teleport_timer += 1;

        if self.visible {
            if self.teleport_timer >= self.scare_interval {
                self.visible = false;
                self.teleport_timer = 0;
                return Some(Teleport::Vanished);
            }
        } else if self.teleport_timer >= tuning.reappear_delay_ticks {
            self.visible = true;
            self.teleport_timer = 0;

            let side = SpawnSide::random(rng);
            self.place_near(player_pos, side, tuning, bounds);

            // Back on screen: go aggressive again
            self.mode = EnemyMode::Chase;
            self.speed = tuning.chase_speed;
            return Some(Teleport::Reappeared(side));
        }
        None
    }

    /// Step toward or away from the vampire on each axis independently
    fn steer(&mut self, player_pos: Vec2, tuning: &Tuning, bounds: &MapBounds) {
        let toward = player_pos - self.pos;
        let heading = match self.mode {
            EnemyMode::Chase => toward,
            EnemyMode::Flee => -toward,
        };
        let step = Vec2::new(sign(heading.x), sign(heading.y)) * self.speed;
        self.pos = bounds.clamp(self.pos + step, tuning.sprite_size);
    }
}

//! The vampire: movement, attack trigger and animation latch

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::collision::{MapBounds, Rect, player_collider};
use super::combat::{AttackHitbox, build_attack_hitbox};
use super::tick::TickInput;
use super::time::SimTime;
use crate::Tuning;

/// Facing direction; doubles as the row index in the vampire sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    pub fn sheet_row(self) -> u32 {
        match self {
            Facing::Down => 0,
            Facing::Up => 1,
            Facing::Left => 2,
            Facing::Right => 3,
        }
    }

    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Down => Vec2::Y,
            Facing::Up => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

/// What the vampire is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Idle,
    Walking,
    /// Stab animation latched for `ticks_left` more ticks (always > 0)
    Attacking { ticks_left: u32 },
    /// Death animation playing; input ignored until respawn
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite top-left in map coordinates
    pub pos: Vec2,
    pub facing: Facing,
    pub state: PlayerState,
    pub anim: Animator,
    /// Earliest time the next attack may start
    pub next_attack_at: SimTime,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: Facing::Down,
            state: PlayerState::Idle,
            anim: Animator::default(),
            next_attack_at: SimTime::ZERO,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != PlayerState::Dead
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        matches!(self.state, PlayerState::Attacking { .. })
    }

    pub fn collider(&self, sprite_size: f32) -> Rect {
        player_collider(self.pos, sprite_size)
    }

    /// Clip driving the current frame index
    pub fn clip<'a>(&self, tuning: &'a Tuning) -> &'a AnimClip {
        match self.state {
            PlayerState::Idle | PlayerState::Walking => &tuning.player_walk,
            PlayerState::Attacking { .. } => &tuning.player_attack,
            PlayerState::Dead => &tuning.player_death,
        }
    }

    /// Run one tick of input, latch countdown and animation
    ///
    /// Returns the attack hitbox when an attack starts this tick.
    pub fn update(
        &mut self,
        input: &TickInput,
        now: SimTime,
        tuning: &Tuning,
        bounds: &MapBounds,
    ) -> Option<AttackHitbox> {
        if self.state == PlayerState::Dead {
            self.anim.advance(&tuning.player_death);
            return None;
        }

        let moved = self.walk(input, tuning.player_speed);
        self.pos = bounds.clamp(self.pos, tuning.sprite_size);

        self.state = match self.state {
            PlayerState::Attacking { ticks_left } if ticks_left > 1 => PlayerState::Attacking {
                ticks_left: ticks_left - 1,
            },
            PlayerState::Attacking { .. } => {
                self.anim.reset();
                PlayerState::Idle
            }
            other => other,
        };

        let mut hitbox = None;
        if input.attack && now >= self.next_attack_at {
            hitbox = Some(build_attack_hitbox(self.pos, self.facing, now, tuning));
            self.next_attack_at = now.after_millis(tuning.attack_cooldown_ms);
            if !self.is_attacking() {
                self.anim.reset();
            }
            self.state = PlayerState::Attacking {
                ticks_left: tuning.attack_latch_ticks(),
            };
        }

        match self.state {
            PlayerState::Attacking { .. } => self.anim.advance(&tuning.player_attack),
            _ if moved => {
                if self.state != PlayerState::Walking {
                    self.state = PlayerState::Walking;
                    self.anim.reset();
                }
                self.anim.advance(&tuning.player_walk);
            }
            _ => {
                self.state = PlayerState::Idle;
                self.anim.reset();
            }
        }

        hitbox
    }

    /// Each held direction moves independently; the last one wins facing
    fn walk(&mut self, input: &TickInput, speed: f32) -> bool {
        let held = [
            (input.up, Facing::Up),
            (input.down, Facing::Down),
            (input.left, Facing::Left),
            (input.right, Facing::Right),
        ];

        let mut moved = false;
        for (pressed, facing) in held {
            if pressed {
                self.pos += facing.unit() * speed;
                self.facing = facing;
                moved = true;
            }
        }
        moved
    }

    /// Start the death animation; drops any attack latch
    pub fn kill(&mut self) {
        self.state = PlayerState::Dead;
        self.anim.reset();
    }

    pub fn death_finished(&self, tuning: &Tuning) -> bool {
        self.state == PlayerState::Dead && self.anim.is_finished(&tuning.player_death)
    }
}

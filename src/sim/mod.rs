//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes from the caller, once per tick
//! - No rendering, audio or platform dependencies

pub mod anim;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod invariants;
pub mod player;
pub mod round;
pub mod state;
pub mod tick;
pub mod time;
pub mod view;

pub use anim::{AnimClip, Animator, columns_from_sheet};
pub use collision::{MapBounds, Rect, enemy_collider, player_collider, rects_overlap, resolve_pushback};
pub use combat::{AttackHitbox, HitOutcome, apply_attack, build_attack_hitbox};
pub use enemy::{Enemy, EnemyAnim, EnemyMode, SpawnSide, Teleport};
pub use invariants::{InvariantViolation, check_invariants};
pub use player::{Facing, Player, PlayerState};
pub use round::{MatchState, RoundPhase, Side, UiControl, UiControlKind};
pub use state::{Camera, GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use time::SimTime;
pub use view::FrameView;

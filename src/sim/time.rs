//! Simulation timestamps
//!
//! Cooldowns, invulnerability and hitbox lifetimes are measured in
//! milliseconds. The caller reads its clock once per tick and passes the
//! result to [`crate::sim::tick`], so every check in a tick sees the same
//! instant.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Monotonic milliseconds since an arbitrary epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Timestamp of a tick on a fixed 60 Hz clock
    pub const fn from_tick(tick: u64) -> Self {
        Self(tick * 1000 / TICKS_PER_SECOND)
    }

    pub const fn after_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is later)
    pub const fn millis_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

//! Round and match bookkeeping
//!
//! `NotStarted -> RoundActive -> RoundEnded -> RoundActive -> ... -> MatchOver`.
//! Gameplay only runs in `RoundActive`; every other phase waits for the
//! player to press the button it shows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// A side in the match scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Vampire,
    Penguin,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Vampire => "Vampire",
            Side::Penguin => "Penguin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the first start
    NotStarted,
    RoundActive,
    /// Round decided, waiting for respawn
    RoundEnded,
    /// A side reached the target; waiting for a new match
    MatchOver,
}

/// Which button the UI should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiControlKind {
    Start,
    Respawn,
    NewMatch,
}

/// A clickable button in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiControl {
    pub kind: UiControlKind,
    pub region: Rect,
}

impl UiControl {
    pub fn is_clicked(&self, click: Option<Vec2>) -> bool {
        click.is_some_and(|p| self.region.contains_point(p))
    }
}

const START_BUTTON: Rect = Rect::new(270.0, 200.0, 100.0, 40.0);
const RESPAWN_BUTTON: Rect = Rect::new(270.0, 200.0, 100.0, 40.0);
const NEW_MATCH_BUTTON: Rect = Rect::new(230.0, 200.0, 180.0, 40.0);

/// Scoreboard and round lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: RoundPhase,
    pub vampire_wins: u32,
    pub penguin_wins: u32,
    /// Wins needed to take the match
    pub target: u32,
    /// Winner decided but not yet scored (waiting on a death animation)
    pub pending_winner: Option<Side>,
    /// 1-based round number within the match (0 before the first start)
    pub round: u32,
}

impl MatchState {
    pub fn new(target: u32) -> Self {
        Self {
            phase: RoundPhase::NotStarted,
            vampire_wins: 0,
            penguin_wins: 0,
            target,
            pending_winner: None,
            round: 0,
        }
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Vampire => self.vampire_wins,
            Side::Penguin => self.penguin_wins,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::RoundActive
    }

    #[inline]
    pub fn is_match_over(&self) -> bool {
        self.phase == RoundPhase::MatchOver
    }

    #[inline]
    pub fn awaiting_respawn(&self) -> bool {
        self.phase == RoundPhase::RoundEnded
    }

    /// Match winner, once the match is over
    pub fn winner(&self) -> Option<Side> {
        if !self.is_match_over() {
            return None;
        }
        if self.vampire_wins >= self.target {
            Some(Side::Vampire)
        } else {
            Some(Side::Penguin)
        }
    }

    /// Enter a fresh round
    pub fn begin_round(&mut self) {
        self.phase = RoundPhase::RoundActive;
        self.pending_winner = None;
        self.round += 1;
        log::info!(
            "Round {} begins (Vampire {} - {} Penguin)",
            self.round,
            self.vampire_wins,
            self.penguin_wins
        );
    }

    /// Zero the scoreboard for a new match
    pub fn reset_scores(&mut self) {
        self.vampire_wins = 0;
        self.penguin_wins = 0;
        self.round = 0;
        self.pending_winner = None;
    }

    /// Score the active round for `side`
    ///
    /// Ignored outside an active round, so a round can only be scored once.
    pub fn award(&mut self, side: Side) -> RoundPhase {
        if !self.is_active() {
            return self.phase;
        }

        match side {
            Side::Vampire => self.vampire_wins += 1,
            Side::Penguin => self.penguin_wins += 1,
        }
        self.pending_winner = None;

        self.phase = if self.vampire_wins >= self.target || self.penguin_wins >= self.target {
            log::info!(
                "{} wins the match {} - {}",
                side.name(),
                self.wins(side),
                self.wins(opponent(side))
            );
            RoundPhase::MatchOver
        } else {
            log::info!("{} takes round {}", side.name(), self.round);
            RoundPhase::RoundEnded
        };
        self.phase
    }

    /// Button the UI should show for the current phase
    pub fn ui_control(&self) -> Option<UiControl> {
        let (kind, region) = match self.phase {
            RoundPhase::NotStarted => (UiControlKind::Start, START_BUTTON),
            RoundPhase::RoundEnded => (UiControlKind::Respawn, RESPAWN_BUTTON),
            RoundPhase::MatchOver => (UiControlKind::NewMatch, NEW_MATCH_BUTTON),
            RoundPhase::RoundActive => return None,
        };
        Some(UiControl { kind, region })
    }
}

fn opponent(side: Side) -> Side {
    match side {
        Side::Vampire => Side::Penguin,
        Side::Penguin => Side::Vampire,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_once_per_round() {
        let mut m = MatchState::new(5);
        m.begin_round();
        assert_eq!(m.award(Side::Vampire), RoundPhase::RoundEnded);
        // Second award in the same round is ignored
        assert_eq!(m.award(Side::Penguin), RoundPhase::RoundEnded);
        assert_eq!((m.vampire_wins, m.penguin_wins), (1, 0));
        assert!(m.awaiting_respawn());
    }

    #[test]
    fn test_reaching_target_ends_match() {
        let mut m = MatchState::new(3);
        for _ in 0..2 {
            m.begin_round();
            m.award(Side::Penguin);
        }
        assert_eq!(m.winner(), None);
        m.begin_round();
        assert_eq!(m.award(Side::Penguin), RoundPhase::MatchOver);
        assert_eq!(m.winner(), Some(Side::Penguin));
        assert_eq!(m.round, 3);

        // Match over is sticky until an explicit reset
        assert_eq!(m.award(Side::Vampire), RoundPhase::MatchOver);
        assert_eq!(m.vampire_wins, 0);

        m.reset_scores();
        m.begin_round();
        assert_eq!((m.vampire_wins, m.penguin_wins, m.round), (0, 0, 1));
    }

    #[test]
    fn test_begin_round_clears_pending() {
        let mut m = MatchState::new(5);
        m.begin_round();
        m.pending_winner = Some(Side::Penguin);
        m.award(Side::Penguin);
        assert_eq!(m.pending_winner, None);
        m.begin_round();
        assert_eq!(m.pending_winner, None);
    }

    #[test]
    fn test_ui_control_per_phase() {
        let mut m = MatchState::new(1);
        assert_eq!(m.ui_control().map(|c| c.kind), Some(UiControlKind::Start));
        m.begin_round();
        assert_eq!(m.ui_control(), None);
        m.award(Side::Vampire);
        let control = m.ui_control().expect("match over shows a button");
        assert_eq!(control.kind, UiControlKind::NewMatch);
        assert!(control.is_clicked(Some(Vec2::new(400.0, 220.0))));
        assert!(!control.is_clicked(Some(Vec2::new(100.0, 100.0))));
        assert!(!control.is_clicked(None));
    }
}

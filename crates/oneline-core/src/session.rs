//! One level attempt: board, stroke, hints, and the per-frame tick.

use crate::board::Board;
use crate::currency::CoinLedger;
use crate::direction::{Coord, Direction};
use crate::event::GameEvent;
use crate::hint::HintEngine;
use crate::path::{PathEngine, TapOutcome};
use crate::solution::Solution;

/// How the attempt is being played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionMode {
    /// A regular campaign level: no time pressure.
    Normal,
    /// A challenge attempt with a countdown; running out loses the attempt.
    Challenge { time_left: f64 },
}

/// Lifecycle of the attempt. `Cleared` and `Failed` are terminal: further
/// taps, ticks and hints are ignored until a new session is built for the
/// next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    Cleared,
    Failed,
}

/// Render-facing snapshot of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView {
    pub coord: Coord,
    pub is_start: bool,
    /// On the player's current stroke.
    pub visited: bool,
    /// Stroke marker pointing back toward the previous path tile.
    pub segment: Option<Direction>,
    /// Hint marker pointing along the solution's outgoing step.
    pub hint: Option<Direction>,
}

/// A single level attempt.
///
/// Owns the static level data and both engines, and is the only mutator of
/// either (one mutator context per level session). The shell drives it one
/// frame at a time: each [`tick`](LevelSession::tick) applies at most one
/// tap mutation, or, when no press is active, one win check -- never both
/// in the same frame, so a win is detected once the gesture ends rather
/// than mid-drag.
#[derive(Debug)]
pub struct LevelSession {
    board: Board,
    solution: Solution,
    path: PathEngine,
    hints: HintEngine,
    mode: SessionMode,
    phase: SessionPhase,
    events: Vec<GameEvent>,
}

impl LevelSession {
    /// Start a regular attempt.
    pub fn new(board: Board, solution: Solution) -> Self {
        Self::with_mode(board, solution, SessionMode::Normal)
    }

    /// Start a challenge attempt with `time_limit_secs` on the clock.
    pub fn challenge(board: Board, solution: Solution, time_limit_secs: f64) -> Self {
        Self::with_mode(
            board,
            solution,
            SessionMode::Challenge {
                time_left: time_limit_secs,
            },
        )
    }

    fn with_mode(board: Board, solution: Solution, mode: SessionMode) -> Self {
        let path = PathEngine::new(&board);
        Self {
            board,
            solution,
            path,
            hints: HintEngine::new(),
            mode,
            phase: SessionPhase::Playing,
            events: Vec::new(),
        }
    }

    /// Advance one frame.
    ///
    /// `press` is the active tap coordinate, if the player is currently
    /// touching; `dt` is the frame's wall-clock duration in seconds (only
    /// the challenge countdown consumes it). Terminal phases ignore
    /// everything.
    pub fn tick(&mut self, press: Option<Coord>, dt: f64) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        match press {
            Some(coord) => match self.path.tap(&self.board, coord) {
                TapOutcome::Extended { coord, segment } => {
                    self.events.push(GameEvent::PathExtended { coord, segment });
                }
                TapOutcome::Truncated { coord, popped } => {
                    self.events.push(GameEvent::PathTruncated { coord, popped });
                }
                TapOutcome::Ignored => {}
            },
            None => {
                if self.path.covers(&self.solution) {
                    self.phase = SessionPhase::Cleared;
                    self.events.push(GameEvent::LevelCompleted);
                    return;
                }
            }
        }

        if let SessionMode::Challenge { time_left } = &mut self.mode {
            *time_left -= dt;
            if *time_left <= 0.0 {
                *time_left = 0.0;
                self.phase = SessionPhase::Failed;
                self.events.push(GameEvent::ChallengeFailed);
            }
        }
    }

    /// Reveal the next stretch of the solution for free: the stroke resets
    /// to the start tile, then up to `per_reveal` further solution tiles
    /// get hint markers.
    pub fn give_hint(&mut self, per_reveal: usize) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.path.clear_to_start();
        self.events.push(GameEvent::PathCleared);
        let placed = self.hints.reveal(&self.solution, per_reveal);
        if !placed.is_empty() {
            self.events.push(GameEvent::HintRevealed {
                tiles: placed.len(),
                revealed: self.hints.revealed(),
            });
        }
    }

    /// Buy a hint reveal: a no-op returning `false` unless something is
    /// still unrevealed and the ledger holds at least `cost`.
    pub fn buy_hint(
        &mut self,
        ledger: &mut dyn CoinLedger,
        cost: i64,
        per_reveal: usize,
    ) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        if self.hints.exhausted(&self.solution) || ledger.balance() < cost {
            return false;
        }
        if !ledger.debit(cost) {
            return false;
        }
        self.give_hint(per_reveal);
        true
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current play mode; challenge mode carries its remaining time.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The level's board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The level's reference path.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// The live path.
    pub fn path(&self) -> &PathEngine {
        &self.path
    }

    /// The hint engine.
    pub fn hints(&self) -> &HintEngine {
        &self.hints
    }

    /// Snapshot of the tile at `coord` for rendering. `None` for holes and
    /// out-of-board coordinates.
    pub fn tile_view(&self, coord: Coord) -> Option<TileView> {
        let tile = self.board.tile(coord)?;
        Some(TileView {
            coord,
            is_start: tile.is_start,
            visited: self.path.is_visited(coord),
            segment: self.path.segment(coord),
            hint: self.hints.mark(coord),
        })
    }

    /// Take everything that happened since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GameEventKind;
    use crate::test_utils::{TestLedger, sample_board, sample_solution};

    fn session() -> LevelSession {
        LevelSession::new(sample_board(), sample_solution())
    }

    /// Drive the solution's tap order, one press per frame with an idle
    /// frame after the gesture.
    fn play_to_win(s: &mut LevelSession) {
        for coord in sample_solution().iter().skip(1) {
            s.tick(Some(coord), 1.0 / 60.0);
        }
        s.tick(None, 1.0 / 60.0);
    }

    #[test]
    fn win_is_detected_on_the_idle_frame() {
        let mut s = session();
        for coord in sample_solution().iter().skip(1) {
            s.tick(Some(coord), 0.016);
            // Still mid-gesture: no win yet, even with full coverage.
            assert_eq!(s.phase(), SessionPhase::Playing);
        }
        s.tick(None, 0.016);
        assert_eq!(s.phase(), SessionPhase::Cleared);

        let kinds: Vec<GameEventKind> = s.drain_events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.last(), Some(&GameEventKind::LevelCompleted));
    }

    #[test]
    fn incomplete_coverage_never_wins() {
        let mut s = session();
        // Visit all but the last tile.
        for coord in sample_solution().iter().skip(1).take(3) {
            s.tick(Some(coord), 0.016);
        }
        for _ in 0..10 {
            s.tick(None, 0.016);
        }
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn win_is_terminal() {
        let mut s = session();
        play_to_win(&mut s);
        s.drain_events();

        // Further taps are ignored outright.
        s.tick(Some(s.board().start()), 0.016);
        s.tick(None, 0.016);
        assert_eq!(s.phase(), SessionPhase::Cleared);
        assert!(s.drain_events().is_empty());
        assert_eq!(s.path().len(), sample_solution().len());
    }

    #[test]
    fn challenge_timeout_fails_the_attempt() {
        let mut s = LevelSession::challenge(sample_board(), sample_solution(), 1.0);
        for _ in 0..59 {
            s.tick(None, 1.0 / 60.0);
        }
        assert_eq!(s.phase(), SessionPhase::Playing);
        s.tick(None, 1.0 / 30.0);
        assert_eq!(s.phase(), SessionPhase::Failed);
        assert!(
            s.drain_events()
                .iter()
                .any(|e| e.kind() == GameEventKind::ChallengeFailed)
        );

        // Lost is terminal too.
        s.tick(Some(Coord::new(0, 0)), 0.016);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn normal_mode_ignores_time() {
        let mut s = session();
        s.tick(None, 1e9);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn give_hint_resets_the_stroke_and_marks_tiles() {
        let mut s = session();
        s.tick(Some(Coord::new(0, 0)), 0.016);
        assert_eq!(s.path().len(), 2);

        s.give_hint(2);
        assert_eq!(s.path().len(), 1);
        assert!(s.tile_view(Coord::new(1, 0)).unwrap().hint.is_some());
        assert!(s.tile_view(Coord::new(0, 0)).unwrap().hint.is_some());
        assert!(s.tile_view(Coord::new(0, 1)).unwrap().hint.is_none());

        let kinds: Vec<GameEventKind> = s.drain_events().iter().map(|e| e.kind()).collect();
        assert!(kinds.contains(&GameEventKind::PathCleared));
        assert!(kinds.contains(&GameEventKind::HintRevealed));
    }

    #[test]
    fn buy_hint_debits_only_when_affordable_and_unrevealed() {
        let mut s = session();
        let mut ledger = TestLedger::with_coins(30);

        assert!(s.buy_hint(&mut ledger, 25, 2));
        assert_eq!(ledger.coins, 5);

        // Can no longer afford a second reveal; the balance is untouched.
        assert!(!s.buy_hint(&mut ledger, 25, 2));
        assert_eq!(ledger.coins, 5);

        // A richer ledger finishes the reveal...
        let mut rich = TestLedger::with_coins(1000);
        assert!(s.buy_hint(&mut rich, 25, 50));
        assert_eq!(rich.coins, 975);

        // ...after which purchases are no-ops even with plenty of coins.
        assert!(!s.buy_hint(&mut rich, 25, 5));
        assert_eq!(rich.coins, 975);
    }

    #[test]
    fn tile_view_reports_holes_as_none() {
        let s = session();
        assert!(s.tile_view(Coord::new(2, 0)).is_none());
        assert!(s.tile_view(Coord::new(9, 9)).is_none());

        let start = s.tile_view(s.board().start()).unwrap();
        assert!(start.is_start);
        assert!(start.visited);
        assert_eq!(start.segment, None);
    }
}

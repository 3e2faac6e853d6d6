//! Game resources: the engine handle, interaction state, move history,
//! deferred sync timing, session statistics, and the status line.

use bevy::prelude::*;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::board::Square;
use crate::core::{CoreError, CoreResult};
use crate::engine::adapter::ShakmatyEngine;
use crate::engine::{LegalTarget, MoveOutcome, RulesEngine};

/// Delay before the trailing full sync after a move, in seconds. Long enough
/// for the relocation glide to read smoothly, short enough that the
/// authoritative rebuild is imperceptible.
pub const TRAILING_SYNC_SECS: f32 = 0.12;

/// The rules engine behind the fixed capability interface.
///
/// This is the single source of truth consulted on every click; the visual
/// tree is only ever a derivation of it. Only the input handlers mutate it.
#[derive(Resource)]
pub struct ChessEngine {
    inner: Box<dyn RulesEngine>,
}

impl ChessEngine {
    pub fn new(inner: Box<dyn RulesEngine>) -> Self {
        Self { inner }
    }

    /// Build the engine from settings, honoring an optional start FEN.
    pub fn initialize(start_position: Option<&str>) -> CoreResult<Self> {
        let adapter = match start_position {
            Some(fen) => ShakmatyEngine::from_fen(fen)
                .map_err(|message| CoreError::EngineInit { message })?,
            None => ShakmatyEngine::new(),
        };
        Ok(Self::new(Box::new(adapter)))
    }

    pub fn rules(&self) -> &dyn RulesEngine {
        self.inner.as_ref()
    }
}

impl Deref for ChessEngine {
    type Target = dyn RulesEngine;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ChessEngine {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

/// Interaction state: the currently selected square and its legal targets.
/// Exists only between a selecting click and the next terminal click.
#[derive(Resource, Debug, Default)]
pub struct Selection {
    pub selected: Option<Square>,
    pub legal_targets: Vec<LegalTarget>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.selected = None;
        self.legal_targets.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_legal_target(&self, square: Square) -> bool {
        self.legal_targets.iter().any(|t| t.to == square)
    }
}

/// Chronological record of executed moves. The top entry drives the
/// last-move decoration; undo pops it, restoring the record before it.
#[derive(Resource, Debug, Default)]
pub struct MoveHistory {
    records: Vec<MoveOutcome>,
}

impl MoveHistory {
    pub fn add(&mut self, outcome: MoveOutcome) {
        self.records.push(outcome);
    }

    pub fn pop(&mut self) -> Option<MoveOutcome> {
        self.records.pop()
    }

    pub fn last_move(&self) -> Option<&MoveOutcome> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// One-shot timer for the trailing full sync scheduled by the move
/// animator. Re-scheduling before it fires simply restarts the window; the
/// sync itself is pure, so superseding it is always safe.
#[derive(Resource, Debug, Default)]
pub struct PendingSync {
    timer: Option<Timer>,
}

impl PendingSync {
    pub fn schedule(&mut self) {
        self.timer = Some(Timer::from_seconds(TRAILING_SYNC_SECS, TimerMode::Once));
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Advance the timer; returns `true` exactly once, when it fires.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if let Some(timer) = self.timer.as_mut() {
            timer.tick(delta);
            if timer.is_finished() {
                self.timer = None;
                return true;
            }
        }
        false
    }
}

/// Session counters, logged as they change. Never persisted.
#[derive(Resource, Debug, Default)]
pub struct SessionStats {
    pub games_started: u32,
    pub moves_played: u32,
    pub undos: u32,
}

impl SessionStats {
    pub fn record_new_game(&mut self) {
        self.games_started += 1;
        self.moves_played = 0;
        self.undos = 0;
        info!("[STATS] New game #{} (session)", self.games_started);
    }

    pub fn record_move(&mut self, outcome: &MoveOutcome) {
        self.moves_played += 1;
        info!(
            "[STATS] Move {}: {}\u{2192}{} ({})",
            self.moves_played, outcome.from, outcome.to, outcome
        );
    }

    pub fn record_undo(&mut self) {
        self.undos += 1;
        info!("[STATS] Undo #{}", self.undos);
    }
}

/// The status line shown under the board.
#[derive(Resource, Debug, Default, PartialEq, Eq)]
pub struct StatusLine(pub String);

/// Holds the startup error message when engine initialization fails.
#[derive(Resource, Debug)]
pub struct StartupFailure(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PieceColor;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn outcome(from: &str, to: &str) -> MoveOutcome {
        MoveOutcome {
            from: sq(from),
            to: sq(to),
            color: PieceColor::White,
            san: None,
            is_castle_kingside: false,
            is_castle_queenside: false,
        }
    }

    #[test]
    fn selection_clears_completely() {
        let mut selection = Selection {
            selected: Some(sq("e2")),
            legal_targets: vec![crate::engine::LegalTarget {
                to: sq("e4"),
                castle: None,
                is_promotion: false,
            }],
        };
        assert!(selection.is_selected());
        assert!(selection.is_legal_target(sq("e4")));
        selection.clear();
        assert!(!selection.is_selected());
        assert!(!selection.is_legal_target(sq("e4")));
    }

    #[test]
    fn history_pop_restores_the_previous_record() {
        let mut history = MoveHistory::default();
        history.add(outcome("e2", "e4"));
        history.add(outcome("e7", "e5"));
        assert_eq!(history.last_move().unwrap().from, sq("e7"));
        history.pop();
        assert_eq!(history.last_move().unwrap().from, sq("e2"));
        history.pop();
        assert!(history.last_move().is_none());
    }

    #[test]
    fn pending_sync_fires_exactly_once() {
        let mut pending = PendingSync::default();
        assert!(!pending.tick(Duration::from_millis(500)));

        pending.schedule();
        assert!(pending.is_pending());
        assert!(!pending.tick(Duration::from_millis(60)));
        assert!(pending.tick(Duration::from_millis(100)));
        assert!(!pending.is_pending());
        assert!(!pending.tick(Duration::from_millis(500)));
    }

    #[test]
    fn rescheduling_pending_sync_restarts_the_window() {
        let mut pending = PendingSync::default();
        pending.schedule();
        assert!(!pending.tick(Duration::from_millis(100)));
        pending.schedule();
        assert!(!pending.tick(Duration::from_millis(100)));
        assert!(pending.tick(Duration::from_millis(50)));
    }
}

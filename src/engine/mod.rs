//! Fixed capability interface to the chess rules engine.
//!
//! The board layer never implements rule logic and never talks to a rules
//! library directly. Everything it needs — occupancy, turn, legal moves,
//! move execution/undo, and terminal-state queries — flows through
//! [`RulesEngine`], one canonical method per query. Adapting an actual
//! library to this contract is the job of [`adapter`].

pub mod adapter;

use crate::board::Square;
use std::fmt;
use thiserror::Error;

/// Side color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Human-readable label used in status lines.
    pub fn label(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

/// The six piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// A piece as reported by the engine for one square.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceOnSquare {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

/// Which wing a castling move belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleKind {
    Kingside,
    Queenside,
}

/// One legal destination for a selected piece.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LegalTarget {
    pub to: Square,
    pub castle: Option<CastleKind>,
    pub is_promotion: bool,
}

/// A move request from the interaction layer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Promotion piece; `None` lets the engine apply its default (queen).
    pub promotion: Option<PieceType>,
}

/// The result of a successfully executed move.
///
/// Exactly one of {not-castle, kingside, queenside} holds per move.
#[derive(Clone, PartialEq, Debug)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    /// The side that made the move.
    pub color: PieceColor,
    pub san: Option<String>,
    pub is_castle_kingside: bool,
    pub is_castle_queenside: bool,
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.san {
            Some(san) => write!(f, "{san}"),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

/// The engine refused a move request.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
#[error("no legal move from {from} to {to}")]
pub struct MoveRejected {
    pub from: Square,
    pub to: Square,
}

/// The capability surface consumed by the board layer.
///
/// Implementations own the authoritative game state; the visual tree is
/// re-derived from this interface after every mutation.
pub trait RulesEngine: Send + Sync {
    /// Contents of a square, or `None` if empty.
    fn piece_at(&self, square: Square) -> Option<PieceOnSquare>;

    /// The side to move.
    fn side_to_move(&self) -> PieceColor;

    /// Ordered legal destinations for the piece on `from`; empty when the
    /// square is empty or its piece has no moves.
    fn legal_targets(&self, from: Square) -> Vec<LegalTarget>;

    /// Execute a move, mutating the game state on success.
    fn execute(&mut self, request: MoveRequest) -> Result<MoveOutcome, MoveRejected>;

    /// Take back the most recent move, returning it, or `None` when there is
    /// nothing to undo.
    fn undo(&mut self) -> Option<MoveOutcome>;

    /// Restore the initial position and clear the undo history.
    fn reset(&mut self);

    fn in_check(&self) -> bool;

    fn in_checkmate(&self) -> bool;

    fn in_draw(&self) -> bool;
}

/// Locate the king of `color`, scanning the engine's board contents.
pub fn king_square(engine: &dyn RulesEngine, color: PieceColor) -> Option<Square> {
    Square::all().find(|&square| {
        engine.piece_at(square).is_some_and(|piece| {
            piece.piece_type == PieceType::King && piece.color == color
        })
    })
}

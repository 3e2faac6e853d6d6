//! `shakmaty`-backed implementation of the [`RulesEngine`] contract.
//!
//! This is the only module allowed to name `shakmaty` types. Undo support is
//! layered on top of the library's immutable-play API by keeping the
//! position that preceded each executed move.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, File, Move, Position, Rank, Role};

use crate::board::Square;
use crate::engine::{
    CastleKind, LegalTarget, MoveOutcome, MoveRejected, MoveRequest, PieceColor, PieceOnSquare,
    PieceType, RulesEngine,
};

/// Rules engine adapter over [`shakmaty::Chess`].
pub struct ShakmatyEngine {
    position: Chess,
    initial: Chess,
    history: Vec<HistoryEntry>,
}

struct HistoryEntry {
    position_before: Chess,
    outcome: MoveOutcome,
}

impl ShakmatyEngine {
    /// Engine at the standard initial position.
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    /// Engine starting from a FEN string. Errors are reported as plain
    /// messages so callers stay decoupled from library error types.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let setup: Fen = fen.parse().map_err(|e| format!("invalid FEN: {e}"))?;
        let position: Chess = setup
            .into_position(CastlingMode::Standard)
            .map_err(|e| format!("illegal position: {e}"))?;
        Ok(Self::with_position(position))
    }

    fn with_position(position: Chess) -> Self {
        Self {
            initial: position.clone(),
            position,
            history: Vec::new(),
        }
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn to_shak_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(square.file() as u32),
        Rank::new(square.rank() as u32),
    )
}

fn from_shak_square(square: shakmaty::Square) -> Square {
    Square::new(u32::from(square.file()) as u8, u32::from(square.rank()) as u8)
        .expect("shakmaty squares lie within the 8x8 board")
}

fn from_shak_color(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}

fn from_shak_role(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

fn to_shak_role(piece_type: PieceType) -> Role {
    match piece_type {
        PieceType::Pawn => Role::Pawn,
        PieceType::Knight => Role::Knight,
        PieceType::Bishop => Role::Bishop,
        PieceType::Rook => Role::Rook,
        PieceType::Queen => Role::Queen,
        PieceType::King => Role::King,
    }
}

/// The click-visible endpoints of a legal move. Castling is exposed as the
/// king travelling to its destination square (g- or c-file), matching how
/// the user plays it.
fn move_endpoints(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to, .. } => Some((*from, *to)),
        Move::Castle { king, rook, .. } => {
            let king_dest = if rook.file() == File::H {
                shakmaty::Square::from_coords(File::G, rook.rank())
            } else {
                shakmaty::Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

fn castle_kind(m: &Move) -> Option<CastleKind> {
    match m {
        Move::Castle { rook, .. } if rook.file() == File::H => Some(CastleKind::Kingside),
        Move::Castle { .. } => Some(CastleKind::Queenside),
        _ => None,
    }
}

fn is_promotion_move(m: &Move) -> bool {
    matches!(
        m,
        Move::Normal {
            role: Role::Pawn,
            to,
            ..
        } if to.rank() == Rank::Eighth || to.rank() == Rank::First
    )
}

/// Force the requested promotion role onto a pawn move reaching the last
/// rank, regardless of which promotion variant move generation produced.
fn with_promotion(m: Move, role: Role) -> Move {
    match m {
        Move::Normal {
            role: Role::Pawn,
            from,
            to,
            capture,
            ..
        } if to.rank() == Rank::Eighth || to.rank() == Rank::First => Move::Normal {
            role: Role::Pawn,
            from,
            to,
            capture,
            promotion: Some(role),
        },
        other => other,
    }
}

impl RulesEngine for ShakmatyEngine {
    fn piece_at(&self, square: Square) -> Option<PieceOnSquare> {
        self.position
            .board()
            .piece_at(to_shak_square(square))
            .map(|piece| PieceOnSquare {
                color: from_shak_color(piece.color),
                piece_type: from_shak_role(piece.role),
            })
    }

    fn side_to_move(&self) -> PieceColor {
        from_shak_color(self.position.turn())
    }

    fn legal_targets(&self, from: Square) -> Vec<LegalTarget> {
        let from_sq = to_shak_square(from);
        let mut targets: Vec<LegalTarget> = Vec::new();

        for m in &self.position.legal_moves() {
            let Some((move_from, move_to)) = move_endpoints(m) else {
                continue;
            };
            if move_from != from_sq {
                continue;
            }
            let to = from_shak_square(move_to);
            // The four promotion variants collapse into one destination.
            if targets.iter().any(|t| t.to == to) {
                continue;
            }
            targets.push(LegalTarget {
                to,
                castle: castle_kind(m),
                is_promotion: is_promotion_move(m),
            });
        }

        targets
    }

    fn execute(&mut self, request: MoveRequest) -> Result<MoveOutcome, MoveRejected> {
        let rejection = MoveRejected {
            from: request.from,
            to: request.to,
        };
        let from_sq = to_shak_square(request.from);
        let to_sq = to_shak_square(request.to);
        let promotion_role = to_shak_role(request.promotion.unwrap_or(PieceType::Queen));

        for m in &self.position.legal_moves() {
            let Some((move_from, move_to)) = move_endpoints(m) else {
                continue;
            };
            if move_from != from_sq || move_to != to_sq {
                continue;
            }

            let played = with_promotion(m.clone(), promotion_role);
            let san = San::from_move(&self.position, played.clone()).to_string();
            let outcome = MoveOutcome {
                from: request.from,
                to: request.to,
                color: from_shak_color(self.position.turn()),
                san: Some(san),
                is_castle_kingside: castle_kind(&played) == Some(CastleKind::Kingside),
                is_castle_queenside: castle_kind(&played) == Some(CastleKind::Queenside),
            };

            let next = self
                .position
                .clone()
                .play(played)
                .map_err(|_| rejection)?;
            let position_before = std::mem::replace(&mut self.position, next);
            self.history.push(HistoryEntry {
                position_before,
                outcome: outcome.clone(),
            });
            return Ok(outcome);
        }

        Err(rejection)
    }

    fn undo(&mut self) -> Option<MoveOutcome> {
        let entry = self.history.pop()?;
        self.position = entry.position_before;
        Some(entry.outcome)
    }

    fn reset(&mut self) {
        self.position = self.initial.clone();
        self.history.clear();
    }

    fn in_check(&self) -> bool {
        self.position.is_check()
    }

    fn in_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn in_draw(&self) -> bool {
        // Threefold repetition is not tracked here; stalemate, bare
        // material, and the 50-move rule cover the rest.
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::king_square;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn play(engine: &mut ShakmatyEngine, from: &str, to: &str) -> MoveOutcome {
        engine
            .execute(MoveRequest {
                from: sq(from),
                to: sq(to),
                promotion: None,
            })
            .unwrap()
    }

    #[test]
    fn initial_position_has_thirty_two_pieces() {
        let engine = ShakmatyEngine::new();
        let occupied = Square::all().filter(|&s| engine.piece_at(s).is_some()).count();
        assert_eq!(occupied, 32);
        assert_eq!(engine.side_to_move(), PieceColor::White);
        assert_eq!(
            engine.piece_at(sq("e1")),
            Some(PieceOnSquare {
                color: PieceColor::White,
                piece_type: PieceType::King
            })
        );
        assert_eq!(engine.piece_at(sq("e4")), None);
    }

    #[test]
    fn pawn_targets_from_the_start() {
        let engine = ShakmatyEngine::new();
        let targets: Vec<Square> = engine.legal_targets(sq("e2")).iter().map(|t| t.to).collect();
        assert!(targets.contains(&sq("e3")));
        assert!(targets.contains(&sq("e4")));
        assert!(!targets.contains(&sq("e5")));
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn empty_square_has_no_targets() {
        let engine = ShakmatyEngine::new();
        assert!(engine.legal_targets(sq("e4")).is_empty());
    }

    #[test]
    fn executing_a_move_advances_the_turn() {
        let mut engine = ShakmatyEngine::new();
        let outcome = play(&mut engine, "e2", "e4");
        assert_eq!(outcome.from, sq("e2"));
        assert_eq!(outcome.to, sq("e4"));
        assert_eq!(outcome.color, PieceColor::White);
        assert_eq!(outcome.san.as_deref(), Some("e4"));
        assert!(!outcome.is_castle_kingside);
        assert!(!outcome.is_castle_queenside);
        assert_eq!(engine.side_to_move(), PieceColor::Black);
        assert_eq!(engine.piece_at(sq("e2")), None);
        assert_eq!(
            engine.piece_at(sq("e4")).map(|p| p.piece_type),
            Some(PieceType::Pawn)
        );
    }

    #[test]
    fn illegal_requests_are_rejected_without_mutation() {
        let mut engine = ShakmatyEngine::new();
        let err = engine
            .execute(MoveRequest {
                from: sq("e2"),
                to: sq("e5"),
                promotion: None,
            })
            .unwrap_err();
        assert_eq!(err, MoveRejected { from: sq("e2"), to: sq("e5") });
        assert_eq!(engine.side_to_move(), PieceColor::White);
        assert!(engine.piece_at(sq("e2")).is_some());
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, "e2", "e4");
        let undone = engine.undo().unwrap();
        assert_eq!(undone.from, sq("e2"));
        assert_eq!(undone.to, sq("e4"));
        assert_eq!(engine.side_to_move(), PieceColor::White);
        assert!(engine.piece_at(sq("e2")).is_some());
        assert_eq!(engine.piece_at(sq("e4")), None);
        assert!(engine.undo().is_none());
    }

    #[test]
    fn reset_restores_the_initial_position() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, "e2", "e4");
        play(&mut engine, "e7", "e5");
        engine.reset();
        assert_eq!(engine.side_to_move(), PieceColor::White);
        assert!(engine.piece_at(sq("e2")).is_some());
        assert!(engine.undo().is_none());
    }

    #[test]
    fn kingside_castle_is_offered_and_flagged() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, "e2", "e4");
        play(&mut engine, "e7", "e5");
        play(&mut engine, "g1", "f3");
        play(&mut engine, "b8", "c6");
        play(&mut engine, "f1", "c4");
        play(&mut engine, "f8", "c5");

        let king_targets = engine.legal_targets(sq("e1"));
        let castle = king_targets
            .iter()
            .find(|t| t.to == sq("g1"))
            .expect("castling destination offered");
        assert_eq!(castle.castle, Some(CastleKind::Kingside));

        let outcome = play(&mut engine, "e1", "g1");
        assert!(outcome.is_castle_kingside);
        assert!(!outcome.is_castle_queenside);
        assert_eq!(
            engine.piece_at(sq("g1")).map(|p| p.piece_type),
            Some(PieceType::King)
        );
        assert_eq!(
            engine.piece_at(sq("f1")).map(|p| p.piece_type),
            Some(PieceType::Rook)
        );
        assert_eq!(engine.piece_at(sq("h1")), None);
        assert_eq!(engine.piece_at(sq("e1")), None);
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut engine = ShakmatyEngine::from_fen("7k/P7/8/8/8/8/8/7K w - - 0 1").unwrap();
        let targets = engine.legal_targets(sq("a7"));
        assert!(targets.iter().any(|t| t.to == sq("a8") && t.is_promotion));

        play(&mut engine, "a7", "a8");
        assert_eq!(
            engine.piece_at(sq("a8")),
            Some(PieceOnSquare {
                color: PieceColor::White,
                piece_type: PieceType::Queen
            })
        );
        // The new queen checks the king along the back rank.
        assert!(engine.in_check());
    }

    #[test]
    fn fools_mate_is_reported_as_checkmate() {
        let mut engine = ShakmatyEngine::new();
        play(&mut engine, "f2", "f3");
        play(&mut engine, "e7", "e5");
        play(&mut engine, "g2", "g4");
        play(&mut engine, "d8", "h4");

        assert!(engine.in_checkmate());
        assert!(engine.in_check());
        assert_eq!(engine.side_to_move(), PieceColor::White);
        assert_eq!(king_square(&engine, PieceColor::White), Some(sq("e1")));
        // No side has moves; selecting any white piece yields nothing.
        assert!(engine.legal_targets(sq("e1")).is_empty());
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let engine = ShakmatyEngine::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        assert!(engine.in_draw());
        assert!(!engine.in_checkmate());
    }

    #[test]
    fn stalemate_is_a_draw_not_a_mate() {
        let engine = ShakmatyEngine::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
        assert!(engine.in_draw());
        assert!(!engine.in_check());
        assert!(!engine.in_checkmate());
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(ShakmatyEngine::from_fen("not a position").is_err());
        assert!(ShakmatyEngine::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }
}

//! Move application on the visual tree.
//!
//! On a successful move the piece nodes are patched incrementally — rook
//! first for castling, capture removal, then the mover — and a trailing
//! full sync is scheduled. The incremental patch is cosmetic; the full sync
//! is what guarantees convergence with engine truth (en passant and
//! promotion can leave the patched tree inconsistent).

use bevy::prelude::*;

use crate::board::{BoardGeometry, Square};
use crate::core::GameSettings;
use crate::engine::MoveOutcome;
use crate::game::components::{Piece, PieceMoveAnimation};
use crate::game::events::{MoveApplied, RefreshBoard};
use crate::game::resources::{ChessEngine, PendingSync};
use crate::rendering::pieces::{glyph_for, piece_paint};
use crate::rendering::theme::Z_PIECE;

/// Fixed rook relocation for a castling move: h-file to f-file on the king
/// side, a-file to d-file on the queen side, on the mover's back rank. A
/// lookup, never derived from the king's path.
pub fn rook_route(outcome: &MoveOutcome) -> Option<(Square, Square)> {
    let rank = match outcome.color {
        crate::engine::PieceColor::White => 0,
        crate::engine::PieceColor::Black => 7,
    };
    if outcome.is_castle_kingside {
        Some((Square::new(7, rank)?, Square::new(5, rank)?))
    } else if outcome.is_castle_queenside {
        Some((Square::new(0, rank)?, Square::new(3, rank)?))
    } else {
        None
    }
}

/// Apply an executed move to the piece nodes and schedule the trailing sync.
pub fn apply_move_visuals(
    mut moves: MessageReader<MoveApplied>,
    mut commands: Commands,
    engine: Res<ChessEngine>,
    geometry: Res<BoardGeometry>,
    settings: Res<GameSettings>,
    mut pending: ResMut<PendingSync>,
    mut pieces: Query<(
        Entity,
        &mut Piece,
        &mut Text2d,
        &mut TextColor,
        &mut Transform,
    )>,
) {
    for applied in moves.read() {
        let outcome = &applied.outcome;

        // Castling relocates the rook node alongside the king.
        if let Some((rook_from, rook_to)) = rook_route(outcome) {
            for (entity, mut piece, _, _, mut transform) in pieces.iter_mut() {
                if piece.square == rook_from {
                    piece.square = rook_to;
                    relocate(
                        &mut commands,
                        entity,
                        &mut transform,
                        &geometry,
                        rook_from,
                        rook_to,
                        settings.animate_moves,
                    );
                    break;
                }
            }
        }

        // A captured piece must not survive under the arriving mover.
        let captured: Vec<Entity> = pieces
            .iter()
            .filter(|(_, piece, _, _, _)| piece.square == outcome.to)
            .map(|(entity, _, _, _, _)| entity)
            .collect();
        for entity in captured {
            commands.entity(entity).despawn();
        }

        // Relocate the mover, refreshing its identity from the engine's
        // post-move contents so promotions re-skin correctly.
        for (entity, mut piece, mut text, mut text_color, mut transform) in pieces.iter_mut() {
            if piece.square != outcome.from {
                continue;
            }
            piece.square = outcome.to;
            if let Some(now) = engine.piece_at(outcome.to) {
                piece.color = now.color;
                piece.piece_type = now.piece_type;
                text.0 = glyph_for(now.color, now.piece_type).to_string();
                text_color.0 = piece_paint(now.color);
            }
            relocate(
                &mut commands,
                entity,
                &mut transform,
                &geometry,
                outcome.from,
                outcome.to,
                settings.animate_moves,
            );
            break;
        }

        pending.schedule();
        debug!(
            "[MOVE] {}\u{2192}{} applied, trailing sync scheduled",
            outcome.from, outcome.to
        );
    }
}

fn relocate(
    commands: &mut Commands,
    entity: Entity,
    transform: &mut Transform,
    geometry: &BoardGeometry,
    from: Square,
    to: Square,
    animate: bool,
) {
    if animate {
        commands
            .entity(entity)
            .insert(PieceMoveAnimation::new(from, to));
    } else {
        transform.translation = geometry.square_world_center(to).extend(Z_PIECE);
    }
}

/// Glide animated pieces between their endpoint squares. Endpoints are
/// resolved against the current geometry every frame, so a resize
/// mid-animation stays consistent.
pub fn animate_piece_movement(
    time: Res<Time>,
    geometry: Res<BoardGeometry>,
    mut commands: Commands,
    mut animations: Query<(Entity, &mut Transform, &mut PieceMoveAnimation)>,
) {
    for (entity, mut transform, mut animation) in animations.iter_mut() {
        animation.timer.tick(time.delta());
        let from = geometry.square_world_center(animation.from);
        let to = geometry.square_world_center(animation.to);
        if animation.timer.is_finished() {
            transform.translation = to.extend(Z_PIECE);
            commands.entity(entity).remove::<PieceMoveAnimation>();
        } else {
            let progress = animation.timer.fraction();
            transform.translation = from.lerp(to, progress).extend(Z_PIECE);
        }
    }
}

/// Fire the trailing full sync once its delay elapses.
pub fn tick_pending_sync(
    time: Res<Time>,
    mut pending: ResMut<PendingSync>,
    mut refresh: MessageWriter<RefreshBoard>,
) {
    if pending.bypass_change_detection().tick(time.delta()) {
        debug!("[SYNC] Trailing full sync firing");
        refresh.write(RefreshBoard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PieceColor;

    fn castle_outcome(kingside: bool, color: PieceColor) -> MoveOutcome {
        let (from, to) = match (color, kingside) {
            (PieceColor::White, true) => ("e1", "g1"),
            (PieceColor::White, false) => ("e1", "c1"),
            (PieceColor::Black, true) => ("e8", "g8"),
            (PieceColor::Black, false) => ("e8", "c8"),
        };
        MoveOutcome {
            from: Square::from_name(from).unwrap(),
            to: Square::from_name(to).unwrap(),
            color,
            san: None,
            is_castle_kingside: kingside,
            is_castle_queenside: !kingside,
        }
    }

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn rook_routes_are_fixed_per_side_and_wing() {
        assert_eq!(
            rook_route(&castle_outcome(true, PieceColor::White)),
            Some((sq("h1"), sq("f1")))
        );
        assert_eq!(
            rook_route(&castle_outcome(false, PieceColor::White)),
            Some((sq("a1"), sq("d1")))
        );
        assert_eq!(
            rook_route(&castle_outcome(true, PieceColor::Black)),
            Some((sq("h8"), sq("f8")))
        );
        assert_eq!(
            rook_route(&castle_outcome(false, PieceColor::Black)),
            Some((sq("a8"), sq("d8")))
        );
    }

    #[test]
    fn plain_moves_have_no_rook_route() {
        let outcome = MoveOutcome {
            from: sq("e2"),
            to: sq("e4"),
            color: PieceColor::White,
            san: None,
            is_castle_kingside: false,
            is_castle_queenside: false,
        };
        assert_eq!(rook_route(&outcome), None);
    }
}

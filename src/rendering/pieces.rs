//! Piece glyph nodes.
//!
//! Every piece is a `Text2d` entity showing the unicode chess glyph for its
//! `(color, kind)` pair. The twelve-entry table is total; an unmapped
//! combination cannot occur.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::game::components::{Piece, PieceMoveAnimation};
use crate::engine::{PieceColor, PieceType};
use crate::rendering::theme::{PIECE_SCALE, Z_PIECE};

pub use crate::rendering::theme::piece_paint;

/// Unicode glyph for a piece.
pub fn glyph_for(color: PieceColor, piece_type: PieceType) -> char {
    match (color, piece_type) {
        (PieceColor::White, PieceType::King) => '\u{2654}',
        (PieceColor::White, PieceType::Queen) => '\u{2655}',
        (PieceColor::White, PieceType::Rook) => '\u{2656}',
        (PieceColor::White, PieceType::Bishop) => '\u{2657}',
        (PieceColor::White, PieceType::Knight) => '\u{2658}',
        (PieceColor::White, PieceType::Pawn) => '\u{2659}',
        (PieceColor::Black, PieceType::King) => '\u{265A}',
        (PieceColor::Black, PieceType::Queen) => '\u{265B}',
        (PieceColor::Black, PieceType::Rook) => '\u{265C}',
        (PieceColor::Black, PieceType::Bishop) => '\u{265D}',
        (PieceColor::Black, PieceType::Knight) => '\u{265E}',
        (PieceColor::Black, PieceType::Pawn) => '\u{265F}',
    }
}

/// Spawn one piece glyph node at its square.
pub fn spawn_piece(commands: &mut Commands, geometry: &BoardGeometry, piece: Piece) -> Entity {
    let center = geometry.square_world_center(piece.square);
    commands
        .spawn((
            piece,
            Text2d::new(glyph_for(piece.color, piece.piece_type).to_string()),
            TextFont {
                font_size: geometry.cell_size * PIECE_SCALE,
                ..default()
            },
            TextColor(piece_paint(piece.color)),
            Transform::from_translation(center.extend(Z_PIECE)),
            Name::new(format!("{:?} {:?} {}", piece.color, piece.piece_type, piece.square)),
        ))
        .id()
}

/// Targeted reposition on geometry change: identity and content untouched,
/// only the pixel rect is recomputed. Animated pieces are skipped; the
/// animation re-anchors itself every frame.
pub fn reposition_pieces(
    geometry: Res<BoardGeometry>,
    mut pieces: Query<
        (&Piece, &mut Transform, &mut TextFont),
        Without<PieceMoveAnimation>,
    >,
) {
    if !geometry.is_changed() {
        return;
    }
    for (piece, mut transform, mut font) in pieces.iter_mut() {
        transform.translation = geometry.square_world_center(piece.square).extend(Z_PIECE);
        font.font_size = geometry.cell_size * PIECE_SCALE;
    }
}

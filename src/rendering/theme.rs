//! Colors, scales, and z-layering for the board scene.

use bevy::prelude::*;

use crate::board::Square;
use crate::engine::PieceColor;

// Board colors
pub const LIGHT_SQUARE: Srgba = Srgba::new(0.937, 0.851, 0.710, 1.0);
pub const DARK_SQUARE: Srgba = Srgba::new(0.706, 0.529, 0.392, 1.0);

// Piece glyph colors
pub const WHITE_PIECE: Srgba = Srgba::new(0.98, 0.97, 0.93, 1.0);
pub const BLACK_PIECE: Srgba = Srgba::new(0.09, 0.08, 0.09, 1.0);

// Decorations
pub const SELECTED_TINT: Srgba = Srgba::new(0.96, 0.83, 0.18, 0.55);
pub const TARGET_DOT: Srgba = Srgba::new(0.13, 0.42, 0.22, 0.85);
pub const LAST_MOVE_TINT: Srgba = Srgba::new(0.80, 0.75, 0.25, 0.42);
pub const CHECK_RING: Srgba = Srgba::new(0.85, 0.25, 0.18, 0.55);
pub const MATE_RING: Srgba = Srgba::new(0.55, 0.05, 0.05, 0.80);
pub const ILLEGAL_FLASH: Srgba = Srgba::new(0.90, 0.15, 0.15, 0.50);

pub const STATUS_TEXT: Srgba = Srgba::new(0.92, 0.92, 0.92, 1.0);

// Scales relative to the cell size
pub const PIECE_SCALE: f32 = 0.78;
pub const TARGET_DOT_SCALE: f32 = 0.30;
pub const RING_SCALE: f32 = 0.96;

// Z-layering: squares at the bottom, transient flashes on top. Target dots
// sit above the pieces so capture squares stay visibly marked.
pub const Z_SQUARE: f32 = 0.0;
pub const Z_SQUARE_TINT: f32 = 0.2;
pub const Z_RING: f32 = 0.3;
pub const Z_PIECE: f32 = 0.5;
pub const Z_HINT: f32 = 0.7;
pub const Z_FLASH: f32 = 0.9;

/// Checkerboard color for a square.
pub fn square_color(square: Square) -> Color {
    if square.is_light() {
        LIGHT_SQUARE.into()
    } else {
        DARK_SQUARE.into()
    }
}

/// Glyph color for a piece.
pub fn piece_paint(color: PieceColor) -> Color {
    match color {
        PieceColor::White => WHITE_PIECE.into(),
        PieceColor::Black => BLACK_PIECE.into(),
    }
}

//! Components carried by board and piece entities.

use bevy::prelude::*;

use crate::board::{PixelRect, Square};
use crate::engine::{PieceColor, PieceType};

/// Duration of the piece relocation animation, in seconds. Kept just under
/// the trailing-sync delay so the glide settles before the authoritative
/// rebuild snaps everything to engine truth.
pub const MOVE_ANIMATION_SECS: f32 = 0.1;

/// Marker for the 64 square entities.
#[derive(Component, Debug)]
pub struct Board;

/// A board square node: its identity plus the pixel rectangle it currently
/// occupies. The rectangle is the structural hit-testing source — a click is
/// matched against each node's own recorded extent before any arithmetic
/// fallback runs.
#[derive(Component, Clone, Copy, Debug)]
pub struct BoardSquare {
    pub square: Square,
    pub rect: PixelRect,
}

/// A piece glyph node. Mirrors engine truth as of the last sync; the glyph
/// and color are a pure function of `(color, piece_type)`.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub color: PieceColor,
    pub piece_type: PieceType,
    pub square: Square,
}

/// In-flight relocation of a piece node. Endpoints are stored as squares so
/// a resize mid-animation re-anchors the glide to the new geometry.
#[derive(Component, Debug)]
pub struct PieceMoveAnimation {
    pub from: Square,
    pub to: Square,
    pub timer: Timer,
}

impl PieceMoveAnimation {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            timer: Timer::from_seconds(MOVE_ANIMATION_SECS, TimerMode::Once),
        }
    }
}

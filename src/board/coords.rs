//! Square identity and pixel geometry.
//!
//! [`Square`] is the universal key shared by the engine contract, the visual
//! entities, and every decoration. [`BoardGeometry`] owns the mapping from
//! squares to pixel rectangles and back; it is re-derived from the current
//! window measurement on demand and never caches beyond that.
//!
//! The vertical axis inverts between chess and pixel space: rank 1 renders
//! at the bottom of the board, so `top = (7 - rank) * cell_size`. Files map
//! directly, `left = file * cell_size`.

use bevy::prelude::*;
use std::fmt;

/// Padding between the window edge and the board, in logical pixels.
pub const BOARD_PADDING: f32 = 20.0;

/// Lower bound on the cell size so the board stays usable in tiny windows.
pub const MIN_CELL_SIZE: f32 = 30.0;

/// Vertical gap between the board's bottom edge and the status line.
pub const STATUS_GAP: f32 = 24.0;

/// An algebraic board coordinate (`a1`..`h8`).
///
/// File and rank are both zero-based indices in `0..8`; `a1` is
/// `(file 0, rank 0)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    /// Returns `None` when either index falls outside `0..8`.
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Parse an algebraic name such as `"e4"`.
    pub fn from_name(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = (file_char as i32) - ('a' as i32);
        let rank = (rank_char as i32) - ('1' as i32);
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Zero-based file index (`a` = 0).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank `1` = 0).
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Algebraic name, e.g. `"e4"`.
    pub fn name(&self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Whether this square is a light square in the checkerboard pattern.
    pub fn is_light(&self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// Iterate over all 64 squares, `a1` first, `h8` last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An axis-aligned rectangle in window pixel space (origin top-left, y down).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Current board geometry, derived from the rendered window size.
///
/// `origin` is the pixel position of the board's top-left corner (the `a8`
/// corner); `cell_size` is `board_width / 8`.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub origin: Vec2,
    pub cell_size: f32,
    pub window: Vec2,
}

impl BoardGeometry {
    /// Derive geometry for a window of the given logical size, centering the
    /// board and reserving padding on all sides.
    pub fn for_window(width: f32, height: f32) -> Self {
        let available = width.min(height) - BOARD_PADDING * 2.0;
        let cell_size = (available / 8.0).max(MIN_CELL_SIZE);
        let board = cell_size * 8.0;
        let origin = Vec2::new((width - board) / 2.0, (height - board) / 2.0);
        Self {
            origin,
            cell_size,
            window: Vec2::new(width, height),
        }
    }

    /// Total board edge length in pixels.
    pub fn board_size(&self) -> f32 {
        self.cell_size * 8.0
    }

    /// Pixel rectangle of a square. Rank 1 sits at the bottom.
    pub fn square_rect(&self, square: Square) -> PixelRect {
        PixelRect {
            left: self.origin.x + square.file() as f32 * self.cell_size,
            top: self.origin.y + (7 - square.rank()) as f32 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// Inverse mapping from a window pixel position to a square.
    ///
    /// This is the hit-testing fallback used when a click cannot be resolved
    /// against a square node directly. Positions outside the 8x8 extent
    /// yield `None`.
    pub fn square_at(&self, position: Vec2) -> Option<Square> {
        let dx = position.x - self.origin.x;
        let dy = position.y - self.origin.y;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let file = (dx / self.cell_size) as u32;
        let row = (dy / self.cell_size) as u32;
        if file > 7 || row > 7 {
            return None;
        }
        Square::new(file as u8, (7 - row) as u8)
    }

    /// Convert a window pixel position to 2D world coordinates (camera at
    /// the window center, y up).
    pub fn to_world(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x - self.window.x / 2.0,
            self.window.y / 2.0 - position.y,
        )
    }

    /// World-space center of a square, the anchor for all visual nodes.
    pub fn square_world_center(&self, square: Square) -> Vec2 {
        self.to_world(self.square_rect(square).center())
    }

    /// World-space anchor of the status line, centered under the board.
    pub fn status_world_anchor(&self) -> Vec2 {
        let anchor = Vec2::new(
            self.origin.x + self.board_size() / 2.0,
            self.origin.y + self.board_size() + STATUS_GAP,
        );
        self.to_world(anchor)
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::for_window(720.0, 780.0)
    }
}

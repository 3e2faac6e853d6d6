//! Visual tree construction: board squares, piece glyphs, decorations.

pub mod board;
pub mod effects;
pub mod pieces;
pub mod theme;

pub use board::BoardPlugin;
pub use effects::EffectsPlugin;

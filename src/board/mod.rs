//! Board identity and geometry.

pub mod coords;

pub use coords::{BoardGeometry, PixelRect, Square};

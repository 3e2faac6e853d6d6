//! System organization.
//!
//! Systems run in a fixed order each frame so data flows one way: raw input
//! is resolved first, game state mutates second, and visuals are re-derived
//! last. The sets are chained in [`super::plugin::GamePlugin`].

use bevy::prelude::*;

/// Execution order for the interaction and rendering systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Pointer and keyboard resolution, window resize intake.
    Input,

    /// Selection/move state machine, move application, deferred sync timing.
    Execution,

    /// Piece sync, decorations, animation, repositioning.
    Visual,
}

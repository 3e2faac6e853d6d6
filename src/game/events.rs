//! Messages passed between the interaction systems.

use bevy::prelude::*;

use crate::board::Square;
use crate::engine::MoveOutcome;

/// A click resolved to a board square, ready for the state machine.
#[derive(Message, Debug, Clone, Copy)]
pub struct SquareClicked {
    pub square: Square,
}

/// A move the engine has executed; consumed by the move animator.
#[derive(Message, Debug, Clone)]
pub struct MoveApplied {
    pub outcome: MoveOutcome,
}

/// Request a transient illegal-move flash on a square.
#[derive(Message, Debug, Clone, Copy)]
pub struct IllegalFlashRequest {
    pub square: Square,
}

/// Rebuild all piece visuals from engine state and re-derive decorations.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RefreshBoard;

/// Force a full geometry + piece + decoration resync. Safe to send after
/// wholesale game replacement.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RerenderEverything;

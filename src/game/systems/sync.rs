//! Authoritative piece synchronization.
//!
//! The full sync tears down every piece node and rebuilds one per occupied
//! square straight from the engine. It is idempotent and derives entirely
//! from engine state, which is what makes deferring and superseding it safe
//! regardless of how clicks, resizes, and resets interleave.

use bevy::prelude::*;

use crate::board::{BoardGeometry, Square};
use crate::game::components::Piece;
use crate::game::events::RefreshBoard;
use crate::game::resources::ChessEngine;
use crate::rendering::pieces::spawn_piece;

/// Rebuild all piece visuals from engine state when a refresh is requested.
pub fn full_sync_system(
    mut refresh: MessageReader<RefreshBoard>,
    mut commands: Commands,
    engine: Res<ChessEngine>,
    geometry: Res<BoardGeometry>,
    pieces: Query<Entity, With<Piece>>,
) {
    if refresh.read().count() == 0 {
        return;
    }

    for entity in &pieces {
        commands.entity(entity).despawn();
    }

    let mut spawned = 0;
    for square in Square::all() {
        if let Some(found) = engine.piece_at(square) {
            spawn_piece(
                &mut commands,
                &geometry,
                Piece {
                    color: found.color,
                    piece_type: found.piece_type,
                    square,
                },
            );
            spawned += 1;
        }
    }

    debug!("[SYNC] Full sync rebuilt {spawned} piece nodes");
}

//! Check and checkmate rings on the threatened king's square.
//!
//! The two rings are mutually exclusive: when the engine reports mate, only
//! the mate ring is drawn and the check decoration is suppressed.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::engine::king_square;
use crate::game::events::RefreshBoard;
use crate::game::resources::ChessEngine;
use crate::rendering::theme::{CHECK_RING, MATE_RING, RING_SCALE, Z_RING};

/// Marker for the check ring.
#[derive(Component)]
pub struct CheckRing;

/// Marker for the checkmate ring.
#[derive(Component)]
pub struct MateRing;

/// Sweep both rings, then re-derive at most one from engine state.
pub fn update_check_rings(
    mut commands: Commands,
    engine: Res<ChessEngine>,
    geometry: Res<BoardGeometry>,
    mut refresh: MessageReader<RefreshBoard>,
    check_rings: Query<Entity, With<CheckRing>>,
    mate_rings: Query<Entity, With<MateRing>>,
) {
    let refreshed = refresh.read().count() > 0;
    if !(engine.is_changed() || geometry.is_changed() || refreshed) {
        return;
    }

    for entity in check_rings.iter().chain(mate_rings.iter()) {
        commands.entity(entity).despawn();
    }

    let is_mate = engine.in_checkmate();
    if !is_mate && !engine.in_check() {
        return;
    }
    let Some(king) = king_square(engine.rules(), engine.side_to_move()) else {
        return;
    };

    let sprite = Sprite {
        color: if is_mate {
            MATE_RING.into()
        } else {
            CHECK_RING.into()
        },
        custom_size: Some(Vec2::splat(geometry.cell_size * RING_SCALE)),
        ..default()
    };
    let transform =
        Transform::from_translation(geometry.square_world_center(king).extend(Z_RING));

    if is_mate {
        commands.spawn((sprite, transform, MateRing, Name::new(format!("Mate {king}"))));
    } else {
        commands.spawn((sprite, transform, CheckRing, Name::new(format!("Check {king}"))));
    }
}

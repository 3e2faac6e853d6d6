//! Last-move highlight on the from/to squares.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::core::GameSettings;
use crate::game::events::RefreshBoard;
use crate::game::resources::MoveHistory;
use crate::rendering::theme::{LAST_MOVE_TINT, Z_SQUARE_TINT};

/// Marker for the two last-move tints.
#[derive(Component)]
pub struct LastMoveHighlight;

/// Sweep and re-derive the last-move decoration from the move history.
pub fn update_last_move_highlight(
    mut commands: Commands,
    history: Res<MoveHistory>,
    settings: Res<GameSettings>,
    geometry: Res<BoardGeometry>,
    mut refresh: MessageReader<RefreshBoard>,
    highlights: Query<Entity, With<LastMoveHighlight>>,
) {
    let refreshed = refresh.read().count() > 0;
    if !(history.is_changed() || settings.is_changed() || geometry.is_changed() || refreshed) {
        return;
    }

    for entity in &highlights {
        commands.entity(entity).despawn();
    }

    if !settings.highlight_last_move {
        return;
    }
    let Some(last) = history.last_move() else {
        return;
    };

    for square in [last.from, last.to] {
        commands.spawn((
            Sprite {
                color: LAST_MOVE_TINT.into(),
                custom_size: Some(Vec2::splat(geometry.cell_size)),
                ..default()
            },
            Transform::from_translation(
                geometry.square_world_center(square).extend(Z_SQUARE_TINT),
            ),
            LastMoveHighlight,
            Name::new(format!("Last move {square}")),
        ));
    }
}

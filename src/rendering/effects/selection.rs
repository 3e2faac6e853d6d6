//! Selected-square highlight and legal-target dots.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::core::GameSettings;
use crate::game::events::RefreshBoard;
use crate::game::resources::Selection;
use crate::rendering::theme::{
    SELECTED_TINT, TARGET_DOT, TARGET_DOT_SCALE, Z_HINT, Z_SQUARE_TINT,
};

/// Marker for the single selected-square tint.
#[derive(Component)]
pub struct SelectedHighlight;

/// Marker for a legal-target dot. Dots render above pieces so occupied
/// capture squares stay visibly marked.
#[derive(Component)]
pub struct TargetHint;

/// Sweep and re-derive the selection decorations.
pub fn update_selection_decorations(
    mut commands: Commands,
    selection: Res<Selection>,
    settings: Res<GameSettings>,
    geometry: Res<BoardGeometry>,
    mut refresh: MessageReader<RefreshBoard>,
    highlights: Query<Entity, With<SelectedHighlight>>,
    hints: Query<Entity, With<TargetHint>>,
) {
    let refreshed = refresh.read().count() > 0;
    if !(selection.is_changed() || settings.is_changed() || geometry.is_changed() || refreshed) {
        return;
    }

    for entity in highlights.iter().chain(hints.iter()) {
        commands.entity(entity).despawn();
    }

    let Some(selected) = selection.selected else {
        return;
    };

    commands.spawn((
        Sprite {
            color: SELECTED_TINT.into(),
            custom_size: Some(Vec2::splat(geometry.cell_size)),
            ..default()
        },
        Transform::from_translation(
            geometry.square_world_center(selected).extend(Z_SQUARE_TINT),
        ),
        SelectedHighlight,
        Name::new(format!("Selected {selected}")),
    ));

    if !settings.show_hints {
        return;
    }

    for target in &selection.legal_targets {
        commands.spawn((
            Sprite {
                color: TARGET_DOT.into(),
                custom_size: Some(Vec2::splat(geometry.cell_size * TARGET_DOT_SCALE)),
                ..default()
            },
            Transform::from_translation(
                geometry.square_world_center(target.to).extend(Z_HINT),
            ),
            TargetHint,
            Name::new(format!("Target {}", target.to)),
        ));
    }
}

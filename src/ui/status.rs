//! Status line under the board.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::core::GameState;
use crate::engine::RulesEngine;
use crate::game::resources::StatusLine;
use crate::game::system_sets::GameSystems;
use crate::rendering::theme::STATUS_TEXT;

/// Derive the baseline status from engine state alone. Transient messages
/// ("Illegal move.", "Not your turn.") are layered on top by the input
/// handlers and replaced at the next state change.
pub fn derive_status(engine: &dyn RulesEngine) -> String {
    if engine.in_checkmate() {
        "Checkmate.".to_string()
    } else if engine.in_draw() {
        "Draw.".to_string()
    } else {
        format!("{} to move.", engine.side_to_move().label())
    }
}

/// Marker for the status text entity.
#[derive(Component)]
pub struct StatusText;

fn spawn_status_text(
    mut commands: Commands,
    geometry: Res<BoardGeometry>,
    status: Res<StatusLine>,
) {
    commands.spawn((
        StatusText,
        Text2d::new(status.0.clone()),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(STATUS_TEXT.into()),
        Transform::from_translation(geometry.status_world_anchor().extend(0.0)),
        Name::new("Status line"),
    ));
}

fn update_status_text(
    status: Res<StatusLine>,
    geometry: Res<BoardGeometry>,
    mut texts: Query<(&mut Text2d, &mut Transform), With<StatusText>>,
) {
    if !(status.is_changed() || geometry.is_changed()) {
        return;
    }
    for (mut text, mut transform) in texts.iter_mut() {
        text.0 = status.0.clone();
        transform.translation = geometry.status_world_anchor().extend(0.0);
    }
}

pub struct StatusPlugin;

impl Plugin for StatusPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), spawn_status_text);
        app.add_systems(
            Update,
            update_status_text
                .in_set(GameSystems::Visual)
                .run_if(in_state(GameState::InGame)),
        );
    }
}

//! Board surface construction.
//!
//! Exactly 64 square entities, spawned once per session and repositioned in
//! place afterwards. Rebuilding is avoided on resize so decoration entities
//! anchored to squares are never invalidated by a geometry change.

use bevy::prelude::*;

use crate::board::{BoardGeometry, Square};
use crate::core::GameState;
use crate::game::components::{Board, BoardSquare};
use crate::game::system_sets::GameSystems;
use crate::rendering::theme::{square_color, Z_SQUARE};

/// Spawn the 64-square grid from the current geometry.
pub(crate) fn create_board(mut commands: Commands, geometry: Res<BoardGeometry>) {
    let squares: Vec<_> = Square::all()
        .map(|square| {
            let rect = geometry.square_rect(square);
            let center = geometry.to_world(rect.center());
            (
                Sprite {
                    color: square_color(square),
                    custom_size: Some(Vec2::splat(geometry.cell_size)),
                    ..default()
                },
                Transform::from_translation(center.extend(Z_SQUARE)),
                BoardSquare { square, rect },
                Board,
                Name::new(format!("Square {square}")),
            )
        })
        .collect();

    for bundle in squares {
        commands.spawn(bundle);
    }

    info!(
        "[BOARD] Spawned 64 squares (cell {:.1}px)",
        geometry.cell_size
    );
}

/// Reposition the existing grid when the geometry changes. Identity and
/// decoration state on the nodes are preserved.
pub fn reposition_board(
    geometry: Res<BoardGeometry>,
    mut squares: Query<(&mut BoardSquare, &mut Sprite, &mut Transform), With<Board>>,
) {
    if !geometry.is_changed() {
        return;
    }
    for (mut node, mut sprite, mut transform) in squares.iter_mut() {
        let rect = geometry.square_rect(node.square);
        node.rect = rect;
        sprite.custom_size = Some(Vec2::splat(geometry.cell_size));
        transform.translation = geometry.to_world(rect.center()).extend(Z_SQUARE);
    }
}

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), create_board);
        app.add_systems(
            Update,
            (reposition_board, super::pieces::reposition_pieces).in_set(GameSystems::Visual),
        );
    }
}

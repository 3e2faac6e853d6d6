//! Transient illegal-move flash.
//!
//! The flash removes itself after a fixed short delay. Re-triggering on the
//! same square restarts the timer instead of stacking a second overlay; the
//! flash never blocks or queues anything.

use bevy::prelude::*;

use crate::board::{BoardGeometry, Square};
use crate::game::events::IllegalFlashRequest;
use crate::rendering::theme::{ILLEGAL_FLASH, Z_FLASH};

/// Flash lifetime, in seconds.
pub const ILLEGAL_FLASH_SECS: f32 = 0.15;

/// A live flash overlay on one square.
#[derive(Component, Debug)]
pub struct IllegalFlash {
    pub square: Square,
    pub timer: Timer,
}

/// Spawn or restart flashes for incoming requests.
pub fn trigger_illegal_flashes(
    mut commands: Commands,
    mut requests: MessageReader<IllegalFlashRequest>,
    geometry: Res<BoardGeometry>,
    mut live: Query<&mut IllegalFlash>,
) {
    for request in requests.read() {
        if let Some(mut flash) = live.iter_mut().find(|f| f.square == request.square) {
            flash.timer.reset();
            continue;
        }
        commands.spawn((
            Sprite {
                color: ILLEGAL_FLASH.into(),
                custom_size: Some(Vec2::splat(geometry.cell_size)),
                ..default()
            },
            Transform::from_translation(
                geometry
                    .square_world_center(request.square)
                    .extend(Z_FLASH),
            ),
            IllegalFlash {
                square: request.square,
                timer: Timer::from_seconds(ILLEGAL_FLASH_SECS, TimerMode::Once),
            },
            Name::new(format!("Illegal flash {}", request.square)),
        ));
    }
}

/// Age live flashes, keeping them anchored through resizes, and remove them
/// when their time is up.
pub fn tick_illegal_flashes(
    mut commands: Commands,
    time: Res<Time>,
    geometry: Res<BoardGeometry>,
    mut flashes: Query<(Entity, &mut IllegalFlash, &mut Sprite, &mut Transform)>,
) {
    for (entity, mut flash, mut sprite, mut transform) in flashes.iter_mut() {
        flash.timer.tick(time.delta());
        if flash.timer.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        sprite.custom_size = Some(Vec2::splat(geometry.cell_size));
        transform.translation = geometry
            .square_world_center(flash.square)
            .extend(Z_FLASH);
    }
}

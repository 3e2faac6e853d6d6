//! Game plugin: resources, messages, and the chained system schedule.

use bevy::prelude::*;

use crate::board::BoardGeometry;
use crate::core::GameState;
use crate::game::events::{
    IllegalFlashRequest, MoveApplied, RefreshBoard, RerenderEverything, SquareClicked,
};
use crate::game::resources::{MoveHistory, PendingSync, Selection, SessionStats, StatusLine};
use crate::game::system_sets::GameSystems;
use crate::game::systems::{
    animate_piece_movement, apply_move_visuals, enter_game, full_sync_system,
    handle_rerender_requests, handle_square_clicks, initialize_engine, keyboard_system,
    pointer_click_system, resize_reactor, show_startup_failure, tick_pending_sync,
};

/// Registers all interaction resources and systems.
///
/// Systems are grouped into the chained [`GameSystems`] sets so execution
/// order is explicit: input resolution, then state mutation, then visual
/// derivation. Everything is gated on [`GameState::InGame`] — if the engine
/// failed to initialize, none of this runs.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<MoveHistory>()
            .init_resource::<PendingSync>()
            .init_resource::<SessionStats>()
            .init_resource::<StatusLine>()
            .init_resource::<BoardGeometry>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>();

        app.add_message::<SquareClicked>()
            .add_message::<MoveApplied>()
            .add_message::<IllegalFlashRequest>()
            .add_message::<RefreshBoard>()
            .add_message::<RerenderEverything>()
            .add_message::<bevy::window::WindowResized>();

        app.configure_sets(
            Update,
            (
                GameSystems::Input,
                GameSystems::Execution,
                GameSystems::Visual,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(Startup, initialize_engine);
        app.add_systems(OnEnter(GameState::InGame), enter_game);
        app.add_systems(OnEnter(GameState::Failed), show_startup_failure);

        app.add_systems(
            Update,
            (
                (pointer_click_system, keyboard_system, resize_reactor)
                    .in_set(GameSystems::Input),
                (
                    handle_square_clicks,
                    apply_move_visuals,
                    tick_pending_sync,
                    handle_rerender_requests,
                )
                    .chain()
                    .in_set(GameSystems::Execution),
                (animate_piece_movement, full_sync_system)
                    .chain()
                    .in_set(GameSystems::Visual),
            ),
        );
    }
}

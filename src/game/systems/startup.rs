//! Engine construction and session entry.
//!
//! If the rules engine cannot be built there is nothing to interact with:
//! the app transitions to [`GameState::Failed`], shows one error line, and
//! never spawns a board or attaches input handling.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::board::BoardGeometry;
use crate::core::{GameSettings, GameState};
use crate::game::events::RefreshBoard;
use crate::game::resources::{ChessEngine, SessionStats, StartupFailure, StatusLine};
use crate::rendering::theme;

/// Build the rules engine from settings and decide the initial state.
pub fn initialize_engine(
    mut commands: Commands,
    settings: Option<Res<GameSettings>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let start_position = settings
        .as_ref()
        .and_then(|s| s.start_position.clone());

    match ChessEngine::initialize(start_position.as_deref()) {
        Ok(engine) => {
            commands.insert_resource(engine);
            if let Ok(window) = windows.single() {
                commands.insert_resource(BoardGeometry::for_window(
                    window.width(),
                    window.height(),
                ));
            }
            info!("[ENGINE] Rules engine ready");
            next_state.set(GameState::InGame);
        }
        Err(err) => {
            error!("[ENGINE] Initialization failed: {err}");
            commands.insert_resource(StartupFailure(err.to_string()));
            next_state.set(GameState::Failed);
        }
    }
}

/// First frame of a session: seed the status line, count the game, and
/// request the initial full sync.
pub fn enter_game(
    mut status: ResMut<StatusLine>,
    mut stats: ResMut<SessionStats>,
    mut refresh: MessageWriter<RefreshBoard>,
) {
    status.0 = "Ready. White to move.".to_string();
    stats.record_new_game();
    refresh.write(RefreshBoard);
}

/// Single user-visible error notice for a failed startup.
pub fn show_startup_failure(mut commands: Commands, failure: Option<Res<StartupFailure>>) {
    let message = failure
        .map(|f| format!("Chess engine unavailable: {}", f.0))
        .unwrap_or_else(|| "Chess engine unavailable.".to_string());

    commands.spawn((
        Text2d::new(message),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(theme::STATUS_TEXT.into()),
        Transform::from_translation(Vec3::ZERO),
        Name::new("Startup failure notice"),
    ));
}

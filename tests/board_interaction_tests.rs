//! Integration tests for the board interaction layer.
//!
//! These drive a headless app through resolved click messages and keyboard
//! input, then assert on the resulting entity set: piece nodes, decoration
//! markers, and the status line. The rendering backend is absent; only the
//! ECS data the systems derive is observed.

use std::thread::sleep;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::WindowResized;

use tapchess::board::{BoardGeometry, Square};
use tapchess::core::{GameSettings, GameState};
use tapchess::engine::{PieceColor, PieceType};
use tapchess::game::components::{Board, BoardSquare, Piece};
use tapchess::game::events::{RerenderEverything, SquareClicked};
use tapchess::game::resources::{ChessEngine, MoveHistory, Selection, SessionStats, StatusLine};
use tapchess::game::GamePlugin;
use tapchess::rendering::effects::{
    CheckRing, IllegalFlash, LastMoveHighlight, MateRing, SelectedHighlight, TargetHint,
};
use tapchess::rendering::theme::square_color;
use tapchess::rendering::{BoardPlugin, EffectsPlugin};
use tapchess::ui::StatusPlugin;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(GameSettings::default());
    app.add_plugins((GamePlugin, BoardPlugin, EffectsPlugin, StatusPlugin));
    // Startup constructs the engine and flips the state; the next update
    // enters the session and performs the initial full sync.
    app.update();
    app.update();
    app
}

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

fn click(app: &mut App, name: &str) {
    app.world_mut().write_message(SquareClicked { square: sq(name) });
    app.update();
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .reset_all();
}

fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<C>>();
    query.iter(world).count()
}

fn piece_on(app: &mut App, name: &str) -> Option<Piece> {
    let square = sq(name);
    let world = app.world_mut();
    let mut query = world.query::<&Piece>();
    query.iter(world).find(|p| p.square == square).copied()
}

fn status(app: &App) -> String {
    app.world().resource::<StatusLine>().0.clone()
}

fn settle(app: &mut App) {
    // Let the trailing full sync (and any flash) run its course.
    sleep(Duration::from_millis(160));
    app.update();
    app.update();
}

#[test]
fn startup_builds_the_full_scene() {
    let mut app = test_app();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::InGame);

    assert_eq!(count::<BoardSquare>(&mut app), 64);
    assert_eq!(count::<Piece>(&mut app), 32);
    assert_eq!(status(&app), "Ready. White to move.");
    assert_eq!(
        app.world().resource::<SessionStats>().games_started,
        1
    );
}

#[test]
fn board_squares_alternate_and_match_geometry() {
    let mut app = test_app();
    let geometry = *app.world().resource::<BoardGeometry>();

    let world = app.world_mut();
    let mut query = world.query_filtered::<(&BoardSquare, &Sprite), With<Board>>();
    for (node, sprite) in query.iter(world) {
        assert_eq!(node.rect, geometry.square_rect(node.square));
        assert_eq!(sprite.color, square_color(node.square));
    }
}

#[test]
fn bad_start_position_fails_without_a_board() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(GameSettings {
        start_position: Some("not a position".to_string()),
        ..Default::default()
    });
    app.add_plugins((GamePlugin, BoardPlugin, EffectsPlugin, StatusPlugin));
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Failed);
    assert_eq!(count::<BoardSquare>(&mut app), 0);
    assert_eq!(count::<Piece>(&mut app), 0);
}

#[test]
fn selecting_a_piece_decorates_its_targets() {
    let mut app = test_app();
    click(&mut app, "e2");

    let selection = app.world().resource::<Selection>();
    assert_eq!(selection.selected, Some(sq("e2")));

    assert_eq!(count::<SelectedHighlight>(&mut app), 1);
    assert_eq!(count::<TargetHint>(&mut app), 2); // e3 and e4
}

#[test]
fn clicking_the_selection_again_clears_every_decoration() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e2");

    assert!(app.world().resource::<Selection>().selected.is_none());
    assert_eq!(count::<SelectedHighlight>(&mut app), 0);
    assert_eq!(count::<TargetHint>(&mut app), 0);
}

#[test]
fn a_move_updates_history_status_and_the_highlight_pair() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e4");

    {
        let history = app.world().resource::<MoveHistory>();
        let last = history.last_move().unwrap();
        assert_eq!((last.from, last.to), (sq("e2"), sq("e4")));
        assert_eq!(history.len(), 1);
    }
    assert_eq!(status(&app), "e4. Black to move.");
    assert!(app.world().resource::<Selection>().selected.is_none());
    assert_eq!(count::<LastMoveHighlight>(&mut app), 2);

    // The mover's node is already re-tagged before the trailing sync.
    assert!(piece_on(&mut app, "e2").is_none());
    let pawn = piece_on(&mut app, "e4").unwrap();
    assert_eq!(pawn.piece_type, PieceType::Pawn);
    assert_eq!(pawn.color, PieceColor::White);

    settle(&mut app);
    assert_eq!(count::<Piece>(&mut app), 32);
    assert!(piece_on(&mut app, "e2").is_none());
}

#[test]
fn a_capture_leaves_exactly_one_node_on_the_target_square() {
    let mut app = test_app();
    for name in ["e2", "e4", "d7", "d5", "e4", "d5"] {
        click(&mut app, name);
    }
    settle(&mut app);

    assert_eq!(count::<Piece>(&mut app), 31);
    let world = app.world_mut();
    let mut query = world.query::<&Piece>();
    let on_d5: Vec<&Piece> = query.iter(world).filter(|p| p.square == sq("d5")).collect();
    assert_eq!(on_d5.len(), 1);
    assert_eq!(on_d5[0].color, PieceColor::White);
    assert_eq!(on_d5[0].piece_type, PieceType::Pawn);
}

#[test]
fn empty_or_opponent_squares_never_take_the_selection() {
    let mut app = test_app();

    click(&mut app, "e5"); // empty
    assert!(app.world().resource::<Selection>().selected.is_none());

    click(&mut app, "e7"); // black piece, white to move
    assert!(app.world().resource::<Selection>().selected.is_none());
    assert_eq!(status(&app), "Not your turn.");
    assert_eq!(count::<IllegalFlash>(&mut app), 1);
}

#[test]
fn illegal_targets_keep_the_selection_and_flash() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e5"); // not a pawn target

    assert_eq!(app.world().resource::<Selection>().selected, Some(sq("e2")));
    assert_eq!(status(&app), "Illegal move.");
    assert_eq!(count::<IllegalFlash>(&mut app), 1);
    assert!(app.world().resource::<MoveHistory>().is_empty());

    // The flash is transient and removes itself.
    settle(&mut app);
    assert_eq!(count::<IllegalFlash>(&mut app), 0);
}

#[test]
fn kingside_castle_relocates_king_and_rook_together() {
    let mut app = test_app();
    for name in [
        "e2", "e4", "e7", "e5", "g1", "f3", "b8", "c6", "f1", "c4", "f8", "c5", "e1", "g1",
    ] {
        click(&mut app, name);
    }
    settle(&mut app);

    assert_eq!(
        piece_on(&mut app, "g1").map(|p| p.piece_type),
        Some(PieceType::King)
    );
    assert_eq!(
        piece_on(&mut app, "f1").map(|p| p.piece_type),
        Some(PieceType::Rook)
    );
    assert!(piece_on(&mut app, "h1").is_none());
    assert!(piece_on(&mut app, "e1").is_none());
    assert_eq!(count::<Piece>(&mut app), 32);

    let last = app
        .world()
        .resource::<MoveHistory>()
        .last_move()
        .cloned()
        .unwrap();
    assert!(last.is_castle_kingside);
}

#[test]
fn undo_restores_the_previous_position_and_record() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e4");
    click(&mut app, "e7");
    click(&mut app, "e5");

    press(&mut app, KeyCode::ArrowLeft);

    // The record before the undone move is the last move again.
    {
        let history = app.world().resource::<MoveHistory>();
        let last = history.last_move().unwrap();
        assert_eq!((last.from, last.to), (sq("e2"), sq("e4")));
    }
    assert_eq!(count::<LastMoveHighlight>(&mut app), 2);
    assert!(piece_on(&mut app, "e7").is_some());
    assert!(piece_on(&mut app, "e5").is_none());
    assert_eq!(status(&app), "Black to move.");

    press(&mut app, KeyCode::ArrowLeft);
    assert!(app.world().resource::<MoveHistory>().is_empty());
    assert_eq!(count::<LastMoveHighlight>(&mut app), 0);
    assert!(piece_on(&mut app, "e2").is_some());
    assert_eq!(app.world().resource::<SessionStats>().undos, 2);

    // A third undo is a no-op.
    press(&mut app, KeyCode::ArrowLeft);
    assert_eq!(count::<Piece>(&mut app), 32);
}

#[test]
fn reset_returns_to_the_initial_scene() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e4");
    settle(&mut app);

    press(&mut app, KeyCode::KeyR);

    assert_eq!(status(&app), "Reset. White to move.");
    assert!(app.world().resource::<MoveHistory>().is_empty());
    assert_eq!(count::<Piece>(&mut app), 32);
    assert!(piece_on(&mut app, "e2").is_some());
    assert_eq!(count::<LastMoveHighlight>(&mut app), 0);
    assert_eq!(app.world().resource::<SessionStats>().games_started, 2);
}

#[test]
fn check_gets_a_ring_and_mate_replaces_it() {
    let mut app = test_app();
    // 1. e4 f6 2. Qh5+ — black is in check.
    for name in ["e2", "e4", "f7", "f6", "d1", "h5"] {
        click(&mut app, name);
    }
    assert_eq!(count::<CheckRing>(&mut app), 1);
    assert_eq!(count::<MateRing>(&mut app), 0);

    // Fresh session: fool's mate ends with exactly one mate ring.
    let mut app = test_app();
    for name in ["f2", "f3", "e7", "e5", "g2", "g4", "d8", "h4"] {
        click(&mut app, name);
    }
    assert_eq!(count::<MateRing>(&mut app), 1);
    assert_eq!(count::<CheckRing>(&mut app), 0);
    assert_eq!(status(&app), "Checkmate.");

    // Selecting the mated side produces no target decorations.
    click(&mut app, "e1");
    assert_eq!(count::<TargetHint>(&mut app), 0);
}

#[test]
fn resize_repositions_without_touching_state() {
    let mut app = test_app();
    click(&mut app, "e2");

    app.world_mut().write_message(WindowResized {
        window: Entity::PLACEHOLDER,
        width: 1080.0,
        height: 1080.0,
    });
    app.update();

    let geometry = *app.world().resource::<BoardGeometry>();
    assert_eq!(geometry.cell_size, (1080.0 - 40.0) / 8.0);

    // Selection and history survive; decorations re-anchor.
    assert_eq!(app.world().resource::<Selection>().selected, Some(sq("e2")));
    assert_eq!(count::<TargetHint>(&mut app), 2);
    assert_eq!(count::<BoardSquare>(&mut app), 64);

    // Every square node's recorded rect matches the new geometry.
    let world = app.world_mut();
    let mut query = world.query::<&BoardSquare>();
    for node in query.iter(world) {
        assert_eq!(node.rect, geometry.square_rect(node.square));
    }
}

#[test]
fn rerender_resyncs_after_wholesale_game_replacement() {
    let mut app = test_app();
    click(&mut app, "e2");
    click(&mut app, "e4");
    settle(&mut app);

    let replacement =
        ChessEngine::initialize(Some("k7/8/8/8/8/8/8/7K w - - 0 1")).unwrap();
    app.world_mut().insert_resource(replacement);
    app.world_mut().write_message(RerenderEverything);
    app.update();

    assert_eq!(count::<Piece>(&mut app), 2);
    assert!(piece_on(&mut app, "a8").is_some());
    assert!(piece_on(&mut app, "h1").is_some());
}

#[test]
fn hint_toggle_suppresses_target_dots_only() {
    let mut app = test_app();
    press(&mut app, KeyCode::KeyH); // hints off
    click(&mut app, "e2");

    assert_eq!(app.world().resource::<Selection>().selected, Some(sq("e2")));
    assert_eq!(count::<SelectedHighlight>(&mut app), 1);
    assert_eq!(count::<TargetHint>(&mut app), 0);
}

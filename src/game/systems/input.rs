//! Click resolution and the selection/move state machine.
//!
//! The machine has two states, Idle (`selected == None`) and PieceSelected,
//! and cycles for the life of the session. Every transition consults the
//! engine afresh — never the visual tree — so clicks arriving while a
//! trailing sync is still pending cannot smuggle an illegal move through.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::board::{BoardGeometry, Square};
use crate::core::GameSettings;
use crate::engine::{MoveOutcome, MoveRequest, PieceType};
use crate::game::components::BoardSquare;
use crate::game::events::{IllegalFlashRequest, MoveApplied, RefreshBoard, SquareClicked};
use crate::game::resources::{ChessEngine, MoveHistory, Selection, SessionStats, StatusLine};
use crate::ui::status::derive_status;

/// Result of feeding one resolved click through the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Empty square while idle; nothing happens.
    Ignored,
    /// A piece of the side to move was selected.
    Selected(Square),
    /// The selected square was clicked again; back to idle.
    Deselected,
    /// A piece of the side not to move was clicked while idle.
    WrongTurn(Square),
    /// The clicked square is not a legal target; selection is preserved.
    IllegalTarget(Square),
    /// The engine executed the move.
    Moved(MoveOutcome),
    /// The engine rejected a move the legality check had admitted. Should
    /// be unreachable, but must not corrupt the selection.
    Rejected(Square),
}

/// Advance the state machine by one click on `target`.
pub fn apply_click(
    target: Square,
    engine: &mut ChessEngine,
    selection: &mut Selection,
    history: &mut MoveHistory,
    stats: &mut SessionStats,
) -> ClickOutcome {
    match selection.selected {
        None => match engine.piece_at(target) {
            None => ClickOutcome::Ignored,
            Some(piece) if piece.color != engine.side_to_move() => {
                ClickOutcome::WrongTurn(target)
            }
            Some(_) => {
                selection.selected = Some(target);
                selection.legal_targets = engine.legal_targets(target);
                ClickOutcome::Selected(target)
            }
        },
        Some(selected) if selected == target => {
            selection.clear();
            ClickOutcome::Deselected
        }
        Some(selected) => {
            if !selection.is_legal_target(target) {
                return ClickOutcome::IllegalTarget(target);
            }
            let request = MoveRequest {
                from: selected,
                to: target,
                promotion: Some(PieceType::Queen),
            };
            match engine.execute(request) {
                Ok(outcome) => {
                    selection.clear();
                    history.add(outcome.clone());
                    stats.record_move(&outcome);
                    ClickOutcome::Moved(outcome)
                }
                Err(rejection) => {
                    warn!("[INPUT] Engine rejected a vetted move: {rejection}");
                    ClickOutcome::Rejected(target)
                }
            }
        }
    }
}

/// Resolve left clicks to board squares.
///
/// The square node whose own recorded rectangle contains the cursor wins;
/// when no node matches, the arithmetic pixel inverse is the fallback. If
/// both fail the click is discarded without any state change.
pub fn pointer_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    geometry: Res<BoardGeometry>,
    squares: Query<&BoardSquare>,
    mut clicks: MessageWriter<SquareClicked>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let structural = squares
        .iter()
        .find(|node| node.rect.contains(cursor))
        .map(|node| node.square);

    match structural.or_else(|| geometry.square_at(cursor)) {
        Some(square) => {
            debug!("[INPUT] Click resolved to {square}");
            clicks.write(SquareClicked { square });
        }
        None => debug!("[INPUT] Click outside the board discarded"),
    }
}

/// Feed resolved clicks through the state machine and fan the outcome out
/// to status, flash, and move-application messages.
pub fn handle_square_clicks(
    mut clicks: MessageReader<SquareClicked>,
    mut engine: ResMut<ChessEngine>,
    mut selection: ResMut<Selection>,
    mut history: ResMut<MoveHistory>,
    mut stats: ResMut<SessionStats>,
    mut status: ResMut<StatusLine>,
    mut moves: MessageWriter<MoveApplied>,
    mut flashes: MessageWriter<IllegalFlashRequest>,
) {
    for click in clicks.read() {
        match apply_click(
            click.square,
            &mut engine,
            &mut selection,
            &mut history,
            &mut stats,
        ) {
            ClickOutcome::Ignored | ClickOutcome::Selected(_) | ClickOutcome::Deselected => {}
            ClickOutcome::WrongTurn(square) => {
                status.0 = "Not your turn.".to_string();
                flashes.write(IllegalFlashRequest { square });
            }
            ClickOutcome::IllegalTarget(square) | ClickOutcome::Rejected(square) => {
                status.0 = "Illegal move.".to_string();
                flashes.write(IllegalFlashRequest { square });
            }
            ClickOutcome::Moved(outcome) => {
                status.0 = move_status(&outcome, engine.rules());
                moves.write(MoveApplied { outcome });
            }
        }
    }
}

/// Status after a successful move: the move in SAN followed by whose turn
/// it is, or the terminal verdict.
fn move_status(outcome: &MoveOutcome, engine: &dyn crate::engine::RulesEngine) -> String {
    if engine.in_checkmate() || engine.in_draw() {
        derive_status(engine)
    } else {
        format!("{}. {}", outcome, derive_status(engine))
    }
}

/// Keyboard bindings: undo (left arrow), reset (R), and the two decoration
/// toggles (H for hints, L for last-move highlight).
pub fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut engine: ResMut<ChessEngine>,
    mut selection: ResMut<Selection>,
    mut history: ResMut<MoveHistory>,
    mut stats: ResMut<SessionStats>,
    mut status: ResMut<StatusLine>,
    mut settings: ResMut<GameSettings>,
    mut refresh: MessageWriter<RefreshBoard>,
) {
    if keys.just_pressed(KeyCode::ArrowLeft) {
        if let Some(undone) = engine.undo() {
            history.pop();
            stats.record_undo();
            selection.clear();
            status.0 = derive_status(engine.rules());
            refresh.write(RefreshBoard);
            info!("[INPUT] Undid {}\u{2192}{}", undone.from, undone.to);
        } else {
            debug!("[INPUT] Nothing to undo");
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        engine.reset();
        history.clear();
        selection.clear();
        stats.record_new_game();
        status.0 = "Reset. White to move.".to_string();
        refresh.write(RefreshBoard);
    }

    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_hints = !settings.show_hints;
        info!("[INPUT] Legal-move hints: {}", settings.show_hints);
    }

    if keys.just_pressed(KeyCode::KeyL) {
        settings.highlight_last_move = !settings.highlight_last_move;
        info!(
            "[INPUT] Last-move highlight: {}",
            settings.highlight_last_move
        );
    }
}

//! Resize handling and forced rerenders.
//!
//! Resizing only re-derives [`BoardGeometry`]; every square, piece, and
//! decoration system repositions itself off the geometry change. Selection,
//! move history, and engine state are never touched, and running the
//! reactor redundantly is harmless.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::board::BoardGeometry;
use crate::game::events::{RefreshBoard, RerenderEverything};

/// Recompute geometry when the window's rendered size changes.
pub fn resize_reactor(
    mut resizes: MessageReader<WindowResized>,
    mut geometry: ResMut<BoardGeometry>,
) {
    let Some(resized) = resizes.read().last() else {
        return;
    };
    let next = BoardGeometry::for_window(resized.width, resized.height);
    if *geometry != next {
        *geometry = next;
        debug!(
            "[RESIZE] Window {}x{}, cell {:.1}px",
            resized.width, resized.height, geometry.cell_size
        );
    }
}

/// Handle [`RerenderEverything`]: re-measure the window, then force a full
/// piece and decoration resync. Callable after wholesale game replacement.
pub fn handle_rerender_requests(
    mut requests: MessageReader<RerenderEverything>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut geometry: ResMut<BoardGeometry>,
    mut refresh: MessageWriter<RefreshBoard>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if let Ok(window) = windows.single() {
        let next = BoardGeometry::for_window(window.width(), window.height());
        if *geometry != next {
            *geometry = next;
        }
    }
    refresh.write(RefreshBoard);
    info!("[RESIZE] Full rerender requested");
}

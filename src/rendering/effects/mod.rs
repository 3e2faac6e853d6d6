//! Square decorations.
//!
//! Decorations are derived state only: every system here clears its marker
//! entities with a full sweep and re-derives them from the selection, the
//! move history, and the engine's check/mate queries. Nothing survives a
//! re-derive, so no decoration can leak across a full resync.

pub mod check;
pub mod illegal;
pub mod last_move;
pub mod selection;

use bevy::prelude::*;

use crate::core::GameState;
use crate::game::system_sets::GameSystems;

pub use check::{CheckRing, MateRing};
pub use illegal::IllegalFlash;
pub use last_move::LastMoveHighlight;
pub use selection::{SelectedHighlight, TargetHint};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                selection::update_selection_decorations,
                last_move::update_last_move_highlight,
                check::update_check_rings,
                illegal::trigger_illegal_flashes,
                illegal::tick_illegal_flashes,
            )
                .in_set(GameSystems::Visual)
                .run_if(in_state(GameState::InGame)),
        );
    }
}

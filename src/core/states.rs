//! Application state machine.
//!
//! The flow is deliberately small: `Boot` performs settings loading and
//! engine construction, then hands off to `InGame` where the board lives for
//! the rest of the session. If the rules engine cannot be built, the app
//! lands in `Failed` and never spawns a board or attaches input handling.
//!
//! ```text
//! Boot ──→ InGame
//!   └────→ Failed
//! ```

use bevy::prelude::*;

/// Primary application state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, States)]
pub enum GameState {
    /// Startup: load settings, construct the rules engine.
    #[default]
    Boot,

    /// Active session: board, pieces, and input handling are live.
    InGame,

    /// The rules engine could not be initialized; a single error notice is
    /// shown and nothing else runs.
    Failed,
}

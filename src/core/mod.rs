//! Core application infrastructure: states, settings, and error types.

pub mod error;
pub mod plugin;
pub mod settings;
pub mod states;

pub use error::{CoreError, CoreResult};
pub use plugin::CorePlugin;
pub use settings::{load_settings_system, save_settings_system, GameSettings};
pub use states::GameState;

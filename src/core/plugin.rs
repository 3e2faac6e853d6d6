//! Core plugin: state registration and settings persistence.
//!
//! This plugin should be added before the game and rendering plugins as it
//! registers [`GameState`] and loads [`super::GameSettings`] at startup.

use bevy::prelude::*;

use super::settings::{load_settings_system, save_settings_system};
use super::states::GameState;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>();
        // PreStartup so settings are flushed in before the engine boots.
        app.add_systems(PreStartup, load_settings_system);
        app.add_systems(Update, save_settings_system);
    }
}

//! Game settings and their persistence.
//!
//! Settings are stored as JSON in the platform configuration directory and
//! loaded once at startup. Load failures fall back to defaults; save
//! failures are logged but never interrupt play.

use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILENAME: &str = "settings.json";

/// User-tunable settings.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// Whether to decorate legal target squares while a piece is selected
    pub show_hints: bool,

    /// Whether to highlight the from/to squares of the last move
    pub highlight_last_move: bool,

    /// Whether piece relocation is animated or snaps instantly
    pub animate_moves: bool,

    /// Optional FEN to start from instead of the standard initial position
    pub start_position: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            show_hints: true,
            highlight_last_move: true,
            animate_moves: true,
            start_position: None,
        }
    }
}

/// Resolve the settings file path.
///
/// Falls back to a local `settings.json` if the system config directory
/// cannot be determined.
fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "tapchess", "TapChess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from disk on startup, inserting defaults when the file is
/// missing or unreadable.
pub fn load_settings_system(mut commands: Commands) {
    let path = settings_path();

    if path.exists() {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<GameSettings>(&contents) {
                Ok(settings) => {
                    info!("[SETTINGS] Loaded settings from {:?}", path);
                    commands.insert_resource(settings);
                    return;
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to parse {:?}: {}. Using defaults.",
                        path, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to read {:?}: {}. Using defaults.",
                    path, e
                );
            }
        }
    } else {
        info!("[SETTINGS] No settings file at {:?}. Using defaults.", path);
    }

    commands.insert_resource(GameSettings::default());
}

/// Save settings whenever they change (including the initial insert, which
/// harmlessly writes the current state back out).
pub fn save_settings_system(settings: Res<GameSettings>) {
    if !settings.is_changed() {
        return;
    }

    let path = settings_path();

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("[SETTINGS] Failed to create {:?}: {}", parent, e);
                return;
            }
        }
    }

    match serde_json::to_string_pretty(&*settings) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                error!("[SETTINGS] Failed to write {:?}: {}", path, e);
            }
        }
        Err(e) => error!("[SETTINGS] Failed to serialize settings: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_all_visual_aids() {
        let settings = GameSettings::default();
        assert!(settings.show_hints);
        assert!(settings.highlight_last_move);
        assert!(settings.animate_moves);
        assert!(settings.start_position.is_none());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = GameSettings {
            show_hints: false,
            highlight_last_move: true,
            animate_moves: false,
            start_position: Some("8/8/8/8/8/8/8/8 w - - 0 1".to_string()),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: GameSettings = serde_json::from_str(&json).unwrap();
        assert!(!back.show_hints);
        assert!(!back.animate_moves);
        assert_eq!(back.start_position, settings.start_position);
    }
}

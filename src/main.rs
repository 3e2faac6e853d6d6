use bevy::prelude::*;

use tapchess::core::CorePlugin;
use tapchess::game::GamePlugin;
use tapchess::rendering::{BoardPlugin, EffectsPlugin};
use tapchess::ui::StatusPlugin;

const WINDOW_WIDTH: u32 = 720;
const WINDOW_HEIGHT: u32 = 780;

fn main() {
    let window = Window {
        title: "TapChess".to_string(),
        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
        ..default()
    };
    let primary_window = Some(window);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window,
            ..default()
        }))
        .add_plugins(CorePlugin)
        .add_plugins(GamePlugin)
        .add_plugins(BoardPlugin)
        .add_plugins(EffectsPlugin)
        .add_plugins(StatusPlugin)
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

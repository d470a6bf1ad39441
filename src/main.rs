//! Main binary for the interactive tree experience.

use bevy::prelude::*;
use luxe_tree::ScenePlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grand Luxury — Interactive Christmas Experience".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ScenePlugin)
        .run();
}

//! # luxe_tree
//!
//! Scene composer for the particle tree: camera, lights, post effects, and
//! the toggle UI, assembled around the [`bevy_tree_morph`] engine. All of
//! the algorithmic work lives in the engine crate — this crate only mounts
//! groups and consumes their output.

pub mod config;
pub mod scene;
pub mod ui;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_tree_morph::TreeMorphPlugin;

/// Top-level plugin: engine + egui + scene setup + overlay.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(TreeMorphPlugin)
            .add_plugins(ui::OverlayPlugin)
            .insert_resource(ClearColor(Color::srgb_u8(2, 8, 4)))
            .add_systems(Startup, (scene::setup_scene, scene::spawn_groups));
    }
}

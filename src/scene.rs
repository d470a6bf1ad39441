//! Scene setup: camera, lights, post effects, and the particle groups.
//!
//! Everything here is read-only context for the engine — it consumes the
//! blended output and never originates positions or colors.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::config::load_scene_config;

/// Marker for the tree assembly root; every particle group hangs under it.
#[derive(Component)]
pub struct TreeRoot;

/// Camera, lights, and post effects for the cinematic look. HDR + bloom make
/// the emissive lights glow once the tree is formed.
pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: 0.25,
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 22.0).looking_at(Vec3::new(0.0, 0.0, 0.0), Vec3::Y),
    ));

    // Dim green ambient keeps the chaos cloud readable without washing out
    // the additive foliage.
    commands.spawn(AmbientLight {
        color: Color::srgb_u8(0, 26, 16),
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });

    // Warm key light from above.
    commands.spawn((
        SpotLight {
            color: Color::srgb_u8(255, 250, 224),
            intensity: 8_000_000.0,
            range: 80.0,
            outer_angle: 0.3,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Cool green accent from behind.
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0, 255, 136),
            intensity: 300_000.0,
            range: 60.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 5.0, -10.0),
    ));
}

/// Mount one entity per configured group under the tree root. The engine
/// picks up the `GroupConfig` components and builds the renderables.
pub fn spawn_groups(mut commands: Commands) {
    let groups = load_scene_config();

    commands
        .spawn((
            Name::new("Tree"),
            TreeRoot,
            Transform::from_xyz(0.0, -2.0, 0.0),
            Visibility::default(),
        ))
        .with_children(|tree| {
            for config in groups {
                tree.spawn((
                    Name::new(config.role.label()),
                    config,
                    Transform::default(),
                    Visibility::default(),
                ));
            }
        });
}

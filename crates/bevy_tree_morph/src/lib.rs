//! # bevy_tree_morph
//!
//! Particle morphing engine: groups of particles that continuously
//! interpolate between a dispersed chaos cloud and an assembled tree,
//! driven by a single global toggle.
//!
//! Each group carries a fixed set of (origin, destination) pairs generated
//! once at creation. A per-group progress scalar converges toward the global
//! [`TreeState`] target with exponential smoothing; two blending policies
//! turn that state into render positions every frame — a shader-blended
//! point cloud for foliage and CPU-updated mesh instances for ornaments.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_tree_morph::{TreeMorphPlugin, presets};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TreeMorphPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     for config in presets::scene_groups() {
//!         commands.spawn((config, Transform::default(), Visibility::default()));
//!     }
//! }
//! ```
//!
//! Flip `ResMut<TreeState>` to retarget every group; a mid-flight toggle
//! reverses direction smoothly because progress is continuous state, not a
//! fire-and-forget tween.

pub mod blend;
pub mod data;
pub mod generate;
pub mod instances;
pub mod points;
pub mod presets;
pub mod progress;

// Re-export core types
pub use data::{BlendPolicy, ConfigError, GroupConfig, Particle, ParticleRole, TreeShape, TreeState};
pub use progress::GroupProgress;

use bevy::prelude::*;

use instances::{OrnamentAssets, cleanup_ornament_groups, rebuild_ornament_groups, update_ornaments};
use points::{FoliagePointsPlugin, rebuild_foliage_groups, update_foliage_material};
use progress::integrate_progress;

/// Main engine plugin. Registers types, the foliage material, and the
/// per-frame update chain. Exactly one update pass runs per group per frame:
/// regeneration, then progress integration, then the blend/write stage.
pub struct TreeMorphPlugin;

impl Plugin for TreeMorphPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TreeState>()
            .register_type::<GroupConfig>()
            .register_type::<TreeShape>()
            .register_type::<ParticleRole>()
            .register_type::<GroupProgress>()
            .init_resource::<TreeState>()
            .init_resource::<OrnamentAssets>()
            .add_plugins(FoliagePointsPlugin)
            .add_systems(
                Update,
                (
                    rebuild_foliage_groups,
                    rebuild_ornament_groups,
                    cleanup_ornament_groups,
                    integrate_progress,
                    update_foliage_material,
                    update_ornaments,
                )
                    .chain(),
            );
    }
}

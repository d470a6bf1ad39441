//! Built-in group configurations for the default scene.
//!
//! Lerp speeds encode visual weight: gifts are heavy and settle last, lights
//! snap into place first, so the tree assembles in layers.

use crate::data::{GroupConfig, ParticleRole, TreeShape};

/// The four groups the default scene mounts.
pub fn scene_groups() -> Vec<GroupConfig> {
    vec![foliage(), gifts(), balls(), lights()]
}

pub fn foliage() -> GroupConfig {
    GroupConfig {
        count: 12000,
        role: ParticleRole::Foliage,
        lerp_speed: 1.5,
        shape: TreeShape {
            chaos_radius: 25.0,
            ..TreeShape::default()
        },
    }
}

pub fn gifts() -> GroupConfig {
    GroupConfig {
        count: 30,
        role: ParticleRole::Gift,
        lerp_speed: 1.0,
        shape: ornament_shape(),
    }
}

pub fn balls() -> GroupConfig {
    GroupConfig {
        count: 200,
        role: ParticleRole::Ball,
        lerp_speed: 2.0,
        shape: ornament_shape(),
    }
}

pub fn lights() -> GroupConfig {
    GroupConfig {
        count: 400,
        role: ParticleRole::Light,
        lerp_speed: 4.0,
        shape: ornament_shape(),
    }
}

/// Ornaments scatter through a wider chaos sphere than the foliage.
fn ornament_shape() -> TreeShape {
    TreeShape {
        chaos_radius: 30.0,
        ..TreeShape::default()
    }
}

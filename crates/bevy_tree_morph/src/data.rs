//! Core data model for the tree morphing engine.
//!
//! Configuration types are serializable (serde + RON) and reflectable so the
//! host application can load a scene description from disk and inspect groups
//! at runtime. Generated particle data is plain structs — it never leaves the
//! engine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Global assembly target
// ---------------------------------------------------------------------------

/// The single externally observable control surface: every group converges
/// toward this target. Per-frame systems read it live through `Res<TreeState>`
/// each tick — nothing captures a snapshot, so a mid-flight toggle is a
/// direction reversal of the same continuous state.
#[derive(Resource, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource, Default)]
pub enum TreeState {
    /// Dispersed cloud.
    #[default]
    Chaos,
    /// Assembled tree.
    Formed,
}

impl TreeState {
    /// Flip between the two targets.
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Chaos => Self::Formed,
            Self::Formed => Self::Chaos,
        };
    }

    /// Numeric encoding the progress integrator converges toward.
    pub fn target(self) -> f32 {
        match self {
            Self::Chaos => 0.0,
            Self::Formed => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Chaos => "Chaos",
            Self::Formed => "Formed",
        }
    }
}

// ---------------------------------------------------------------------------
// Particle roles
// ---------------------------------------------------------------------------

/// Visual role of a particle group. The role fixes the destination
/// distribution, the color palette, and the blending policy.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect,
)]
pub enum ParticleRole {
    /// Point-cloud needles forming the cone surface.
    #[default]
    Foliage,
    /// Boxes clustered around the tree base.
    Gift,
    /// Ball ornaments on the cone surface.
    Ball,
    /// Small emissive lights on the cone surface.
    Light,
}

impl ParticleRole {
    pub const ALL: [Self; 4] = [Self::Foliage, Self::Gift, Self::Ball, Self::Light];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Foliage => "Foliage",
            Self::Gift => "Gift",
            Self::Ball => "Ball",
            Self::Light => "Light",
        }
    }

    /// Blending policy bound at group creation. Foliage rides the
    /// vertex-parallel point-cloud path; everything else is updated
    /// per-instance on the CPU.
    pub fn blend_policy(self) -> BlendPolicy {
        match self {
            Self::Foliage => BlendPolicy::PointCloud,
            Self::Gift | Self::Ball | Self::Light => BlendPolicy::Instance,
        }
    }

    /// Fixed palette the generator draws from.
    pub fn palette(self) -> &'static [LinearRgba] {
        match self {
            Self::Foliage => &[DEEP_EMERALD],
            Self::Gift => &[OLD_GOLD, BURGUNDY, WHITE],
            Self::Ball => &[GOLD, SILVER, FIREBRICK, DEEP_EMERALD],
            Self::Light => &[WARM_WHITE, GOLD],
        }
    }
}

/// How a group's positions are blended each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum BlendPolicy {
    /// One eased progress scalar drives every vertex; the blend itself runs
    /// in the vertex shader.
    PointCloud,
    /// Each instance is pulled toward the live endpoint with a
    /// distance-weighted lerp on the CPU.
    Instance,
}

// Palette constants. Component values mirror the reference scene's colors.
pub const DEEP_EMERALD: LinearRgba = LinearRgba { red: 0.0, green: 0.259, blue: 0.145, alpha: 1.0 };
pub const GOLD: LinearRgba = LinearRgba { red: 1.0, green: 0.843, blue: 0.0, alpha: 1.0 };
pub const OLD_GOLD: LinearRgba = LinearRgba { red: 0.831, green: 0.686, blue: 0.216, alpha: 1.0 };
pub const BURGUNDY: LinearRgba = LinearRgba { red: 0.5, green: 0.0, blue: 0.125, alpha: 1.0 };
pub const WHITE: LinearRgba = LinearRgba { red: 1.0, green: 1.0, blue: 1.0, alpha: 1.0 };
pub const SILVER: LinearRgba = LinearRgba { red: 0.753, green: 0.753, blue: 0.753, alpha: 1.0 };
pub const FIREBRICK: LinearRgba = LinearRgba { red: 0.698, green: 0.133, blue: 0.133, alpha: 1.0 };
pub const WARM_WHITE: LinearRgba = LinearRgba { red: 1.0, green: 1.0, blue: 0.878, alpha: 1.0 };

// ---------------------------------------------------------------------------
// Shape parameters
// ---------------------------------------------------------------------------

/// Fixed shape parameters for a group: the cone the particles assemble into
/// and the sphere they scatter through.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct TreeShape {
    /// Total cone height; destinations are centered vertically around 0.
    pub height: f32,
    /// Cone radius at the base (height fraction 0).
    pub base_radius: f32,
    /// Radius of the chaos sphere origins are sampled from.
    pub chaos_radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 14.0,
            base_radius: 5.5,
            chaos_radius: 25.0,
        }
    }
}

impl TreeShape {
    fn is_valid(&self) -> bool {
        let finite =
            self.height.is_finite() && self.base_radius.is_finite() && self.chaos_radius.is_finite();
        finite && self.height > 0.0 && self.base_radius > 0.0 && self.chaos_radius > 0.0
    }
}

// ---------------------------------------------------------------------------
// Group configuration
// ---------------------------------------------------------------------------

/// Configuration of one particle group. Immutable once applied — mutating the
/// component regenerates the whole group (fresh endpoints, progress back to
/// zero). Validated before any geometry is produced.
#[derive(Component, Serialize, Deserialize, Clone, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroupConfig {
    /// Number of particles; fixed for the group's lifetime.
    pub count: u32,
    /// Visual role; selects destinations, palette, and blend policy.
    pub role: ParticleRole,
    /// Convergence weight. Heavier roles use smaller values so the assembly
    /// arrives in layers instead of snapping.
    pub lerp_speed: f32,
    /// Cone and chaos-sphere dimensions.
    pub shape: TreeShape,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            role: ParticleRole::Foliage,
            lerp_speed: 1.5,
            shape: TreeShape::default(),
        }
    }
}

impl GroupConfig {
    /// Fail fast on degenerate configuration. Called at group creation,
    /// before any sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount);
        }
        if !self.lerp_speed.is_finite() || self.lerp_speed <= 0.0 {
            return Err(ConfigError::InvalidLerpSpeed(self.lerp_speed));
        }
        if !self.shape.is_valid() {
            return Err(ConfigError::InvalidShape {
                height: self.shape.height,
                base_radius: self.shape.base_radius,
                chaos_radius: self.shape.chaos_radius,
            });
        }
        Ok(())
    }
}

/// Rejected group configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be positive")]
    InvalidCount,
    #[error("lerp speed must be positive and finite, got {0}")]
    InvalidLerpSpeed(f32),
    #[error(
        "shape parameters must be positive and finite: height={height}, base_radius={base_radius}, chaos_radius={chaos_radius}"
    )]
    InvalidShape {
        height: f32,
        base_radius: f32,
        chaos_radius: f32,
    },
}

// ---------------------------------------------------------------------------
// Generated particle record
// ---------------------------------------------------------------------------

/// One generated particle. Origin, destination, seed, color, and scale are
/// produced together and never independently mutated; only the blend step
/// derives a current position from them.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Position in the dispersed chaos cloud.
    pub origin: Vec3,
    /// Position in the assembled tree.
    pub destination: Vec3,
    /// Per-particle random value in [0, 1) for visual variance.
    pub seed: f32,
    /// Palette color assigned at generation.
    pub color: LinearRgba,
    /// Base scale; render-time pulsing never writes this back.
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_encodes() {
        let mut state = TreeState::Chaos;
        assert_eq!(state.target(), 0.0);
        state.toggle();
        assert_eq!(state, TreeState::Formed);
        assert_eq!(state.target(), 1.0);
        state.toggle();
        assert_eq!(state, TreeState::Chaos);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GroupConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_count_rejected() {
        let config = GroupConfig {
            count: 0,
            ..default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCount));
    }

    #[test]
    fn non_positive_lerp_speed_rejected() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = GroupConfig {
                lerp_speed: bad,
                ..default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidLerpSpeed(_))
            ));
        }
    }

    #[test]
    fn non_finite_shape_rejected() {
        let config = GroupConfig {
            shape: TreeShape {
                height: f32::NAN,
                ..default()
            },
            ..default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidShape { .. })));
    }

    #[test]
    fn roles_bind_expected_policies() {
        assert_eq!(ParticleRole::Foliage.blend_policy(), BlendPolicy::PointCloud);
        for role in [ParticleRole::Gift, ParticleRole::Ball, ParticleRole::Light] {
            assert_eq!(role.blend_policy(), BlendPolicy::Instance);
        }
    }
}

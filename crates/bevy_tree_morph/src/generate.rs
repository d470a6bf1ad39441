//! Particle generation: paired chaos/tree positions plus per-particle
//! visual attributes.
//!
//! Generation runs once per group creation (or config change), never in the
//! per-frame path. Layout is intentionally non-deterministic — regeneration
//! reshuffles the cloud — so tests assert bounds and distributions, not
//! exact values.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::{ConfigError, GroupConfig, Particle, ParticleRole, TreeShape, DEEP_EMERALD, GOLD};

/// Produce the full particle set for a group. Validates the configuration
/// before any sampling and fails fast on degenerate parameters.
pub fn generate_particles(config: &GroupConfig) -> Result<Vec<Particle>, ConfigError> {
    config.validate()?;

    let shape = config.shape;
    let particles = (0..config.count as usize)
        .map(|index| {
            let seed = fastrand::f32();
            let origin = random_in_sphere(shape.chaos_radius);
            let destination = match config.role {
                ParticleRole::Foliage => foliage_destination(index, shape),
                ParticleRole::Ball | ParticleRole::Light => ornament_destination(shape),
                ParticleRole::Gift => gift_destination(shape),
            };
            Particle {
                origin,
                destination,
                seed,
                color: pick_color(config.role, seed),
                scale: 0.8 + 0.4 * fastrand::f32(),
            }
        })
        .collect();

    Ok(particles)
}

/// Uniform-volume sample inside a sphere: radius `R * cbrt(u)` avoids center
/// clustering, polar angle `acos(2u - 1)` keeps the angular density uniform.
fn random_in_sphere(radius: f32) -> Vec3 {
    let theta = fastrand::f32() * TAU;
    let phi = (2.0 * fastrand::f32() - 1.0).acos();
    let r = radius * fastrand::f32().cbrt();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Cone point for foliage. The azimuth advances in an index-based spiral so
/// coverage stays even at any count; the radial jitter is sqrt-distributed
/// for a uniform disk at each height.
fn foliage_destination(index: usize, shape: TreeShape) -> Vec3 {
    let y_norm = fastrand::f32();
    let y = y_norm * shape.height - shape.height * 0.5;
    let cone_radius = (1.0 - y_norm) * shape.base_radius;

    let angle = index as f32 * 0.1 + fastrand::f32() * 0.5;
    let r = cone_radius * fastrand::f32().sqrt();

    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Cone point for discrete ornaments: fully random azimuth, radius biased
/// toward the outer surface so ornaments hang on the tree instead of
/// floating inside it.
fn ornament_destination(shape: TreeShape) -> Vec3 {
    let y_norm = fastrand::f32();
    let y = y_norm * shape.height - shape.height * 0.5;
    let cone_radius = (1.0 - y_norm) * shape.base_radius;

    let r = cone_radius * (0.8 + 0.2 * fastrand::f32());
    let angle = fastrand::f32() * TAU;

    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Cluster point at the tree base: a narrow vertical band below the cone,
/// scattered radially around the trunk.
fn gift_destination(shape: TreeShape) -> Vec3 {
    let y = -shape.height * 0.5 - 1.0 + fastrand::f32() * 2.0;
    let dist = 2.0 + fastrand::f32() * 3.0;
    let angle = fastrand::f32() * TAU;

    Vec3::new(dist * angle.cos(), y, dist * angle.sin())
}

/// Palette pick. Discrete ornaments draw uniformly from the role palette;
/// foliage blends emerald toward gold by the particle's own seed, matching
/// the shader-side mix.
fn pick_color(role: ParticleRole, seed: f32) -> LinearRgba {
    match role {
        ParticleRole::Foliage => foliage_color(seed),
        _ => {
            let palette = role.palette();
            palette[fastrand::usize(..palette.len())]
        }
    }
}

/// Deep emerald with a seed-weighted touch of gold.
pub fn foliage_color(seed: f32) -> LinearRgba {
    let t = seed * 0.15;
    LinearRgba {
        red: DEEP_EMERALD.red + (GOLD.red - DEEP_EMERALD.red) * t,
        green: DEEP_EMERALD.green + (GOLD.green - DEEP_EMERALD.green) * t,
        blue: DEEP_EMERALD.blue + (GOLD.blue - DEEP_EMERALD.blue) * t,
        alpha: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GroupConfig, ParticleRole, TreeShape};

    fn config(count: u32, role: ParticleRole) -> GroupConfig {
        GroupConfig {
            count,
            role,
            lerp_speed: 1.5,
            shape: TreeShape::default(),
        }
    }

    #[test]
    fn foliage_generation_count_and_bounds() {
        let cfg = config(12000, ParticleRole::Foliage);
        let particles = generate_particles(&cfg).unwrap();
        assert_eq!(particles.len(), 12000);

        let shape = cfg.shape;
        for p in &particles {
            assert!(
                p.origin.length() <= shape.chaos_radius + 1e-3,
                "origin outside chaos sphere: {:?}",
                p.origin
            );
            let radial = Vec3::new(p.destination.x, 0.0, p.destination.z).length();
            assert!(radial <= shape.base_radius + 1e-3);
            assert!(p.destination.y >= -shape.height * 0.5 - 1e-3);
            assert!(p.destination.y <= shape.height * 0.5 + 1e-3);
            assert!((0.0..1.0).contains(&p.seed));
            assert!(p.scale >= 0.8 - 1e-6 && p.scale <= 1.2 + 1e-6);
        }
    }

    #[test]
    fn gift_destinations_cluster_at_base() {
        for count in [1, 30, 500] {
            let cfg = config(count, ParticleRole::Gift);
            let particles = generate_particles(&cfg).unwrap();
            assert_eq!(particles.len(), count as usize);
            let half_height = cfg.shape.height * 0.5;
            for p in &particles {
                assert!(p.destination.y >= -half_height - 1.0 - 1e-3);
                assert!(p.destination.y <= -half_height + 1.0 + 1e-3);
            }
        }
    }

    #[test]
    fn ornament_destinations_bias_to_surface() {
        let cfg = config(2000, ParticleRole::Ball);
        let particles = generate_particles(&cfg).unwrap();
        let shape = cfg.shape;
        for p in &particles {
            let y_norm = (p.destination.y + shape.height * 0.5) / shape.height;
            let cone_radius = (1.0 - y_norm) * shape.base_radius;
            let radial = Vec3::new(p.destination.x, 0.0, p.destination.z).length();
            // Radius was drawn from [0.8, 1.0] of the cone radius at that height.
            assert!(radial <= cone_radius + 1e-3);
            assert!(radial >= cone_radius * 0.8 - 1e-3);
        }
    }

    #[test]
    fn invalid_config_fails_before_sampling() {
        let cfg = config(0, ParticleRole::Foliage);
        assert!(generate_particles(&cfg).is_err());
    }

    #[test]
    fn ornament_colors_come_from_palette() {
        let cfg = config(200, ParticleRole::Ball);
        let particles = generate_particles(&cfg).unwrap();
        let palette = ParticleRole::Ball.palette();
        for p in &particles {
            assert!(palette.contains(&p.color));
        }
    }

    #[test]
    fn foliage_color_stays_between_emerald_and_gold() {
        for seed in [0.0, 0.25, 0.5, 0.999] {
            let c = foliage_color(seed);
            assert!(c.red >= DEEP_EMERALD.red && c.red <= GOLD.red);
            assert!(c.green >= DEEP_EMERALD.green);
            assert!(c.blue <= DEEP_EMERALD.blue);
        }
    }
}

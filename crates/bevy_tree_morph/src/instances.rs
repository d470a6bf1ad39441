//! Discrete-instance path for ornament groups (gifts, balls, lights).
//!
//! Each particle is a real `Mesh3d` child entity sharing a per-role mesh and
//! a small cache of color materials. Positions are pulled toward the live
//! endpoint on the CPU every frame — ornament counts are low (tens to a few
//! hundred), and each one is individually salient, so the distance-weighted
//! per-instance lerp buys organic, staggered arrivals.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::blend::{instance_step, light_pulse, spin_direction, wobble_angle};
use crate::data::{BlendPolicy, GOLD, GroupConfig, ParticleRole, TreeState, WARM_WHITE};
use crate::generate::generate_particles;
use crate::progress::{GroupProgress, sanitize_delta};

// ---------------------------------------------------------------------------
// Components & resources
// ---------------------------------------------------------------------------

/// One spawned ornament. Endpoints, seed, color, and base scale are immutable
/// after generation; `current` and `rotation_y` are the only per-frame state.
pub struct OrnamentInstance {
    pub entity: Entity,
    pub origin: Vec3,
    pub destination: Vec3,
    pub current: Vec3,
    pub seed: f32,
    pub color: LinearRgba,
    pub scale: f32,
    pub rotation_y: f32,
}

/// Per-group ornament state, attached to the group entity alongside its
/// `GroupConfig`. Regeneration replaces the whole set at once.
#[derive(Component)]
pub struct OrnamentSet {
    pub instances: Vec<OrnamentInstance>,
}

/// Shared mesh and material handles for ornament instances.
#[derive(Resource, Default)]
pub struct OrnamentAssets {
    pub meshes: HashMap<ParticleRole, Handle<Mesh>>,
    pub materials: HashMap<u64, Handle<StandardMaterial>>,
}

/// Marker for child entities spawned by an ornament group.
#[derive(Component)]
pub struct OrnamentChild;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// (Re)build ornament groups whose configuration was added or changed: the
/// previous children are despawned and the full replacement set is spawned in
/// the same command batch, so no frame ever renders a partially regenerated
/// group.
pub fn rebuild_ornament_groups(
    mut commands: Commands,
    mut assets: ResMut<OrnamentAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut groups: Query<(Entity, &GroupConfig, Option<&mut OrnamentSet>), Changed<GroupConfig>>,
) {
    for (group_entity, config, previous) in &mut groups {
        if config.role.blend_policy() != BlendPolicy::Instance {
            continue;
        }
        let particles = match generate_particles(config) {
            Ok(particles) => particles,
            Err(err) => {
                error!("Rejected {} group config: {err}", config.role.label());
                continue;
            }
        };

        if let Some(mut set) = previous {
            for instance in set.instances.drain(..) {
                commands.entity(instance.entity).try_despawn();
            }
        }

        let mesh_handle = assets
            .meshes
            .entry(config.role)
            .or_insert_with(|| meshes.add(role_mesh(config.role)))
            .clone();

        let instances = particles
            .iter()
            .map(|p| {
                let material =
                    get_or_create_ornament_material(&mut assets, &mut materials, config.role, p.color);
                let child = commands
                    .spawn((
                        OrnamentChild,
                        Mesh3d(mesh_handle.clone()),
                        MeshMaterial3d(material),
                        Transform::from_translation(p.origin).with_scale(Vec3::splat(p.scale)),
                    ))
                    .id();
                commands.entity(group_entity).add_child(child);
                OrnamentInstance {
                    entity: child,
                    origin: p.origin,
                    destination: p.destination,
                    current: p.origin,
                    seed: p.seed,
                    color: p.color,
                    scale: p.scale,
                    rotation_y: 0.0,
                }
            })
            .collect::<Vec<_>>();

        info!(
            "Built {} ornament group: {} instances",
            config.role.label(),
            instances.len()
        );
        commands
            .entity(group_entity)
            .insert((OrnamentSet { instances }, GroupProgress::default()));
    }
}

/// Per-frame ornament update: pull each instance toward the endpoint the
/// current global target selects, spin non-lights, pulse lights when formed,
/// and write the resulting transforms. Reads `TreeState` live each tick.
pub fn update_ornaments(
    time: Res<Time>,
    state: Res<TreeState>,
    mut groups: Query<(&GroupConfig, &mut OrnamentSet)>,
    mut transforms: Query<&mut Transform, With<OrnamentChild>>,
) {
    let dt = sanitize_delta(time.delta_secs());
    let elapsed = time.elapsed_secs();
    let forming = *state == TreeState::Formed;

    for (config, mut set) in &mut groups {
        let is_light = config.role == ParticleRole::Light;
        for (index, instance) in set.instances.iter_mut().enumerate() {
            let endpoint = if forming {
                instance.destination
            } else {
                instance.origin
            };
            instance.current = instance_step(instance.current, endpoint, config.lerp_speed, dt);

            if !is_light {
                instance.rotation_y += dt * 0.5 * spin_direction(index);
            }

            let Ok(mut transform) = transforms.get_mut(instance.entity) else {
                continue;
            };
            transform.translation = instance.current;

            if is_light {
                // Twinkle is a display-only modulation of the stored scale.
                let display = if forming {
                    light_pulse(instance.scale, elapsed, index)
                } else {
                    instance.scale
                };
                transform.scale = Vec3::splat(display);
            } else {
                transform.rotation = Quat::from_rotation_y(instance.rotation_y)
                    * Quat::from_rotation_z(wobble_angle(elapsed, index));
            }
        }
    }
}

/// Despawn the children of groups whose `GroupConfig` was removed while the
/// group entity itself survives. (A despawned group entity takes its children
/// with it through the hierarchy.)
pub fn cleanup_ornament_groups(
    mut commands: Commands,
    mut removed: RemovedComponents<GroupConfig>,
    mut sets: Query<&mut OrnamentSet>,
) {
    for entity in removed.read() {
        let Ok(mut set) = sets.get_mut(entity) else {
            continue;
        };
        for instance in set.instances.drain(..) {
            commands.entity(instance.entity).try_despawn();
        }
        commands.entity(entity).remove::<OrnamentSet>();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared unit mesh for a role; instance scale carries the size jitter.
fn role_mesh(role: ParticleRole) -> Mesh {
    match role {
        ParticleRole::Gift => Mesh::from(Cuboid::from_size(Vec3::splat(0.8))),
        ParticleRole::Ball => Mesh::from(Sphere::new(0.5)),
        ParticleRole::Light => Mesh::from(Sphere::new(0.15)),
        // Foliage never reaches the instance path.
        ParticleRole::Foliage => Mesh::from(Sphere::new(0.1)),
    }
}

/// Material cache keyed by role and color bits. Gifts read matte and heavy,
/// balls glossy metallic, lights emissive so the bloom pass picks them up.
fn get_or_create_ornament_material(
    assets: &mut OrnamentAssets,
    materials: &mut Assets<StandardMaterial>,
    role: ParticleRole,
    color: LinearRgba,
) -> Handle<StandardMaterial> {
    let color_bits = color.red.to_bits() as u64
        ^ (color.green.to_bits() as u64).rotate_left(16)
        ^ (color.blue.to_bits() as u64).rotate_left(32)
        ^ (color.alpha.to_bits() as u64).rotate_left(48);
    let key = color_bits ^ (role as u64).rotate_left(7);

    assets
        .materials
        .entry(key)
        .or_insert_with(|| {
            let material = match role {
                ParticleRole::Gift => StandardMaterial {
                    base_color: Color::LinearRgba(color),
                    perceptual_roughness: 0.3,
                    metallic: 0.4,
                    ..default()
                },
                ParticleRole::Light => StandardMaterial {
                    base_color: Color::LinearRgba(WARM_WHITE),
                    emissive: GOLD * 2.0,
                    ..default()
                },
                _ => StandardMaterial {
                    base_color: Color::LinearRgba(color),
                    perceptual_roughness: 0.15,
                    metallic: 0.9,
                    ..default()
                },
            };
            materials.add(material)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_meshes_are_distinct_shapes() {
        // Gift boxes are cuboids (24 corner vertices), balls and lights are
        // spheres at different radii.
        let gift = role_mesh(ParticleRole::Gift);
        let ball = role_mesh(ParticleRole::Ball);
        assert_eq!(gift.count_vertices(), 24);
        assert!(ball.count_vertices() > gift.count_vertices());
    }
}

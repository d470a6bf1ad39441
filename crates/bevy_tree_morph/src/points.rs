//! Point-cloud path for foliage groups.
//!
//! The whole cloud is one `PointList` mesh. Every vertex carries its chaos
//! position (the standard position attribute), its tree position, and a seed;
//! the vertex shader blends between the endpoints with the eased progress
//! uniform and overlays the wind sway near full assembly. The CPU writes
//! three floats per frame — one scalar drives all particles, which is what
//! makes a 12k-point group cheap.

use bevy::{
    asset::{RenderAssetUsages, embedded_asset},
    pbr::{Material, MaterialPipeline, MaterialPipelineKey, MaterialPlugin, NotShadowCaster},
    prelude::*,
    render::{
        mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef, PrimitiveTopology},
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
            VertexFormat,
        },
    },
    shader::ShaderRef,
};

use crate::blend::ease_in_out_cubic;
use crate::data::{BlendPolicy, DEEP_EMERALD, GOLD, GroupConfig, Particle};
use crate::generate::generate_particles;
use crate::progress::GroupProgress;

/// Tree-side endpoint of each vertex. The chaos endpoint rides the standard
/// position attribute, which also gives culling a bounding box that encloses
/// the whole motion envelope (the chaos sphere contains the cone).
pub const ATTRIBUTE_TARGET_POSITION: MeshVertexAttribute =
    MeshVertexAttribute::new("TargetPosition", 736703329, VertexFormat::Float32x3);

/// Per-vertex random seed for color variance.
pub const ATTRIBUTE_SEED: MeshVertexAttribute =
    MeshVertexAttribute::new("Seed", 736703330, VertexFormat::Float32);

/// Registers the foliage material and its embedded shader.
pub struct FoliagePointsPlugin;

impl Plugin for FoliagePointsPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "foliage.wgsl");
        app.add_plugins(MaterialPlugin::<FoliageMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });
    }
}

/// Uniform block for the foliage shader.
#[derive(Clone, Copy, ShaderType, Debug)]
pub struct FoliageUniform {
    /// Base needle color.
    pub base_color: LinearRgba,
    /// Accent mixed in by the per-vertex seed.
    pub accent_color: LinearRgba,
    /// Elapsed seconds, drives the sway.
    pub time: f32,
    /// Raw group progress; gates the sway overlay.
    pub progress: f32,
    /// Eased progress; drives the endpoint mix.
    pub eased_progress: f32,
    pub _padding: f32,
}

/// Additive point material blending every vertex between its two endpoints.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
pub struct FoliageMaterial {
    #[uniform(0)]
    pub uniform: FoliageUniform,
}

impl Default for FoliageMaterial {
    fn default() -> Self {
        Self {
            uniform: FoliageUniform {
                base_color: DEEP_EMERALD,
                accent_color: GOLD,
                time: 0.0,
                progress: 0.0,
                eased_progress: 0.0,
                _padding: 0.0,
            },
        }
    }
}

impl Material for FoliageMaterial {
    fn vertex_shader() -> ShaderRef {
        "embedded://bevy_tree_morph/foliage.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "embedded://bevy_tree_morph/foliage.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_TARGET_POSITION.at_shader_location(1),
            ATTRIBUTE_SEED.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}

/// Bake a particle set into the point-cloud mesh. Origin, destination, and
/// seed arrays are written together; the mesh is immutable until the group
/// is regenerated wholesale.
pub fn build_foliage_mesh(particles: &[Particle]) -> Mesh {
    let origins: Vec<[f32; 3]> = particles.iter().map(|p| p.origin.to_array()).collect();
    let targets: Vec<[f32; 3]> = particles.iter().map(|p| p.destination.to_array()).collect();
    let seeds: Vec<f32> = particles.iter().map(|p| p.seed).collect();

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, origins)
        .with_inserted_attribute(ATTRIBUTE_TARGET_POSITION, targets)
        .with_inserted_attribute(ATTRIBUTE_SEED, seeds)
}

/// (Re)build point-cloud groups whose configuration was added or changed.
/// The mesh and material handles are swapped in one insert, so the renderer
/// never observes a half-regenerated group; progress restarts at the chaos
/// end because every vertex begins at its origin.
pub fn rebuild_foliage_groups(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
    groups: Query<(Entity, &GroupConfig), Changed<GroupConfig>>,
) {
    for (entity, config) in &groups {
        if config.role.blend_policy() != BlendPolicy::PointCloud {
            continue;
        }
        let particles = match generate_particles(config) {
            Ok(particles) => particles,
            Err(err) => {
                error!("Rejected {} group config: {err}", config.role.label());
                continue;
            }
        };

        let mesh = meshes.add(build_foliage_mesh(&particles));
        let material = materials.add(FoliageMaterial::default());
        commands.entity(entity).insert((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            GroupProgress::default(),
            NotShadowCaster,
        ));
        info!(
            "Built {} point cloud: {} particles",
            config.role.label(),
            particles.len()
        );
    }
}

/// Push time and progress into every foliage material. The easing curve is
/// applied here so the shader and any CPU consumer share one definition.
pub fn update_foliage_material(
    time: Res<Time>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
    groups: Query<(&GroupProgress, &MeshMaterial3d<FoliageMaterial>), With<GroupConfig>>,
) {
    let elapsed = time.elapsed_secs();
    for (progress, handle) in &groups {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.uniform.time = elapsed;
            material.uniform.progress = progress.value;
            material.uniform.eased_progress = ease_in_out_cubic(progress.value);
        }
    }
}

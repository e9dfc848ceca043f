//! Tree mesh assembly: trunk, six branches, and a layered foliage cluster.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, TAU};

use bevy::{
    math::primitives::{Cone, ConicalFrustum},
    prelude::*,
};

use crate::{combat::Health, core::SpawnRng, tree::components::Tree};

const TRUNK_HEIGHT: f32 = 8.0;
const FOLIAGE_HEIGHT: f32 = 8.0;
const FOLIAGE_SCALE: f32 = 2.0;

/// (height, tilt, length, thickness) of each branch.
const BRANCHES: [(f32, f32, f32, f32); 6] = [
    (6.0, FRAC_PI_4, 3.0, 0.2),
    (6.0, -FRAC_PI_4, 3.0, 0.2),
    (5.0, FRAC_PI_3, 2.5, 0.2),
    (5.0, -FRAC_PI_3, 2.5, 0.2),
    (4.0, FRAC_PI_6, 2.0, 0.15),
    (4.0, -FRAC_PI_6, 2.0, 0.15),
];

#[derive(Resource, Debug, Clone)]
pub struct TreeVisuals {
    trunk: Handle<Mesh>,
    branches: Vec<Handle<Mesh>>,
    foliage: Vec<Handle<Mesh>>,
    bark: Handle<StandardMaterial>,
    leaves: Vec<Handle<StandardMaterial>>,
}

impl FromWorld for TreeVisuals {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let trunk = meshes.add(Mesh::from(ConicalFrustum {
            radius_top: 0.3,
            radius_bottom: 0.5,
            height: TRUNK_HEIGHT,
        }));
        let branches = BRANCHES
            .iter()
            .map(|&(_, _, length, thickness)| {
                meshes.add(Mesh::from(ConicalFrustum {
                    radius_top: thickness * 0.7,
                    radius_bottom: thickness,
                    height: length,
                }))
            })
            .collect();
        let foliage = (0..3)
            .map(|layer| {
                meshes.add(Mesh::from(Cone {
                    radius: 1.2 - layer as f32 * 0.2,
                    height: 2.0,
                }))
            })
            .collect();

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let bark = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x4a, 0x28, 0x05),
            perceptual_roughness: 0.9,
            metallic: 0.1,
            ..default()
        });
        let leaves = [
            Color::srgb_u8(0x0d, 0x53, 0x02),
            Color::srgb_u8(0x0a, 0x45, 0x02),
            Color::srgb_u8(0x0c, 0x4f, 0x02),
        ]
        .into_iter()
        .map(|color| {
            materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.8,
                metallic: 0.1,
                ..default()
            })
        })
        .collect();

        Self {
            trunk,
            branches,
            foliage,
            bark,
            leaves,
        }
    }
}

/// Spawns a tree on the ground at `position` with random yaw and scale.
pub fn spawn_tree(
    commands: &mut Commands,
    visuals: &TreeVisuals,
    rng: &mut SpawnRng,
    position: Vec3,
    trunk_radius: f32,
    max_health: f32,
) -> Entity {
    let yaw = rng.range(0.0, TAU);
    let scale = rng.range(0.8, 1.2);

    let tree = commands
        .spawn((
            Transform::from_xyz(position.x, 0.0, position.z)
                .with_rotation(Quat::from_rotation_y(yaw))
                .with_scale(Vec3::splat(scale)),
            Visibility::default(),
            Tree {
                trunk_radius: trunk_radius * scale,
            },
            Health::new(max_health),
            Name::new("Tree"),
        ))
        .id();

    commands.entity(tree).with_children(|parent| {
        parent.spawn((
            Mesh3d(visuals.trunk.clone()),
            MeshMaterial3d(visuals.bark.clone()),
            Transform::from_xyz(0.0, TRUNK_HEIGHT / 2.0, 0.0),
        ));

        for (&(height, tilt, length, _), mesh) in BRANCHES.iter().zip(&visuals.branches) {
            // Lay the branch along +Z, then tilt the whole limb about Z.
            parent
                .spawn((
                    Transform::from_xyz(0.0, height, 0.0).with_rotation(Quat::from_rotation_z(tilt)),
                    Visibility::default(),
                ))
                .with_children(|limb| {
                    limb.spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(visuals.bark.clone()),
                        Transform::from_xyz(0.0, 0.0, length / 2.0)
                            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                    ));
                });
        }

        parent
            .spawn((
                Transform::from_xyz(0.0, FOLIAGE_HEIGHT, 0.0),
                Visibility::default(),
            ))
            .with_children(|cluster| {
                for (layer, (mesh, material)) in
                    visuals.foliage.iter().zip(&visuals.leaves).enumerate()
                {
                    cluster.spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_xyz(0.0, layer as f32 * 0.3, 0.0)
                            .with_rotation(Quat::from_rotation_y(TAU / 3.0 * layer as f32))
                            .with_scale(Vec3::splat(FOLIAGE_SCALE)),
                    ));
                }
            });
    });

    tree
}

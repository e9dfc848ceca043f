//! Systems for the world module.
use bevy::{
    light::{NotShadowCaster, NotShadowReceiver},
    math::primitives::{Cone, Plane3d, Sphere},
    prelude::*,
};

use crate::{
    core::SpawnRng,
    world::{
        components::{Ground, Mountain, PrimarySun, Sky},
        time::{paint_sky_dome, MountainMaterial, SkyDome, SkyState},
    },
};

const GROUND_SCALE: f32 = 5_000.0;
/// Encloses the mountain range and stays inside the camera's far plane.
const SKY_RADIUS: f32 = 4_000.0;

/// (x, z, height, radius) of each peak in the distant range.
const MOUNTAIN_RANGE: [(f32, f32, f32, f32); 9] = [
    (-2000.0, -1500.0, 800.0, 600.0),
    (-1500.0, -2000.0, 1000.0, 700.0),
    (-1000.0, -1800.0, 900.0, 650.0),
    (1500.0, -1700.0, 850.0, 620.0),
    (2000.0, -1900.0, 950.0, 670.0),
    (1200.0, -2000.0, 750.0, 580.0),
    (-500.0, -2200.0, 880.0, 640.0),
    (500.0, -2100.0, 920.0, 680.0),
    (0.0, -2500.0, 1100.0, 750.0),
];

/// Spawns the static scene: sky dome, ground plane, sun, and the mountain range.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SpawnRng>,
    sky: Res<SkyState>,
) {
    let mut dome = Sphere::new(SKY_RADIUS).mesh().uv(32, 32);
    paint_sky_dome(&mut dome, sky.sky_color);
    let dome = meshes.add(dome);
    commands.insert_resource(SkyDome::new(dome.clone(), sky.sky_color));
    commands.spawn((
        Mesh3d(dome),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            cull_mode: None,
            fog_enabled: false,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
        NotShadowReceiver,
        Sky,
        Name::new("Sky"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x1a, 0x47, 0x2a),
            perceptual_roughness: 0.8,
            metallic: 0.2,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        Ground,
        Name::new("Ground"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(100.0, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
        Name::new("Sun"),
    ));

    let mountain_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x4a, 0x4a, 0x4a),
        perceptual_roughness: 0.9,
        metallic: 0.1,
        ..default()
    });
    commands.insert_resource(MountainMaterial(mountain_material.clone()));

    for (index, (x, z, height, radius)) in MOUNTAIN_RANGE.into_iter().enumerate() {
        let mesh = jagged_mountain_mesh(radius, height, &mut rng);
        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(mountain_material.clone()),
            Transform::from_xyz(x, height / 2.0, z),
            Mountain,
            Name::new(format!("Mountain {}", index)),
        ));
    }

    info!("Spawned sky, ground, sun, and {} mountains", MOUNTAIN_RANGE.len());
}

/// Builds a flat-shaded cone whose flank vertices are pushed around at random.
/// The apex is left in place so the peak stays sharp.
fn jagged_mountain_mesh(radius: f32, height: f32, rng: &mut SpawnRng) -> Mesh {
    let mut mesh = Mesh::from(Cone { radius, height });

    let apex_y = height / 2.0 - f32::EPSILON * height;
    let jittered: Option<Vec<[f32; 3]>> = mesh
        .attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|values| values.as_float3())
        .map(|positions| {
            positions
                .iter()
                .map(|&[x, y, z]| {
                    if y >= apex_y {
                        return [x, y, z];
                    }
                    // Squared sample biases towards small offsets.
                    let noise = rng.range(0.0, 1.0).powi(2) * radius * 0.15;
                    let angle = rng.angle();
                    [
                        x + angle.cos() * noise,
                        y + rng.symmetric(0.5) * height * 0.1,
                        z + angle.sin() * noise,
                    ]
                })
                .collect()
        });
    if let Some(positions) = jittered {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    }

    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

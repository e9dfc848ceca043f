//! Health pickup visuals: a red cross inside a translucent glow.
use bevy::{
    math::primitives::{Cuboid, Sphere},
    prelude::*,
};

use crate::pickup::components::HealthPickup;

#[derive(Resource, Debug, Clone)]
pub struct PickupVisuals {
    cross_bar: Handle<Mesh>,
    cross_post: Handle<Mesh>,
    glow: Handle<Mesh>,
    cross_material: Handle<StandardMaterial>,
    glow_material: Handle<StandardMaterial>,
}

impl FromWorld for PickupVisuals {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let cross_bar = meshes.add(Mesh::from(Cuboid::new(0.8, 0.2, 0.2)));
        let cross_post = meshes.add(Mesh::from(Cuboid::new(0.2, 0.8, 0.2)));
        let glow = meshes.add(Mesh::from(Sphere::new(0.6)));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let cross_material = materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            emissive: LinearRgba::rgb(0.5, 0.0, 0.0),
            metallic: 0.7,
            perceptual_roughness: 0.3,
            ..default()
        });
        let glow_material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.0, 0.0, 0.3),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        Self {
            cross_bar,
            cross_post,
            glow,
            cross_material,
            glow_material,
        }
    }
}

pub fn spawn_health_pickup(
    commands: &mut Commands,
    visuals: &PickupVisuals,
    position: Vec3,
    heal_amount: f32,
    now: f32,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Visibility::default(),
            HealthPickup::new(heal_amount, now, position.y),
            Name::new("Health pickup"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(visuals.cross_bar.clone()),
                MeshMaterial3d(visuals.cross_material.clone()),
            ));
            parent.spawn((
                Mesh3d(visuals.cross_post.clone()),
                MeshMaterial3d(visuals.cross_material.clone()),
            ));
            parent.spawn((
                Mesh3d(visuals.glow.clone()),
                MeshMaterial3d(visuals.glow_material.clone()),
            ));
        })
        .id()
}

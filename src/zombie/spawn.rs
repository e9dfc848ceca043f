//! Zombie mesh assembly.
use bevy::{
    math::primitives::{Cuboid, Rectangle},
    prelude::*,
};

use crate::{
    combat::Health,
    zombie::components::{HealthBarPivot, LimbKind, Zombie, ZombieBody, ZombieHealthBar, ZombieLimb},
};

pub const BODY_COLOR: Color = Color::srgb(0.176, 0.353, 0.153);
pub const HEAD_COLOR: Color = Color::srgb(0.227, 0.42, 0.196);
const ZOMBIE_SCALE: f32 = 1.5;
const HEALTH_BAR_HEIGHT: f32 = 2.5;

/// Meshes and bar materials shared by every zombie.
#[derive(Resource, Debug, Clone)]
pub struct ZombieVisuals {
    body: Handle<Mesh>,
    head: Handle<Mesh>,
    limb: Handle<Mesh>,
    bar: Handle<Mesh>,
    bar_fill: Handle<StandardMaterial>,
    bar_background: Handle<StandardMaterial>,
}

impl FromWorld for ZombieVisuals {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let body = meshes.add(Mesh::from(Cuboid::new(0.8, 1.2, 0.4)));
        let head = meshes.add(Mesh::from(Cuboid::new(0.4, 0.4, 0.4)));
        let limb = meshes.add(Mesh::from(Cuboid::new(0.2, 0.8, 0.2)));
        let bar = meshes.add(Mesh::from(Rectangle::new(1.0, 0.1)));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let bar_fill = materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            unlit: true,
            ..default()
        });
        let bar_background = materials.add(StandardMaterial {
            base_color: Color::srgb(0.4, 0.4, 0.4),
            unlit: true,
            ..default()
        });

        Self {
            body,
            head,
            limb,
            bar,
            bar_fill,
            bar_background,
        }
    }
}

/// Spawns a zombie with its limbs and floating health bar.
pub fn spawn_zombie(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    visuals: &ZombieVisuals,
    position: Vec3,
    max_health: f32,
) -> Entity {
    let body_material = materials.add(StandardMaterial {
        base_color: BODY_COLOR,
        ..default()
    });
    let head_material = materials.add(StandardMaterial {
        base_color: HEAD_COLOR,
        ..default()
    });

    let zombie = commands
        .spawn((
            Mesh3d(visuals.body.clone()),
            MeshMaterial3d(body_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(ZOMBIE_SCALE)),
            Zombie::default(),
            Health::new(max_health),
            ZombieBody {
                body: body_material.clone(),
                head: head_material.clone(),
            },
            Name::new("Zombie"),
        ))
        .id();

    let limbs = [
        (LimbKind::Head, visuals.head.clone(), head_material, Vec3::new(0.0, 0.8, 0.0)),
        (LimbKind::LeftArm, visuals.limb.clone(), body_material.clone(), Vec3::new(-0.5, 0.2, 0.0)),
        (LimbKind::RightArm, visuals.limb.clone(), body_material.clone(), Vec3::new(0.5, 0.2, 0.0)),
        (LimbKind::LeftLeg, visuals.limb.clone(), body_material.clone(), Vec3::new(-0.2, -1.0, 0.0)),
        (LimbKind::RightLeg, visuals.limb.clone(), body_material, Vec3::new(0.2, -1.0, 0.0)),
    ];

    commands.entity(zombie).with_children(|parent| {
        for (kind, mesh, material, offset) in limbs {
            parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(offset).with_rotation(limb_rotation(kind, 0.0)),
                ZombieLimb(kind),
            ));
        }

        parent
            .spawn((
                Transform::from_xyz(0.0, HEALTH_BAR_HEIGHT, 0.0),
                Visibility::default(),
                HealthBarPivot { zombie },
            ))
            .with_children(|pivot| {
                pivot.spawn((
                    Mesh3d(visuals.bar.clone()),
                    MeshMaterial3d(visuals.bar_background.clone()),
                    Transform::default(),
                ));
                pivot.spawn((
                    Mesh3d(visuals.bar.clone()),
                    MeshMaterial3d(visuals.bar_fill.clone()),
                    Transform::from_xyz(0.0, 0.0, 0.01),
                    ZombieHealthBar { zombie },
                ));
            });
    });

    zombie
}

/// Shamble pose for a limb at animation time `t`.
pub fn limb_rotation(kind: LimbKind, t: f32) -> Quat {
    const WALK_SPEED: f32 = 2.0;
    const ARM_SPLAY: f32 = std::f32::consts::PI * 0.1;
    let swing = (t * WALK_SPEED).sin() * 0.5;
    let counter = (t * WALK_SPEED + std::f32::consts::PI).sin() * 0.5;
    match kind {
        LimbKind::Head => Quat::from_euler(
            EulerRot::XYZ,
            (t * 0.5).sin() * 0.1,
            0.0,
            (t * 0.5).cos() * 0.1,
        ),
        LimbKind::LeftArm => Quat::from_euler(EulerRot::XYZ, swing, 0.0, ARM_SPLAY),
        LimbKind::RightArm => Quat::from_euler(EulerRot::XYZ, counter, 0.0, -ARM_SPLAY),
        LimbKind::LeftLeg => Quat::from_rotation_x(swing),
        LimbKind::RightLeg => Quat::from_rotation_x(counter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_and_legs_swing_in_opposition() {
        let t = 0.4;
        let left = limb_rotation(LimbKind::LeftLeg, t).to_euler(EulerRot::XYZ).0;
        let right = limb_rotation(LimbKind::RightLeg, t).to_euler(EulerRot::XYZ).0;
        assert!((left + right).abs() < 1e-4);
        assert!(left.abs() > 0.1);
    }

    #[test]
    fn head_sway_is_small() {
        for step in 0..50 {
            let rotation = limb_rotation(LimbKind::Head, step as f32 * 0.3);
            assert!(rotation.angle_between(Quat::IDENTITY) <= 0.15);
        }
    }
}

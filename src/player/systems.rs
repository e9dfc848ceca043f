//! Systems for the player's sword, health, and damage feedback.
use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    log::{debug, info},
    math::primitives::{Cuboid, Cylinder, Sphere},
    prelude::*,
};

use crate::{
    combat::{targeting::within_strike, Health, PickupCollected, PlayerDamaged, TreeFelled, ZombieKilled},
    controls::components::{FirstPersonCamera, Locomotion, PointerState},
    core::{GameSettings, SimulationClock},
    game::roster::EntityRoster,
    player::components::{DamageFlash, Invulnerability, Player, SwordArm, SwordAttack, ARM_REST_PITCH},
    tree::components::{Falling, Tree},
    zombie::{
        components::{DeathAnimation, Zombie},
        systems::begin_zombie_death,
    },
};

/// Where the arm pivot sits relative to the camera.
const ARM_OFFSET: Vec3 = Vec3::new(0.2, -0.3, 0.3);
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_FAR: f32 = 10_000.0;

/// Spawns the camera entity carrying every player component, plus the sword arm.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GameSettings>,
) {
    let skin = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xff, 0xdb, 0xac),
        perceptual_roughness: 0.3,
        metallic: 0.1,
        ..default()
    });
    let blade = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xcc, 0xcc, 0xcc),
        perceptual_roughness: 0.1,
        metallic: 0.9,
        ..default()
    });
    let guard = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x8b, 0x45, 0x13),
        perceptual_roughness: 0.3,
        metallic: 0.7,
        ..default()
    });
    let grip = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x4a, 0x35, 0x20),
        perceptual_roughness: 0.9,
        metallic: 0.1,
        ..default()
    });

    let upper_arm = meshes.add(Mesh::from(Cylinder::new(0.08, 0.5)));
    let forearm = meshes.add(Mesh::from(Cylinder::new(0.07, 0.5)));
    let hand = meshes.add(Mesh::from(Cuboid::new(0.08, 0.15, 0.08)));
    let blade_mesh = meshes.add(Mesh::from(Cuboid::new(0.03, 1.0, 0.08)));
    let guard_mesh = meshes.add(Mesh::from(Cuboid::new(0.2, 0.05, 0.12)));
    let grip_mesh = meshes.add(Mesh::from(Cylinder::new(0.02, 0.25)));
    let pommel_mesh = meshes.add(Mesh::from(Sphere::new(0.04)));

    let player = &settings.player;
    let tilt = |x: f32, z: f32| Quat::from_euler(EulerRot::XYZ, x, 0.0, z);

    commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: 0.1,
                far: CAMERA_FAR,
                ..default()
            }),
            Transform::from_xyz(0.0, player.height, 0.0),
            Player,
            FirstPersonCamera::new(settings.controls.look_sensitivity),
            Locomotion::default(),
            Health::new(player.max_health),
            Invulnerability::default(),
            SwordAttack::new(player.attack_duration_secs),
            Name::new("Player"),
        ))
        .with_children(|camera| {
            camera
                .spawn((
                    Transform::from_translation(ARM_OFFSET)
                        .with_rotation(Quat::from_rotation_x(ARM_REST_PITCH)),
                    Visibility::default(),
                    SwordArm,
                    Name::new("Sword arm"),
                ))
                .with_children(|arm| {
                    arm.spawn((
                        Mesh3d(upper_arm),
                        MeshMaterial3d(skin.clone()),
                        Transform::from_xyz(0.3, -0.1, -0.3)
                            .with_rotation(tilt(-std::f32::consts::FRAC_PI_8, std::f32::consts::FRAC_PI_6)),
                    ));
                    arm.spawn((
                        Mesh3d(forearm),
                        MeshMaterial3d(skin.clone()),
                        Transform::from_xyz(0.3, -0.4, -0.5)
                            .with_rotation(tilt(-std::f32::consts::FRAC_PI_6, std::f32::consts::FRAC_PI_6)),
                    ));
                    arm.spawn((
                        Mesh3d(hand),
                        MeshMaterial3d(skin),
                        Transform::from_xyz(0.3, -0.6, -0.7)
                            .with_rotation(tilt(-std::f32::consts::FRAC_PI_4, std::f32::consts::FRAC_PI_6)),
                    ));
                    arm.spawn((
                        Transform::from_xyz(0.4, -0.6, -0.8).with_rotation(Quat::from_euler(
                            EulerRot::XYZ,
                            -std::f32::consts::FRAC_PI_4,
                            std::f32::consts::FRAC_PI_6,
                            0.0,
                        )),
                        Visibility::default(),
                        Name::new("Sword"),
                    ))
                    .with_children(|sword| {
                        sword.spawn((
                            Mesh3d(blade_mesh),
                            MeshMaterial3d(blade),
                            Transform::from_xyz(0.0, 0.6, 0.0),
                        ));
                        sword.spawn((Mesh3d(guard_mesh), MeshMaterial3d(guard.clone())));
                        sword.spawn((
                            Mesh3d(grip_mesh),
                            MeshMaterial3d(grip),
                            Transform::from_xyz(0.0, -0.15, 0.0),
                        ));
                        sword.spawn((
                            Mesh3d(pommel_mesh),
                            MeshMaterial3d(guard),
                            Transform::from_xyz(0.0, -0.3, 0.0),
                        ));
                    });
                });
        });

    info!(
        "Player spawned at height {:.1} with {:.0} health",
        player.height, player.max_health
    );
}

/// Left click swings the sword. Hits are resolved once, at swing start.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn player_attack_input(
    mut commands: Commands,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    settings: Res<GameSettings>,
    mut roster: ResMut<EntityRoster>,
    mut player_query: Query<(&Transform, &mut SwordAttack), With<Player>>,
    mut zombies: Query<
        (Entity, &Transform, &mut Health, &mut Zombie),
        (Without<Player>, Without<DeathAnimation>),
    >,
    mut trees: Query<
        (Entity, &Transform, &mut Health, &Tree),
        (Without<Player>, Without<Zombie>, Without<Falling>),
    >,
    mut killed: MessageWriter<ZombieKilled>,
    mut felled: MessageWriter<TreeFelled>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left)
        || !pointer.is_locked()
        || pointer.just_locked()
    {
        return;
    }

    let Ok((camera, mut attack)) = player_query.single_mut() else {
        return;
    };
    if !attack.try_begin() {
        return;
    }

    let player = &settings.player;
    let origin = camera.translation;
    let forward = camera.forward().as_vec3();

    for (entity, transform, mut health, mut zombie) in zombies.iter_mut() {
        if !within_strike(
            origin,
            forward,
            transform.translation,
            player.attack_range,
            player.facing_threshold,
        ) {
            continue;
        }
        let depleted = health.apply_damage(player.sword_damage);
        zombie.flash(settings.zombies.hit_flash_secs);
        debug!("Zombie {:?} hit, health {:.0}", entity, health.current());
        if depleted
            && begin_zombie_death(
                &mut commands,
                &mut roster,
                entity,
                transform,
                settings.zombies.death_duration_secs,
            )
        {
            killed.write(ZombieKilled { zombie: entity });
        }
    }

    for (entity, transform, mut health, tree) in trees.iter_mut() {
        if !within_strike(
            origin,
            forward,
            transform.translation,
            player.attack_range + tree.trunk_radius,
            player.facing_threshold,
        ) {
            continue;
        }
        if !health.apply_damage(player.tree_damage) {
            debug!("Tree {:?} hit, health {:.0}", entity, health.current());
            continue;
        }
        if roster.start_tree_fall(entity) {
            commands.entity(entity).insert(Falling::away_from(
                transform,
                origin,
                settings.trees.fall_duration_secs,
                settings.trees.linger_secs,
            ));
            info!("Tree {:?} felled", entity);
            felled.write(TreeFelled { tree: entity });
        }
    }
}

/// Drives the arm through the swing arc and back to rest.
pub fn animate_sword_swing(
    clock: Res<SimulationClock>,
    mut player_query: Query<&mut SwordAttack, With<Player>>,
    mut arms: Query<&mut Transform, With<SwordArm>>,
) {
    let Ok(mut attack) = player_query.single_mut() else {
        return;
    };
    attack.tick(clock.delta_secs());

    for mut transform in arms.iter_mut() {
        transform.rotation = Quat::from_rotation_x(attack.arm_pitch());
    }
}

pub fn tick_invulnerability(
    clock: Res<SimulationClock>,
    mut query: Query<&mut Invulnerability, With<Player>>,
) {
    for mut invulnerability in query.iter_mut() {
        if invulnerability.tick(clock.delta_secs()) {
            debug!("Player invulnerability expired");
        }
    }
}

/// Applies zombie bites unless the player is invulnerable or already dead.
pub fn apply_player_damage(
    mut damage_events: MessageReader<PlayerDamaged>,
    settings: Res<GameSettings>,
    mut flash: ResMut<DamageFlash>,
    mut query: Query<(&mut Health, &mut Invulnerability), With<Player>>,
) {
    let Ok((mut health, mut invulnerability)) = query.single_mut() else {
        damage_events.clear();
        return;
    };

    for event in damage_events.read() {
        if invulnerability.is_active() || health.is_depleted() {
            continue;
        }
        health.apply_damage(event.amount);
        invulnerability.start(settings.player.invulnerability_secs);
        flash.trigger(settings.player.damage_flash_secs);
        info!(
            "Player bitten by {:?} for {:.0}, health {:.0}/{:.0}",
            event.source,
            event.amount,
            health.current(),
            health.max()
        );
    }
}

pub fn apply_pickup_healing(
    mut pickup_events: MessageReader<PickupCollected>,
    mut query: Query<&mut Health, With<Player>>,
) {
    let Ok(mut health) = query.single_mut() else {
        pickup_events.clear();
        return;
    };

    for event in pickup_events.read() {
        let healed = health.heal(event.amount);
        info!(
            "Picked up health {:?}: +{:.0}, health {:.0}/{:.0}",
            event.pickup,
            healed,
            health.current(),
            health.max()
        );
    }
}

pub fn tick_damage_flash(clock: Res<SimulationClock>, mut flash: ResMut<DamageFlash>) {
    flash.tick(clock.delta_secs());
}

/// Puts the player back at the start with full health.
pub fn reset_player(
    settings: &GameSettings,
    transform: &mut Transform,
    camera: &mut FirstPersonCamera,
    locomotion: &mut Locomotion,
    health: &mut Health,
    invulnerability: &mut Invulnerability,
    attack: &mut SwordAttack,
) {
    transform.translation = Vec3::new(0.0, settings.player.height, 0.0);
    camera.yaw = 0.0;
    camera.pitch = 0.0;
    transform.rotation = camera.rotation();
    locomotion.reset();
    health.reset();
    invulnerability.clear();
    attack.reset();
}

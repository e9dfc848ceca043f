//! Per-frame zombie behaviour: chase, bite, tint, shamble, health bar, death.
use bevy::{
    ecs::message::MessageWriter,
    log::{debug, info},
    prelude::*,
};

use crate::{
    combat::{Health, PlayerDamaged, ZombieKilled},
    core::{GameSettings, SimulationClock},
    game::{
        respawn::{RespawnKind, RespawnQueue},
        roster::EntityRoster,
    },
    player::components::Player,
    world::time::SkyState,
    zombie::{
        components::{
            chase_step, DeathAnimation, HealthBarPivot, Zombie, ZombieBody, ZombieHealthBar,
            ZombieLimb,
        },
        spawn::{limb_rotation, BODY_COLOR},
    },
};

const HIT_FLASH_COLOR: LinearRgba = LinearRgba::RED;

/// Moves a live zombie into the dying set and attaches its death animation.
/// Returns false when the zombie was not live.
pub fn begin_zombie_death(
    commands: &mut Commands,
    roster: &mut EntityRoster,
    zombie: Entity,
    transform: &Transform,
    duration: f32,
) -> bool {
    if !roster.start_zombie_death(zombie) {
        return false;
    }
    commands.entity(zombie).insert(DeathAnimation::new(
        duration,
        transform.translation.y,
        transform.rotation,
    ));
    info!("Zombie {:?} killed", zombie);
    true
}

/// Chases the player, bites when close, and catches zombies killed elsewhere.
#[allow(clippy::type_complexity)]
pub fn update_zombies(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    settings: Res<GameSettings>,
    mut roster: ResMut<EntityRoster>,
    player: Query<(Entity, &Transform), (With<Player>, Without<Zombie>)>,
    mut zombies: Query<(Entity, &mut Transform, &mut Zombie, &Health), Without<DeathAnimation>>,
    mut bites: MessageWriter<PlayerDamaged>,
    mut killed: MessageWriter<ZombieKilled>,
) {
    let Ok((player_entity, player_transform)) = player.single() else {
        return;
    };
    let dt = clock.delta_secs();
    let zombie_settings = &settings.zombies;

    for (entity, mut transform, mut zombie, health) in zombies.iter_mut() {
        zombie.tick_timers(dt);

        if health.is_depleted() {
            if begin_zombie_death(
                &mut commands,
                &mut roster,
                entity,
                &transform,
                zombie_settings.death_duration_secs,
            ) {
                killed.write(ZombieKilled { zombie: entity });
            }
            continue;
        }

        let step = chase_step(
            transform.translation,
            player_transform.translation,
            dt,
            zombie_settings,
        );
        transform.translation += step.displacement;
        zombie.sprinting = step.sprinting;
        if let Some(yaw) = step.facing {
            transform.rotation = Quat::from_rotation_y(yaw);
        }

        if step.in_bite_range && zombie.bite_ready() {
            zombie.restart_bite_cooldown(zombie_settings.attack_cooldown_secs);
            bites.write(PlayerDamaged {
                source: entity,
                amount: zombie_settings.attack_damage,
            });
            debug!("Zombie {:?} bites {:?}", entity, player_entity);
        }
    }
}

pub fn animate_zombie_limbs(
    clock: Res<SimulationClock>,
    mut limbs: Query<(&ZombieLimb, &mut Transform)>,
) {
    let t = clock.elapsed_secs() * 2.0;
    for (limb, mut transform) in limbs.iter_mut() {
        transform.rotation = limb_rotation(limb.0, t);
    }
}

/// Red while flashing from a hit, otherwise a glow that rises at night.
pub fn tint_zombies(
    sky: Res<SkyState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    zombies: Query<(&Zombie, &ZombieBody), Without<DeathAnimation>>,
) {
    let glow = LinearRgba::from(BODY_COLOR) * sky.zombie_glow;
    for (zombie, body) in zombies.iter() {
        let Some(material) = materials.get_mut(&body.body) else {
            continue;
        };
        material.emissive = if zombie.is_flashing() {
            HIT_FLASH_COLOR
        } else {
            glow
        };
    }
}

/// Turns health bars towards the camera, sizes the fill, and hides bars of
/// dying zombies.
#[allow(clippy::type_complexity)]
pub fn billboard_health_bars(
    camera: Query<&GlobalTransform, With<Player>>,
    zombies: Query<(&Transform, &Health, Has<DeathAnimation>), With<Zombie>>,
    mut pivots: Query<
        (&HealthBarPivot, &mut Transform, &mut Visibility),
        (Without<Zombie>, Without<ZombieHealthBar>),
    >,
    mut fills: Query<(&ZombieHealthBar, &mut Transform), (Without<Zombie>, Without<HealthBarPivot>)>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    let camera_position = camera.translation();

    for (pivot, mut transform, mut visibility) in pivots.iter_mut() {
        let Ok((zombie_transform, _, dying)) = zombies.get(pivot.zombie) else {
            continue;
        };
        if dying {
            *visibility = Visibility::Hidden;
            continue;
        }
        let to_camera = camera_position - zombie_transform.translation;
        let yaw = to_camera.x.atan2(to_camera.z);
        transform.rotation = zombie_transform.rotation.inverse() * Quat::from_rotation_y(yaw);
    }

    for (bar, mut transform) in fills.iter_mut() {
        let Ok((_, health, _)) = zombies.get(bar.zombie) else {
            continue;
        };
        let fraction = health.fraction();
        transform.scale.x = fraction.max(f32::EPSILON);
        transform.translation.x = -(1.0 - fraction) / 2.0;
    }
}

/// Topples, sinks, and fades dying zombies, then removes them and queues a respawn.
pub fn animate_dying_zombies(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    settings: Res<GameSettings>,
    mut roster: ResMut<EntityRoster>,
    mut respawns: ResMut<RespawnQueue>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut dying: Query<(Entity, &mut Transform, &mut DeathAnimation, Option<&ZombieBody>)>,
) {
    for (entity, mut transform, mut death, body) in dying.iter_mut() {
        death.elapsed += clock.delta_secs();
        let (rotation, y, alpha) = death.pose();
        transform.rotation = rotation;
        transform.translation.y = y;

        if let Some(body) = body {
            for handle in [&body.body, &body.head] {
                if let Some(material) = materials.get_mut(handle) {
                    material.alpha_mode = AlphaMode::Blend;
                    material.base_color.set_alpha(alpha);
                }
            }
        }

        if death.is_finished() {
            commands.entity(entity).despawn();
            if roster.finish_zombie_death(entity) {
                respawns.schedule(RespawnKind::Zombie, settings.zombies.respawn_delay_secs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::message::Messages;

    use super::*;

    fn zombie_app() -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_millis(100));
        app.insert_resource(clock)
            .insert_resource(GameSettings::default())
            .init_resource::<EntityRoster>()
            .init_resource::<RespawnQueue>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_message::<PlayerDamaged>()
            .add_message::<ZombieKilled>()
            .add_systems(Update, (update_zombies, animate_dying_zombies).chain());
        app.world_mut()
            .spawn((Player, Transform::from_xyz(0.0, 5.0, 0.0)));
        app
    }

    fn spawn_bare_zombie(app: &mut App, position: Vec3) -> Entity {
        let zombie = app
            .world_mut()
            .spawn((Zombie::default(), Transform::from_translation(position), Health::new(100.0)))
            .id();
        app.world_mut().resource_mut::<EntityRoster>().register_zombie(zombie);
        zombie
    }

    fn bites(app: &App) -> usize {
        app.world()
            .resource::<Messages<PlayerDamaged>>()
            .iter_current_update_messages()
            .count()
    }

    #[test]
    fn approaches_player_on_the_ground_plane() {
        let mut app = zombie_app();
        let zombie = spawn_bare_zombie(&mut app, Vec3::new(0.0, 2.0, 20.0));

        app.update();

        let transform = app.world().get::<Transform>(zombie).expect("zombie exists");
        assert!((transform.translation.z - (20.0 - 0.12)).abs() < 1e-4);
        assert_eq!(transform.translation.y, 2.0);
        assert!(!app.world().get::<Zombie>(zombie).expect("zombie exists").sprinting);
    }

    #[test]
    fn bite_respects_cooldown() {
        let mut app = zombie_app();
        spawn_bare_zombie(&mut app, Vec3::new(0.0, 2.0, 1.5));

        app.update();
        assert_eq!(bites(&app), 1);

        app.update();
        assert_eq!(bites(&app), 0);

        let mut total = 1;
        for _ in 0..14 {
            app.update();
            total += bites(&app);
        }
        assert_eq!(total, 2);
    }

    #[test]
    fn depleted_zombie_dies_once_and_queues_respawn() {
        let mut app = zombie_app();
        let zombie = spawn_bare_zombie(&mut app, Vec3::new(0.0, 2.0, 10.0));
        app.world_mut()
            .get_mut::<Health>(zombie)
            .expect("zombie exists")
            .apply_damage(100.0);

        app.update();
        assert!(app.world().resource::<EntityRoster>().is_zombie_dying(zombie));

        for _ in 0..12 {
            app.update();
        }

        assert!(app.world().get_entity(zombie).is_err());
        let roster = app.world().resource::<EntityRoster>();
        assert_eq!(roster.zombie_population(), 0);
        assert_eq!(app.world().resource::<RespawnQueue>().len(), 1);
    }

    #[test]
    fn night_glow_uses_full_body_colour() {
        let mut app = App::new();
        app.insert_resource(SkyState::from_progress(0.75))
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, tint_zombies);

        let (body, head, flashing_body) = {
            let mut materials = app.world_mut().resource_mut::<Assets<StandardMaterial>>();
            (
                materials.add(StandardMaterial::default()),
                materials.add(StandardMaterial::default()),
                materials.add(StandardMaterial::default()),
            )
        };
        app.world_mut().spawn((
            Zombie::default(),
            ZombieBody {
                body: body.clone(),
                head: head.clone(),
            },
        ));
        let mut flashing = Zombie::default();
        flashing.flash(0.1);
        app.world_mut().spawn((
            flashing,
            ZombieBody {
                body: flashing_body.clone(),
                head,
            },
        ));

        app.update();

        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let emissive = materials.get(&body).expect("body material").emissive;
        assert_eq!(emissive, LinearRgba::from(BODY_COLOR));
        let flashed = materials.get(&flashing_body).expect("body material").emissive;
        assert_eq!(flashed, HIT_FLASH_COLOR);
    }
}

//! Pickup hover animation and collection.
use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    combat::{targeting::horizontal_distance, Health, PickupCollected},
    core::{GameSettings, SimulationClock},
    game::{
        respawn::{RespawnKind, RespawnQueue},
        roster::EntityRoster,
    },
    pickup::components::HealthPickup,
    player::components::Player,
};

pub fn animate_pickups(
    clock: Res<SimulationClock>,
    settings: Res<GameSettings>,
    mut pickups: Query<(&HealthPickup, &mut Transform)>,
) {
    let pickup_settings = &settings.pickups;
    let now = clock.elapsed_secs();
    for (pickup, mut transform) in pickups.iter_mut() {
        transform.rotate_y(pickup_settings.rotation_speed * clock.delta_secs());
        transform.translation.y =
            pickup.hover_y(now, pickup_settings.hover_speed, pickup_settings.hover_height);
    }
}

/// Heals the player on contact; pickups are left alone while health is full.
pub fn collect_pickups(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut roster: ResMut<EntityRoster>,
    mut respawns: ResMut<RespawnQueue>,
    player: Query<(&Transform, &Health), With<Player>>,
    pickups: Query<(Entity, &Transform, &HealthPickup), Without<Player>>,
    mut collected: MessageWriter<PickupCollected>,
) {
    let Ok((player_transform, health)) = player.single() else {
        return;
    };
    if health.is_full() || health.is_depleted() {
        return;
    }

    for (entity, transform, pickup) in pickups.iter() {
        if horizontal_distance(player_transform.translation, transform.translation)
            > settings.pickups.collect_radius
        {
            continue;
        }
        if !roster.collect_pickup(entity) {
            continue;
        }
        collected.write(PickupCollected {
            pickup: entity,
            amount: pickup.heal_amount,
        });
        commands.entity(entity).despawn();
        respawns.schedule(RespawnKind::HealthPickup, settings.pickups.respawn_delay_secs);
        // One pickup per frame so the player's heal is applied before the next check.
        break;
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;

    fn pickup_app(player_health: f32) -> (App, Entity) {
        let mut app = App::new();
        app.insert_resource(GameSettings::default())
            .init_resource::<EntityRoster>()
            .init_resource::<RespawnQueue>()
            .add_message::<PickupCollected>()
            .add_systems(Update, collect_pickups);

        let mut health = Health::new(100.0);
        health.apply_damage(100.0 - player_health);
        app.world_mut()
            .spawn((Player, Transform::from_xyz(0.0, 5.0, 0.0), health));

        let pickup = app
            .world_mut()
            .spawn((
                HealthPickup::new(50.0, 0.0, 1.5),
                Transform::from_xyz(1.0, 1.5, 0.0),
            ))
            .id();
        app.world_mut().resource_mut::<EntityRoster>().register_pickup(pickup);
        (app, pickup)
    }

    #[test]
    fn full_health_leaves_pickup_in_place() {
        let (mut app, pickup) = pickup_app(100.0);
        app.update();
        assert!(app.world().get_entity(pickup).is_ok());
        assert_eq!(app.world().resource::<EntityRoster>().active_pickups().len(), 1);
    }

    #[test]
    fn wounded_player_collects_and_queues_respawn() {
        let (mut app, pickup) = pickup_app(40.0);
        app.update();

        assert!(app.world().get_entity(pickup).is_err());
        assert!(app.world().resource::<EntityRoster>().active_pickups().is_empty());
        assert_eq!(app.world().resource::<RespawnQueue>().len(), 1);
        let sent = app
            .world()
            .resource::<Messages<PickupCollected>>()
            .iter_current_update_messages()
            .map(|message| message.amount)
            .collect::<Vec<_>>();
        assert_eq!(sent, vec![50.0]);
    }
}

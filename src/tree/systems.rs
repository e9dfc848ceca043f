//! Falling-tree animation and removal.
use bevy::{log::debug, prelude::*};

use crate::{
    core::{GameSettings, SimulationClock},
    game::{
        respawn::{RespawnKind, RespawnQueue},
        roster::EntityRoster,
    },
    tree::components::{Falling, Tree},
};

/// Tips felled trees over, lets them lie, then despawns them and queues a respawn.
pub fn animate_falling_trees(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    settings: Res<GameSettings>,
    mut roster: ResMut<EntityRoster>,
    mut respawns: ResMut<RespawnQueue>,
    mut trees: Query<(Entity, &mut Transform, &mut Falling), With<Tree>>,
) {
    for (entity, mut transform, mut falling) in trees.iter_mut() {
        falling.elapsed += clock.delta_secs();
        let (rotation, y) = falling.pose();
        transform.rotation = rotation;
        transform.translation.y = y;

        if falling.is_finished() {
            commands.entity(entity).despawn();
            if roster.finish_tree_fall(entity) {
                debug!("Tree {:?} cleared", entity);
                respawns.schedule(RespawnKind::Tree, settings.trees.respawn_delay_secs);
            }
        }
    }
}

use bevy::prelude::*;

use crate::{
    core::FrameSet,
    game::session::session_is_playing,
    zombie::{
        spawn::ZombieVisuals,
        systems::{
            animate_dying_zombies, animate_zombie_limbs, billboard_health_bars, tint_zombies,
            update_zombies,
        },
    },
};

pub struct ZombiePlugin;

impl Plugin for ZombiePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZombieVisuals>().add_systems(
            Update,
            (
                update_zombies,
                animate_zombie_limbs,
                tint_zombies,
                animate_dying_zombies,
                billboard_health_bars,
            )
                .chain()
                .in_set(FrameSet::Entities)
                .run_if(session_is_playing),
        );
    }
}

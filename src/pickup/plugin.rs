use bevy::prelude::*;

use crate::{
    core::FrameSet,
    game::session::session_is_playing,
    pickup::{
        spawn::PickupVisuals,
        systems::{animate_pickups, collect_pickups},
    },
};

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickupVisuals>().add_systems(
            Update,
            (animate_pickups, collect_pickups)
                .chain()
                .in_set(FrameSet::Entities)
                .run_if(session_is_playing),
        );
    }
}

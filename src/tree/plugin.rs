use bevy::prelude::*;

use crate::{
    core::FrameSet,
    game::session::session_is_playing,
    tree::{spawn::TreeVisuals, systems::animate_falling_trees},
};

pub struct TreePlugin;

impl Plugin for TreePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TreeVisuals>().add_systems(
            Update,
            animate_falling_trees
                .in_set(FrameSet::Entities)
                .run_if(session_is_playing),
        );
    }
}

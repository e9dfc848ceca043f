//! ControlsPlugin wires pointer lock, look, and movement into the input phase.
use bevy::prelude::*;

use crate::{
    controls::{
        components::PointerState,
        systems::{
            apply_cursor_grab, first_person_mouse_look, move_player, resolve_tree_collisions,
            update_pointer_state,
        },
    },
    core::FrameSet,
    game::session::session_is_playing,
};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_systems(
                Update,
                (update_pointer_state, apply_cursor_grab)
                    .chain()
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (first_person_mouse_look, move_player, resolve_tree_collisions)
                    .chain()
                    .after(apply_cursor_grab)
                    .in_set(FrameSet::Input)
                    .run_if(session_is_playing),
            );
    }
}

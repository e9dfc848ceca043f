// src/ui/hud/plugin.rs
//
// HudPlugin spawns the HUD and refreshes it last each frame.

use bevy::prelude::*;

use crate::core::FrameSet;

use super::systems::{
    spawn_hud, update_damage_flash_overlay, update_game_over_overlay, update_health_hud,
    update_instructions_overlay, update_session_labels,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        info!("HudPlugin registered");

        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                update_health_hud,
                update_session_labels,
                update_instructions_overlay,
                update_damage_flash_overlay,
                update_game_over_overlay,
            )
                .in_set(FrameSet::Hud),
        );
    }
}

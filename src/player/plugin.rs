//! Player plugin wiring combat and damage systems.
use bevy::prelude::*;

use crate::{
    core::FrameSet,
    game::session::session_is_playing,
    player::{
        components::DamageFlash,
        systems::{
            animate_sword_swing, apply_pickup_healing, apply_player_damage, player_attack_input,
            spawn_player, tick_damage_flash, tick_invulnerability,
        },
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DamageFlash>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    player_attack_input,
                    animate_sword_swing.after(player_attack_input),
                    tick_invulnerability,
                    apply_player_damage.after(tick_invulnerability),
                    apply_pickup_healing,
                )
                    .in_set(FrameSet::Player)
                    .run_if(session_is_playing),
            )
            .add_systems(Update, tick_damage_flash.in_set(FrameSet::Player));
    }
}

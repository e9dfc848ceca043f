//! GamePlugin owns the roster, spawning, respawns, and the survival session.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;

use crate::{
    combat::{PickupCollected, PlayerDamaged, TreeFelled, ZombieKilled},
    core::{FrameSet, GameSettings},
    game::{
        respawn::RespawnQueue,
        roster::EntityRoster,
        session::{
            advance_survival_timer, tally_session_events, detect_game_over, session_is_over,
            session_is_playing, GameSession,
        },
        spawning::{
            initialize_world, periodic_zombie_spawn, process_respawns, restart_session,
            ZombieSpawnTimer,
        },
    },
    player::systems::{apply_player_damage, spawn_player},
    world::systems::spawn_world_environment,
};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let spawn_interval = app
            .world()
            .get_resource::<GameSettings>()
            .map(|settings| settings.zombies.spawn_interval_secs)
            .unwrap_or_else(|| GameSettings::default().zombies.spawn_interval_secs);

        app.add_message::<PlayerDamaged>()
            .add_message::<PickupCollected>()
            .add_message::<ZombieKilled>()
            .add_message::<TreeFelled>()
            .init_resource::<EntityRoster>()
            .init_resource::<RespawnQueue>()
            .init_resource::<GameSession>()
            .insert_resource(ZombieSpawnTimer::new(spawn_interval))
            // Shares the seeded SpawnRng with the mountains, so the order is fixed.
            .add_systems(
                Startup,
                initialize_world
                    .after(spawn_player)
                    .after(spawn_world_environment),
            )
            .add_systems(
                Update,
                restart_session
                    .run_if(session_is_over)
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (process_respawns, periodic_zombie_spawn)
                    .chain()
                    .in_set(FrameSet::Entities)
                    .run_if(session_is_playing),
            )
            .add_systems(
                Update,
                (advance_survival_timer, tally_session_events, detect_game_over)
                    .chain()
                    .in_set(FrameSet::Player)
                    .after(apply_player_damage),
            );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(PopulationLogTimer(Timer::from_seconds(
                1.0,
                TimerMode::Repeating,
            )))
            .add_systems(Update, log_population.after(FrameSet::Entities));
        }
    }
}

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct PopulationLogTimer(Timer);

#[cfg(feature = "core_debug")]
fn log_population(
    mut timer: ResMut<PopulationLogTimer>,
    clock: Res<crate::core::SimulationClock>,
    roster: Res<EntityRoster>,
    respawns: Res<RespawnQueue>,
) {
    if timer.0.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Population: {} zombies ({} dying) | {} trees ({} falling) | {} pickups | {} respawns pending",
            roster.live_zombies().len(),
            roster.dying_zombie_count(),
            roster.standing_trees().len(),
            roster.falling_tree_count(),
            roster.active_pickups().len(),
            respawns.len(),
        );
    }
}

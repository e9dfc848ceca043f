//! WorldPlugin coordinates the static scene and the day/night cycle.
use bevy::prelude::*;

use crate::{
    core::FrameSet,
    world::{
        systems::spawn_world_environment,
        time::{
            advance_day_night, apply_world_lighting, repaint_sky_dome, DayNightClock, SkyState,
            WorldTimeSettings,
        },
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let time_settings = WorldTimeSettings::load_or_default();
        info!(
            "Day/night configured: {:.0}s per day, starting at {:.2}",
            time_settings.day_length_seconds, time_settings.day_start_fraction
        );

        let clock = DayNightClock::new(&time_settings);
        let sky = SkyState::from_progress(clock.progress());

        app.insert_resource(time_settings)
            .insert_resource(clock)
            .insert_resource(sky)
            .insert_resource(ClearColor(Color::srgb(
                sky.sky_color.x,
                sky.sky_color.y,
                sky.sky_color.z,
            )))
            .add_systems(Startup, spawn_world_environment)
            .add_systems(
                Update,
                (advance_day_night, apply_world_lighting, repaint_sky_dome)
                    .chain()
                    .in_set(FrameSet::Environment),
            );
    }
}

//! CorePlugin wires global timing, gameplay settings, and frame ordering.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::{rng::SpawnRng, settings::GameSettings};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;
/// Longest frame delta the simulation will absorb at once (e.g. after a window drag).
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Per-frame phases, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Clock,
    Input,
    Environment,
    Entities,
    Player,
    Hud,
}

/// Tracks scaled simulation time derived from real frame deltas.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        let clamped = time_scale.max(MIN_TIME_SCALE);
        Self {
            time_scale: clamped,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Last scaled delta in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    /// Returns the total scaled duration elapsed since the clock was initialised.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    /// Real deltas are clamped to [`MAX_FRAME_DELTA`] before scaling.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.min(MAX_FRAME_DELTA).mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers simulation timing, settings, and the frame set ordering.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = GameSettings::load_or_default();
        if let Some(seed) = settings.spawning.seed {
            info!("Spawning with fixed seed {}", seed);
        }

        app.insert_resource(SimulationClock::new(self.time_scale))
            .insert_resource(SpawnRng::from_seed(settings.spawning.seed))
            .insert_resource(settings)
            .configure_sets(
                Update,
                (
                    FrameSet::Clock,
                    FrameSet::Input,
                    FrameSet::Environment,
                    FrameSet::Entities,
                    FrameSet::Player,
                    FrameSet::Hud,
                )
                    .chain(),
            )
            .add_systems(Startup, log_startup_settings)
            .add_systems(Update, update_simulation_clock.in_set(FrameSet::Clock));

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks.after(FrameSet::Clock));
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_settings(clock: Res<SimulationClock>, settings: Res<GameSettings>) {
    info!(
        "CorePlugin initialised with time scale: {:.3}",
        clock.time_scale()
    );
    info!(
        "Gameplay: {} trees, {} starting zombies (cap {}), {} health pickups",
        settings.trees.count,
        settings.zombies.initial_count,
        settings.zombies.max_population,
        settings.pickups.count
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.5);
        clock.tick(Duration::from_millis(40));

        assert_eq!(clock.time_scale(), 2.5);
        assert_eq!(clock.last_real_delta(), Duration::from_millis(40));
        assert!((clock.delta_secs() - 0.1).abs() < 1e-6);
        assert!((clock.elapsed_secs() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_min_time_scale() {
        let clock = SimulationClock::new(0.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);

        let clock = SimulationClock::new(-5.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn clock_clamps_long_frames() {
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_secs(3));

        assert_eq!(clock.last_real_delta(), Duration::from_secs(3));
        assert!((clock.delta_secs() - MAX_FRAME_DELTA.as_secs_f32()).abs() < 1e-6);
        assert!((clock.elapsed_secs() - 0.1).abs() < 1e-6);
    }
}

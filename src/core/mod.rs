//! Core module: simulation clock, frame ordering, and configuration loading.
pub mod config;
pub mod plugin;
pub mod rng;
pub mod settings;

pub use plugin::{CorePlugin, FrameSet, SimulationClock};
pub use rng::SpawnRng;
pub use settings::GameSettings;

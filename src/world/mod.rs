//! World module housing the static scene and the day/night cycle.
pub mod components;
pub mod plugin;
pub mod systems;
pub mod time;

pub use plugin::WorldPlugin;

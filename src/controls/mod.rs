//! First-person controls: pointer lock, mouse look, movement, and jumping.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ControlsPlugin;

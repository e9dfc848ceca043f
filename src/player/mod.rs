//! Player module - health, sword attack, and damage feedback on the camera entity.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;

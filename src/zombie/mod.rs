//! Zombies: chase, bite, shamble, health bar, and death animation.
pub mod components;
pub mod plugin;
pub mod spawn;
pub mod systems;

pub use plugin::ZombiePlugin;

//! Game manager: roster, spawning, respawns, and the survival session.
pub mod plugin;
pub mod respawn;
pub mod roster;
pub mod session;
pub mod spawning;

pub use plugin::GamePlugin;

//! Floating health pickups.
pub mod components;
pub mod plugin;
pub mod spawn;
pub mod systems;

pub use plugin::PickupPlugin;

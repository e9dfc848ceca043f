// src/ui/hud/mod.rs
//
// Heads-up display: health, survival timer, overlays.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::HudPlugin;

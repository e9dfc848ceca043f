// src/ui/mod.rs
//
// UI module providing screen-space UI elements.
//
// Current features:
// - HUD (health bar, survival timer, instructions, damage flash, game over)

pub mod hud;

// Re-export the main plugin
pub use hud::HudPlugin;

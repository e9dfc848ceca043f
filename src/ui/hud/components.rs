// src/ui/hud/components.rs
//
// Marker components for HUD nodes.

use bevy::prelude::*;

/// Red fill inside the health bar frame; width tracks health fraction.
#[derive(Component, Debug)]
pub struct HealthBarFill;

/// Numeric `current / max` label next to the bar.
#[derive(Component, Debug)]
pub struct HealthLabel;

#[derive(Component, Debug)]
pub struct SurvivalLabel;

/// Best time and kill count.
#[derive(Component, Debug)]
pub struct StatsLabel;

/// Click-to-play help, shown while the pointer is free.
#[derive(Component, Debug)]
pub struct InstructionsOverlay;

/// Full-screen red tint after a bite.
#[derive(Component, Debug)]
pub struct DamageFlashOverlay;

#[derive(Component, Debug)]
pub struct GameOverOverlay;

#[derive(Component, Debug)]
pub struct GameOverLabel;

//! Components used by the world module.
use bevy::prelude::*;

/// Marker component identifying the main directional light (the "sun").
#[derive(Component, Default)]
pub struct PrimarySun;

/// Marker for the distant mountain cones.
#[derive(Component, Default)]
pub struct Mountain;

/// Marker for the inside-out sky sphere.
#[derive(Component, Default)]
pub struct Sky;

/// Marker for the ground plane.
#[derive(Component, Default)]
pub struct Ground;

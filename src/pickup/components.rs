//! Health pickup component and hover curve.
use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct HealthPickup {
    pub heal_amount: f32,
    /// Simulation time at which the pickup appeared; drives the hover phase.
    pub spawned_at: f32,
    pub base_y: f32,
}

impl HealthPickup {
    pub fn new(heal_amount: f32, spawned_at: f32, base_y: f32) -> Self {
        Self {
            heal_amount,
            spawned_at,
            base_y,
        }
    }

    pub fn hover_y(&self, now: f32, speed: f32, height: f32) -> f32 {
        self.base_y + hover_offset(now - self.spawned_at, speed, height)
    }
}

pub fn hover_offset(age: f32, speed: f32, height: f32) -> f32 {
    (age * speed).sin() * height
}

//! Tree components and the fall-animation curves.
use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use crate::combat::targeting::direction_towards;

/// Progress after which the trunk bounces on the ground.
const BOUNCE_START: f32 = 0.8;
const BOUNCE_AMPLITUDE: f32 = 0.05;

/// A choppable tree. `trunk_radius` already includes the tree's scale.
#[derive(Component, Debug)]
pub struct Tree {
    pub trunk_radius: f32,
}

/// Present from the killing blow until the tree is despawned.
#[derive(Component, Debug)]
pub struct Falling {
    pub elapsed: f32,
    pub duration: f32,
    pub linger: f32,
    pub start_rotation: Quat,
    /// Horizontal world axis the trunk rotates about.
    pub axis: Vec3,
}

impl Falling {
    /// Falls away from `attacker`.
    pub fn away_from(
        tree: &Transform,
        attacker: Vec3,
        duration: f32,
        linger: f32,
    ) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            linger: linger.max(0.0),
            start_rotation: tree.rotation,
            axis: fall_axis(attacker, tree.translation),
        }
    }

    pub fn progress(&self) -> f32 {
        fall_progress(self.elapsed, self.duration)
    }

    /// Fall finished and the trunk has lain on the ground long enough.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration + self.linger
    }

    pub fn pose(&self) -> (Quat, f32) {
        let progress = self.progress();
        let angle = ease_out_cubic(progress) * FRAC_PI_2;
        let rotation = Quat::from_axis_angle(self.axis, angle) * self.start_rotation;
        (rotation, fall_bounce(progress))
    }
}

pub fn fall_progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Small ground bounce over the last fifth of the fall.
pub fn fall_bounce(progress: f32) -> f32 {
    if progress <= BOUNCE_START {
        return 0.0;
    }
    let tail = progress - BOUNCE_START;
    (tail * 5.0 * PI).sin() * BOUNCE_AMPLITUDE * (1.0 - tail / (1.0 - BOUNCE_START))
}

/// Rotation axis that tips a tree at `tree` over, away from `attacker`.
pub fn fall_axis(attacker: Vec3, tree: Vec3) -> Vec3 {
    let away = direction_towards(attacker, tree);
    if away == Vec3::ZERO {
        return Vec3::X;
    }
    Vec3::Y.cross(away).normalize_or(Vec3::X)
}

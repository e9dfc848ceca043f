//! Components and resources for first-person controls.
use bevy::prelude::*;

use crate::core::settings::ControlSettings;

const PITCH_LIMIT: f32 = 1.54;

/// Look orientation of the first-person camera.
#[derive(Component, Debug)]
pub struct FirstPersonCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub look_sensitivity: f32,
}

impl FirstPersonCamera {
    pub fn new(look_sensitivity: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            look_sensitivity,
        }
    }

    /// Applies a mouse delta scaled by sensitivity and `dt`, clamping pitch.
    pub fn look(&mut self, delta: Vec2, dt: f32) {
        self.yaw -= delta.x * self.look_sensitivity * dt;
        self.pitch = (self.pitch - delta.y * self.look_sensitivity * dt).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn rotation(&self) -> Quat {
        (Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch))
            .normalize()
    }

    /// Heading on the ground plane, ignoring pitch.
    pub fn planar_axes(&self) -> (Vec3, Vec3) {
        let heading = Quat::from_axis_angle(Vec3::Y, self.yaw);
        (heading * Vec3::NEG_Z, heading * Vec3::X)
    }
}

/// Planar velocity (x = right, y = forward) and jump state.
#[derive(Component, Debug, Default, Clone)]
pub struct Locomotion {
    pub velocity: Vec2,
    pub vertical_velocity: f32,
    pub jumping: bool,
}

impl Locomotion {
    /// Applies friction then input acceleration, returning this frame's
    /// displacement along (right, forward).
    pub fn step_planar(&mut self, intent: Vec2, dt: f32, settings: &ControlSettings) -> Vec2 {
        let decay = (1.0 - settings.friction * dt).max(0.0);
        self.velocity *= decay;

        let direction = intent.normalize_or_zero();
        if intent.y != 0.0 {
            self.velocity.y += direction.y * settings.acceleration * dt;
        }
        if intent.x != 0.0 {
            self.velocity.x += direction.x * settings.acceleration * dt;
        }
        self.velocity * dt
    }

    pub fn try_jump(&mut self, jump_velocity: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.vertical_velocity = jump_velocity;
        true
    }

    /// Integrates the jump arc and returns the new eye height.
    pub fn step_vertical(&mut self, y: f32, ground: f32, gravity: f32, dt: f32) -> f32 {
        if !self.jumping {
            return y;
        }
        self.vertical_velocity += gravity * dt;
        let next = y + self.vertical_velocity * dt;
        if next <= ground {
            self.jumping = false;
            self.vertical_velocity = 0.0;
            return ground;
        }
        next
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pointer-lock status; movement, look, and attacks require a locked pointer.
#[derive(Resource, Debug, Default)]
pub struct PointerState {
    locked: bool,
    just_locked: bool,
}

impl PointerState {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True on the frame the pointer became locked; that click is not an attack.
    pub fn just_locked(&self) -> bool {
        self.just_locked
    }

    /// Click locks, escape releases. Returns the new lock state when it changed.
    pub fn update(&mut self, clicked: bool, escape: bool) -> Option<bool> {
        self.just_locked = false;
        if escape && self.locked {
            self.locked = false;
            return Some(false);
        }
        if clicked && !self.locked {
            self.locked = true;
            self.just_locked = true;
            return Some(true);
        }
        None
    }
}

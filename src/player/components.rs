//! Components and resources for the player: sword, invulnerability, damage flash.
use std::f32::consts::{FRAC_PI_3, FRAC_PI_8, PI};

use bevy::prelude::*;

/// Arm pitch while idle.
pub const ARM_REST_PITCH: f32 = FRAC_PI_8;

/// Marker component identifying the player entity (attached to camera).
#[derive(Component, Debug, Default)]
pub struct Player;

/// Marker for the arm holding the sword; rotated by the swing animation.
#[derive(Component, Debug)]
pub struct SwordArm;

/// Window after a bite during which further damage is ignored.
#[derive(Component, Debug, Default)]
pub struct Invulnerability {
    remaining: f32,
}

impl Invulnerability {
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Counts down; returns true on the frame the window closes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        !self.is_active()
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

/// Sword swing state. One swing at a time.
#[derive(Component, Debug)]
pub struct SwordAttack {
    attacking: bool,
    elapsed: f32,
    duration: f32,
}

impl SwordAttack {
    pub fn new(duration: f32) -> Self {
        Self {
            attacking: false,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    #[cfg(test)]
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Starts a swing unless one is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.attacking {
            return false;
        }
        self.attacking = true;
        self.elapsed = 0.0;
        true
    }

    pub fn progress(&self) -> f32 {
        if !self.attacking {
            return 0.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advances the swing; clears `attacking` once it completes.
    pub fn tick(&mut self, dt: f32) {
        if !self.attacking {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.attacking = false;
            self.elapsed = 0.0;
        }
    }

    /// Arm pitch for the current point of the swing arc.
    pub fn arm_pitch(&self) -> f32 {
        ARM_REST_PITCH + (self.progress() * PI).sin() * FRAC_PI_3
    }

    pub fn reset(&mut self) {
        self.attacking = false;
        self.elapsed = 0.0;
    }
}

/// Red screen flash shown after the player is bitten.
#[derive(Resource, Debug, Default)]
pub struct DamageFlash {
    remaining: f32,
    duration: f32,
}

impl DamageFlash {
    pub fn trigger(&mut self, duration: f32) {
        self.duration = duration.max(f32::EPSILON);
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// 1.0 right after a hit, fading to 0.0.
    pub fn intensity(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swing_returns_to_rest() {
        let mut attack = SwordAttack::new(0.3);
        assert_eq!(attack.arm_pitch(), ARM_REST_PITCH);
        assert!(attack.try_begin());
        assert!(!attack.try_begin());

        attack.tick(0.15);
        assert!((attack.arm_pitch() - (ARM_REST_PITCH + FRAC_PI_3)).abs() < 1e-4);

        attack.tick(0.2);
        assert!(!attack.is_attacking());
        assert_eq!(attack.arm_pitch(), ARM_REST_PITCH);
        assert!(attack.try_begin());
    }

    #[test]
    fn invulnerability_expires() {
        let mut invulnerability = Invulnerability::default();
        assert!(!invulnerability.is_active());
        invulnerability.start(1.0);
        assert!(!invulnerability.tick(0.6));
        assert!(invulnerability.is_active());
        assert!(invulnerability.tick(0.6));
        assert!(!invulnerability.is_active());
        assert!(!invulnerability.tick(0.6));
    }

    #[test]
    fn damage_flash_fades() {
        let mut flash = DamageFlash::default();
        assert_eq!(flash.intensity(), 0.0);
        flash.trigger(0.2);
        assert_eq!(flash.intensity(), 1.0);
        flash.tick(0.1);
        assert!((flash.intensity() - 0.5).abs() < 1e-5);
        flash.tick(0.5);
        assert_eq!(flash.intensity(), 0.0);
    }
}

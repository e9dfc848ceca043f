//! Zombie components plus the pure chase and death-animation math.
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::{
    combat::targeting::{direction_towards, horizontal_distance},
    core::settings::ZombieSettings,
};

/// Chasing zombie state. Position lives on the entity's `Transform`.
#[derive(Component, Debug, Default)]
pub struct Zombie {
    pub sprinting: bool,
    bite_cooldown: f32,
    hit_flash: f32,
}

impl Zombie {
    pub fn bite_ready(&self) -> bool {
        self.bite_cooldown <= 0.0
    }

    pub fn restart_bite_cooldown(&mut self, secs: f32) {
        self.bite_cooldown = secs.max(0.0);
    }

    pub fn flash(&mut self, secs: f32) {
        self.hit_flash = secs.max(0.0);
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.bite_cooldown = (self.bite_cooldown - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
    }
}

/// Per-zombie material handles so flashes and fades stay local to one zombie.
#[derive(Component, Debug, Clone)]
pub struct ZombieBody {
    pub body: Handle<StandardMaterial>,
    pub head: Handle<StandardMaterial>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimbKind {
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// Child mesh animated by the shamble cycle.
#[derive(Component, Debug, Clone, Copy)]
pub struct ZombieLimb(pub LimbKind);

/// Red fill of the floating health bar, scaled by the owner's health.
#[derive(Component, Debug)]
pub struct ZombieHealthBar {
    pub zombie: Entity,
}

/// Pivot holding the health bar quads; rotated to face the camera.
#[derive(Component, Debug)]
pub struct HealthBarPivot {
    pub zombie: Entity,
}

/// Present while the zombie is in the dying set.
#[derive(Component, Debug)]
pub struct DeathAnimation {
    pub elapsed: f32,
    pub duration: f32,
    pub origin_y: f32,
    pub start_rotation: Quat,
}

impl DeathAnimation {
    pub fn new(duration: f32, origin_y: f32, start_rotation: Quat) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            origin_y,
            start_rotation,
        }
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Topples forward, sinks, and fades with progress.
    pub fn pose(&self) -> (Quat, f32, f32) {
        let progress = self.progress();
        let rotation = self.start_rotation * Quat::from_rotation_x(progress * FRAC_PI_2);
        let y = self.origin_y * (1.0 - progress);
        let alpha = 1.0 - progress;
        (rotation, y, alpha)
    }
}

/// One frame of pursuit.
#[derive(Debug, Clone, Copy)]
pub struct ChaseStep {
    pub displacement: Vec3,
    pub sprinting: bool,
    /// Yaw that faces the player, if the player is not directly overhead.
    pub facing: Option<f32>,
    pub in_bite_range: bool,
}

/// Moves towards `target` on the ground plane, sprinting when close and
/// halting at the stop distance.
pub fn chase_step(position: Vec3, target: Vec3, dt: f32, settings: &ZombieSettings) -> ChaseStep {
    let distance = horizontal_distance(position, target);
    let direction = direction_towards(position, target);
    let sprinting = distance <= settings.sprint_distance;
    let speed = if sprinting {
        settings.sprint_speed
    } else {
        settings.move_speed
    };

    let travel = (speed * dt).min((distance - settings.stop_distance).max(0.0));
    let facing = (direction != Vec3::ZERO).then(|| direction.x.atan2(direction.z));

    ChaseStep {
        displacement: direction * travel,
        sprinting,
        facing,
        in_bite_range: distance <= settings.attack_range,
    }
}

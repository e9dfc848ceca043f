//! Delayed respawns, ticked by the simulation clock.
use std::time::Duration;

use bevy::{prelude::*, time::TimerMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnKind {
    Zombie,
    Tree,
    HealthPickup,
}

/// Pending respawns in the order they were scheduled.
#[derive(Resource, Debug, Default)]
pub struct RespawnQueue {
    pending: Vec<(RespawnKind, Timer)>,
}

impl RespawnQueue {
    pub fn schedule(&mut self, kind: RespawnKind, delay_secs: f32) {
        debug!("Scheduling {:?} respawn in {:.1}s", kind, delay_secs);
        self.pending
            .push((kind, Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once)));
    }

    /// Advances every timer and removes the ones that fired, oldest first.
    pub fn tick(&mut self, delta: Duration) -> Vec<RespawnKind> {
        let mut ready = Vec::new();
        self.pending.retain_mut(|(kind, timer)| {
            timer.tick(delta);
            if timer.is_finished() {
                ready.push(*kind);
                false
            } else {
                true
            }
        });
        ready
    }

    #[cfg(any(test, feature = "core_debug"))]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(any(test, feature = "core_debug"))]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

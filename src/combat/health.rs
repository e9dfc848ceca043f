//! Health pool shared by the player, zombies, and trees.
use bevy::prelude::*;

/// Hit points clamped to `[0, max]`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(1.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Remaining health as a fraction of max, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Subtracts `amount` and reports whether health is now depleted.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if amount > 0.0 {
            self.current = (self.current - amount).max(0.0);
        }
        self.is_depleted()
    }

    /// Restores up to `amount` and returns how much was actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.is_depleted() {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - before
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_goes_below_zero() {
        let mut health = Health::new(100.0);
        assert!(!health.apply_damage(34.0));
        assert!(!health.apply_damage(34.0));
        assert!(health.apply_damage(34.0));
        assert_eq!(health.current(), 0.0);
        assert!(health.apply_damage(34.0));
        assert_eq!(health.current(), 0.0);
        assert_eq!(health.fraction(), 0.0);
    }

    #[test]
    fn heal_caps_at_max_and_reports_applied_amount() {
        let mut health = Health::new(100.0);
        health.apply_damage(30.0);
        assert_eq!(health.heal(50.0), 30.0);
        assert!(health.is_full());
        assert_eq!(health.heal(50.0), 0.0);
    }

    #[test]
    fn ignores_non_positive_amounts_and_dead_targets() {
        let mut health = Health::new(100.0);
        health.apply_damage(-10.0);
        assert_eq!(health.current(), 100.0);
        health.apply_damage(40.0);
        assert_eq!(health.heal(-5.0), 0.0);

        health.apply_damage(1000.0);
        assert_eq!(health.heal(50.0), 0.0);
        health.reset();
        assert!(health.is_full());
    }
}

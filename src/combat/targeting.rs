//! Ground-plane distance and facing-cone checks used for melee and proximity.
use bevy::prelude::*;

/// Projects a vector onto the XZ plane.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Returns true when `target` lies within `range` of `origin` (ignoring
/// height) and inside the cone around `forward` whose cosine is `min_dot`.
pub fn within_strike(origin: Vec3, forward: Vec3, target: Vec3, range: f32, min_dot: f32) -> bool {
    if horizontal_distance(origin, target) > range {
        return false;
    }
    let facing = flatten(forward).normalize_or_zero();
    let to_target = flatten(target - origin).normalize_or_zero();
    if to_target == Vec3::ZERO {
        // Standing on top of the target always connects.
        return true;
    }
    facing.dot(to_target) > min_dot
}

/// Horizontal unit vector pointing from `from` to `to`, or zero when they coincide.
pub fn direction_towards(from: Vec3, to: Vec3) -> Vec3 {
    flatten(to - from).normalize_or_zero()
}

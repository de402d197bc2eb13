//! Stateless angular integration about a fixed world axis

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::degrees_over;

/// Which multiplier drives the spin this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinRate {
    /// Slow coast while the blade faces the cut direction
    Normal,
    /// Re-orienting spin (first spin, and free spin while unsafe)
    Fast,
    /// Power-up override
    PowerUp,
}

/// Rotation of `base_rate * rate_multiplier * dt` degrees about `axis`
///
/// `axis` must be unit length and `dt` non-negative; neither is checked.
#[inline]
pub fn next_delta(axis: Vec3, rate_multiplier: f32, base_rate: f32, dt: f32) -> Quat {
    Quat::from_axis_angle(axis, degrees_over(base_rate * rate_multiplier, dt))
}

/// Pre-multiply `delta` onto `current` so spins accumulate in world space
#[inline]
pub fn apply_delta(current: Quat, delta: Quat) -> Quat {
    (delta * current).normalize()
}

//! Cut-direction safety cone
//!
//! A knife is "cut-safe" when its blade faces within a cone around the cut
//! reference direction. The flight state machine uses this to decide between
//! the slow coast and the fast re-orienting spin.

use glam::Vec3;

/// Unsigned angle between `forward` and `reference`, in degrees [0, 180]
#[inline]
pub fn facing_angle_degrees(forward: Vec3, reference: Vec3) -> f32 {
    forward.angle_between(reference).to_degrees()
}

/// True iff the facing lies strictly inside the cone of `threshold_degrees`
///
/// Both vectors are expected to be unit length.
#[inline]
pub fn is_safe_facing(forward: Vec3, reference: Vec3, threshold_degrees: f32) -> bool {
    facing_angle_degrees(forward, reference) < threshold_degrees
}

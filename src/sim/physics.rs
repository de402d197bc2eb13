//! Ballistic integration for the knife body
//!
//! Stands in for the engine's rigid-body integrator: the flight state machine
//! only sets velocities and orientations, this moves the body.

use glam::Vec3;

use super::state::KnifeBody;

/// Semi-implicit Euler step under gravity along -Y
///
/// A grounded body rests on its platform and does not move.
pub fn integrate(body: &mut KnifeBody, gravity: f32, dt: f32) {
    if body.grounded {
        return;
    }
    body.velocity += Vec3::NEG_Y * gravity * dt;
    body.position += body.velocity * dt;
}

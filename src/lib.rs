//! Knife Flip - A knife-throwing arcade mechanic
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight state machine, rotation, collisions)
//! - `session`: Scoring and run outcome, fed by simulation events
//! - `sandbox`: Headless world that drives a knife through a generated course
//! - `tuning`: Data-driven flight and course parameters

pub mod sandbox;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Outcome, RunSummary, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics rate)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity along -Y (units/s²)
    pub const GRAVITY: f32 = 9.81;

    /// Launch defaults
    pub const LAUNCH_SPEED: f32 = 5.0;

    /// Angular rate defaults (degrees per second before multipliers)
    pub const BASE_ROTATION_RATE: f32 = 100.0;
    pub const NORMAL_MULTIPLIER: f32 = 1.0;
    pub const FAST_MULTIPLIER: f32 = 3.0;
    pub const POWER_UP_MULTIPLIER: f32 = 8.0;

    /// Cut cone half-angle (degrees)
    pub const CUT_THRESHOLD_DEGREES: f32 = 60.0;

    /// Power-up spin duration (seconds)
    pub const POWER_UP_SECONDS: f32 = 2.0;
}

/// Degrees per second * seconds -> radians
#[inline]
pub fn degrees_over(rate_degrees: f32, dt: f32) -> f32 {
    (rate_degrees * dt).to_radians()
}

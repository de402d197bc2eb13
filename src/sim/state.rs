//! Knife state and core simulation types
//!
//! Everything the flight state machine owns lives here: the rigid body, the
//! per-launch flight parameters and the current flight mode.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::below_floor;
use super::gate::is_safe_facing;
use super::powerup::PowerUpOverride;
use crate::consts::*;

/// Current phase of a knife's flight
///
/// Exactly one mode is active at a time, so at most one rotation driver ever
/// touches the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightMode {
    /// Waiting for a launch trigger, no driven rotation
    #[default]
    Idle,
    /// Velocity applied, waiting one tick before the spin sequence starts
    Launching,
    /// Clearing the launch cone at the fast rate
    FirstSpin,
    /// Airborne, alternating fast/normal rate around the cut cone
    FreeSpin,
    /// Resting on a platform in the initial pose
    Grounded,
    /// Timed override spinning at the power-up rate
    PowerUp,
}

impl FlightMode {
    /// True while a launch's spin sequence is running (launch triggers are dropped)
    pub fn is_spinning(&self) -> bool {
        matches!(self, FlightMode::FirstSpin | FlightMode::FreeSpin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightMode::Idle => "idle",
            FlightMode::Launching => "launching",
            FlightMode::FirstSpin => "first-spin",
            FlightMode::FreeSpin => "free-spin",
            FlightMode::Grounded => "grounded",
            FlightMode::PowerUp => "power-up",
        }
    }
}

/// Per-launch flight tuning
///
/// Direction vectors are expected to be unit length; `Tuning` normalizes them
/// when loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParameters {
    /// Launch impulse magnitude (units/s)
    pub launch_speed: f32,
    /// Launch direction (normalized at launch time)
    pub launch_direction: Vec3,
    /// World-space spin axis, perpendicular to the launch plane
    pub rotation_axis: Vec3,
    /// Direction the blade must face to cut
    pub cut_direction: Vec3,
    /// Cut cone half-angle (degrees)
    pub cut_threshold_degrees: f32,
    /// Base angular rate (degrees per second)
    pub base_rotation_rate: f32,
    pub normal_multiplier: f32,
    pub fast_multiplier: f32,
    pub power_up_multiplier: f32,
    /// Power-up override duration (seconds)
    pub power_up_seconds: f32,
    /// Knife-local blade axis
    pub blade_forward: Vec3,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            launch_speed: LAUNCH_SPEED,
            launch_direction: Vec3::Y,
            rotation_axis: Vec3::X,
            cut_direction: Vec3::Z,
            cut_threshold_degrees: CUT_THRESHOLD_DEGREES,
            base_rotation_rate: BASE_ROTATION_RATE,
            normal_multiplier: NORMAL_MULTIPLIER,
            fast_multiplier: FAST_MULTIPLIER,
            power_up_multiplier: POWER_UP_MULTIPLIER,
            power_up_seconds: POWER_UP_SECONDS,
            blade_forward: Vec3::Z,
        }
    }
}

impl FlightParameters {
    /// Launch velocity (direction normalized, scaled by speed)
    pub fn launch_velocity(&self) -> Vec3 {
        self.launch_direction.normalize_or_zero() * self.launch_speed
    }
}

/// The knife rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnifeBody {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    /// Set by platform contact, cleared only by a launch
    pub grounded: bool,
    /// Pose restored on every landing
    initial_orientation: Quat,
    /// Whether the body was at/below the floor on the previous check
    #[serde(default)]
    below_floor: bool,
}

impl KnifeBody {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            velocity: Vec3::ZERO,
            grounded: false,
            initial_orientation: orientation,
            below_floor: false,
        }
    }

    /// World-space blade direction
    pub fn forward(&self, blade_forward: Vec3) -> Vec3 {
        self.orientation * blade_forward
    }

    /// Zero velocity and snap to the initial pose
    pub fn land(&mut self) {
        self.grounded = true;
        self.velocity = Vec3::ZERO;
        self.orientation = self.initial_orientation;
    }

    /// Update the floor latch, returning true only on the tick the body
    /// first reaches the floor
    pub fn cross_floor(&mut self, floor_y: f32) -> bool {
        let below = below_floor(self.position.y, floor_y);
        let crossed = below && !self.below_floor;
        self.below_floor = below;
        crossed
    }
}

/// A knife and its flight controller state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Knife {
    pub body: KnifeBody,
    pub params: FlightParameters,
    pub mode: FlightMode,
    pub power_up: PowerUpOverride,
}

impl Knife {
    /// Create an idle knife at `position`; `orientation` becomes the landing pose
    pub fn new(position: Vec3, orientation: Quat, params: FlightParameters) -> Self {
        Self {
            body: KnifeBody::new(position, orientation),
            params,
            mode: FlightMode::Idle,
            power_up: PowerUpOverride::new(),
        }
    }

    /// World-space blade direction
    pub fn forward(&self) -> Vec3 {
        self.body.forward(self.params.blade_forward)
    }

    /// Whether the blade currently faces inside the cut cone
    pub fn is_cut_safe(&self) -> bool {
        is_safe_facing(
            self.forward(),
            self.params.cut_direction,
            self.params.cut_threshold_degrees,
        )
    }

    pub fn is_in_first_spin(&self) -> bool {
        self.mode == FlightMode::FirstSpin
    }

    pub fn is_power_up_active(&self) -> bool {
        self.power_up.is_active()
    }

    /// Start (or restart) the power-up override
    ///
    /// Cancels any running spin sequence or pending launch immediately.
    pub fn activate_power_up(&mut self) {
        self.power_up.activate(self.params.power_up_seconds);
        self.set_mode(FlightMode::PowerUp);
        log::info!("Power-up armed for {:.2}s", self.params.power_up_seconds);
    }

    /// Handle a launch trigger. Returns false if the trigger was dropped.
    pub fn launch(&mut self) -> bool {
        if self.mode.is_spinning() {
            log::trace!("Launch dropped during {}", self.mode.as_str());
            return false;
        }

        // Replaces whatever velocity the body carried, never adds to it
        self.body.velocity = self.params.launch_velocity();
        self.body.grounded = false;

        // Under the override the spin sequence is suppressed for this launch
        if !self.power_up.is_active() {
            self.set_mode(FlightMode::Launching);
        }
        log::info!("Launch at y={:.2}", self.body.position.y);
        true
    }

    /// Platform contact: land in the initial pose
    ///
    /// The power-up override keeps control until it expires.
    pub fn land(&mut self) {
        self.body.land();
        if self.mode != FlightMode::PowerUp {
            self.set_mode(FlightMode::Grounded);
        }
        log::info!("Landed at y={:.2}", self.body.position.y);
    }

    pub(crate) fn set_mode(&mut self, mode: FlightMode) {
        if self.mode != mode {
            log::debug!("{} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
        }
    }
}

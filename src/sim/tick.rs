//! Fixed timestep flight tick
//!
//! Advances one knife by one physics step. Order within a tick:
//! 1. Power-up timer (expiry releases control before any motion)
//! 2. Deferred launch resolves into the first spin
//! 3. Launch trigger
//! 4. Contacts are classified; platform contact lands the knife
//! 5. Rotation for the active mode
//! 6. Floor check, independent of mode

use super::collision::{CollisionEvent, Contact, classify};
use super::course::Course;
use super::rotation::{SpinRate, apply_delta, next_delta};
use super::state::{FlightMode, Knife};

/// Inputs for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Launch trigger fired (edge)
    pub launch: bool,
    /// Contacts reported by the physics layer since the last tick
    pub contacts: Vec<Contact>,
    /// Floor reference height for this tick
    pub floor_y: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            launch: false,
            contacts: Vec::new(),
            floor_y: f32::NEG_INFINITY,
        }
    }
}

/// Result of a tick
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in order
    pub events: Vec<CollisionEvent>,
    /// Rate the orientation was driven at, if any
    pub spin: Option<SpinRate>,
    /// Whether a launch trigger was accepted
    pub launched: bool,
}

/// Advance the knife by one fixed timestep
pub fn tick(knife: &mut Knife, course: &mut Course, input: &TickInput, dt: f32) -> TickResult {
    let mut result = TickResult::default();

    if knife.power_up.is_active() && !knife.power_up.tick(dt) {
        log::info!("Power-up expired");
        release_power_up(knife);
    }

    // Exactly one tick of deferral lets the integrator apply launch velocity
    if knife.mode == FlightMode::Launching {
        knife.set_mode(FlightMode::FirstSpin);
    }

    if input.launch {
        result.launched = knife.launch();
    }

    for contact in &input.contacts {
        let Some(event) = classify(contact, course) else {
            continue;
        };
        match event {
            CollisionEvent::PlatformContact => knife.land(),
            CollisionEvent::BlockHit { points } => log::info!("Block hit for {} points", points),
            CollisionEvent::FinishReached => log::info!("Finish wall reached"),
            CollisionEvent::PowerUpCollected => log::info!("Power-up collected"),
            CollisionEvent::FloorCrossed => {}
        }
        result.events.push(event);
    }

    result.spin = spin(knife, dt);

    if knife.body.cross_floor(input.floor_y) {
        log::info!(
            "Knife fell to floor (y={:.2}) during {}",
            knife.body.position.y,
            knife.mode.as_str()
        );
        result.events.push(CollisionEvent::FloorCrossed);
    }

    result
}

/// Hand control back once the override expires
///
/// The interrupted spin is not resumed: a grounded knife settles into its
/// landing pose, an airborne one coasts until the next launch or contact.
fn release_power_up(knife: &mut Knife) {
    if knife.body.grounded {
        knife.body.land();
        knife.set_mode(FlightMode::Grounded);
    } else {
        knife.set_mode(FlightMode::Idle);
    }
}

/// Rate for the free spin: coast while cut-safe, drive hard otherwise
fn free_spin_rate(knife: &Knife) -> SpinRate {
    if knife.is_cut_safe() {
        SpinRate::Normal
    } else {
        SpinRate::Fast
    }
}

/// Apply this tick's rotation for the current mode
fn spin(knife: &mut Knife, dt: f32) -> Option<SpinRate> {
    let rate = match knife.mode {
        FlightMode::PowerUp => SpinRate::PowerUp,
        FlightMode::FirstSpin => {
            if knife.is_cut_safe() {
                SpinRate::Fast
            } else {
                // Cleared the launch cone: one-shot, never re-entered
                knife.set_mode(FlightMode::FreeSpin);
                free_spin_rate(knife)
            }
        }
        FlightMode::FreeSpin => free_spin_rate(knife),
        FlightMode::Idle | FlightMode::Launching | FlightMode::Grounded => return None,
    };

    let params = &knife.params;
    let multiplier = match rate {
        SpinRate::Normal => params.normal_multiplier,
        SpinRate::Fast => params.fast_multiplier,
        SpinRate::PowerUp => params.power_up_multiplier,
    };
    let delta = next_delta(params.rotation_axis, multiplier, params.base_rotation_rate, dt);
    knife.body.orientation = apply_delta(knife.body.orientation, delta);

    log::trace!("{} spin {:?}", knife.mode.as_str(), rate);
    Some(rate)
}

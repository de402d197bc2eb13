//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (course generation)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod course;
pub mod gate;
pub mod physics;
pub mod powerup;
pub mod rotation;
pub mod state;
pub mod tick;

pub use collision::{Actor, CollisionEvent, Contact, KnifeCollider, below_floor, classify};
pub use course::{Band, Course, Pickup, Platform, Target, generate_course};
pub use gate::{facing_angle_degrees, is_safe_facing};
pub use physics::integrate;
pub use powerup::PowerUpOverride;
pub use rotation::{SpinRate, apply_delta, next_delta};
pub use state::{FlightMode, FlightParameters, Knife, KnifeBody};
pub use tick::{TickInput, TickResult, tick};

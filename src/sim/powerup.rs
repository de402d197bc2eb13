//! Timed power-up override
//!
//! While armed, the override owns the knife's rotation: the flight state
//! machine defers to it and spins at the power-up rate, ignoring the cut cone.

use serde::{Deserialize, Serialize};

/// Countdown for the exclusive power-up spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpOverride {
    /// Seconds left; `None` when inactive
    remaining: Option<f32>,
}

impl PowerUpOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the override. Re-arming restarts the timer.
    pub fn activate(&mut self, duration: f32) {
        self.remaining = Some(duration);
    }

    /// Advance the timer, returning whether the override is still active
    ///
    /// Expiry happens the tick the timer drops below zero, before that tick's
    /// motion is integrated.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= dt;
            if *remaining < 0.0 {
                self.remaining = None;
            }
        }
        self.is_active()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, or zero when inactive
    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let mut power_up = PowerUpOverride::new();
        assert!(!power_up.is_active());
        assert!(!power_up.tick(0.02));
    }

    #[test]
    fn test_runs_for_duration() {
        // Power-of-two steps keep the countdown exact
        let mut power_up = PowerUpOverride::new();
        power_up.activate(1.0);

        let active_ticks = (0..10).filter(|_| power_up.tick(0.25)).count();
        assert_eq!(active_ticks, 4);
        assert!(!power_up.is_active());
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut power_up = PowerUpOverride::new();
        power_up.activate(0.0);
        assert!(power_up.is_active());
        assert!(!power_up.tick(0.02));
    }

    #[test]
    fn test_rearm_restarts_instead_of_stacking() {
        let mut power_up = PowerUpOverride::new();
        power_up.activate(1.0);
        power_up.tick(0.25);
        power_up.tick(0.25);
        assert_eq!(power_up.remaining(), 0.5);

        power_up.activate(1.0);
        assert_eq!(power_up.remaining(), 1.0);
    }
}

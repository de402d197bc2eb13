//! Data-driven flight and course parameters
//!
//! Loaded from a JSON document; every field has a default so a partial file
//! only overrides what it names.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::FlightParameters;

/// Smallest vector length accepted as a direction
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Threshold range the flight feel was designed around (degrees)
const DESIGNED_THRESHOLD: std::ops::RangeInclusive<f32> = 10.0..=90.0;

/// Errors loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TuningError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// World/physics settings for the sandbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Gravity along -Y (units/s²)
    pub gravity: f32,
    /// Fixed simulation timestep (seconds)
    pub sim_dt: f32,
    /// Falling to this height ends the run
    pub floor_y: f32,
    /// Auto-launch delay after each landing (seconds)
    pub tap_delay_seconds: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            sim_dt: SIM_DT,
            floor_y: -1.0,
            tap_delay_seconds: 0.5,
        }
    }
}

/// Course generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseTuning {
    /// Seed for target points and spin
    pub seed: u64,
    /// Number of target blocks (one per platform gap)
    pub targets: u32,
    pub min_points: u32,
    pub max_points: u32,
    /// Maximum target spin (degrees per second, either direction)
    pub max_target_spin: f32,
    pub target_half_height: f32,
    /// Vertical distance between platforms
    pub platform_spacing: f32,
    pub platform_half_width: f32,
    /// Platform levels that carry a power-up balloon
    pub pickup_levels: Vec<u32>,
}

impl Default for CourseTuning {
    fn default() -> Self {
        Self {
            seed: 42,
            targets: 5,
            min_points: 5,
            max_points: 20,
            max_target_spin: 90.0,
            target_half_height: 0.1,
            platform_spacing: 1.0,
            platform_half_width: 0.5,
            pickup_levels: vec![2],
        }
    }
}

/// Complete tuning document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub flight: FlightParameters,
    pub world: WorldTuning,
    pub course: CourseTuning,
}

impl Tuning {
    /// Parse, normalize and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validated()
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Normalize direction vectors and check numeric ranges
    pub fn validated(mut self) -> Result<Self, TuningError> {
        let flight = &mut self.flight;
        flight.launch_direction = unit(flight.launch_direction, "flight.launch_direction")?;
        flight.rotation_axis = unit(flight.rotation_axis, "flight.rotation_axis")?;
        flight.cut_direction = unit(flight.cut_direction, "flight.cut_direction")?;
        flight.blade_forward = unit(flight.blade_forward, "flight.blade_forward")?;

        let threshold = flight.cut_threshold_degrees;
        if !(threshold > 0.0 && threshold < 180.0) {
            return Err(TuningError::invalid(
                "flight.cut_threshold_degrees",
                format!("{threshold} is outside (0, 180)"),
            ));
        }
        if !DESIGNED_THRESHOLD.contains(&threshold) {
            log::warn!("Cut threshold {threshold}° is outside the designed 10-90° range");
        }
        if flight.rotation_axis.dot(flight.launch_direction).abs() > 0.01 {
            log::warn!("Rotation axis is not perpendicular to the launch direction");
        }

        non_negative(flight.launch_speed, "flight.launch_speed")?;
        non_negative(flight.base_rotation_rate, "flight.base_rotation_rate")?;
        non_negative(flight.normal_multiplier, "flight.normal_multiplier")?;
        non_negative(flight.fast_multiplier, "flight.fast_multiplier")?;
        non_negative(flight.power_up_multiplier, "flight.power_up_multiplier")?;
        non_negative(flight.power_up_seconds, "flight.power_up_seconds")?;

        let world = &self.world;
        if !(world.sim_dt > 0.0 && world.sim_dt.is_finite()) {
            return Err(TuningError::invalid("world.sim_dt", "must be positive"));
        }
        non_negative(world.gravity, "world.gravity")?;
        non_negative(world.tap_delay_seconds, "world.tap_delay_seconds")?;

        let course = &self.course;
        if course.min_points > course.max_points {
            return Err(TuningError::invalid(
                "course.min_points",
                format!("{} exceeds max_points {}", course.min_points, course.max_points),
            ));
        }
        if !(course.platform_spacing > 0.0) {
            return Err(TuningError::invalid("course.platform_spacing", "must be positive"));
        }
        non_negative(course.max_target_spin, "course.max_target_spin")?;
        non_negative(course.target_half_height, "course.target_half_height")?;
        non_negative(course.platform_half_width, "course.platform_half_width")?;

        Ok(self)
    }
}

fn unit(v: Vec3, field: &'static str) -> Result<Vec3, TuningError> {
    if !v.is_finite() || v.length() < MIN_DIRECTION_LENGTH {
        return Err(TuningError::invalid(field, "must be a non-zero direction"));
    }
    Ok(v.normalize())
}

fn non_negative(value: f32, field: &'static str) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::invalid(field, format!("{value} must be >= 0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
        assert_eq!(tuning.flight.cut_threshold_degrees, CUT_THRESHOLD_DEGREES);
        assert_eq!(tuning.world.sim_dt, SIM_DT);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "flight": { "launch_speed": 7.5, "power_up_seconds": 1.0 },
                        "course": { "seed": 9 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.flight.launch_speed, 7.5);
        assert_eq!(tuning.flight.power_up_seconds, 1.0);
        assert_eq!(tuning.flight.fast_multiplier, FAST_MULTIPLIER);
        assert_eq!(tuning.course.seed, 9);
        assert_eq!(tuning.course.targets, CourseTuning::default().targets);
    }

    #[test]
    fn test_directions_are_normalized() {
        let json = r#"{ "flight": { "rotation_axis": [2.0, 0.0, 0.0], "cut_direction": [0.0, 0.0, 5.0] } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert!(tuning.flight.rotation_axis.is_normalized());
        assert!(tuning.flight.cut_direction.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_zero_axis_rejected() {
        let json = r#"{ "flight": { "rotation_axis": [0.0, 0.0, 0.0] } }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "flight.rotation_axis", .. }));
    }

    #[test]
    fn test_threshold_bounds() {
        for bad in ["0.0", "180.0", "-5.0", "200.0"] {
            let json = format!(r#"{{ "flight": {{ "cut_threshold_degrees": {bad} }} }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, TuningError::Invalid { field: "flight.cut_threshold_degrees", .. }),
                "{bad}"
            );
        }
        // Outside the designed range but still legal
        assert!(Tuning::from_json(r#"{ "flight": { "cut_threshold_degrees": 120.0 } }"#).is_ok());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let json = r#"{ "flight": { "power_up_seconds": -1.0 } }"#;
        assert!(matches!(
            Tuning::from_json(json).unwrap_err(),
            TuningError::Invalid { field: "flight.power_up_seconds", .. }
        ));
    }

    #[test]
    fn test_points_range_checked() {
        let json = r#"{ "course": { "min_points": 30, "max_points": 10 } }"#;
        assert!(Tuning::from_json(json).is_err());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }
}

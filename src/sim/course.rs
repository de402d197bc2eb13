//! Course layout: platforms, rotating target blocks, power-up pickups and the
//! finish wall
//!
//! Geometry is coarse: platforms are square pads and everything
//! else is a horizontal band the knife crosses on its way up.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::CourseTuning;

/// A landing pad (top surface at `height`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub height: f32,
    /// Half extent of the square pad in X and Z
    pub half_width: f32,
}

impl Platform {
    pub fn covers(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_width && position.z.abs() <= self.half_width
    }
}

/// A horizontal slab between `center - half_height` and `center + half_height`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub center: f32,
    pub half_height: f32,
}

impl Band {
    /// Whether a vertical sweep from `y0` to `y1` touches the slab
    pub fn swept_by(&self, y0: f32, y1: f32) -> bool {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        hi >= self.center - self.half_height && lo <= self.center + self.half_height
    }
}

/// A sliceable target block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub points: u32,
    pub band: Band,
    /// Spin about the vertical axis (degrees per second, 0 = stationary)
    #[serde(default)]
    pub spin_speed: f32,
    /// Current yaw (degrees, [0, 360))
    #[serde(default)]
    pub yaw: f32,
    /// One-shot guard: the first blade contact wins
    #[serde(default)]
    already_hit: bool,
}

impl Target {
    pub fn new(id: u32, points: u32, band: Band, spin_speed: f32) -> Self {
        Self {
            id,
            points,
            band,
            spin_speed,
            yaw: 0.0,
            already_hit: false,
        }
    }

    /// Rotate the block by its spin speed * dt
    pub fn rotate(&mut self, dt: f32) {
        if self.spin_speed != 0.0 {
            self.yaw = (self.yaw + self.spin_speed * dt).rem_euclid(360.0);
        }
    }

    /// Register a blade contact; yields the points only the first time
    pub fn strike(&mut self) -> Option<u32> {
        if self.already_hit {
            return None;
        }
        self.already_hit = true;
        log::debug!("Target {} struck at yaw {:.1}", self.id, self.yaw);
        Some(self.points)
    }

    pub fn is_hit(&self) -> bool {
        self.already_hit
    }
}

/// A power-up balloon; despawns when collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub band: Band,
}

/// Everything the knife can touch besides the floor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    /// Sorted by height, lowest first
    pub platforms: Vec<Platform>,
    pub targets: Vec<Target>,
    pub pickups: Vec<Pickup>,
    pub finish: Option<Band>,
    /// Next entity ID
    next_id: u32,
}

impl Course {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn add_target(&mut self, points: u32, band: Band, spin_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target::new(id, points, band, spin_speed));
        id
    }

    pub fn add_pickup(&mut self, band: Band) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup { id, band });
        id
    }

    pub fn target_mut(&mut self, id: u32) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    /// Remove a pickup, returning whether it was still present
    pub fn take_pickup(&mut self, id: u32) -> bool {
        match self.pickups.iter().position(|p| p.id == id) {
            Some(index) => {
                self.pickups.remove(index);
                true
            }
            None => false,
        }
    }

    /// Advance target spin
    pub fn rotate_targets(&mut self, dt: f32) {
        for target in &mut self.targets {
            target.rotate(dt);
        }
    }

    /// Height of the highest platform
    pub fn top_platform(&self) -> f32 {
        self.platforms.last().map(|p| p.height).unwrap_or(0.0)
    }
}

/// Lay out a course deterministically from the tuning seed
///
/// Platforms are stacked `platform_spacing` apart starting at zero. A target
/// sits halfway between each pair, pickups sit just above the platforms named
/// in `pickup_levels`, and the finish wall hangs above the top platform.
pub fn generate_course(tuning: &CourseTuning) -> Course {
    let mut rng = Pcg32::seed_from_u64(tuning.seed);
    let mut course = Course::new();
    let spacing = tuning.platform_spacing;

    let levels = tuning.targets + 1;
    for level in 0..levels {
        course.platforms.push(Platform {
            height: level as f32 * spacing,
            half_width: tuning.platform_half_width,
        });
    }

    for level in 0..tuning.targets {
        let base = level as f32 * spacing;
        let points = rng.random_range(tuning.min_points..=tuning.max_points.max(tuning.min_points));
        let spin = if tuning.max_target_spin > 0.0 {
            let speed = rng.random_range(0.0..tuning.max_target_spin);
            if rng.random_bool(0.5) { speed } else { -speed }
        } else {
            0.0
        };
        let band = Band {
            center: base + spacing * 0.5,
            half_height: tuning.target_half_height,
        };
        course.add_target(points, band, spin);
    }

    for &level in &tuning.pickup_levels {
        if level < levels {
            let band = Band {
                center: level as f32 * spacing + spacing * 0.25,
                half_height: tuning.target_half_height * 0.5,
            };
            course.add_pickup(band);
        }
    }

    course.finish = Some(Band {
        center: course.top_platform() + spacing * 0.5,
        half_height: tuning.target_half_height,
    });

    log::info!(
        "Course seed {}: {} platforms, {} targets, {} pickups",
        tuning.seed,
        course.platforms.len(),
        course.targets.len(),
        course.pickups.len()
    );

    course
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_strikes_once() {
        let mut target = Target::new(1, 10, Band { center: 1.0, half_height: 0.1 }, 0.0);
        assert_eq!(target.strike(), Some(10));
        assert_eq!(target.strike(), None);
        assert_eq!(target.strike(), None);
        assert!(target.is_hit());
    }

    #[test]
    fn test_target_rotation_wraps() {
        let mut target = Target::new(1, 10, Band { center: 1.0, half_height: 0.1 }, -90.0);
        target.rotate(1.0);
        assert!((target.yaw - 270.0).abs() < 1e-4);
        target.rotate(4.0);
        assert!((target.yaw - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_band_sweep() {
        let band = Band { center: 1.0, half_height: 0.1 };
        assert!(band.swept_by(0.8, 0.95));
        assert!(band.swept_by(1.2, 0.5));
        assert!(band.swept_by(0.0, 2.0));
        assert!(!band.swept_by(0.0, 0.85));
        assert!(!band.swept_by(1.15, 1.5));
    }

    #[test]
    fn test_pickup_taken_once() {
        let mut course = Course::new();
        let id = course.add_pickup(Band { center: 0.5, half_height: 0.05 });
        assert!(course.take_pickup(id));
        assert!(!course.take_pickup(id));
        assert!(course.pickups.is_empty());
    }

    #[test]
    fn test_generate_course_is_deterministic() {
        let tuning = CourseTuning::default();
        let a = generate_course(&tuning);
        let b = generate_course(&tuning);

        assert_eq!(a.platforms.len(), tuning.targets as usize + 1);
        assert_eq!(a.targets.len(), tuning.targets as usize);
        let points_a: Vec<_> = a.targets.iter().map(|t| (t.points, t.spin_speed)).collect();
        let points_b: Vec<_> = b.targets.iter().map(|t| (t.points, t.spin_speed)).collect();
        assert_eq!(points_a, points_b);
        assert!(a.finish.is_some());
    }

    #[test]
    fn test_generated_points_in_range() {
        let tuning = CourseTuning {
            seed: 7,
            targets: 20,
            min_points: 5,
            max_points: 15,
            ..Default::default()
        };
        let course = generate_course(&tuning);
        assert!(course.targets.iter().all(|t| (5..=15).contains(&t.points)));
        // Targets sit between platforms
        for (target, pair) in course.targets.iter().zip(course.platforms.windows(2)) {
            assert!(target.band.center > pair[0].height && target.band.center < pair[1].height);
        }
    }
}

//! Headless world driving a knife through a generated course
//!
//! Plays the part of the engine: integrates the body, derives contacts from
//! coarse geometry, taps launch after each landing and feeds events to the
//! session.

use glam::{Quat, Vec3};

use crate::consts::MAX_SUBSTEPS;
use crate::session::{RunSummary, Session};
use crate::sim::{
    Actor, Contact, Course, FlightMode, Knife, KnifeCollider, TickInput, TickResult,
    generate_course, integrate, tick,
};
use crate::tuning::{Tuning, WorldTuning};

/// A knife, its course and the run's score
pub struct Sandbox {
    pub knife: Knife,
    pub course: Course,
    pub session: Session,
    world: WorldTuning,
    /// Unsimulated frame time
    accumulator: f32,
    ticks: u64,
    /// Ticks spent grounded since the last landing
    grounded_ticks: u32,
    tap_delay_ticks: u32,
    /// External launch trigger, consumed by the next tick
    launch_requested: bool,
    /// Whether the last sweep overlapped the finish band
    in_finish: bool,
}

impl Sandbox {
    /// Build the course and place an idle knife on the lowest platform
    pub fn new(tuning: &Tuning) -> Self {
        let course = generate_course(&tuning.course);
        let start_y = course.platforms.first().map(|p| p.height).unwrap_or(0.0);
        let knife = Knife::new(Vec3::new(0.0, start_y, 0.0), Quat::IDENTITY, tuning.flight.clone());
        let tap_delay_ticks = (tuning.world.tap_delay_seconds / tuning.world.sim_dt).round().max(1.0) as u32;

        Self {
            knife,
            course,
            session: Session::new(),
            world: tuning.world.clone(),
            accumulator: 0.0,
            ticks: 0,
            grounded_ticks: 0,
            tap_delay_ticks,
            launch_requested: false,
            in_finish: false,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// Fire the launch trigger (tap/click/space)
    pub fn press(&mut self) {
        self.launch_requested = true;
    }

    /// Run fixed ticks for a frame of `frame_dt` seconds, returning the
    /// number of substeps taken
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.min(0.1);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.world.sim_dt && substeps < MAX_SUBSTEPS && !self.is_over() {
            self.step();
            self.accumulator -= self.world.sim_dt;
            substeps += 1;
        }
        substeps
    }

    /// Simulate until the run ends or `max_ticks` elapse
    pub fn run(&mut self, max_ticks: u64) -> RunSummary {
        while !self.is_over() && self.ticks < max_ticks {
            self.step();
        }
        if !self.is_over() {
            log::info!("Stopped after {} ticks without an outcome", self.ticks);
        }
        self.session.summary(self.ticks)
    }

    /// Advance the world by one fixed tick
    pub fn step(&mut self) -> TickResult {
        let dt = self.world.sim_dt;
        let previous = self.knife.body.position;

        integrate(&mut self.knife.body, self.world.gravity, dt);
        let contacts = self.detect_contacts(previous);

        let launch = self.auto_tap() || std::mem::take(&mut self.launch_requested);
        let input = TickInput {
            launch,
            contacts,
            floor_y: self.world.floor_y,
        };
        let result = tick(&mut self.knife, &mut self.course, &input, dt);

        self.course.rotate_targets(dt);
        self.session.apply(&mut self.knife, &result.events);
        self.ticks += 1;
        result
    }

    /// Tap launch once the knife has rested for the configured delay
    fn auto_tap(&mut self) -> bool {
        if self.knife.mode != FlightMode::Grounded {
            self.grounded_ticks = 0;
            return false;
        }
        self.grounded_ticks += 1;
        if self.grounded_ticks >= self.tap_delay_ticks {
            self.grounded_ticks = 0;
            return true;
        }
        false
    }

    /// Contacts for the sweep from `previous` to the current position
    ///
    /// Landing snaps the body onto the platform top. Overlaps count for the
    /// blade only while it faces the cut direction.
    fn detect_contacts(&mut self, previous: Vec3) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let position = self.knife.body.position;

        if !self.knife.body.grounded && self.knife.body.velocity.y <= 0.0 {
            let landing = self
                .course
                .platforms
                .iter()
                .rev()
                .find(|p| previous.y >= p.height && position.y < p.height && p.covers(position))
                .map(|p| p.height);
            if let Some(height) = landing {
                self.knife.body.position.y = height;
                contacts.push(Contact::body(Actor::Platform));
            }
        }

        let collider = if self.knife.is_cut_safe() {
            KnifeCollider::Blade
        } else {
            KnifeCollider::Body
        };
        let (y0, y1) = (previous.y, position.y);

        for target in &self.course.targets {
            if !target.is_hit() && target.band.swept_by(y0, y1) {
                contacts.push(Contact::new(collider, Actor::Target { id: target.id }));
            }
        }
        for pickup in &self.course.pickups {
            if pickup.band.swept_by(y0, y1) {
                contacts.push(Contact::new(collider, Actor::PowerUp { id: pickup.id }));
            }
        }
        // Reported on entry only; the wall has no one-shot guard of its own
        let in_finish = self.course.finish.is_some_and(|finish| finish.swept_by(y0, y1));
        if in_finish && !self.in_finish {
            contacts.push(Contact::new(collider, Actor::FinishWall));
        }
        self.in_finish = in_finish;

        contacts
    }
}

//! Run scoring and outcome
//!
//! The session is the collaborator on the other side of the simulation's
//! events: it tallies block points, hands collected power-ups back to the
//! knife, and ends the run on a fall or on reaching the finish.

use serde::{Deserialize, Serialize};

use crate::sim::{CollisionEvent, Knife};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Blade reached the finish wall
    Won,
    /// Knife fell to the floor
    Lost,
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub won: bool,
    /// Blocks sliced
    pub blocks: u32,
    /// Simulation ticks elapsed
    pub ticks: u64,
}

/// Score and outcome for a single run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub blocks: u32,
    pub power_ups: u32,
    pub outcome: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run has ended
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// React to one tick's events
    ///
    /// Events after the run has ended are ignored; the first terminal event
    /// decides the outcome.
    pub fn apply(&mut self, knife: &mut Knife, events: &[CollisionEvent]) {
        for event in events {
            if self.is_over() {
                return;
            }
            match *event {
                CollisionEvent::BlockHit { points } => {
                    self.score += u64::from(points);
                    self.blocks += 1;
                    log::debug!("Score: {}", self.score);
                }
                CollisionEvent::PowerUpCollected => {
                    self.power_ups += 1;
                    knife.activate_power_up();
                }
                CollisionEvent::FinishReached => self.finish(Outcome::Won),
                CollisionEvent::FloorCrossed => self.finish(Outcome::Lost),
                CollisionEvent::PlatformContact => {}
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!("Run over: {:?} with {} points", outcome, self.score);
        self.outcome = Some(outcome);
    }

    pub fn summary(&self, ticks: u64) -> RunSummary {
        RunSummary {
            score: self.score,
            won: self.outcome == Some(Outcome::Won),
            blocks: self.blocks,
            ticks,
        }
    }
}

//! Contact classification
//!
//! Raw contacts arrive tagged with the knife collider that was touched and
//! the actor on the other side. This module turns them into domain events,
//! routing block hits through each target's one-shot guard and consuming
//! pickups.

use serde::{Deserialize, Serialize};

use super::course::Course;

/// Which part of the knife made contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnifeCollider {
    /// The solid handle/body collider
    Body,
    /// The blade trigger
    Blade,
}

/// The other side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Platform,
    Target { id: u32 },
    FinishWall,
    PowerUp { id: u32 },
    /// Anything untagged
    Other,
}

/// A raw contact/overlap notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub collider: KnifeCollider,
    pub actor: Actor,
}

impl Contact {
    pub fn new(collider: KnifeCollider, actor: Actor) -> Self {
        Self { collider, actor }
    }

    pub fn blade(actor: Actor) -> Self {
        Self::new(KnifeCollider::Blade, actor)
    }

    pub fn body(actor: Actor) -> Self {
        Self::new(KnifeCollider::Body, actor)
    }
}

/// Domain events produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Landed on a platform
    PlatformContact,
    /// Dropped to or below the floor
    FloorCrossed,
    /// Sliced a target block for the first time
    BlockHit { points: u32 },
    /// Blade reached the finish wall
    FinishReached,
    /// Blade popped a power-up (the pickup is gone)
    PowerUpCollected,
}

/// Map a contact to its event, if any
///
/// Target, finish and pickup overlaps only count for the blade. Target hits
/// go through the target's guard, so a given target yields at most one
/// `BlockHit`.
pub fn classify(contact: &Contact, course: &mut Course) -> Option<CollisionEvent> {
    match (contact.actor, contact.collider) {
        (Actor::Platform, _) => Some(CollisionEvent::PlatformContact),
        (Actor::Target { id }, KnifeCollider::Blade) => course
            .target_mut(id)
            .and_then(|target| target.strike())
            .map(|points| CollisionEvent::BlockHit { points }),
        (Actor::FinishWall, KnifeCollider::Blade) => Some(CollisionEvent::FinishReached),
        (Actor::PowerUp { id }, KnifeCollider::Blade) => course
            .take_pickup(id)
            .then_some(CollisionEvent::PowerUpCollected),
        _ => None,
    }
}

/// Floor check: at or below the floor reference height
#[inline]
pub fn below_floor(body_y: f32, floor_y: f32) -> bool {
    body_y <= floor_y
}

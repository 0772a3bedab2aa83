//! Per-tick contact records delivered to gameplay code
//!
//! A `Collision` is one collider pair's narrow-phase result; an `Overlap`
//! is its boolean-only counterpart tracked across ticks for first-contact
//! and contact-ended classification. The `*Information` containers group
//! records per ordered body pair, guaranteeing at most one container per
//! (self, other) pair per tick.

use crate::foundation::math::Vec2;
use crate::physics::body::{BodyKey, ColliderId};
use crate::physics::contact::Intersection;

/// Result of one collider-pair narrow-phase test
#[derive(Debug, Clone)]
pub struct Collision {
    /// The collider this record belongs to
    pub self_collider: ColliderId,
    /// The collider it hit
    pub other_collider: ColliderId,
    /// Velocity snapshot of the self collider at test time
    pub self_velocity: Vec2,
    /// Velocity snapshot of the other collider at test time
    pub other_velocity: Vec2,
    /// Whether this pair was not in contact on the previous tick
    pub first_contact: bool,
    /// Validated contact geometry, when requested and non-empty
    pub intersection: Option<Intersection>,
}

/// Boolean contact between two colliders, tracked across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// The collider this record belongs to
    pub self_collider: ColliderId,
    /// The collider it overlaps
    pub other_collider: ColliderId,
    /// Whether this pair was not in contact on the previous tick
    pub first_contact: bool,
}

impl Overlap {
    /// Creates a fresh overlap record
    pub fn new(self_collider: ColliderId, other_collider: ColliderId, first_contact: bool) -> Self {
        Self {
            self_collider,
            other_collider,
            first_contact,
        }
    }
}

/// All collisions between one body and one other body in a single tick
#[derive(Debug, Clone)]
pub struct CollisionInformation {
    /// The body the records belong to
    pub self_body: BodyKey,
    /// The body they were recorded against
    pub other_body: BodyKey,
    /// Per-collider collision records for this pair
    pub collisions: Vec<Collision>,
}

impl CollisionInformation {
    /// Creates an empty container for a body pair
    pub fn new(self_body: BodyKey, other_body: BodyKey) -> Self {
        Self {
            self_body,
            other_body,
            collisions: Vec::new(),
        }
    }

    /// Whether any record in this container is a first contact
    pub fn any_first_contact(&self) -> bool {
        self.collisions.iter().any(|c| c.first_contact)
    }

    /// Total number of validated contact points across all records
    pub fn total_contact_points(&self) -> usize {
        self.collisions
            .iter()
            .filter_map(|c| c.intersection.as_ref())
            .map(|i| i.points.len())
            .sum()
    }
}

/// All current overlaps between one body and one other body
#[derive(Debug, Clone)]
pub struct OverlapInformation {
    /// The body the records belong to
    pub self_body: BodyKey,
    /// The body they were recorded against
    pub other_body: BodyKey,
    /// Per-collider overlap records for this pair
    pub overlaps: Vec<Overlap>,
}

/// Contacts between one body pair that existed last tick and ended
#[derive(Debug, Clone)]
pub struct ContactEndedInformation {
    /// The body the records belong to
    pub self_body: BodyKey,
    /// The body the contact ended with
    pub other_body: BodyKey,
    /// The overlap records that ended
    pub overlaps: Vec<Overlap>,
}

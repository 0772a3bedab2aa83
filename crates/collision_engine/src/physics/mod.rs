//! Collision detection: colliders, bodies, the tick driver and queries
//!
//! The detection pipeline is split into two phases: broad-phase (the
//! spatial hash culls pairs that cannot collide) and narrow-phase (exact
//! shape tests produce contact records). The [`CollisionHandler`] drives
//! both each tick and classifies contacts against the previous tick's
//! results to report first contacts and ended contacts.

pub mod body;
pub mod collider;
pub mod collision_handler;
pub mod collision_layers;
pub mod contact;
pub mod information;
pub mod query;

pub use body::{BodyKey, ColliderId, CollisionBody};
pub use collider::Collider;
pub use collision_handler::CollisionHandler;
pub use collision_layers::CollisionLayers;
pub use contact::{CollisionPoint, CollisionPoints, Intersection, PointValidation};
pub use information::{
    Collision, CollisionInformation, ContactEndedInformation, Overlap, OverlapInformation,
};
pub use query::QueryInfo;

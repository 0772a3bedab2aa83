//! Spatial partitioning for broad-phase collision detection
//!
//! The uniform-grid spatial hash quickly culls collider pairs that
//! cannot possibly be colliding before any exact geometry runs.

pub mod spatial_hash;

pub use spatial_hash::SpatialHash;

//! # Collision Engine
//!
//! A 2D collision detection core with a uniform-grid broad phase.
//!
//! ## Features
//!
//! - **Uniform-grid broad phase**: spatial hash with per-collider bucket
//!   caching and exact per-cell overlap refinement
//! - **Polymorphic shapes**: circles, segments, lines, rays, triangles,
//!   rects, quads, polygons and polylines behind one dispatch matrix
//! - **Contact lifecycle**: first-contact / continuation / contact-ended
//!   classification across ticks
//! - **Swept detection**: velocity projection for fast movers
//! - **Ad-hoc queries**: query_space / cast_space with layer masks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collision_engine::prelude::*;
//!
//! struct Ball {
//!     position: Vec2,
//!     colliders: Vec<Collider>,
//! }
//!
//! impl CollisionBody for Ball {
//!     fn position(&self) -> Vec2 {
//!         self.position
//!     }
//!     fn colliders(&self) -> &[Collider] {
//!         &self.colliders
//!     }
//!     fn colliders_mut(&mut self) -> &mut [Collider] {
//!         &mut self.colliders
//!     }
//!     fn resolve_collision(&mut self, collisions: &[CollisionInformation]) {
//!         for info in collisions {
//!             // react to contacts with info.other_body
//!             let _ = info;
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mut handler = CollisionHandler::new(
//!         Rect::from_xywh(0.0, 0.0, 1000.0, 1000.0),
//!         16,
//!         16,
//!         64,
//!     )?;
//!     let ball = Ball {
//!         position: Vec2::new(100.0, 100.0),
//!         colliders: vec![Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 10.0)))],
//!     };
//!     handler.add(Box::new(ball));
//!     loop {
//!         handler.update(1.0 / 60.0);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod foundation;
pub mod physics;
pub mod shapes;
pub mod spatial;

pub use crate::core::config::CollisionConfig;
pub use crate::core::error::CollisionError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::core::{CollisionConfig, CollisionError};
    pub use crate::foundation::math::{Transform2, Vec2};
    pub use crate::physics::{
        BodyKey, Collider, ColliderId, Collision, CollisionBody, CollisionHandler,
        CollisionInformation, CollisionLayers, CollisionPoint, ContactEndedInformation,
        Intersection, Overlap, OverlapInformation, QueryInfo,
    };
    pub use crate::shapes::{
        Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Shape, ShapeKind, Triangle,
    };
    pub use crate::spatial::SpatialHash;
}

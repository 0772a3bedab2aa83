//! Colliders: world-space shapes with filtering and caching
//!
//! A collider wraps one local-space [`Shape`] plus a transform relative
//! to its owning body. The world-space shape is cached and recomputed
//! only when the transform or the owner position changes. All pairwise
//! geometric queries delegate to the shape dispatch matrix; a disabled
//! collider answers every query with "no interaction".

use crate::foundation::math::{Transform2, Vec2};
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::contact::{CollisionPoint, Intersection};
use crate::shapes::{Rect, Shape, ShapeKind};

/// A single collision shape attached to a body
#[derive(Debug, Clone)]
pub struct Collider {
    /// Local-space shape, positioned relative to the collider transform
    shape: Shape,
    /// Offset transform relative to the owning body
    transform: Transform2,
    /// Own enabled flag; the effective flag also requires the owner to be
    /// enabled and is combined by the handler
    enabled: bool,
    /// Collision layer (single bit position)
    layer: u32,
    /// Bit set of layers this collider tests against
    mask: u32,
    /// When false the narrow phase reports only boolean overlap
    compute_intersections: bool,
    /// Velocity mirrored from the owner each tick (read-only)
    velocity: Vec2,
    /// Cached world-space shape
    world_shape: Shape,
    /// World-space center this tick
    position: Vec2,
    /// World-space center on the previous tick
    prev_position: Vec2,
    /// Owner position the cache was computed for
    cached_owner_position: Vec2,
    /// Transform changed since the last refresh
    dirty: bool,
    /// First refresh seeds prev_position instead of shifting it
    refreshed: bool,
}

impl Collider {
    /// Creates a collider with default settings: enabled, on all layers,
    /// testing against all layers, computing full contact geometry
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            transform: Transform2::default(),
            enabled: true,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            compute_intersections: true,
            velocity: Vec2::zeros(),
            world_shape: Shape::None,
            position: Vec2::zeros(),
            prev_position: Vec2::zeros(),
            cached_owner_position: Vec2::zeros(),
            dirty: true,
            refreshed: false,
        }
    }

    /// Create a collider with a specific layer and mask
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Create a collider with an offset transform
    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self.dirty = true;
        self
    }

    /// Disable exact contact-point computation (boolean overlap only)
    pub fn without_intersections(mut self) -> Self {
        self.compute_intersections = false;
        self
    }

    /// The shape kind this collider reports
    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Local-space shape
    pub fn local_shape(&self) -> &Shape {
        &self.shape
    }

    /// Cached world-space shape (valid after the last refresh)
    pub fn world_shape(&self) -> &Shape {
        &self.world_shape
    }

    /// World-space bounding box of the cached shape
    pub fn bounding_box(&self) -> Rect {
        self.world_shape.bounding_box()
    }

    /// Own enabled flag (does not include the owner's flag)
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the own enabled flag
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Collision layer bit
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Collision mask
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Whether this collider's mask accepts `other`'s layer
    pub fn mask_accepts(&self, other: &Collider) -> bool {
        CollisionLayers::mask_accepts(self.mask, other.layer)
    }

    /// Whether exact contact points are computed for this collider
    pub fn computes_intersections(&self) -> bool {
        self.compute_intersections
    }

    /// Set whether exact contact points are computed
    pub fn set_compute_intersections(&mut self, compute: bool) {
        self.compute_intersections = compute;
    }

    /// Velocity mirrored from the owner at the last refresh
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// World-space center this tick
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// World-space center on the previous tick
    pub fn prev_position(&self) -> Vec2 {
        self.prev_position
    }

    /// Offset transform relative to the owner
    pub fn transform(&self) -> &Transform2 {
        &self.transform
    }

    /// Replace the offset transform, invalidating the cached world shape
    pub fn set_transform(&mut self, transform: Transform2) {
        self.transform = transform;
        self.dirty = true;
    }

    /// Recompute the cached world shape and per-tick snapshots
    ///
    /// Called by the handler at the start of every tick; the cache is
    /// only rebuilt when the transform or the owner position changed.
    pub(crate) fn refresh(&mut self, owner_position: Vec2, owner_velocity: Vec2) {
        if self.dirty || !self.refreshed || owner_position != self.cached_owner_position {
            self.world_shape = self.shape.transformed(&self.transform, owner_position);
            self.cached_owner_position = owner_position;
            self.dirty = false;
        }
        let center = self.world_shape.center();
        self.prev_position = if self.refreshed { self.position } else { center };
        self.position = center;
        self.refreshed = true;
        self.velocity = owner_velocity;
    }

    /// Boolean overlap with another collider
    ///
    /// Disabled colliders overlap nothing. Overlap is commutative by
    /// contract for every supported shape pairing.
    pub fn overlap(&self, other: &Collider) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }
        self.world_shape.overlap(&other.world_shape)
    }

    /// Boolean overlap with an ad-hoc shape
    pub fn overlap_shape(&self, shape: &Shape) -> bool {
        if !self.enabled {
            return false;
        }
        self.world_shape.overlap(shape)
    }

    /// Raw contact points where this collider's boundary crosses `other`
    ///
    /// Normals belong to `other`'s surface. Disabled colliders and
    /// unsupported pairings yield an empty set.
    pub fn intersect_points(&self, other: &Collider) -> Vec<CollisionPoint> {
        if !self.enabled || !other.enabled {
            return Vec::new();
        }
        self.world_shape.intersect(&other.world_shape)
    }

    /// Raw contact points against an ad-hoc shape (normals from the shape)
    pub fn intersect_shape_points(&self, shape: &Shape) -> Vec<CollisionPoint> {
        if !self.enabled {
            return Vec::new();
        }
        self.world_shape.intersect(shape)
    }

    /// Validated intersection against another collider
    ///
    /// Contact points are validated against this collider's velocity and
    /// current position. Returns `None` when disabled or when no contact
    /// point survives validation.
    pub fn intersect(&self, other: &Collider) -> Option<Intersection> {
        let raw = self.intersect_points(other);
        if raw.is_empty() {
            return None;
        }
        Intersection::new(raw, self.velocity, self.position)
    }

    /// Closest distance to another collider (0.0 when overlapping)
    pub fn closest_distance(&self, other: &Collider) -> f32 {
        self.world_shape.closest_distance(&other.world_shape)
    }

    /// Whether this collider's shape fully contains `other`'s
    pub fn contains_shape(&self, other: &Collider) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }
        self.world_shape.contains_shape(&other.world_shape)
    }

    /// Swept shape along a velocity vector, `None` where unsupported
    pub fn project(&self, velocity: Vec2) -> Option<Shape> {
        if !self.enabled {
            return None;
        }
        self.world_shape.project(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Segment};
    use approx::assert_relative_eq;

    fn circle_collider(x: f32, y: f32, r: f32) -> Collider {
        let mut collider = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), r)));
        collider.refresh(Vec2::new(x, y), Vec2::zeros());
        collider
    }

    #[test]
    fn test_world_shape_follows_owner() {
        let mut collider = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 2.0)));
        collider.refresh(Vec2::new(10.0, 5.0), Vec2::zeros());
        assert_relative_eq!(collider.position().x, 10.0);
        collider.refresh(Vec2::new(12.0, 5.0), Vec2::zeros());
        assert_relative_eq!(collider.position().x, 12.0);
        assert_relative_eq!(collider.prev_position().x, 10.0);
    }

    #[test]
    fn test_first_refresh_seeds_prev_position() {
        let collider = circle_collider(7.0, 3.0, 1.0);
        assert_relative_eq!(collider.prev_position().x, 7.0);
        assert_relative_eq!(collider.prev_position().y, 3.0);
    }

    #[test]
    fn test_transform_offset_applies() {
        let mut collider = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 1.0)))
            .with_transform(Transform2::from_position(Vec2::new(0.0, 4.0)));
        collider.refresh(Vec2::new(10.0, 0.0), Vec2::zeros());
        assert_relative_eq!(collider.position().x, 10.0);
        assert_relative_eq!(collider.position().y, 4.0);
    }

    #[test]
    fn test_disabled_collider_interacts_with_nothing() {
        let a = circle_collider(0.0, 0.0, 5.0);
        let mut b = circle_collider(4.0, 0.0, 5.0);
        assert!(a.overlap(&b));
        b.set_enabled(false);
        assert!(!a.overlap(&b));
        assert!(a.intersect(&b).is_none());
        assert!(b.project(Vec2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_overlap_circle_distances() {
        // Radius 5 circles at distance 8 overlap; at 20 they do not
        let a = circle_collider(0.0, 0.0, 5.0);
        let b = circle_collider(8.0, 0.0, 5.0);
        let c = circle_collider(20.0, 0.0, 5.0);
        assert!(a.overlap(&b));
        assert!(!a.overlap(&c));
    }

    #[test]
    fn test_intersect_validates_against_velocity() {
        let mut mover = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 5.0)));
        mover.refresh(Vec2::zeros(), Vec2::new(1.0, 0.0));
        let target = circle_collider(8.0, 0.0, 5.0);

        let intersection = mover.intersect(&target).unwrap();
        // Front-facing points survive; normals face back toward the mover
        assert!(!intersection.points.is_empty());
        assert!(intersection.combined.normal.x < 0.0);
    }

    #[test]
    fn test_segment_collider_kind_and_bounds() {
        let mut collider = Collider::new(Shape::Segment(Segment::new(
            Vec2::new(-3.0, 0.0),
            Vec2::new(3.0, 0.0),
        )));
        collider.refresh(Vec2::new(10.0, 10.0), Vec2::zeros());
        assert_eq!(collider.shape_kind(), ShapeKind::Segment);
        let bb = collider.bounding_box();
        assert_relative_eq!(bb.min.x, 7.0);
        assert_relative_eq!(bb.max.x, 13.0);
    }
}

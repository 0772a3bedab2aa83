//! Ad-hoc spatial queries: query_space and cast_space
//!
//! Stateless with respect to the tick loop; usable at any time after a
//! fill. Both families walk broad-phase candidates exactly like the tick
//! loop does (mask-reject before the overlap test, per-call candidate
//! dedup) but bypass first-contact and contact-ended bookkeeping
//! entirely. `query_space` carries full contact-point geometry;
//! `cast_space` reports boolean overlap only.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::foundation::math::constants::DISTANCE_SQUARED_TOLERANCE;
use crate::foundation::math::Vec2;
use crate::physics::body::{BodyKey, ColliderId};
use crate::physics::collider::Collider;
use crate::physics::collision_handler::CollisionHandler;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::contact::CollisionPoint;
use crate::shapes::Shape;

/// One intersecting candidate returned by `query_space`
#[derive(Debug, Clone)]
pub struct QueryInfo {
    /// The candidate collider
    pub collider: ColliderId,
    /// Contact points on the candidate's surface (normals from it)
    pub points: Vec<CollisionPoint>,
    /// Squared distance from the query origin
    pub distance_squared: f32,
}

/// Nearest-first ordering with a tolerance band: squared distances
/// within 0.01 of each other compare equal, leaving their relative
/// (stable) order untouched
fn compare_distance(a: f32, b: f32) -> Ordering {
    if (a - b).abs() < DISTANCE_SQUARED_TOLERANCE {
        Ordering::Equal
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

impl CollisionHandler {
    /// Query all colliders intersecting an ad-hoc shape, with contact
    /// geometry, optionally sorted nearest-first from `origin`
    pub fn query_space(&self, shape: &Shape, origin: Vec2, mask: u32, sorted: bool) -> Vec<QueryInfo> {
        let mut results = self.query_candidates(shape, origin, mask, None);
        if sorted {
            results.sort_by(|a, b| compare_distance(a.distance_squared, b.distance_squared));
        }
        results
    }

    /// Query using an ad-hoc collider's world shape and mask
    pub fn query_space_collider(&self, collider: &Collider, origin: Vec2, sorted: bool) -> Vec<QueryInfo> {
        if !collider.is_enabled() {
            return Vec::new();
        }
        self.query_space(collider.world_shape(), origin, collider.mask(), sorted)
    }

    /// Query for each collider of a registered body, excluding the
    /// body's own colliders from the results
    pub fn query_space_body(
        &self,
        key: BodyKey,
        mask: u32,
        sorted: bool,
    ) -> Vec<(ColliderId, Vec<QueryInfo>)> {
        let Some(body) = self.bodies.get(key) else {
            return Vec::new();
        };
        if !body.enabled() {
            return Vec::new();
        }
        let origin = body.position();
        let mut out = Vec::new();
        for (index, collider) in body.colliders().iter().enumerate() {
            if !collider.is_enabled() {
                continue;
            }
            let mut results = self.query_candidates(collider.world_shape(), origin, mask, Some(key));
            if sorted {
                results.sort_by(|a, b| compare_distance(a.distance_squared, b.distance_squared));
            }
            out.push((ColliderId::new(key, index), results));
        }
        out
    }

    /// All colliders whose shape overlaps an ad-hoc shape (boolean only),
    /// optionally sorted nearest-first from the shape's center
    pub fn cast_space(&self, shape: &Shape, mask: u32, sorted: bool) -> Vec<ColliderId> {
        let mut hits = self.cast_candidates(shape, mask, None);
        if sorted {
            hits.sort_by(|a, b| compare_distance(a.1, b.1));
        }
        hits.into_iter().map(|(id, _)| id).collect()
    }

    /// Number of colliders overlapping an ad-hoc shape
    pub fn cast_space_count(&self, shape: &Shape, mask: u32) -> usize {
        self.cast_candidates(shape, mask, None).len()
    }

    /// Cast using an ad-hoc collider's world shape and mask
    pub fn cast_space_collider(&self, collider: &Collider, sorted: bool) -> Vec<ColliderId> {
        if !collider.is_enabled() {
            return Vec::new();
        }
        self.cast_space(collider.world_shape(), collider.mask(), sorted)
    }

    /// Cast every collider of a registered body against the world,
    /// excluding the body's own colliders
    pub fn cast_space_body(&self, key: BodyKey, mask: u32, sorted: bool) -> Vec<ColliderId> {
        let Some(body) = self.bodies.get(key) else {
            return Vec::new();
        };
        if !body.enabled() {
            return Vec::new();
        }
        let mut merged: Vec<(ColliderId, f32)> = Vec::new();
        let mut seen: HashSet<ColliderId> = HashSet::new();
        for collider in body.colliders() {
            if !collider.is_enabled() {
                continue;
            }
            for hit in self.cast_candidates(collider.world_shape(), mask, Some(key)) {
                if seen.insert(hit.0) {
                    merged.push(hit);
                }
            }
        }
        if sorted {
            merged.sort_by(|a, b| compare_distance(a.1, b.1));
        }
        merged.into_iter().map(|(id, _)| id).collect()
    }

    /// Shared candidate walk for query_space: mask-reject, overlap test,
    /// then contact geometry
    fn query_candidates(
        &self,
        shape: &Shape,
        origin: Vec2,
        mask: u32,
        exclude_body: Option<BodyKey>,
    ) -> Vec<QueryInfo> {
        let mut out = Vec::new();
        let mut visited: HashSet<ColliderId> = HashSet::new();
        for cell in self.spatial_hash.cells_for_query(shape) {
            for &candidate_id in self.spatial_hash.bucket(cell) {
                if exclude_body == Some(candidate_id.body) {
                    continue;
                }
                if !visited.insert(candidate_id) {
                    continue;
                }
                let Some(candidate) = self.lookup_enabled(candidate_id) else {
                    continue;
                };
                if !CollisionLayers::mask_accepts(mask, candidate.layer()) {
                    continue;
                }
                if !candidate.overlap_shape(shape) {
                    continue;
                }
                let points = shape.intersect(candidate.world_shape());
                let distance_squared = points
                    .iter()
                    .map(|p| (p.point - origin).magnitude_squared())
                    .fold(f32::MAX, f32::min)
                    .min((candidate.position() - origin).magnitude_squared());
                out.push(QueryInfo {
                    collider: candidate_id,
                    points,
                    distance_squared,
                });
            }
        }
        out
    }

    /// Shared candidate walk for cast_space: mask-reject then overlap
    /// test only, no contact geometry
    fn cast_candidates(
        &self,
        shape: &Shape,
        mask: u32,
        exclude_body: Option<BodyKey>,
    ) -> Vec<(ColliderId, f32)> {
        let origin = shape.center();
        let mut out = Vec::new();
        let mut visited: HashSet<ColliderId> = HashSet::new();
        for cell in self.spatial_hash.cells_for_query(shape) {
            for &candidate_id in self.spatial_hash.bucket(cell) {
                if exclude_body == Some(candidate_id.body) {
                    continue;
                }
                if !visited.insert(candidate_id) {
                    continue;
                }
                let Some(candidate) = self.lookup_enabled(candidate_id) else {
                    continue;
                };
                // Mask reject happens before the overlap test; an empty
                // mask therefore costs no geometry at all
                if !CollisionLayers::mask_accepts(mask, candidate.layer()) {
                    continue;
                }
                if !candidate.overlap_shape(shape) {
                    continue;
                }
                let distance_squared = (candidate.position() - origin).magnitude_squared();
                out.push((candidate_id, distance_squared));
            }
        }
        out
    }

    /// Resolve a collider id to its collider if both the body and the
    /// collider are enabled
    fn lookup_enabled(&self, id: ColliderId) -> Option<&Collider> {
        let body = self.bodies.get(id.body)?;
        if !body.enabled() {
            return None;
        }
        let collider = body.colliders().get(id.index)?;
        collider.is_enabled().then_some(collider)
    }
}

//! Contact-point validation and aggregation
//!
//! Raw narrow-phase output is a bag of contact points with surface
//! normals. Before it reaches gameplay code the bag is validated against
//! the approach of the moving collider: back-facing surfaces (normals
//! pointing along the approach direction, or away from the reference
//! point) are irrelevant to an inbound contact and are removed.

use crate::foundation::math::{try_normalize, Vec2};
pub use crate::shapes::CollisionPoint;

/// Aggregate results computed while validating a point bag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointValidation {
    /// Mean position with the normalized mean normal
    pub combined: CollisionPoint,
    /// Point closest to the reference point
    pub closest: CollisionPoint,
    /// Point furthest from the reference point
    pub furthest: CollisionPoint,
    /// Point whose normal most nearly points toward the reference point
    pub pointing_towards: CollisionPoint,
}

/// A bag of contact points produced by one narrow-phase test
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionPoints {
    points: Vec<CollisionPoint>,
}

impl CollisionPoints {
    /// Creates a bag from raw narrow-phase output
    pub fn new(points: Vec<CollisionPoint>) -> Self {
        Self { points }
    }

    /// Number of points in the bag
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrow the points
    pub fn as_slice(&self) -> &[CollisionPoint] {
        &self.points
    }

    /// Iterate over the points
    pub fn iter(&self) -> impl Iterator<Item = &CollisionPoint> {
        self.points.iter()
    }

    /// Add a point to the bag
    pub fn push(&mut self, point: CollisionPoint) {
        self.points.push(point);
    }

    /// Validate the bag against an approach direction and reference point
    ///
    /// Removes invalid points (zero normal), points facing along
    /// `reference_direction` (back-faces relative to the approach) and
    /// points whose normal faces away from `reference_point`. Removal is
    /// done in reverse index order so `swap_remove` never disturbs
    /// indices still to be visited. Returns `None` when no point
    /// survives; otherwise the combined/closest/furthest selections.
    ///
    /// Validating an already-validated bag with the same arguments is a
    /// no-op on the contents and recomputes the identical aggregates.
    pub fn validate(&mut self, reference_direction: Vec2, reference_point: Vec2) -> Option<PointValidation> {
        let check_direction = reference_direction.magnitude_squared() > f32::EPSILON;
        for i in (0..self.points.len()).rev() {
            let p = self.points[i];
            let discard = !p.is_valid()
                || (check_direction && p.is_facing_direction(reference_direction))
                || !p.is_facing_point(reference_point);
            if discard {
                self.points.swap_remove(i);
            }
        }
        self.aggregate(reference_point)
    }

    /// Compute the aggregate selections without filtering
    fn aggregate(&self, reference_point: Vec2) -> Option<PointValidation> {
        let first = *self.points.first()?;

        let mut position_sum = Vec2::zeros();
        let mut normal_sum = Vec2::zeros();
        let mut closest = first;
        let mut closest_dist = f32::MAX;
        let mut furthest = first;
        let mut furthest_dist = f32::MIN;
        let mut pointing_towards = first;
        let mut best_dot = f32::MIN;

        for p in &self.points {
            position_sum += p.point;
            normal_sum += p.normal;

            let dist = (p.point - reference_point).magnitude_squared();
            if dist < closest_dist {
                closest_dist = dist;
                closest = *p;
            }
            if dist > furthest_dist {
                furthest_dist = dist;
                furthest = *p;
            }

            if let Some(towards) = try_normalize(reference_point - p.point) {
                let dot = p.normal.dot(&towards);
                if dot > best_dot {
                    best_dot = dot;
                    pointing_towards = *p;
                }
            }
        }

        let count = self.points.len() as f32;
        let combined = CollisionPoint::new(
            position_sum / count,
            try_normalize(normal_sum).unwrap_or_else(Vec2::zeros),
        );

        Some(PointValidation {
            combined,
            closest,
            furthest,
            pointing_towards,
        })
    }
}

/// A validated set of contact points for one collider pair
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// The surviving contact points
    pub points: CollisionPoints,
    /// Mean contact position and normal
    pub combined: CollisionPoint,
    /// Contact closest to the reference point
    pub closest: CollisionPoint,
    /// Contact furthest from the reference point
    pub furthest: CollisionPoint,
}

impl Intersection {
    /// Build a validated intersection from raw narrow-phase points
    ///
    /// `reference_direction` is the approaching collider's velocity and
    /// `reference_point` its current position. Returns `None` when every
    /// raw point is filtered out.
    pub fn new(raw: Vec<CollisionPoint>, reference_direction: Vec2, reference_point: Vec2) -> Option<Self> {
        let mut points = CollisionPoints::new(raw);
        let validation = points.validate(reference_direction, reference_point)?;
        Some(Self {
            points,
            combined: validation.combined,
            closest: validation.closest,
            furthest: validation.furthest,
        })
    }

    /// Build an intersection from a single synthesized contact point
    ///
    /// Used for the containment fallback where boolean overlap succeeded
    /// but the boundaries do not cross.
    pub fn from_single(point: CollisionPoint) -> Self {
        Self {
            points: CollisionPoints::new(vec![point]),
            combined: point,
            closest: point,
            furthest: point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32, nx: f32, ny: f32) -> CollisionPoint {
        CollisionPoint::new(Vec2::new(x, y), Vec2::new(nx, ny))
    }

    #[test]
    fn test_validate_removes_invalid_normals() {
        let mut points = CollisionPoints::new(vec![
            p(0.0, 0.0, 0.0, 0.0), // zero normal, invalid
            p(1.0, 0.0, -1.0, 0.0),
        ]);
        let result = points.validate(Vec2::new(1.0, 0.0), Vec2::new(-5.0, 0.0));
        assert!(result.is_some());
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_validate_removes_back_faces() {
        // Mover approaches along +x; a normal also pointing +x is the far
        // side of the obstacle and must be discarded
        let mut points = CollisionPoints::new(vec![
            p(10.0, 0.0, 1.0, 0.0),
            p(8.0, 0.0, -1.0, 0.0),
        ]);
        let result = points.validate(Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0));
        let validation = result.unwrap();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(validation.combined.point.x, 8.0);
        assert!(validation.combined.normal.x < 0.0);
    }

    #[test]
    fn test_validate_removes_points_facing_away_from_reference() {
        // Normal faces +x but the reference point sits on the -x side
        let mut points = CollisionPoints::new(vec![p(5.0, 0.0, 1.0, 0.0)]);
        let result = points.validate(Vec2::zeros(), Vec2::new(0.0, 0.0));
        assert!(result.is_none());
        assert!(points.is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut points = CollisionPoints::new(vec![
            p(4.0, 1.0, -1.0, 0.0),
            p(4.0, -1.0, -1.0, 0.0),
            p(12.0, 0.0, 1.0, 0.0), // back face, removed by the first pass
        ]);
        let direction = Vec2::new(1.0, 0.0);
        let reference = Vec2::new(0.0, 0.0);

        let first = points.validate(direction, reference).unwrap();
        let survivors = points.clone();
        let second = points.validate(direction, reference).unwrap();

        assert_eq!(points, survivors);
        assert_eq!(first.combined, second.combined);
        assert_eq!(first.closest, second.closest);
        assert_eq!(first.furthest, second.furthest);
    }

    #[test]
    fn test_combined_point_is_mean() {
        let mut points = CollisionPoints::new(vec![
            p(4.0, 2.0, -1.0, 0.0),
            p(4.0, -2.0, -1.0, 0.0),
        ]);
        let validation = points.validate(Vec2::new(1.0, 0.0), Vec2::zeros()).unwrap();
        assert_relative_eq!(validation.combined.point.x, 4.0);
        assert_relative_eq!(validation.combined.point.y, 0.0);
        assert_relative_eq!(validation.combined.normal.x, -1.0);
    }

    #[test]
    fn test_closest_and_furthest_selection() {
        let mut points = CollisionPoints::new(vec![
            p(2.0, 0.0, -1.0, 0.0),
            p(6.0, 0.0, -1.0, 0.0),
        ]);
        let validation = points.validate(Vec2::new(1.0, 0.0), Vec2::zeros()).unwrap();
        assert_relative_eq!(validation.closest.point.x, 2.0);
        assert_relative_eq!(validation.furthest.point.x, 6.0);
    }

    #[test]
    fn test_intersection_none_when_all_filtered() {
        let raw = vec![p(5.0, 0.0, 1.0, 0.0)];
        assert!(Intersection::new(raw, Vec2::new(1.0, 0.0), Vec2::zeros()).is_none());
    }
}

//! Primitive shapes: rectangles, circles, segments, lines and rays
//!
//! Pure geometry with no knowledge of colliders or the broad phase.
//! Degenerate inputs (zero-length directions, zero radii) degrade to
//! point tests rather than producing NaNs.

use crate::foundation::math::{cross, perp, try_normalize, Vec2};

/// An axis-aligned rectangle described by min/max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner (smallest x and y)
    pub min: Vec2,
    /// Maximum corner (largest x and y)
    pub max: Vec2,
}

impl Rect {
    /// Creates a rectangle from two corners, normalizing the ordering
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from a top-left position and a size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Creates a rectangle from a center point and half-extents
    pub fn from_center_extents(center: Vec2, extents: Vec2) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the rectangle
    pub fn extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Full size of the rectangle
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Width of the rectangle
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the rectangle has zero or negative area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point lies inside (or on the boundary of) the rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this rectangle overlaps another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Closest point inside the rectangle to an arbitrary point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Corner points in counter-clockwise order starting at min
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Rectangle grown by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Rect {
        let d = Vec2::new(amount, amount);
        Rect {
            min: self.min - d,
            max: self.max + d,
        }
    }
}

/// A circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// The center position in world space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Axis-aligned bounding box of the circle
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center_extents(self.center, Vec2::new(self.radius, self.radius))
    }

    /// Check if a point lies inside the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// Check if this circle intersects with another
    pub fn intersects(&self, other: &Circle) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Closest point on the circumference to an arbitrary point
    ///
    /// A point coincident with the center maps to the rightmost point of
    /// the circumference.
    pub fn closest_point_on_circumference(&self, point: Vec2) -> Vec2 {
        let dir = try_normalize(point - self.center).unwrap_or_else(|| Vec2::new(1.0, 0.0));
        self.center + dir * self.radius
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Vec2,
    /// End point
    pub end: Vec2,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Displacement from start to end
    pub fn displacement(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length of the segment
    pub fn length(&self) -> f32 {
        self.displacement().magnitude()
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Axis-aligned bounding box of the segment
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.start, self.end)
    }

    /// Closest point on the segment to an arbitrary point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let d = self.displacement();
        let len_sq = d.magnitude_squared();
        if len_sq <= f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(&d) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Squared distance from the segment to a point
    pub fn distance_squared_to_point(&self, point: Vec2) -> f32 {
        (self.closest_point(point) - point).magnitude_squared()
    }

    /// Intersection point with another segment, if the segments cross
    ///
    /// Collinear overlapping segments report the first shared endpoint.
    pub fn intersect_segment(&self, other: &Segment) -> Option<Vec2> {
        let r = self.displacement();
        let s = other.displacement();
        let denom = cross(r, s);
        let qp = other.start - self.start;

        if denom.abs() <= f32::EPSILON {
            // Parallel; collinear segments may still touch
            if cross(qp, r).abs() > f32::EPSILON {
                return None;
            }
            let r_len_sq = r.magnitude_squared();
            if r_len_sq <= f32::EPSILON {
                // Degenerate (point) segment
                if other.distance_squared_to_point(self.start) <= f32::EPSILON {
                    return Some(self.start);
                }
                return None;
            }
            let t0 = qp.dot(&r) / r_len_sq;
            let t1 = (other.end - self.start).dot(&r) / r_len_sq;
            let (t_min, t_max) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
            if t_max < 0.0 || t_min > 1.0 {
                return None;
            }
            let t = t_min.max(0.0);
            return Some(self.start + r * t);
        }

        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.start + r * t)
        } else {
            None
        }
    }

    /// Closest distance between two segments
    pub fn distance_to_segment(&self, other: &Segment) -> f32 {
        if self.intersect_segment(other).is_some() {
            return 0.0;
        }
        let d1 = self.distance_squared_to_point(other.start);
        let d2 = self.distance_squared_to_point(other.end);
        let d3 = other.distance_squared_to_point(self.start);
        let d4 = other.distance_squared_to_point(self.end);
        d1.min(d2).min(d3).min(d4).sqrt()
    }

    /// Unit normal of the segment oriented toward `towards`
    ///
    /// Returns `None` for a zero-length segment.
    pub fn normal_towards(&self, towards: Vec2) -> Option<Vec2> {
        let n = try_normalize(perp(self.displacement()))?;
        if n.dot(&(towards - self.start)) < 0.0 {
            Some(-n)
        } else {
            Some(n)
        }
    }
}

/// An infinite line through a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Any point on the line
    pub point: Vec2,
    /// The direction of the line (normalized)
    pub direction: Vec2,
}

impl Line {
    /// Creates a new line; the direction is normalized
    ///
    /// A zero-length direction falls back to the x axis.
    pub fn new(point: Vec2, direction: Vec2) -> Self {
        Self {
            point,
            direction: try_normalize(direction).unwrap_or_else(|| Vec2::new(1.0, 0.0)),
        }
    }

    /// Closest point on the line to an arbitrary point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let t = (point - self.point).dot(&self.direction);
        self.point + self.direction * t
    }

    /// Squared distance from the line to a point
    pub fn distance_squared_to_point(&self, point: Vec2) -> f32 {
        (self.closest_point(point) - point).magnitude_squared()
    }

    /// Intersection with a segment
    pub fn intersect_segment(&self, segment: &Segment) -> Option<Vec2> {
        let s = segment.displacement();
        let denom = cross(self.direction, s);
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let qp = segment.start - self.point;
        let u = cross(qp, self.direction) / denom;
        if (0.0..=1.0).contains(&u) {
            Some(segment.start + s * u)
        } else {
            None
        }
    }

    /// Intersection points with a circle (0, 1 or 2 points)
    pub fn intersect_circle(&self, circle: &Circle) -> Vec<Vec2> {
        let foot = self.closest_point(circle.center);
        let dist_sq = (foot - circle.center).magnitude_squared();
        let r_sq = circle.radius * circle.radius;
        if dist_sq > r_sq {
            return Vec::new();
        }
        let half_chord = (r_sq - dist_sq).max(0.0).sqrt();
        if half_chord <= f32::EPSILON {
            return vec![foot];
        }
        vec![
            foot - self.direction * half_chord,
            foot + self.direction * half_chord,
        ]
    }
}

/// A ray for ray casting and spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec2,
    /// The direction of the ray (normalized)
    pub direction: Vec2,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// A zero-length direction falls back to the x axis.
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: try_normalize(direction).unwrap_or_else(|| Vec2::new(1.0, 0.0)),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    /// The supporting infinite line of this ray
    pub fn to_line(&self) -> Line {
        Line {
            point: self.origin,
            direction: self.direction,
        }
    }

    /// Intersection with a segment (closest hit along the ray)
    pub fn intersect_segment(&self, segment: &Segment) -> Option<Vec2> {
        let s = segment.displacement();
        let denom = cross(self.direction, s);
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let qp = segment.start - self.origin;
        let t = cross(qp, s) / denom;
        let u = cross(qp, self.direction) / denom;
        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            Some(self.point_at(t))
        } else {
            None
        }
    }

    /// Intersection points with a circle, nearest first
    ///
    /// Solves |origin + t*direction - center|^2 = radius^2 and keeps the
    /// non-negative roots.
    pub fn intersect_circle(&self, circle: &Circle) -> Vec<Vec2> {
        let oc = self.origin - circle.center;
        let b = 2.0 * oc.dot(&self.direction);
        let c = oc.magnitude_squared() - circle.radius * circle.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return Vec::new();
        }
        let sqrt_d = discriminant.sqrt();
        let t1 = (-b - sqrt_d) * 0.5;
        let t2 = (-b + sqrt_d) * 0.5;
        let mut points = Vec::new();
        if t1 >= 0.0 {
            points.push(self.point_at(t1));
        }
        if t2 >= 0.0 && sqrt_d > f32::EPSILON {
            points.push(self.point_at(t2));
        }
        points
    }

    /// Squared distance from the ray to a point
    pub fn distance_squared_to_point(&self, point: Vec2) -> f32 {
        let t = (point - self.origin).dot(&self.direction).max(0.0);
        (self.point_at(t) - point).magnitude_squared()
    }
}

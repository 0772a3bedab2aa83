//! Shape primitives and the pairwise dispatch matrix
//!
//! Every collider wraps exactly one [`Shape`]. The pairwise operations
//! (overlap, intersect, closest distance, containment, projection) are
//! dispatched over a small internal classification instead of a deep
//! trait hierarchy: circles, single segments, infinite lines and rays,
//! closed vertex loops (triangle/rect/quad/polygon) and open chains
//! (polyline). Unsupported pairings degrade to "no interaction" and
//! never panic.

mod intersect;
mod overlap;
pub mod polygons;
pub mod primitives;

pub use polygons::{Polygon, Polyline, Quad, Triangle};
pub use primitives::{Circle, Line, Ray, Rect, Segment};

use crate::foundation::math::{rotate, Transform2, Vec2};
use polygons::{centroid_of, closest_point_on_loop, convex_hull};

/// Extent used to bound infinite shapes (lines, rays) for broad-phase tests
const FAR_EXTENT: f32 = 1.0e6;

/// A contact point produced by the narrow phase
///
/// The normal belongs to the surface that was hit. A point is valid only
/// if its normal is non-zero; zero-length normals mark degenerate contacts
/// that must be filtered out rather than normalized into NaNs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionPoint {
    /// Contact location in world space
    pub point: Vec2,
    /// Surface normal at the contact (unit length when valid)
    pub normal: Vec2,
}

impl CollisionPoint {
    /// Creates a new collision point
    pub fn new(point: Vec2, normal: Vec2) -> Self {
        Self { point, normal }
    }

    /// A point is valid iff its normal is non-zero
    pub fn is_valid(&self) -> bool {
        self.normal.magnitude_squared() > f32::EPSILON
    }

    /// Whether the normal faces along `direction`
    pub fn is_facing_direction(&self, direction: Vec2) -> bool {
        self.normal.dot(&direction) > 0.0
    }

    /// Whether the normal faces toward `reference`
    pub fn is_facing_point(&self, reference: Vec2) -> bool {
        self.normal.dot(&(reference - self.point)) > 0.0
    }
}

/// Closed enumeration of the supported shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// No shape; participates in nothing
    None,
    /// Circle
    Circle,
    /// Line segment
    Segment,
    /// Infinite line
    Line,
    /// Ray (half-line)
    Ray,
    /// Triangle
    Triangle,
    /// Axis-aligned rectangle
    Rect,
    /// Four-vertex polygon
    Quad,
    /// Closed polygon
    Polygon,
    /// Open segment chain
    Polyline,
}

/// A concrete world-space shape
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No shape; participates in nothing
    None,
    /// Circle
    Circle(Circle),
    /// Line segment
    Segment(Segment),
    /// Infinite line
    Line(Line),
    /// Ray (half-line)
    Ray(Ray),
    /// Triangle
    Triangle(Triangle),
    /// Axis-aligned rectangle
    Rect(Rect),
    /// Four-vertex polygon
    Quad(Quad),
    /// Closed polygon
    Polygon(Polygon),
    /// Open segment chain
    Polyline(Polyline),
}

/// Borrowed view of a closed vertex loop
pub(crate) enum LoopRef<'a> {
    /// Up to four vertices stored inline (triangle, rect, quad)
    Fixed([Vec2; 4], usize),
    /// Arbitrary vertex count borrowed from a polygon
    Slice(&'a [Vec2]),
}

impl LoopRef<'_> {
    /// The vertex loop as a slice
    pub fn points(&self) -> &[Vec2] {
        match self {
            Self::Fixed(arr, n) => &arr[..*n],
            Self::Slice(s) => s,
        }
    }
}

/// Internal classification driving the dispatch matrix
pub(crate) enum ShapeClass<'a> {
    Empty,
    Circle(Circle),
    Segment(Segment),
    Line(Line),
    Ray(Ray),
    Loop(LoopRef<'a>),
    Chain(&'a [Vec2]),
}

impl Shape {
    /// The kind tag of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::None => ShapeKind::None,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Segment(_) => ShapeKind::Segment,
            Self::Line(_) => ShapeKind::Line,
            Self::Ray(_) => ShapeKind::Ray,
            Self::Triangle(_) => ShapeKind::Triangle,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Quad(_) => ShapeKind::Quad,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Polyline(_) => ShapeKind::Polyline,
        }
    }

    pub(crate) fn classify(&self) -> ShapeClass<'_> {
        match self {
            Self::None => ShapeClass::Empty,
            Self::Circle(c) => ShapeClass::Circle(*c),
            Self::Segment(s) => ShapeClass::Segment(*s),
            Self::Line(l) => ShapeClass::Line(*l),
            Self::Ray(r) => ShapeClass::Ray(*r),
            Self::Triangle(t) => {
                let [a, b, c] = t.vertices();
                ShapeClass::Loop(LoopRef::Fixed([a, b, c, c], 3))
            }
            Self::Rect(r) => ShapeClass::Loop(LoopRef::Fixed(r.corners(), 4)),
            Self::Quad(q) => ShapeClass::Loop(LoopRef::Fixed(q.vertices(), 4)),
            Self::Polygon(p) => {
                if p.points.len() < 3 {
                    ShapeClass::Empty
                } else {
                    ShapeClass::Loop(LoopRef::Slice(&p.points))
                }
            }
            Self::Polyline(p) => {
                if p.points.len() < 2 {
                    ShapeClass::Empty
                } else {
                    ShapeClass::Chain(&p.points)
                }
            }
        }
    }

    /// Axis-aligned bounding box
    ///
    /// Infinite shapes (lines, rays) are bounded at a large fixed extent so
    /// broad-phase cell tests stay finite.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::None => Rect::new(Vec2::zeros(), Vec2::zeros()),
            Self::Circle(c) => c.bounding_box(),
            Self::Segment(s) => s.bounding_box(),
            Self::Line(l) => Rect::from_center_extents(l.point, Vec2::new(FAR_EXTENT, FAR_EXTENT)),
            Self::Ray(r) => {
                let far = r.point_at(FAR_EXTENT);
                Rect::new(r.origin, far)
            }
            Self::Triangle(t) => t.bounding_box(),
            Self::Rect(r) => *r,
            Self::Quad(q) => q.bounding_box(),
            Self::Polygon(p) => p.bounding_box(),
            Self::Polyline(p) => p.bounding_box(),
        }
    }

    /// Representative center point of the shape
    pub fn center(&self) -> Vec2 {
        match self {
            Self::None => Vec2::zeros(),
            Self::Circle(c) => c.center,
            Self::Segment(s) => s.midpoint(),
            Self::Line(l) => l.point,
            Self::Ray(r) => r.origin,
            Self::Triangle(t) => t.centroid(),
            Self::Rect(r) => r.center(),
            Self::Quad(q) => q.centroid(),
            Self::Polygon(p) => p.centroid(),
            Self::Polyline(p) => centroid_of(&p.points),
        }
    }

    /// Check if a point lies inside the shape
    ///
    /// Open shapes (segments, lines, rays, polylines) contain no points.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Circle(c) => c.contains_point(point),
            Self::Triangle(t) => t.contains_point(point),
            Self::Rect(r) => r.contains_point(point),
            Self::Quad(q) => q.contains_point(point),
            Self::Polygon(p) => p.contains_point(point),
            _ => false,
        }
    }

    /// Boolean overlap test against another shape (commutative)
    pub fn overlap(&self, other: &Shape) -> bool {
        overlap::overlap(&self.classify(), &other.classify())
    }

    /// Contact points where this shape's boundary crosses `other`
    ///
    /// The returned normals belong to `other`'s surface. Unsupported
    /// pairings return an empty set.
    pub fn intersect(&self, other: &Shape) -> Vec<CollisionPoint> {
        intersect::intersect(&self.classify(), &other.classify())
    }

    /// Closest distance between this shape and another
    ///
    /// Returns 0.0 when the shapes overlap (including full containment).
    pub fn closest_distance(&self, other: &Shape) -> f32 {
        if self.overlap(other) || self.contains_shape(other) || other.contains_shape(self) {
            return 0.0;
        }
        intersect::boundary_distance(&self.classify(), &other.classify())
    }

    /// Check if this shape fully contains `other`
    ///
    /// Unsupported pairings (open shapes as containers) report `false`.
    pub fn contains_shape(&self, other: &Shape) -> bool {
        overlap::contains(&self.classify(), &other.classify())
    }

    /// Closest point on this shape's boundary to an arbitrary point
    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        match self {
            Self::None => point,
            Self::Circle(c) => c.closest_point_on_circumference(point),
            Self::Segment(s) => s.closest_point(point),
            Self::Line(l) => l.closest_point(point),
            Self::Ray(r) => {
                let t = (point - r.origin).dot(&r.direction).max(0.0);
                r.point_at(t)
            }
            Self::Triangle(t) => closest_point_on_loop(&t.vertices(), point),
            Self::Rect(r) => closest_point_on_loop(&r.corners(), point),
            Self::Quad(q) => closest_point_on_loop(&q.vertices(), point),
            Self::Polygon(p) => closest_point_on_loop(&p.points, point),
            Self::Polyline(p) => {
                let mut best = point;
                let mut best_dist = f32::MAX;
                for seg in p.segments() {
                    let candidate = seg.closest_point(point);
                    let dist = (candidate - point).magnitude_squared();
                    if dist < best_dist {
                        best_dist = dist;
                        best = candidate;
                    }
                }
                best
            }
        }
    }

    /// Minkowski-style sweep of this shape along a velocity vector
    ///
    /// Returns the convex hull of the shape and its translated copy as a
    /// polygon. Circles are approximated by an octagonal ring. Infinite and
    /// open-ended kinds (line, ray) and the empty shape yield `None`;
    /// callers treat that as "skip swept detection this tick".
    pub fn project(&self, velocity: Vec2) -> Option<Shape> {
        let base: Vec<Vec2> = match self {
            Self::None | Self::Line(_) | Self::Ray(_) => return None,
            Self::Circle(c) => {
                let octagon = Polygon::regular(c.center, c.radius / (std::f32::consts::PI / 8.0).cos(), 8);
                octagon.points
            }
            Self::Segment(s) => vec![s.start, s.end],
            Self::Triangle(t) => t.vertices().to_vec(),
            Self::Rect(r) => r.corners().to_vec(),
            Self::Quad(q) => q.vertices().to_vec(),
            Self::Polygon(p) => p.points.clone(),
            Self::Polyline(p) => p.points.clone(),
        };
        if base.is_empty() {
            return None;
        }
        let mut swept = Vec::with_capacity(base.len() * 2);
        swept.extend(base.iter().copied());
        swept.extend(base.iter().map(|p| p + velocity));
        let hull = convex_hull(swept);
        if hull.len() < 3 {
            return None;
        }
        Some(Shape::Polygon(Polygon::new(hull)))
    }

    /// World-space shape derived from a local shape, a collider transform
    /// and the owning object's position
    ///
    /// A rotated rectangle loses axis alignment and is promoted to a quad.
    pub fn transformed(&self, transform: &Transform2, owner_position: Vec2) -> Shape {
        let origin = owner_position + transform.position;
        let map = |p: Vec2| {
            origin + rotate(
                Vec2::new(p.x * transform.scale.x, p.y * transform.scale.y),
                transform.rotation,
            )
        };
        match self {
            Self::None => Self::None,
            Self::Circle(c) => Shape::Circle(Circle::new(
                map(c.center),
                c.radius * transform.scale.x.abs().max(transform.scale.y.abs()),
            )),
            Self::Segment(s) => Shape::Segment(Segment::new(map(s.start), map(s.end))),
            Self::Line(l) => Shape::Line(Line::new(map(l.point), rotate(l.direction, transform.rotation))),
            Self::Ray(r) => Shape::Ray(Ray::new(map(r.origin), rotate(r.direction, transform.rotation))),
            Self::Triangle(t) => Shape::Triangle(Triangle::new(map(t.a), map(t.b), map(t.c))),
            Self::Rect(r) => {
                if transform.is_axis_aligned() {
                    Shape::Rect(Rect::new(map(r.min), map(r.max)))
                } else {
                    let [a, b, c, d] = r.corners();
                    Shape::Quad(Quad::new(map(a), map(b), map(c), map(d)))
                }
            }
            Self::Quad(q) => Shape::Quad(Quad::new(map(q.a), map(q.b), map(q.c), map(q.d))),
            Self::Polygon(p) => Shape::Polygon(Polygon::new(p.points.iter().map(|&v| map(v)).collect())),
            Self::Polyline(p) => Shape::Polyline(Polyline::new(p.points.iter().map(|&v| map(v)).collect())),
        }
    }
}

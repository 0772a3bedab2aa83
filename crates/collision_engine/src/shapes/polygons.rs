//! Polygonal shapes: triangles, quads, polygons and polylines
//!
//! Vertex-list geometry shared by the overlap and intersection routines.
//! Closed shapes are treated as vertex loops; a polyline is an open chain
//! with no interior.

use crate::foundation::math::{cross, perp, try_normalize, Vec2};
use crate::shapes::primitives::{Rect, Segment};

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub a: Vec2,
    /// Second vertex
    pub b: Vec2,
    /// Third vertex
    pub c: Vec2,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Vertex list in declaration order
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> Rect {
        bounding_box_of(&self.vertices())
    }

    /// Check if a point lies inside the triangle (sign-of-area test)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d1 = cross(self.b - self.a, point - self.a);
        let d2 = cross(self.c - self.b, point - self.b);
        let d3 = cross(self.a - self.c, point - self.c);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

/// A four-sided polygon (not necessarily axis-aligned)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// First vertex
    pub a: Vec2,
    /// Second vertex
    pub b: Vec2,
    /// Third vertex
    pub c: Vec2,
    /// Fourth vertex
    pub d: Vec2,
}

impl Quad {
    /// Creates a new quad from four vertices in winding order
    pub fn new(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Self {
        Self { a, b, c, d }
    }

    /// Vertex list in winding order
    pub fn vertices(&self) -> [Vec2; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Centroid of the four vertices
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c + self.d) * 0.25
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> Rect {
        bounding_box_of(&self.vertices())
    }

    /// Check if a point lies inside the quad
    pub fn contains_point(&self, point: Vec2) -> bool {
        points_contain(&self.vertices(), point)
    }
}

/// A closed polygon described by its vertex loop
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in winding order; the last vertex connects back to the first
    pub points: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from a vertex loop
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Creates a regular polygon with `sides` vertices around `center`
    pub fn regular(center: Vec2, radius: f32, sides: usize) -> Self {
        let sides = sides.max(3);
        let step = std::f32::consts::TAU / sides as f32;
        let points = (0..sides)
            .map(|i| {
                let angle = step * i as f32;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Self { points }
    }

    /// Creates a circular-sector polygon approximation
    ///
    /// The sector spans `sweep` radians starting at `start_angle` and is
    /// approximated with `arc_segments` chords plus the center vertex.
    pub fn sector(center: Vec2, radius: f32, start_angle: f32, sweep: f32, arc_segments: usize) -> Self {
        let arc_segments = arc_segments.max(1);
        let step = sweep / arc_segments as f32;
        let mut points = Vec::with_capacity(arc_segments + 2);
        points.push(center);
        for i in 0..=arc_segments {
            let angle = start_angle + step * i as f32;
            points.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        }
        Self { points }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Centroid of the vertices
    pub fn centroid(&self) -> Vec2 {
        centroid_of(&self.points)
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> Rect {
        bounding_box_of(&self.points)
    }

    /// Check if a point lies inside the polygon (crossing number)
    pub fn contains_point(&self, point: Vec2) -> bool {
        points_contain(&self.points, point)
    }
}

/// An open chain of connected segments
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Vertices in chain order
    pub points: Vec<Vec2>,
}

impl Polyline {
    /// Creates a polyline from a vertex chain
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the chain has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box
    pub fn bounding_box(&self) -> Rect {
        bounding_box_of(&self.points)
    }

    /// Constituent segments of the chain
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
    }
}

/// Bounding box of a vertex list; empty input collapses to the origin
pub fn bounding_box_of(points: &[Vec2]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::new(Vec2::zeros(), Vec2::zeros());
    };
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Rect { min, max }
}

/// Centroid of a vertex list; empty input yields the origin
pub fn centroid_of(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::zeros();
    }
    points.iter().fold(Vec2::zeros(), |acc, p| acc + p) / points.len() as f32
}

/// Crossing-number containment test for a closed vertex loop
pub fn points_contain(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let slope_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < slope_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Edges of a closed vertex loop
pub fn loop_edges(points: &[Vec2]) -> impl Iterator<Item = Segment> + '_ {
    (0..points.len()).map(move |i| {
        let j = (i + 1) % points.len();
        Segment::new(points[i], points[j])
    })
}

/// Outward unit normal of the loop edge starting at index `i`
///
/// Oriented away from the loop centroid so the result is independent of
/// winding direction. Returns `None` for a degenerate edge.
pub fn loop_edge_normal(points: &[Vec2], i: usize) -> Option<Vec2> {
    let j = (i + 1) % points.len();
    let edge = points[j] - points[i];
    let n = try_normalize(perp(edge))?;
    let mid = (points[i] + points[j]) * 0.5;
    if n.dot(&(mid - centroid_of(points))) < 0.0 {
        Some(-n)
    } else {
        Some(n)
    }
}

/// Closest point on a loop boundary to an arbitrary point
pub fn closest_point_on_loop(points: &[Vec2], p: Vec2) -> Vec2 {
    let mut best = points.first().copied().unwrap_or_else(Vec2::zeros);
    let mut best_dist = f32::MAX;
    for edge in loop_edges(points) {
        let candidate = edge.closest_point(p);
        let dist = (candidate - p).magnitude_squared();
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

/// Project a vertex list onto an axis, returning the (min, max) interval
pub fn project_onto_axis(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for p in points {
        let d = p.dot(&axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Separating Axis Theorem overlap test over two convex vertex loops
///
/// Tests the edge normals of both loops; no separating axis means overlap.
pub fn sat_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 2 || b.len() < 2 {
        return false;
    }
    let test_axes = |points: &[Vec2]| -> bool {
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            let edge = points[j] - points[i];
            let Some(axis) = try_normalize(perp(edge)) else {
                continue;
            };
            let (min_a, max_a) = project_onto_axis(a, axis);
            let (min_b, max_b) = project_onto_axis(b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
        true
    };
    test_axes(a) && test_axes(b)
}

/// Convex hull of a point set (monotone chain), counter-clockwise
pub fn convex_hull(mut points: Vec<Vec2>) -> Vec<Vec2> {
    if points.len() < 3 {
        return points;
    }
    points.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    points.dedup_by(|a, b| (*a - *b).magnitude_squared() <= f32::EPSILON);
    if points.len() < 3 {
        return points;
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(points.len() * 2);
    // Lower hull
    for &p in &points {
        while hull.len() >= 2 && cross(hull[hull.len() - 1] - hull[hull.len() - 2], p - hull[hull.len() - 2]) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // Upper hull
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 1] - hull[hull.len() - 2], p - hull[hull.len() - 2]) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

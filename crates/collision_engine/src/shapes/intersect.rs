//! Contact-point generation and boundary-distance routines
//!
//! `intersect(a, b)` returns the points where `a`'s boundary crosses `b`,
//! carrying `b`'s surface normal at each point. Both shapes are first
//! decomposed into boundary elements: a circle stays a circle, everything
//! segment-like becomes a segment set, lines and rays stay parametric.
//! Unsupported pairings yield an empty set; nothing in here errors.

use crate::foundation::math::{cross, perp, try_normalize, Vec2};
use crate::shapes::polygons::{centroid_of, loop_edge_normal, loop_edges};
use crate::shapes::primitives::{Circle, Line, Ray, Segment};
use crate::shapes::{CollisionPoint, LoopRef, ShapeClass};

/// Boundary elements used when a shape acts as the probing side
enum Probe {
    Empty,
    Circle(Circle),
    Segs(Vec<Segment>),
    Line(Line),
    Ray(Ray),
}

/// Boundary elements used when a shape acts as the surface being hit
///
/// Segment elements carry a precomputed outward normal where the shape
/// has a well-defined interior (loops); otherwise the normal is oriented
/// toward the probing shape.
enum Surface {
    Empty,
    Circle(Circle),
    Segs(Vec<(Segment, Option<Vec2>)>),
    Line(Line),
    Ray(Ray),
}

fn reference_point(class: &ShapeClass<'_>) -> Vec2 {
    match class {
        ShapeClass::Empty => Vec2::zeros(),
        ShapeClass::Circle(c) => c.center,
        ShapeClass::Segment(s) => s.midpoint(),
        ShapeClass::Line(l) => l.point,
        ShapeClass::Ray(r) => r.origin,
        ShapeClass::Loop(lp) => centroid_of(lp.points()),
        ShapeClass::Chain(pts) => centroid_of(pts),
    }
}

fn probe_of(class: &ShapeClass<'_>) -> Probe {
    match class {
        ShapeClass::Empty => Probe::Empty,
        ShapeClass::Circle(c) => Probe::Circle(*c),
        ShapeClass::Segment(s) => Probe::Segs(vec![*s]),
        ShapeClass::Line(l) => Probe::Line(*l),
        ShapeClass::Ray(r) => Probe::Ray(*r),
        ShapeClass::Loop(lp) => Probe::Segs(loop_edges(lp.points()).collect()),
        ShapeClass::Chain(pts) => Probe::Segs(chain_segments(pts)),
    }
}

fn surface_of(class: &ShapeClass<'_>, toward: Vec2) -> Surface {
    match class {
        ShapeClass::Empty => Surface::Empty,
        ShapeClass::Circle(c) => Surface::Circle(*c),
        ShapeClass::Segment(s) => Surface::Segs(vec![(*s, s.normal_towards(toward))]),
        ShapeClass::Line(l) => Surface::Line(*l),
        ShapeClass::Ray(r) => Surface::Ray(*r),
        ShapeClass::Loop(lp) => Surface::Segs(loop_surface(lp)),
        ShapeClass::Chain(pts) => Surface::Segs(
            chain_segments(pts)
                .into_iter()
                .map(|s| {
                    let n = s.normal_towards(toward);
                    (s, n)
                })
                .collect(),
        ),
    }
}

fn loop_surface(lp: &LoopRef<'_>) -> Vec<(Segment, Option<Vec2>)> {
    let points = lp.points();
    (0..points.len())
        .map(|i| {
            let j = (i + 1) % points.len();
            (Segment::new(points[i], points[j]), loop_edge_normal(points, i))
        })
        .collect()
}

fn chain_segments(points: &[Vec2]) -> Vec<Segment> {
    points.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
}

/// Intersection points of a segment with a circle's circumference
fn segment_circle_points(s: &Segment, c: &Circle) -> Vec<Vec2> {
    let d = s.displacement();
    let len_sq = d.magnitude_squared();
    if len_sq <= f32::EPSILON {
        return Vec::new();
    }
    let oc = s.start - c.center;
    let b = 2.0 * oc.dot(&d);
    let k = oc.magnitude_squared() - c.radius * c.radius;
    let discriminant = b * b - 4.0 * len_sq * k;
    if discriminant < 0.0 {
        return Vec::new();
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * len_sq);
    let t2 = (-b + sqrt_d) / (2.0 * len_sq);
    let mut points = Vec::new();
    if (0.0..=1.0).contains(&t1) {
        points.push(s.start + d * t1);
    }
    if (0.0..=1.0).contains(&t2) && sqrt_d > f32::EPSILON {
        points.push(s.start + d * t2);
    }
    points
}

/// Intersection points of two circles, with normals from `b`'s surface
fn circle_circle_points(a: &Circle, b: &Circle) -> Vec<CollisionPoint> {
    let delta = b.center - a.center;
    let dist_sq = delta.magnitude_squared();
    if dist_sq <= f32::EPSILON {
        return Vec::new(); // Concentric circles share no discrete points
    }
    let dist = dist_sq.sqrt();
    if dist > a.radius + b.radius || dist < (a.radius - b.radius).abs() {
        return Vec::new();
    }
    let along = (a.radius * a.radius - b.radius * b.radius + dist_sq) / (2.0 * dist);
    let h_sq = a.radius * a.radius - along * along;
    let dir = delta / dist;
    let mid = a.center + dir * along;
    let radial = |p: Vec2| try_normalize(p - b.center).unwrap_or_else(Vec2::zeros);
    if h_sq <= f32::EPSILON {
        return vec![CollisionPoint::new(mid, radial(mid))];
    }
    let offset = perp(dir) * h_sq.sqrt();
    vec![
        CollisionPoint::new(mid + offset, radial(mid + offset)),
        CollisionPoint::new(mid - offset, radial(mid - offset)),
    ]
}

fn circle_normal(c: &Circle, p: Vec2) -> Vec2 {
    try_normalize(p - c.center).unwrap_or_else(Vec2::zeros)
}

fn line_normal_towards(direction: Vec2, on_line: Vec2, toward: Vec2) -> Vec2 {
    let n = try_normalize(perp(direction)).unwrap_or_else(Vec2::zeros);
    if n.dot(&(toward - on_line)) < 0.0 {
        -n
    } else {
        n
    }
}

/// Contact points where `a`'s boundary crosses `b`, normals from `b`
pub(crate) fn intersect(a: &ShapeClass<'_>, b: &ShapeClass<'_>) -> Vec<CollisionPoint> {
    let a_ref = reference_point(a);
    let probe = probe_of(a);
    let surface = surface_of(b, a_ref);
    let mut out = Vec::new();

    match (&probe, &surface) {
        (Probe::Empty, _) | (_, Surface::Empty) => {}

        (Probe::Circle(ca), Surface::Circle(cb)) => out = circle_circle_points(ca, cb),
        (Probe::Circle(ca), Surface::Segs(segs)) => {
            for (seg, normal) in segs {
                let Some(n) = normal else { continue };
                for p in segment_circle_points(seg, ca) {
                    out.push(CollisionPoint::new(p, *n));
                }
            }
        }
        (Probe::Circle(ca), Surface::Line(l)) => {
            for p in l.intersect_circle(ca) {
                out.push(CollisionPoint::new(p, line_normal_towards(l.direction, p, ca.center)));
            }
        }
        (Probe::Circle(ca), Surface::Ray(r)) => {
            for p in r.intersect_circle(ca) {
                out.push(CollisionPoint::new(p, line_normal_towards(r.direction, p, ca.center)));
            }
        }

        (Probe::Segs(segs), Surface::Circle(cb)) => {
            for seg in segs {
                for p in segment_circle_points(seg, cb) {
                    out.push(CollisionPoint::new(p, circle_normal(cb, p)));
                }
            }
        }
        (Probe::Segs(probe_segs), Surface::Segs(surface_segs)) => {
            for ps in probe_segs {
                for (ss, normal) in surface_segs {
                    let Some(n) = normal else { continue };
                    if let Some(p) = ps.intersect_segment(ss) {
                        out.push(CollisionPoint::new(p, *n));
                    }
                }
            }
        }
        (Probe::Segs(segs), Surface::Line(l)) => {
            for seg in segs {
                if let Some(p) = l.intersect_segment(seg) {
                    out.push(CollisionPoint::new(p, line_normal_towards(l.direction, p, a_ref)));
                }
            }
        }
        (Probe::Segs(segs), Surface::Ray(r)) => {
            for seg in segs {
                if let Some(p) = r.intersect_segment(seg) {
                    out.push(CollisionPoint::new(p, line_normal_towards(r.direction, p, a_ref)));
                }
            }
        }

        (Probe::Line(la), Surface::Circle(cb)) => {
            for p in la.intersect_circle(cb) {
                out.push(CollisionPoint::new(p, circle_normal(cb, p)));
            }
        }
        (Probe::Line(la), Surface::Segs(segs)) => {
            for (seg, normal) in segs {
                let Some(n) = normal else { continue };
                if let Some(p) = la.intersect_segment(seg) {
                    out.push(CollisionPoint::new(p, *n));
                }
            }
        }
        (Probe::Line(la), Surface::Line(lb)) => {
            if let Some(p) = line_line_point(la, lb) {
                out.push(CollisionPoint::new(p, line_normal_towards(lb.direction, p, la.point)));
            }
        }
        (Probe::Line(la), Surface::Ray(rb)) => {
            if let Some(p) = line_ray_point(la, rb) {
                out.push(CollisionPoint::new(p, line_normal_towards(rb.direction, p, la.point)));
            }
        }

        (Probe::Ray(ra), Surface::Circle(cb)) => {
            for p in ra.intersect_circle(cb) {
                out.push(CollisionPoint::new(p, circle_normal(cb, p)));
            }
        }
        (Probe::Ray(ra), Surface::Segs(segs)) => {
            for (seg, normal) in segs {
                let Some(n) = normal else { continue };
                if let Some(p) = ra.intersect_segment(seg) {
                    out.push(CollisionPoint::new(p, *n));
                }
            }
        }
        (Probe::Ray(ra), Surface::Line(lb)) => {
            if let Some(p) = line_ray_point(lb, ra) {
                out.push(CollisionPoint::new(p, line_normal_towards(lb.direction, p, ra.origin)));
            }
        }
        (Probe::Ray(ra), Surface::Ray(rb)) => {
            if let Some(p) = ray_ray_point(ra, rb) {
                out.push(CollisionPoint::new(p, line_normal_towards(rb.direction, p, ra.origin)));
            }
        }
    }

    out
}

fn line_line_point(a: &Line, b: &Line) -> Option<Vec2> {
    let denom = cross(a.direction, b.direction);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = cross(b.point - a.point, b.direction) / denom;
    Some(a.point + a.direction * t)
}

fn line_ray_point(l: &Line, r: &Ray) -> Option<Vec2> {
    let denom = cross(r.direction, l.direction);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = cross(l.point - r.origin, l.direction) / denom;
    (t >= 0.0).then(|| r.point_at(t))
}

fn ray_ray_point(a: &Ray, b: &Ray) -> Option<Vec2> {
    let denom = cross(a.direction, b.direction);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let qp = b.origin - a.origin;
    let t = cross(qp, b.direction) / denom;
    let u = cross(qp, a.direction) / denom;
    (t >= 0.0 && u >= 0.0).then(|| a.point_at(t))
}

/// Minimum distance between the boundaries of two shapes
///
/// Does not account for containment; callers that need "0 when inside"
/// semantics check overlap first. Empty shapes are infinitely far away.
pub(crate) fn boundary_distance(a: &ShapeClass<'_>, b: &ShapeClass<'_>) -> f32 {
    let pa = probe_of(a);
    let pb = probe_of(b);
    match (&pa, &pb) {
        (Probe::Empty, _) | (_, Probe::Empty) => f32::INFINITY,

        (Probe::Circle(ca), Probe::Circle(cb)) => {
            ((cb.center - ca.center).magnitude() - ca.radius - cb.radius).max(0.0)
        }
        (Probe::Circle(c), Probe::Segs(segs)) | (Probe::Segs(segs), Probe::Circle(c)) => {
            let min_sq = segs
                .iter()
                .map(|s| s.distance_squared_to_point(c.center))
                .fold(f32::MAX, f32::min);
            (min_sq.sqrt() - c.radius).max(0.0)
        }
        (Probe::Circle(c), Probe::Line(l)) | (Probe::Line(l), Probe::Circle(c)) => {
            (l.distance_squared_to_point(c.center).sqrt() - c.radius).max(0.0)
        }
        (Probe::Circle(c), Probe::Ray(r)) | (Probe::Ray(r), Probe::Circle(c)) => {
            (r.distance_squared_to_point(c.center).sqrt() - c.radius).max(0.0)
        }

        (Probe::Segs(sa), Probe::Segs(sb)) => {
            let mut best = f32::MAX;
            for s1 in sa {
                for s2 in sb {
                    best = best.min(s1.distance_to_segment(s2));
                }
            }
            best
        }
        (Probe::Segs(segs), Probe::Line(l)) | (Probe::Line(l), Probe::Segs(segs)) => {
            let mut best = f32::MAX;
            for s in segs {
                if l.intersect_segment(s).is_some() {
                    return 0.0;
                }
                best = best
                    .min(l.distance_squared_to_point(s.start).sqrt())
                    .min(l.distance_squared_to_point(s.end).sqrt());
            }
            best
        }
        (Probe::Segs(segs), Probe::Ray(r)) | (Probe::Ray(r), Probe::Segs(segs)) => {
            let mut best = f32::MAX;
            for s in segs {
                if r.intersect_segment(s).is_some() {
                    return 0.0;
                }
                best = best
                    .min(r.distance_squared_to_point(s.start).sqrt())
                    .min(r.distance_squared_to_point(s.end).sqrt())
                    .min(s.distance_squared_to_point(r.origin).sqrt());
            }
            best
        }

        (Probe::Line(la), Probe::Line(lb)) => {
            if cross(la.direction, lb.direction).abs() > f32::EPSILON {
                0.0
            } else {
                lb.distance_squared_to_point(la.point).sqrt()
            }
        }
        (Probe::Line(l), Probe::Ray(r)) | (Probe::Ray(r), Probe::Line(l)) => {
            if line_ray_point(l, r).is_some() {
                0.0
            } else {
                l.distance_squared_to_point(r.origin).sqrt()
            }
        }
        (Probe::Ray(ra), Probe::Ray(rb)) => {
            if ray_ray_point(ra, rb).is_some() {
                0.0
            } else {
                ra.distance_squared_to_point(rb.origin)
                    .sqrt()
                    .min(rb.distance_squared_to_point(ra.origin).sqrt())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon, Rect, Segment, Shape};
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_circle_intersection_points() {
        let a = Shape::Circle(Circle::new(Vec2::new(0.0, 0.0), 5.0));
        let b = Shape::Circle(Circle::new(Vec2::new(8.0, 0.0), 5.0));
        let points = a.intersect(&b);
        assert_eq!(points.len(), 2);
        for p in &points {
            assert!(p.is_valid());
            // Points lie on both circumferences
            assert_relative_eq!(p.point.x, 4.0, epsilon = 1e-4);
            // Normals belong to b and point away from b's center
            assert!(p.normal.x < 0.0);
        }
    }

    #[test]
    fn test_segment_into_rect_normals_face_outward() {
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        let seg = Shape::Segment(Segment::new(Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0)));
        let points = seg.intersect(&rect);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].point.y, 0.0, epsilon = 1e-5);
        // Bottom edge normal faces down, toward the approaching segment
        assert!(points[0].normal.y < -0.9);
    }

    #[test]
    fn test_contained_circle_yields_no_points() {
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        let circle = Shape::Circle(Circle::new(Vec2::new(50.0, 50.0), 5.0));
        assert!(circle.intersect(&rect).is_empty());
        assert!(rect.intersect(&circle).is_empty());
        assert!(circle.overlap(&rect));
    }

    #[test]
    fn test_ray_into_circle_normals_radial() {
        let circle = Shape::Circle(Circle::new(Vec2::new(10.0, 0.0), 2.0));
        let ray = Shape::Ray(crate::shapes::Ray::new(Vec2::zeros(), Vec2::new(1.0, 0.0)));
        let points = ray.intersect(&circle);
        assert_eq!(points.len(), 2);
        // First hit is the near side of the circle
        assert_relative_eq!(points[0].point.x, 8.0, epsilon = 1e-4);
        assert!(points[0].normal.x < -0.9);
    }

    #[test]
    fn test_polygon_polygon_intersections() {
        let a = Shape::Polygon(Polygon::regular(Vec2::new(0.0, 0.0), 5.0, 8));
        let b = Shape::Polygon(Polygon::regular(Vec2::new(7.0, 0.0), 5.0, 8));
        let points = a.intersect(&b);
        assert!(!points.is_empty());
        for p in &points {
            assert!(p.is_valid());
            // Normals from b face away from b's centroid, i.e. roughly toward a
            assert!(p.normal.x < 0.1);
        }
    }

    #[test]
    fn test_boundary_distance_circle_to_rect() {
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        let circle = Shape::Circle(Circle::new(Vec2::new(20.0, 5.0), 3.0));
        assert_relative_eq!(circle.closest_distance(&rect), 7.0, epsilon = 1e-4);
    }
}

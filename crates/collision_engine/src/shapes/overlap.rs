//! Boolean overlap and containment tests over the shape classification
//!
//! Overlap is commutative by contract: the lower triangle of the pair
//! matrix delegates to the mirrored call. Containment is directional
//! (`contains(a, b)` asks whether `a` fully encloses `b`); open shapes
//! can never contain anything.

use crate::foundation::math::{cross, Vec2};
use crate::shapes::polygons::{loop_edges, points_contain, sat_overlap};
use crate::shapes::primitives::{Circle, Line, Ray, Segment};
use crate::shapes::ShapeClass;

/// Boolean overlap between two classified shapes
pub(crate) fn overlap(a: &ShapeClass<'_>, b: &ShapeClass<'_>) -> bool {
    use ShapeClass as C;
    match (a, b) {
        (C::Empty, _) | (_, C::Empty) => false,

        (C::Circle(a), C::Circle(b)) => a.intersects(b),
        (C::Circle(c), C::Segment(s)) => circle_segment(c, s),
        (C::Circle(c), C::Line(l)) => l.distance_squared_to_point(c.center) <= c.radius * c.radius,
        (C::Circle(c), C::Ray(r)) => r.distance_squared_to_point(c.center) <= c.radius * c.radius,
        (C::Circle(c), C::Loop(lp)) => circle_loop(c, lp.points()),
        (C::Circle(c), C::Chain(pts)) => chain_segments(pts).any(|s| circle_segment(c, &s)),

        (C::Segment(a), C::Segment(b)) => a.intersect_segment(b).is_some(),
        (C::Segment(s), C::Line(l)) => segment_line(s, l),
        (C::Segment(s), C::Ray(r)) => segment_ray(s, r),
        (C::Segment(s), C::Loop(lp)) => segment_loop(s, lp.points()),
        (C::Segment(s), C::Chain(pts)) => chain_segments(pts).any(|c| s.intersect_segment(&c).is_some()),

        (C::Line(a), C::Line(b)) => line_line(a, b),
        (C::Line(l), C::Ray(r)) => line_ray(l, r),
        (C::Line(l), C::Loop(lp)) => loop_edges(lp.points()).any(|e| segment_line(&e, l)),
        (C::Line(l), C::Chain(pts)) => chain_segments(pts).any(|s| segment_line(&s, l)),

        (C::Ray(a), C::Ray(b)) => ray_ray(a, b),
        (C::Ray(r), C::Loop(lp)) => ray_loop(r, lp.points()),
        (C::Ray(r), C::Chain(pts)) => chain_segments(pts).any(|s| segment_ray(&s, r)),

        (C::Loop(a), C::Loop(b)) => sat_overlap(a.points(), b.points()),
        (C::Loop(lp), C::Chain(pts)) => chain_segments(pts).any(|s| segment_loop(&s, lp.points())),

        (C::Chain(a), C::Chain(b)) => chain_segments(a)
            .any(|sa| chain_segments(b).any(|sb| sa.intersect_segment(&sb).is_some())),

        // Lower triangle mirrors the upper one
        _ => overlap(b, a),
    }
}

/// Whether `a` fully contains `b`
pub(crate) fn contains(a: &ShapeClass<'_>, b: &ShapeClass<'_>) -> bool {
    use ShapeClass as C;
    match (a, b) {
        (C::Circle(a), C::Circle(b)) => {
            let d = (b.center - a.center).magnitude();
            d + b.radius <= a.radius
        }
        (C::Circle(c), C::Segment(s)) => c.contains_point(s.start) && c.contains_point(s.end),
        (C::Circle(c), C::Loop(lp)) => lp.points().iter().all(|&p| c.contains_point(p)),
        (C::Circle(c), C::Chain(pts)) => pts.iter().all(|&p| c.contains_point(p)),

        (C::Loop(lp), C::Circle(c)) => {
            let pts = lp.points();
            points_contain(pts, c.center)
                && loop_edges(pts).all(|e| e.distance_squared_to_point(c.center) >= c.radius * c.radius)
        }
        (C::Loop(lp), C::Segment(s)) => {
            points_contain(lp.points(), s.start) && points_contain(lp.points(), s.end)
        }
        (C::Loop(a), C::Loop(b)) => b.points().iter().all(|&p| points_contain(a.points(), p)),
        (C::Loop(lp), C::Chain(pts)) => pts.iter().all(|&p| points_contain(lp.points(), p)),

        // Open shapes contain nothing; nothing contains an infinite shape
        _ => false,
    }
}

fn chain_segments(points: &[Vec2]) -> impl Iterator<Item = Segment> + '_ {
    points.windows(2).map(|w| Segment::new(w[0], w[1]))
}

fn circle_segment(c: &Circle, s: &Segment) -> bool {
    s.distance_squared_to_point(c.center) <= c.radius * c.radius
}

fn circle_loop(c: &Circle, points: &[Vec2]) -> bool {
    points_contain(points, c.center)
        || loop_edges(points).any(|e| circle_segment(c, &e))
}

fn segment_loop(s: &Segment, points: &[Vec2]) -> bool {
    points_contain(points, s.start)
        || points_contain(points, s.end)
        || loop_edges(points).any(|e| s.intersect_segment(&e).is_some())
}

fn segment_line(s: &Segment, l: &Line) -> bool {
    if l.intersect_segment(s).is_some() {
        return true;
    }
    // Collinear segment on the line
    cross(l.direction, s.displacement()).abs() <= f32::EPSILON
        && l.distance_squared_to_point(s.start) <= f32::EPSILON
}

fn segment_ray(s: &Segment, r: &Ray) -> bool {
    if r.intersect_segment(s).is_some() {
        return true;
    }
    // Collinear: the ray overlaps the segment if either endpoint is ahead
    cross(r.direction, s.displacement()).abs() <= f32::EPSILON
        && r.to_line().distance_squared_to_point(s.start) <= f32::EPSILON
        && ((s.start - r.origin).dot(&r.direction) >= 0.0
            || (s.end - r.origin).dot(&r.direction) >= 0.0)
}

fn line_line(a: &Line, b: &Line) -> bool {
    if cross(a.direction, b.direction).abs() > f32::EPSILON {
        return true;
    }
    // Parallel lines overlap only when coincident
    b.distance_squared_to_point(a.point) <= f32::EPSILON
}

fn line_ray(l: &Line, r: &Ray) -> bool {
    let denom = cross(r.direction, l.direction);
    if denom.abs() <= f32::EPSILON {
        return l.distance_squared_to_point(r.origin) <= f32::EPSILON;
    }
    let t = cross(l.point - r.origin, l.direction) / denom;
    t >= 0.0
}

fn ray_ray(a: &Ray, b: &Ray) -> bool {
    let denom = cross(a.direction, b.direction);
    if denom.abs() <= f32::EPSILON {
        // Parallel rays: only collinear ones can meet
        if a.to_line().distance_squared_to_point(b.origin) > f32::EPSILON {
            return false;
        }
        return (b.origin - a.origin).dot(&a.direction) >= 0.0
            || (a.origin - b.origin).dot(&b.direction) >= 0.0;
    }
    let qp = b.origin - a.origin;
    let t = cross(qp, b.direction) / denom;
    let u = cross(qp, a.direction) / denom;
    t >= 0.0 && u >= 0.0
}

fn ray_loop(r: &Ray, points: &[Vec2]) -> bool {
    points_contain(points, r.origin) || loop_edges(points).any(|e| r.intersect_segment(&e).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon, Polyline, Rect, Segment, Shape, Triangle};

    #[test]
    fn test_circle_rect_overlap_and_separation() {
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        let touching = Shape::Circle(Circle::new(Vec2::new(12.0, 5.0), 2.5));
        let apart = Shape::Circle(Circle::new(Vec2::new(15.0, 5.0), 2.0));
        assert!(rect.overlap(&touching));
        assert!(!rect.overlap(&apart));
    }

    #[test]
    fn test_circle_inside_rect_overlaps_without_edge_crossing() {
        // Full containment still counts as overlap
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        let inner = Shape::Circle(Circle::new(Vec2::new(50.0, 50.0), 5.0));
        assert!(rect.overlap(&inner));
        assert!(inner.overlap(&rect));
    }

    #[test]
    fn test_segment_through_triangle() {
        let tri = Shape::Triangle(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 10.0),
        ));
        let through = Shape::Segment(Segment::new(Vec2::new(-5.0, 3.0), Vec2::new(15.0, 3.0)));
        let inside = Shape::Segment(Segment::new(Vec2::new(4.0, 2.0), Vec2::new(6.0, 2.0)));
        let outside = Shape::Segment(Segment::new(Vec2::new(-5.0, 12.0), Vec2::new(15.0, 12.0)));
        assert!(tri.overlap(&through));
        assert!(tri.overlap(&inside));
        assert!(!tri.overlap(&outside));
    }

    #[test]
    fn test_ray_into_polygon() {
        let poly = Shape::Polygon(Polygon::regular(Vec2::new(20.0, 0.0), 5.0, 8));
        let towards = Shape::Ray(crate::shapes::Ray::new(Vec2::zeros(), Vec2::new(1.0, 0.0)));
        let away = Shape::Ray(crate::shapes::Ray::new(Vec2::zeros(), Vec2::new(-1.0, 0.0)));
        assert!(poly.overlap(&towards));
        assert!(!poly.overlap(&away));
    }

    #[test]
    fn test_ray_origin_inside_polygon() {
        let poly = Shape::Polygon(Polygon::regular(Vec2::zeros(), 5.0, 8));
        let ray = Shape::Ray(crate::shapes::Ray::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0)));
        assert!(poly.overlap(&ray));
    }

    #[test]
    fn test_polyline_has_no_interior() {
        // A closed-looking chain still has no interior: a circle strictly
        // between chain vertices does not overlap
        let chain = Shape::Polyline(Polyline::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]));
        let inner = Shape::Circle(Circle::new(Vec2::new(5.0, 5.0), 1.0));
        let crossing = Shape::Circle(Circle::new(Vec2::new(10.0, 5.0), 1.5));
        assert!(!chain.overlap(&inner));
        assert!(chain.overlap(&crossing));
    }

    #[test]
    fn test_rect_contains_circle() {
        let rect = Shape::Rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
        let inner = Shape::Circle(Circle::new(Vec2::new(50.0, 50.0), 5.0));
        let poking_out = Shape::Circle(Circle::new(Vec2::new(2.0, 50.0), 5.0));
        assert!(rect.contains_shape(&inner));
        assert!(!rect.contains_shape(&poking_out));
        assert!(!inner.contains_shape(&rect));
    }

    #[test]
    fn test_circle_contains_triangle() {
        let circle = Shape::Circle(Circle::new(Vec2::zeros(), 10.0));
        let tri = Shape::Triangle(Triangle::new(
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, -2.0),
            Vec2::new(0.0, 3.0),
        ));
        assert!(circle.contains_shape(&tri));
    }

    #[test]
    fn test_open_shapes_contain_nothing() {
        let seg = Shape::Segment(Segment::new(Vec2::zeros(), Vec2::new(10.0, 0.0)));
        let point_circle = Shape::Circle(Circle::new(Vec2::new(5.0, 0.0), 0.0));
        assert!(!seg.contains_shape(&point_circle));
        let line = Shape::Line(crate::shapes::Line::new(Vec2::zeros(), Vec2::new(1.0, 0.0)));
        assert!(!line.contains_shape(&point_circle));
    }
}

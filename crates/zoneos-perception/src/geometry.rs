//! Planar segment predicates used by the transition detector.

use zoneos_graph::DoorSegment;
use zoneos_types::{Point, Pose2D};

/// Signed area test: positive when `q` lies left of the directed line
/// `a → b`, negative when right, zero when collinear.
pub fn side(a: Point, b: Point, q: Point) -> f64 {
    let ux = b.x - a.x;
    let uy = b.y - a.y;
    ux * (q.y - a.y) - uy * (q.x - a.x)
}

/// Product of the side tests of `p` and `q` against the line `a → b`.
///
/// Negative means the segment `p → q` strictly straddles the infinite line
/// through `a` and `b`.  A zero product (an endpoint exactly on the line) is
/// treated as not straddling; a noisy estimator never stays on the line, and
/// a strict test keeps the detector from firing twice on one crossing.
pub fn straddle_product(a: Point, b: Point, p: Point, q: Point) -> f64 {
    side(a, b, p) * side(a, b, q)
}

/// Standard two-sided segment-intersection test: the motion segment must
/// straddle the door line *and* the door segment must straddle the motion
/// line.
pub fn segments_intersect(a: Point, b: Point, p: Point, q: Point) -> bool {
    straddle_product(a, b, p, q) < 0.0 && straddle_product(p, q, a, b) < 0.0
}

/// The anchor pose of a door segment: its midpoint, heading along the
/// segment direction (`atan2(dy, dx)`).
pub fn segment_anchor(seg: &DoorSegment) -> Pose2D {
    let dx = seg.p2.x - seg.p1.x;
    let dy = seg.p2.y - seg.p1.y;
    Pose2D::new(
        (seg.p1.x + seg.p2.x) / 2.0,
        (seg.p1.y + seg.p2.y) / 2.0,
        dy.atan2(dx),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn side_sign_convention() {
        // Line along +X: above is left (positive), below is right (negative).
        assert!(side(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.5, 1.0)) > 0.0);
        assert!(side(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.5, -1.0)) < 0.0);
        assert_eq!(side(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)), 0.0);
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(0.5, -0.5),
            pt(0.5, 0.5)
        ));
    }

    #[test]
    fn motion_beside_the_door_does_not_intersect() {
        // Straddles the infinite door line but misses the physical segment.
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(2.0, -0.5),
            pt(2.0, 0.5)
        ));
    }

    #[test]
    fn motion_short_of_the_line_does_not_intersect() {
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(0.5, 0.2),
            pt(0.5, 0.8)
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(0.0, 1.0),
            pt(1.0, 1.0)
        ));
    }

    #[test]
    fn endpoint_touching_is_not_a_crossing() {
        // q lands exactly on the door line: product is zero, strict test says no.
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(0.5, -0.5),
            pt(0.5, 0.0)
        ));
    }

    #[test]
    fn anchor_is_midpoint_with_segment_heading() {
        let seg = DoorSegment {
            p1: pt(0.0, 0.0),
            p2: pt(2.0, 0.0),
        };
        let a = segment_anchor(&seg);
        assert!((a.x - 1.0).abs() < 1e-12);
        assert!(a.y.abs() < 1e-12);
        assert!(a.theta.abs() < 1e-12);

        let vertical = DoorSegment {
            p1: pt(3.0, 1.0),
            p2: pt(3.0, 5.0),
        };
        let v = segment_anchor(&vertical);
        assert!((v.x - 3.0).abs() < 1e-12);
        assert!((v.y - 3.0).abs() < 1e-12);
        assert!((v.theta - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn anchor_heading_follows_endpoint_order() {
        let seg = DoorSegment {
            p1: pt(1.0, 0.0),
            p2: pt(0.0, 0.0),
        };
        assert!((segment_anchor(&seg).theta - PI).abs() < 1e-12);
    }
}

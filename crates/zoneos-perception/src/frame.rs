//! Rigid 2-D frame swap between two zones.
//!
//! When a transition commits, the robot's pose — measured in the source
//! zone's local frame — must be re-expressed in the destination zone's local
//! frame.  Each side of a transition feature carries an *anchor pose* (one
//! per zone, same physical feature, matched orientation convention); the
//! transform preserves the robot's pose relative to that feature exactly, so
//! a round trip through both anchors reproduces the original pose.

use zoneos_types::{Pose2D, normalize_angle};

/// Re-express `pose` (given in the source anchor's zone frame) in the
/// destination anchor's zone frame.
///
/// The offset between the anchors is applied as one rigid motion: the pose's
/// position relative to the source anchor is rotated by the anchors' heading
/// difference — both rotated components computed from the original relative
/// x and y — then shifted by the anchors' translation difference.  Heading
/// picks up the same difference.
pub fn transform(anchor_src: Pose2D, anchor_dst: Pose2D, pose: Pose2D) -> Pose2D {
    let dtheta = normalize_angle(anchor_dst.theta - anchor_src.theta);
    let dx = anchor_dst.x - anchor_src.x;
    let dy = anchor_dst.y - anchor_src.y;

    let rel_x = pose.x - anchor_src.x;
    let rel_y = pose.y - anchor_src.y;

    let (sin, cos) = dtheta.sin_cos();
    let rot_x = cos * rel_x - sin * rel_y;
    let rot_y = sin * rel_x + cos * rel_y;

    Pose2D::new(
        anchor_src.x + rot_x + dx,
        anchor_src.y + rot_y + dy,
        pose.theta + dtheta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn pose(x: f64, y: f64, theta: f64) -> Pose2D {
        Pose2D::new(x, y, theta)
    }

    fn assert_pose_eq(a: Pose2D, b: Pose2D) {
        assert!((a.x - b.x).abs() < 1e-9, "x: {} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() < 1e-9, "y: {} vs {}", a.y, b.y);
        assert!(
            normalize_angle(a.theta - b.theta).abs() < 1e-9,
            "theta: {} vs {}",
            a.theta,
            b.theta
        );
    }

    #[test]
    fn identical_anchors_is_identity() {
        let a = pose(2.0, 3.0, 0.4);
        let p = pose(5.0, -1.0, 1.2);
        assert_pose_eq(transform(a, a, p), p);
    }

    #[test]
    fn pure_translation_shifts_position_only() {
        // Both anchors horizontal; destination 5 units up (the P3 setup).
        let src = pose(0.5, 0.0, 0.0);
        let dst = pose(0.5, 5.0, 0.0);
        let p = pose(0.5, 2.0, 0.0);
        assert_pose_eq(transform(src, dst, p), pose(0.5, 7.0, 0.0));
    }

    #[test]
    fn quarter_turn_rotates_relative_offset() {
        let src = pose(0.0, 0.0, 0.0);
        let dst = pose(0.0, 0.0, FRAC_PI_2);
        let p = pose(1.0, 0.0, 0.0);
        // One unit ahead of the source anchor becomes one unit along the
        // rotated axis, and the heading turns with the frame.
        assert_pose_eq(transform(src, dst, p), pose(0.0, 1.0, FRAC_PI_2));
    }

    #[test]
    fn half_turn_with_translation() {
        let src = pose(0.0, 0.0, 0.0);
        let dst = pose(10.0, 0.0, PI);
        let p = pose(1.0, 2.0, 0.5);
        // Relative (1, 2) rotated by π is (-1, -2), then shifted to the new
        // anchor.
        assert_pose_eq(transform(src, dst, p), pose(9.0, -2.0, 0.5 + PI));
    }

    #[test]
    fn offset_from_anchor_is_preserved() {
        let src = pose(2.0, 1.0, 0.3);
        let dst = pose(-4.0, 7.0, 2.1);
        let p = pose(2.5, 0.2, 1.0);

        let q = transform(src, dst, p);
        // Same distance to the feature on both sides of the swap.
        assert!((p.distance(&src) - q.distance(&dst)).abs() < 1e-9);
        // Heading offset relative to the anchor is unchanged.
        let before = normalize_angle(p.theta - src.theta);
        let after = normalize_angle(q.theta - dst.theta);
        assert!(normalize_angle(before - after).abs() < 1e-9);
    }

    #[test]
    fn round_trip_reproduces_pose() {
        let anchors = [
            (pose(0.0, 0.0, 0.0), pose(3.0, -2.0, 1.7)),
            (pose(1.5, 1.5, -2.9), pose(-8.0, 4.0, 0.1)),
            (pose(-3.0, 0.5, PI), pose(0.0, 0.0, -FRAC_PI_2)),
        ];
        let poses = [
            pose(0.7, -0.3, 0.0),
            pose(-2.0, 5.0, 2.5),
            pose(4.0, 4.0, -3.0),
        ];
        for (a, b) in anchors {
            for p in poses {
                assert_pose_eq(transform(b, a, transform(a, b, p)), p);
            }
        }
    }

    #[test]
    fn result_theta_is_normalized() {
        let src = pose(0.0, 0.0, -3.0);
        let dst = pose(0.0, 0.0, 3.0);
        let p = pose(0.0, 0.0, 3.0);
        let q = transform(src, dst, p);
        assert!(q.theta > -PI && q.theta <= PI);
    }
}

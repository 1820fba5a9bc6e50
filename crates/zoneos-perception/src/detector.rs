//! Door-crossing detection with confirmation hysteresis.
//!
//! The localization collaborator streams global pose estimates; each update
//! pairs the previous estimate with the new one.  [`TransitionDetector`]
//! runs the two-phase state machine over those motion segments:
//!
//! 1. **Idle** – every door link serving the current zone is tested for a
//!    two-sided segment intersection against the motion segment.  A hit
//!    opens a crossing: the boundary, the origin pose, the target zone, and
//!    the anchor poses on both sides of the door are captured.
//! 2. **Crossing** – each new estimate re-tests the net displacement since
//!    the crossing began against the captured boundary line.  Re-crossing
//!    back cancels (estimator jitter); staying across for more than the
//!    confirmation distance commits and yields a [`ZoneSwitch`] carrying the
//!    pose re-expressed in the target zone's frame.
//!
//! The detector owns its crossing state exclusively and talks to no
//! collaborators, so the state machine is unit-testable in isolation.  A
//! restart always resumes Idle.
//!
//! Authoring constraint: no two door segments of one zone may be crossable
//! by a single motion step.  If they are, the first door in graph order
//! wins; the detector does not arbitrate.

use tracing::{debug, info};
use zoneos_graph::ZoneGraph;
use zoneos_types::{Point, Pose2D, ZoneId};

use crate::frame;
use crate::geometry::{segment_anchor, segments_intersect, straddle_product};

/// Net displacement (in map length units) the robot must put behind the door
/// line before a pending crossing commits.  Rejects noise-sized crossings.
const CONFIRM_DISTANCE: f64 = 0.5;

/// A committed transition: switch the active zone to `target` and
/// re-initialize localization at `pose` (already expressed in `target`'s
/// local frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSwitch {
    pub target: ZoneId,
    pub pose: Pose2D,
}

#[derive(Clone, Copy)]
enum CrossingState {
    Idle,
    Crossing {
        target: ZoneId,
        origin: Pose2D,
        anchor_src: Pose2D,
        anchor_dst: Pose2D,
        boundary: (Point, Point),
    },
}

/// The door-crossing state machine.  One instance per robot; feed it every
/// consecutive pose pair via [`TransitionDetector::update`].
pub struct TransitionDetector {
    state: CrossingState,
    confirm_distance: f64,
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionDetector {
    pub fn new() -> Self {
        Self::with_confirm_distance(CONFIRM_DISTANCE)
    }

    /// Override the confirmation hysteresis (tests, unusual door spacing).
    pub fn with_confirm_distance(confirm_distance: f64) -> Self {
        Self {
            state: CrossingState::Idle,
            confirm_distance,
        }
    }

    /// Whether a crossing is currently pending confirmation.
    pub fn is_crossing(&self) -> bool {
        matches!(self.state, CrossingState::Crossing { .. })
    }

    /// Drop any pending crossing.  Called when the frame is about to change
    /// under the detector (elevator move, external re-initialization).
    pub fn cancel(&mut self) {
        if self.is_crossing() {
            debug!("pending crossing cancelled externally");
        }
        self.state = CrossingState::Idle;
    }

    /// Feed one motion step `(old, new)` observed while localized in
    /// `current_zone`.  Returns a [`ZoneSwitch`] when a crossing commits;
    /// the caller performs the actual zone switch and re-initialization.
    pub fn update(
        &mut self,
        graph: &ZoneGraph,
        current_zone: ZoneId,
        old: Pose2D,
        new: Pose2D,
    ) -> Option<ZoneSwitch> {
        if matches!(self.state, CrossingState::Idle) {
            self.try_open_crossing(graph, current_zone, old, new);
        }
        // A crossing opened by this very update is evaluated immediately:
        // one large step can detect and commit in a single tick.
        self.evaluate_pending(new)
    }

    fn try_open_crossing(
        &mut self,
        graph: &ZoneGraph,
        current_zone: ZoneId,
        old: Pose2D,
        new: Pose2D,
    ) {
        for door in graph.doors_serving(current_zone) {
            let Some(here) = door.side_of(current_zone) else {
                continue;
            };
            let seg = &door.segments[here];
            if !segments_intersect(seg.p1, seg.p2, old.point(), new.point()) {
                continue;
            }

            let target = door.zones[1 - here];
            info!(
                from = current_zone,
                to = target,
                "door crossing detected, awaiting confirmation"
            );
            self.state = CrossingState::Crossing {
                target,
                origin: old,
                anchor_src: segment_anchor(seg),
                anchor_dst: segment_anchor(&door.segments[1 - here]),
                boundary: (seg.p1, seg.p2),
            };
            return;
        }
    }

    fn evaluate_pending(&mut self, new: Pose2D) -> Option<ZoneSwitch> {
        let CrossingState::Crossing {
            target,
            origin,
            anchor_src,
            anchor_dst,
            boundary,
        } = self.state
        else {
            return None;
        };

        let product = straddle_product(boundary.0, boundary.1, origin.point(), new.point());
        if product >= 0.0 {
            // Net displacement no longer straddles the door line from the
            // original side: the estimate jittered back.
            debug!(zone = target, "crossing cancelled: estimate re-crossed the door line");
            self.state = CrossingState::Idle;
            return None;
        }

        if origin.distance(&new) > self.confirm_distance {
            let pose = frame::transform(anchor_src, anchor_dst, new);
            info!(zone = target, x = pose.x, y = pose.y, "door crossing committed");
            self.state = CrossingState::Idle;
            return Some(ZoneSwitch { target, pose });
        }

        None
    }
}

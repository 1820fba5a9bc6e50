//! Elevator navigation over the zone graph.
//!
//! Elevators are navigated by explicit command, not geometric detection: the
//! caller asks for one floor up or down, the navigator finds the nearest
//! elevator link serving the current zone and re-expresses the robot's pose
//! in the adjacent floor's frame via the link's anchor poses.
//!
//! Both "no elevator serves this zone" and "already at the link's floor
//! range boundary" surface as `None`; callers must treat both as "nothing
//! happened" (distinguished only in debug logs).

use tracing::debug;
use zoneos_graph::{ElevatorLink, ZoneGraph};
use zoneos_perception::frame;
use zoneos_types::{Pose2D, ZoneId};

/// A resolved elevator move: the adjacent floor's zone and the robot's pose
/// re-expressed in that floor's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorMove {
    pub target: ZoneId,
    pub pose: Pose2D,
}

/// The elevator link serving `zone` whose anchor is closest to `pose`
/// (Euclidean distance, first-encountered wins ties).  `None` when no
/// elevator serves the zone.
pub fn closest_serving_link<'a>(
    graph: &'a ZoneGraph,
    zone: ZoneId,
    pose: Pose2D,
) -> Option<&'a ElevatorLink> {
    let mut best: Option<(&ElevatorLink, f64)> = None;
    for lift in graph.elevators_serving(zone) {
        let Some(anchor) = lift.anchor_for(zone) else {
            continue;
        };
        let d = pose.distance(&anchor);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((lift, d)),
        }
    }
    best.map(|(lift, _)| lift)
}

/// Resolve one floor up from `zone`.  `None` when unserved or already at the
/// topmost floor the nearest link reaches.
pub fn move_up(graph: &ZoneGraph, zone: ZoneId, pose: Pose2D) -> Option<ElevatorMove> {
    shifted(graph, zone, pose, true)
}

/// Resolve one floor down from `zone`.  `None` when unserved or already at
/// the bottom of the nearest link's floor range.
pub fn move_down(graph: &ZoneGraph, zone: ZoneId, pose: Pose2D) -> Option<ElevatorMove> {
    shifted(graph, zone, pose, false)
}

fn shifted(graph: &ZoneGraph, zone: ZoneId, pose: Pose2D, up: bool) -> Option<ElevatorMove> {
    let Some(lift) = closest_serving_link(graph, zone, pose) else {
        debug!(zone, "no elevator link serves this zone");
        return None;
    };
    let k = lift.floor_index(zone)?;

    let next = if up {
        if k + 1 >= lift.floors.len() {
            debug!(zone, "already at the link's topmost floor");
            return None;
        }
        k + 1
    } else {
        if k == 0 {
            debug!(zone, "already at the link's bottom floor");
            return None;
        }
        k - 1
    };

    Some(ElevatorMove {
        target: lift.floors[next],
        pose: frame::transform(lift.anchors[k], lift.anchors[next], pose),
    })
}

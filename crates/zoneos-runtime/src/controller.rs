//! [`ZoneController`] – serialized orchestration of zone transitions.
//!
//! One controller per robot.  It owns the shared mutable cell (current zone,
//! latest pose, crossing state) behind a single `tokio` mutex, so the two
//! entry points that mutate it — the pose stream and the elevator commands —
//! are naturally serialized, as the concurrency model requires.
//!
//! The commit sequence is identical for door crossings and elevator moves:
//!
//! 1. ask the map server to swap the active occupancy grid,
//! 2. wait the settling delay (the grid swap takes on the order of a
//!    second; submitting the pose earlier risks it being applied against
//!    the stale grid),
//! 3. submit the re-expressed pose to the localizer,
//! 4. publish a `ZoneChanged` event on the bus.
//!
//! Both notifications are fire-and-forget; nothing is retried or verified
//! here.  The pose estimate arriving right after a re-initialization jumps
//! by the frame swap, so it is consumed once without being straddle-tested
//! (otherwise the jump itself would look like a door crossing).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use zoneos_graph::ZoneGraph;
use zoneos_middleware::{GroundTruthMirror, Localizer, MapServer, Topic, ZoneEventBus};
use zoneos_perception::TransitionDetector;
use zoneos_types::{Event, EventPayload, Pose2D, ZoneError, ZoneId};

use crate::navigator;

/// Event source tag used on the bus.
const SOURCE: &str = "zoneos-runtime::controller";

/// Tunables of the controller.  Defaults match the production deployment;
/// tests shrink `settle_delay` to keep CI fast.
#[derive(Debug, Clone)]
pub struct ZoneControllerConfig {
    /// Net displacement past a door line required before a crossing commits.
    pub confirm_distance: f64,
    /// Pause between requesting the grid swap and submitting the new pose.
    pub settle_delay: Duration,
    /// Initial position standard deviation handed to the localizer (length
    /// units).
    pub position_std_dev: f64,
    /// Initial heading standard deviation handed to the localizer (radians,
    /// ~4 degrees).
    pub heading_std_dev: f64,
}

impl Default for ZoneControllerConfig {
    fn default() -> Self {
        Self {
            confirm_distance: 0.5,
            settle_delay: Duration::from_secs(1),
            position_std_dev: 0.2,
            heading_std_dev: 0.07,
        }
    }
}

/// The shared mutable cell.  Everything the pose stream and the elevator
/// entry points both touch lives here, behind one lock.
struct Shared {
    current_zone: ZoneId,
    detector: TransitionDetector,
    /// Most recent global pose estimate; `None` until the first delivery.
    last_pose: Option<Pose2D>,
    /// Set after every re-initialization: the next estimate is consumed to
    /// clear it and is never straddle-tested.
    reset_pending: bool,
}

/// Orchestrates the zone-transition engine against its collaborators.
pub struct ZoneController {
    graph: Arc<ZoneGraph>,
    bus: ZoneEventBus,
    map_server: Arc<dyn MapServer>,
    localizer: Arc<dyn Localizer>,
    mirror: Option<Arc<dyn GroundTruthMirror>>,
    config: ZoneControllerConfig,
    shared: Mutex<Shared>,
}

impl ZoneController {
    /// Build a controller starting in `start_zone`.
    ///
    /// Fails with [`ZoneError::UnknownZone`] when the start zone is not part
    /// of the graph.
    pub fn new(
        graph: Arc<ZoneGraph>,
        start_zone: &str,
        map_server: Arc<dyn MapServer>,
        localizer: Arc<dyn Localizer>,
        bus: ZoneEventBus,
        config: ZoneControllerConfig,
    ) -> Result<Self, ZoneError> {
        let current_zone = graph
            .find_zone_index(start_zone)
            .ok_or_else(|| ZoneError::UnknownZone {
                name: start_zone.to_string(),
            })?;

        let detector = TransitionDetector::with_confirm_distance(config.confirm_distance);
        Ok(Self {
            graph,
            bus,
            map_server,
            localizer,
            mirror: None,
            config,
            shared: Mutex::new(Shared {
                current_zone,
                detector,
                last_pose: None,
                reset_pending: false,
            }),
        })
    }

    /// Attach the simulation-only ground-truth mirror.
    pub fn with_ground_truth_mirror(mut self, mirror: Arc<dyn GroundTruthMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// The zone the robot is currently localized in.
    pub async fn current_zone(&self) -> ZoneId {
        self.shared.lock().await.current_zone
    }

    pub async fn current_zone_name(&self) -> Option<String> {
        let id = self.current_zone().await;
        self.graph.zone_name(id).map(str::to_string)
    }

    /// Feed one global pose estimate from the localization collaborator.
    ///
    /// Each delivery becomes the `new` pose of a motion step whose `old`
    /// pose is the previous delivery.  A committed crossing runs the full
    /// switch sequence before this call returns.
    pub async fn handle_pose(&self, pose: Pose2D, timestamp: DateTime<Utc>) {
        let mut shared = self.shared.lock().await;

        if let Some(mirror) = &self.mirror {
            mirror.mirror(pose).await;
        }
        self.bus.publish(
            Topic::PoseStream,
            Event::at(timestamp, SOURCE, EventPayload::PoseUpdate(pose)),
        );

        if shared.reset_pending {
            // This estimate carries the re-initialization jump; testing it
            // against a door line would fake a crossing.
            debug!("pose consumed to clear reset_pending");
            shared.reset_pending = false;
            shared.last_pose = Some(pose);
            return;
        }

        let Some(old) = shared.last_pose.replace(pose) else {
            return;
        };

        let zone = shared.current_zone;
        if let Some(switch) = shared.detector.update(&self.graph, zone, old, pose) {
            self.commit(&mut shared, switch.target, switch.pose).await;
        }
    }

    /// Take the nearest elevator one floor up.  Returns the new zone, or
    /// `None` when nothing happened (no serving link, topmost floor, or no
    /// pose estimate yet).
    pub async fn move_up(&self) -> Option<ZoneId> {
        self.elevator_move(true).await
    }

    /// Take the nearest elevator one floor down.  Same no-op semantics as
    /// [`ZoneController::move_up`].
    pub async fn move_down(&self) -> Option<ZoneId> {
        self.elevator_move(false).await
    }

    async fn elevator_move(&self, up: bool) -> Option<ZoneId> {
        let mut shared = self.shared.lock().await;

        let Some(pose) = shared.last_pose else {
            debug!("elevator move ignored: no pose estimate yet");
            return None;
        };

        let zone = shared.current_zone;
        let mv = if up {
            navigator::move_up(&self.graph, zone, pose)
        } else {
            navigator::move_down(&self.graph, zone, pose)
        }?;

        // The frame is about to change under any pending door crossing.
        shared.detector.cancel();
        self.commit(&mut shared, mv.target, mv.pose).await;
        Some(mv.target)
    }

    /// The shared commit sequence: grid swap, settle, re-initialize,
    /// notify.  Runs with the lock held so no pose update interleaves.
    async fn commit(&self, shared: &mut Shared, target: ZoneId, pose: Pose2D) {
        let Some(zone_name) = self.graph.zone_name(target) else {
            warn!(zone = target, "commit dropped: target zone not in graph");
            return;
        };

        info!(zone = zone_name, x = pose.x, y = pose.y, "switching zone");
        self.map_server.request_zone_switch(zone_name).await;
        tokio::time::sleep(self.config.settle_delay).await;
        self.localizer
            .reinitialize(
                pose,
                self.config.position_std_dev,
                self.config.heading_std_dev,
            )
            .await;

        shared.current_zone = target;
        shared.last_pose = Some(pose);
        shared.reset_pending = true;

        self.bus.publish(
            Topic::ZoneEvents,
            Event::new(
                SOURCE,
                EventPayload::ZoneChanged {
                    zone: zone_name.to_string(),
                },
            ),
        );
    }
}

//! Collaborator boundaries of the zone-transition engine.
//!
//! All three traits are asynchronous fire-and-forget notifications: the
//! engine consumes no return value and never retries.  Failures on the far
//! side are collaborator-reported, not part of this core's error taxonomy.

use async_trait::async_trait;
use zoneos_types::Pose2D;

/// The map-serving collaborator: owns the per-zone occupancy grids and swaps
/// the active grid on request.
///
/// A grid swap takes time; the runtime inserts the mandatory settling delay
/// between this request and the follow-up pose re-initialization.
#[async_trait]
pub trait MapServer: Send + Sync {
    /// Ask for `zone_name`'s occupancy grid to become the active one.
    async fn request_zone_switch(&self, zone_name: &str);
}

/// The pose-estimation collaborator: accepts re-initialization commands
/// after a frame swap.
#[async_trait]
pub trait Localizer: Send + Sync {
    /// Restart estimation at `pose` (in the newly active zone's frame) with
    /// the given initial standard deviations.
    async fn reinitialize(&self, pose: Pose2D, position_std_dev: f64, heading_std_dev: f64);
}

/// Simulation-only pass-through: mirrors each global pose estimate to the
/// simulated robot's ground-truth channel.  Never consulted by the
/// transition algorithm itself.
#[async_trait]
pub trait GroundTruthMirror: Send + Sync {
    async fn mirror(&self, pose: Pose2D);
}

//! Recording stub collaborators for headless tests and CI.
//!
//! Each stub implements one collaborator trait, records what it was asked to
//! do, and always succeeds.  An optional shared [`CallJournal`] records the
//! interleaving across collaborators so tests can assert ordering (the zone
//! switch must precede the pose re-initialization).

use std::sync::{Arc, Mutex};
use zoneos_types::Pose2D;

use crate::adapter::{GroundTruthMirror, Localizer, MapServer};
use async_trait::async_trait;

/// Shared, ordered log of collaborator calls.
#[derive(Clone, Default)]
pub struct CallJournal(Arc<Mutex<Vec<String>>>);

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, entry: String) {
        self.0.lock().expect("journal lock poisoned").push(entry);
    }

    /// Snapshot of all entries in call order.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock poisoned").clone()
    }
}

/// Map-server stub: records requested zone switches.
pub struct SimMapServer {
    journal: CallJournal,
    switches: Mutex<Vec<String>>,
}

impl SimMapServer {
    pub fn new(journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            journal,
            switches: Mutex::new(Vec::new()),
        })
    }

    /// Zone names switched to, in request order.
    pub fn switches(&self) -> Vec<String> {
        self.switches.lock().expect("sim lock poisoned").clone()
    }
}

#[async_trait]
impl MapServer for SimMapServer {
    async fn request_zone_switch(&self, zone_name: &str) {
        self.journal.record(format!("switch:{zone_name}"));
        self.switches
            .lock()
            .expect("sim lock poisoned")
            .push(zone_name.to_string());
    }
}

/// Localizer stub: records re-initialization commands.
pub struct SimLocalizer {
    journal: CallJournal,
    reinits: Mutex<Vec<(Pose2D, f64, f64)>>,
}

impl SimLocalizer {
    pub fn new(journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            journal,
            reinits: Mutex::new(Vec::new()),
        })
    }

    /// Submitted `(pose, position_std_dev, heading_std_dev)` triples.
    pub fn reinits(&self) -> Vec<(Pose2D, f64, f64)> {
        self.reinits.lock().expect("sim lock poisoned").clone()
    }
}

#[async_trait]
impl Localizer for SimLocalizer {
    async fn reinitialize(&self, pose: Pose2D, position_std_dev: f64, heading_std_dev: f64) {
        self.journal.record(format!("reinit:{:.3},{:.3}", pose.x, pose.y));
        self.reinits
            .lock()
            .expect("sim lock poisoned")
            .push((pose, position_std_dev, heading_std_dev));
    }
}

/// Ground-truth mirror stub: records mirrored poses.
#[derive(Default)]
pub struct SimGroundTruthMirror {
    mirrored: Mutex<Vec<Pose2D>>,
}

impl SimGroundTruthMirror {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mirrored(&self) -> Vec<Pose2D> {
        self.mirrored.lock().expect("sim lock poisoned").clone()
    }
}

#[async_trait]
impl GroundTruthMirror for SimGroundTruthMirror {
    async fn mirror(&self, pose: Pose2D) {
        self.mirrored.lock().expect("sim lock poisoned").push(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn map_server_records_switches() {
        let journal = CallJournal::new();
        let map = SimMapServer::new(journal);
        map.request_zone_switch("floor_1").await;
        map.request_zone_switch("floor_2").await;
        assert_eq!(map.switches(), vec!["floor_1", "floor_2"]);
    }

    #[tokio::test]
    async fn localizer_records_reinit_parameters() {
        let journal = CallJournal::new();
        let loc = SimLocalizer::new(journal);
        loc.reinitialize(Pose2D::new(1.0, 2.0, 0.5), 0.2, 0.07).await;

        let reinits = loc.reinits();
        assert_eq!(reinits.len(), 1);
        assert!((reinits[0].0.x - 1.0).abs() < 1e-12);
        assert!((reinits[0].1 - 0.2).abs() < 1e-12);
        assert!((reinits[0].2 - 0.07).abs() < 1e-12);
    }

    #[tokio::test]
    async fn journal_preserves_cross_collaborator_order() {
        let journal = CallJournal::new();
        let map = SimMapServer::new(journal.clone());
        let loc = SimLocalizer::new(journal.clone());

        map.request_zone_switch("floor_1").await;
        loc.reinitialize(Pose2D::new(0.0, 0.0, 0.0), 0.2, 0.07).await;

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("switch:"));
        assert!(entries[1].starts_with("reinit:"));
    }

    #[tokio::test]
    async fn mirror_records_poses() {
        let mirror = SimGroundTruthMirror::new();
        mirror.mirror(Pose2D::new(3.0, -1.0, 0.0)).await;
        assert_eq!(mirror.mirrored().len(), 1);
    }
}

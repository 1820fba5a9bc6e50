//! `zoneos-types` – shared vocabulary of the zone-transition engine.
//!
//! Robots localize inside one *zone* (one locally-consistent occupancy grid)
//! at a time.  This crate defines the primitives every other ZoneOS crate
//! speaks:
//!
//! - [`Pose2D`] / [`Point`] – planar pose and position with the angle kept
//!   normalized to `(-π, π]`.
//! - [`ZoneId`] – stable 0-based zone index, assigned at graph-load time.
//! - [`Event`] / [`EventPayload`] – the envelope routed over the internal
//!   event bus (pose fan-out, zone-change notifications).
//! - [`ZoneError`] – the load-time error taxonomy.  Geometric tests have no
//!   error path: an inconclusive test is simply "no crossing detected".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use thiserror::Error;
use uuid::Uuid;

/// Stable index of a zone within the session's zone graph.  Assigned by
/// input order at load time; never reused or remapped while the process runs.
pub type ZoneId = usize;

/// A planar position, used for door segment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A planar pose expressed in one zone's local frame.
///
/// `theta` is measured counter-clockwise from +X and is kept normalized to
/// `(-π, π]` by every constructor and operation in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    /// Create a pose; `theta` is wrapped into `(-π, π]`.
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// The position component, dropping the heading.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance between the position components.
    pub fn distance(&self, other: &Pose2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Wrap an angle into the canonical `(-π, π]` interval.
pub fn normalize_angle(theta: f64) -> f64 {
    let mut t = theta % TAU;
    if t <= -PI {
        t += TAU;
    } else if t > PI {
        t -= TAU;
    }
    t
}

/// Unified event wrapper for the internal event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g. "zoneos-runtime::controller"
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    /// Build an event stamped with the current time.
    pub fn new(source: impl Into<String>, payload: EventPayload) -> Self {
        Self::at(Utc::now(), source, payload)
    }

    /// Build an event carrying an externally supplied timestamp (e.g. the
    /// localization provider's own stamp on a pose estimate).
    pub fn at(timestamp: DateTime<Utc>, source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            source: source.into(),
            payload,
        }
    }
}

/// Variants of data routed over the internal event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    /// A global pose estimate, re-published for observers.
    PoseUpdate(Pose2D),
    /// The active zone changed (door crossing committed or elevator move).
    ZoneChanged { zone: String },
}

/// Load-time error taxonomy.  All variants are fatal at startup: no partial
/// zone graph is ever made available.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ZoneError {
    #[error("duplicate zone name: {name}")]
    DuplicateZoneName { name: String },

    #[error("link references unknown zone: {name}")]
    UnknownZone { name: String },

    #[error("invalid link spec: {reason}")]
    InvalidLinkSpec { reason: String },

    #[error("graph description unreadable: {0}")]
    GraphFile(String),
}

//! `zoneos-runtime` – the orchestration layer of the zone-transition engine.
//!
//! # Modules
//!
//! - [`controller`] – [`ZoneController`][controller::ZoneController]: owns
//!   the current zone, the latest pose and the crossing state behind a
//!   single lock; feeds pose updates into the transition detector, runs the
//!   commit sequence (zone switch → settling delay → pose
//!   re-initialization), and exposes the elevator entry points.
//! - [`navigator`] – pure elevator resolution: nearest serving link, one
//!   floor up or down, boundary no-ops.
//! - [`telemetry`] – `tracing` subscriber initialisation.

pub mod controller;
pub mod navigator;
pub mod telemetry;

pub use controller::{ZoneController, ZoneControllerConfig};
pub use navigator::{ElevatorMove, closest_serving_link, move_down, move_up};

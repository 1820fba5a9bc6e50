//! `zoneos-perception` – the geometric core of the zone-transition engine.
//!
//! Turns a stream of noisy global pose estimates into committed zone
//! transitions.
//!
//! # Modules
//!
//! - [`geometry`] – cross-product straddle test, two-sided segment
//!   intersection, and door-segment anchor poses.
//! - [`frame`] – [`transform`][frame::transform]: the rigid 2-D frame swap
//!   that re-expresses a pose in the destination zone's local frame while
//!   preserving its pose relative to the transition feature.
//! - [`detector`] – [`TransitionDetector`][detector::TransitionDetector]:
//!   the Idle/Crossing state machine with confirmation-distance hysteresis
//!   that recognises physical door crossings and rejects estimator jitter.

pub mod detector;
pub mod frame;
pub mod geometry;

pub use detector::{TransitionDetector, ZoneSwitch};

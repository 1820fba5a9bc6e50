//! `zoneos-middleware` – routing and collaborator boundaries.
//!
//! The transition engine never talks to the localization stack or the map
//! server directly; it goes through the adapter traits defined here, and it
//! publishes its observable output on a small topic-routed event bus.
//!
//! # Modules
//!
//! - [`bus`] – [`ZoneEventBus`][bus::ZoneEventBus]: topic-based
//!   publish/subscribe on Tokio broadcast channels (pose fan-out and
//!   zone-change notifications).
//! - [`adapter`] – the fire-and-forget collaborator traits:
//!   [`MapServer`][adapter::MapServer], [`Localizer`][adapter::Localizer]
//!   and the simulation-only [`GroundTruthMirror`][adapter::GroundTruthMirror].
//! - [`sim`] – recording stub collaborators so the full engine runs in
//!   headless tests and CI without a real localization stack.

pub mod adapter;
pub mod bus;
pub mod sim;

pub use adapter::{GroundTruthMirror, Localizer, MapServer};
pub use bus::{Topic, TopicReceiver, ZoneEventBus};
pub use sim::{CallJournal, SimGroundTruthMirror, SimLocalizer, SimMapServer};

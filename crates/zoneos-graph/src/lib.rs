//! `zoneos-graph` – the zone graph data model.
//!
//! A building is modeled as a graph of zones (one locally-consistent
//! occupancy grid each) connected by physical transition features.
//!
//! # Modules
//!
//! - [`graph`] – [`ZoneGraph`][graph::ZoneGraph]: zones plus [`Link`][graph::Link]s
//!   (a tagged union over door and elevator payloads) and read-only lookup
//!   helpers.  The graph is loaded once and never mutated at runtime.
//! - [`loader`] – validated construction from an authored
//!   [`ZoneGraphSpec`][loader::ZoneGraphSpec], either built in memory or
//!   deserialized from a TOML description file.  All validation failures are
//!   fatal; no partial graph is ever produced.

pub mod graph;
pub mod loader;

pub use graph::{DoorLink, DoorSegment, ElevatorLink, Link, LinkKind, Zone, ZoneGraph};
pub use loader::{LinkSpec, ZoneGraphSpec};

//! Validated zone-graph loading.
//!
//! The graph is authored offline (graph builder / editor) as a zone name
//! list plus link specifications and loaded exactly once at startup.  Every
//! invariant violation is fatal: the loader returns the first
//! [`ZoneError`] encountered and no partial graph is ever made available.
//!
//! Two entry points:
//!
//! - [`ZoneGraph::load`] – from an in-memory [`ZoneGraphSpec`].
//! - [`ZoneGraph::load_file`] – from a TOML description file:
//!
//! ```toml
//! zones = ["lobby", "floor_1"]
//!
//! [[links]]
//! kind = "door"
//! zones = ["lobby", "floor_1"]
//! points = [
//!     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0],   # segment in lobby's frame
//!     [0.0, 5.0, 0.0], [1.0, 5.0, 0.0],   # segment in floor_1's frame
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use zoneos_types::{Point, Pose2D, ZoneError, ZoneId};

use crate::graph::{DoorLink, DoorSegment, ElevatorLink, Link, LinkKind, Zone, ZoneGraph};

// ────────────────────────────────────────────────────────────────────────────
// Authored description
// ────────────────────────────────────────────────────────────────────────────

/// One authored link: kind, served zone names, and the point list.
///
/// Point-count invariants (checked at load):
/// - Door: exactly 2 zones and 4 points; `points[2k]`, `points[2k+1]` are the
///   door segment endpoints in `zones[k]`'s frame (the third component is
///   ignored for doors).
/// - Elevator: ≥ 2 zones and one `[x, y, theta]` call/anchor pose per zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub kind: LinkKind,
    pub zones: Vec<String>,
    pub points: Vec<[f64; 3]>,
}

/// A complete authored zone-graph description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneGraphSpec {
    pub zones: Vec<String>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

impl ZoneGraph {
    /// Build a validated graph from an authored description.
    pub fn load(spec: &ZoneGraphSpec) -> Result<Self, ZoneError> {
        let zones = load_zones(&spec.zones)?;
        let links = spec
            .links
            .iter()
            .map(|l| load_link(&zones, l))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            zones = zones.len(),
            links = links.len(),
            "zone graph loaded"
        );
        Ok(ZoneGraph { zones, links })
    }

    /// Read and validate a TOML graph description file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ZoneError::GraphFile(format!("{}: {e}", path.display())))?;
        let spec: ZoneGraphSpec = toml::from_str(&text)
            .map_err(|e| ZoneError::GraphFile(format!("{}: {e}", path.display())))?;
        Self::load(&spec)
    }
}

/// Assign stable zone indices by input order; duplicate names are fatal.
fn load_zones(names: &[String]) -> Result<Vec<Zone>, ZoneError> {
    let mut seen = HashSet::new();
    names
        .iter()
        .enumerate()
        .map(|(id, name)| {
            if !seen.insert(name.as_str()) {
                return Err(ZoneError::DuplicateZoneName { name: name.clone() });
            }
            Ok(Zone {
                id,
                name: name.clone(),
            })
        })
        .collect()
}

fn resolve_zone(zones: &[Zone], name: &str) -> Result<ZoneId, ZoneError> {
    zones
        .iter()
        .position(|z| z.name == name)
        .ok_or_else(|| ZoneError::UnknownZone {
            name: name.to_string(),
        })
}

fn load_link(zones: &[Zone], spec: &LinkSpec) -> Result<Link, ZoneError> {
    let keys = spec
        .zones
        .iter()
        .map(|name| resolve_zone(zones, name))
        .collect::<Result<Vec<_>, _>>()?;

    match spec.kind {
        LinkKind::Door => {
            if keys.len() != 2 {
                return Err(ZoneError::InvalidLinkSpec {
                    reason: format!("door must connect exactly 2 zones, got {}", keys.len()),
                });
            }
            if spec.points.len() != 4 {
                return Err(ZoneError::InvalidLinkSpec {
                    reason: format!(
                        "door needs 2 segment endpoints per zone (4 points), got {}",
                        spec.points.len()
                    ),
                });
            }
            let seg = |k: usize| DoorSegment {
                p1: Point::new(spec.points[2 * k][0], spec.points[2 * k][1]),
                p2: Point::new(spec.points[2 * k + 1][0], spec.points[2 * k + 1][1]),
            };
            Ok(Link::Door(DoorLink {
                zones: [keys[0], keys[1]],
                segments: [seg(0), seg(1)],
            }))
        }
        LinkKind::Elevator => {
            if keys.len() < 2 {
                return Err(ZoneError::InvalidLinkSpec {
                    reason: format!("elevator must serve at least 2 zones, got {}", keys.len()),
                });
            }
            if spec.points.len() != keys.len() {
                return Err(ZoneError::InvalidLinkSpec {
                    reason: format!(
                        "elevator needs one anchor pose per zone, got {} anchors for {} zones",
                        spec.points.len(),
                        keys.len()
                    ),
                });
            }
            let anchors = spec
                .points
                .iter()
                .map(|p| Pose2D::new(p[0], p[1], p[2]))
                .collect();
            Ok(Link::Elevator(ElevatorLink {
                floors: keys,
                anchors,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn door_spec(a: &str, b: &str) -> LinkSpec {
        LinkSpec {
            kind: LinkKind::Door,
            zones: names(&[a, b]),
            points: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 5.0, 0.0],
                [1.0, 5.0, 0.0],
            ],
        }
    }

    fn elevator_spec(floors: &[&str]) -> LinkSpec {
        LinkSpec {
            kind: LinkKind::Elevator,
            zones: names(floors),
            points: floors.iter().map(|_| [0.0, 0.0, 0.0]).collect(),
        }
    }

    #[test]
    fn load_assigns_stable_indices_by_input_order() {
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "floor_1", "floor_2"]),
            links: vec![],
        };
        let g = ZoneGraph::load(&spec).unwrap();
        assert_eq!(g.zones()[0].name, "lobby");
        assert_eq!(g.zones()[2].id, 2);
        assert_eq!(g.find_zone_index("floor_1"), Some(1));
    }

    #[test]
    fn duplicate_zone_name_is_fatal() {
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "lobby"]),
            links: vec![],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::DuplicateZoneName { name }) if name == "lobby"
        ));
    }

    #[test]
    fn unknown_zone_reference_is_fatal() {
        let spec = ZoneGraphSpec {
            zones: names(&["lobby"]),
            links: vec![door_spec("lobby", "mezzanine")],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::UnknownZone { name }) if name == "mezzanine"
        ));
    }

    #[test]
    fn door_with_wrong_point_count_is_fatal() {
        let mut bad = door_spec("lobby", "floor_1");
        bad.points.pop();
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "floor_1"]),
            links: vec![bad],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::InvalidLinkSpec { .. })
        ));
    }

    #[test]
    fn door_with_wrong_degree_is_fatal() {
        let mut bad = door_spec("lobby", "floor_1");
        bad.zones.push("floor_2".to_string());
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "floor_1", "floor_2"]),
            links: vec![bad],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::InvalidLinkSpec { .. })
        ));
    }

    #[test]
    fn elevator_with_single_floor_is_fatal() {
        let spec = ZoneGraphSpec {
            zones: names(&["lobby"]),
            links: vec![elevator_spec(&["lobby"])],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::InvalidLinkSpec { .. })
        ));
    }

    #[test]
    fn elevator_anchor_count_must_match_floor_count() {
        let mut bad = elevator_spec(&["lobby", "floor_1"]);
        bad.points.push([0.0, 0.0, 0.0]);
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "floor_1"]),
            links: vec![bad],
        };
        assert!(matches!(
            ZoneGraph::load(&spec),
            Err(ZoneError::InvalidLinkSpec { .. })
        ));
    }

    #[test]
    fn valid_graph_retains_link_payloads() {
        let spec = ZoneGraphSpec {
            zones: names(&["lobby", "floor_1", "floor_2"]),
            links: vec![
                door_spec("lobby", "floor_1"),
                elevator_spec(&["lobby", "floor_1", "floor_2"]),
            ],
        };
        let g = ZoneGraph::load(&spec).unwrap();
        assert_eq!(g.links().len(), 2);

        let door = g.doors_serving(0).next().unwrap();
        let seg = door.segment_for(1).unwrap();
        assert!((seg.p2.x - 1.0).abs() < 1e-12);
        assert!((seg.p2.y - 5.0).abs() < 1e-12);

        let lift = g.elevators_serving(2).next().unwrap();
        assert_eq!(lift.floors, vec![0, 1, 2]);
    }

    #[test]
    fn load_file_parses_authored_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
zones = ["lobby", "floor_1"]

[[links]]
kind = "door"
zones = ["lobby", "floor_1"]
points = [
    [0.0, 0.0, 0.0], [1.0, 0.0, 0.0],
    [0.0, 5.0, 0.0], [1.0, 5.0, 0.0],
]

[[links]]
kind = "elevator"
zones = ["lobby", "floor_1"]
points = [[2.0, 3.0, 0.0], [2.0, 3.0, 0.0]]
"#
        )
        .unwrap();

        let g = ZoneGraph::load_file(file.path()).unwrap();
        assert_eq!(g.zones().len(), 2);
        assert_eq!(g.links_of_kind(LinkKind::Door).count(), 1);
        assert_eq!(g.links_of_kind(LinkKind::Elevator).count(), 1);
    }

    #[test]
    fn load_file_reports_missing_file() {
        let err = ZoneGraph::load_file("/nonexistent/graph.toml").unwrap_err();
        assert!(matches!(err, ZoneError::GraphFile(_)));
    }
}

//! Zone graph data model: zones, links, and lookup helpers.
//!
//! Everything here is pure data.  The graph is constructed once by the
//! [`loader`][crate::loader] and afterwards shared read-only across the
//! transition detector and the elevator navigator.

use serde::{Deserialize, Serialize};
use zoneos_types::{Point, Pose2D, ZoneId};

// ────────────────────────────────────────────────────────────────────────────
// Zones
// ────────────────────────────────────────────────────────────────────────────

/// One locally-consistent map/coordinate frame.
///
/// Zones are created once at graph-load time from an ordered name list and
/// are never renamed or removed while the process runs.  The `id` is the
/// zone's stable position in that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    /// Unique human-readable name; also the name of the externally-owned
    /// occupancy grid this zone correlates with.
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Links
// ────────────────────────────────────────────────────────────────────────────

/// Discriminant of a [`Link`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Two-zone link crossed geometrically by continuous motion.
    Door,
    /// Multi-floor link navigated by explicit command.
    Elevator,
}

/// A door's segment endpoints, expressed in one zone's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSegment {
    pub p1: Point,
    pub p2: Point,
}

/// A door between exactly two zones.
///
/// `segments[k]` holds the same physical door expressed in the local frame
/// of `zones[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorLink {
    pub zones: [ZoneId; 2],
    pub segments: [DoorSegment; 2],
}

impl DoorLink {
    /// Which side of the link `zone` is on (0 or 1), if it is served at all.
    pub fn side_of(&self, zone: ZoneId) -> Option<usize> {
        self.zones.iter().position(|&z| z == zone)
    }

    /// The door segment expressed in `zone`'s local frame.
    pub fn segment_for(&self, zone: ZoneId) -> Option<&DoorSegment> {
        self.side_of(zone).map(|k| &self.segments[k])
    }

    /// The zone on the opposite side of the door from `zone`.
    pub fn other_zone(&self, zone: ZoneId) -> Option<ZoneId> {
        self.side_of(zone).map(|k| self.zones[1 - k])
    }
}

/// An elevator serving two or more floors.
///
/// `floors` order encodes vertical adjacency: `floors[k]` and `floors[k+1]`
/// are reachable from each other by one elevator move.  `anchors[k]` is the
/// call/anchor pose in `floors[k]`'s local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorLink {
    pub floors: Vec<ZoneId>,
    pub anchors: Vec<Pose2D>,
}

impl ElevatorLink {
    /// Index of `zone` within the floor order.
    pub fn floor_index(&self, zone: ZoneId) -> Option<usize> {
        self.floors.iter().position(|&z| z == zone)
    }

    /// The call/anchor pose for `zone`, in `zone`'s local frame.
    pub fn anchor_for(&self, zone: ZoneId) -> Option<Pose2D> {
        self.floor_index(zone).map(|k| self.anchors[k])
    }

    pub fn serves(&self, zone: ZoneId) -> bool {
        self.floor_index(zone).is_some()
    }
}

/// A graph edge modeling a physical transition feature between zones.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Door(DoorLink),
    Elevator(ElevatorLink),
}

impl Link {
    pub fn kind(&self) -> LinkKind {
        match self {
            Link::Door(_) => LinkKind::Door,
            Link::Elevator(_) => LinkKind::Elevator,
        }
    }

    /// Whether `zone` is one of the zones this link connects.
    pub fn serves(&self, zone: ZoneId) -> bool {
        match self {
            Link::Door(door) => door.side_of(zone).is_some(),
            Link::Elevator(lift) => lift.serves(zone),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ZoneGraph
// ────────────────────────────────────────────────────────────────────────────

/// The session's zone graph: ordered zones plus transition links.
///
/// Owned for the process lifetime and read-only after load; constructed via
/// [`ZoneGraph::load`][crate::loader] only, so every link in here has already
/// passed the degree/point-count/zone-reference invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGraph {
    pub(crate) zones: Vec<Zone>,
    pub(crate) links: Vec<Link>,
}

impl ZoneGraph {
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Resolve a zone name to its stable index.
    pub fn find_zone_index(&self, name: &str) -> Option<ZoneId> {
        self.zones.iter().position(|z| z.name == name)
    }

    /// The name of zone `id`, if the id is valid.
    pub fn zone_name(&self, id: ZoneId) -> Option<&str> {
        self.zones.get(id).map(|z| z.name.as_str())
    }

    /// Restartable lazy filter over the links of one kind.
    pub fn links_of_kind(&self, kind: LinkKind) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.kind() == kind)
    }

    /// All door links with `zone` on one of their two sides, in authoring
    /// order.
    pub fn doors_serving(&self, zone: ZoneId) -> impl Iterator<Item = &DoorLink> {
        self.links.iter().filter_map(move |l| match l {
            Link::Door(door) if door.side_of(zone).is_some() => Some(door),
            _ => None,
        })
    }

    /// All elevator links serving `zone`, in authoring order.
    pub fn elevators_serving(&self, zone: ZoneId) -> impl Iterator<Item = &ElevatorLink> {
        self.links.iter().filter_map(move |l| match l {
            Link::Elevator(lift) if lift.serves(zone) => Some(lift),
            _ => None,
        })
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{coordinate::Coordinate, waypoint::Waypoint, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Before,
    After,
}

/// Where a polygon's points are spliced into the waypoint sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub waypoint_id: Id<Waypoint>,
    pub side: Side,
}

impl Anchor {
    pub fn new(waypoint_id: Id<Waypoint>, side: Side) -> Self {
        Self { waypoint_id, side }
    }

    /// Index at which the polygon's points start, given the current index of
    /// the anchor waypoint.
    pub fn insert_index(&self, target_index: usize) -> usize {
        match self.side {
            Side::Before => target_index,
            Side::After => target_index + 1,
        }
    }
}

/// A polygon that has been drawn but not yet imported into the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingPolygon {
    pub id: Id<Polygon>,
    pub coordinates: Vec<Coordinate>,
    pub anchor: Anchor,
}

/// Record of an imported polygon, kept for the legend. Its points live on as
/// ordinary waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportedPolygon {
    pub id: Id<Polygon>,
    pub coordinates: Vec<Coordinate>,
    pub anchor_side: Side,
    pub anchor_waypoint_id: Id<Waypoint>,
}

impl From<PendingPolygon> for ImportedPolygon {
    fn from(pending: PendingPolygon) -> Self {
        ImportedPolygon {
            id: pending.id,
            coordinates: pending.coordinates,
            anchor_side: pending.anchor.side,
            anchor_waypoint_id: pending.anchor.waypoint_id,
        }
    }
}

/// Marker type for polygon ids.
#[derive(JsonSchema)]
pub struct Polygon;

impl HasId for Polygon {
    type IdType = u64;
}

impl ExampleData for PendingPolygon {
    fn example_data() -> Self {
        PendingPolygon {
            id: Id::new(0),
            coordinates: vec![
                Coordinate::new(10.120, 54.320),
                Coordinate::new(10.125, 54.320),
                Coordinate::new(10.125, 54.325),
                Coordinate::new(10.120, 54.325),
            ],
            anchor: Anchor::new(Id::new(0), Side::After),
        }
    }
}

impl ExampleData for ImportedPolygon {
    fn example_data() -> Self {
        PendingPolygon::example_data().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_index() {
        let before = Anchor::new(Id::new(3), Side::Before);
        let after = Anchor::new(Id::new(3), Side::After);
        assert_eq!(before.insert_index(4), 4);
        assert_eq!(after.insert_index(4), 5);
    }

    #[test]
    fn test_imported_keeps_anchor() {
        let pending = PendingPolygon::example_data();
        let imported = ImportedPolygon::from(pending.clone());
        assert_eq!(imported.id, pending.id);
        assert_eq!(imported.coordinates, pending.coordinates);
        assert_eq!(imported.anchor_side, Side::After);
        assert_eq!(imported.anchor_waypoint_id, pending.anchor.waypoint_id);
    }

    #[test]
    fn test_side_wire_format() {
        let json = serde_json::to_string(&Side::Before).unwrap();
        assert_eq!(json, "\"before\"");
        let side: Side = serde_json::from_str("\"after\"").unwrap();
        assert_eq!(side, Side::After);
    }
}

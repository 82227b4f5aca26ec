use model::{
    coordinate::Coordinate,
    polygon::{ImportedPolygon, PendingPolygon},
    waypoint::Waypoint,
    ExampleData,
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::Id;

use crate::{editor::EditorState, sequence::WaypointSequence, SequenceEditor};

fn label(prefix: &str, index: usize) -> String {
    format!("{}({:02})", prefix, index)
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaypointListing {
    pub label: String,
    pub id: Id<Waypoint>,
    pub coordinates: Coordinate,
    pub distance_to_next: Option<f64>,
}

impl WaypointListing {
    pub fn list(sequence: &WaypointSequence) -> Vec<Self> {
        sequence
            .iter()
            .enumerate()
            .map(|(index, waypoint)| WaypointListing {
                label: label("WP", index),
                id: waypoint.id,
                coordinates: waypoint.coordinates,
                distance_to_next: waypoint.distance_to_next,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolygonPointListing {
    pub label: String,
    pub coordinates: Coordinate,
}

impl PolygonPointListing {
    pub fn list(points: &[Coordinate]) -> Vec<Self> {
        points
            .iter()
            .enumerate()
            .map(|(index, coordinates)| PolygonPointListing {
                label: label("P", index),
                coordinates: *coordinates,
            })
            .collect()
    }
}

/// Read-only view of the whole mission for the display layer.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionSnapshot {
    pub state: EditorState,
    pub waypoints: Vec<WaypointListing>,
    /// Points of the polygon being drawn right now.
    pub ring: Vec<PolygonPointListing>,
    pub pending_polygon: Option<PendingPolygon>,
    pub pending_points: Vec<PolygonPointListing>,
    pub imported_polygons: Vec<ImportedPolygon>,
    pub total_distance: f64,
}

impl MissionSnapshot {
    pub fn of(editor: &SequenceEditor) -> Self {
        let pending_polygon = editor.pending_polygon().cloned();
        let pending_points = pending_polygon
            .as_ref()
            .map(|polygon| PolygonPointListing::list(&polygon.coordinates))
            .unwrap_or_default();
        Self {
            state: editor.state(),
            waypoints: WaypointListing::list(editor.waypoints()),
            ring: PolygonPointListing::list(editor.ring_in_progress()),
            pending_polygon,
            pending_points,
            imported_polygons: editor.imported_polygons().to_vec(),
            total_distance: editor.waypoints().total_distance(),
        }
    }
}

impl ExampleData for MissionSnapshot {
    fn example_data() -> Self {
        let waypoint = Waypoint::example_data();
        Self {
            state: EditorState::Idle,
            waypoints: vec![WaypointListing {
                label: label("WP", 0),
                id: waypoint.id,
                coordinates: waypoint.coordinates,
                distance_to_next: None,
            }],
            ring: vec![],
            pending_polygon: None,
            pending_points: vec![],
            imported_polygons: vec![ImportedPolygon::example_data()],
            total_distance: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use model::polygon::Side;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_labels_are_zero_padded() {
        assert_eq!(label("WP", 3), "WP(03)");
        assert_eq!(label("P", 12), "P(12)");
    }

    #[test]
    fn test_snapshot_of_staged_polygon() {
        let mut editor = SequenceEditor::new();
        editor.begin_line_draw().unwrap();
        editor.on_coordinate_add(Coordinate::new(0.0, 0.0)).unwrap();
        editor.on_coordinate_add(Coordinate::new(1.0, 0.0)).unwrap();
        editor.on_drawing_complete().unwrap();
        let anchor = editor.waypoints().get(0).unwrap().id;
        editor.request_insert_polygon(anchor, Side::After).unwrap();
        for (longitude, latitude) in [(0.0, 1.0), (1.0, 1.0), (1.0, 2.0)] {
            editor
                .on_coordinate_add(Coordinate::new(longitude, latitude))
                .unwrap();
        }
        editor.on_drawing_complete().unwrap();

        let snapshot = editor.snapshot();

        assert_eq!(snapshot.waypoints.len(), 2);
        assert_eq!(snapshot.waypoints[1].label, "WP(01)");
        assert_eq!(snapshot.pending_points.len(), 3);
        assert_eq!(snapshot.pending_points[2].label, "P(02)");
        assert!(snapshot.ring.is_empty());
        assert!(snapshot.total_distance > 111_000.0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], json!({ "mode": "polygonStaged" }));
        assert!(json["waypoints"][1].get("distanceToNext").is_none());
        assert!(json["waypoints"][0].get("distanceToNext").is_some());
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{
    coordinate::{geodesic_distance, Coordinate},
    ExampleData,
};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: Id<Waypoint>,
    pub coordinates: Coordinate,
    /// Metres to the next waypoint. Derived from the sequence, absent on the
    /// last waypoint.
    pub distance_to_next: Option<f64>,
}

impl Waypoint {
    pub fn new(id: Id<Waypoint>, coordinates: Coordinate) -> Self {
        Self {
            id,
            coordinates,
            distance_to_next: None,
        }
    }

    /// Recomputes the distance annotation against the following waypoint.
    pub fn link_to(&mut self, next: Option<&Waypoint>) {
        self.distance_to_next = geodesic_distance(
            Some(&self.coordinates),
            next.map(|next| &next.coordinates),
        );
    }
}

impl HasId for Waypoint {
    type IdType = u64;
}

impl ExampleData for Waypoint {
    fn example_data() -> Self {
        Waypoint {
            id: Id::new(0),
            coordinates: Coordinate::example_data(),
            distance_to_next: Some(1337.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_to_sets_and_clears_distance() {
        let mut first = Waypoint::new(Id::new(0), Coordinate::new(0.0, 0.0));
        let second = Waypoint::new(Id::new(1), Coordinate::new(1.0, 0.0));

        first.link_to(Some(&second));
        assert!(first.distance_to_next.is_some_and(|d| (d - 111_194.93).abs() < 0.01));

        first.link_to(None);
        assert_eq!(first.distance_to_next, None);
    }

    #[test]
    fn test_last_waypoint_omits_distance() {
        let waypoint = Waypoint::new(Id::new(7), Coordinate::new(1.0, 2.0));
        let json = serde_json::to_value(&waypoint).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "coordinates": { "longitude": 1.0, "latitude": 2.0 }
            })
        );
    }
}

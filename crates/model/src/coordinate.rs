use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo::haversine_distance;

use crate::ExampleData;

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Distance between two optional coordinates. Absent if either side is
/// absent, which is how the end of a sequence is expressed.
pub fn geodesic_distance(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Option<f64> {
    a.zip(b).map(|(a, b)| a.distance_to(b))
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Coordinate::new(10.1228, 54.3233)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_longitude_at_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let distance = a.distance_to(&b);
        assert!((distance - 111_194.93).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Coordinate::new(10.13, 54.32);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_geodesic_distance_absent_side() {
        let a = Coordinate::new(10.13, 54.32);
        assert_eq!(geodesic_distance(Some(&a), None), None);
        assert_eq!(geodesic_distance(None, Some(&a)), None);
        assert_eq!(geodesic_distance(Some(&a), Some(&a)), Some(0.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Coordinate::new(1.5, -2.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "longitude": 1.5, "latitude": -2.5 }));
    }
}

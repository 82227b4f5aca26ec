pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in metres between two points given in decimal degrees.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for nearly antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

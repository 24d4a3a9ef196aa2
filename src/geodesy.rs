//! Great-circle distance and bearing over WGS84 coordinates.
//!
//! All coordinates are (longitude, latitude) in degrees, distances in meters.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Bearing from the first point to the second in degrees, in (-180, 180].
///
/// Computed as `atan2(Δlon, Δlat)` on raw coordinate deltas: 0° points toward
/// increasing latitude, 90° toward increasing longitude. A flat-earth
/// approximation, adequate at the short ranges the wedge queries operate on.
/// Coincident points yield 0 rather than NaN.
pub fn planar_bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    (lon2 - lon1).atan2(lat2 - lat1).to_degrees()
}

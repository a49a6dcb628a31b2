//! Spherical geometry on a 6371 km Earth.
//!
//! Distances are great-circle (haversine) kilometres. Anything missing or
//! non-finite measures as `f64::INFINITY`.

use crate::models::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;
    if ![lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
        return f64::INFINITY;
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Like [`haversine_km`], but either side may be unknown.
pub fn distance(from: Option<Coordinates>, to: Option<Coordinates>) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => haversine_km(from, to),
        _ => f64::INFINITY,
    }
}

/// Point reached by travelling `distance_km` from `origin` along the initial
/// bearing `bearing_degrees` (0 = north, clockwise). Longitude is normalised
/// to [-180, 180).
pub fn project(origin: Coordinates, distance_km: f64, bearing_degrees: f64) -> Coordinates {
    let (lat, lon) = origin;
    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let bearing = bearing_degrees.to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    let lon2_deg = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    (lat2.to_degrees(), lon2_deg)
}

/// Arithmetic mean of the points, `None` when there are none.
pub fn centroid(points: &[Coordinates]) -> Option<Coordinates> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), (p_lat, p_lon)| (lat + p_lat, lon + p_lon));
    Some((lat_sum / n, lon_sum / n))
}

//! Geodesic circle approximation on a spherical earth model.
//!
//! The circle drawing mode derives its radius from the haversine distance
//! between the center and a control point, then discretizes the circle by
//! walking spherical destination points around the full bearing range.

use super::geometry::{Geometry, Position};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two lng/lat positions, in kilometers.
pub fn haversine_distance_km(a: Position, b: Position) -> f64 {
    let d_lat = (b[1] - a[1]).to_radians();
    let d_lng = (b[0] - a[0]).to_radians();
    let lat_a = a[1].to_radians();
    let lat_b = b[1].to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();
    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM
}

/// Destination point reached by travelling `distance_km` from `origin` along
/// the initial bearing `bearing_deg` (degrees clockwise from north).
pub fn destination(origin: Position, distance_km: f64, bearing_deg: f64) -> Position {
    let lng = origin[0].to_radians();
    let lat = origin[1].to_radians();
    let bearing = bearing_deg.to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let dest_lat = (lat.sin() * angular.cos() + lat.cos() * angular.sin() * bearing.cos()).asin();
    let dest_lng = lng
        + (bearing.sin() * angular.sin() * lat.cos())
            .atan2(angular.cos() - lat.sin() * dest_lat.sin());

    [dest_lng.to_degrees(), dest_lat.to_degrees()]
}

/// Builds a discretized circle polygon of `steps` segments around `center`.
///
/// The ring carries `steps + 1` positions, closed by repeating the first
/// vertex. `steps` must be at least 3 to describe an area; the config layer
/// clamps it well above that.
pub fn circle_polygon(center: Position, radius_km: f64, steps: u32) -> Geometry {
    let mut ring = Vec::with_capacity(steps as usize + 1);
    for i in 0..steps {
        let bearing = f64::from(i) * -360.0 / f64::from(steps);
        ring.push(destination(center, radius_km, bearing));
    }
    ring.push(ring[0]);
    Geometry::Polygon(vec![ring])
}

//! Spatial math for waypoint, boundary, and obstacle checks.

use crate::models::Position;

/// Earth radius in meters (mean radius).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// International feet per meter.
pub const FEET_PER_METER: f64 = 3.280_839_895_013_123;

// Epsilon in degrees for the on-boundary test. Surveyed coordinates carry
// floating-point error from parsing and arithmetic; 1e-9 degrees is about
// 0.1 mm of latitude.
const BOUNDARY_EPS_DEG: f64 = 1e-9;

/// Calculate distance between two points in meters (Haversine formula).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points in feet.
pub fn haversine_distance_ft(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(lat1, lon1, lat2, lon2) * FEET_PER_METER
}

/// Destination point a given distance (feet) along a bearing (radians,
/// clockwise from north). Returns (lat, lon) in degrees.
pub fn offset_by_bearing_ft(lat: f64, lon: f64, distance_ft: f64, bearing_rad: f64) -> (f64, f64) {
    if distance_ft.abs() <= f64::EPSILON {
        return (lat, lon);
    }

    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let angular_distance = distance_ft / FEET_PER_METER / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    (lat2.to_degrees(), lon2.to_degrees())
}

/// Ray-casting point-in-polygon test, boundary inclusive.
///
/// A point on a polygon edge or vertex counts as inside. Polygons with fewer
/// than 3 vertices contain nothing. Vertices may be listed open or with a
/// repeated closing vertex.
pub fn inside_polygon(lat: f64, lon: f64, vertices: &[Position]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    if on_polygon_boundary(lat, lon, vertices) {
        return true;
    }

    // Cast a ray in the +lon direction and count edge crossings.
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let yi = vertices[i].lat;
        let xi = vertices[i].lon;
        let yj = vertices[j].lat;
        let xj = vertices[j].lon;

        let crosses = (yi > lat) != (yj > lat);
        if crosses && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Check if a point lies on any polygon edge, within epsilon.
fn on_polygon_boundary(lat: f64, lon: f64, vertices: &[Position]) -> bool {
    fn within(a: f64, b: f64, value: f64) -> bool {
        let lo = a.min(b) - BOUNDARY_EPS_DEG;
        let hi = a.max(b) + BOUNDARY_EPS_DEG;
        lo <= value && value <= hi
    }

    let n = vertices.len();
    let mut j = n - 1;
    for i in 0..n {
        let a = &vertices[j];
        let b = &vertices[i];
        let cross = (b.lon - a.lon) * (lat - a.lat) - (b.lat - a.lat) * (lon - a.lon);
        if cross.abs() <= BOUNDARY_EPS_DEG && within(a.lat, b.lat, lat) && within(a.lon, b.lon, lon)
        {
            return true;
        }
        j = i;
    }

    false
}

/// Cylinder containment test.
///
/// True when the point's ground distance to the cylinder axis is within the
/// radius and its altitude lies between the ground and the cylinder height.
/// Both bounds are inclusive. A missing altitude reads as 0 ft, so a
/// grounded report inside the footprint counts as contained.
pub fn inside_cylinder(point: &Position, center: &Position, radius_ft: f64, height_ft: f64) -> bool {
    let altitude_ft = point.altitude_or_zero();
    if altitude_ft < 0.0 || altitude_ft > height_ft {
        return false;
    }
    point.horizontal_distance_ft(center) <= radius_ft
}

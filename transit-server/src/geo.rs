//! Geographic coordinates and great-circle distance.
//!
//! Every distance in the planner (nearest-station resolution, walking
//! distances in assembled itineraries) uses the same Haversine formula so
//! that distances computed by different components are comparable.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Create a point from latitude/longitude in decimal degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Great-circle distance between two points in meters (Haversine).
pub fn haversine_m(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-85.0f64..85.0, -180.0f64..180.0).prop_map(|(lat, lng)| Point::new(lat, lng))
    }

    proptest! {
        #[test]
        fn symmetric(a in point_strategy(), b in point_strategy()) {
            let ab = haversine_m(a, b);
            let ba = haversine_m(b, a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn non_negative_and_bounded(a in point_strategy(), b in point_strategy()) {
            let d = haversine_m(a, b);
            prop_assert!(d >= 0.0);
            // No two points on the sphere are further apart than half the circumference.
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1.0);
        }
    }
}

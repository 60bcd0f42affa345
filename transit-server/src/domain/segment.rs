//! Physical adjacency between stations.

use super::StationId;

/// A direct road connection between two stations, independent of any route.
///
/// Segments may be stored in one direction only; the network model exposes
/// them as traversable both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: StationId,
    pub to: StationId,
    /// Road distance in meters.
    pub distance_m: f64,
    /// Typical drive time in minutes.
    pub duration_mins: i64,
}

impl Segment {
    /// The same segment seen from the opposite end.
    pub fn reversed(&self) -> Segment {
        Segment {
            from: self.to.clone(),
            to: self.from.clone(),
            distance_m: self.distance_m,
            duration_mins: self.duration_mins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_swaps_endpoints() {
        let seg = Segment {
            from: StationId::parse("ST001").unwrap(),
            to: StationId::parse("ST012").unwrap(),
            distance_m: 5200.0,
            duration_mins: 15,
        };

        let rev = seg.reversed();
        assert_eq!(rev.from.as_str(), "ST012");
        assert_eq!(rev.to.as_str(), "ST001");
        assert_eq!(rev.distance_m, 5200.0);
        assert_eq!(rev.duration_mins, 15);
    }
}

//! Route and stop types.
//!
//! A `Route` owns its ordered stop list. The ordering invariant (strictly
//! increasing `stop_order`, non-decreasing `arrival_offset`) is enforced at
//! construction, so strategy code can index into stops without re-checking.

use super::{DomainError, RouteId, StationId};

/// Operational status of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Active,
    Inactive,
}

/// The association of one station to one route at a specific position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub station: StationId,
    /// Position of this stop within its route, strictly increasing.
    pub stop_order: u32,
    /// Cumulative minutes from the route's first stop. Data with no offset
    /// is normalised to 0 before reaching this type.
    pub arrival_offset: i64,
}

/// An ordered service line visiting a sequence of stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub code: String,
    pub status: RouteStatus,
    stops: Vec<Stop>,
}

impl Route {
    /// Construct a route, validating its stop sequence.
    ///
    /// Stops may arrive in any order and are sorted by `stop_order`.
    /// Routes with zero or one stop are legal (degenerate: they can never
    /// satisfy a journey but the data set may contain them).
    ///
    /// # Errors
    ///
    /// Returns `Err` if two stops share a `stop_order`, or if
    /// `arrival_offset` decreases as `stop_order` increases.
    pub fn new(
        id: RouteId,
        name: String,
        code: String,
        status: RouteStatus,
        mut stops: Vec<Stop>,
    ) -> Result<Self, DomainError> {
        stops.sort_by_key(|s| s.stop_order);

        for window in stops.windows(2) {
            if window[0].stop_order == window[1].stop_order {
                return Err(DomainError::DuplicateStopOrder {
                    route: id,
                    stop_order: window[0].stop_order,
                });
            }
            if window[1].arrival_offset < window[0].arrival_offset {
                return Err(DomainError::OffsetDecreases {
                    route: id,
                    stop_order: window[1].stop_order,
                });
            }
        }

        Ok(Route {
            id,
            name,
            code,
            status,
            stops,
        })
    }

    /// All stops in `stop_order`.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The stop serving `station`, if this route touches it.
    ///
    /// If a route somehow visits the same station twice, the earliest stop
    /// wins; stop orders are unique so the choice is deterministic.
    pub fn stop_for(&self, station: &StationId) -> Option<&Stop> {
        self.stops.iter().find(|s| &s.station == station)
    }

    /// Stops with `from_order <= stop_order <= to_order`, in ride order.
    pub fn stops_between(&self, from_order: u32, to_order: u32) -> Vec<Stop> {
        self.stops
            .iter()
            .filter(|s| s.stop_order >= from_order && s.stop_order <= to_order)
            .cloned()
            .collect()
    }

    /// Stops strictly after `order`, in ride order.
    pub fn stops_after(&self, order: u32) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(move |s| s.stop_order > order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn stop(station: &str, order: u32, offset: i64) -> Stop {
        Stop {
            station: sid(station),
            stop_order: order,
            arrival_offset: offset,
        }
    }

    fn route(stops: Vec<Stop>) -> Result<Route, DomainError> {
        Route::new(
            RouteId::parse("R001").unwrap(),
            "Miền Đông - Chợ Lớn".to_string(),
            "01".to_string(),
            RouteStatus::Active,
            stops,
        )
    }

    #[test]
    fn stops_sorted_on_construction() {
        let r = route(vec![
            stop("ST003", 3, 27),
            stop("ST001", 1, 0),
            stop("ST012", 2, 15),
        ])
        .unwrap();

        let orders: Vec<u32> = r.stops().iter().map(|s| s.stop_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_stop_order_rejected() {
        let result = route(vec![stop("ST001", 1, 0), stop("ST012", 1, 15)]);
        assert!(matches!(
            result,
            Err(DomainError::DuplicateStopOrder { stop_order: 1, .. })
        ));
    }

    #[test]
    fn decreasing_offset_rejected() {
        let result = route(vec![stop("ST001", 1, 20), stop("ST012", 2, 15)]);
        assert!(matches!(
            result,
            Err(DomainError::OffsetDecreases { stop_order: 2, .. })
        ));
    }

    #[test]
    fn equal_offsets_allowed() {
        // Offsets are non-decreasing, not strictly increasing.
        assert!(route(vec![stop("ST001", 1, 0), stop("ST012", 2, 0)]).is_ok());
    }

    #[test]
    fn degenerate_routes_allowed() {
        assert!(route(vec![]).is_ok());
        assert!(route(vec![stop("ST001", 1, 0)]).is_ok());
    }

    #[test]
    fn stop_for_finds_touch_point() {
        let r = route(vec![stop("ST001", 1, 0), stop("ST012", 2, 15)]).unwrap();

        assert_eq!(r.stop_for(&sid("ST012")).unwrap().stop_order, 2);
        assert!(r.stop_for(&sid("ST099")).is_none());
    }

    #[test]
    fn stops_between_inclusive() {
        let r = route(vec![
            stop("ST001", 1, 0),
            stop("ST012", 2, 15),
            stop("ST003", 3, 27),
            stop("ST010", 4, 32),
        ])
        .unwrap();

        let between = r.stops_between(2, 4);
        let stations: Vec<&str> = between.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(stations, vec!["ST012", "ST003", "ST010"]);
    }

    #[test]
    fn stops_after_excludes_current() {
        let r = route(vec![
            stop("ST001", 1, 0),
            stop("ST012", 2, 15),
            stop("ST003", 3, 27),
        ])
        .unwrap();

        let after: Vec<&str> = r.stops_after(1).map(|s| s.station.as_str()).collect();
        assert_eq!(after, vec!["ST012", "ST003"]);
    }
}

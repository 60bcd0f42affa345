//! Nearest-station resolution for coordinate endpoints.

use std::sync::Arc;

use tracing::trace;

use crate::domain::Station;
use crate::geo::Point;
use crate::network::NetworkModel;

use super::PlanError;

/// Resolve a coordinate to the single closest active station.
///
/// There is deliberately no radius cutoff: a rider far from every station
/// still gets the globally closest one, and the walking distance in the
/// assembled itinerary tells them how far that is. Distance ties resolve
/// by station id ascending (the port's ordering contract), so resolution
/// is deterministic.
pub fn nearest_active_station<N: NetworkModel>(
    network: &N,
    point: Point,
) -> Result<Arc<Station>, PlanError> {
    let hits = network.find_stations_near(point, None)?;

    match hits.into_iter().next() {
        Some((station, distance_m)) => {
            trace!(point = %point, station = %station.id, distance_m, "resolved endpoint");
            Ok(station)
        }
        None => Err(PlanError::StationNotFound(format!(
            "no active station exists near {point}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationId, StationKind, StationStatus};
    use crate::network::MemoryNetwork;

    fn station(id: &str, lat: f64, lng: f64) -> Station {
        Station {
            id: StationId::parse(id).unwrap(),
            name: format!("Station {id}"),
            position: Point::new(lat, lng),
            status: StationStatus::Active,
            kind: StationKind::Intermediate,
        }
    }

    #[test]
    fn resolves_to_closest_station() {
        let network = MemoryNetwork::new(
            vec![
                station("ST003", 10.7725, 106.6980),
                station("ST017", 10.8188, 106.6595),
            ],
            vec![],
            vec![],
        );

        let resolved =
            nearest_active_station(&network, Point::new(10.7769, 106.7009)).unwrap();
        assert_eq!(resolved.id.as_str(), "ST003");
    }

    #[test]
    fn no_radius_cutoff_for_remote_coordinates() {
        // The request is hundreds of kilometers from every
        // station, but the globally closest one is still returned.
        let network = MemoryNetwork::new(
            vec![
                station("ST003", 10.7725, 106.6980),
                station("ST017", 10.8188, 106.6595),
            ],
            vec![],
            vec![],
        );

        let resolved = nearest_active_station(&network, Point::new(21.0278, 105.8342)).unwrap();
        assert_eq!(resolved.id.as_str(), "ST017");
    }

    #[test]
    fn empty_active_set_is_station_not_found() {
        // The network holds no stations at all.
        let network = MemoryNetwork::new(vec![], vec![], vec![]);

        let result = nearest_active_station(&network, Point::new(10.77, 106.70));
        assert!(matches!(result, Err(PlanError::StationNotFound(_))));
    }

    #[test]
    fn equidistant_tie_resolves_by_id() {
        let network = MemoryNetwork::new(
            vec![
                station("ST030", 10.80, 106.70),
                station("ST002", 10.80, 106.70),
            ],
            vec![],
            vec![],
        );

        let resolved = nearest_active_station(&network, Point::new(10.70, 106.70)).unwrap();
        assert_eq!(resolved.id.as_str(), "ST002");
    }
}

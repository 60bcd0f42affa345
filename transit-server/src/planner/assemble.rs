//! Result assembly.
//!
//! Turns the winning strategy's candidate into the itinerary returned to
//! the caller: walking distances at either end, aggregated duration, and
//! the ordered instruction list. Every instruction list contains exactly
//! one walk-to-start step, one or two board steps, at most one transfer
//! step, one alight-at-destination step, and one walk-to-destination step.

use crate::domain::{
    Itinerary, ItineraryKind, Leg, Place, RouteInfo, Station, StationId, TransferPoint,
};
use crate::geo::haversine_m;
use crate::network::NetworkModel;

use super::config::PlannerConfig;
use super::transfer::RouteLeg;
use super::{Candidate, PlanError, ResolvedEndpoint};

fn place(station: &Station) -> Place {
    Place {
        id: station.id.clone(),
        name: station.name.clone(),
    }
}

/// Resolve a display name for a station id, falling back to the id itself
/// when the station cannot be fetched (e.g. taken out of service between
/// search and assembly).
fn place_for<N: NetworkModel>(network: &N, id: &StationId) -> Result<Place, PlanError> {
    let name = network
        .find_active_station_by_id(id)?
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.as_str().to_string());
    Ok(Place {
        id: id.clone(),
        name,
    })
}

fn walk_distance(endpoint: &ResolvedEndpoint) -> f64 {
    endpoint
        .requested
        .map(|p| haversine_m(p, endpoint.station.position))
        .unwrap_or(0.0)
}

fn walk_to_start_instruction(walk_m: f64, station: &Place) -> String {
    if walk_m > 0.0 {
        format!("Walk {walk_m:.0} m to {} station", station.name)
    } else {
        format!("Walk to {} station", station.name)
    }
}

fn walk_to_destination_instruction(walk_m: f64) -> String {
    if walk_m > 0.0 {
        format!("Walk {walk_m:.0} m to your destination")
    } else {
        "Walk to your destination".to_string()
    }
}

fn stops_word(n: usize) -> &'static str {
    if n == 1 { "stop" } else { "stops" }
}

fn leg_from_route_leg(leg: &RouteLeg, board: Place, alight: Place) -> Leg {
    Leg {
        route: Some(RouteInfo {
            id: leg.route.id.clone(),
            code: leg.route.code.clone(),
            name: leg.route.name.clone(),
        }),
        board,
        alight,
        stop_count: leg.stop_count(),
        duration_mins: leg.duration_mins,
    }
}

/// Assemble the final itinerary from the winning candidate.
pub fn assemble<N: NetworkModel>(
    network: &N,
    origin: &ResolvedEndpoint,
    destination: &ResolvedEndpoint,
    candidate: Candidate,
    config: &PlannerConfig,
) -> Result<Itinerary, PlanError> {
    let walk_to_start_m = walk_distance(origin);
    let walk_from_end_m = walk_distance(destination);
    // One walking leg at each end of the journey.
    let walk_allowance = 2 * config.walk_allowance_mins;

    let start = place(&origin.station);
    let end = place(&destination.station);

    let (kind, legs, transfer, ride_mins, distance_m, mut instructions) = match candidate {
        Candidate::Direct(direct) => {
            let instructions = vec![
                walk_to_start_instruction(walk_to_start_m, &start),
                format!(
                    "Board route {} ({}) at {}",
                    direct.route.code, direct.route.name, start.name
                ),
                format!(
                    "Ride {} {} ({} min) to {}",
                    direct.stop_count(),
                    stops_word(direct.stop_count()),
                    direct.duration_mins,
                    end.name
                ),
            ];

            let leg = Leg {
                route: Some(RouteInfo {
                    id: direct.route.id.clone(),
                    code: direct.route.code.clone(),
                    name: direct.route.name.clone(),
                }),
                board: start.clone(),
                alight: end.clone(),
                stop_count: direct.stop_count(),
                duration_mins: direct.duration_mins,
            };

            (
                ItineraryKind::Direct,
                vec![leg],
                None,
                direct.duration_mins,
                None,
                instructions,
            )
        }

        Candidate::Transfer(via) => {
            let at = place_for(network, via.transfer_station())?;

            let instructions = vec![
                walk_to_start_instruction(walk_to_start_m, &start),
                format!(
                    "Board route {} ({}) at {}",
                    via.first.route.code, via.first.route.name, start.name
                ),
                format!(
                    "Ride {} {} ({} min) to {}",
                    via.first.stop_count(),
                    stops_word(via.first.stop_count()),
                    via.first.duration_mins,
                    at.name
                ),
                format!(
                    "Alight at {} and transfer to route {} (about {} min)",
                    at.name, via.second.route.code, config.transfer_penalty_mins
                ),
                format!(
                    "Board route {} ({}) at {}",
                    via.second.route.code, via.second.route.name, at.name
                ),
                format!(
                    "Ride {} {} ({} min) to {}",
                    via.second.stop_count(),
                    stops_word(via.second.stop_count()),
                    via.second.duration_mins,
                    end.name
                ),
            ];

            let legs = vec![
                leg_from_route_leg(&via.first, start.clone(), at.clone()),
                leg_from_route_leg(&via.second, at.clone(), end.clone()),
            ];
            let transfer = TransferPoint {
                at,
                penalty_mins: config.transfer_penalty_mins,
            };

            (
                ItineraryKind::Transfer,
                legs,
                Some(transfer),
                via.total_duration_mins,
                None,
                instructions,
            )
        }

        Candidate::Path(path) => {
            let board_step = match &path.via_route {
                Some(route) => format!(
                    "Board route {} ({}) at {}",
                    route.code, route.name, start.name
                ),
                None => format!("Board the next available service at {}", start.name),
            };

            let instructions = vec![
                walk_to_start_instruction(walk_to_start_m, &start),
                board_step,
                format!(
                    "Ride {} {} ({} min, {:.1} km) toward {}",
                    path.hop_count(),
                    stops_word(path.hop_count()),
                    path.total_duration_mins,
                    path.total_distance_m / 1000.0,
                    end.name
                ),
            ];

            let leg = Leg {
                route: path.via_route.clone(),
                board: start.clone(),
                alight: end.clone(),
                stop_count: path.hop_count(),
                duration_mins: path.total_duration_mins,
            };

            (
                ItineraryKind::GraphPath,
                vec![leg],
                None,
                path.total_duration_mins,
                Some(path.total_distance_m),
                instructions,
            )
        }
    };

    instructions.push(format!("Alight at {}", end.name));
    instructions.push(walk_to_destination_instruction(walk_from_end_m));

    Itinerary::new(
        kind,
        legs,
        transfer,
        walk_to_start_m,
        walk_from_end_m,
        ride_mins + walk_allowance,
        distance_m,
        instructions,
    )
    .map_err(|e| PlanError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, RouteId, RouteStatus, StationKind, StationStatus, Stop};
    use crate::geo::Point;
    use crate::network::MemoryNetwork;
    use crate::planner::direct::find_direct;
    use crate::planner::fallback::find_path;
    use crate::planner::transfer::find_transfer;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn station(id: &str, name: &str, lat: f64, lng: f64) -> Station {
        Station {
            id: sid(id),
            name: name.to_string(),
            position: Point::new(lat, lng),
            status: StationStatus::Active,
            kind: StationKind::Intermediate,
        }
    }

    fn route(id: &str, code: &str, name: &str, stops: &[(&str, u32, i64)]) -> Route {
        Route::new(
            RouteId::parse(id).unwrap(),
            name.to_string(),
            code.to_string(),
            RouteStatus::Active,
            stops
                .iter()
                .map(|(s, order, offset)| Stop {
                    station: sid(s),
                    stop_order: *order,
                    arrival_offset: *offset,
                })
                .collect(),
        )
        .unwrap()
    }

    fn endpoint(network: &MemoryNetwork, id: &str, requested: Option<Point>) -> ResolvedEndpoint {
        ResolvedEndpoint {
            station: network
                .find_active_station_by_id(&sid(id))
                .unwrap()
                .unwrap(),
            requested,
        }
    }

    fn direct_network() -> MemoryNetwork {
        MemoryNetwork::new(
            vec![
                station("ST001", "Bến Xe Miền Đông", 10.8142, 106.7109),
                station("ST012", "Hàng Xanh", 10.8013, 106.7117),
            ],
            vec![route(
                "R001",
                "01",
                "Miền Đông - Chợ Lớn",
                &[("ST001", 1, 0), ("ST012", 2, 15)],
            )],
            vec![],
        )
    }

    fn count_containing(instructions: &[String], needle: &str) -> usize {
        instructions.iter().filter(|i| i.contains(needle)).count()
    }

    #[test]
    fn direct_itinerary_station_to_station() {
        let network = direct_network();
        let origin = endpoint(&network, "ST001", None);
        let destination = endpoint(&network, "ST012", None);

        let candidate = find_direct(&network, &sid("ST001"), &sid("ST012"))
            .unwrap()
            .unwrap();

        let itinerary = assemble(
            &network,
            &origin,
            &destination,
            Candidate::Direct(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(itinerary.kind(), ItineraryKind::Direct);
        assert_eq!(itinerary.walk_to_start_m(), 0.0);
        assert_eq!(itinerary.walk_from_end_m(), 0.0);
        // 15 in-vehicle + 5 walking allowance per leg.
        assert_eq!(itinerary.duration_mins(), 15 + 10);
        assert_eq!(itinerary.legs().len(), 1);
        assert!(itinerary.transfer().is_none());

        let steps = itinerary.instructions();
        assert_eq!(count_containing(steps, "Walk to Bến Xe Miền Đông station"), 1);
        assert_eq!(count_containing(steps, "Board route"), 1);
        assert_eq!(count_containing(steps, "transfer"), 0);
        assert_eq!(count_containing(steps, "Alight at Hàng Xanh"), 1);
        assert_eq!(steps.last().unwrap(), "Walk to your destination");
    }

    #[test]
    fn coordinate_request_charges_walking_distance() {
        let network = direct_network();
        // Roughly 500 m south of ST001.
        let origin = endpoint(&network, "ST001", Some(Point::new(10.8097, 106.7109)));
        let destination = endpoint(&network, "ST012", Some(Point::new(10.8013, 106.7117)));

        let candidate = find_direct(&network, &sid("ST001"), &sid("ST012"))
            .unwrap()
            .unwrap();

        let itinerary = assemble(
            &network,
            &origin,
            &destination,
            Candidate::Direct(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert!(itinerary.walk_to_start_m() > 400.0);
        assert!(itinerary.walk_to_start_m() < 600.0);
        // Destination coordinate sits on the station exactly.
        assert_eq!(itinerary.walk_from_end_m(), 0.0);

        assert!(
            itinerary.instructions()[0].starts_with("Walk 5"),
            "expected a measured walk step, got {:?}",
            itinerary.instructions()[0]
        );
    }

    #[test]
    fn transfer_itinerary_has_two_boards_and_one_transfer() {
        let network = MemoryNetwork::new(
            vec![
                station("ST002", "Bến Xe An Sương", 10.8428, 106.6140),
                station("ST016", "Công Viên Đầm Sen", 10.7681, 106.6364),
                station("ST003", "Chợ Bến Thành", 10.7725, 106.6980),
            ],
            vec![
                route("R002", "02", "An Sương - Đầm Sen", &[("ST002", 1, 0), ("ST016", 2, 12)]),
                route("R009", "09", "Đầm Sen - Bến Thành", &[("ST016", 1, 0), ("ST003", 2, 19)]),
            ],
            vec![],
        );

        let origin = endpoint(&network, "ST002", None);
        let destination = endpoint(&network, "ST003", None);

        let candidate = find_transfer(
            &network,
            &sid("ST002"),
            &sid("ST003"),
            &PlannerConfig::default(),
        )
        .unwrap()
        .unwrap();

        let itinerary = assemble(
            &network,
            &origin,
            &destination,
            Candidate::Transfer(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(itinerary.kind(), ItineraryKind::Transfer);
        assert_eq!(itinerary.legs().len(), 2);
        let transfer = itinerary.transfer().unwrap();
        assert_eq!(transfer.at.id.as_str(), "ST016");
        assert_eq!(transfer.at.name, "Công Viên Đầm Sen");
        assert_eq!(transfer.penalty_mins, 10);
        // 12 + 19 + 10 penalty + 10 walking allowance.
        assert_eq!(itinerary.duration_mins(), 51);

        let steps = itinerary.instructions();
        assert_eq!(count_containing(steps, "Walk to Bến Xe An Sương station"), 1);
        assert_eq!(count_containing(steps, "Board route"), 2);
        assert_eq!(count_containing(steps, "and transfer to route 09"), 1);
        assert_eq!(count_containing(steps, "Walk to your destination"), 1);
    }

    #[test]
    fn graph_path_itinerary_carries_distance() {
        let network = MemoryNetwork::new(
            vec![
                station("ST003", "Chợ Bến Thành", 10.7725, 106.6980),
                station("ST004", "Nhà Hát Thành Phố", 10.7769, 106.7032),
                station("ST007", "Thảo Cầm Viên", 10.7872, 106.7052),
            ],
            vec![],
            vec![
                crate::domain::Segment {
                    from: sid("ST003"),
                    to: sid("ST004"),
                    distance_m: 800.0,
                    duration_mins: 3,
                },
                crate::domain::Segment {
                    from: sid("ST004"),
                    to: sid("ST007"),
                    distance_m: 1200.0,
                    duration_mins: 4,
                },
            ],
        );

        let origin = endpoint(&network, "ST003", None);
        let destination = endpoint(&network, "ST007", None);

        let candidate = find_path(
            &network,
            &origin.station,
            &sid("ST007"),
            &PlannerConfig::default(),
        )
        .unwrap()
        .unwrap();

        let itinerary = assemble(
            &network,
            &origin,
            &destination,
            Candidate::Path(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(itinerary.kind(), ItineraryKind::GraphPath);
        assert_eq!(itinerary.distance_m(), Some(2000.0));
        assert_eq!(itinerary.duration_mins(), 7 + 10);
        assert_eq!(itinerary.stop_count(), 2);

        let steps = itinerary.instructions();
        // No route serves these segments, so the board step is generic.
        assert_eq!(
            count_containing(steps, "Board the next available service"),
            1
        );
        assert_eq!(count_containing(steps, "transfer"), 0);
    }

    #[test]
    fn transfer_name_falls_back_to_id_when_station_missing() {
        // The transfer station is not in the store at all; assembly still
        // succeeds with the id as the display name.
        let network = MemoryNetwork::new(
            vec![
                station("ST002", "Bến Xe An Sương", 10.8428, 106.6140),
                station("ST003", "Chợ Bến Thành", 10.7725, 106.6980),
            ],
            vec![
                route("R002", "02", "An Sương - Đầm Sen", &[("ST002", 1, 0), ("ST016", 2, 12)]),
                route("R009", "09", "Đầm Sen - Bến Thành", &[("ST016", 1, 0), ("ST003", 2, 19)]),
            ],
            vec![],
        );

        let candidate = find_transfer(
            &network,
            &sid("ST002"),
            &sid("ST003"),
            &PlannerConfig::default(),
        )
        .unwrap()
        .unwrap();

        let itinerary = assemble(
            &network,
            &endpoint(&network, "ST002", None),
            &endpoint(&network, "ST003", None),
            Candidate::Transfer(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert_eq!(itinerary.transfer().unwrap().at.name, "ST016");
    }

    #[test]
    fn single_stop_uses_singular_word() {
        let network = direct_network();
        let candidate = find_direct(&network, &sid("ST001"), &sid("ST012"))
            .unwrap()
            .unwrap();

        let itinerary = assemble(
            &network,
            &endpoint(&network, "ST001", None),
            &endpoint(&network, "ST012", None),
            Candidate::Direct(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert!(
            itinerary
                .instructions()
                .iter()
                .any(|i| i.contains("Ride 1 stop (15 min)"))
        );
    }

    #[test]
    fn graph_path_with_serving_route_labels_board_step() {
        let network = MemoryNetwork::new(
            vec![
                station("ST001", "Bến Xe Miền Đông", 10.8142, 106.7109),
                station("ST012", "Hàng Xanh", 10.8013, 106.7117),
            ],
            vec![route(
                "R001",
                "01",
                "Miền Đông - Chợ Lớn",
                &[("ST001", 1, 0), ("ST012", 2, 15)],
            )],
            vec![crate::domain::Segment {
                from: sid("ST001"),
                to: sid("ST012"),
                distance_m: 5200.0,
                duration_mins: 15,
            }],
        );

        let origin = endpoint(&network, "ST001", None);
        let candidate = find_path(
            &network,
            &origin.station,
            &sid("ST012"),
            &PlannerConfig::default(),
        )
        .unwrap()
        .unwrap();

        let itinerary = assemble(
            &network,
            &origin,
            &endpoint(&network, "ST012", None),
            Candidate::Path(candidate),
            &PlannerConfig::default(),
        )
        .unwrap();

        assert!(
            itinerary
                .instructions()
                .iter()
                .any(|i| i.contains("Board route 01"))
        );
    }
}

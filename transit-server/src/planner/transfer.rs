//! Transfer-route strategy.
//!
//! Finds a two-route journey joined at a single transfer station when no
//! direct route exists. The expansion of second-route candidates per
//! transfer station is capped: on networks with many overlapping routes
//! the full product is expensive, and the cap keeps the search bounded at
//! a small cost in precision.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Route, StationId, Stop};
use crate::network::{NetworkError, NetworkModel};

use super::config::PlannerConfig;

/// One continuous ride on a single route within a transfer journey.
#[derive(Debug, Clone)]
pub struct RouteLeg {
    pub route: Arc<Route>,
    pub board: Stop,
    pub alight: Stop,
    /// Stops from board to alight inclusive, in ride order.
    pub stops: Vec<Stop>,
    pub duration_mins: i64,
}

impl RouteLeg {
    /// Stops ridden through (alight included, board not).
    pub fn stop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// A two-leg journey with one transfer.
#[derive(Debug, Clone)]
pub struct TransferCandidate {
    pub first: RouteLeg,
    pub second: RouteLeg,
    /// Leg durations plus the fixed transfer penalty.
    pub total_duration_mins: i64,
}

impl TransferCandidate {
    /// The station where the rider changes routes.
    pub fn transfer_station(&self) -> &StationId {
        &self.first.alight.station
    }

    /// Stops ridden across both legs.
    pub fn combined_stops(&self) -> usize {
        self.first.stops.len() + self.second.stops.len()
    }
}

fn compare(a: &TransferCandidate, b: &TransferCandidate) -> Ordering {
    a.total_duration_mins
        .cmp(&b.total_duration_mins)
        .then_with(|| a.combined_stops().cmp(&b.combined_stops()))
        .then_with(|| a.first.route.id.cmp(&b.first.route.id))
        .then_with(|| a.second.route.id.cmp(&b.second.route.id))
}

/// Find the best single-transfer journey from `from` to `to`.
///
/// For every route serving the start, every later stop on that route is a
/// transfer candidate; qualifying second routes from there to the end
/// (capped per transfer station) complete the journey. Selection: minimum
/// total duration, ties by fewest combined stops, then by route id pair
/// ascending.
pub fn find_transfer<N: NetworkModel>(
    network: &N,
    from: &StationId,
    to: &StationId,
    config: &PlannerConfig,
) -> Result<Option<TransferCandidate>, NetworkError> {
    let mut best: Option<TransferCandidate> = None;
    let mut examined = 0usize;

    for (route1, board1) in network.find_routes_serving(from)? {
        for transfer_stop in route1.stops_after(board1.stop_order) {
            // Transferring where we started or where we are going makes no
            // sense; the direct strategy already covered the latter.
            if &transfer_stop.station == from || &transfer_stop.station == to {
                continue;
            }

            let connections = network
                .find_direct_routes(&transfer_stop.station, to)?
                .into_iter()
                .filter(|d| d.route.id != route1.id)
                .take(config.transfer_branch_limit);

            for connection in connections {
                examined += 1;

                let leg1_duration = transfer_stop.arrival_offset - board1.arrival_offset;
                let leg2_duration =
                    connection.alight.arrival_offset - connection.board.arrival_offset;

                let candidate = TransferCandidate {
                    first: RouteLeg {
                        stops: route1.stops_between(board1.stop_order, transfer_stop.stop_order),
                        route: route1.clone(),
                        board: board1.clone(),
                        alight: transfer_stop.clone(),
                        duration_mins: leg1_duration,
                    },
                    second: RouteLeg {
                        stops: connection
                            .route
                            .stops_between(connection.board.stop_order, connection.alight.stop_order),
                        route: connection.route,
                        board: connection.board,
                        alight: connection.alight,
                        duration_mins: leg2_duration,
                    },
                    total_duration_mins: leg1_duration
                        + leg2_duration
                        + config.transfer_penalty_mins,
                };

                let better = match &best {
                    Some(current) => compare(&candidate, current) == Ordering::Less,
                    None => true,
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
    }

    debug!(
        from = %from,
        to = %to,
        examined,
        found = best.is_some(),
        "transfer-route search"
    );

    Ok(best)
}

//! Direct-route strategy.
//!
//! Finds a single route serving both endpoints with the start strictly
//! before the end in stop order. Returning no candidate is the signal for
//! the planner to try the transfer strategy next, not an error.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Route, StationId, Stop};
use crate::network::{NetworkError, NetworkModel};

/// A qualifying direct ride, selected best-first by the strategy.
#[derive(Debug, Clone)]
pub struct DirectCandidate {
    pub route: Arc<Route>,
    pub board: Stop,
    pub alight: Stop,
    /// Stops from board to alight inclusive, in ride order.
    pub stops: Vec<Stop>,
    /// In-vehicle minutes: alight offset minus board offset.
    pub duration_mins: i64,
}

impl DirectCandidate {
    /// Stops ridden through (alight included, board not).
    pub fn stop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Find the best direct route from `from` to `to`, if any route qualifies.
///
/// Selection: minimum in-vehicle duration, ties by fewest stops, then by
/// route id ascending for determinism.
pub fn find_direct<N: NetworkModel>(
    network: &N,
    from: &StationId,
    to: &StationId,
) -> Result<Option<DirectCandidate>, NetworkError> {
    let mut candidates: Vec<DirectCandidate> = network
        .find_direct_routes(from, to)?
        .into_iter()
        .map(|direct| {
            let stops = direct
                .route
                .stops_between(direct.board.stop_order, direct.alight.stop_order);
            let duration_mins = direct.alight.arrival_offset - direct.board.arrival_offset;
            DirectCandidate {
                route: direct.route,
                board: direct.board,
                alight: direct.alight,
                stops,
                duration_mins,
            }
        })
        .collect();

    debug!(
        from = %from,
        to = %to,
        candidates = candidates.len(),
        "direct-route search"
    );

    candidates.sort_by(|a, b| {
        a.duration_mins
            .cmp(&b.duration_mins)
            .then_with(|| a.stops.len().cmp(&b.stops.len()))
            .then_with(|| a.route.id.cmp(&b.route.id))
    });

    Ok(candidates.into_iter().next())
}

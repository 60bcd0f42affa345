//! Journey planning core.
//!
//! Answers "how do I get from A to B" over the transit network. The
//! planner resolves both endpoints to active stations, then tries a
//! direct route, then a single transfer, then a generic traversal of the
//! raw station-adjacency graph, stopping at the first strategy that
//! produces a candidate; result assembly turns it into the final
//! itinerary:
//!
//! ```text
//! Resolving -> TryDirect -> TryTransfer -> TryGenericFallback
//!                  \             \               \
//!                   +-------------+---------------+--> Assembling -> Success
//!                                                  \
//!                                                   +--> NoRouteFound
//! ```
//!
//! Planning is stateless and read-only: the planner borrows the network
//! port and its configuration, and every request is independent.

mod assemble;
mod config;
mod direct;
mod fallback;
mod resolve;
mod transfer;

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Itinerary, Station, StationId};
use crate::geo::Point;
use crate::network::{NetworkError, NetworkModel};

pub use config::PlannerConfig;
pub use direct::{DirectCandidate, find_direct};
pub use fallback::{PathCandidate, find_path};
pub use resolve::nearest_active_station;
pub use transfer::{RouteLeg, TransferCandidate, find_transfer};

/// One end of a journey request.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// A known station id.
    Station(StationId),
    /// A raw coordinate, resolved to the nearest active station.
    Coordinate(Point),
}

/// A journey planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub from: Endpoint,
    pub to: Endpoint,
}

impl PlanRequest {
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self { from, to }
    }
}

/// Error from journey planning.
///
/// `NoRouteFound` is the expected outcome of an exhaustive search that
/// found nothing; `Upstream` means the search could not even be attempted
/// and is the variant worth retrying.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The request was malformed (missing or equal endpoints)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An endpoint did not resolve to an active station
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// All strategies exhausted without a candidate
    #[error("no route found between {from} and {to}")]
    NoRouteFound { from: StationId, to: StationId },

    /// The network store could not be queried
    #[error(transparent)]
    Upstream(#[from] NetworkError),

    /// An assembled result violated its own invariants
    #[error("internal planner error: {0}")]
    Internal(String),
}

/// A strategy's winning output, before assembly.
#[derive(Debug, Clone)]
pub enum Candidate {
    Direct(DirectCandidate),
    Transfer(TransferCandidate),
    Path(PathCandidate),
}

impl Candidate {
    fn strategy_name(&self) -> &'static str {
        match self {
            Candidate::Direct(_) => "direct",
            Candidate::Transfer(_) => "transfer",
            Candidate::Path(_) => "graph_path",
        }
    }
}

/// A request endpoint after resolution: the station planning runs against,
/// plus the originally requested coordinate when there was one.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    pub station: Arc<Station>,
    pub requested: Option<Point>,
}

/// The journey planner.
pub struct Planner<'a, N: NetworkModel> {
    network: &'a N,
    config: &'a PlannerConfig,
}

impl<'a, N: NetworkModel> Planner<'a, N> {
    /// Create a planner over the given network port.
    pub fn new(network: &'a N, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    /// Plan a journey.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidRequest`] when the endpoints are equal
    ///   (including coordinates that resolve to the same station).
    /// - [`PlanError::StationNotFound`] when an endpoint does not resolve
    ///   to an active station.
    /// - [`PlanError::NoRouteFound`] when every strategy comes up empty.
    /// - [`PlanError::Upstream`] when the network store fails.
    pub fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError> {
        // Resolving. Station-id requests are checked for equality before
        // any query runs; coordinate requests can only be checked after
        // resolution.
        if let (Endpoint::Station(from), Endpoint::Station(to)) = (&request.from, &request.to) {
            if from == to {
                return Err(PlanError::InvalidRequest(format!(
                    "journey starts and ends at the same station '{from}'"
                )));
            }
        }

        let origin = self.resolve(&request.from)?;
        let destination = self.resolve(&request.to)?;

        if origin.station.id == destination.station.id {
            return Err(PlanError::InvalidRequest(format!(
                "both endpoints resolve to station '{}'",
                origin.station.id
            )));
        }

        let from = &origin.station.id;
        let to = &destination.station.id;

        // TryDirect -> TryTransfer -> TryGenericFallback. Each strategy
        // runs only if the previous produced no candidate.
        let candidate = match find_direct(self.network, from, to)? {
            Some(direct) => Candidate::Direct(direct),
            None => match find_transfer(self.network, from, to, self.config)? {
                Some(via) => Candidate::Transfer(via),
                None => match find_path(self.network, &origin.station, to, self.config)? {
                    Some(path) => Candidate::Path(path),
                    None => {
                        return Err(PlanError::NoRouteFound {
                            from: from.clone(),
                            to: to.clone(),
                        });
                    }
                },
            },
        };

        debug!(
            from = %from,
            to = %to,
            strategy = candidate.strategy_name(),
            "planning strategy selected"
        );

        // Assembling.
        assemble::assemble(self.network, &origin, &destination, candidate, self.config)
    }

    fn resolve(&self, endpoint: &Endpoint) -> Result<ResolvedEndpoint, PlanError> {
        match endpoint {
            Endpoint::Station(id) => {
                let station = self
                    .network
                    .find_active_station_by_id(id)?
                    .ok_or_else(|| {
                        PlanError::StationNotFound(format!(
                            "station '{id}' does not exist or is not active"
                        ))
                    })?;
                Ok(ResolvedEndpoint {
                    station,
                    requested: None,
                })
            }
            Endpoint::Coordinate(point) => Ok(ResolvedEndpoint {
                station: nearest_active_station(self.network, *point)?,
                requested: Some(*point),
            }),
        }
    }
}

//! Query port over the external network store.
//!
//! The planner never talks to a concrete store; it sees the five read
//! operations below. This abstraction keeps the strategies testable and
//! lets the backing store change without touching the core.

mod memory;

use std::sync::Arc;

use crate::domain::{Route, Segment, Station, StationId, Stop};
use crate::geo::Point;

pub use memory::{
    MemoryNetwork, NetworkSeed, RouteRecord, SeedError, SegmentRecord, StationRecord, StopRecord,
};

/// Error from the network store collaborator.
///
/// Distinct from "no result": an empty query result is an ordinary `Ok`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// The store could not be reached or returned a transport-level error.
    #[error("network store unavailable: {0}")]
    Unavailable(String),
}

/// A route qualifying for a direct ride between two stations.
///
/// `board.stop_order < alight.stop_order` holds by contract; the stations
/// ridden through are recovered from `route.stops()`.
#[derive(Debug, Clone)]
pub struct DirectRoute {
    pub route: Arc<Route>,
    pub board: Stop,
    pub alight: Stop,
}

/// Read-only view of the transit network.
///
/// All operations are pure reads; implementations must not block
/// indefinitely. Values are shared via `Arc` so strategies can keep
/// references without copying route stop lists around.
pub trait NetworkModel {
    /// Look up a station by id, returning it only if it is active.
    fn find_active_station_by_id(
        &self,
        id: &StationId,
    ) -> Result<Option<Arc<Station>>, NetworkError>;

    /// Active stations ordered by great-circle distance from `origin`,
    /// nearest first, ties broken by station id ascending.
    ///
    /// `radius_m` of `None` means no cutoff; the nearest-station resolver
    /// relies on that to always find the globally closest station.
    fn find_stations_near(
        &self,
        origin: Point,
        radius_m: Option<f64>,
    ) -> Result<Vec<(Arc<Station>, f64)>, NetworkError>;

    /// All routes touching `station`, with the stop for the touch-point.
    fn find_routes_serving(
        &self,
        station: &StationId,
    ) -> Result<Vec<(Arc<Route>, Stop)>, NetworkError>;

    /// Routes serving both stations with `from` strictly before `to` in
    /// stop order.
    fn find_direct_routes(
        &self,
        from: &StationId,
        to: &StationId,
    ) -> Result<Vec<DirectRoute>, NetworkError>;

    /// Stations physically adjacent to `station`, with the connecting
    /// segment. Segments are returned in both directions regardless of
    /// stored direction.
    fn neighbors_of(
        &self,
        station: &StationId,
    ) -> Result<Vec<(Arc<Station>, Segment)>, NetworkError>;
}

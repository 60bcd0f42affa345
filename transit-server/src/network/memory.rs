//! In-memory network store.
//!
//! Holds the whole network in process memory, built from a JSON seed whose
//! record shapes mirror the upstream data set (station documents, route
//! documents with embedded stop edges, station-connection edges). Seed
//! records are plain serde types converted into validated domain types;
//! nothing downstream of this module sees unvalidated data.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    Route, RouteId, RouteStatus, Segment, Station, StationId, StationKind, StationStatus, Stop,
};
use crate::geo::{Point, haversine_m};

use super::{DirectRoute, NetworkError, NetworkModel};

/// Error loading or validating seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid seed data: {0}")]
    Invalid(String),
}

/// Raw station record.
#[derive(Debug, Deserialize)]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

/// Raw stop edge within a route record.
#[derive(Debug, Deserialize)]
pub struct StopRecord {
    pub station: String,
    pub stop_order: u32,
    /// Minutes from the route's first stop; absent means 0.
    #[serde(default)]
    pub arrival_offset: i64,
}

/// Raw route record with its embedded stop edges.
#[derive(Debug, Deserialize)]
pub struct RouteRecord {
    pub route_id: String,
    pub route_name: String,
    pub route_code: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub stops: Vec<StopRecord>,
}

/// Raw station-connection edge.
#[derive(Debug, Deserialize)]
pub struct SegmentRecord {
    pub from: String,
    pub to: String,
    /// Meters.
    pub distance: f64,
    /// Minutes.
    pub duration: i64,
}

fn default_status() -> String {
    "active".to_string()
}

fn default_kind() -> String {
    "intermediate".to_string()
}

/// A full network seed: stations, routes, and physical connections.
#[derive(Debug, Deserialize)]
pub struct NetworkSeed {
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub segments: Vec<SegmentRecord>,
}

fn parse_station(record: StationRecord) -> Result<Station, SeedError> {
    let id = StationId::parse(&record.station_id)
        .map_err(|e| SeedError::Invalid(format!("station '{}': {e}", record.station_id)))?;

    let status = match record.status.as_str() {
        "active" => StationStatus::Active,
        "maintenance" => StationStatus::Maintenance,
        "inactive" => StationStatus::Inactive,
        other => {
            return Err(SeedError::Invalid(format!(
                "station '{id}': unknown status '{other}'"
            )));
        }
    };

    let kind = match record.kind.as_str() {
        "terminal" => StationKind::Terminal,
        "intermediate" => StationKind::Intermediate,
        "stop" => StationKind::Stop,
        other => {
            return Err(SeedError::Invalid(format!(
                "station '{id}': unknown type '{other}'"
            )));
        }
    };

    Ok(Station {
        id,
        name: record.name,
        position: Point::new(record.latitude, record.longitude),
        status,
        kind,
    })
}

fn parse_route(record: RouteRecord) -> Result<Route, SeedError> {
    let id = RouteId::parse(&record.route_id)
        .map_err(|e| SeedError::Invalid(format!("route '{}': {e}", record.route_id)))?;

    let status = match record.status.as_str() {
        "active" => RouteStatus::Active,
        "inactive" => RouteStatus::Inactive,
        other => {
            return Err(SeedError::Invalid(format!(
                "route '{id}': unknown status '{other}'"
            )));
        }
    };

    let stops = record
        .stops
        .into_iter()
        .map(|s| {
            Ok(Stop {
                station: StationId::parse(&s.station)
                    .map_err(|e| SeedError::Invalid(format!("route '{id}': {e}")))?,
                stop_order: s.stop_order,
                arrival_offset: s.arrival_offset,
            })
        })
        .collect::<Result<Vec<_>, SeedError>>()?;

    Route::new(id, record.route_name, record.route_code, status, stops)
        .map_err(|e| SeedError::Invalid(e.to_string()))
}

fn parse_segment(record: SegmentRecord) -> Result<Segment, SeedError> {
    Ok(Segment {
        from: StationId::parse(&record.from)
            .map_err(|e| SeedError::Invalid(format!("segment from '{}': {e}", record.from)))?,
        to: StationId::parse(&record.to)
            .map_err(|e| SeedError::Invalid(format!("segment to '{}': {e}", record.to)))?,
        distance_m: record.distance,
        duration_mins: record.duration,
    })
}

/// The in-process network store.
///
/// Adjacency is materialised in both directions at build time, so
/// `neighbors_of` is a plain map lookup. Insertion order of segments is
/// preserved per station; the BFS fallback's tie-break among equal-hop
/// paths follows that order.
pub struct MemoryNetwork {
    stations: HashMap<StationId, Arc<Station>>,
    routes: Vec<Arc<Route>>,
    adjacency: HashMap<StationId, Vec<(StationId, Segment)>>,
}

impl MemoryNetwork {
    /// Build a store from validated domain values.
    pub fn new(stations: Vec<Station>, routes: Vec<Route>, segments: Vec<Segment>) -> Self {
        let stations: HashMap<StationId, Arc<Station>> = stations
            .into_iter()
            .map(|s| (s.id.clone(), Arc::new(s)))
            .collect();

        let mut adjacency: HashMap<StationId, Vec<(StationId, Segment)>> = HashMap::new();

        // Segments are undirected in effect: index each one under both
        // endpoints, oriented away from the keyed station. Data sets insert
        // some connections one-way and some both ways, so repeated
        // neighbor pairs are dropped.
        for segment in segments {
            for seg in [segment.clone(), segment.reversed()] {
                let entry = adjacency.entry(seg.from.clone()).or_default();
                if !entry.iter().any(|(n, _)| n == &seg.to) {
                    entry.push((seg.to.clone(), seg));
                }
            }
        }

        Self {
            stations,
            routes: routes.into_iter().map(Arc::new).collect(),
            adjacency,
        }
    }

    /// Build a store from raw seed records.
    pub fn from_seed(seed: NetworkSeed) -> Result<Self, SeedError> {
        let stations = seed
            .stations
            .into_iter()
            .map(parse_station)
            .collect::<Result<Vec<_>, _>>()?;
        let routes = seed
            .routes
            .into_iter()
            .map(parse_route)
            .collect::<Result<Vec<_>, _>>()?;
        let segments = seed
            .segments
            .into_iter()
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(stations, routes, segments))
    }

    /// Load a store from a JSON seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let data = std::fs::read_to_string(path)?;
        let seed: NetworkSeed = serde_json::from_str(&data)?;
        Self::from_seed(seed)
    }

    /// Number of stations in the store, any status.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of routes in the store.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl NetworkModel for MemoryNetwork {
    fn find_active_station_by_id(
        &self,
        id: &StationId,
    ) -> Result<Option<Arc<Station>>, NetworkError> {
        Ok(self.stations.get(id).filter(|s| s.is_active()).cloned())
    }

    fn find_stations_near(
        &self,
        origin: Point,
        radius_m: Option<f64>,
    ) -> Result<Vec<(Arc<Station>, f64)>, NetworkError> {
        let mut hits: Vec<(Arc<Station>, f64)> = self
            .stations
            .values()
            .filter(|s| s.is_active())
            .map(|s| (s.clone(), haversine_m(origin, s.position)))
            .filter(|(_, d)| radius_m.is_none_or(|r| *d <= r))
            .collect();

        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        Ok(hits)
    }

    fn find_routes_serving(
        &self,
        station: &StationId,
    ) -> Result<Vec<(Arc<Route>, Stop)>, NetworkError> {
        Ok(self
            .routes
            .iter()
            .filter_map(|r| r.stop_for(station).map(|s| (r.clone(), s.clone())))
            .collect())
    }

    fn find_direct_routes(
        &self,
        from: &StationId,
        to: &StationId,
    ) -> Result<Vec<DirectRoute>, NetworkError> {
        Ok(self
            .routes
            .iter()
            .filter_map(|r| {
                let board = r.stop_for(from)?.clone();
                let alight = r.stop_for(to)?.clone();
                (board.stop_order < alight.stop_order).then(|| DirectRoute {
                    route: r.clone(),
                    board,
                    alight,
                })
            })
            .collect())
    }

    fn neighbors_of(
        &self,
        station: &StationId,
    ) -> Result<Vec<(Arc<Station>, Segment)>, NetworkError> {
        let Some(edges) = self.adjacency.get(station) else {
            return Ok(Vec::new());
        };

        // Tolerate dangling edges: a segment may reference a station the
        // store no longer holds.
        Ok(edges
            .iter()
            .filter_map(|(neighbor, seg)| {
                self.stations
                    .get(neighbor)
                    .map(|s| (s.clone(), seg.clone()))
            })
            .collect())
    }
}

//! Generic-traversal fallback strategy.
//!
//! Breadth-first search over the raw station-adjacency graph, used when no
//! scheduled route (direct or with one transfer) covers the journey. The
//! global visited set yields the minimum-hop path, not necessarily the
//! minimum-distance one; among equal-hop paths the first discovered wins,
//! which follows adjacency insertion order and is not canonical.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{RouteInfo, Segment, Station, StationId};
use crate::network::{NetworkError, NetworkModel};

use super::config::PlannerConfig;

/// A path over physical segments, with totals summed from the edges.
#[derive(Debug, Clone)]
pub struct PathCandidate {
    /// Stations from start to end inclusive.
    pub stations: Vec<Arc<Station>>,
    /// Traversed segments; one fewer than stations.
    pub segments: Vec<Segment>,
    pub total_distance_m: f64,
    pub total_duration_mins: i64,
    /// Best-effort label: a route serving the first edge, for display only.
    pub via_route: Option<RouteInfo>,
}

impl PathCandidate {
    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }
}

/// Find a minimum-hop path from `from` to `to`, bounded by `max_hops`.
///
/// Returns `Ok(None)` when BFS exhausts the bound without reaching the
/// target; the planner reports that as `NoRouteFound`.
pub fn find_path<N: NetworkModel>(
    network: &N,
    from: &Arc<Station>,
    to: &StationId,
    config: &PlannerConfig,
) -> Result<Option<PathCandidate>, NetworkError> {
    let mut visited: HashSet<StationId> = HashSet::new();
    let mut parents: HashMap<StationId, (StationId, Segment)> = HashMap::new();
    let mut seen: HashMap<StationId, Arc<Station>> = HashMap::new();
    let mut queue: VecDeque<(StationId, usize)> = VecDeque::new();

    visited.insert(from.id.clone());
    seen.insert(from.id.clone(), from.clone());
    queue.push_back((from.id.clone(), 0));

    let mut explored = 0usize;

    while let Some((current, depth)) = queue.pop_front() {
        explored += 1;

        if &current == to {
            let candidate = reconstruct(network, &parents, &seen, &from.id, to);
            debug!(
                from = %from.id,
                to = %to,
                hops = candidate.hop_count(),
                explored,
                "graph-traversal fallback found a path"
            );
            return Ok(Some(candidate));
        }

        if depth >= config.max_hops {
            continue;
        }

        for (neighbor, segment) in network.neighbors_of(&current)? {
            if visited.insert(neighbor.id.clone()) {
                parents.insert(neighbor.id.clone(), (current.clone(), segment));
                seen.insert(neighbor.id.clone(), neighbor.clone());
                queue.push_back((neighbor.id.clone(), depth + 1));
            }
        }
    }

    debug!(from = %from.id, to = %to, explored, "graph-traversal fallback exhausted");
    Ok(None)
}

fn reconstruct<N: NetworkModel>(
    network: &N,
    parents: &HashMap<StationId, (StationId, Segment)>,
    seen: &HashMap<StationId, Arc<Station>>,
    from: &StationId,
    to: &StationId,
) -> PathCandidate {
    let mut stations: Vec<Arc<Station>> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();

    let mut cursor = to.clone();
    // Walk the parent chain back to the start; every entry in `parents`
    // also has its station in `seen`.
    while &cursor != from {
        stations.push(seen[&cursor].clone());
        let (prev, segment) = parents[&cursor].clone();
        segments.push(segment);
        cursor = prev;
    }
    stations.push(seen[from].clone());

    stations.reverse();
    segments.reverse();

    let total_distance_m = segments.iter().map(|s| s.distance_m).sum();
    let total_duration_mins = segments.iter().map(|s| s.duration_mins).sum();

    // Label the first edge with a serving route when one exists. This is
    // display-only; a port error here must not fail the journey.
    let via_route = match stations.get(0..2) {
        Some([a, b]) => match network.find_direct_routes(&a.id, &b.id) {
            Ok(routes) => routes.into_iter().next().map(|d| RouteInfo {
                id: d.route.id.clone(),
                code: d.route.code.clone(),
                name: d.route.name.clone(),
            }),
            Err(e) => {
                debug!(error = %e, "route label lookup failed, continuing unlabelled");
                None
            }
        },
        _ => None,
    };

    PathCandidate {
        stations,
        segments,
        total_distance_m,
        total_duration_mins,
        via_route,
    }
}

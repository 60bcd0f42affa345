//! Itinerary types.
//!
//! An `Itinerary` is the assembled journey plan returned to the caller:
//! one or two ride legs, the walking distances at either end, and the
//! step-by-step instruction list.

use super::{DomainError, RouteId, StationId};

/// Which strategy produced an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItineraryKind {
    /// A single route serves both endpoints.
    Direct,
    /// Two routes joined at one transfer station.
    Transfer,
    /// A path over the raw station-adjacency graph.
    GraphPath,
}

impl ItineraryKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItineraryKind::Direct => "direct",
            ItineraryKind::Transfer => "transfer",
            ItineraryKind::GraphPath => "graph_path",
        }
    }
}

/// A station reference with its display name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: StationId,
    pub name: String,
}

/// Route identification carried on a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub id: RouteId,
    pub code: String,
    pub name: String,
}

/// One continuous ride within an itinerary.
///
/// Graph-path legs may have no serving route; the label is best-effort.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub route: Option<RouteInfo>,
    pub board: Place,
    pub alight: Place,
    /// Stops ridden through, alighting stop included, boarding stop not.
    pub stop_count: usize,
    pub duration_mins: i64,
}

/// A change from one route to another at a shared station.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPoint {
    pub at: Place,
    pub penalty_mins: i64,
}

/// A complete journey plan.
///
/// # Invariants
///
/// - One or two legs.
/// - A transfer point is present exactly when there are two legs.
#[derive(Debug, Clone)]
pub struct Itinerary {
    kind: ItineraryKind,
    legs: Vec<Leg>,
    transfer: Option<TransferPoint>,
    walk_to_start_m: f64,
    walk_from_end_m: f64,
    duration_mins: i64,
    distance_m: Option<f64>,
    instructions: Vec<String>,
}

impl Itinerary {
    /// Construct an itinerary, validating the leg/transfer contract.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ItineraryKind,
        legs: Vec<Leg>,
        transfer: Option<TransferPoint>,
        walk_to_start_m: f64,
        walk_from_end_m: f64,
        duration_mins: i64,
        distance_m: Option<f64>,
        instructions: Vec<String>,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        if legs.len() > 2 {
            return Err(DomainError::TooManyLegs(legs.len()));
        }
        if (legs.len() == 2) != transfer.is_some() {
            return Err(DomainError::TransferMismatch);
        }

        Ok(Itinerary {
            kind,
            legs,
            transfer,
            walk_to_start_m,
            walk_from_end_m,
            duration_mins,
            distance_m,
            instructions,
        })
    }

    pub fn kind(&self) -> ItineraryKind {
        self.kind
    }

    /// Ride legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn transfer(&self) -> Option<&TransferPoint> {
        self.transfer.as_ref()
    }

    /// Walk from the requested origin to the first station, in meters.
    /// Zero for station-to-station requests.
    pub fn walk_to_start_m(&self) -> f64 {
        self.walk_to_start_m
    }

    /// Walk from the last station to the requested destination, in meters.
    pub fn walk_from_end_m(&self) -> f64 {
        self.walk_from_end_m
    }

    /// Total journey duration in minutes, walking allowances included.
    pub fn duration_mins(&self) -> i64 {
        self.duration_mins
    }

    /// Total ride distance in meters, when the data carries it
    /// (graph paths; route legs have no per-segment distances).
    pub fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    /// Ordered human-readable steps.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Total stops ridden across all legs.
    pub fn stop_count(&self) -> usize {
        self.legs.iter().map(|l| l.stop_count).sum()
    }

    /// The station where the ride begins.
    pub fn origin(&self) -> &Place {
        // Safe: validated non-empty at construction
        &self.legs.first().unwrap().board
    }

    /// The station where the ride ends.
    pub fn destination(&self) -> &Place {
        &self.legs.last().unwrap().alight
    }
}

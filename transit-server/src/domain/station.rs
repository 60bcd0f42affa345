//! Station types.

use crate::geo::Point;

use super::StationId;

/// Operational status of a station.
///
/// Only [`StationStatus::Active`] stations participate in journey planning;
/// the other states exist for the fleet-management side of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    Active,
    Maintenance,
    Inactive,
}

/// Classification of a station within the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationKind {
    /// A route endpoint with layover capacity.
    Terminal,
    /// A regular stop along a route.
    Intermediate,
    /// A minor roadside stop.
    Stop,
}

/// A physical stop location in the transit network.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub position: Point,
    pub status: StationStatus,
    pub kind: StationKind,
}

impl Station {
    /// Returns true if this station participates in planning.
    pub fn is_active(&self) -> bool {
        self.status == StationStatus::Active
    }
}

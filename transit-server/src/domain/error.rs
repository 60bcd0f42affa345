//! Domain error types.
//!
//! These errors represent validation failures in the domain layer, distinct
//! from query-port and request-handling errors.

use super::RouteId;

/// Domain-level validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Two stops on the same route share a stop order
    #[error("route {route} has duplicate stop order {stop_order}")]
    DuplicateStopOrder { route: RouteId, stop_order: u32 },

    /// Arrival offsets must not decrease along a route
    #[error("route {route} arrival offset decreases at stop order {stop_order}")]
    OffsetDecreases { route: RouteId, stop_order: u32 },

    /// An itinerary must contain at least one leg
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// An itinerary may ride at most two routes
    #[error("itinerary has {0} legs, at most 2 are supported")]
    TooManyLegs(usize),

    /// Two-leg itineraries need a transfer point, one-leg itineraries must not have one
    #[error("transfer point must be present exactly when the itinerary has two legs")]
    TransferMismatch,
}

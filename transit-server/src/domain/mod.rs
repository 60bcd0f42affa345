//! Domain types for the transit journey planner.
//!
//! The core model of the network: stations, routes with their ordered
//! stops, physical segments, and the assembled itinerary returned to
//! callers. Types validate their invariants at construction, so code that
//! receives them can trust their validity.

mod error;
mod id;
mod itinerary;
mod route;
mod segment;
mod station;

pub use error::DomainError;
pub use id::{InvalidId, RouteId, StationId};
pub use itinerary::{Itinerary, ItineraryKind, Leg, Place, RouteInfo, TransferPoint};
pub use route::{Route, RouteStatus, Stop};
pub use segment::Segment;
pub use station::{Station, StationKind, StationStatus};

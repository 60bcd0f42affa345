//! Bus transit journey planner server.
//!
//! Answers "how do I get from station A to station B" over a network of
//! stations, bus routes, and the road segments connecting stations:
//! preferring a direct route, falling back to a single transfer, and
//! finally to a generic path over the raw station-adjacency graph.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod network;
pub mod planner;
pub mod web;

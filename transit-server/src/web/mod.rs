//! HTTP surface: routing, handlers, DTOs, and shared state.
//!
//! This layer is deliberately thin. It validates and converts requests,
//! wraps the planner with the response cache, and maps planner errors to
//! HTTP statuses; all journey logic lives in [`crate::planner`].

pub mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;

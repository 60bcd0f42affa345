//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::cache::PlanCache;
use crate::geo::Point;
use crate::network::{NetworkError, NetworkModel};
use crate::planner::{PlanError, Planner};

use super::dto::*;
use super::state::AppState;

/// Default radius for the nearby-stations query, in meters.
const DEFAULT_NEARBY_RADIUS_M: f64 = 2_000.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journey/plan", post(plan_journey))
        .route("/journey/nearby-stations", get(nearby_stations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a journey between two endpoints.
///
/// The response cache wraps the planner here: get before compute, set
/// after. The planner itself never sees the cache.
async fn plan_journey(
    State(state): State<AppState>,
    Json(req): Json<PlanJourneyRequest>,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    let request = req
        .into_plan_request()
        .map_err(|message| AppError::BadRequest { message })?;

    let key = PlanCache::request_key(&request);
    if let Some(cached) = state.cache.get(&key).await {
        return Ok(Json(PlanJourneyResponse {
            itineraries: vec![ItineraryResult::from_itinerary(&cached)],
        }));
    }

    let planner = Planner::new(state.network.as_ref(), &state.config);
    let itinerary = Arc::new(planner.plan(&request)?);

    state.cache.insert(key, itinerary.clone()).await;

    Ok(Json(PlanJourneyResponse {
        itineraries: vec![ItineraryResult::from_itinerary(&itinerary)],
    }))
}

/// Find stations near a coordinate, nearest first.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(query): Query<NearbyStationsQuery>,
) -> Result<Json<NearbyStationsResponse>, AppError> {
    let radius = query.radius_m.unwrap_or(DEFAULT_NEARBY_RADIUS_M);
    if radius <= 0.0 {
        return Err(AppError::BadRequest {
            message: "radius_m must be positive".to_string(),
        });
    }

    let origin = Point::new(query.latitude, query.longitude);
    let hits = state.network.find_stations_near(origin, Some(radius))?;

    let stations = hits
        .into_iter()
        .map(|(station, distance_m)| NearbyStationResult {
            id: station.id.as_str().to_string(),
            name: station.name.clone(),
            latitude: station.position.lat,
            longitude: station.position.lng,
            distance_m,
        })
        .collect();

    Ok(Json(NearbyStationsResponse { stations }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { code: &'static str, message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
            PlanError::StationNotFound(message) => AppError::NotFound {
                code: "station_not_found",
                message,
            },
            PlanError::NoRouteFound { .. } => AppError::NotFound {
                code: "no_route_found",
                message: e.to_string(),
            },
            PlanError::Upstream(inner) => AppError::Upstream {
                message: inner.to_string(),
            },
            PlanError::Internal(message) => AppError::Internal { message },
        }
    }
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "invalid_request", message)
            }
            AppError::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            AppError::Upstream { message } => {
                (StatusCode::BAD_GATEWAY, "upstream_unavailable", message)
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };

        warn!(%status, code, error = %message, "request failed");

        let body = Json(ErrorResponse {
            code,
            error: message,
        });
        (status, body).into_response()
    }
}

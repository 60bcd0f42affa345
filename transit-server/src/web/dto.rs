//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Leg, Place, RouteInfo, StationId, TransferPoint};
use crate::geo::Point;
use crate::planner::{Endpoint, PlanRequest};

/// Request to plan a journey.
///
/// Either both station ids or both coordinate pairs must be present; a
/// station id wins over coordinates for the same endpoint.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    pub from_station_id: Option<String>,
    pub to_station_id: Option<String>,
    pub from_lat: Option<f64>,
    pub from_lng: Option<f64>,
    pub to_lat: Option<f64>,
    pub to_lng: Option<f64>,
}

impl PlanJourneyRequest {
    /// Convert into a validated planner request.
    pub fn into_plan_request(self) -> Result<PlanRequest, String> {
        let from = endpoint(
            "from",
            self.from_station_id.as_deref(),
            self.from_lat,
            self.from_lng,
        )?;
        let to = endpoint("to", self.to_station_id.as_deref(), self.to_lat, self.to_lng)?;
        Ok(PlanRequest::new(from, to))
    }
}

fn endpoint(
    side: &str,
    station_id: Option<&str>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Endpoint, String> {
    if let Some(id) = station_id {
        let id = StationId::parse(id).map_err(|e| format!("{side}_station_id: {e}"))?;
        return Ok(Endpoint::Station(id));
    }

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Endpoint::Coordinate(Point::new(lat, lng))),
        _ => Err(format!(
            "either {side}_station_id or both {side}_lat and {side}_lng are required"
        )),
    }
}

/// Response for journey planning: a one-element ranked itinerary list.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    pub itineraries: Vec<ItineraryResult>,
}

/// An itinerary in a planning response.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// `direct`, `transfer` or `graph_path`.
    pub kind: &'static str,
    pub legs: Vec<LegResult>,
    pub transfer: Option<TransferResult>,
    pub walk_to_start_m: f64,
    pub walk_from_end_m: f64,
    pub duration_mins: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    pub instructions: Vec<String>,
}

/// A ride leg in a planning response.
#[derive(Debug, Serialize)]
pub struct LegResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteResult>,
    pub board: PlaceResult,
    pub alight: PlaceResult,
    pub stop_count: usize,
    pub duration_mins: i64,
}

/// Route identification in a planning response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub code: String,
    pub name: String,
}

/// A station reference in a planning response.
#[derive(Debug, Serialize)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
}

/// The transfer point of a two-leg itinerary.
#[derive(Debug, Serialize)]
pub struct TransferResult {
    pub at: PlaceResult,
    pub penalty_mins: i64,
}

/// Query for stations near a coordinate.
#[derive(Debug, Deserialize)]
pub struct NearbyStationsQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters; defaults to 2000.
    pub radius_m: Option<f64>,
}

/// Response for the nearby-stations query.
#[derive(Debug, Serialize)]
pub struct NearbyStationsResponse {
    pub stations: Vec<NearbyStationResult>,
}

/// A station with its distance from the queried coordinate.
#[derive(Debug, Serialize)]
pub struct NearbyStationResult {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_m: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable failure code.
    pub code: &'static str,
    /// Human-readable reason.
    pub error: String,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            kind: itinerary.kind().as_str(),
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
            transfer: itinerary.transfer().map(TransferResult::from_transfer),
            walk_to_start_m: itinerary.walk_to_start_m(),
            walk_from_end_m: itinerary.walk_from_end_m(),
            duration_mins: itinerary.duration_mins(),
            distance_m: itinerary.distance_m(),
            instructions: itinerary.instructions().to_vec(),
        }
    }
}

impl LegResult {
    fn from_leg(leg: &Leg) -> Self {
        Self {
            route: leg.route.as_ref().map(RouteResult::from_route),
            board: PlaceResult::from_place(&leg.board),
            alight: PlaceResult::from_place(&leg.alight),
            stop_count: leg.stop_count,
            duration_mins: leg.duration_mins,
        }
    }
}

impl RouteResult {
    fn from_route(route: &RouteInfo) -> Self {
        Self {
            id: route.id.as_str().to_string(),
            code: route.code.clone(),
            name: route.name.clone(),
        }
    }
}

impl PlaceResult {
    fn from_place(place: &Place) -> Self {
        Self {
            id: place.id.as_str().to_string(),
            name: place.name.clone(),
        }
    }
}

impl TransferResult {
    fn from_transfer(transfer: &TransferPoint) -> Self {
        Self {
            at: PlaceResult::from_place(&transfer.at),
            penalty_mins: transfer.penalty_mins,
        }
    }
}

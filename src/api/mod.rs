use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    EvacError,
    config::SearchConfig,
    evacuation::{
        CenterAssessment, CenterDirectory, DirectionsRequest, MapsPlatform, ProximitySearch,
        UNKNOWN_DISTANCE,
    },
    models::{Facility, GeoPoint},
};

#[derive(Clone)]
pub struct ApiState {
    pub directory: Arc<dyn CenterDirectory>,
    pub search: SearchConfig,
    pub platform: MapsPlatform,
}

/// Device position and options shared by every endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PositionQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    pub platform: Option<MapsPlatform>,
}

impl PositionQuery {
    fn origin(&self) -> Result<Option<GeoPoint>, StatusCode> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).map(Some).map_err(|e| {
                warn!("Rejected position: {}", e);
                StatusCode::BAD_REQUEST
            }),
            (None, None) => Ok(None),
            _ => {
                warn!("Rejected position: lat and lon must be given together");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    }

    fn radius(&self) -> Result<Option<f64>, StatusCode> {
        match self.radius {
            Some(radius) if !radius.is_finite() || radius <= 0.0 => {
                warn!("Rejected radius: {}", radius);
                Err(StatusCode::BAD_REQUEST)
            }
            radius => Ok(radius),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: u32,
    pub current_occupancy: u32,
    pub occupancy: String,
    pub percentage: f64,
    pub raw_ratio: f64,
    pub over_capacity: bool,
    pub tier: String,
    pub color: String,
    pub distance_km: Option<f64>,
    pub distance: String,
    pub facilities: Vec<Facility>,
}

impl From<&CenterAssessment> for ApiCenter {
    fn from(assessment: &CenterAssessment) -> Self {
        let center = &assessment.center;
        Self {
            id: center.id,
            name: center.name.clone(),
            address: center.address.clone(),
            latitude: center.location.map(|l| l.latitude()),
            longitude: center.location.map(|l| l.longitude()),
            capacity: center.capacity,
            current_occupancy: center.current_occupancy,
            occupancy: center.occupancy_display(),
            percentage: assessment.capacity.percentage,
            raw_ratio: assessment.capacity.raw_ratio,
            over_capacity: assessment.capacity.is_over_capacity(),
            tier: assessment.capacity.tier.to_string(),
            color: assessment.capacity.tier.color_hex().to_string(),
            distance_km: assessment.distance_km(),
            distance: assessment
                .distance
                .as_ref()
                .map_or_else(|| UNKNOWN_DISTANCE.to_string(), |d| d.display.clone()),
            facilities: center.facilities.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiDirections {
    pub center_id: u32,
    pub platform: MapsPlatform,
    pub uri: String,
    pub map_link: String,
    pub embed_url: String,
    pub distance_km: Option<f64>,
    pub distance: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/centers", get(list_centers))
        .route("/centers/nearest", get(nearest_center))
        .route("/centers/{id}", get(get_center))
        .route("/centers/{id}/directions", get(get_directions))
        .with_state(state)
}

fn status_for(err: &EvacError) -> StatusCode {
    match err {
        EvacError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        EvacError::MissingCoordinates { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn assess_all(
    state: &ApiState,
    origin: Option<&GeoPoint>,
) -> Result<Vec<CenterAssessment>, StatusCode> {
    ProximitySearch::assess_all(state.directory.as_ref(), origin).map_err(|e| status_for(&e))
}

async fn list_centers(
    State(state): State<ApiState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<Vec<ApiCenter>>, StatusCode> {
    let origin = query.origin()?;
    let mut assessments = assess_all(&state, origin.as_ref())?;

    if let Some(radius) = query.radius()? {
        assessments = ProximitySearch::within_radius(assessments, radius);
    }
    assessments.truncate(state.search.max_results as usize);

    Ok(Json(assessments.iter().map(ApiCenter::from).collect()))
}

async fn nearest_center(
    State(state): State<ApiState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<ApiCenter>, StatusCode> {
    let origin = query.origin()?.ok_or(StatusCode::BAD_REQUEST)?;
    let radius = query.radius()?.unwrap_or(state.search.radius_km);

    let assessments = ProximitySearch::within_radius(assess_all(&state, Some(&origin))?, radius);
    ProximitySearch::nearest_available(&assessments)
        .map(|assessment| Json(ApiCenter::from(assessment)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_center(
    State(state): State<ApiState>,
    Path(id): Path<u32>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<ApiCenter>, StatusCode> {
    let origin = query.origin()?;
    let center = state.directory.find(id).ok_or(StatusCode::NOT_FOUND)?;
    let assessment =
        ProximitySearch::assess(&center, origin.as_ref()).map_err(|e| status_for(&e))?;
    Ok(Json(ApiCenter::from(&assessment)))
}

async fn get_directions(
    State(state): State<ApiState>,
    Path(id): Path<u32>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<ApiDirections>, StatusCode> {
    let origin = query.origin()?;
    let center = state.directory.find(id).ok_or(StatusCode::NOT_FOUND)?;
    let request = DirectionsRequest::for_center(&center, origin).map_err(|e| {
        warn!("Directions unavailable: {}", e);
        status_for(&e)
    })?;

    let platform = query.platform.unwrap_or(state.platform);
    let distance = request.distance();

    Ok(Json(ApiDirections {
        center_id: center.id,
        platform,
        uri: request.uri(platform),
        map_link: request.map_link(),
        embed_url: request.embed_url(),
        distance_km: distance.as_ref().map(|d| d.kilometers),
        distance: distance.map_or_else(|| UNKNOWN_DISTANCE.to_string(), |d| d.display),
    }))
}

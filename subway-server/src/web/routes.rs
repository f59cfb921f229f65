//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Distance, LineDraft, LineId, StationId};
use crate::route::RouteError;
use crate::store::StoreError;
use crate::subway::SubwayError;
use crate::topology::TopologyError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            post(insert_section).delete(remove_section),
        )
        .route("/paths", get(find_path))
        .route("/paths/detail", get(network_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn created(location: String, body: impl serde::Serialize) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<StationRequest>,
) -> Result<Response, AppError> {
    let station = state.subway.create_station(&req.name)?;
    Ok(created(
        format!("/stations/{}", station.id),
        StationResponse::from_station(&station),
    ))
}

async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResponse>>, AppError> {
    let stations = state.subway.stations()?;
    Ok(Json(
        stations.iter().map(StationResponse::from_station).collect(),
    ))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_station(StationId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a line together with its first segment.
async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<LineRequest>,
) -> Result<Response, AppError> {
    let draft = LineDraft::new(&req.name, &req.color, req.extra_fare).map_err(SubwayError::from)?;
    let distance = Distance::new(req.distance).map_err(SubwayError::from)?;

    let detail = state.subway.create_line(
        draft,
        StationId(req.up_station_id),
        StationId(req.down_station_id),
        distance,
    )?;
    Ok(created(
        format!("/lines/{}", detail.line.id),
        LineResponse::from_detail(&detail),
    ))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.subway.lines()?;
    Ok(Json(lines.iter().map(LineResponse::from_detail).collect()))
}

async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let detail = state.subway.line(LineId(id))?;
    Ok(Json(LineResponse::from_detail(&detail)))
}

async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<LineUpdateRequest>,
) -> Result<StatusCode, AppError> {
    let draft = LineDraft::new(&req.name, &req.color, req.extra_fare).map_err(SubwayError::from)?;
    state.subway.update_line(LineId(id), draft)?;
    Ok(StatusCode::OK)
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_line(LineId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach a segment to a line, extending or splitting it.
async fn insert_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<SectionsResponse>, AppError> {
    let distance = Distance::new(req.distance).map_err(SubwayError::from)?;
    let segments = state.subway.insert_segment(
        LineId(id),
        StationId(req.up_station_id),
        StationId(req.down_station_id),
        distance,
    )?;
    Ok(Json(SectionsResponse::from_segments(&segments)))
}

/// Detach a station from a line, merging its neighbouring segments.
async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<SectionDeleteQuery>,
) -> Result<StatusCode, AppError> {
    state
        .subway
        .remove_segment(LineId(id), StationId(query.station_id))?;
    Ok(StatusCode::OK)
}

/// Shortest priced route between two stations.
async fn find_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let route = state.subway.find_route(
        StationId(query.source),
        StationId(query.target),
        query.age,
    )?;
    Ok(Json(PathResponse::from_route(&route)))
}

/// Every line with its stations, for drawing the whole network.
async fn network_detail(State(state): State<AppState>) -> Result<Json<NetworkResponse>, AppError> {
    let lines = state.subway.lines()?;
    Ok(Json(NetworkResponse {
        lines: lines.iter().map(LineResponse::from_detail).collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::StationNotFound(_) | StoreError::LineNotFound(_) => {
                AppError::NotFound { message }
            }
            StoreError::DuplicateStationName(_)
            | StoreError::DuplicateLineName(_)
            | StoreError::StationInUse(_)
            | StoreError::Conflict(_) => AppError::Conflict { message },
            StoreError::Poisoned | StoreError::Snapshot { .. } => AppError::Internal { message },
        }
    }
}

impl From<SubwayError> for AppError {
    fn from(e: SubwayError) -> Self {
        let message = e.to_string();
        match e {
            SubwayError::Domain(_) => AppError::BadRequest { message },
            SubwayError::Topology(TopologyError::StationNotOnLine(_)) => {
                AppError::NotFound { message }
            }
            // Stored segments are corrupt
            SubwayError::Topology(TopologyError::NotAPath(_)) => AppError::Internal { message },
            SubwayError::Topology(_) => AppError::BadRequest { message },
            SubwayError::Route(RouteError::StationNotFound(_)) => AppError::NotFound { message },
            SubwayError::Route(RouteError::SameStation(_) | RouteError::NoPath { .. }) => {
                AppError::BadRequest { message }
            }
            SubwayError::Route(RouteError::Fare(_)) => AppError::Internal { message },
            SubwayError::Route(RouteError::Store(e)) | SubwayError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

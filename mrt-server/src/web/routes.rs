//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::StationId;
use crate::planner::{PlanError, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/:id", get(get_station))
        .route("/route", get(plan_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station in the network.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .network
        .stations()
        .iter()
        .map(|station| StationResult::from_station(&state.network, station))
        .collect();

    Json(StationsResponse { stations })
}

/// Look up a single station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let id = StationId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let station = state.network.station(&id).map_err(|e| AppError::NotFound {
        message: e.to_string(),
    })?;

    Ok(Json(StationResult::from_station(&state.network, station)))
}

/// Plan a route between two stations.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = StationId::parse(&req.from).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let to = StationId::parse(&req.to).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let planned = state.planner.plan(&from, &to).await.map_err(AppError::from)?;

    Ok(Json(RouteResponse {
        from: req.from,
        to: req.to,
        route: planned.as_deref().map(RouteResult::from_planned),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Search(SearchError::UnknownStation(_)) => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::Search(SearchError::Cancelled) | PlanError::Summary(_) => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

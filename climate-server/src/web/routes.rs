//! HTTP route handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::domain::{DateRange, QueryDate, Station};
use crate::store::{ClimateStore, StoreError};

use super::dto::*;
use super::state::AppState;

const START_DATE_NOT_FOUND: &str = "Start date not found. Please enter a date in the format 'YYYYMMDD' between 2010-01-01 and 2017-08-23";

const DATES_NOT_FOUND: &str = "Dates not found. Please enter start and end dates in the format 'YYYYMMDD' between 2010-01-01 and 2017-08-23";

const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Create the application router.
///
/// Requests taking longer than `request_timeout` are answered with 408.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/:start_date", get(start_summary))
        .route("/api/v1.0/:start_date/:end_date", get(start_end_summary))
        .fallback(not_found)
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Landing page listing available routes.
async fn home() -> Json<RoutesResponse> {
    info!("Homepage");
    Json(RoutesResponse {
        routes: ROUTES.to_vec(),
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Precipitation for the last year, one value per date.
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationResponse>, AppError> {
    let cutoff = state.query.cutoff_date;
    let readings = run_query(&state, move |store| store.precipitation_since(cutoff)).await?;

    Ok(Json(precipitation_by_date(readings)))
}

/// All stations.
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, AppError> {
    let stations = run_query(&state, |store| store.stations()).await?;
    Ok(Json(stations))
}

/// Last year's temperatures at the most active station.
async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    let cutoff = state.query.cutoff_date;
    let station = state.query.active_station.clone();
    let readings = run_query(&state, move |store| {
        store.temperatures_since(&station, cutoff)
    })
    .await?;

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// Temperature summary from a start date onwards.
async fn start_summary(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureSummaryResponse>, AppError> {
    let Path(start) = path.map_err(|e| {
        debug!("Rejected start date path: {e}");
        AppError::NotFound {
            message: START_DATE_NOT_FOUND.to_string(),
        }
    })?;

    let start = QueryDate::parse(&start).map_err(|e| {
        debug!(start = %start, "Rejected start date: {e}");
        AppError::NotFound {
            message: START_DATE_NOT_FOUND.to_string(),
        }
    })?;

    let range = DateRange::starting(start);
    let summary = run_query(&state, move |store| store.temperature_summary(range)).await?;

    Ok(Json(summary.into()))
}

/// Temperature summary between two dates, inclusive.
async fn start_end_summary(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureSummaryResponse>, AppError> {
    let Path((start, end)) = path.map_err(|e| {
        debug!("Rejected date range path: {e}");
        AppError::NotFound {
            message: DATES_NOT_FOUND.to_string(),
        }
    })?;

    let (start, end) = match (QueryDate::parse(&start), QueryDate::parse(&end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => {
            debug!(start = %start, end = %end, "Rejected date range: {e}");
            return Err(AppError::NotFound {
                message: DATES_NOT_FOUND.to_string(),
            });
        }
    };

    let range = DateRange::between(start, end);
    let summary = run_query(&state, move |store| store.temperature_summary(range)).await?;

    Ok(Json(summary.into()))
}

/// Unknown path.
async fn not_found() -> AppError {
    AppError::NotFound {
        message: "Not found".to_string(),
    }
}

/// Run a blocking store query off the async runtime.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ClimateStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(&state.store);

    tokio::task::spawn_blocking(move || query(store.as_ref()))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("query task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Bad path or date; rendered as 404
    NotFound { message: String },

    /// Data source or task failure; rendered as 500
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => {
                warn!(%message, "Request failed");
                (StatusCode::NOT_FOUND, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

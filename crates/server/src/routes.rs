use std::sync::Arc;

use api_types::RefreshPeriodDto;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use railwatch_core::MapFrame;
use railwatch_core::transit::FeedFetcher;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::backend::Backend;
use crate::config::{PeriodOutOfRange, RefreshPeriod};
use crate::refresh::MapState;
use crate::scheduler::RefreshScheduler;

pub struct AppState<F> {
    pub map: Arc<MapState>,
    pub scheduler: Arc<RefreshScheduler<F>>,
    pub backend: Arc<Backend<F>>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            scheduler: self.scheduler.clone(),
            backend: self.backend.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no map frame yet")]
    NotReady,

    #[error(transparent)]
    InvalidPeriod(#[from] PeriodOutOfRange),

    #[error("refresh period must be a whole number of seconds: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidPeriod(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

pub fn create_router<F: FeedFetcher + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/frame", get(frame::<F>))
        .route("/refresh-period", get(refresh_period::<F>).post(set_refresh_period::<F>))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn frame<F: FeedFetcher + 'static>(State(state): State<AppState<F>>) -> Result<Json<MapFrame>, ApiError> {
    let frame = state.map.frame().await.ok_or(ApiError::NotReady)?;
    Ok(Json(MapFrame::clone(&frame)))
}

async fn refresh_period<F: FeedFetcher + 'static>(State(state): State<AppState<F>>) -> Json<RefreshPeriodDto> {
    Json(RefreshPeriodDto {
        seconds: state.scheduler.period().await.seconds(),
    })
}

async fn set_refresh_period<F: FeedFetcher + 'static>(
    State(state): State<AppState<F>>,
    body: Result<Json<RefreshPeriodDto>, JsonRejection>,
) -> Result<Json<RefreshPeriodDto>, ApiError> {
    let Json(body) = body?;
    let period = RefreshPeriod::new(body.seconds)?;
    state.scheduler.set_period(period).await;
    info!(seconds = period.seconds(), "refresh period changed");

    if let Err(e) = state.backend.store_refresh_period(period).await {
        warn!("failed to store refresh period on backend: {e}");
    }

    Ok(Json(RefreshPeriodDto {
        seconds: period.seconds(),
    }))
}

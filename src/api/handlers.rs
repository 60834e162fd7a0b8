use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

use super::envelope::{ApiError, Callback};
use crate::stats::StatsService;

pub struct AppState {
    pub service: StatsService,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Day to report on; yesterday when omitted
    pub date: Option<String>,
}

/// Usage statistics for one day
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    callback: Callback,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!("Rejected stats query: {}", rejection.body_text());
            return callback.error(ApiError::with_explanation(
                StatusCode::BAD_REQUEST,
                rejection.body_text(),
            ));
        }
    };

    match state.service.collect(query.date.as_deref()).await {
        Ok(daily) => callback.success(&daily),
        Err(err) => {
            if err.is_client_error() {
                warn!("Stats request rejected: {}", err);
            } else {
                error!("Failed to collect stats: {}", err);
            }
            callback.error(err.into())
        }
    }
}

/// Browser preflight; the CORS headers are added by the router layers
pub async fn preflight() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn not_found(callback: Callback) -> Response {
    callback.error(ApiError::new(StatusCode::NOT_FOUND))
}

pub async fn method_not_allowed(callback: Callback) -> Response {
    callback.error(ApiError::new(StatusCode::METHOD_NOT_ALLOWED))
}

/// Errors surfaced by the middleware stack (timeouts, overload)
pub async fn handle_middleware_error(callback: Callback, err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        return callback.error(ApiError::new(StatusCode::REQUEST_TIMEOUT));
    }

    error!("Unhandled middleware error: {}", err);
    callback.error(ApiError::with_explanation(
        StatusCode::INTERNAL_SERVER_ERROR,
        err.to_string(),
    ))
}

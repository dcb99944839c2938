//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual work.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{CalculationAccepted, CalculationRequest, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::delivery_tracker::DeliveryRecord;
use crate::services::dispatcher::CalculationJob;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        tracked_requests: state.tracker.len(),
    })
}

/// POST /v1/calculations
///
/// Validate presence of the required fields, register the request, and
/// enqueue it for background processing. Returns `202 Accepted`
/// immediately; the real result only ever arrives at the callback URL.
pub async fn submit_calculation(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CalculationAccepted>), AppError> {
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e.body_text())))?;

    let observation_id = request.observation_id.ok_or_else(|| {
        AppError::BadRequest("missing required field: observationId".to_string())
    })?;
    let callback_url = require_non_empty(request.callback_url, "callbackUrl")?;
    let token = require_non_empty(request.token, "token")?;

    let request_id = state.tracker.register(observation_id);
    let job = CalculationJob {
        request_id,
        observation_id,
        callback_url,
        token,
        points: request.points,
    };

    if let Err(e) = state.dispatcher.try_dispatch(job) {
        state.tracker.discard(&request_id);
        return Err(e.into());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(CalculationAccepted {
            status: "accepted".to_string(),
            observation_id,
            request_id,
        }),
    ))
}

/// GET /v1/calculations/{request_id}
///
/// Get the tracked delivery state of an accepted calculation.
pub async fn get_calculation_status(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> HandlerResult<DeliveryRecord> {
    let record = state.tracker.get(&request_id).ok_or_else(|| {
        AppError::NotFound(format!("calculation request {} not found", request_id))
    })?;

    Ok(Json(record))
}

fn require_non_empty(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "missing required field: {}",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_accepts_value() {
        let value = require_non_empty(Some("token".to_string()), "token").unwrap();
        assert_eq!(value, "token");
    }

    #[test]
    fn test_require_non_empty_rejects_missing_and_blank() {
        assert!(require_non_empty(None, "token").is_err());
        assert!(require_non_empty(Some(String::new()), "token").is_err());
        assert!(require_non_empty(Some("   ".to_string()), "token").is_err());
    }
}

//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Wire field names are camelCase to match the submitting system's
//! contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::models::SkyPoint;
pub use crate::services::delivery_tracker::{DeliveryRecord, DeliveryStatus};

/// Request body for submitting a calculation.
///
/// The required fields are optional here so presence can be validated by
/// the handler with a proper `400`, instead of a serde-level rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Identifier of the observation batch in the submitting system
    pub observation_id: Option<i64>,
    /// URL the result will be delivered to
    pub callback_url: Option<String>,
    /// Opaque token echoed back in the delivery header
    pub token: Option<String>,
    /// Sky points to range on (may be empty)
    #[serde(default)]
    pub points: Vec<SkyPoint>,
}

/// Response for an accepted calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationAccepted {
    /// Always `"accepted"`
    pub status: String,
    /// Echo of the submitted observation id
    pub observation_id: i64,
    /// Tracker id for polling delivery state
    pub request_id: Uuid,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of tracked calculation requests
    pub tracked_requests: usize,
}

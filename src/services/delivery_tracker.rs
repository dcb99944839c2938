//! Per-request delivery state tracking.
//!
//! Once a calculation is accepted, the submitter only ever hears back
//! through its callback URL; a failed delivery would otherwise be visible
//! in logs alone. This in-memory tracker keeps the lifecycle and terminal
//! outcome of every request so the status endpoint can expose them.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of an accepted calculation request, terminal on the first
/// delivery outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Accepted and waiting in the dispatch queue.
    Queued,
    /// Background task started, sleeping out the pre-computation delay.
    Delayed,
    /// Distance estimation finished, delivery not yet attempted.
    Computed,
    /// The callback endpoint answered 2xx.
    Delivered,
    /// The callback endpoint answered with a non-2xx status.
    DeliveryFailed,
    /// Transport-level failure reaching the callback endpoint.
    DeliveryErrored,
}

impl DeliveryStatus {
    /// Whether the request has reached one of the terminal outcomes.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliveryStatus::Delivered
                | DeliveryStatus::DeliveryFailed
                | DeliveryStatus::DeliveryErrored
        )
    }
}

/// Tracked state of a single calculation request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub request_id: Uuid,
    pub observation_id: i64,
    pub status: DeliveryStatus,
    /// Estimated distance in kilometers, once computed.
    pub distance_km: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// In-memory delivery tracker.
#[derive(Clone)]
pub struct DeliveryTracker {
    records: Arc<RwLock<HashMap<Uuid, DeliveryRecord>>>,
}

impl DeliveryTracker {
    /// Create a new delivery tracker.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a newly accepted request and return its id.
    pub fn register(&self, observation_id: i64) -> Uuid {
        let request_id = Uuid::new_v4();
        let now = chrono::Utc::now();
        let record = DeliveryRecord {
            request_id,
            observation_id,
            status: DeliveryStatus::Queued,
            distance_km: None,
            created_at: now,
            updated_at: now,
        };
        self.records.write().insert(request_id, record);
        request_id
    }

    /// Drop a record whose dispatch was rejected before it ever ran.
    pub fn discard(&self, request_id: &Uuid) {
        self.records.write().remove(request_id);
    }

    /// Record a lifecycle transition.
    pub fn set_status(&self, request_id: &Uuid, status: DeliveryStatus) {
        let mut records = self.records.write();
        if let Some(record) = records.get_mut(request_id) {
            record.status = status;
            record.updated_at = chrono::Utc::now();
        }
    }

    /// Record the computed estimate alongside the `Computed` transition.
    pub fn record_estimate(&self, request_id: &Uuid, distance_km: Option<f64>) {
        let mut records = self.records.write();
        if let Some(record) = records.get_mut(request_id) {
            record.status = DeliveryStatus::Computed;
            record.distance_km = distance_km;
            record.updated_at = chrono::Utc::now();
        }
    }

    /// Get a record by request id.
    pub fn get(&self, request_id: &Uuid) -> Option<DeliveryRecord> {
        self.records.read().get(request_id).cloned()
    }

    /// Number of tracked requests.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no requests are tracked.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for DeliveryTracker {
    fn default() -> Self {
        Self::new()
    }
}

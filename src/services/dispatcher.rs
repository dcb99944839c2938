//! Bounded background-task dispatch.
//!
//! One calculation job per accepted request, but never an unbounded number
//! in flight: jobs enter a fixed-capacity queue, and a semaphore caps how
//! many run concurrently. A full queue rejects the request at acceptance
//! time instead of piling up work.

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::models::SkyPoint;
use crate::services::calculation;
use crate::services::callback::CallbackClient;
use crate::services::delivery_tracker::DeliveryTracker;

/// One accepted calculation request, consumed exactly once.
#[derive(Debug, Clone)]
pub struct CalculationJob {
    pub request_id: Uuid,
    pub observation_id: i64,
    pub callback_url: String,
    pub token: String,
    pub points: Vec<SkyPoint>,
}

/// Dispatch rejection reasons.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("calculation queue is full")]
    QueueFull,
    #[error("calculation dispatcher is shut down")]
    Closed,
}

/// Accepts jobs into a bounded queue consumed by a background loop.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<CalculationJob>,
}

impl Dispatcher {
    /// Start the consumer loop and return a handle for enqueueing jobs.
    ///
    /// The loop holds the queue's receiving end and spawns one task per
    /// job, gated by a semaphore sized to the configured concurrency
    /// limit. Dropping every handle closes the queue and ends the loop
    /// once it drains.
    pub fn start(config: &ServiceConfig, tracker: DeliveryTracker, client: CallbackClient) -> Self {
        let (tx, mut rx) = mpsc::channel::<CalculationJob>(config.queue_capacity);
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_calculations));
        let delay = config.delay;

        tokio::spawn(async move {
            loop {
                // Acquire the permit before pulling a job, so a job never
                // leaves the queue while nothing can run it.
                let permit = match semaphore.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed.
                    Err(_) => break,
                };
                let Some(job) = rx.recv().await else {
                    break;
                };
                let tracker = tracker.clone();
                let client = client.clone();
                tokio::spawn(async move {
                    calculation::run_calculation(job, &tracker, &client, delay).await;
                    drop(permit);
                });
            }
            info!("calculation dispatcher stopped");
        });

        Self { tx }
    }

    /// Enqueue a job without waiting; fails fast under backpressure.
    pub fn try_dispatch(&self, job: CalculationJob) -> Result<(), DispatchError> {
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(job) => {
                warn!(
                    request_id = %job.request_id,
                    observation_id = job.observation_id,
                    "calculation queue full, rejecting request"
                );
                DispatchError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}

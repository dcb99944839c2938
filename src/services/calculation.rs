//! The background calculation task.
//!
//! Runs once per accepted request: waits out the configured delay,
//! estimates the distance from the submitted points, then makes exactly
//! one delivery attempt to the callback URL. Every path ends in a logged
//! terminal state; nothing is retried and no failure escapes the task.

use tracing::{error, info};

use crate::algorithms::ranging;
use crate::config::DelayRange;
use crate::models;
use crate::services::callback::CallbackClient;
use crate::services::delivery_tracker::{DeliveryStatus, DeliveryTracker};
use crate::services::dispatcher::CalculationJob;

/// Execute a calculation job to its terminal state.
pub async fn run_calculation(
    job: CalculationJob,
    tracker: &DeliveryTracker,
    client: &CallbackClient,
    delay: DelayRange,
) {
    let delay = delay.sample();
    info!(
        request_id = %job.request_id,
        observation_id = job.observation_id,
        delay_secs = delay.as_secs_f64(),
        "starting calculation"
    );
    tracker.set_status(&job.request_id, DeliveryStatus::Delayed);
    tokio::time::sleep(delay).await;

    let observations = models::parse_observations(&job.points);
    let estimate_km = ranging::estimate_distance(&observations);
    tracker.record_estimate(&job.request_id, estimate_km);
    info!(
        request_id = %job.request_id,
        observation_id = job.observation_id,
        distance_km = ?estimate_km,
        "calculation finished"
    );

    match client
        .deliver(&job.callback_url, &job.token, estimate_km)
        .await
    {
        Ok((status, _)) if status.is_success() => {
            info!(
                request_id = %job.request_id,
                observation_id = job.observation_id,
                "calculation result delivered"
            );
            tracker.set_status(&job.request_id, DeliveryStatus::Delivered);
        }
        Ok((status, body)) => {
            error!(
                request_id = %job.request_id,
                observation_id = job.observation_id,
                status = %status,
                body = %body,
                "callback endpoint rejected the calculation result"
            );
            tracker.set_status(&job.request_id, DeliveryStatus::DeliveryFailed);
        }
        Err(e) => {
            error!(
                request_id = %job.request_id,
                observation_id = job.observation_id,
                error = %e,
                "failed to reach callback endpoint"
            );
            tracker.set_status(&job.request_id, DeliveryStatus::DeliveryErrored);
        }
    }
}

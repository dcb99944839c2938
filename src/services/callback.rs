//! Outbound callback delivery.
//!
//! The submitter learns the calculation outcome through exactly one `POST`
//! to its callback URL, with the opaque token it supplied passed back
//! unchanged in a header. There are no retries at this layer; the caller
//! classifies the response and records a terminal state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the submitter's opaque token back to it.
pub const INTERNAL_TOKEN_HEADER: &str = "X-Internal-Token";

/// Wire body posted to the callback URL.
///
/// `value` is 0.0 whenever `success` is false; consumers treat a zero
/// distance as "no usable answer".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CallbackPayload {
    pub success: bool,
    pub value: f64,
}

impl CallbackPayload {
    /// Flatten the internal estimate into the wire form.
    pub fn from_estimate(estimate_km: Option<f64>) -> Self {
        match estimate_km {
            Some(value) => Self {
                success: true,
                value,
            },
            None => Self {
                success: false,
                value: 0.0,
            },
        }
    }
}

/// HTTP client for delivering calculation results.
#[derive(Clone)]
pub struct CallbackClient {
    client: reqwest::Client,
}

impl CallbackClient {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Make the single delivery attempt.
    ///
    /// Returns the response status and (best-effort) body text so the
    /// caller can log a rejection with context, or the transport error if
    /// the endpoint could not be reached within the timeout.
    pub async fn deliver(
        &self,
        callback_url: &str,
        token: &str,
        estimate_km: Option<f64>,
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let payload = CallbackPayload::from_estimate(estimate_km);
        let response = self
            .client
            .post(callback_url)
            .header(INTERNAL_TOKEN_HEADER, token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok((status, body))
    }
}

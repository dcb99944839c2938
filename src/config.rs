//! Service configuration and environment variable handling.

use rand::Rng;
use std::env;
use std::time::Duration;

/// Bounds of the randomized pre-computation delay, in seconds.
///
/// Each accepted request sleeps a duration drawn uniformly from
/// `[min_secs, max_secs]` before any work is done. Equal bounds give a
/// fixed delay, which keeps tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Draw a delay uniformly from the configured range.
    pub fn sample(&self) -> Duration {
        let secs = if self.max_secs > self.min_secs {
            rand::rng().random_range(self.min_secs..=self.max_secs)
        } else {
            self.min_secs
        };
        Duration::from_secs_f64(secs.max(0.0))
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Randomized delay applied before each calculation
    pub delay: DelayRange,
    /// Timeout for the outbound callback request
    pub callback_timeout: Duration,
    /// Capacity of the calculation intake queue
    pub queue_capacity: usize,
    /// Maximum number of calculations running concurrently
    pub max_concurrent_calculations: usize,
}

impl ServiceConfig {
    /// Create a new service configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `ARS_DELAY_MIN_SECS` (optional, default: 5.0): lower delay bound
    /// - `ARS_DELAY_MAX_SECS` (optional, default: 10.0): upper delay bound
    /// - `ARS_CALLBACK_TIMEOUT_SECS` (optional, default: 30): callback request timeout
    /// - `ARS_QUEUE_CAPACITY` (optional, default: 64): intake queue capacity
    /// - `ARS_MAX_CONCURRENT` (optional, default: 8): concurrent calculation limit
    ///
    /// # Errors
    /// Returns an error if a variable is set but unparseable, or if the
    /// delay bounds are negative or inverted.
    pub fn from_env() -> Result<Self, String> {
        let min_secs = parse_var("ARS_DELAY_MIN_SECS", 5.0)?;
        let max_secs = parse_var("ARS_DELAY_MAX_SECS", 10.0)?;
        if min_secs < 0.0 {
            return Err("ARS_DELAY_MIN_SECS must not be negative".to_string());
        }
        if max_secs < min_secs {
            return Err("ARS_DELAY_MAX_SECS must not be below ARS_DELAY_MIN_SECS".to_string());
        }

        let timeout_secs: u64 = parse_var("ARS_CALLBACK_TIMEOUT_SECS", 30)?;
        let queue_capacity: usize = parse_var("ARS_QUEUE_CAPACITY", 64)?;
        let max_concurrent: usize = parse_var("ARS_MAX_CONCURRENT", 8)?;
        if queue_capacity == 0 {
            return Err("ARS_QUEUE_CAPACITY must be at least 1".to_string());
        }
        if max_concurrent == 0 {
            return Err("ARS_MAX_CONCURRENT must be at least 1".to_string());
        }

        Ok(Self {
            delay: DelayRange::new(min_secs, max_secs),
            callback_timeout: Duration::from_secs(timeout_secs),
            queue_capacity,
            max_concurrent_calculations: max_concurrent,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            delay: DelayRange::new(5.0, 10.0),
            callback_timeout: Duration::from_secs(30),
            queue_capacity: 64,
            max_concurrent_calculations: 8,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{} must be a valid number, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

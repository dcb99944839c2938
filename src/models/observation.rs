//! Sky observation parsing and domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Date formats accepted for observation timestamps, tried in order.
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// A raw sky point as submitted over the wire.
///
/// Coordinates default to 0.0 when absent and are not range-validated.
/// The date string is parsed later; entries with an unusable date are
/// dropped rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkyPoint {
    /// Right ascension in degrees
    #[serde(default)]
    pub ra: f64,
    /// Declination in degrees
    #[serde(default)]
    pub dec: f64,
    /// Observation date, `DD.MM.YYYY` or `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
}

/// A parsed observation: angular sky position plus calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Right ascension in degrees
    pub ra_deg: f64,
    /// Declination in degrees
    pub dec_deg: f64,
    /// Date the position was observed
    pub observed_at: NaiveDate,
}

/// Parse a date string in `DD.MM.YYYY` or `YYYY-MM-DD` form.
pub fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Convert wire points into parsed observations.
///
/// Points whose date matches neither accepted format are dropped with a
/// warning; a bad entry never fails the whole batch.
pub fn parse_observations(points: &[SkyPoint]) -> Vec<Observation> {
    points
        .iter()
        .filter_map(|point| match parse_observation_date(&point.date) {
            Some(observed_at) => Some(Observation {
                ra_deg: point.ra,
                dec_deg: point.dec,
                observed_at,
            }),
            None => {
                warn!(date = %point.date, "dropping observation with unparseable date");
                None
            }
        })
        .collect()
}

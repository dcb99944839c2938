//! Distance estimation from angular sky observations.
//!
//! The body's apparent motion is treated as the projection of a fixed
//! transverse velocity: the small-angle proper-motion relation
//! `α ≈ V·Δt / D` rearranges to `D = V·Δt / α`, so every time-ordered pair
//! of observations yields one distance sample. The estimate is the median
//! of all samples: pairs with a tiny angular separation or elapsed time
//! produce unstable outliers, and the median absorbs them without an
//! explicit filter.

use crate::models::Observation;
use tracing::warn;

/// Assumed transverse velocity of the observed body, in m/s.
pub const LINEAR_SPEED_M_PER_S: f64 = 25_000.0;

/// Great-circle angular separation between two sky positions, computed
/// with the haversine formula:
///
/// ```text
/// a = sin²(Δdec/2) + cos(dec1)·cos(dec2)·sin²(Δra/2)
/// α = 2·atan2(√a, √(1−a))
/// ```
///
/// Radians in, radians out; the result lies in `[0, π]`.
pub fn angular_distance(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let delta_ra = ra2 - ra1;
    let delta_dec = dec2 - dec1;

    let a = (delta_dec / 2.0).sin().powi(2)
        + dec1.cos() * dec2.cos() * (delta_ra / 2.0).sin().powi(2);
    // Rounding can push the haversine term just past [0, 1]; clamp before
    // the square roots so atan2 never sees a NaN.
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Estimate the distance to the observed body, in kilometers.
///
/// Observations are sorted ascending by date; every strictly time-ordered
/// pair contributes one sample via `D = V·Δt / α`. Pairs with non-positive
/// elapsed time or angular separation are skipped, as are samples that come
/// out non-positive or non-finite.
///
/// Returns `None` when fewer than two observations are available or no pair
/// produces a usable sample. Malformed numeric input never panics.
pub fn estimate_distance(observations: &[Observation]) -> Option<f64> {
    if observations.len() < 2 {
        warn!(
            count = observations.len(),
            "not enough observations for ranging"
        );
        return None;
    }

    let mut sorted: Vec<&Observation> = observations.iter().collect();
    sorted.sort_by_key(|obs| obs.observed_at);

    let mut samples_km = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        for second in &sorted[i + 1..] {
            let dt_secs = (second.observed_at - first.observed_at).num_seconds() as f64;
            if dt_secs <= 0.0 {
                continue;
            }

            let alpha = angular_distance(
                first.ra_deg.to_radians(),
                first.dec_deg.to_radians(),
                second.ra_deg.to_radians(),
                second.dec_deg.to_radians(),
            );
            if alpha <= 0.0 {
                continue;
            }

            let distance_m = LINEAR_SPEED_M_PER_S * dt_secs / alpha;
            if distance_m > 0.0 && distance_m.is_finite() {
                samples_km.push(distance_m / 1000.0);
            }
        }
    }

    if samples_km.is_empty() {
        warn!("no observation pair produced a usable distance sample");
        return None;
    }

    samples_km.sort_by(f64::total_cmp);
    Some(median_of_sorted(&samples_km))
}

/// Median of an ascending-sorted, non-empty sample set. Even counts
/// average the two middle values.
fn median_of_sorted(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n % 2 == 1 {
        samples[n / 2]
    } else {
        (samples[n / 2 - 1] + samples[n / 2]) / 2.0
    }
}

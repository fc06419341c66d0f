//! Time-series sampling of the decay model.
//!
//! Walks the decay model at a fixed interval across a window to produce a
//! plottable sequence of (wall-clock label, mg) points.

use crate::{decay, Consumption};
use chrono::{DateTime, Duration, Utc};

/// Default sampling interval, in minutes
pub const DEFAULT_STEP_MINUTES: i64 = 15;

/// One sample of the caffeine curve
#[derive(Clone, Debug, PartialEq)]
pub struct SamplePoint {
    /// Wall-clock "HH:MM" of the sample instant, date-independent
    pub label: String,
    pub mg: f64,
}

/// Sample the caffeine level from `window_start` through `window_end`
///
/// Produces one point per `step_minutes`, inclusive of the start and of any
/// step landing on or before the end. Pure function of its inputs: an
/// inverted window yields an empty series.
pub fn sample(
    events: &[Consumption],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    step_minutes: i64,
) -> Vec<SamplePoint> {
    if step_minutes <= 0 {
        tracing::warn!("Non-positive sample step {}min, returning empty series", step_minutes);
        return Vec::new();
    }

    let step = Duration::minutes(step_minutes);
    let mut points = Vec::new();
    let mut current = window_start;

    while current <= window_end {
        points.push(SamplePoint {
            label: current.format("%H:%M").to_string(),
            mg: decay::level_at(events, current),
        });
        current += step;
    }

    points
}

//! First-order exponential decay model for blood caffeine.
//!
//! Each consumption event decays independently with a fixed half-life;
//! the level at any instant is the sum of the per-event residuals.

use crate::Consumption;
use chrono::{DateTime, Utc};

/// Caffeine's physiological elimination half-life, in hours
pub const HALF_LIFE_HOURS: f64 = 5.0;

/// Estimated total residual caffeine (mg) at `instant`
///
/// An event strictly in the future relative to `instant` contributes
/// nothing. Events are validated at construction, so the result is always
/// finite and non-negative.
pub fn level_at(events: &[Consumption], instant: DateTime<Utc>) -> f64 {
    events
        .iter()
        .map(|event| {
            let hours_elapsed =
                (instant - event.consumed_at).num_milliseconds() as f64 / 3_600_000.0;
            if hours_elapsed < 0.0 {
                0.0
            } else {
                event.total_mg() * 0.5_f64.powf(hours_elapsed / HALF_LIFE_HOURS)
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaffeineSource;
    use chrono::{Duration, TimeZone};

    fn source_with_mg(mg: f64) -> CaffeineSource {
        CaffeineSource {
            id: "test-source".into(),
            name: "Test Source".into(),
            category: "Test".into(),
            caffeine_mg: mg,
        }
    }

    fn event_at(mg: f64, at: DateTime<Utc>) -> Consumption {
        Consumption::new(&source_with_mg(mg), 1.0, at).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_before_earliest_event() {
        let events = vec![event_at(100.0, t0())];
        let level = level_at(&events, t0() - Duration::minutes(1));
        assert_eq!(level, 0.0);
    }

    #[test]
    fn test_full_dose_at_consumption_time() {
        let events = vec![event_at(100.0, t0())];
        let level = level_at(&events, t0());
        assert!((level - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_life_property() {
        let events = vec![event_at(100.0, t0())];
        let level = level_at(&events, t0() + Duration::hours(5));
        assert!((level - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_events_sum() {
        // 100mg at hour 0 plus 100mg at hour 5: at hour 5 the first has
        // decayed to 50 and the second just landed.
        let events = vec![
            event_at(100.0, t0()),
            event_at(100.0, t0() + Duration::hours(5)),
        ];
        let level = level_at(&events, t0() + Duration::hours(5));
        assert!((level - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_decay_after_last_event() {
        let events = vec![event_at(100.0, t0()), event_at(80.0, t0() + Duration::hours(2))];
        let mut previous = f64::INFINITY;
        for minutes in (120..600).step_by(15) {
            let level = level_at(&events, t0() + Duration::minutes(minutes));
            assert!(level >= 0.0);
            assert!(level <= previous, "level rose after the last event");
            previous = level;
        }
    }

    #[test]
    fn test_quantity_scales_contribution() {
        let at = t0();
        let double = Consumption::new(&source_with_mg(63.0), 2.0, at).unwrap();
        let level = level_at(&[double], at);
        assert!((level - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_events_always_zero() {
        assert_eq!(level_at(&[], t0()), 0.0);
    }
}

//! Chart model assembly.
//!
//! Composes the decay series, personalized limits and sleep-cutoff marker
//! into the flat structure a rendering surface consumes. All plotting is
//! the renderer's business; this module only computes.

use crate::{limits, schedule, series, Consumption, UserSettings};
use chrono::NaiveDate;

/// Everything a rendering surface needs to draw the day
#[derive(Clone, Debug)]
pub struct ChartModel {
    /// Wall-clock "HH:MM" labels, one per sample
    pub labels: Vec<String>,
    /// Caffeine level per sample, in milligrams
    pub levels: Vec<f64>,
    /// Personalized daily ceiling threshold
    pub max_daily_mg: f64,
    /// Fixed sleep-impact threshold
    pub sleep_impact_mg: f64,
    /// "HH:MM" label of the sleep cutoff marker (sleep time minus 4h)
    pub sleep_cutoff_label: String,
}

/// Build the chart model for one reference day
///
/// The window runs from wake time through sleep time on `date`; a schedule
/// whose sleep time is at or before its wake time produces an empty series
/// (thresholds and cutoff are still populated).
pub fn build_chart_model(
    events: &[Consumption],
    settings: &UserSettings,
    date: NaiveDate,
    step_minutes: i64,
) -> ChartModel {
    let (window_start, window_end) = schedule::window_bounds(settings, date);
    let points = series::sample(events, window_start, window_end, step_minutes);

    let personal = limits::personal_limits(settings.weight, settings.age, settings.gender);
    let cutoff = schedule::sleep_cutoff(settings.sleep_time);

    let (labels, levels) = points
        .into_iter()
        .map(|p| (p.label, p.mg))
        .unzip();

    ChartModel {
        labels,
        levels,
        max_daily_mg: personal.max_daily_mg,
        sleep_impact_mg: personal.sleep_impact_mg,
        sleep_cutoff_label: cutoff.format("%H:%M").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::journal::seed_sample_day;
    use crate::Gender;
    use chrono::NaiveTime;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_chart_model_for_sample_day() {
        let catalog = build_default_catalog();
        let journal = seed_sample_day(&catalog, reference_date());
        let settings = UserSettings::default();

        let model = build_chart_model(journal.entries(), &settings, reference_date(), 15);

        // 07:00..23:00 inclusive at 15-minute steps
        assert_eq!(model.labels.len(), 16 * 4 + 1);
        assert_eq!(model.labels.len(), model.levels.len());
        assert_eq!(model.labels[0], "07:00");

        // Default male 70kg clamps to the 400mg ceiling
        assert_eq!(model.max_daily_mg, 400.0);
        assert_eq!(model.sleep_impact_mg, 100.0);
        assert_eq!(model.sleep_cutoff_label, "19:00");
    }

    #[test]
    fn test_levels_zero_before_first_event() {
        let catalog = build_default_catalog();
        let journal = seed_sample_day(&catalog, reference_date());
        let settings = UserSettings::default();

        let model = build_chart_model(journal.entries(), &settings, reference_date(), 15);

        // First seed entry is at 08:00; everything before it reads zero
        let first_dose = model.labels.iter().position(|l| l == "08:00").unwrap();
        assert!(model.levels[..first_dose].iter().all(|&mg| mg == 0.0));
        assert!(model.levels[first_dose] > 0.0);
    }

    #[test]
    fn test_inverted_window_yields_empty_series() {
        let mut settings = UserSettings::default();
        settings.wake_time = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        settings.sleep_time = NaiveTime::from_hms_opt(7, 0, 0).unwrap();

        let model = build_chart_model(&[], &settings, reference_date(), 15);
        assert!(model.labels.is_empty());
        assert!(model.levels.is_empty());
        // Thresholds and cutoff are still present for annotation
        assert_eq!(model.sleep_cutoff_label, "03:00");
        assert_eq!(model.sleep_impact_mg, 100.0);
    }

    #[test]
    fn test_thresholds_follow_settings() {
        let mut settings = UserSettings::default();
        settings.gender = Gender::Female;
        settings.weight = 50.0;
        settings.age = 70.0;

        let model = build_chart_model(&[], &settings, reference_date(), 15);
        assert!((model.max_daily_mg - 229.5).abs() < 1e-9);
    }
}

//! Personalized caffeine safety thresholds.
//!
//! Heuristic, not medical, limits: a weight-scaled daily ceiling with
//! demographic adjustments, and a flat sleep-impact level.

use crate::Gender;

/// Milligrams of daily allowance per kilogram of body weight
pub const MG_PER_KG_DAILY: f64 = 6.0;

/// Multiplicative adjustment applied for female users
pub const FEMALE_ADJUSTMENT: f64 = 0.9;

/// Multiplicative adjustment applied from `SENIOR_AGE_YEARS` on
pub const SENIOR_ADJUSTMENT: f64 = 0.85;

/// Age at which the senior adjustment kicks in
pub const SENIOR_AGE_YEARS: f64 = 65.0;

/// Hard ceiling on the daily limit regardless of body size
pub const DAILY_CEILING_MG: f64 = 400.0;

/// Residual level above which sleep is assumed to be impaired
pub const SLEEP_IMPACT_MG: f64 = 100.0;

/// Personalized safety thresholds for one user
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersonalLimits {
    pub max_daily_mg: f64,
    pub sleep_impact_mg: f64,
}

/// Compute personalized limits from body parameters
///
/// The two demographic adjustments are plain scalar multiplications, so
/// they compose order-independently when both apply.
pub fn personal_limits(weight_kg: f64, age_years: f64, gender: Gender) -> PersonalLimits {
    let mut max_daily_mg = weight_kg * MG_PER_KG_DAILY;

    if gender == Gender::Female {
        max_daily_mg *= FEMALE_ADJUSTMENT;
    }

    if age_years >= SENIOR_AGE_YEARS {
        max_daily_mg *= SENIOR_ADJUSTMENT;
    }

    max_daily_mg = max_daily_mg.min(DAILY_CEILING_MG);

    PersonalLimits {
        max_daily_mg,
        sleep_impact_mg: SLEEP_IMPACT_MG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_male_hits_ceiling() {
        // 70kg male: 420 raw, clamped to 400
        let limits = personal_limits(70.0, 30.0, Gender::Male);
        assert_eq!(limits.max_daily_mg, 400.0);
        assert_eq!(limits.sleep_impact_mg, 100.0);
    }

    #[test]
    fn test_senior_female_below_ceiling() {
        // 50kg, 70y, female: 300 * 0.9 * 0.85 = 229.5, no clamp
        let limits = personal_limits(50.0, 70.0, Gender::Female);
        assert!((limits.max_daily_mg - 229.5).abs() < 1e-9);
        assert_eq!(limits.sleep_impact_mg, 100.0);
    }

    #[test]
    fn test_female_adjustment_only() {
        let limits = personal_limits(60.0, 30.0, Gender::Female);
        assert!((limits.max_daily_mg - 324.0).abs() < 1e-9);
    }

    #[test]
    fn test_senior_adjustment_applies_at_boundary() {
        let at_64 = personal_limits(50.0, 64.0, Gender::Male);
        let at_65 = personal_limits(50.0, 65.0, Gender::Male);
        assert!((at_64.max_daily_mg - 300.0).abs() < 1e-9);
        assert!((at_65.max_daily_mg - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_sleep_impact_independent_of_inputs() {
        let a = personal_limits(40.0, 20.0, Gender::Female);
        let b = personal_limits(120.0, 80.0, Gender::Male);
        assert_eq!(a.sleep_impact_mg, b.sleep_impact_mg);
    }
}

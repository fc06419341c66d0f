//! Core domain types for the caffeine intake simulator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Caffeine sources and the source catalog
//! - Consumption events
//! - User settings (demographics and wake/sleep schedule)

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Source Types
// ============================================================================

/// A caffeine source definition (e.g., "Espresso (single)")
///
/// Immutable catalog entry; `caffeine_mg` is the content of one serving.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaffeineSource {
    pub id: String,
    pub name: String,
    pub category: String,
    pub caffeine_mg: f64,
}

/// The complete catalog of caffeine sources, keyed by source id
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub sources: HashMap<String, CaffeineSource>,
}

// ============================================================================
// Consumption Events
// ============================================================================

/// One recorded instance of ingesting a caffeine source
///
/// Construction is validated: the quantity and per-serving content must be
/// finite and positive, so downstream decay math never sees NaN or a
/// negative dose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Consumption {
    pub id: Uuid,
    pub source_id: String,
    pub source_name: String,
    pub caffeine_mg_per_serving: f64,
    pub quantity: f64,
    pub consumed_at: DateTime<Utc>,
}

impl Consumption {
    /// Create a validated consumption event from a catalog source
    pub fn new(
        source: &CaffeineSource,
        quantity: f64,
        consumed_at: DateTime<Utc>,
    ) -> crate::Result<Self> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(crate::Error::Consumption(format!(
                "quantity must be a positive number, got {}",
                quantity
            )));
        }
        if !source.caffeine_mg.is_finite() || source.caffeine_mg <= 0.0 {
            return Err(crate::Error::Consumption(format!(
                "source '{}' has invalid caffeine content {}",
                source.id, source.caffeine_mg
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            caffeine_mg_per_serving: source.caffeine_mg,
            quantity,
            consumed_at,
        })
    }

    /// Total caffeine delivered by this event, in milligrams
    pub fn total_mg(&self) -> f64 {
        self.caffeine_mg_per_serving * self.quantity
    }
}

// ============================================================================
// User Settings
// ============================================================================

/// User gender, as used by the personalized limits formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(crate::Error::Settings(format!(
                "unknown gender '{}' (expected male or female)",
                other
            ))),
        }
    }
}

/// Demographic and schedule settings for one user
///
/// Field names and time format ("HH:MM") match the persona preset JSON
/// files, so a preset deserializes directly into this type. Height is
/// carried for completeness but does not participate in any computation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub gender: Gender,
    pub weight: f64,
    pub age: f64,
    pub height: f64,
    #[serde(with = "hhmm")]
    pub wake_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub sleep_time: NaiveTime,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            weight: 70.0,
            age: 30.0,
            height: 170.0,
            wake_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            sleep_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
        }
    }
}

impl UserSettings {
    /// Check the numeric fields for obviously invalid values
    ///
    /// Returns a list of problems, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.weight.is_finite() || self.weight <= 0.0 {
            errors.push(format!("weight must be positive, got {}", self.weight));
        }
        if !self.age.is_finite() || self.age <= 0.0 {
            errors.push(format!("age must be positive, got {}", self.age));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            errors.push(format!("height must be positive, got {}", self.height));
        }
        errors
    }
}

/// Serde helper for "HH:MM" wall-clock times (the persona file format)
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    /// Parse an "HH:MM" string into a time of day
    pub fn parse(s: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| format!("invalid time '{}' (expected HH:MM): {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn espresso() -> CaffeineSource {
        CaffeineSource {
            id: "espresso-single".into(),
            name: "Espresso (single)".into(),
            category: "Coffee".into(),
            caffeine_mg: 63.0,
        }
    }

    #[test]
    fn test_total_mg_scales_with_quantity() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let event = Consumption::new(&espresso(), 2.0, at).unwrap();
        assert!((event.total_mg() - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert!(Consumption::new(&espresso(), 0.0, at).is_err());
        assert!(Consumption::new(&espresso(), -1.0, at).is_err());
    }

    #[test]
    fn test_rejects_non_finite_quantity() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert!(Consumption::new(&espresso(), f64::NAN, at).is_err());
        assert!(Consumption::new(&espresso(), f64::INFINITY, at).is_err());
    }

    #[test]
    fn test_rejects_invalid_source_content() {
        let mut source = espresso();
        source.caffeine_mg = f64::NAN;
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert!(Consumption::new(&source, 1.0, at).is_err());
    }

    #[test]
    fn test_settings_parse_from_persona_json() {
        let json = r#"{
            "gender": "female",
            "weight": 60,
            "age": 25,
            "height": 165,
            "wakeTime": "06:30",
            "sleepTime": "22:00"
        }"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.gender, Gender::Female);
        assert_eq!(
            settings.wake_time,
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
        assert_eq!(
            settings.sleep_time,
            NaiveTime::from_hms_opt(22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_settings_hhmm_roundtrip() {
        let settings = UserSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"07:00\""));
        let back: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_settings_validate_flags_bad_numbers() {
        let mut settings = UserSettings::default();
        settings.weight = -5.0;
        settings.age = f64::NAN;
        let errors = settings.validate();
        assert_eq!(errors.len(), 2);
    }
}

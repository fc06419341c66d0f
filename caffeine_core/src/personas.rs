//! Persona presets: named settings bundles loaded from JSON.
//!
//! A persona file is a JSON map of preset key to settings object; applying
//! a preset replaces the user settings wholesale.

use crate::{Result, UserSettings};
use std::collections::BTreeMap;
use std::path::Path;

/// Named settings presets, ordered by key for stable listing
#[derive(Clone, Debug, Default)]
pub struct Personas {
    presets: BTreeMap<String, UserSettings>,
}

impl Personas {
    /// Load personas from a JSON preset file
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let presets: BTreeMap<String, UserSettings> = serde_json::from_str(&contents)?;
        tracing::info!("Loaded {} personas from {:?}", presets.len(), path);
        Ok(Self { presets })
    }

    /// Load personas from an optional path, degrading to an empty set
    ///
    /// A load failure leaves the preset list empty; the custom-settings
    /// path stays usable.
    pub fn load_or_empty(path: Option<&Path>) -> Personas {
        match path {
            Some(p) => match Self::load_from_json(p) {
                Ok(personas) => personas,
                Err(e) => {
                    tracing::warn!(
                        "Could not load personas from {:?}: {}. No presets available.",
                        p,
                        e
                    );
                    Personas::default()
                }
            },
            None => Personas::default(),
        }
    }

    /// Settings bundle for a preset key, if present
    pub fn get(&self, key: &str) -> Option<&UserSettings> {
        self.presets.get(key)
    }

    /// Preset keys in listing order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;
    use chrono::NaiveTime;

    const PERSONAS_JSON: &str = r#"{
        "student": {
            "gender": "male",
            "weight": 68,
            "age": 21,
            "height": 178,
            "wakeTime": "09:00",
            "sleepTime": "01:00"
        },
        "retiree": {
            "gender": "female",
            "weight": 62,
            "age": 70,
            "height": 160,
            "wakeTime": "06:00",
            "sleepTime": "21:30"
        }
    }"#;

    fn write_personas(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("personas.json");
        std::fs::write(&path, PERSONAS_JSON).unwrap();
        path
    }

    #[test]
    fn test_load_personas() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_personas(&temp_dir);

        let personas = Personas::load_from_json(&path).unwrap();
        assert_eq!(personas.len(), 2);

        let retiree = personas.get("retiree").unwrap();
        assert_eq!(retiree.gender, Gender::Female);
        assert_eq!(retiree.age, 70.0);
        assert_eq!(
            retiree.sleep_time,
            NaiveTime::from_hms_opt(21, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_keys_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_personas(&temp_dir);

        let personas = Personas::load_from_json(&path).unwrap();
        let keys: Vec<_> = personas.keys().collect();
        assert_eq!(keys, vec!["retiree", "student"]);
    }

    #[test]
    fn test_apply_replaces_settings_wholesale() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_personas(&temp_dir);
        let personas = Personas::load_from_json(&path).unwrap();

        // Applying a preset is a wholesale replacement of the settings
        let settings: UserSettings = personas.get("student").unwrap().clone();

        assert_ne!(settings, UserSettings::default());
        assert_eq!(settings.weight, 68.0);
        assert_eq!(settings.height, 178.0);
        assert_eq!(settings.wake_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.json");

        let personas = Personas::load_or_empty(Some(&missing));
        assert!(personas.is_empty());
    }

    #[test]
    fn test_malformed_file_degrades() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("personas.json");
        std::fs::write(&path, "{ not json }").unwrap();

        let personas = Personas::load_or_empty(Some(&path));
        assert!(personas.is_empty());
    }
}

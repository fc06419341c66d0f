//! Caffeine source catalog: built-in defaults and JSON ingestion.
//!
//! Reference data files are JSON arrays of `{id, name, category,
//! caffeineMg}` objects; the built-in catalog keeps the tool usable when no
//! data file is available.

use crate::{CaffeineSource, Catalog, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of common caffeine sources
///
/// **Note**: For production use, prefer `get_default_catalog()` which
/// returns a cached reference. This function is retained for testing and
/// custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    let entries = [
        ("espresso-single", "Espresso (single)", "Coffee", 63.0),
        ("espresso-double", "Espresso (double)", "Coffee", 126.0),
        ("filter-coffee-medium", "Filter Coffee (medium)", "Coffee", 145.0),
        ("instant-coffee", "Instant Coffee", "Coffee", 60.0),
        ("decaf-coffee", "Decaf Coffee", "Coffee", 3.0),
        ("black-tea", "Black Tea", "Tea", 47.0),
        ("green-tea", "Green Tea", "Tea", 28.0),
        ("matcha", "Matcha", "Tea", 70.0),
        ("cola-can", "Cola (330ml can)", "Soft Drinks", 34.0),
        ("energy-drink-250", "Energy Drink (250ml)", "Soft Drinks", 80.0),
        ("dark-chocolate-50g", "Dark Chocolate (50g)", "Food", 30.0),
        ("caffeine-tablet", "Caffeine Tablet", "Supplements", 200.0),
    ];

    let mut sources = HashMap::new();
    for (id, name, category, caffeine_mg) in entries {
        sources.insert(
            id.to_string(),
            CaffeineSource {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                caffeine_mg,
            },
        );
    }

    Catalog { sources }
}

impl Catalog {
    /// Load a catalog from a JSON reference data file
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let entries: Vec<CaffeineSource> = serde_json::from_str(&contents)?;

        let mut sources = HashMap::new();
        for source in entries {
            sources.insert(source.id.clone(), source);
        }

        tracing::info!("Loaded {} caffeine sources from {:?}", sources.len(), path);
        Ok(Catalog { sources })
    }

    /// Load a catalog from an optional path, degrading to the built-in one
    ///
    /// A load failure is reported but not fatal: the caller gets the
    /// default catalog so the decay model stays usable.
    pub fn load_or_default(path: Option<&Path>) -> Catalog {
        match path {
            Some(p) => match Self::load_from_json(p) {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::warn!(
                        "Could not load caffeine sources from {:?}: {}. Using built-in catalog.",
                        p,
                        e
                    );
                    get_default_catalog().clone()
                }
            },
            None => get_default_catalog().clone(),
        }
    }

    /// Look up a source by id
    pub fn get(&self, id: &str) -> Option<&CaffeineSource> {
        self.sources.get(id)
    }

    /// Sources grouped by category, both levels sorted for stable display
    pub fn by_category(&self) -> Vec<(String, Vec<&CaffeineSource>)> {
        let mut grouped: HashMap<&str, Vec<&CaffeineSource>> = HashMap::new();
        for source in self.sources.values() {
            grouped.entry(&source.category).or_default().push(source);
        }

        let mut categories: Vec<_> = grouped
            .into_iter()
            .map(|(category, mut sources)| {
                sources.sort_by(|a, b| a.name.cmp(&b.name));
                (category.to_string(), sources)
            })
            .collect();
        categories.sort_by(|a, b| a.0.cmp(&b.0));
        categories
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, source) in &self.sources {
            if id.is_empty() || source.id.is_empty() {
                errors.push("Source has empty ID".to_string());
            }
            if id != &source.id {
                errors.push(format!(
                    "Source key '{}' doesn't match source.id '{}'",
                    id, source.id
                ));
            }
            if source.name.is_empty() {
                errors.push(format!("Source '{}' has empty name", id));
            }
            if !source.caffeine_mg.is_finite() || source.caffeine_mg <= 0.0 {
                errors.push(format!(
                    "Source '{}' has invalid caffeine content {}",
                    id, source.caffeine_mg
                ));
            }
        }

        errors
    }
}

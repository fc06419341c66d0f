//! The day's consumption journal.
//!
//! In-memory store of consumption events owned by the UI layer. Entries
//! are kept sorted by timestamp ascending for display; the core
//! computations take slices and never touch the store directly.

use crate::{CaffeineSource, Catalog, Consumption, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// Ordered list of the day's consumption events
#[derive(Clone, Debug, Default)]
pub struct ConsumptionJournal {
    entries: Vec<Consumption>,
}

impl ConsumptionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validated consumption and keep the journal sorted
    pub fn add(
        &mut self,
        source: &CaffeineSource,
        quantity: f64,
        consumed_at: DateTime<Utc>,
    ) -> Result<Uuid> {
        let event = Consumption::new(source, quantity, consumed_at)?;
        let id = event.id;
        tracing::debug!(
            "Adding {:.0}mg of '{}' at {} ({})",
            event.total_mg(),
            event.source_name,
            consumed_at.format("%H:%M"),
            id
        );

        self.entries.push(event);
        self.entries.sort_by_key(|e| e.consumed_at);
        Ok(id)
    }

    /// Remove the entry at a display index, if it exists
    pub fn remove(&mut self, index: usize) -> Option<Consumption> {
        if index < self.entries.len() {
            let removed = self.entries.remove(index);
            tracing::debug!("Removed entry {} ({})", index, removed.id);
            Some(removed)
        } else {
            None
        }
    }

    /// Entries in timestamp order
    pub fn entries(&self) -> &[Consumption] {
        &self.entries
    }

    /// Sum of delivered caffeine over the whole journal, in milligrams
    pub fn daily_total_mg(&self) -> f64 {
        self.entries.iter().map(Consumption::total_mg).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a journal pre-filled with the sample day
///
/// Seeds one single espresso at 08:00 and one medium filter coffee at
/// 10:30, only when both sources exist in the catalog. Otherwise the
/// journal starts empty.
pub fn seed_sample_day(catalog: &Catalog, date: NaiveDate) -> ConsumptionJournal {
    const SEEDS: [(&str, (u32, u32)); 2] =
        [("espresso-single", (8, 0)), ("filter-coffee-medium", (10, 30))];

    let mut journal = ConsumptionJournal::new();

    if !SEEDS.iter().all(|(id, _)| catalog.get(id).is_some()) {
        tracing::debug!("Sample sources missing from catalog, starting with empty journal");
        return journal;
    }

    for (id, (hour, minute)) in SEEDS {
        let Some(source) = catalog.get(id) else { continue };
        let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else { continue };
        let at = date.and_time(time).and_utc();
        if let Err(e) = journal.add(source, 1.0, at) {
            tracing::warn!("Could not seed sample entry '{}': {}", id, e);
        }
    }

    journal
}

//! Yearly transit cache and the engine that memoizes it.
//!
//! A [`TransitCache`] holds one [`TransitSnapshot`] per calendar day, taken at
//! 12:00 UTC. Once built it is never mutated, so it is shared as an
//! `Arc<TransitCache>` without any per-read locking. The [`TransitEngine`]
//! owns the memo: the first caller for a year builds it, every other caller
//! (concurrent or later) gets the same `Arc`.

use crate::error::{AstroError, AstroResult, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR};
use crate::transits::snapshot::TransitSnapshot;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Hour (UTC) at which each daily snapshot is taken.
pub const SNAPSHOT_HOUR_UTC: u32 = 12;

/// One snapshot per day of a calendar year, keyed by ISO date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq)]
pub struct TransitCache {
    year: i32,
    days: HashMap<String, TransitSnapshot>,
    /// ISO keys in date order
    order: Vec<String>,
}

impl TransitCache {
    /// Compute every day of `year`.
    pub fn build(year: i32) -> AstroResult<Self> {
        ensure_year(year)?;
        Ok(Self::build_unchecked(year))
    }

    fn build_unchecked(year: i32) -> Self {
        let started = Instant::now();
        let dates = days_of_year(year);
        let noon = NaiveTime::from_hms_opt(SNAPSHOT_HOUR_UTC, 0, 0).unwrap_or_default();

        let snapshot_for = |date: &NaiveDate| {
            let instant = Utc.from_utc_datetime(&date.and_time(noon));
            (date.to_string(), TransitSnapshot::at_unchecked(instant))
        };

        #[cfg(feature = "parallel")]
        let entries: Vec<(String, TransitSnapshot)> = dates.par_iter().map(snapshot_for).collect();
        #[cfg(not(feature = "parallel"))]
        let entries: Vec<(String, TransitSnapshot)> = dates.iter().map(snapshot_for).collect();

        let cache = Self::from_entries(year, entries);
        info!(
            "Built transit cache for {} ({} days) in {} ms",
            year,
            cache.len(),
            started.elapsed().as_millis()
        );
        cache
    }

    /// Assemble a cache from precomputed snapshots, e.g. for replay or tests.
    ///
    /// Every snapshot must fall inside `year`; later snapshots for the same
    /// date replace earlier ones.
    pub fn from_snapshots(
        year: i32,
        snapshots: impl IntoIterator<Item = TransitSnapshot>,
    ) -> AstroResult<Self> {
        let mut entries = Vec::new();
        for snapshot in snapshots {
            let date = snapshot.instant.date_naive();
            if date.year() != year {
                return Err(AstroError::validation(
                    "snapshot",
                    format!("{date} does not belong to transit year {year}"),
                ));
            }
            entries.push((date.to_string(), snapshot));
        }
        Ok(Self::from_entries(year, entries))
    }

    fn from_entries(year: i32, entries: Vec<(String, TransitSnapshot)>) -> Self {
        let mut days = HashMap::with_capacity(entries.len());
        for (key, snapshot) in entries {
            days.insert(key, snapshot);
        }
        let mut order: Vec<String> = days.keys().cloned().collect();
        // ISO dates sort lexically in date order
        order.sort();
        Self { year, days, order }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// O(1) lookup by ISO date string.
    pub fn get(&self, iso_date: &str) -> Option<&TransitSnapshot> {
        self.days.get(iso_date)
    }

    pub fn get_date(&self, date: NaiveDate) -> Option<&TransitSnapshot> {
        self.get(&date.to_string())
    }

    pub fn contains(&self, iso_date: &str) -> bool {
        self.days.contains_key(iso_date)
    }

    /// Snapshots in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransitSnapshot)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.days.get(key).map(|snap| (key.as_str(), snap)))
    }
}

fn ensure_year(year: i32) -> AstroResult<()> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(AstroError::out_of_range(format!("Transit year {year}")))
    }
}

fn days_of_year(year: i32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(366);
    let mut next = NaiveDate::from_ymd_opt(year, 1, 1);
    while let Some(date) = next.filter(|d| d.year() == year) {
        dates.push(date);
        next = date.succ_opt();
    }
    dates
}

type YearSlot = Arc<OnceLock<Arc<TransitCache>>>;

/// Memoizes one [`TransitCache`] per year for the lifetime of the engine.
#[derive(Debug, Default)]
pub struct TransitEngine {
    years: Mutex<HashMap<i32, YearSlot>>,
}

impl TransitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache for `year`, building it on first use.
    ///
    /// The map lock is only held long enough to fetch the year's slot; the
    /// build itself runs inside the slot's `OnceLock`, so concurrent callers
    /// for the same year wait for one build and callers for other years are
    /// not blocked.
    pub fn year_cache(&self, year: i32) -> AstroResult<Arc<TransitCache>> {
        ensure_year(year)?;

        let slot = self.slot(year);
        if let Some(cache) = slot.get() {
            return Ok(Arc::clone(cache));
        }

        let cache = slot.get_or_init(|| Arc::new(TransitCache::build_unchecked(year)));
        Ok(Arc::clone(cache))
    }

    /// Years whose cache has finished building.
    pub fn cached_years(&self) -> Vec<i32> {
        let years = match self.years.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut out: Vec<i32> = years
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(&year, _)| year)
            .collect();
        out.sort_unstable();
        out
    }

    fn slot(&self, year: i32) -> YearSlot {
        // A panic while holding the lock cannot leave the map half-written.
        let mut years = match self.years.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let slot = years.entry(year).or_insert_with(|| {
            debug!("Registering transit cache slot for {}", year);
            Arc::new(OnceLock::new())
        });
        Arc::clone(slot)
    }
}

lazy_static! {
    static ref GLOBAL_ENGINE: TransitEngine = TransitEngine::new();
}

/// Process-wide engine shared by [`year_cache`].
pub fn global_engine() -> &'static TransitEngine {
    &GLOBAL_ENGINE
}

/// Process-wide memoized cache for `year`.
pub fn year_cache(year: i32) -> AstroResult<Arc<TransitCache>> {
    GLOBAL_ENGINE.year_cache(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_has_366_days() {
        assert_eq!(days_of_year(2024).len(), 366);
        assert_eq!(days_of_year(2023).len(), 365);
    }

    #[test]
    fn rejects_unsupported_years() {
        let engine = TransitEngine::new();
        assert!(matches!(
            engine.year_cache(1850),
            Err(AstroError::Range { .. })
        ));
        assert!(engine.cached_years().is_empty());
    }

    #[test]
    fn from_snapshots_rejects_foreign_dates() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let snap = TransitSnapshot::at(instant).unwrap();
        assert!(TransitCache::from_snapshots(2026, vec![snap.clone()]).is_err());

        let cache = TransitCache::from_snapshots(2025, vec![snap]).unwrap();
        assert!(cache.contains("2025-06-01"));
        assert_eq!(cache.len(), 1);
    }
}

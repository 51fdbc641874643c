//! Batch views over daily scores: week, month grid, yearly outlook, best and worst days.
//!
//! None of these compute a score themselves; they only decide which days to
//! pass to [`score_day`] and how to group the results.

use crate::aspects::types::NatalPositions;
use crate::error::{AstroError, AstroResult};
use crate::scoring::calculator::score_day;
use crate::scoring::types::{DailyScore, DayType, MonthOutlook, RankedDays};
use crate::transits::{TransitCache, TransitEngine};
use chrono::{Datelike, Duration, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

/// Seven consecutive days starting at `start`.
///
/// A week running past December 31st pulls the next year's cache from the
/// same engine, so each day is still scored against its own year's snapshot.
pub fn weekly_forecast(
    natal: &NatalPositions,
    start: NaiveDate,
    engine: &TransitEngine,
) -> AstroResult<Vec<DailyScore>> {
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);
    let mut cache = engine.year_cache(start.year())?;
    for offset in 0..DAYS_PER_WEEK {
        let date = start + Duration::days(offset as i64);
        if date.year() != cache.year() {
            cache = engine.year_cache(date.year())?;
        }
        days.push(score_day(natal, &date.to_string(), &cache)?);
    }
    Ok(days)
}

/// Every day of `month` in the cache's year.
pub fn calendar_month(
    natal: &NatalPositions,
    month: u32,
    cache: &TransitCache,
) -> AstroResult<Vec<DailyScore>> {
    month_dates(cache.year(), month)?
        .into_iter()
        .map(|date| score_day(natal, &date.to_string(), cache))
        .collect()
}

/// Twelve months, each the mean of its daily scores.
pub fn monthly_outlook(
    natal: &NatalPositions,
    cache: &TransitCache,
) -> AstroResult<Vec<MonthOutlook>> {
    (1..=12)
        .map(|month| {
            let days = calendar_month(natal, month, cache)?;
            Ok(summarize_month(cache.year(), month, &days))
        })
        .collect()
}

/// `count` best and worst days of the cache's year.
///
/// Ties go to the earlier date.
pub fn rank_days(
    natal: &NatalPositions,
    cache: &TransitCache,
    count: usize,
) -> AstroResult<RankedDays> {
    let mut scores = cache
        .iter()
        .map(|(iso, _)| score_day(natal, iso, cache))
        .collect::<AstroResult<Vec<DailyScore>>>()?;

    scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.date.cmp(&b.date)));
    let best = scores.iter().take(count).cloned().collect();

    scores.sort_by(|a, b| a.score.cmp(&b.score).then(a.date.cmp(&b.date)));
    let worst = scores.into_iter().take(count).collect();

    Ok(RankedDays { best, worst })
}

fn summarize_month(year: i32, month: u32, days: &[DailyScore]) -> MonthOutlook {
    let total: u32 = days.iter().map(|d| u32::from(d.score)).sum();
    let score = if days.is_empty() {
        50
    } else {
        (f64::from(total) / days.len() as f64).round() as u8
    };
    let best_day = days
        .iter()
        .max_by(|a, b| a.score.cmp(&b.score).then(b.date.cmp(&a.date)))
        .map(|d| d.date);
    MonthOutlook {
        year,
        month,
        score,
        day_type: DayType::classify(score),
        power_days: days.iter().filter(|d| d.day_type == DayType::Power).count(),
        rest_days: days.iter().filter(|d| d.day_type == DayType::Rest).count(),
        best_day,
    }
}

fn month_dates(year: i32, month: u32) -> AstroResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AstroError::validation("month", format!("{month} is not a month of {year}"))
    })?;
    let mut dates = Vec::with_capacity(31);
    let mut next = Some(first);
    while let Some(date) = next.filter(|d| d.month() == month) {
        dates.push(date);
        next = date.succ_opt();
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(month_dates(2024, 2).unwrap().len(), 29);
        assert_eq!(month_dates(2026, 2).unwrap().len(), 28);
        assert_eq!(month_dates(2026, 12).unwrap().len(), 31);
        assert!(month_dates(2026, 13).is_err());
    }

    #[test]
    fn empty_month_summary_is_neutral() {
        let summary = summarize_month(2026, 4, &[]);
        assert_eq!(summary.score, 50);
        assert_eq!(summary.day_type, DayType::Neutral);
        assert_eq!(summary.best_day, None);
    }
}

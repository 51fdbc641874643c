//! The single day-score function.
//!
//! Score = 50 + Σ polarity · weight · tightness · personal, clamped to 0..=100.
//!
//! * `polarity` comes from the aspect nature (+1, +0.6, 0, -0.6, -1)
//! * `weight` is per aspect type
//! * `tightness` runs from 1 at the edge of the orb to 2 when exact
//! * `personal` is 1.5 when the natal point is the Sun, Moon or Ascendant

use crate::aspects::calculator::detect_aspects;
use crate::aspects::types::{AspectMatch, NatalPositions};
use crate::error::{AstroError, AstroResult};
use crate::scoring::types::{DailyScore, DayType};
use crate::transits::TransitCache;
use chrono::NaiveDate;

/// Midpoint every day starts from.
pub const BASE_SCORE: f64 = 50.0;
/// Multiplier for aspects to the Sun, Moon or Ascendant.
pub const PERSONAL_POINT_FACTOR: f64 = 1.5;
/// Aspects listed on a `DailyScore`.
const TOP_ASPECTS: usize = 3;

/// Signed contribution of one aspect.
pub fn aspect_points(aspect: &AspectMatch) -> f64 {
    let definition = aspect.kind.definition();
    let tightness = 1.0 + (1.0 - aspect.orb / definition.max_orb).clamp(0.0, 1.0);
    let personal = if aspect.natal.is_personal() {
        PERSONAL_POINT_FACTOR
    } else {
        1.0
    };
    aspect.nature.polarity() * definition.weight * tightness * personal
}

/// Combine aspects into a 0..=100 score.
pub fn score_aspects(aspects: &[AspectMatch]) -> u8 {
    let total: f64 = aspects.iter().map(aspect_points).sum();
    let score = BASE_SCORE + total;
    if score.is_nan() {
        return BASE_SCORE as u8;
    }
    score.clamp(0.0, 100.0).round() as u8
}

/// Score one day for a natal chart against a transit cache.
///
/// Every daily, weekly and calendar view goes through this function.
pub fn score_day(
    natal: &NatalPositions,
    iso_date: &str,
    cache: &TransitCache,
) -> AstroResult<DailyScore> {
    let date = parse_iso_date(iso_date)?;
    let snapshot = cache.get(iso_date).ok_or_else(|| {
        AstroError::validation(
            "date",
            format!("{iso_date} is not in the {} transit cache", cache.year()),
        )
    })?;

    let aspects = detect_aspects(natal, snapshot);
    let score = score_aspects(&aspects);
    let day_type = DayType::classify(score);
    let top_aspects: Vec<AspectMatch> = aspects.into_iter().take(TOP_ASPECTS).collect();
    let description = describe(day_type, top_aspects.first());

    Ok(DailyScore {
        date,
        score,
        day_type,
        description,
        top_aspects,
    })
}

/// Strict `YYYY-MM-DD`.
pub fn parse_iso_date(iso_date: &str) -> AstroResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").map_err(|e| {
        AstroError::validation("date", format!("{iso_date:?} is not YYYY-MM-DD ({e})"))
    })?;
    // Cache keys are zero-padded; reject "2026-3-1" style input.
    if date.to_string() != iso_date {
        return Err(AstroError::validation(
            "date",
            format!("{iso_date:?} is not YYYY-MM-DD"),
        ));
    }
    Ok(date)
}

fn describe(day_type: DayType, strongest: Option<&AspectMatch>) -> String {
    let headline = match day_type {
        DayType::Power => "Power day",
        DayType::Rest => "Rest day",
        DayType::Neutral => "Steady day",
    };
    match strongest {
        Some(aspect) => format!("{headline}: {aspect}"),
        None => format!("{headline}: no major transits to your chart"),
    }
}

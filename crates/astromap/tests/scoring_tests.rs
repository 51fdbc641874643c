use astromap::aspects::{AspectKind, NatalPositions};
use astromap::chart::{build_chart, BirthData, BirthLocation};
use astromap::ephemeris::{Planet, PlanetPosition};
use astromap::error::AstroError;
use astromap::scoring::{
    calendar_month, monthly_outlook, rank_days, score_day, weekly_forecast, DayType,
};
use astromap::transits::{global_engine, year_cache, TransitCache, TransitSnapshot};
use chrono::{Datelike, NaiveDate, TimeZone, Utc};

fn snapshot(day: u32, positions: &[(Planet, f64)]) -> TransitSnapshot {
    TransitSnapshot {
        instant: Utc.with_ymd_and_hms(2026, 5, day, 12, 0, 0).unwrap(),
        positions: positions
            .iter()
            .map(|&(planet, lon)| PlanetPosition::new(planet, lon, 0.0, 0.1))
            .collect(),
    }
}

/// Natal Sun at 14°23′ Taurus and a hand-made May 2026.
fn taurus_sun() -> NatalPositions {
    NatalPositions::from(vec![PlanetPosition::new(Planet::Sun, 44.38, 0.0, 1.0)])
}

fn hand_made_cache() -> TransitCache {
    TransitCache::from_snapshots(
        2026,
        vec![
            // Two exact trines to the Sun
            snapshot(4, &[(Planet::Jupiter, 164.38), (Planet::Venus, 284.38)]),
            // Exact square and opposition to the Sun
            snapshot(5, &[(Planet::Saturn, 134.38), (Planet::Mars, 224.38)]),
            // Nothing within orb
            snapshot(6, &[(Planet::Mercury, 20.0)]),
        ],
    )
    .unwrap()
}

fn natal_chart() -> NatalPositions {
    let birth = BirthData::parse(
        "1992-08-19",
        Some("06:10"),
        None,
        BirthLocation::new("Lisbon", 38.7223, -9.1393, "Europe/Lisbon"),
    )
    .unwrap();
    build_chart(&birth).unwrap().natal_positions()
}

#[test]
fn test_harmonious_transits_make_a_power_day() {
    let day = score_day(&taurus_sun(), "2026-05-04", &hand_made_cache()).unwrap();

    // 50 + 2 × (6 weight × 2 tightness × 1.5 personal)
    assert_eq!(day.score, 86);
    assert_eq!(day.day_type, DayType::Power);
    assert!(day.top_aspects.iter().all(|a| a.kind == AspectKind::Trine));
    assert_eq!(day.top_aspects.len(), 2);
    assert!(day.description.starts_with("Power day"));
    assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
}

#[test]
fn test_challenging_transits_make_a_rest_day() {
    let day = score_day(&taurus_sun(), "2026-05-05", &hand_made_cache()).unwrap();
    // 50 - 18 (square) - 15 (opposition)
    assert_eq!(day.score, 17);
    assert_eq!(day.day_type, DayType::Rest);
    assert!(day.description.starts_with("Rest day"));
}

#[test]
fn test_quiet_day_is_neutral() {
    let day = score_day(&taurus_sun(), "2026-05-06", &hand_made_cache()).unwrap();
    assert_eq!(day.score, 50);
    assert_eq!(day.day_type, DayType::Neutral);
    assert!(day.top_aspects.is_empty());
    assert_eq!(day.description, "Steady day: no major transits to your chart");
}

#[test]
fn test_missing_and_malformed_dates() {
    let cache = hand_made_cache();
    assert!(matches!(
        score_day(&taurus_sun(), "2026-05-07", &cache),
        Err(AstroError::Validation { .. })
    ));
    assert!(matches!(
        score_day(&taurus_sun(), "2026-5-4", &cache),
        Err(AstroError::Validation { .. })
    ));
    // A month view needs every day of the month.
    assert!(calendar_month(&taurus_sun(), 5, &cache).is_err());
}

#[test]
fn test_rank_days_on_hand_made_cache() {
    let ranked = rank_days(&taurus_sun(), &hand_made_cache(), 1).unwrap();
    assert_eq!(ranked.best.len(), 1);
    assert_eq!(ranked.worst.len(), 1);
    assert_eq!(ranked.best[0].date.day(), 4);
    assert_eq!(ranked.worst[0].date.day(), 5);
}

#[test]
fn test_scores_are_deterministic_and_bounded() {
    let natal = natal_chart();
    let cache = year_cache(2026).unwrap();
    for (iso, _) in cache.iter().step_by(11) {
        let first = score_day(&natal, iso, &cache).unwrap();
        let second = score_day(&natal, iso, &cache).unwrap();
        assert_eq!(first, second);
        assert!(first.score <= 100);
        assert_eq!(first.day_type, DayType::classify(first.score));
        assert!(first.top_aspects.len() <= 3);
        assert!(first.top_aspects.windows(2).all(|w| w[0].orb <= w[1].orb));
    }
}

#[test]
fn test_views_agree_with_score_day() {
    let natal = natal_chart();
    let cache = year_cache(2026).unwrap();

    let start = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
    let week = weekly_forecast(&natal, start, global_engine()).unwrap();
    assert_eq!(week.len(), 7);
    for day in &week {
        assert_eq!(*day, score_day(&natal, &day.date.to_string(), &cache).unwrap());
    }

    let june = calendar_month(&natal, 6, &cache).unwrap();
    assert_eq!(june.len(), 30);
    assert_eq!(&june[9..16], &week[..]);

    let outlook = monthly_outlook(&natal, &cache).unwrap();
    let june_outlook = &outlook[5];
    let mean = june.iter().map(|d| f64::from(d.score)).sum::<f64>() / 30.0;
    assert_eq!(june_outlook.score, mean.round() as u8);
    assert_eq!(
        june_outlook.power_days,
        june.iter().filter(|d| d.day_type == DayType::Power).count()
    );
    let best = june.iter().map(|d| d.score).max().unwrap();
    let best_day = june_outlook.best_day.unwrap();
    assert_eq!(june.iter().find(|d| d.date == best_day).unwrap().score, best);
}

#[test]
fn test_monthly_outlook_covers_the_year() {
    let outlook = monthly_outlook(&natal_chart(), &year_cache(2026).unwrap()).unwrap();
    let months: Vec<u32> = outlook.iter().map(|m| m.month).collect();
    assert_eq!(months, (1..=12).collect::<Vec<_>>());
    for month in &outlook {
        assert_eq!(month.year, 2026);
        assert_eq!(month.day_type, DayType::classify(month.score));
        assert_eq!(month.best_day.map(|d| d.month()), Some(month.month));
    }
}

#[test]
fn test_week_across_new_year() {
    let natal = natal_chart();
    let start = NaiveDate::from_ymd_opt(2026, 12, 29).unwrap();
    let week = weekly_forecast(&natal, start, global_engine()).unwrap();

    let dates: Vec<String> = week.iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates[0], "2026-12-29");
    assert_eq!(dates[3], "2027-01-01");
    assert_eq!(dates[6], "2027-01-04");

    let next_year = year_cache(2027).unwrap();
    assert_eq!(week[4], score_day(&natal, "2027-01-02", &next_year).unwrap());
}

#[test]
fn test_best_and_worst_days() {
    let natal = natal_chart();
    let cache = year_cache(2026).unwrap();
    let ranked = rank_days(&natal, &cache, 5).unwrap();

    assert_eq!(ranked.best.len(), 5);
    assert_eq!(ranked.worst.len(), 5);
    assert!(ranked.best.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(ranked.worst.windows(2).all(|w| w[0].score <= w[1].score));
    assert!(ranked.best[0].score >= ranked.worst[0].score);
    for day in ranked.best.iter().chain(&ranked.worst) {
        assert_eq!(*day, score_day(&natal, &day.date.to_string(), &cache).unwrap());
    }
}

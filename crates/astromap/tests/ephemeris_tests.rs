use astromap::angles::{circular_distance, normalize_signed};
use astromap::ephemeris::{
    ecliptic_to_equatorial, julian_day, mean_obliquity, EphemerisCalculator, Planet, ALL_BODIES,
};
use astromap::error::AstroError;
use astromap::zodiac::sign_index;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use std::thread;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn test_positions_at_j2000() {
    let calc = EphemerisCalculator::new();
    let positions = calc.positions_at(utc(2000, 1, 1, 12, 0)).unwrap();

    // Apparent geocentric longitudes, rounded to 0.1°
    let expected = [
        (Planet::Sun, 280.4),
        (Planet::Moon, 223.3),
        (Planet::Mercury, 271.9),
        (Planet::Venus, 241.6),
        (Planet::Mars, 328.0),
        (Planet::Jupiter, 25.3),
        (Planet::Saturn, 40.4),
        (Planet::Uranus, 314.8),
        (Planet::Neptune, 303.2),
        (Planet::Pluto, 251.5),
        (Planet::NorthNode, 125.0),
    ];
    for (planet, lon) in expected {
        let pos = positions.iter().find(|p| p.planet == planet).unwrap();
        assert!(
            circular_distance(pos.longitude, lon) < 0.5,
            "{planet}: {} vs {lon}",
            pos.longitude
        );
    }
}

#[test]
fn test_new_and_full_moon() {
    let calc = EphemerisCalculator::new();

    let new_moon = utc(2000, 1, 6, 18, 14);
    let sun = calc.position(Planet::Sun, new_moon).unwrap();
    let moon = calc.position(Planet::Moon, new_moon).unwrap();
    assert!(circular_distance(sun.longitude, moon.longitude) < 1.0);

    let full_moon = utc(2024, 1, 25, 17, 54);
    let sun = calc.position(Planet::Sun, full_moon).unwrap();
    let moon = calc.position(Planet::Moon, full_moon).unwrap();
    assert!(circular_distance(sun.longitude, moon.longitude) > 179.0);
}

#[test]
fn test_great_conjunction_2020() {
    let calc = EphemerisCalculator::new();
    let instant = utc(2020, 12, 21, 18, 0);
    let jupiter = calc.position(Planet::Jupiter, instant).unwrap();
    let saturn = calc.position(Planet::Saturn, instant).unwrap();
    assert!(circular_distance(jupiter.longitude, saturn.longitude) < 0.5);
    assert!(circular_distance(jupiter.longitude, 300.4) < 0.5);
}

#[test]
fn test_retrograde_flags() {
    let calc = EphemerisCalculator::new();
    // Mercury stationed retrograde 2023-04-21 and direct 2023-05-15
    let mercury = calc.position(Planet::Mercury, utc(2023, 5, 1, 12, 0)).unwrap();
    assert!(mercury.retrograde);
    assert!(mercury.speed < 0.0);

    let sun = calc.position(Planet::Sun, utc(2023, 5, 1, 12, 0)).unwrap();
    assert!(!sun.retrograde);
    assert!((sun.speed - 0.97).abs() < 0.05);

    let node = calc.position(Planet::NorthNode, utc(2023, 5, 1, 12, 0)).unwrap();
    assert!(node.retrograde);
}

#[test]
fn test_mars_opposition_2003() {
    let calc = EphemerisCalculator::new();
    let instant = utc(2003, 8, 28, 12, 0);
    let mars = calc.position(Planet::Mars, instant).unwrap();
    let sun = calc.position(Planet::Sun, instant).unwrap();
    assert!(circular_distance(mars.longitude, sun.longitude) > 179.0);
    assert!(mars.retrograde);
}

#[test]
fn test_longitudes_normalized_and_continuous() {
    let calc = EphemerisCalculator::new();
    let mut instant = utc(2025, 1, 1, 0, 0);
    let mut previous = calc.positions_at(instant).unwrap();
    for _ in 0..(4 * 400) {
        instant += Duration::hours(6);
        let current = calc.positions_at(instant).unwrap();
        for (before, after) in previous.iter().zip(&current) {
            assert!((0.0..360.0).contains(&after.longitude), "{:?}", after);
            assert!(sign_index(after.longitude) <= 11);
            assert!((0.0..30.0).contains(&after.degree_in_sign));
            assert_eq!(after.sign.index(), sign_index(after.longitude));
            // The Moon moves about 3.3° in six hours; nothing jumps more than that.
            let step = normalize_signed(after.longitude - before.longitude).abs();
            assert!(step < 5.0, "{} jumped {step}° at {instant}", after.planet);
        }
        previous = current;
    }
}

#[test]
fn test_nodes_are_opposite() {
    let calc = EphemerisCalculator::new();
    let positions = calc.positions_at(utc(1975, 6, 15, 3, 30)).unwrap();
    let north = positions.iter().find(|p| p.planet == Planet::NorthNode).unwrap();
    let south = positions.iter().find(|p| p.planet == Planet::SouthNode).unwrap();
    assert!((circular_distance(north.longitude, south.longitude) - 180.0).abs() < 1e-9);
}

#[test]
fn test_out_of_range_instants_are_rejected() {
    let calc = EphemerisCalculator::new();
    for instant in [utc(1899, 12, 31, 23, 0), utc(2101, 1, 1, 0, 0)] {
        match calc.positions_at(instant) {
            Err(AstroError::Range { min_year, max_year, .. }) => {
                assert_eq!((min_year, max_year), (1900, 2100));
            }
            other => panic!("expected a range error, got {other:?}"),
        }
    }
    assert!(calc.position(Planet::Sun, utc(1900, 1, 1, 0, 0)).is_ok());
    assert!(calc.position(Planet::Pluto, utc(2100, 12, 31, 0, 0)).is_ok());
}

#[test]
fn test_deterministic_and_thread_safe() {
    let calc = Arc::new(EphemerisCalculator::new());
    let instant = utc(1988, 11, 2, 7, 45);
    let reference = calc.positions_at(instant).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let calc = Arc::clone(&calc);
            thread::spawn(move || calc.positions_at(instant).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}

#[test]
fn test_sun_at_equinox_is_on_the_equator() {
    let calc = EphemerisCalculator::new();
    let instant = utc(2024, 3, 20, 3, 6);
    let sun = calc.position(Planet::Sun, instant).unwrap();
    assert!(circular_distance(sun.longitude, 0.0) < 0.1);

    let eq = calc.equatorial(Planet::Sun, instant).unwrap();
    assert!(eq.declination.abs() < 0.1);
    let obliquity = mean_obliquity(julian_day(instant));
    let direct = ecliptic_to_equatorial(sun.longitude, sun.latitude, obliquity);
    assert!((direct.declination - eq.declination).abs() < 1e-9);
}

#[test]
fn test_batch_matches_single_body_queries() {
    let calc = EphemerisCalculator::new();
    let instant = utc(2012, 12, 21, 11, 11);
    let batch = calc.positions_at(instant).unwrap();
    assert_eq!(batch.len(), ALL_BODIES.len());
    for (pos, &planet) in batch.iter().zip(ALL_BODIES.iter()) {
        assert_eq!(pos.planet, planet);
        assert_eq!(*pos, calc.position(planet, instant).unwrap());
    }
}

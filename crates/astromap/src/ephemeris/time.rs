//! Julian dates, sidereal time and the ecliptic/equatorial frame change.
//!
//! UT is used in place of TT throughout; the difference (about a minute over
//! the supported range) is far below the accuracy of the orbital model.

use crate::angles::{asin_deg, atan2_deg, cos_deg, normalize_degrees, sin_deg, tan_deg};
use crate::ephemeris::types::EquatorialPosition;
use crate::error::{AstroError, AstroResult, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR};
use chrono::{DateTime, Datelike, Utc};

pub const J2000_JD: f64 = 2_451_545.0;
/// Julian date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Offset used by the orbital-element day number (0.0 TT, 1999-12-31).
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert UTC datetime to Julian Day
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// Day number used by the orbital element tables.
pub fn element_day(jd: f64) -> f64 {
    jd - ELEMENT_EPOCH_JD
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Reject instants outside the supported ephemeris years.
pub fn ensure_supported(dt: DateTime<Utc>) -> AstroResult<()> {
    let year = dt.year();
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(AstroError::out_of_range(format!("Instant {}", dt.to_rfc3339())))
    }
}

/// Greenwich mean sidereal time in degrees [0, 360).
///
/// Meeus, *Astronomical Algorithms*, eq. 12.4.
pub fn gmst_degrees(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Local sidereal time for an east-positive longitude, degrees [0, 360).
pub fn local_sidereal_degrees(gmst: f64, longitude_east: f64) -> f64 {
    normalize_degrees(gmst + longitude_east)
}

/// Mean obliquity of the ecliptic, degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    23.439_291_1 - 0.013_004_2 * t - 0.000_000_164 * t * t + 0.000_000_504 * t * t * t
}

/// Ecliptic (longitude, latitude) to equatorial (RA, Dec), all in degrees.
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> EquatorialPosition {
    let ra = atan2_deg(
        sin_deg(longitude) * cos_deg(obliquity) - tan_deg(latitude) * sin_deg(obliquity),
        cos_deg(longitude),
    );
    let dec = asin_deg(
        sin_deg(latitude) * cos_deg(obliquity)
            + cos_deg(latitude) * sin_deg(obliquity) * sin_deg(longitude),
    );
    EquatorialPosition {
        right_ascension: normalize_degrees(ra),
        declination: dec,
    }
}

/// Whether a body crosses the horizon at a given latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonCrossing {
    /// Rises and sets; hour angle of setting in degrees (0..=180)
    Crosses { semi_arc: f64 },
    /// Always below the horizon
    NeverRises,
    /// Circumpolar, always above the horizon
    NeverSets,
}

/// Hour angle at which a body of declination `dec` meets the horizon at `lat`.
///
/// `cos H0 = -tan φ · tan δ`; when `|tan φ · tan δ| > 1` there is no crossing.
pub fn horizon_hour_angle(lat: f64, dec: f64) -> HorizonCrossing {
    let cos_h0 = -tan_deg(lat) * tan_deg(dec);
    if cos_h0.is_nan() || cos_h0 > 1.0 {
        HorizonCrossing::NeverRises
    } else if cos_h0 < -1.0 {
        HorizonCrossing::NeverSets
    } else {
        HorizonCrossing::Crosses {
            semi_arc: cos_h0.acos().to_degrees(),
        }
    }
}

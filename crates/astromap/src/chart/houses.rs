//! Chart angles and house cusps.
//!
//! All inputs are degrees: `ramc` is the right ascension of the meridian
//! (local sidereal time), `obliquity` the obliquity of the ecliptic and
//! `latitude` the geographic latitude of the observer.

use crate::angles::{
    asin_deg, atan2_deg, circular_distance, cos_deg, normalize_degrees, sin_deg, tan_deg,
};
use crate::chart::types::{HouseCusps, HouseSystem};
use crate::ephemeris::time::{horizon_hour_angle, HorizonCrossing};

const PLACIDUS_MAX_ITERATIONS: usize = 50;
const PLACIDUS_TOLERANCE_DEG: f64 = 1e-8;

/// Ecliptic longitude rising on the eastern horizon.
pub fn ascendant(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    normalize_degrees(atan2_deg(
        cos_deg(ramc),
        -(sin_deg(ramc) * cos_deg(obliquity) + tan_deg(latitude) * sin_deg(obliquity)),
    ))
}

/// Ecliptic longitude culminating on the meridian.
pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    normalize_degrees(atan2_deg(sin_deg(ramc), cos_deg(ramc) * cos_deg(obliquity)))
}

/// Ecliptic longitude of the point with a given right ascension.
fn longitude_from_ra(ra: f64, obliquity: f64) -> f64 {
    normalize_degrees(atan2_deg(sin_deg(ra), cos_deg(ra) * cos_deg(obliquity)))
}

/// Cusps for one house system, or `None` when the system is undefined at this latitude.
pub fn house_cusps(
    system: HouseSystem,
    ramc: f64,
    obliquity: f64,
    latitude: f64,
) -> Option<HouseCusps> {
    let asc = ascendant(ramc, obliquity, latitude);
    let mc = midheaven(ramc, obliquity);
    let cusps = match system {
        HouseSystem::Placidus => placidus_cusps(ramc, obliquity, latitude, asc, mc)?,
        HouseSystem::Equal => offsets_from(asc),
        HouseSystem::WholeSign => offsets_from((asc / 30.0).floor() * 30.0),
    };
    Some(HouseCusps {
        system,
        cusps,
        ascendant: asc,
        midheaven: mc,
        descendant: normalize_degrees(asc + 180.0),
        imum_coeli: normalize_degrees(mc + 180.0),
    })
}

fn offsets_from(start: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(start + 30.0 * i as f64);
    }
    cusps
}

/// Which intermediate cusp is being solved and how it divides the semi-arc.
#[derive(Debug, Clone, Copy)]
enum PlacidusCusp {
    Eleventh,
    Twelfth,
    Second,
    Third,
}

impl PlacidusCusp {
    /// Right ascension of the cusp for a given diurnal semi-arc.
    fn right_ascension(self, ramc: f64, diurnal: f64) -> f64 {
        let nocturnal = 180.0 - diurnal;
        match self {
            PlacidusCusp::Eleventh => ramc + diurnal / 3.0,
            PlacidusCusp::Twelfth => ramc + 2.0 * diurnal / 3.0,
            PlacidusCusp::Second => ramc + 180.0 - 2.0 * nocturnal / 3.0,
            PlacidusCusp::Third => ramc + 180.0 - nocturnal / 3.0,
        }
    }
}

fn placidus_cusps(
    ramc: f64,
    obliquity: f64,
    latitude: f64,
    asc: f64,
    mc: f64,
) -> Option<[f64; 12]> {
    let c11 = placidus_cusp(PlacidusCusp::Eleventh, ramc, obliquity, latitude)?;
    let c12 = placidus_cusp(PlacidusCusp::Twelfth, ramc, obliquity, latitude)?;
    let c2 = placidus_cusp(PlacidusCusp::Second, ramc, obliquity, latitude)?;
    let c3 = placidus_cusp(PlacidusCusp::Third, ramc, obliquity, latitude)?;
    let opp = |x: f64| normalize_degrees(x + 180.0);
    Some([
        asc,
        c2,
        c3,
        opp(mc),
        opp(c11),
        opp(c12),
        opp(asc),
        opp(c2),
        opp(c3),
        mc,
        c11,
        c12,
    ])
}

/// Fixed-point iteration on the cusp's own declination.
fn placidus_cusp(cusp: PlacidusCusp, ramc: f64, obliquity: f64, latitude: f64) -> Option<f64> {
    let mut lon = longitude_from_ra(cusp.right_ascension(ramc, 90.0), obliquity);
    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let declination = asin_deg(sin_deg(obliquity) * sin_deg(lon));
        // Circumpolar cusp degrees have no semi-arc to divide.
        let HorizonCrossing::Crosses { semi_arc } = horizon_hour_angle(latitude, declination) else {
            return None;
        };
        let next = longitude_from_ra(cusp.right_ascension(ramc, semi_arc), obliquity);
        let step = circular_distance(next, lon);
        lon = next;
        if step < PLACIDUS_TOLERANCE_DEG {
            return Some(lon);
        }
    }
    Some(lon)
}

//! Geocentric Moon and the mean lunar nodes.
//!
//! The Moon's Keplerian orbit about the Earth is corrected with the twelve
//! largest longitude terms (evection, variation, yearly equation, ...) and five
//! latitude terms.

use crate::angles::{normalize_degrees, sin_deg};
use crate::ephemeris::elements::{Orbit, OrbitalElements, MOON};

/// Geocentric ecliptic longitude and latitude of the Moon, degrees.
pub(crate) fn moon_geocentric(d: f64) -> (f64, f64) {
    let moon = OrbitalElements::from_row(&MOON, d);
    let sun = OrbitalElements::of(Orbit::Sun, d);
    let pos = moon.spherical_position();

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = sun.mean_anomaly + sun.perihelion;
    let lm = moon.mean_anomaly + moon.perihelion + moon.node;
    let dd = lm - ls; // mean elongation
    let f = lm - moon.node; // argument of latitude

    let lon = pos.lon - 1.274 * sin_deg(mm - 2.0 * dd)
        + 0.658 * sin_deg(2.0 * dd)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd);
    let lat = pos.lat - 0.173 * sin_deg(f - 2.0 * dd)
        - 0.055 * sin_deg(mm - f - 2.0 * dd)
        - 0.046 * sin_deg(mm + f - 2.0 * dd)
        + 0.033 * sin_deg(f + 2.0 * dd)
        + 0.017 * sin_deg(2.0 * mm + f);

    (normalize_degrees(lon), lat)
}

/// Mean north (ascending) node longitude, degrees [0, 360).
pub(crate) fn mean_north_node(d: f64) -> f64 {
    OrbitalElements::from_row(&MOON, d).node
}

/// South node is always opposite the north node.
pub(crate) fn mean_south_node(d: f64) -> f64 {
    normalize_degrees(mean_north_node(d) + 180.0)
}

//! Mean orbital elements and the Kepler solution for the Sun and planets.
//!
//! Elements are linear in the day number `d` (0.0 = 1999-12-31 0h) and refer
//! to the ecliptic and equinox of date. Jupiter, Saturn and Uranus get the
//! largest mutual perturbation terms; Pluto uses a periodic series fitted for
//! roughly 1800-2100. Accuracy is on the order of one to two arc-minutes.

use crate::angles::{atan2_deg, cos_deg, normalize_degrees, sin_deg};

/// [N, i, w, a, e, M] as (value at d = 0, rate per day).
type ElementRow = [(f64, f64); 6];

#[rustfmt::skip]
const SUN: ElementRow = [
    (0.0, 0.0), (0.0, 0.0), (282.9404, 4.70935e-5),
    (1.000000, 0.0), (0.016709, -1.151e-9), (356.0470, 0.985_600_258_5),
];
#[rustfmt::skip]
const MERCURY: ElementRow = [
    (48.3313, 3.24587e-5), (7.0047, 5.00e-8), (29.1241, 1.01444e-5),
    (0.387098, 0.0), (0.205635, 5.59e-10), (168.6562, 4.092_334_436_8),
];
#[rustfmt::skip]
const VENUS: ElementRow = [
    (76.6799, 2.46590e-5), (3.3946, 2.75e-8), (54.8910, 1.38374e-5),
    (0.723330, 0.0), (0.006773, -1.302e-9), (48.0052, 1.602_130_224_4),
];
#[rustfmt::skip]
const MARS: ElementRow = [
    (49.5574, 2.11081e-5), (1.8497, -1.78e-8), (286.5016, 2.92961e-5),
    (1.523688, 0.0), (0.093405, 2.516e-9), (18.6021, 0.524_020_776_6),
];
#[rustfmt::skip]
const JUPITER: ElementRow = [
    (100.4542, 2.76854e-5), (1.3030, -1.557e-7), (273.8777, 1.64505e-5),
    (5.20256, 0.0), (0.048498, 4.469e-9), (19.8950, 0.083_085_300_1),
];
#[rustfmt::skip]
const SATURN: ElementRow = [
    (113.6634, 2.38980e-5), (2.4886, -1.081e-7), (339.3939, 2.97661e-5),
    (9.55475, 0.0), (0.055546, -9.499e-9), (316.9670, 0.033_444_228_2),
];
#[rustfmt::skip]
const URANUS: ElementRow = [
    (74.0005, 1.3978e-5), (0.7733, 1.9e-8), (96.6612, 3.0565e-5),
    (19.18171, -1.55e-8), (0.047318, 7.45e-9), (142.5905, 0.011_725_806),
];
#[rustfmt::skip]
const NEPTUNE: ElementRow = [
    (131.7806, 3.0173e-5), (1.7700, -2.55e-7), (272.8461, -6.027e-6),
    (30.05826, 3.313e-8), (0.008606, 2.15e-9), (260.2471, 0.005_995_147),
];
#[rustfmt::skip]
pub(crate) const MOON: ElementRow = [
    (125.1228, -0.052_953_808_3), (5.1454, 0.0), (318.0634, 0.164_357_322_3),
    (60.2666, 0.0), (0.054900, 0.0), (115.3654, 13.064_992_950_9),
];

/// Bodies described by Keplerian elements (Earth's orbit is expressed as the Sun's).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orbit {
    Sun,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OrbitalElements {
    /// Longitude of the ascending node
    pub node: f64,
    pub inclination: f64,
    /// Argument of perihelion
    pub perihelion: f64,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub(crate) fn from_row(row: &ElementRow, d: f64) -> Self {
        let at = |k: usize| row[k].0 + row[k].1 * d;
        Self {
            node: normalize_degrees(at(0)),
            inclination: at(1),
            perihelion: normalize_degrees(at(2)),
            semi_major_axis: at(3),
            eccentricity: at(4),
            mean_anomaly: normalize_degrees(at(5)),
        }
    }

    pub(crate) fn of(orbit: Orbit, d: f64) -> Self {
        let row = match orbit {
            Orbit::Sun => &SUN,
            Orbit::Mercury => &MERCURY,
            Orbit::Venus => &VENUS,
            Orbit::Mars => &MARS,
            Orbit::Jupiter => &JUPITER,
            Orbit::Saturn => &SATURN,
            Orbit::Uranus => &URANUS,
            Orbit::Neptune => &NEPTUNE,
        };
        Self::from_row(row, d)
    }

    /// True anomaly (degrees) and radius vector from Kepler's equation.
    pub(crate) fn true_anomaly_and_radius(&self) -> (f64, f64) {
        let e = self.eccentricity;
        let ea = eccentric_anomaly(self.mean_anomaly, e);
        let xv = self.semi_major_axis * (ea.cos() - e);
        let yv = self.semi_major_axis * (1.0 - e * e).sqrt() * ea.sin();
        (atan2_deg(yv, xv), (xv * xv + yv * yv).sqrt())
    }

    /// Position in the ecliptic frame of the orbit's focus: (longitude, latitude, radius).
    pub(crate) fn spherical_position(&self) -> Spherical {
        let (v, r) = self.true_anomaly_and_radius();
        let vw = v + self.perihelion;
        let n = self.node;
        let i = self.inclination;
        let x = r * (cos_deg(n) * cos_deg(vw) - sin_deg(n) * sin_deg(vw) * cos_deg(i));
        let y = r * (sin_deg(n) * cos_deg(vw) + cos_deg(n) * sin_deg(vw) * cos_deg(i));
        let z = r * sin_deg(vw) * sin_deg(i);
        Spherical::from_rectangular(x, y, z)
    }
}

/// Solve Kepler's equation, returning the eccentric anomaly in radians.
fn eccentric_anomaly(mean_anomaly_deg: f64, e: f64) -> f64 {
    let m = mean_anomaly_deg.to_radians();
    let mut ea = m + e * m.sin() * (1.0 + e * m.cos());
    for _ in 0..30 {
        let delta = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Spherical {
    pub lon: f64,
    pub lat: f64,
    pub r: f64,
}

impl Spherical {
    pub(crate) fn from_rectangular(x: f64, y: f64, z: f64) -> Self {
        Self {
            lon: normalize_degrees(atan2_deg(y, x)),
            lat: atan2_deg(z, (x * x + y * y).sqrt()),
            r: (x * x + y * y + z * z).sqrt(),
        }
    }

    pub(crate) fn to_rectangular(self) -> (f64, f64, f64) {
        (
            self.r * cos_deg(self.lon) * cos_deg(self.lat),
            self.r * sin_deg(self.lon) * cos_deg(self.lat),
            self.r * sin_deg(self.lat),
        )
    }
}

/// Geocentric ecliptic longitude of the Sun plus its distance (AU).
pub(crate) fn sun_geocentric(d: f64) -> (f64, f64) {
    let sun = OrbitalElements::of(Orbit::Sun, d);
    let (v, r) = sun.true_anomaly_and_radius();
    (normalize_degrees(v + sun.perihelion), r)
}

/// Heliocentric position with the Jupiter/Saturn/Uranus perturbations applied.
pub(crate) fn heliocentric(orbit: Orbit, d: f64) -> Spherical {
    let mut pos = OrbitalElements::of(orbit, d).spherical_position();
    let mj = OrbitalElements::of(Orbit::Jupiter, d).mean_anomaly;
    let ms = OrbitalElements::of(Orbit::Saturn, d).mean_anomaly;
    let mu = OrbitalElements::of(Orbit::Uranus, d).mean_anomaly;
    match orbit {
        Orbit::Jupiter => {
            pos.lon += -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0);
        }
        Orbit::Saturn => {
            pos.lon += 0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0);
            pos.lat += -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0);
        }
        Orbit::Uranus => {
            pos.lon += 0.040 * sin_deg(ms - 2.0 * mu + 6.0)
                + 0.035 * sin_deg(ms - 3.0 * mu + 33.0)
                - 0.015 * sin_deg(mj - mu + 20.0);
        }
        _ => {}
    }
    pos.lon = normalize_degrees(pos.lon);
    pos
}

/// Heliocentric Pluto from the periodic series, equinox of date.
pub(crate) fn pluto_heliocentric(d: f64) -> Spherical {
    let s = 50.03 + 0.033_459_652 * d;
    let p = 238.95 + 0.003_968_789 * d;
    let lon = 238.9508 + 0.004_007_03 * d - 19.799 * sin_deg(p) + 19.848 * cos_deg(p)
        + 0.897 * sin_deg(2.0 * p)
        - 4.956 * cos_deg(2.0 * p)
        + 0.610 * sin_deg(3.0 * p)
        + 1.211 * cos_deg(3.0 * p)
        - 0.341 * sin_deg(4.0 * p)
        - 0.190 * cos_deg(4.0 * p)
        + 0.128 * sin_deg(5.0 * p)
        - 0.034 * cos_deg(5.0 * p)
        - 0.038 * sin_deg(6.0 * p)
        + 0.031 * cos_deg(6.0 * p)
        + 0.020 * sin_deg(s - p)
        - 0.010 * cos_deg(s - p);
    let lat = -3.9082 - 5.453 * sin_deg(p) - 14.975 * cos_deg(p) + 3.527 * sin_deg(2.0 * p)
        + 1.673 * cos_deg(2.0 * p)
        - 1.051 * sin_deg(3.0 * p)
        + 0.328 * cos_deg(3.0 * p)
        + 0.179 * sin_deg(4.0 * p)
        - 0.292 * cos_deg(4.0 * p)
        + 0.019 * sin_deg(5.0 * p)
        + 0.100 * cos_deg(5.0 * p)
        - 0.031 * sin_deg(6.0 * p)
        - 0.026 * cos_deg(6.0 * p)
        + 0.011 * cos_deg(s - p);
    let r = 40.72 + 6.68 * sin_deg(p) + 6.90 * cos_deg(p) - 1.18 * sin_deg(2.0 * p)
        - 0.03 * cos_deg(2.0 * p)
        + 0.15 * sin_deg(3.0 * p)
        - 0.14 * cos_deg(3.0 * p);
    // series is J2000; precess to the equinox of date
    let precession = 3.823_94e-5 * (d - 1.5);
    Spherical {
        lon: normalize_degrees(lon + precession),
        lat,
        r,
    }
}

/// Shift a heliocentric position to the geocentric ecliptic: (longitude, latitude).
pub(crate) fn to_geocentric(helio: Spherical, d: f64) -> (f64, f64) {
    let (sun_lon, sun_r) = sun_geocentric(d);
    let (xh, yh, zh) = helio.to_rectangular();
    let xg = xh + sun_r * cos_deg(sun_lon);
    let yg = yh + sun_r * sin_deg(sun_lon);
    let geo = Spherical::from_rectangular(xg, yg, zh);
    (geo.lon, geo.lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kepler_circular_orbit_is_identity() {
        let ea = eccentric_anomaly(123.0, 0.0);
        assert!((ea.to_degrees() - 123.0).abs() < 1e-9);
    }

    #[test]
    fn kepler_converges_for_mercury_eccentricity() {
        let e = 0.2056;
        let ea = eccentric_anomaly(200.0, e);
        let m = ea - e * ea.sin();
        assert!((normalize_degrees(m.to_degrees()) - 200.0).abs() < 1e-8);
    }

    #[test]
    fn sun_distance_is_about_one_au() {
        for d in [0.0, 100.0, 2000.0, -20000.0] {
            let (_, r) = sun_geocentric(d);
            assert!((0.98..1.02).contains(&r), "r = {r}");
        }
    }

    #[test]
    fn pluto_distance_is_plausible() {
        let p = pluto_heliocentric(0.0);
        assert!((29.0..50.0).contains(&p.r));
    }
}

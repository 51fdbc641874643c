use crate::angles::normalize_signed;
use crate::ephemeris::elements::{
    heliocentric, pluto_heliocentric, sun_geocentric, to_geocentric, Orbit,
};
use crate::ephemeris::moon::{mean_north_node, mean_south_node, moon_geocentric};
use crate::ephemeris::time::{
    ecliptic_to_equatorial, element_day, ensure_supported, julian_day, mean_obliquity,
};
use crate::ephemeris::types::{EquatorialPosition, Planet, PlanetPosition, ALL_BODIES};
use crate::error::AstroResult;
use chrono::{DateTime, Utc};

/// Half-width of the central difference used for speeds, in days.
const SPEED_HALF_STEP_DAYS: f64 = 0.5;

/// Analytical ephemeris for the ten planets and the mean lunar nodes.
///
/// Stateless: every call is a pure function of its arguments, so one value can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EphemerisCalculator;

impl EphemerisCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Position of a single body at a UTC instant.
    pub fn position(&self, planet: Planet, instant: DateTime<Utc>) -> AstroResult<PlanetPosition> {
        ensure_supported(instant)?;
        Ok(self.position_at_jd(planet, julian_day(instant)))
    }

    /// All twelve bodies, in chart order.
    pub fn positions_at(&self, instant: DateTime<Utc>) -> AstroResult<Vec<PlanetPosition>> {
        ensure_supported(instant)?;
        Ok(self.positions_at_jd(julian_day(instant)))
    }

    /// Right ascension and declination of a body.
    pub fn equatorial(
        &self,
        planet: Planet,
        instant: DateTime<Utc>,
    ) -> AstroResult<EquatorialPosition> {
        ensure_supported(instant)?;
        let jd = julian_day(instant);
        let (lon, lat) = ecliptic_lon_lat(planet, element_day(jd));
        Ok(ecliptic_to_equatorial(lon, lat, mean_obliquity(jd)))
    }

    /// Unchecked variant for callers that already validated the instant.
    pub(crate) fn positions_at_jd(&self, jd: f64) -> Vec<PlanetPosition> {
        ALL_BODIES
            .iter()
            .map(|&planet| self.position_at_jd(planet, jd))
            .collect()
    }

    pub(crate) fn position_at_jd(&self, planet: Planet, jd: f64) -> PlanetPosition {
        let d = element_day(jd);
        let (lon, lat) = ecliptic_lon_lat(planet, d);
        let (ahead, _) = ecliptic_lon_lat(planet, d + SPEED_HALF_STEP_DAYS);
        let (behind, _) = ecliptic_lon_lat(planet, d - SPEED_HALF_STEP_DAYS);
        let speed = normalize_signed(ahead - behind) / (2.0 * SPEED_HALF_STEP_DAYS);
        PlanetPosition::new(planet, lon, lat, speed)
    }
}

/// Geocentric ecliptic (longitude, latitude) for day number `d`.
pub(crate) fn ecliptic_lon_lat(planet: Planet, d: f64) -> (f64, f64) {
    match planet {
        Planet::Sun => (sun_geocentric(d).0, 0.0),
        Planet::Moon => moon_geocentric(d),
        Planet::Mercury => to_geocentric(heliocentric(Orbit::Mercury, d), d),
        Planet::Venus => to_geocentric(heliocentric(Orbit::Venus, d), d),
        Planet::Mars => to_geocentric(heliocentric(Orbit::Mars, d), d),
        Planet::Jupiter => to_geocentric(heliocentric(Orbit::Jupiter, d), d),
        Planet::Saturn => to_geocentric(heliocentric(Orbit::Saturn, d), d),
        Planet::Uranus => to_geocentric(heliocentric(Orbit::Uranus, d), d),
        Planet::Neptune => to_geocentric(heliocentric(Orbit::Neptune, d), d),
        Planet::Pluto => to_geocentric(pluto_heliocentric(d), d),
        Planet::NorthNode => (mean_north_node(d), 0.0),
        Planet::SouthNode => (mean_south_node(d), 0.0),
    }
}

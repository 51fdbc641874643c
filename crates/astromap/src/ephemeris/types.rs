use crate::zodiac::{degree_in_sign, ZodiacSign};
use crate::angles::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies the ephemeris can place: ten planets plus the two lunar nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

/// Every body in chart order.
pub const ALL_BODIES: [Planet; 12] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
    Planet::Pluto,
    Planet::NorthNode,
    Planet::SouthNode,
];

impl Planet {
    pub const fn all() -> &'static [Planet] {
        &ALL_BODIES
    }

    /// Lowercase identifier: "sun", "north_node", ...
    pub fn id(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
            Planet::NorthNode => "north_node",
            Planet::SouthNode => "south_node",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
            Planet::NorthNode => "North Node",
            Planet::SouthNode => "South Node",
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Planet::NorthNode | Planet::SouthNode)
    }

    /// Sun and Moon.
    pub fn is_luminary(self) -> bool {
        matches!(self, Planet::Sun | Planet::Moon)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geocentric ecliptic position of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    pub sign: ZodiacSign,
    /// Degree within the sign (0-30)
    pub degree_in_sign: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(planet: Planet, longitude: f64, latitude: f64, speed: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        Self {
            planet,
            longitude,
            latitude,
            sign: ZodiacSign::from_longitude(longitude),
            degree_in_sign: degree_in_sign(longitude),
            speed,
            retrograde: speed < 0.0,
        }
    }
}

/// Right ascension / declination pair, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquatorialPosition {
    /// Right ascension in degrees (0-360)
    pub right_ascension: f64,
    /// Declination in degrees (-90..90)
    pub declination: f64,
}

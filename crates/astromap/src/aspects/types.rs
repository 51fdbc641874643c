use crate::ephemeris::types::{Planet, PlanetPosition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major aspect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

/// How an aspect tends to feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    MinorHarmonious,
    MinorChallenging,
    Neutral,
}

impl AspectNature {
    /// +1 for supportive, -1 for difficult, scaled down for the minor natures.
    pub fn polarity(self) -> f64 {
        match self {
            AspectNature::Harmonious => 1.0,
            AspectNature::MinorHarmonious => 0.6,
            AspectNature::Neutral => 0.0,
            AspectNature::MinorChallenging => -0.6,
            AspectNature::Challenging => -1.0,
        }
    }
}

/// Angle, orb and default nature of one aspect type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub max_orb: f64,
    /// Conjunctions take their nature from the bodies involved.
    pub nature: AspectNature,
    /// Relative weight in the day score.
    pub weight: f64,
}

impl AspectKind {
    pub fn definition(self) -> AspectDefinition {
        let (angle, max_orb, nature, weight) = match self {
            AspectKind::Conjunction => (0.0, 8.0, AspectNature::Neutral, 6.0),
            AspectKind::Sextile => (60.0, 6.0, AspectNature::MinorHarmonious, 4.0),
            AspectKind::Square => (90.0, 7.0, AspectNature::Challenging, 6.0),
            AspectKind::Trine => (120.0, 8.0, AspectNature::Harmonious, 6.0),
            AspectKind::Opposition => (180.0, 8.0, AspectNature::Challenging, 5.0),
        };
        AspectDefinition {
            kind: self,
            angle,
            max_orb,
            nature,
            weight,
        }
    }

    pub fn angle(self) -> f64 {
        self.definition().angle
    }

    pub fn max_orb(self) -> f64 {
        self.definition().max_orb
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A natal point an aspect can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NatalPoint {
    Planet(Planet),
    Ascendant,
}

impl NatalPoint {
    /// Sun, Moon and Ascendant weigh more in scoring.
    pub fn is_personal(self) -> bool {
        match self {
            NatalPoint::Planet(p) => p.is_luminary(),
            NatalPoint::Ascendant => true,
        }
    }
}

impl fmt::Display for NatalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NatalPoint::Planet(p) => write!(f, "{p}"),
            NatalPoint::Ascendant => f.write_str("Ascendant"),
        }
    }
}

/// Natal side of aspect detection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalPositions {
    pub planets: Vec<PlanetPosition>,
    /// Ascendant longitude, present only when the birth time is known.
    pub ascendant: Option<f64>,
}

impl NatalPositions {
    /// Every natal point with its longitude, planets first.
    pub fn points(&self) -> Vec<(NatalPoint, f64)> {
        let mut points: Vec<(NatalPoint, f64)> = self
            .planets
            .iter()
            .map(|p| (NatalPoint::Planet(p.planet), p.longitude))
            .collect();
        if let Some(asc) = self.ascendant {
            points.push((NatalPoint::Ascendant, asc));
        }
        points
    }
}

impl From<Vec<PlanetPosition>> for NatalPositions {
    fn from(planets: Vec<PlanetPosition>) -> Self {
        Self {
            planets,
            ascendant: None,
        }
    }
}

/// One transit-to-natal aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMatch {
    pub transiting: Planet,
    pub natal: NatalPoint,
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Measured angular distance between the two longitudes (0-180)
    pub separation: f64,
    /// Deviation from the exact angle, 0..=max orb
    pub orb: f64,
    pub nature: AspectNature,
}

impl fmt::Display for AspectMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transiting {} {} natal {} (orb {:.2}°)",
            self.transiting, self.kind, self.natal, self.orb
        )
    }
}

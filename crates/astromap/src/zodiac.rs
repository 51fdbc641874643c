//! Zodiac signs and sign placements.
//!
//! Signs are 30° slices of the tropical ecliptic starting at 0° Aries.

use crate::angles::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign index 0-11, `floor(longitude / 30)`.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Self {
        ALL_SIGNS[(index % 12) as usize]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        Self::from_index(sign_index(longitude))
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get sign index (0-11) from longitude
pub fn sign_index(longitude: f64) -> u8 {
    let idx = (normalize_degrees(longitude) / 30.0).floor() as u8;
    idx.min(11)
}

/// Degree within the sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let d = normalize_degrees(longitude) - f64::from(sign_index(longitude)) * 30.0;
    d.clamp(0.0, 30.0 - f64::EPSILON * 32.0)
}

/// A longitude expressed as sign + degree, as used for the Big Three.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPlacement {
    pub sign: ZodiacSign,
    pub degree: f64,
    pub longitude: f64,
}

impl SignPlacement {
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        Self {
            sign: ZodiacSign::from_longitude(longitude),
            degree: degree_in_sign(longitude),
            longitude,
        }
    }
}

impl fmt::Display for SignPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.degree.floor();
        let minutes = ((self.degree - whole) * 60.0).floor();
        write!(f, "{}°{:02}′ {}", whole, minutes, self.sign)
    }
}

//! Built-in city gazetteer and life categories.

use crate::astrocartography::types::LineType;
use crate::ephemeris::types::Planet;
use crate::error::AstroError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Area of life a place ranking is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeCategory {
    Love,
    Career,
    Growth,
    Home,
}

pub const ALL_CATEGORIES: [LifeCategory; 4] = [
    LifeCategory::Love,
    LifeCategory::Career,
    LifeCategory::Growth,
    LifeCategory::Home,
];

impl LifeCategory {
    /// Bodies whose lines matter for this category.
    pub fn planets(self) -> &'static [Planet] {
        match self {
            LifeCategory::Love => &[Planet::Venus, Planet::Moon, Planet::Sun],
            LifeCategory::Career => &[Planet::Sun, Planet::Saturn, Planet::Jupiter, Planet::Mars],
            LifeCategory::Growth => &[
                Planet::Jupiter,
                Planet::Uranus,
                Planet::NorthNode,
                Planet::Mercury,
            ],
            LifeCategory::Home => &[Planet::Moon, Planet::Venus, Planet::Saturn],
        }
    }

    /// Angles that count extra for this category.
    pub fn preferred_lines(self) -> &'static [LineType] {
        match self {
            LifeCategory::Love => &[LineType::Dc, LineType::Ac],
            LifeCategory::Career => &[LineType::Mc],
            LifeCategory::Growth => &[LineType::Ac, LineType::Mc],
            LifeCategory::Home => &[LineType::Ic],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LifeCategory::Love => "love",
            LifeCategory::Career => "career",
            LifeCategory::Growth => "growth",
            LifeCategory::Home => "home",
        }
    }
}

impl fmt::Display for LifeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifeCategory {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AstroError::validation("category", format!("unknown life category {s:?}"))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    /// Categories the city is known for; matching ones get a small boost
    pub tags: Vec<LifeCategory>,
}

impl City {
    pub fn new(name: &str, country: &str, lat: f64, lng: f64, tags: &[LifeCategory]) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lng,
            tags: tags.to_vec(),
        }
    }

    pub fn has_tag(&self, category: LifeCategory) -> bool {
        self.tags.contains(&category)
    }
}

use self::LifeCategory::{Career as C, Growth as G, Home as H, Love as L};

lazy_static::lazy_static! {
    static ref WORLD_CITIES: Vec<City> = vec![
        City::new("New York", "United States", 40.7128, -74.0060, &[C, G]),
        City::new("Los Angeles", "United States", 34.0522, -118.2437, &[C, L]),
        City::new("San Francisco", "United States", 37.7749, -122.4194, &[C, G]),
        City::new("Chicago", "United States", 41.8781, -87.6298, &[C]),
        City::new("Miami", "United States", 25.7617, -80.1918, &[L]),
        City::new("Austin", "United States", 30.2672, -97.7431, &[G, H]),
        City::new("Seattle", "United States", 47.6062, -122.3321, &[G]),
        City::new("Honolulu", "United States", 21.3069, -157.8583, &[L, H]),
        City::new("Toronto", "Canada", 43.6532, -79.3832, &[C, H]),
        City::new("Vancouver", "Canada", 49.2827, -123.1207, &[H, G]),
        City::new("Montreal", "Canada", 45.5017, -73.5673, &[L]),
        City::new("Mexico City", "Mexico", 19.4326, -99.1332, &[G]),
        City::new("Havana", "Cuba", 23.1136, -82.3666, &[L]),
        City::new("Bogota", "Colombia", 4.7110, -74.0721, &[G]),
        City::new("Lima", "Peru", -12.0464, -77.0428, &[G]),
        City::new("Rio de Janeiro", "Brazil", -22.9068, -43.1729, &[L]),
        City::new("Sao Paulo", "Brazil", -23.5505, -46.6333, &[C]),
        City::new("Buenos Aires", "Argentina", -34.6037, -58.3816, &[L, H]),
        City::new("Santiago", "Chile", -33.4489, -70.6693, &[H]),
        City::new("London", "United Kingdom", 51.5074, -0.1278, &[C, G]),
        City::new("Edinburgh", "United Kingdom", 55.9533, -3.1883, &[H]),
        City::new("Dublin", "Ireland", 53.3498, -6.2603, &[H]),
        City::new("Paris", "France", 48.8566, 2.3522, &[L, C]),
        City::new("Nice", "France", 43.7102, 7.2620, &[L]),
        City::new("Barcelona", "Spain", 41.3851, 2.1734, &[L, G]),
        City::new("Madrid", "Spain", 40.4168, -3.7038, &[C]),
        City::new("Lisbon", "Portugal", 38.7223, -9.1393, &[H, G]),
        City::new("Amsterdam", "Netherlands", 52.3676, 4.9041, &[G]),
        City::new("Berlin", "Germany", 52.5200, 13.4050, &[G, C]),
        City::new("Munich", "Germany", 48.1351, 11.5820, &[H]),
        City::new("Zurich", "Switzerland", 47.3769, 8.5417, &[C, H]),
        City::new("Vienna", "Austria", 48.2082, 16.3738, &[H]),
        City::new("Prague", "Czech Republic", 50.0755, 14.4378, &[L]),
        City::new("Copenhagen", "Denmark", 55.6761, 12.5683, &[H]),
        City::new("Stockholm", "Sweden", 59.3293, 18.0686, &[C]),
        City::new("Oslo", "Norway", 59.9139, 10.7522, &[H]),
        City::new("Helsinki", "Finland", 60.1699, 24.9384, &[G]),
        City::new("Reykjavik", "Iceland", 64.1466, -21.9426, &[G]),
        City::new("Rome", "Italy", 41.9028, 12.4964, &[L]),
        City::new("Florence", "Italy", 43.7696, 11.2558, &[L, G]),
        City::new("Milan", "Italy", 45.4642, 9.1900, &[C]),
        City::new("Athens", "Greece", 37.9838, 23.7275, &[G]),
        City::new("Istanbul", "Turkey", 41.0082, 28.9784, &[C, L]),
        City::new("Moscow", "Russia", 55.7558, 37.6173, &[C]),
        City::new("Cairo", "Egypt", 30.0444, 31.2357, &[G]),
        City::new("Marrakesh", "Morocco", 31.6295, -7.9811, &[L]),
        City::new("Cape Town", "South Africa", -33.9249, 18.4241, &[L, H]),
        City::new("Nairobi", "Kenya", -1.2921, 36.8219, &[G]),
        City::new("Lagos", "Nigeria", 6.5244, 3.3792, &[C]),
        City::new("Dubai", "United Arab Emirates", 25.2048, 55.2708, &[C]),
        City::new("Tel Aviv", "Israel", 32.0853, 34.7818, &[C, G]),
        City::new("Mumbai", "India", 19.0760, 72.8777, &[C]),
        City::new("Delhi", "India", 28.7041, 77.1025, &[C]),
        City::new("Rishikesh", "India", 30.0869, 78.2676, &[G]),
        City::new("Bangkok", "Thailand", 13.7563, 100.5018, &[L]),
        City::new("Bali", "Indonesia", -8.3405, 115.0920, &[G, L]),
        City::new("Singapore", "Singapore", 1.3521, 103.8198, &[C]),
        City::new("Hong Kong", "China", 22.3193, 114.1694, &[C]),
        City::new("Shanghai", "China", 31.2304, 121.4737, &[C]),
        City::new("Beijing", "China", 39.9042, 116.4074, &[C]),
        City::new("Seoul", "South Korea", 37.5665, 126.9780, &[C, G]),
        City::new("Tokyo", "Japan", 35.6762, 139.6503, &[C]),
        City::new("Kyoto", "Japan", 35.0116, 135.7681, &[G, H]),
        City::new("Sydney", "Australia", -33.8688, 151.2093, &[L, C]),
        City::new("Melbourne", "Australia", -37.8136, 144.9631, &[H]),
        City::new("Auckland", "New Zealand", -36.8485, 174.7633, &[H]),
    ];
}

/// The built-in world city list.
pub fn world_cities() -> &'static [City] {
    &WORLD_CITIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_tagged_cities() {
        for category in ALL_CATEGORIES {
            assert!(world_cities().iter().any(|c| c.has_tag(category)), "{category}");
        }
    }

    #[test]
    fn coordinates_are_in_range() {
        for city in world_cities() {
            assert!(city.lat.abs() <= 90.0 && city.lng.abs() <= 180.0, "{}", city.name);
        }
    }

    #[test]
    fn parses_category_names() {
        assert_eq!("Career".parse::<LifeCategory>().unwrap(), LifeCategory::Career);
        assert!("money".parse::<LifeCategory>().is_err());
    }
}

use crate::angles::{cos_deg, sin_deg};
use crate::astrocartography::types::{AstrocartographyLine, GeoPoint, LineType};
use crate::ephemeris::types::Planet;
use crate::error::{AstroError, AstroResult};
use crate::places::gazetteer::{world_cities, City, LifeCategory, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean Earth radius (IUGG), km.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;
/// Distance at which a line's pull has halved, km.
const HALF_WEIGHT_DISTANCE_KM: f64 = 100.0;
const PREFERRED_LINE_FACTOR: f64 = 1.5;
const TAGGED_CITY_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceSettings {
    /// Places returned per category
    pub top_n: usize,
    /// Lines farther than this from a city are ignored
    pub influence_radius_km: f64,
}

impl Default for PlaceSettings {
    fn default() -> Self {
        Self {
            top_n: 3,
            influence_radius_km: 1000.0,
        }
    }
}

impl PlaceSettings {
    pub fn validate(&self) -> AstroResult<()> {
        if !(self.influence_radius_km.is_finite() && self.influence_radius_km > 0.0) {
            return Err(AstroError::validation(
                "influence_radius_km",
                format!("must be positive, got {}", self.influence_radius_km),
            ));
        }
        Ok(())
    }
}

/// One line's share of a place's relevance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineContribution {
    pub planet: Planet,
    pub line_type: LineType,
    pub distance_km: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPlace {
    pub city: City,
    pub category: LifeCategory,
    pub relevance: f64,
    /// Strongest first
    pub lines: Vec<LineContribution>,
}

/// Great-circle distance between two points, km.
///
/// Vincenty form of the central angle, stable for both tiny and antipodal separations.
pub fn great_circle_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (sin1, cos1) = (sin_deg(a.lat), cos_deg(a.lat));
    let (sin2, cos2) = (sin_deg(b.lat), cos_deg(b.lat));
    let dlng = b.lng - a.lng;
    let (sin_d, cos_d) = (sin_deg(dlng), cos_deg(dlng));

    let num = ((cos2 * sin_d).powi(2) + (cos1 * sin2 - sin1 * cos2 * cos_d).powi(2)).sqrt();
    let den = sin1 * sin2 + cos1 * cos2 * cos_d;
    num.atan2(den) * EARTH_RADIUS_KM
}

/// Unit vector on the sphere, x toward (0°, 0°) and z toward the north pole.
fn unit_vector(p: GeoPoint) -> [f64; 3] {
    let cos_lat = cos_deg(p.lat);
    [cos_lat * cos_deg(p.lng), cos_lat * sin_deg(p.lng), sin_deg(p.lat)]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Distance from `p` to the shorter great-circle arc between `a` and `b`, km.
pub fn distance_to_arc_km(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let to_ends = great_circle_km(p, a).min(great_circle_km(p, b));
    let (va, vb, vp) = (unit_vector(a), unit_vector(b), unit_vector(p));
    let normal = cross(va, vb);
    let norm = dot(normal, normal).sqrt();
    if norm < 1e-12 {
        return to_ends;
    }
    let normal = normal.map(|c| c / norm);

    // The foot of the perpendicular from p must fall between the end points.
    let within = dot(cross(va, vp), normal) >= 0.0 && dot(cross(vp, vb), normal) >= 0.0;
    if !within {
        return to_ends;
    }
    let cross_track = dot(vp, normal).abs().min(1.0).asin() * EARTH_RADIUS_KM;
    cross_track.min(to_ends)
}

/// Closest approach of a line to a point, km. `None` for a line without vertices.
///
/// Measured to the arcs between consecutive vertices, so a point lying on
/// the line between two samples is at distance zero.
pub fn nearest_distance_km(line: &AstrocartographyLine, point: GeoPoint) -> Option<f64> {
    line.segments
        .iter()
        .flat_map(|segment| {
            let arcs = segment
                .windows(2)
                .map(move |pair| distance_to_arc_km(point, pair[0], pair[1]));
            let lone = match segment.as_slice() {
                [only] => Some(great_circle_km(point, *only)),
                _ => None,
            };
            arcs.chain(lone)
        })
        .filter(|d| d.is_finite())
        .min_by(f64::total_cmp)
}

/// Rank the built-in cities for one category.
pub fn rank_places(
    lines: &[AstrocartographyLine],
    category: LifeCategory,
    settings: &PlaceSettings,
) -> Vec<PowerPlace> {
    rank_places_in(world_cities(), lines, category, settings)
}

/// Rank a caller-supplied gazetteer for one category.
///
/// Each line of a category planet passing within the influence radius adds
/// `weight / (1 + d / 100 km)`; weights are 1.5 for the category's preferred
/// angles, 1.0 otherwise, and the sum gets ×1.2 for cities tagged with the
/// category. Highest relevance first, ties by city name.
pub fn rank_places_in(
    gazetteer: &[City],
    lines: &[AstrocartographyLine],
    category: LifeCategory,
    settings: &PlaceSettings,
) -> Vec<PowerPlace> {
    let relevant: Vec<&AstrocartographyLine> = lines
        .iter()
        .filter(|l| category.planets().contains(&l.planet))
        .collect();

    let mut places: Vec<PowerPlace> = gazetteer
        .iter()
        .filter_map(|city| score_city(city, &relevant, category, settings))
        .collect();

    places.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| a.city.name.cmp(&b.city.name))
    });
    places.truncate(settings.top_n);
    places
}

/// Rankings for every category.
pub fn rank_all_categories(
    lines: &[AstrocartographyLine],
    settings: &PlaceSettings,
) -> BTreeMap<LifeCategory, Vec<PowerPlace>> {
    ALL_CATEGORIES
        .iter()
        .map(|&category| (category, rank_places(lines, category, settings)))
        .collect()
}

fn score_city(
    city: &City,
    lines: &[&AstrocartographyLine],
    category: LifeCategory,
    settings: &PlaceSettings,
) -> Option<PowerPlace> {
    let here = GeoPoint::new(city.lat, city.lng);
    let mut contributions: Vec<LineContribution> = lines
        .iter()
        .filter_map(|line| {
            let distance_km = nearest_distance_km(line, here)?;
            if distance_km > settings.influence_radius_km {
                return None;
            }
            let base = if category.preferred_lines().contains(&line.line_type) {
                PREFERRED_LINE_FACTOR
            } else {
                1.0
            };
            Some(LineContribution {
                planet: line.planet,
                line_type: line.line_type,
                distance_km,
                weight: base / (1.0 + distance_km / HALF_WEIGHT_DISTANCE_KM),
            })
        })
        .collect();
    if contributions.is_empty() {
        return None;
    }

    contributions.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let mut relevance: f64 = contributions.iter().map(|c| c.weight).sum();
    if city.has_tag(category) {
        relevance *= TAGGED_CITY_FACTOR;
    }
    Some(PowerPlace {
        city: city.clone(),
        category,
        relevance,
        lines: contributions,
    })
}

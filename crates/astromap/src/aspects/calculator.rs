use crate::angles::circular_distance;
use crate::aspects::types::{
    AspectKind, AspectMatch, AspectNature, NatalPoint, NatalPositions, ALL_ASPECTS,
};
use crate::ephemeris::types::Planet;
use crate::transits::TransitSnapshot;

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Every transit-to-natal aspect, tightest first.
    pub fn detect(&self, natal: &NatalPositions, snapshot: &TransitSnapshot) -> Vec<AspectMatch> {
        let natal_points = natal.points();
        let mut matches = Vec::new();

        for transit in &snapshot.positions {
            for &(point, natal_lon) in &natal_points {
                if let Some((kind, separation, orb)) =
                    self.calculate_aspect(transit.longitude, natal_lon)
                {
                    matches.push(AspectMatch {
                        transiting: transit.planet,
                        natal: point,
                        kind,
                        exact_angle: kind.angle(),
                        separation,
                        orb,
                        nature: aspect_nature(kind, transit.planet, point),
                    });
                }
            }
        }

        // Stable sort keeps transit/natal input order for equal orbs.
        matches.sort_by(|a, b| a.orb.total_cmp(&b.orb));
        matches
    }

    /// Nearest aspect between two longitudes, as (kind, separation, orb).
    ///
    /// The separation is the circular distance, so swapping the arguments
    /// gives the same result.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<(AspectKind, f64, f64)> {
        let separation = circular_distance(lon1, lon2);
        if !separation.is_finite() {
            return None;
        }

        let mut best: Option<(AspectKind, f64)> = None;
        for kind in ALL_ASPECTS {
            let orb = (separation - kind.angle()).abs();
            if orb > kind.max_orb() {
                continue;
            }
            match best {
                Some((_, best_orb)) if best_orb <= orb => {}
                _ => best = Some((kind, orb)),
            }
        }
        best.map(|(kind, orb)| (kind, separation, orb))
    }
}

/// Run the aspect calculator once. Every view that needs a day's aspects goes through here.
pub fn detect_aspects(natal: &NatalPositions, snapshot: &TransitSnapshot) -> Vec<AspectMatch> {
    AspectCalculator::new().detect(natal, snapshot)
}

/// Nature of an aspect between a transiting body and a natal point.
///
/// Conjunctions blend the two bodies: malefics make it minor-challenging,
/// benefics harmonious, anything else neutral. Both sides are checked so the
/// result does not depend on which body is transiting.
pub fn aspect_nature(kind: AspectKind, transiting: Planet, natal: NatalPoint) -> AspectNature {
    if kind != AspectKind::Conjunction {
        return kind.definition().nature;
    }
    let natal_planet = match natal {
        NatalPoint::Planet(p) => Some(p),
        NatalPoint::Ascendant => None,
    };
    let involves = |set: &[Planet]| {
        set.contains(&transiting) || natal_planet.map_or(false, |p| set.contains(&p))
    };
    if involves(&[Planet::Mars, Planet::Saturn, Planet::Pluto]) {
        AspectNature::MinorChallenging
    } else if involves(&[Planet::Venus, Planet::Jupiter]) {
        AspectNature::Harmonious
    } else {
        AspectNature::Neutral
    }
}

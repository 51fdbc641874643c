use crate::ephemeris::time::{ensure_supported, julian_day};
use crate::ephemeris::types::{Planet, PlanetPosition};
use crate::ephemeris::EphemerisCalculator;
use crate::error::AstroResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Positions of every body at one instant, in chart order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSnapshot {
    pub instant: DateTime<Utc>,
    pub positions: Vec<PlanetPosition>,
}

impl TransitSnapshot {
    pub fn at(instant: DateTime<Utc>) -> AstroResult<Self> {
        ensure_supported(instant)?;
        Ok(Self::at_unchecked(instant))
    }

    /// Caller has already range-checked `instant`.
    pub(crate) fn at_unchecked(instant: DateTime<Utc>) -> Self {
        let positions = EphemerisCalculator::new().positions_at_jd(julian_day(instant));
        Self { instant, positions }
    }

    pub fn position(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }
}

/// Sky right now.
pub fn current_transits() -> AstroResult<TransitSnapshot> {
    TransitSnapshot::at(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snapshot_holds_every_body() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let snap = TransitSnapshot::at(instant).unwrap();
        assert_eq!(snap.positions.len(), 12);
        assert!(snap.position(Planet::Pluto).is_some());
        assert_eq!(snap.instant, instant);
    }

    #[test]
    fn out_of_range_instant_is_rejected() {
        let instant = Utc.with_ymd_and_hms(2150, 1, 1, 0, 0, 0).unwrap();
        assert!(TransitSnapshot::at(instant).is_err());
    }
}

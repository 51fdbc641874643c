use crate::chart::houses::{ascendant, house_cusps};
use crate::chart::nodes::lunar_nodes;
use crate::chart::types::{BigThree, BirthData, BirthTime, ChartNote, FullChart, HouseSystem};
use crate::ephemeris::time::{
    ensure_supported, gmst_degrees, julian_day, local_sidereal_degrees, mean_obliquity,
};
use crate::ephemeris::types::{Planet, PlanetPosition};
use crate::ephemeris::EphemerisCalculator;
use crate::error::{AstroError, AstroResult};
use crate::zodiac::SignPlacement;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};

/// Builds natal charts with one house system for every chart it produces.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    ephemeris: EphemerisCalculator,
    house_system: HouseSystem,
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_house_system(house_system: HouseSystem) -> Self {
        Self {
            ephemeris: EphemerisCalculator::new(),
            house_system,
        }
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn build(&self, birth: &BirthData) -> AstroResult<FullChart> {
        let mut notes = Vec::new();

        let (instant, tz_notes) = birth_instant(birth)?;
        notes.extend(tz_notes);
        ensure_supported(instant)?;

        let (lat, lng, fallback) = birth.location.sanitized_coordinates();
        if fallback {
            warn!(
                "Invalid coordinates for {:?} ({}, {}); using (0, 0)",
                birth.location.name, birth.location.lat, birth.location.lng
            );
            notes.push(ChartNote::LocationFallback);
        }

        let jd = julian_day(instant);
        let positions = self.ephemeris.positions_at_jd(jd);
        let find = |planet: Planet| -> PlanetPosition {
            positions
                .iter()
                .copied()
                .find(|p| p.planet == planet)
                .unwrap_or_else(|| self.ephemeris.position_at_jd(planet, jd))
        };
        let sun = find(Planet::Sun);
        let moon = find(Planet::Moon);
        let nodes = lunar_nodes(find(Planet::NorthNode), find(Planet::SouthNode));

        let (rising, houses) = match birth.time {
            BirthTime::Known(_) => {
                let obliquity = mean_obliquity(jd);
                let ramc = local_sidereal_degrees(gmst_degrees(jd), lng);
                let asc = ascendant(ramc, obliquity, lat);
                let houses = house_cusps(self.house_system, ramc, obliquity, lat);
                if houses.is_none() {
                    warn!(
                        "{} houses undefined at latitude {:.2}; omitting cusps",
                        self.house_system, lat
                    );
                    notes.push(ChartNote::HousesUnavailable {
                        system: self.house_system,
                        latitude: lat,
                    });
                }
                (Some(SignPlacement::from_longitude(asc)), houses)
            }
            BirthTime::Unknown(window) => {
                debug!(
                    "Birth time unknown ({:?}); placing planets at {} local",
                    window,
                    window.representative_time()
                );
                notes.push(ChartNote::TimeUnknown { window });
                (None, None)
            }
        };

        Ok(FullChart {
            birth: birth.clone(),
            instant,
            julian_day: jd,
            big_three: BigThree {
                sun: SignPlacement::from_longitude(sun.longitude),
                moon: SignPlacement::from_longitude(moon.longitude),
                rising,
            },
            nodes,
            houses,
            time_known: birth.time.is_known(),
            notes,
            positions,
        })
    }
}

/// Build a chart with the default (Placidus) builder.
pub fn build_chart(birth: &BirthData) -> AstroResult<FullChart> {
    ChartBuilder::new().build(birth)
}

/// Resolve local birth date/time in the birth timezone to UTC.
///
/// DST is taken from the IANA zone, so the offset is the one in force on the birth date.
pub fn birth_instant(birth: &BirthData) -> AstroResult<(DateTime<Utc>, Vec<ChartNote>)> {
    let tz: Tz = birth.location.timezone.trim().parse().map_err(|e| {
        AstroError::validation(
            "timezone",
            format!("{:?} is not an IANA timezone ({e})", birth.location.timezone),
        )
    })?;
    let naive = NaiveDateTime::new(birth.date, birth.time.effective_time());
    resolve_local(tz, naive)
}

fn resolve_local(tz: Tz, naive: NaiveDateTime) -> AstroResult<(DateTime<Utc>, Vec<ChartNote>)> {
    let local = tz.from_local_datetime(&naive);
    if let Some(dt) = local.single() {
        return Ok((dt.with_timezone(&Utc), Vec::new()));
    }
    if let Some(dt) = local.earliest() {
        return Ok((dt.with_timezone(&Utc), vec![ChartNote::AmbiguousLocalTime]));
    }
    // Nonexistent wall-clock time: move forward by the length of the gap.
    let before = tz.offset_from_utc_datetime(&(naive - Duration::hours(12))).fix();
    let after = tz.offset_from_utc_datetime(&(naive + Duration::hours(12))).fix();
    let gap = Duration::seconds(i64::from(after.local_minus_utc() - before.local_minus_utc()));
    if gap > Duration::zero() {
        if let Some(dt) = tz.from_local_datetime(&(naive + gap)).earliest() {
            let minutes = gap.num_minutes();
            warn!("Local time {naive} falls in a DST gap in {tz:?}; shifted by {minutes} min");
            return Ok((dt.with_timezone(&Utc), vec![ChartNote::DstGapShifted { minutes }]));
        }
    }
    Err(AstroError::validation("time", format!("{naive} does not exist in {tz:?}")))
}

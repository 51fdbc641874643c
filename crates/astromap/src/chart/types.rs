use crate::angles::normalize_degrees;
use crate::aspects::types::NatalPositions;
use crate::ephemeris::types::{Planet, PlanetPosition};
use crate::error::{AstroError, AstroResult};
use crate::zodiac::SignPlacement;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Part of the day a person remembers being born in when the clock time is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Morning,
    Afternoon,
    Evening,
    Unspecified,
}

impl TimeWindow {
    /// Local wall-clock time used for planet positions when the real time is unknown.
    pub fn representative_time(self) -> NaiveTime {
        let hour = match self {
            TimeWindow::Morning => 9,
            TimeWindow::Afternoon => 15,
            TimeWindow::Evening => 21,
            TimeWindow::Unspecified => 12,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }
}

impl FromStr for TimeWindow {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeWindow::Morning),
            "afternoon" => Ok(TimeWindow::Afternoon),
            "evening" | "night" => Ok(TimeWindow::Evening),
            "" | "unspecified" | "unknown" => Ok(TimeWindow::Unspecified),
            other => Err(AstroError::validation(
                "time window",
                format!("expected morning, afternoon, evening or unspecified, got {other:?}"),
            )),
        }
    }
}

/// Birth time: either a wall-clock time or only a rough window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum BirthTime {
    Known(NaiveTime),
    Unknown(TimeWindow),
}

impl BirthTime {
    pub fn is_known(&self) -> bool {
        matches!(self, BirthTime::Known(_))
    }

    /// Wall-clock time used to place the planets.
    pub fn effective_time(&self) -> NaiveTime {
        match self {
            BirthTime::Known(t) => *t,
            BirthTime::Unknown(window) => window.representative_time(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// IANA timezone name, e.g. "Europe/Paris"
    pub timezone: String,
}

impl BirthLocation {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, timezone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            timezone: timezone.into(),
        }
    }

    /// Coordinates usable for computation: anything non-finite or out of range becomes (0, 0).
    ///
    /// The flag is true when the fallback was applied.
    pub fn sanitized_coordinates(&self) -> (f64, f64, bool) {
        let valid = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if valid {
            (self.lat, self.lng, false)
        } else {
            (0.0, 0.0, true)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthData {
    pub date: NaiveDate,
    pub time: BirthTime,
    pub location: BirthLocation,
}

impl BirthData {
    pub fn new(date: NaiveDate, time: BirthTime, location: BirthLocation) -> Self {
        Self { date, time, location }
    }

    /// Build from request strings: `YYYY-MM-DD`, optional `HH:MM`, optional window.
    ///
    /// A present `time` wins over `window`.
    pub fn parse(
        date: &str,
        time: Option<&str>,
        window: Option<&str>,
        location: BirthLocation,
    ) -> AstroResult<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            AstroError::validation("date", format!("{date:?} is not YYYY-MM-DD ({e})"))
        })?;
        let time = match time.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => BirthTime::Known(parse_clock_time(t)?),
            None => BirthTime::Unknown(window.unwrap_or("unspecified").parse()?),
        };
        Ok(Self { date, time, location })
    }
}

fn parse_clock_time(t: &str) -> AstroResult<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .map_err(|e| AstroError::validation("time", format!("{t:?} is not HH:MM ({e})")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Equal,
    WholeSign,
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
        })
    }
}

impl FromStr for HouseSystem {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "placidus" => Ok(HouseSystem::Placidus),
            "equal" => Ok(HouseSystem::Equal),
            "whole_sign" | "whole-sign" | "wholesign" => Ok(HouseSystem::WholeSign),
            other => Err(AstroError::validation(
                "house system",
                format!("unknown house system {other:?}; valid: placidus, equal, whole_sign"),
            )),
        }
    }
}

/// Twelve house cusps of one system plus the four angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseCusps {
    pub system: HouseSystem,
    /// Cusp longitudes, house 1 first
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

impl HouseCusps {
    /// House number (1-12) containing a longitude.
    pub fn house_of(&self, longitude: f64) -> u8 {
        for i in 0..12 {
            let start = self.cusps[i];
            let end = self.cusps[(i + 1) % 12];
            let span = normalize_degrees(end - start);
            let offset = normalize_degrees(longitude - start);
            if offset < span {
                return (i + 1) as u8;
            }
        }
        1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigThree {
    pub sun: SignPlacement,
    pub moon: SignPlacement,
    /// Absent when the birth time is unknown.
    pub rising: Option<SignPlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTheme {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarNodes {
    pub north: PlanetPosition,
    pub south: PlanetPosition,
    pub theme: NodeTheme,
}

/// Reduced-fidelity conditions recorded while building a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartNote {
    /// Positions use the window's representative time; rising sign and houses are omitted.
    TimeUnknown { window: TimeWindow },
    /// Coordinates were invalid and (0, 0) was used.
    LocationFallback,
    /// Local time fell in a daylight-saving gap and was moved forward.
    DstGapShifted { minutes: i64 },
    /// Local time occurred twice; the earlier instant was used.
    AmbiguousLocalTime,
    /// The house system has no solution at this latitude.
    HousesUnavailable { system: HouseSystem, latitude: f64 },
}

/// Natal chart. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullChart {
    pub birth: BirthData,
    pub instant: DateTime<Utc>,
    pub julian_day: f64,
    pub positions: Vec<PlanetPosition>,
    pub big_three: BigThree,
    pub nodes: LunarNodes,
    pub houses: Option<HouseCusps>,
    pub time_known: bool,
    pub notes: Vec<ChartNote>,
}

impl FullChart {
    pub fn position(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }

    /// Natal points for aspect detection: every body plus the Ascendant when known.
    pub fn natal_positions(&self) -> NatalPositions {
        NatalPositions {
            planets: self.positions.clone(),
            ascendant: self.big_three.rising.map(|r| r.longitude),
        }
    }
}

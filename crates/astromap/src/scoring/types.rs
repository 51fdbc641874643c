use crate::aspects::types::AspectMatch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a day is a power day.
pub const POWER_DAY_THRESHOLD: u8 = 70;
/// Score at or below which a day is a rest day.
pub const REST_DAY_THRESHOLD: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Power,
    Rest,
    Neutral,
}

impl DayType {
    /// Classification used by every view.
    pub fn classify(score: u8) -> Self {
        if score >= POWER_DAY_THRESHOLD {
            DayType::Power
        } else if score <= REST_DAY_THRESHOLD {
            DayType::Rest
        } else {
            DayType::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Power => "power",
            DayType::Rest => "rest",
            DayType::Neutral => "neutral",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    pub date: NaiveDate,
    /// 0-100
    pub score: u8,
    pub day_type: DayType,
    pub description: String,
    /// Aspects that drove the score, tightest first
    pub top_aspects: Vec<AspectMatch>,
}

/// One month of daily scores reduced to a single figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOutlook {
    pub year: i32,
    pub month: u32,
    /// Mean of the month's daily scores, rounded
    pub score: u8,
    pub day_type: DayType,
    pub power_days: usize,
    pub rest_days: usize,
    pub best_day: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDays {
    /// Highest scores first
    pub best: Vec<DailyScore>,
    /// Lowest scores first
    pub worst: Vec<DailyScore>,
}

pub mod calculator;
pub mod calendar;
pub mod types;

pub use calculator::{
    aspect_points, parse_iso_date, score_aspects, score_day, BASE_SCORE, PERSONAL_POINT_FACTOR,
};
pub use calendar::{calendar_month, monthly_outlook, rank_days, weekly_forecast, DAYS_PER_WEEK};
pub use types::{
    DailyScore, DayType, MonthOutlook, RankedDays, POWER_DAY_THRESHOLD, REST_DAY_THRESHOLD,
};

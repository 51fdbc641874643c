//! Natal charts, astrocartography lines, transits and day scoring.

pub mod angles;
pub mod aspects;
pub mod astrocartography;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod places;
pub mod scoring;
pub mod transits;
pub mod zodiac;

pub use aspects::{
    detect_aspects, AspectKind, AspectMatch, AspectNature, NatalPoint, NatalPositions,
};
pub use astrocartography::{
    project_lines, AstrocartographyLine, GeoPoint, LineProjection, LineProjector, LineType,
    ProjectionSettings,
};
pub use chart::{
    build_chart, BirthData, BirthLocation, BirthTime, ChartBuilder, FullChart, HouseSystem,
    TimeWindow,
};
pub use ephemeris::{EphemerisCalculator, Planet, PlanetPosition};
pub use error::{AstroError, AstroResult};
pub use places::{rank_all_categories, rank_places, City, LifeCategory, PlaceSettings, PowerPlace};
pub use scoring::{
    calendar_month, monthly_outlook, rank_days, score_day, weekly_forecast, DailyScore, DayType,
};
pub use transits::{current_transits, year_cache, TransitCache, TransitEngine, TransitSnapshot};
pub use zodiac::{SignPlacement, ZodiacSign};

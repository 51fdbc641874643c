pub mod calculator;
pub(crate) mod elements;
pub(crate) mod moon;
pub mod time;
pub mod types;

pub use calculator::EphemerisCalculator;
pub use time::{
    ecliptic_to_equatorial, gmst_degrees, horizon_hour_angle, julian_day, mean_obliquity,
    HorizonCrossing,
};
pub use types::{EquatorialPosition, Planet, PlanetPosition, ALL_BODIES};

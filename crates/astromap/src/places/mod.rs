//! Power places: cities ranked by how close relevant natal lines pass.

pub mod gazetteer;
pub mod resolver;

pub use gazetteer::{world_cities, City, LifeCategory, ALL_CATEGORIES};
pub use resolver::{
    distance_to_arc_km, great_circle_km, nearest_distance_km, rank_all_categories, rank_places,
    rank_places_in, LineContribution, PlaceSettings, PowerPlace, EARTH_RADIUS_KM,
};

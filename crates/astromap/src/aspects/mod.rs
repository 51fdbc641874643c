pub mod calculator;
pub mod types;

pub use calculator::{aspect_nature, detect_aspects, AspectCalculator};
pub use types::{
    AspectDefinition, AspectKind, AspectMatch, AspectNature, NatalPoint, NatalPositions,
    ALL_ASPECTS,
};

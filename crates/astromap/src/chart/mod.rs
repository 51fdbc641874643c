pub mod builder;
pub mod houses;
pub mod nodes;
pub mod types;

pub use builder::{birth_instant, build_chart, ChartBuilder};
pub use houses::{ascendant, house_cusps, midheaven};
pub use nodes::node_theme;
pub use types::{
    BigThree, BirthData, BirthLocation, BirthTime, ChartNote, FullChart, HouseCusps, HouseSystem,
    LunarNodes, NodeTheme, TimeWindow,
};

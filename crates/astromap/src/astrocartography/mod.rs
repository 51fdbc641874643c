//! Astrocartography: where on Earth each natal body was angular.

pub mod projector;
pub mod sampler;
pub mod types;

pub use projector::{project_lines, LineProjector};
pub use sampler::{collect_segments, culmination_longitude, LineSampler};
pub use types::{
    AstrocartographyLine, DiagnosticKind, GeoPoint, LineProjection, LineType, ProjectionDiagnostic,
    ProjectionSettings, ALL_LINE_TYPES,
};

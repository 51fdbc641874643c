use crate::ephemeris::types::Planet;
use crate::error::{AstroError, AstroResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle a planet occupies along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineType {
    /// Culminating (upper meridian)
    Mc,
    /// Anti-culminating (lower meridian)
    Ic,
    /// Rising
    Ac,
    /// Setting
    Dc,
}

pub const ALL_LINE_TYPES: [LineType; 4] = [LineType::Mc, LineType::Ic, LineType::Ac, LineType::Dc];

impl LineType {
    pub fn code(self) -> &'static str {
        match self {
            LineType::Mc => "MC",
            LineType::Ic => "IC",
            LineType::Ac => "AC",
            LineType::Dc => "DC",
        }
    }

    /// Meridian lines run north-south at a fixed longitude.
    pub fn is_meridian(self) -> bool {
        matches!(self, LineType::Mc | LineType::Ic)
    }

    /// Line types drawn for a body. Nodes have no rising or setting lines.
    pub fn for_planet(planet: Planet) -> &'static [LineType] {
        if planet.is_node() {
            &ALL_LINE_TYPES[..2]
        } else {
            &ALL_LINE_TYPES
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A point on the Earth's surface, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One planet/angle line as contiguous runs of vertices.
///
/// A new segment starts wherever a sample had no real solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrocartographyLine {
    pub planet: Planet,
    pub line_type: LineType,
    pub segments: Vec<Vec<GeoPoint>>,
    /// Samples that produced no vertex
    pub gap_count: usize,
}

impl AstrocartographyLine {
    /// All vertices, segment by segment.
    pub fn vertices(&self) -> impl Iterator<Item = &GeoPoint> + '_ {
        self.segments.iter().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    pub fn has_gaps(&self) -> bool {
        self.gap_count > 0
    }
}

/// Why a line was left out of a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Right ascension or declination was not a finite number
    NonFiniteCoordinates,
    /// No sample along the line had a real solution
    NoRealSolution { samples: usize },
}

/// A line omitted from a projection, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDiagnostic {
    pub planet: Planet,
    pub line_type: LineType,
    pub kind: DiagnosticKind,
}

impl fmt::Display for ProjectionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::NonFiniteCoordinates => {
                write!(f, "{} {}: coordinates not finite", self.planet, self.line_type)
            }
            DiagnosticKind::NoRealSolution { samples } => write!(
                f,
                "{} {}: no real solution in {} samples",
                self.planet, self.line_type, samples
            ),
        }
    }
}

/// Lines that could be drawn plus diagnostics for those that could not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProjection {
    pub lines: Vec<AstrocartographyLine>,
    pub diagnostics: Vec<ProjectionDiagnostic>,
}

impl LineProjection {
    pub fn line(&self, planet: Planet, line_type: LineType) -> Option<&AstrocartographyLine> {
        self.lines
            .iter()
            .find(|l| l.planet == planet && l.line_type == line_type)
    }

    pub fn lines_for(&self, planet: Planet) -> impl Iterator<Item = &AstrocartographyLine> + '_ {
        self.lines.iter().filter(move |l| l.planet == planet)
    }

    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Sampling settings for line projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Sample spacing in degrees (longitude for AC/DC, latitude for MC/IC)
    pub step_deg: f64,
    /// Lines are not drawn poleward of this latitude
    pub max_latitude: f64,
    /// Project lines on the rayon thread pool
    pub parallel: bool,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            step_deg: 1.0,
            max_latitude: 85.0,
            parallel: true,
        }
    }
}

impl ProjectionSettings {
    pub fn validate(&self) -> AstroResult<()> {
        if !(self.step_deg.is_finite() && self.step_deg > 0.0 && self.step_deg <= 90.0) {
            return Err(AstroError::validation(
                "step_deg",
                format!("must be in (0, 90], got {}", self.step_deg),
            ));
        }
        if !(self.max_latitude.is_finite() && self.max_latitude > 0.0 && self.max_latitude < 90.0) {
            return Err(AstroError::validation(
                "max_latitude",
                format!("must be in (0, 90), got {}", self.max_latitude),
            ));
        }
        Ok(())
    }
}

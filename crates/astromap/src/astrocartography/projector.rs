use crate::astrocartography::sampler::{collect_segments, LineSampler};
use crate::astrocartography::types::{
    AstrocartographyLine, DiagnosticKind, LineProjection, LineType, ProjectionDiagnostic,
    ProjectionSettings,
};
use crate::chart::types::FullChart;
use crate::ephemeris::time::{ecliptic_to_equatorial, gmst_degrees, mean_obliquity};
use crate::ephemeris::types::{EquatorialPosition, Planet, PlanetPosition};
use crate::error::AstroResult;
use log::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Projects natal positions onto the globe as MC/IC/AC/DC lines.
#[derive(Debug, Clone, Default)]
pub struct LineProjector {
    settings: ProjectionSettings,
}

/// One (planet, line type) unit of work.
#[derive(Debug, Clone, Copy)]
struct LineJob {
    planet: Planet,
    line_type: LineType,
    body: EquatorialPosition,
}

enum LineOutcome {
    Drawn(AstrocartographyLine),
    Omitted(ProjectionDiagnostic),
}

impl LineProjector {
    pub fn new(settings: ProjectionSettings) -> AstroResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Lines for every body in the chart.
    pub fn project(&self, chart: &FullChart) -> LineProjection {
        self.project_positions(chart.julian_day, &chart.positions)
    }

    /// Lines for arbitrary positions observed at `julian_day`.
    ///
    /// Output order follows `positions`, then MC, IC, AC, DC, whatever
    /// thread pool the work ran on.
    pub fn project_positions(
        &self,
        julian_day: f64,
        positions: &[PlanetPosition],
    ) -> LineProjection {
        let gmst = gmst_degrees(julian_day);
        let obliquity = mean_obliquity(julian_day);

        let jobs: Vec<LineJob> = positions
            .iter()
            .flat_map(|pos| {
                let body = ecliptic_to_equatorial(pos.longitude, pos.latitude, obliquity);
                LineType::for_planet(pos.planet).iter().map(move |&line_type| LineJob {
                    planet: pos.planet,
                    line_type,
                    body,
                })
            })
            .collect();

        let outcomes = self.run(&jobs, gmst);

        let mut projection = LineProjection::default();
        for outcome in outcomes {
            match outcome {
                LineOutcome::Drawn(line) => projection.lines.push(line),
                LineOutcome::Omitted(diagnostic) => {
                    warn!("Omitting line {}", diagnostic);
                    projection.diagnostics.push(diagnostic);
                }
            }
        }
        debug!(
            "Projected {} lines ({} omitted) at JD {:.5}",
            projection.lines.len(),
            projection.diagnostics.len(),
            julian_day
        );
        projection
    }

    #[cfg(feature = "parallel")]
    fn run(&self, jobs: &[LineJob], gmst: f64) -> Vec<LineOutcome> {
        if self.settings.parallel {
            // Indexed collect keeps input order.
            jobs.par_iter().map(|job| self.project_line(job, gmst)).collect()
        } else {
            jobs.iter().map(|job| self.project_line(job, gmst)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, jobs: &[LineJob], gmst: f64) -> Vec<LineOutcome> {
        jobs.iter().map(|job| self.project_line(job, gmst)).collect()
    }

    fn project_line(&self, job: &LineJob, gmst: f64) -> LineOutcome {
        let omitted = |kind| {
            LineOutcome::Omitted(ProjectionDiagnostic {
                planet: job.planet,
                line_type: job.line_type,
                kind,
            })
        };

        if !(job.body.right_ascension.is_finite() && job.body.declination.is_finite()) {
            return omitted(DiagnosticKind::NonFiniteCoordinates);
        }

        let sampler = LineSampler::new(job.line_type, job.body, gmst, &self.settings);
        let samples = sampler.sample_count();
        let (segments, gap_count) = collect_segments(sampler);
        if segments.is_empty() {
            return omitted(DiagnosticKind::NoRealSolution { samples });
        }
        if gap_count > 0 {
            debug!(
                "{} {}: {} of {} samples without a solution",
                job.planet, job.line_type, gap_count, samples
            );
        }
        LineOutcome::Drawn(AstrocartographyLine {
            planet: job.planet,
            line_type: job.line_type,
            segments,
            gap_count,
        })
    }
}

/// Project a chart with the default settings.
pub fn project_lines(chart: &FullChart) -> LineProjection {
    LineProjector::default().project(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::ALL_BODIES;

    fn positions() -> Vec<PlanetPosition> {
        ALL_BODIES
            .iter()
            .enumerate()
            .map(|(i, &planet)| PlanetPosition::new(planet, 17.0 + 29.0 * i as f64, 1.0, 0.5))
            .collect()
    }

    #[test]
    fn nodes_get_meridian_lines_only() {
        let projection = LineProjector::default().project_positions(2_451_545.0, &positions());
        assert!(projection.line(Planet::NorthNode, LineType::Mc).is_some());
        assert!(projection.line(Planet::NorthNode, LineType::Ac).is_none());
        assert!(projection.lines.len() + projection.diagnostics.len() <= 44);
    }

    #[test]
    fn parallel_and_serial_agree() {
        let parallel = LineProjector::default().project_positions(2_460_000.25, &positions());
        let serial = LineProjector::new(ProjectionSettings {
            parallel: false,
            ..ProjectionSettings::default()
        })
        .unwrap()
        .project_positions(2_460_000.25, &positions());
        assert_eq!(parallel, serial);
    }

    #[test]
    fn non_finite_body_is_reported_not_fatal() {
        let mut bad = positions();
        bad[3].longitude = f64::NAN;
        let projection = LineProjector::default().project_positions(2_451_545.0, &bad);
        assert!(projection
            .diagnostics
            .iter()
            .any(|d| d.planet == Planet::Venus && d.kind == DiagnosticKind::NonFiniteCoordinates));
        assert!(projection.line(Planet::Sun, LineType::Mc).is_some());
    }

    #[test]
    fn rejects_bad_settings() {
        let settings = ProjectionSettings {
            step_deg: 0.0,
            ..ProjectionSettings::default()
        };
        assert!(LineProjector::new(settings).is_err());
    }
}

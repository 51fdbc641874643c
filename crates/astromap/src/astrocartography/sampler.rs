//! Lazy vertex samplers for the four angular lines.
//!
//! MC/IC lines are drawn as meridians: a body culminates at one geographic
//! longitude regardless of latitude, so those lines are sampled over
//! latitude at a fixed longitude.
//!
//! AC/DC lines together trace the horizon circle: every point 90° of arc
//! from the sub-body point `(δ, α - GMST)`. Each half is sampled at an even
//! arc step, by bearing `θ` from the sub-body point, starting at the
//! circle's northern turning point:
//!
//! ```text
//! sin φ = cos δ · cos θ
//! H = atan2(sin θ · cos δ, -sin δ · sin φ)   DC: λ = α - GMST + H
//!                                            AC: λ = α - GMST - H
//! ```
//!
//! Vertices are evenly spaced along the line whatever the declination, so a
//! line that runs almost north-south is as dense as one that runs east-west.
//! The circle never reaches latitudes where the body is circumpolar
//! (`|tan φ · tan δ| > 1`); samples beyond `max_latitude` yield `None` so the
//! caller sees a gap instead of a fabricated vertex.

use crate::angles::{asin_deg, atan2_deg, cos_deg, normalize_signed, sin_deg};
use crate::astrocartography::types::{GeoPoint, LineType, ProjectionSettings};
use crate::ephemeris::types::EquatorialPosition;

/// Bearing range covered by one half of the horizon circle.
const HALF_CIRCLE_DEG: f64 = 180.0;

/// Geographic longitude where a body with right ascension `ra` culminates.
pub fn culmination_longitude(ra: f64, gmst: f64) -> f64 {
    normalize_signed(ra - gmst)
}

/// Restartable sequence of optional vertices along one line.
///
/// Clone it to walk the same line again from wherever the clone was taken.
#[derive(Debug, Clone)]
pub struct LineSampler {
    line_type: LineType,
    right_ascension: f64,
    declination: f64,
    gmst: f64,
    start: f64,
    end: f64,
    step: f64,
    max_latitude: f64,
    next: usize,
    len: usize,
}

impl LineSampler {
    pub fn new(
        line_type: LineType,
        body: EquatorialPosition,
        gmst: f64,
        settings: &ProjectionSettings,
    ) -> Self {
        let (start, end) = if line_type.is_meridian() {
            (-settings.max_latitude, settings.max_latitude)
        } else {
            (0.0, HALF_CIRCLE_DEG)
        };
        let len = ((end - start) / settings.step_deg).ceil() as usize + 1;
        Self {
            line_type,
            right_ascension: body.right_ascension,
            declination: body.declination,
            gmst,
            start,
            end,
            step: settings.step_deg,
            max_latitude: settings.max_latitude,
            next: 0,
            len,
        }
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Total number of samples, vertices and gaps alike.
    pub fn sample_count(&self) -> usize {
        self.len
    }

    fn coordinate(&self, index: usize) -> f64 {
        (self.start + index as f64 * self.step).min(self.end)
    }

    fn sample(&self, index: usize) -> Option<GeoPoint> {
        let at = self.coordinate(index);
        let point = match self.line_type {
            LineType::Mc => Some(GeoPoint::new(
                at,
                culmination_longitude(self.right_ascension, self.gmst),
            )),
            LineType::Ic => Some(GeoPoint::new(
                at,
                culmination_longitude(self.right_ascension + 180.0, self.gmst),
            )),
            LineType::Ac | LineType::Dc => self.horizon_point(at),
        };
        point.filter(GeoPoint::is_finite)
    }

    /// Point on the horizon circle at `bearing` from its northern turning point.
    fn horizon_point(&self, bearing: f64) -> Option<GeoPoint> {
        let (sin_dec, cos_dec) = (sin_deg(self.declination), cos_deg(self.declination));
        let lat = asin_deg(cos_dec * cos_deg(bearing));
        if lat.abs() > self.max_latitude {
            return None;
        }
        // Hour angle in [0, 180]: west of the meridian, where the body sets.
        let setting = atan2_deg(sin_deg(bearing) * cos_dec, -sin_dec * sin_deg(lat));
        let hour_angle = match self.line_type {
            LineType::Ac => -setting,
            _ => setting,
        };
        Some(GeoPoint::new(
            lat,
            normalize_signed(self.right_ascension - self.gmst + hour_angle),
        ))
    }
}

impl Iterator for LineSampler {
    type Item = Option<GeoPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let item = self.sample(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineSampler {}

/// Split a vertex stream into contiguous segments; returns (segments, gap count).
///
/// Stepping across the antimeridian also starts a new segment. Both pieces
/// are extended to ±180° at the interpolated crossing latitude.
pub fn collect_segments<I>(samples: I) -> (Vec<Vec<GeoPoint>>, usize)
where
    I: IntoIterator<Item = Option<GeoPoint>>,
{
    let mut segments = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();
    let mut gaps = 0;
    for sample in samples {
        match sample {
            Some(point) => {
                if let Some(&last) = current.last() {
                    if (point.lng - last.lng).abs() > 180.0 {
                        let (close, open) = antimeridian_crossing(last, point);
                        current.push(close);
                        segments.push(std::mem::replace(&mut current, vec![open]));
                    }
                }
                current.push(point);
            }
            None => {
                gaps += 1;
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    (segments, gaps)
}

/// Where the step from `a` to `b` meets ±180°, as seen from each side.
fn antimeridian_crossing(a: GeoPoint, b: GeoPoint) -> (GeoPoint, GeoPoint) {
    let edge = if a.lng > 0.0 { 180.0 } else { -180.0 };
    let b_lng = if a.lng > b.lng { b.lng + 360.0 } else { b.lng - 360.0 };
    let t = (edge - a.lng) / (b_lng - a.lng);
    let lat = a.lat + t * (b.lat - a.lat);
    (GeoPoint::new(lat, edge), GeoPoint::new(lat, -edge))
}

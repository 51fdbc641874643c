//! Degree-based angle helpers shared by every component.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Normalize a longitude to [-180, 180) degrees.
pub fn normalize_signed(deg: f64) -> f64 {
    let r = normalize_degrees(deg);
    if r >= 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Shortest angular distance between two ecliptic longitudes, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// asin returning degrees; the argument is clamped to [-1, 1].
pub fn asin_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

/// atan2 returning degrees.
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-30.0) - 330.0).abs() < 1e-12);
        assert!((normalize_degrees(725.5) - 5.5).abs() < 1e-12);
        let tiny = normalize_degrees(-1e-18);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn signed_longitude_range() {
        assert!((normalize_signed(190.0) + 170.0).abs() < 1e-12);
        assert_eq!(normalize_signed(180.0), -180.0);
        assert!((normalize_signed(-10.0) + 10.0).abs() < 1e-12);
    }

    #[test]
    fn circular_distance_across_wrap() {
        assert!((circular_distance(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((circular_distance(10.0, 190.0) - 180.0).abs() < 1e-12);
        assert_eq!(circular_distance(44.38, 44.38), 0.0);
    }
}

//! Polyline profile helpers for building layered cross-sections.

use crate::error::GeometryError;

use super::intersect::TOLERANCE;

/// Levels the tail of a profile: the last point takes the elevation of
/// the point before it. Profiles shorter than 2 points pass through
/// unchanged.
#[must_use]
pub fn level_tail(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut leveled = points.to_vec();
    if let [.., anchor, tail] = leveled.as_mut_slice() {
        tail[1] = anchor[1];
    }
    leveled
}

/// Linear interpolation of x on the slope segment `a → b` at elevation
/// `y`.
///
/// # Errors
///
/// A horizontal segment has no unique x for any elevation
/// ([`GeometryError::InterpolationSingularity`]); an elevation outside the
/// segment's span is [`GeometryError::OutsideSlope`].
pub fn interpolate_on_slope(a: [f64; 2], b: [f64; 2], y: f64) -> Result<f64, GeometryError> {
    let rise = b[1] - a[1];
    if rise.abs() < TOLERANCE {
        return Err(GeometryError::InterpolationSingularity);
    }
    let (lo, hi) = if a[1] < b[1] { (a[1], b[1]) } else { (b[1], a[1]) };
    if y < lo - TOLERANCE || y > hi + TOLERANCE {
        return Err(GeometryError::OutsideSlope { y, lo, hi });
    }
    Ok(a[0] + (y - a[1]) * (b[0] - a[0]) / rise)
}

/// Inserts a point at elevation `y` on the segment between
/// `points[segment]` and `points[segment + 1]`, returning the extended
/// profile.
pub fn insert_point_at_elevation(
    points: &[[f64; 2]],
    segment: usize,
    y: f64,
) -> Result<Vec<[f64; 2]>, GeometryError> {
    let segments = points.len().saturating_sub(1);
    if segment >= segments {
        return Err(GeometryError::SegmentOutOfRange { index: segment, segments });
    }
    let x = interpolate_on_slope(points[segment], points[segment + 1], y)?;

    let mut extended = Vec::with_capacity(points.len() + 1);
    extended.extend_from_slice(&points[..=segment]);
    extended.push([x, y]);
    extended.extend_from_slice(&points[segment + 1..]);
    Ok(extended)
}

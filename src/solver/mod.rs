//! Derived-geometry algorithms over polyline profiles.
//!
//! # Module Structure
//! - `intersect` - 2D segment/line intersection primitives
//! - `offset` - raw mitred parallel offset of an open polyline
//! - `profile` - slope interpolation and profile-shaping helpers
//!
//! The solver is stateless: it consumes coordinate slices and returns new
//! coordinate vectors, leaving model bookkeeping to the caller.

pub mod intersect;
pub mod offset;
pub mod profile;

pub use offset::offset_polyline;

use crate::error::GeometryError;

use intersect::{segment_intersection, SegmentCrossing, TOLERANCE};

/// Points closer than this are treated as one trim crossing. Consecutive
/// offset segments share a vertex, so a crossing near a joint is reported
/// by both.
const CROSSING_MERGE_EPS: f64 = 1e-9;

/// Computes a trimmed inward offset of an open polyline — a cover layer
/// running parallel to a surface profile at a fixed perpendicular depth.
///
/// The polyline is offset by `thickness` to the right of its direction of
/// travel, then trimmed against the segment joining the original first and
/// last points: the trim crossings (sorted by ascending x, keeping the two
/// extremes) replace the offset endpoints while the interior offset
/// vertices are kept. A single crossing is used for both ends. For a
/// straight profile the offset is parallel to its own trim chord and never
/// crosses it; the trim then degenerates to the chord endpoints dropped
/// perpendicular onto the offset, which keeps the layer's horizontal
/// extent equal to the profile's.
///
/// # Errors
///
/// [`GeometryError::NoIntersection`] when the offset genuinely never
/// crosses the trim segment (the thickness is incompatible with the
/// shape), [`GeometryError::UnexpectedIntersection`] when offset and trim
/// overlap along a segment, and the input errors of [`offset_polyline`].
pub fn cover_layer(
    points: &[[f64; 2]],
    thickness: f64,
) -> Result<Vec<[f64; 2]>, GeometryError> {
    let offset = offset_polyline(points, thickness)?;
    let trim_start = points[0];
    let trim_end = points[points.len() - 1];

    let mut crossings: Vec<[f64; 2]> = Vec::new();
    for pair in offset.windows(2) {
        match segment_intersection(pair[0], pair[1], trim_start, trim_end) {
            Some(SegmentCrossing::Point(point)) => crossings.push(point),
            Some(SegmentCrossing::Overlap) => {
                return Err(GeometryError::UnexpectedIntersection(
                    "offset and trim line overlap along a segment".into(),
                ));
            }
            None => {}
        }
    }
    crossings.dedup_by(|a, b| {
        (a[0] - b[0]).abs() < CROSSING_MERGE_EPS && (a[1] - b[1]).abs() < CROSSING_MERGE_EPS
    });

    if crossings.is_empty() {
        crossings = parallel_trim_feet(&offset, trim_start, trim_end)?;
    }

    let (first, last) = if crossings.len() == 1 {
        (crossings[0], crossings[0])
    } else {
        crossings.sort_by(|a, b| a[0].total_cmp(&b[0]));
        (crossings[0], crossings[crossings.len() - 1])
    };

    let mut layer = Vec::with_capacity(offset.len());
    layer.push(first);
    layer.extend(offset[1..offset.len() - 1].iter().copied());
    layer.push(last);
    Ok(layer)
}

/// Fallback trim for a straight profile: the perpendicular feet of the
/// trim endpoints on the offset's supporting line.
///
/// Only an offset that is parallel to the trim chord along its whole
/// length qualifies; anything else genuinely failed to cross.
fn parallel_trim_feet(
    offset: &[[f64; 2]],
    trim_start: [f64; 2],
    trim_end: [f64; 2],
) -> Result<Vec<[f64; 2]>, GeometryError> {
    let dx = trim_end[0] - trim_start[0];
    let dy = trim_end[1] - trim_start[1];
    let len = (dx * dx + dy * dy).sqrt();
    if len < TOLERANCE {
        return Err(GeometryError::NoIntersection);
    }
    let dir = [dx / len, dy / len];

    for pair in offset.windows(2) {
        let sx = pair[1][0] - pair[0][0];
        let sy = pair[1][1] - pair[0][1];
        let span = (sx * sx + sy * sy).sqrt().max(1.0);
        if (sx * dir[1] - sy * dir[0]).abs() > CROSSING_MERGE_EPS * span {
            return Err(GeometryError::NoIntersection);
        }
    }

    let base = offset[0];
    let foot = |p: [f64; 2]| {
        let t = (p[0] - base[0]) * dir[0] + (p[1] - base[1]) * dir[1];
        [base[0] + dir[0] * t, base[1] + dir[1] * t]
    };
    Ok(vec![foot(trim_start), foot(trim_end)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tent_profile_crosses_its_chord_twice() {
        // Inward offset of a tent dips under the chord near both ends and
        // rises above it at the apex.
        let layer = cover_layer(&[[0.0, 0.0], [2.0, 2.0], [4.0, 0.0]], 0.5).unwrap();
        assert_eq!(layer.len(), 3);
        let first = layer[0];
        let last = layer[2];
        assert!(first[0] < last[0]);
        // Crossings lie on the chord y = 0 between the endpoints.
        assert_relative_eq!(first[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(last[1], 0.0, epsilon = 1e-9);
        assert!(first[0] > 0.0 && last[0] < 4.0);
    }

    #[test]
    fn outward_offset_never_meets_the_chord() {
        let err = cover_layer(&[[0.0, 0.0], [2.0, 2.0], [4.0, 0.0]], -0.5).unwrap_err();
        assert!(matches!(err, GeometryError::NoIntersection));
    }
}

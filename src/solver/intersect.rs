//! Minimal 2D intersection primitives for the offset solver.

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// How two bounded segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentCrossing {
    /// A single transversal crossing point.
    Point([f64; 2]),
    /// The segments are collinear and share more than a single point.
    Overlap,
}

/// Intersection of the supporting lines of `a0→a1` and `b0→b1`.
///
/// Returns `None` for parallel (or antiparallel) lines.
#[must_use]
pub fn line_intersection(
    a0: [f64; 2],
    a1: [f64; 2],
    b0: [f64; 2],
    b1: [f64; 2],
) -> Option<[f64; 2]> {
    let da = [a1[0] - a0[0], a1[1] - a0[1]];
    let db = [b1[0] - b0[0], b1[1] - b0[1]];
    let cross = da[0] * db[1] - da[1] * db[0];
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = b0[0] - a0[0];
    let dy = b0[1] - a0[1];
    let t = (dx * db[1] - dy * db[0]) / cross;
    Some([a0[0] + da[0] * t, a0[1] + da[1] * t])
}

/// Bounded segment-segment intersection with collinear-overlap detection.
#[must_use]
pub fn segment_intersection(
    a0: [f64; 2],
    a1: [f64; 2],
    b0: [f64; 2],
    b1: [f64; 2],
) -> Option<SegmentCrossing> {
    let da = [a1[0] - a0[0], a1[1] - a0[1]];
    let db = [b1[0] - b0[0], b1[1] - b0[1]];
    let cross = da[0] * db[1] - da[1] * db[0];
    let dx = b0[0] - a0[0];
    let dy = b0[1] - a0[1];

    if cross.abs() < TOLERANCE {
        // Parallel; only collinear segments can still share points.
        if (dx * da[1] - dy * da[0]).abs() > TOLERANCE {
            return None;
        }
        return collinear_overlap(a0, da, b0, b1);
    }

    let t = (dx * db[1] - dy * db[0]) / cross;
    let u = (dx * da[1] - dy * da[0]) / cross;

    // A small epsilon includes crossings at the segment endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some(SegmentCrossing::Point([
            a0[0] + da[0] * t,
            a0[1] + da[1] * t,
        ]))
    } else {
        None
    }
}

/// Classifies the shared portion of two collinear segments by projecting
/// `b` onto `a`'s parameter space.
fn collinear_overlap(
    a0: [f64; 2],
    da: [f64; 2],
    b0: [f64; 2],
    b1: [f64; 2],
) -> Option<SegmentCrossing> {
    let len_sq = da[0] * da[0] + da[1] * da[1];
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    let project = |p: [f64; 2]| ((p[0] - a0[0]) * da[0] + (p[1] - a0[1]) * da[1]) / len_sq;
    let (mut t0, mut t1) = (project(b0), project(b1));
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    let lo = t0.max(0.0);
    let hi = t1.min(1.0);
    if hi < lo - TOLERANCE {
        return None;
    }
    if hi - lo < TOLERANCE {
        let t = lo.clamp(0.0, 1.0);
        return Some(SegmentCrossing::Point([
            a0[0] + da[0] * t,
            a0[1] + da[1] * t,
        ]));
    }
    Some(SegmentCrossing::Overlap)
}

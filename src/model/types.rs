//! Core entity types for the geometry model.

use serde::Serialize;

use crate::xml::XmlElement;

/// A labeled 2D coordinate in the point table.
///
/// The storage index is the point's position in the table; the project
/// file refers to it by the 1-based identifier `index + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub note: String,
}

impl Point {
    pub fn new(index: usize, x: f64, y: f64, note: impl Into<String>) -> Self {
        Self {
            label: format!("Point-{}", index + 1),
            x,
            y,
            note: note.into(),
        }
    }

    /// Placeholder for a table slot whose coordinates were never supplied.
    /// Carries NaN coordinates so the gap surfaces where the point is used
    /// rather than failing the parse.
    pub(crate) fn unresolved(index: usize) -> Self {
        Self {
            label: format!("Point-{}", index + 1),
            x: f64::NAN,
            y: f64::NAN,
            note: String::new(),
        }
    }
}

/// A directed segment between two points, stored as zero-based indices
/// into the point table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Line {
    pub start: usize,
    pub end: usize,
}

/// A closed polygon referencing points by their 1-based identifiers, plus
/// format-specific extra elements preserved verbatim.
///
/// The identifier cycle (last connecting back to first) is assumed to form
/// a simple polygon; the model does not verify this.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub point_ids: Vec<usize>,
    pub extra: Vec<XmlElement>,
}

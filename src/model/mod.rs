//! The geometry model: point table, line set, region map, and the
//! mutation and query operations that keep them referentially consistent.
//!
//! # Module Structure
//! - `types` - Point, line, and region entity types
//! - `codec` - Conversion between the model and its project-file XML subtree
//! - `snapshot` - Pure drawing data for rendering collaborators

pub mod codec;
pub mod snapshot;
mod types;

pub use snapshot::{GeometrySnapshot, SnapshotPoint};
pub use types::{Line, Point, Region};

use indexmap::IndexMap;
use tracing::info;

use crate::error::ModelError;
use crate::xml::XmlElement;

/// An in-memory 2D model geometry.
///
/// Exactly one caller owns and mutates a model at a time; all operations
/// are synchronous and either complete fully or leave the model untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryModel {
    points: Vec<Point>,
    /// `None` until the first line is added or parsed; distinct from an
    /// empty line set.
    lines: Option<Vec<Line>>,
    regions: IndexMap<String, Region>,
    /// Owned by the upstream project object; the model never changes it on
    /// its own.
    mesh_id: Option<String>,
    name: Option<String>,
    /// Foreign XML elements preserved verbatim for round-trip fidelity.
    other_elements: Vec<XmlElement>,
}

/// A borrowed view of one named model field, for string-keyed access
/// mirroring the project-file tag names.
#[derive(Debug)]
pub enum GeometryItem<'a> {
    Points(&'a [Point]),
    Lines(Option<&'a [Line]>),
    Regions(&'a IndexMap<String, Region>),
    MeshId(Option<i64>),
    Name(Option<&'a str>),
}

impl GeometryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends each coordinate pair as a new point, with indices assigned
    /// sequentially from the current table length.
    ///
    /// `notes` must be one-to-one with `coords` when given; points without
    /// a note carry an empty string. Extends the point table only — lines
    /// and regions are never touched.
    pub fn add_points(
        &mut self,
        coords: &[[f64; 2]],
        notes: Option<&[&str]>,
    ) -> Result<(), ModelError> {
        if let Some(notes) = notes {
            if notes.len() != coords.len() {
                return Err(ModelError::Shape(format!(
                    "expected one note per point, got {} notes for {} points",
                    notes.len(),
                    coords.len()
                )));
            }
        }
        let start = self.points.len();
        for (offset, [x, y]) in coords.iter().copied().enumerate() {
            let note = notes.map_or("", |n| n[offset]);
            self.points.push(Point::new(start + offset, x, y, note));
        }
        Ok(())
    }

    /// Appends lines given as 1-based point identifier pairs.
    ///
    /// Every component of every pair is validated against the current
    /// point count before anything is stored, so a failing call leaves the
    /// line set unchanged. Duplicate pairs are stored as-is; the operation
    /// is deliberately not idempotent.
    pub fn add_lines(&mut self, pairs: &[[usize; 2]]) -> Result<(), ModelError> {
        let count = self.points.len();
        for &[start, end] in pairs {
            // Identifier 0 is as invalid as one past the table end.
            if start == 0 || end == 0 || start > count || end > count {
                return Err(ModelError::Referential { start, end, count });
            }
        }
        let lines = self.lines.get_or_insert_with(Vec::new);
        lines.extend(pairs.iter().map(|&[start, end]| Line {
            start: start - 1,
            end: end - 1,
        }));
        Ok(())
    }

    /// Creates a region over existing points given by 1-based identifiers,
    /// keyed `"Region-{n+1}"` where `n` is the current region count.
    ///
    /// The identifiers are not checked against the point table; keeping a
    /// region consistent with its points is the caller's responsibility.
    pub fn add_region(&mut self, point_ids: &[usize]) {
        let key = format!("Region-{}", self.regions.len() + 1);
        self.regions.insert(
            key,
            Region {
                point_ids: point_ids.to_vec(),
                extra: Vec::new(),
            },
        );
    }

    /// Composite construction: appends `coords` as new points, joins them
    /// with a closed cycle of lines (last back to first), and creates one
    /// region over exactly the new points in input order.
    ///
    /// The coordinates must be ordered so that joining them successively
    /// yields a non-self-intersecting polygon.
    pub fn create_region(&mut self, coords: &[[f64; 2]]) -> Result<(), ModelError> {
        if coords.len() < 3 {
            return Err(ModelError::Shape(format!(
                "a region needs at least 3 points, got {}",
                coords.len()
            )));
        }
        let base = self.points.len();
        self.add_points(coords, None)?;

        let mut cycle: Vec<[usize; 2]> = (0..coords.len())
            .map(|i| [base + i + 1, base + i + 2])
            .collect();
        if let Some(last) = cycle.last_mut() {
            last[1] = base + 1;
        }
        self.add_lines(&cycle)?;

        let ids: Vec<usize> = (base + 1..=base + coords.len()).collect();
        self.add_region(&ids);
        Ok(())
    }

    /// Clears the requested stores. Deleting points forces lines and
    /// regions to be deleted too, since both hold point references.
    pub fn delete(&mut self, points: bool, mut lines: bool, mut regions: bool) {
        if points {
            lines = true;
            regions = true;
            self.points.clear();
            info!("all points deleted");
        }
        if regions {
            self.regions.clear();
            info!("all regions deleted");
        }
        if lines {
            self.lines = None;
            info!("all lines deleted");
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point coordinates in table order.
    pub fn coords(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    pub fn lines(&self) -> Option<&[Line]> {
        self.lines.as_deref()
    }

    pub fn regions(&self) -> &IndexMap<String, Region> {
        &self.regions
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Raw mesh reference as stored in the project file.
    pub fn mesh_ref(&self) -> Option<&str> {
        self.mesh_id.as_deref()
    }

    /// Assigns the mesh reference. Called by the owning project object
    /// when it associates a mesh with this geometry.
    pub fn set_mesh_ref(&mut self, mesh_id: impl Into<String>) {
        self.mesh_id = Some(mesh_id.into());
    }

    /// Mesh reference parsed as an integer identifier.
    pub fn mesh_id(&self) -> Result<Option<i64>, ModelError> {
        match self.mesh_id.as_deref() {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ModelError::Shape(format!("mesh reference {raw:?} is not an integer"))
            }),
        }
    }

    /// Foreign elements carried through from the parsed subtree.
    pub fn other_elements(&self) -> &[XmlElement] {
        &self.other_elements
    }

    /// String-keyed field access; unknown keys fail naming the key.
    pub fn item(&self, key: &str) -> Result<GeometryItem<'_>, ModelError> {
        match key {
            "Points" => Ok(GeometryItem::Points(&self.points)),
            "Lines" => Ok(GeometryItem::Lines(self.lines.as_deref())),
            "Regions" => Ok(GeometryItem::Regions(&self.regions)),
            "MeshId" => Ok(GeometryItem::MeshId(self.mesh_id()?)),
            "Name" => Ok(GeometryItem::Name(self.name.as_deref())),
            other => Err(ModelError::KeyNotFound(other.to_string())),
        }
    }
}

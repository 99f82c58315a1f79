//! Pure drawing data handed to rendering and listing collaborators.
//!
//! The model exposes resolved coordinates only; all rendering state stays
//! with the collaborator.

use serde::Serialize;
use tracing::info;

use super::GeometryModel;
use crate::error::ModelError;

/// A labeled point ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Everything a drawing collaborator needs, resolved to raw coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct GeometrySnapshot {
    pub points: Vec<SnapshotPoint>,
    /// Line segments as start/end coordinate pairs.
    pub segments: Vec<[[f64; 2]; 2]>,
    /// Region outlines as closed coordinate loops (first point repeated
    /// last), labeled in region insertion order.
    pub outlines: Vec<(String, Vec<[f64; 2]>)>,
}

impl GeometryModel {
    /// Drawing data, or `None` with an informational notice when the model
    /// holds no points yet. Drawing an empty model is not an error.
    pub fn snapshot(&self) -> Option<GeometrySnapshot> {
        match self.try_snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(_) => {
                info!("no geometry available to draw");
                None
            }
        }
    }

    /// Same as [`snapshot`](Self::snapshot) but surfaces the empty state
    /// as an error, for callers that must not proceed without data.
    pub fn try_snapshot(&self) -> Result<GeometrySnapshot, ModelError> {
        if self.points().is_empty() {
            return Err(ModelError::MissingData);
        }

        let points = self
            .points()
            .iter()
            .map(|p| SnapshotPoint {
                label: p.label.clone(),
                x: p.x,
                y: p.y,
                note: p.note.clone(),
            })
            .collect();

        let segments = self
            .lines()
            .unwrap_or(&[])
            .iter()
            .filter_map(|line| {
                let a = self.points().get(line.start)?;
                let b = self.points().get(line.end)?;
                Some([[a.x, a.y], [b.x, b.y]])
            })
            .collect();

        // Region identifiers are unvalidated; out-of-range references are
        // skipped here rather than failing the whole snapshot.
        let outlines = self
            .regions()
            .iter()
            .map(|(label, region)| {
                let mut outline: Vec<[f64; 2]> = region
                    .point_ids
                    .iter()
                    .filter_map(|&id| self.points().get(id.checked_sub(1)?))
                    .map(|p| [p.x, p.y])
                    .collect();
                if let Some(&first) = outline.first() {
                    outline.push(first);
                }
                (label.clone(), outline)
            })
            .collect();

        Ok(GeometrySnapshot {
            points,
            segments,
            outlines,
        })
    }
}

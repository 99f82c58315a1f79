//! Conversion between the geometry model and its project-file XML subtree.
//!
//! [`parse_geometry`] consumes the immediate children of a `<Geometry>`
//! element; [`write_geometry`] rebuilds an equivalent subtree. Elements the
//! model does not understand are carried through verbatim, with the single
//! deliberate exception of `<ResultGraphs>`, which is dropped.

use indexmap::IndexMap;
use tracing::debug;

use super::{GeometryModel, Line, Point, Region};
use crate::error::ModelError;
use crate::xml::XmlElement;

/// Builds a geometry model from a `<Geometry>` subtree.
pub fn parse_geometry(root: &XmlElement) -> Result<GeometryModel, ModelError> {
    let mut model = GeometryModel::new();
    for property in &root.children {
        match property.name.as_str() {
            "Points" => model.points = parse_points(property)?,
            "Lines" => model.lines = Some(parse_lines(property)?),
            "Regions" => model.regions = parse_regions(property)?,
            "MeshId" => model.mesh_id = Some(property.text.clone()),
            "Name" => model.name = Some(property.text.clone()),
            // Result graphs are not modeled and not preserved.
            "ResultGraphs" => {}
            _ => model.other_elements.push(property.clone()),
        }
    }
    debug!(
        points = model.points.len(),
        lines = model.lines.as_ref().map_or(0, Vec::len),
        regions = model.regions.len(),
        "parsed geometry subtree"
    );
    Ok(model)
}

/// Rebuilds the `<Geometry>` subtree in the fixed order the project file
/// expects: points, lines, regions, mesh reference, name, then foreign
/// elements exactly as they were read.
pub fn write_geometry(model: &GeometryModel) -> XmlElement {
    let mut root = XmlElement::new("Geometry");

    let mut points = XmlElement::new("Points");
    points.set_attr("Len", model.points.len().to_string());
    for (index, point) in model.points.iter().enumerate() {
        let mut entry = XmlElement::new("Point");
        entry.set_attr("ID", (index + 1).to_string());
        entry.set_attr("X", point.x.to_string());
        entry.set_attr("Y", point.y.to_string());
        points.push(entry);
    }
    root.push(points);

    // A line set that was never created stays absent, so "no lines yet"
    // survives the round trip.
    if let Some(lines) = model.lines.as_deref() {
        let mut table = XmlElement::new("Lines");
        table.set_attr("Len", lines.len().to_string());
        for (index, line) in lines.iter().enumerate() {
            let mut entry = XmlElement::new("Line");
            entry.push(XmlElement::new("ID").with_text((index + 1).to_string()));
            entry.push(XmlElement::new("PointID1").with_text((line.start + 1).to_string()));
            entry.push(XmlElement::new("PointID2").with_text((line.end + 1).to_string()));
            table.push(entry);
        }
        root.push(table);
    }

    let mut regions = XmlElement::new("Regions");
    regions.set_attr("Len", model.regions.len().to_string());
    for (label, region) in &model.regions {
        let mut entry = XmlElement::new("Region");
        let suffix = label.rsplit('-').next().unwrap_or(label);
        entry.push(XmlElement::new("ID").with_text(suffix));
        entry.push(XmlElement::new("PointIDs").with_text(join_ids(&region.point_ids)));
        entry.children.extend(region.extra.iter().cloned());
        regions.push(entry);
    }
    root.push(regions);

    if let Some(mesh_id) = &model.mesh_id {
        root.push(XmlElement::new("MeshId").with_text(mesh_id.clone()));
    }
    if let Some(name) = &model.name {
        root.push(XmlElement::new("Name").with_text(name.clone()));
    }

    root.children.extend(model.other_elements.iter().cloned());
    root
}

impl GeometryModel {
    /// Parses a geometry from XML text: [`crate::xml::read_str`] followed
    /// by [`parse_geometry`].
    pub fn from_xml_str(xml: &str) -> crate::error::Result<Self> {
        let root = crate::xml::read_str(xml)?;
        Ok(parse_geometry(&root)?)
    }

    /// Serializes the model to pretty-printed XML text.
    pub fn to_xml_string(&self) -> String {
        crate::xml::write_pretty(&write_geometry(self))
    }
}

/// `<Point ID=".." X=".." Y=".."/>` children, stored at slot `ID - 1`.
///
/// Sparse or out-of-order identifiers are accepted; slots that never
/// receive a coordinate keep NaN placeholders and surface as malformed
/// data where the points are used, not here.
fn parse_points(element: &XmlElement) -> Result<Vec<Point>, ModelError> {
    let mut table: Vec<Point> = Vec::new();
    for child in &element.children {
        let id = require_usize_attr(child, "ID")?;
        if id == 0 {
            return Err(ModelError::Shape(
                "point ID 0 is not a valid 1-based identifier".into(),
            ));
        }
        let x = require_f64_attr(child, "X")?;
        let y = require_f64_attr(child, "Y")?;

        let index = id - 1;
        if table.len() <= index {
            let from = table.len();
            table.extend((from..=index).map(Point::unresolved));
        }
        table[index] = Point::new(index, x, y, "");
    }
    Ok(table)
}

/// `<Lines Len="N">` pre-sizes the slot table; each `<Line>` supplies
/// `ID`, `PointID1`, `PointID2` and fills slot `ID - 1`.
///
/// Every slot must end up filled: a declared-but-missing line is an
/// error, never a sentinel entry.
fn parse_lines(element: &XmlElement) -> Result<Vec<Line>, ModelError> {
    let len = require_usize_attr(element, "Len")?;
    let mut slots: Vec<Option<Line>> = vec![None; len];

    for child in &element.children {
        let id = require_usize_child(child, "ID")?;
        let slot = id.checked_sub(1).filter(|i| *i < len).ok_or_else(|| {
            ModelError::Shape(format!(
                "line ID {id} is outside the declared table of {len}"
            ))
        })?;
        let p1 = require_usize_child(child, "PointID1")?;
        let p2 = require_usize_child(child, "PointID2")?;
        if p1 == 0 || p2 == 0 {
            return Err(ModelError::Shape(format!(
                "line {id} references point ID 0"
            )));
        }
        slots[slot] = Some(Line {
            start: p1 - 1,
            end: p2 - 1,
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                ModelError::Shape(format!(
                    "line table declares {len} entries but slot {} was never filled",
                    index + 1
                ))
            })
        })
        .collect()
}

/// Each `<Region>` child is scanned once: `ID` names it, `PointIDs` lists
/// its polygon, and everything else rides along verbatim as extra fields.
fn parse_regions(element: &XmlElement) -> Result<IndexMap<String, Region>, ModelError> {
    let mut regions = IndexMap::new();
    for child in &element.children {
        let mut id: Option<String> = None;
        let mut point_ids: Vec<usize> = Vec::new();
        let mut extra = Vec::new();
        for field in &child.children {
            match field.name.as_str() {
                "ID" => id = Some(field.text.trim().to_string()),
                "PointIDs" => point_ids = parse_point_ids(&field.text)?,
                _ => extra.push(field.clone()),
            }
        }
        let id = id.ok_or_else(|| {
            ModelError::Shape("region without an <ID> element".into())
        })?;
        regions.insert(format!("Region-{id}"), Region { point_ids, extra });
    }
    Ok(regions)
}

fn parse_point_ids(text: &str) -> Result<Vec<usize>, ModelError> {
    text.split(',')
        .map(|token| {
            token.trim().parse().map_err(|_| {
                ModelError::Shape(format!(
                    "region point identifier {token:?} is not an integer"
                ))
            })
        })
        .collect()
}

fn join_ids(ids: &[usize]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn require_usize_attr(element: &XmlElement, key: &str) -> Result<usize, ModelError> {
    element
        .attr(key)
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| {
            ModelError::Shape(format!(
                "<{}> is missing a numeric {key:?} attribute",
                element.name
            ))
        })
}

fn require_f64_attr(element: &XmlElement, key: &str) -> Result<f64, ModelError> {
    element
        .attr(key)
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| {
            ModelError::Shape(format!(
                "<{}> is missing a numeric {key:?} attribute",
                element.name
            ))
        })
}

fn require_usize_child(element: &XmlElement, tag: &str) -> Result<usize, ModelError> {
    element
        .child(tag)
        .and_then(|child| child.text.trim().parse().ok())
        .ok_or_else(|| {
            ModelError::Shape(format!(
                "<{}> is missing a numeric <{tag}> child",
                element.name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::read_str;

    #[test]
    fn points_accept_sparse_out_of_order_ids() {
        let xml = r#"<Points Len="3">
            <Point ID="3" X="2" Y="0"/>
            <Point ID="1" X="0" Y="0"/>
        </Points>"#;
        let table = parse_points(&read_str(xml).unwrap()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].x, 0.0);
        assert!(table[1].x.is_nan(), "unsupplied slot keeps its placeholder");
        assert_eq!(table[2].x, 2.0);
    }

    #[test]
    fn lines_reject_unfilled_slots() {
        let xml = r#"<Lines Len="2">
            <Line><ID>1</ID><PointID1>1</PointID1><PointID2>2</PointID2></Line>
        </Lines>"#;
        let err = parse_lines(&read_str(xml).unwrap()).unwrap_err();
        assert!(err.to_string().contains("slot 2"), "{err}");
    }

    #[test]
    fn lines_reject_slot_id_past_declared_length() {
        let xml = r#"<Lines Len="1">
            <Line><ID>2</ID><PointID1>1</PointID1><PointID2>2</PointID2></Line>
        </Lines>"#;
        assert!(parse_lines(&read_str(xml).unwrap()).is_err());
    }

    #[test]
    fn region_extras_are_preserved_with_attributes() {
        let xml = r#"<Regions Len="1">
            <Region>
                <ID>4</ID>
                <PointIDs>1, 2,3</PointIDs>
                <Material Index="2">Clay</Material>
            </Region>
        </Regions>"#;
        let regions = parse_regions(&read_str(xml).unwrap()).unwrap();
        let region = &regions["Region-4"];
        assert_eq!(region.point_ids, vec![1, 2, 3]);
        assert_eq!(region.extra.len(), 1);
        assert_eq!(region.extra[0].name, "Material");
        assert_eq!(region.extra[0].attr("Index"), Some("2"));
        assert_eq!(region.extra[0].text, "Clay");
    }

    #[test]
    fn write_omits_unset_scalars_and_absent_line_set() {
        let model = GeometryModel::new();
        let root = write_geometry(&model);
        assert!(root.child("Lines").is_none());
        assert!(root.child("MeshId").is_none());
        assert!(root.child("Name").is_none());
        assert_eq!(root.child("Points").unwrap().attr("Len"), Some("0"));
        assert_eq!(root.child("Regions").unwrap().attr("Len"), Some("0"));
    }
}

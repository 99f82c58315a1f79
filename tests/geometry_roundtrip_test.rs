//! Round-trip fidelity between the geometry model and its XML subtree.

use anyhow::Result;
use gsmodel::xml::{read_str, write_pretty};
use gsmodel::{parse_geometry, write_geometry, GeometryModel, Line};

const FIXTURE: &str = r#"<Geometry>
  <Points Len="4">
    <Point ID="1" X="0" Y="0" />
    <Point ID="2" X="10" Y="0" />
    <Point ID="3" X="10" Y="5" />
    <Point ID="4" X="0" Y="5" />
  </Points>
  <Lines Len="2">
    <Line>
      <ID>1</ID>
      <PointID1>1</PointID1>
      <PointID2>2</PointID2>
    </Line>
    <Line>
      <ID>2</ID>
      <PointID1>2</PointID1>
      <PointID2>3</PointID2>
    </Line>
  </Lines>
  <Regions Len="1">
    <Region>
      <ID>1</ID>
      <PointIDs>1,2,3,4</PointIDs>
      <Material Index="2">Clay</Material>
    </Region>
  </Regions>
  <MeshId>3</MeshId>
  <Name>Dike cross-section</Name>
  <ResultGraphs>
    <Graph ID="1" />
  </ResultGraphs>
  <MeshDefaultEdgeLength>1.5</MeshDefaultEdgeLength>
</Geometry>"#;

/// The fixture with the one deliberately lossy element removed.
fn fixture_without_result_graphs() -> String {
    FIXTURE
        .lines()
        .filter(|line| !line.contains("ResultGraphs") && !line.contains("<Graph"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn parse_populates_every_store() -> Result<()> {
    let model = parse_geometry(&read_str(FIXTURE)?)?;

    let points = model.points();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].label, "Point-1");
    assert_eq!(points[3].label, "Point-4");
    assert_eq!(model.coords()[2], [10.0, 5.0]);

    let lines = model.lines().expect("line set present");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], Line { start: 1, end: 2 });

    let region = &model.regions()["Region-1"];
    assert_eq!(region.point_ids, vec![1, 2, 3, 4]);
    assert_eq!(region.extra.len(), 1);
    assert_eq!(region.extra[0].name, "Material");

    assert_eq!(model.mesh_ref(), Some("3"));
    assert_eq!(model.mesh_id()?, Some(3));
    assert_eq!(model.name(), Some("Dike cross-section"));
    Ok(())
}

#[test]
fn result_graphs_are_dropped_but_foreign_elements_survive() -> Result<()> {
    let model = parse_geometry(&read_str(FIXTURE)?)?;

    assert_eq!(model.other_elements().len(), 1);
    assert_eq!(model.other_elements()[0].name, "MeshDefaultEdgeLength");
    assert_eq!(model.other_elements()[0].text, "1.5");
    assert!(model
        .other_elements()
        .iter()
        .all(|e| e.name != "ResultGraphs"));
    Ok(())
}

#[test]
fn serialize_is_tag_for_tag_equivalent_to_the_source() -> Result<()> {
    let model = parse_geometry(&read_str(FIXTURE)?)?;
    let expected = read_str(&fixture_without_result_graphs())?;
    assert_eq!(write_geometry(&model), expected);
    Ok(())
}

#[test]
fn parse_of_serialize_returns_the_same_model() -> Result<()> {
    let model = parse_geometry(&read_str(FIXTURE)?)?;
    let reparsed = parse_geometry(&write_geometry(&model))?;
    assert_eq!(reparsed, model);
    Ok(())
}

#[test]
fn round_trip_survives_a_full_text_cycle() -> Result<()> {
    let model = parse_geometry(&read_str(FIXTURE)?)?;
    let text = write_pretty(&write_geometry(&model));
    let reparsed = parse_geometry(&read_str(&text)?)?;
    assert_eq!(reparsed, model);

    // The text-level convenience pair agrees with the explicit cycle.
    let model = GeometryModel::from_xml_str(FIXTURE)?;
    assert_eq!(GeometryModel::from_xml_str(&model.to_xml_string())?, model);
    Ok(())
}

#[test]
fn programmatically_built_model_round_trips() -> Result<()> {
    let mut model = GeometryModel::new();
    model.create_region(&[[0.0, 0.0], [4.0, 0.0], [4.0, 2.5], [0.0, 2.5]])?;
    model.set_name("Embankment");
    model.set_mesh_ref("7");

    let reparsed = parse_geometry(&write_geometry(&model))?;
    assert_eq!(reparsed, model);
    Ok(())
}

#[test]
fn absent_line_set_stays_absent() -> Result<()> {
    let xml = r#"<Geometry><Points Len="1"><Point ID="1" X="1" Y="2"/></Points></Geometry>"#;
    let model = parse_geometry(&read_str(xml)?)?;
    assert!(model.lines().is_none());

    let reparsed = parse_geometry(&write_geometry(&model))?;
    assert!(reparsed.lines().is_none());
    assert_eq!(reparsed, model);
    Ok(())
}

#[test]
fn empty_line_set_is_distinct_from_absent() -> Result<()> {
    let xml = r#"<Geometry><Lines Len="0"/></Geometry>"#;
    let model = parse_geometry(&read_str(xml)?)?;
    assert_eq!(model.lines(), Some(&[][..]));

    let reparsed = parse_geometry(&write_geometry(&model))?;
    assert_eq!(reparsed.lines(), Some(&[][..]));
    Ok(())
}

#[test]
fn unset_scalars_round_trip_as_unset() -> Result<()> {
    let model = parse_geometry(&read_str("<Geometry />")?)?;
    assert_eq!(model.mesh_ref(), None);
    assert_eq!(model.name(), None);

    let reparsed = parse_geometry(&write_geometry(&model))?;
    assert_eq!(reparsed, model);
    assert_eq!(reparsed, GeometryModel::new());
    Ok(())
}

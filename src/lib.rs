//! gsmodel — a structured 2D geometry model for geotechnical project files.
//!
//! The crate round-trips model geometries (points, connecting lines, and
//! closed regions) between memory and the XML subtree schema used by the
//! project-file container, keeps cross-references consistent under
//! mutation, and derives trimmed parallel offset layers from surface
//! profiles.
//!
//! # Module Structure
//! - `xml` - Generic XML element tree, reader, and writer
//! - `model` - The geometry model, its operations, and the XML codec
//! - `solver` - Offset, intersection, and profile algorithms
//! - `error` - Typed error taxonomy
//!
//! Unrecognized XML content is preserved verbatim through a parse/write
//! cycle; the only deliberately dropped element is `<ResultGraphs>`.

pub mod error;
pub mod model;
pub mod solver;
pub mod xml;

pub use error::{Error, GeometryError, ModelError, Result, XmlError};
pub use model::codec::{parse_geometry, write_geometry};
pub use model::{GeometryItem, GeometryModel, GeometrySnapshot, Line, Point, Region};
pub use solver::cover_layer;
pub use xml::XmlElement;

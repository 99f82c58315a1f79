use thiserror::Error;

/// Top-level error type for the gsmodel crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

/// Errors raised by geometry-model operations and queries.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("wrong-shaped input: {0}")]
    Shape(String),

    #[error("line ({start}, {end}) refers to a non-existent point (points defined: {count})")]
    Referential {
        start: usize,
        end: usize,
        count: usize,
    },

    #[error("no geometry data loaded")]
    MissingData,

    #[error("there is no item \"{0}\" accessible through the geometry model")]
    KeyNotFound(String),
}

/// Errors raised by the offset solver and profile helpers.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("no intersection between offset and trim line")]
    NoIntersection,

    #[error("unexpected intersection geometry: {0}")]
    UnexpectedIntersection(String),

    #[error("zero-length segment at vertex {0}")]
    DegenerateSegment(usize),

    #[error("a polyline needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("segment {index} does not exist (profile has {segments} segments)")]
    SegmentOutOfRange { index: usize, segments: usize },

    #[error("cannot interpolate on a horizontal segment")]
    InterpolationSingularity,

    #[error("elevation {y} is outside the slope span [{lo}, {hi}]")]
    OutsideSlope { y: f64, lo: f64, hi: f64 },
}

/// Errors raised while reading an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Parse(#[from] quick_xml::Error),

    #[error(transparent)]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("unexpected closing tag '</{found}>' while parsing '<{expected}>'")]
    MismatchedTag { expected: String, found: String },

    #[error("unexpected end of document while parsing element '{0}'")]
    Truncated(String),

    #[error("document contains no root element")]
    Empty,
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

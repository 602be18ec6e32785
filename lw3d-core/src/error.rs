/// Error types for geometry validation, viewer configuration and mesh import
use thiserror::Error;

/// Errors raised while validating mesh geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A node position holds a NaN or infinite coordinate.
    #[error("node {0} has a non-finite coordinate")]
    NodeNotFinite(usize),

    /// An edge refers to a node index the mesh does not have.
    #[error("edge {edge} references node {node}, but the mesh has {node_count} nodes")]
    EdgeOutOfRange {
        edge: usize,
        node: usize,
        node_count: usize,
    },

    /// A face refers to a node index the mesh does not have.
    #[error("face {face} references node {node}, but the mesh has {node_count} nodes")]
    FaceOutOfRange {
        face: usize,
        node: usize,
        node_count: usize,
    },

    /// A face has fewer than the three nodes needed to span a plane.
    #[error("face {face} has {nodes} nodes, at least 3 are required")]
    FaceTooSmall { face: usize, nodes: usize },

    /// A generated shape was given a resolution too coarse to close.
    #[error("spheroid resolution {0} is too coarse, at least 3 is required")]
    ResolutionTooCoarse(usize),
}

/// Errors raised while validating viewer configuration.
///
/// All of these are fatal at construction time; nothing is rendered from
/// a config that failed validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("surface size {width}x{height} is empty")]
    EmptySurface { width: u32, height: u32 },

    #[error("perspective focal length must be positive and finite, got {0}")]
    FocalLength(f32),

    #[error("light color channels must lie in 0..=1, got ({0}, {1}, {2})")]
    LightColor(f32, f32, f32),

    #[error("view vector must have a non-zero length")]
    ZeroViewVector,

    #[error("light vector must have a non-zero length")]
    ZeroLightVector,
}

/// Errors raised while parsing Wavefront OBJ text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjError {
    #[error("line {line}: malformed {statement} statement")]
    Malformed { line: usize, statement: &'static str },

    #[error("line {line}: vertex reference {reference} is out of range ({count} vertices loaded)")]
    ReferenceOutOfRange {
        line: usize,
        reference: i64,
        count: usize,
    },

    #[error("line {line}: face lists {count} vertices, at least 3 are required")]
    FaceTooSmall { line: usize, count: usize },
}

/// Errors raised while parsing STL data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StlError {
    #[error("file is too short to hold an STL header")]
    TooShort,

    #[error("binary triangle data ends early at triangle {0}")]
    TruncatedTriangle(usize),

    #[error("malformed ASCII STL near {0:?}")]
    Ascii(String),
}

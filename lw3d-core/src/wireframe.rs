/// Polygonal mesh model: shared nodes, colored edges and colored faces
use std::collections::BTreeSet;

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::color::Rgb;
use crate::error::GeometryError;
use crate::transform;

/// A straight segment between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub color: Rgb,
}

/// A flat polygon over three or more nodes.
///
/// Nodes are listed so the winding's right-hand normal points out of the
/// solid; the shading stage derives it from the first three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub nodes: Vec<usize>,
    pub color: Rgb,
}

/// A mesh of homogeneous nodes with edges and faces indexing into them.
///
/// Nodes are stored as `[x, y, z, 1]` column vectors so the whole mesh
/// can be pushed through 4x4 transforms in one pass. Coordinates live in
/// surface space: x grows right, y grows down, z grows away from the
/// viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    pub nodes: Vec<Vector4<f32>>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at `(x, y, z)`, returning its index.
    pub fn add_node(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.nodes.push(Vector4::new(x, y, z, 1.0));
        self.nodes.len() - 1
    }

    pub fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = (f32, f32, f32)>,
    {
        for (x, y, z) in nodes {
            self.add_node(x, y, z);
        }
    }

    pub fn add_edge(&mut self, start: usize, end: usize, color: Rgb) {
        self.edges.push(Edge { start, end, color });
    }

    pub fn add_face(&mut self, nodes: Vec<usize>, color: Rgb) {
        self.faces.push(Face { nodes, color });
    }

    /// Check that every node position is finite, that every edge and
    /// face refers to nodes the mesh actually has, and that every face
    /// spans at least three nodes.
    ///
    /// File parsers pass coordinates through as authored, so an
    /// overflowed value only stops here.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let node_count = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            if !(node.x.is_finite() && node.y.is_finite() && node.z.is_finite()) {
                return Err(GeometryError::NodeNotFinite(index));
            }
        }
        for (index, edge) in self.edges.iter().enumerate() {
            for node in [edge.start, edge.end] {
                if node >= node_count {
                    return Err(GeometryError::EdgeOutOfRange {
                        edge: index,
                        node,
                        node_count,
                    });
                }
            }
        }
        for (index, face) in self.faces.iter().enumerate() {
            if face.nodes.len() < 3 {
                return Err(GeometryError::FaceTooSmall {
                    face: index,
                    nodes: face.nodes.len(),
                });
            }
            for &node in &face.nodes {
                if node >= node_count {
                    return Err(GeometryError::FaceOutOfRange {
                        face: index,
                        node,
                        node_count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Mean depth of a face, the painter's algorithm sort key.
    fn face_depth(&self, face: &Face) -> f32 {
        let total: f32 = face.nodes.iter().map(|&node| self.nodes[node].z).sum();
        total / face.nodes.len() as f32
    }

    /// Faces ordered deepest first (largest mean z). Ties keep their
    /// insertion order so the draw order is stable frame to frame.
    pub fn faces_back_to_front(&self) -> Vec<&Face> {
        let mut ordered: Vec<(f32, &Face)> = self
            .faces
            .iter()
            .map(|face| (self.face_depth(face), face))
            .collect();
        ordered.sort_by(|a, b| b.0.total_cmp(&a.0));
        ordered.into_iter().map(|(_, face)| face).collect()
    }

    /// Derive one edge per unique face boundary segment, in `color`.
    /// Segments already present as edges are left alone.
    pub fn add_edges_from_faces(&mut self, color: Rgb) {
        let mut seen: BTreeSet<(usize, usize)> = self
            .edges
            .iter()
            .map(|edge| ordered_pair(edge.start, edge.end))
            .collect();
        let mut derived = Vec::new();
        for face in &self.faces {
            for (index, &start) in face.nodes.iter().enumerate() {
                let end = face.nodes[(index + 1) % face.nodes.len()];
                if start != end && seen.insert(ordered_pair(start, end)) {
                    derived.push((start, end));
                }
            }
        }
        for (start, end) in derived {
            self.add_edge(start, end, color);
        }
    }

    /// Apply a homogeneous transform to every node.
    pub fn apply(&mut self, matrix: &Matrix4<f32>) {
        for node in &mut self.nodes {
            *node = matrix * *node;
        }
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.apply(&transform::translation(offset));
    }

    /// Scale the mesh uniformly about a fixed point.
    pub fn scale_about(&mut self, center: Vector3<f32>, factor: f32) {
        self.apply(&transform::about(center, &transform::scaling(factor)));
    }

    pub fn rotate_x_about(&mut self, center: Vector3<f32>, theta: f32) {
        self.apply(&transform::about(center, &transform::rotation_x(theta)));
    }

    pub fn rotate_y_about(&mut self, center: Vector3<f32>, theta: f32) {
        self.apply(&transform::about(center, &transform::rotation_y(theta)));
    }

    pub fn rotate_z_about(&mut self, center: Vector3<f32>, theta: f32) {
        self.apply(&transform::about(center, &transform::rotation_z(theta)));
    }

    /// Mirror across the xz plane, reversing face windings so faces that
    /// wound outward keep winding outward. Converts between y-up model
    /// files and the y-down surface convention.
    pub fn mirror_y(&mut self, center_y: f32) {
        for node in &mut self.nodes {
            node.y = 2.0 * center_y - node.y;
        }
        for face in &mut self.faces {
            face.nodes.reverse();
        }
    }

    /// Mean node position, or `None` for an empty mesh.
    pub fn center(&self) -> Option<Vector3<f32>> {
        if self.nodes.is_empty() {
            return None;
        }
        let total = self
            .nodes
            .iter()
            .fold(Vector3::zeros(), |sum, node| sum + node.xyz());
        Some(total / self.nodes.len() as f32)
    }

    /// Axis-aligned bounds of the node cloud as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = self.nodes.first()?.xyz();
        let mut min = first;
        let mut max = first;
        for node in &self.nodes[1..] {
            min = min.inf(&node.xyz());
            max = max.sup(&node.xyz());
        }
        Some((min, max))
    }
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

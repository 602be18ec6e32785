/// Generators for basic solids
use std::f32::consts::PI;

use nalgebra::Vector3;

use crate::color::Rgb;
use crate::error::GeometryError;
use crate::wireframe::Wireframe;

/// Axis-aligned cuboid with `origin` at its minimum corner.
///
/// All six faces wind outward and the twelve boundary edges are
/// included, both in `color`.
pub fn cuboid(origin: Vector3<f32>, size: Vector3<f32>, color: Rgb) -> Wireframe {
    let mut mesh = Wireframe::new();
    for x in [origin.x, origin.x + size.x] {
        for y in [origin.y, origin.y + size.y] {
            for z in [origin.z, origin.z + size.z] {
                mesh.add_node(x, y, z);
            }
        }
    }
    const FACES: [[usize; 4]; 6] = [
        [0, 1, 3, 2],
        [7, 5, 4, 6],
        [4, 5, 1, 0],
        [2, 3, 7, 6],
        [0, 2, 6, 4],
        [5, 7, 3, 1],
    ];
    for face in FACES {
        mesh.add_face(face.to_vec(), color);
    }
    mesh.add_edges_from_faces(color);
    mesh
}

/// Spheroid centered at `center` with per-axis `radii`, tessellated into
/// `resolution` bands of latitude and longitude.
///
/// Rings of quads cover the body and triangle fans close both poles, all
/// wound outward. No edges are generated; call
/// [`Wireframe::add_edges_from_faces`] for a line overlay.
pub fn spheroid(
    center: Vector3<f32>,
    radii: Vector3<f32>,
    resolution: usize,
    color: Rgb,
) -> Result<Wireframe, GeometryError> {
    if resolution < 3 {
        return Err(GeometryError::ResolutionTooCoarse(resolution));
    }
    let mut mesh = Wireframe::new();
    let step = PI / resolution as f32;

    // Ring nodes, top to bottom. Ring m spans the latitude m * step.
    for m in 1..resolution {
        let theta = m as f32 * step;
        for n in 0..resolution {
            let phi = 2.0 * n as f32 * step;
            mesh.add_node(
                center.x + radii.x * phi.sin() * theta.sin(),
                center.y - radii.y * theta.cos(),
                center.z - radii.z * phi.cos() * theta.sin(),
            );
        }
    }
    let top = mesh.add_node(center.x, center.y - radii.y, center.z);
    let bottom = mesh.add_node(center.x, center.y + radii.y, center.z);

    // Quads between consecutive rings.
    for ring in 0..resolution - 2 {
        let row = ring * resolution;
        let next_row = row + resolution;
        for n in 0..resolution {
            let wrapped = (n + 1) % resolution;
            mesh.add_face(
                vec![row + n, next_row + n, next_row + wrapped, row + wrapped],
                color,
            );
        }
    }

    // Triangle fans closing the poles, bottom fan reversed to keep its
    // winding outward.
    let last_row = (resolution - 2) * resolution;
    for n in 0..resolution {
        let wrapped = (n + 1) % resolution;
        mesh.add_face(vec![n, wrapped, top], color);
        mesh.add_face(vec![bottom, last_row + wrapped, last_row + n], color);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::face_normal;
    use approx::assert_relative_eq;

    /// Dot of each face's winding normal with the outward radial
    /// direction at its centroid; positive means the face winds outward.
    fn outward_alignments(mesh: &Wireframe, center: Vector3<f32>) -> Vec<f32> {
        mesh.faces
            .iter()
            .map(|face| {
                let normal = face_normal(
                    mesh.nodes[face.nodes[0]].xyz(),
                    mesh.nodes[face.nodes[1]].xyz(),
                    mesh.nodes[face.nodes[2]].xyz(),
                )
                .unwrap();
                let centroid = face
                    .nodes
                    .iter()
                    .fold(Vector3::zeros(), |sum, &node| sum + mesh.nodes[node].xyz())
                    / face.nodes.len() as f32;
                normal.dot(&(centroid - center).normalize())
            })
            .collect()
    }

    #[test]
    fn test_spheroid_counts() {
        let mesh = spheroid(
            Vector3::zeros(),
            Vector3::new(10.0, 10.0, 10.0),
            8,
            Rgb::WHITE,
        )
        .unwrap();
        // 7 rings of 8 nodes plus both poles.
        assert_eq!(mesh.nodes.len(), 58);
        // 6 bands of 8 quads plus 2 fans of 8 triangles.
        assert_eq!(mesh.faces.len(), 64);
        assert!(mesh.edges.is_empty());
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn test_spheroid_rejects_coarse_resolution() {
        let result = spheroid(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), 2, Rgb::WHITE);
        assert_eq!(result, Err(GeometryError::ResolutionTooCoarse(2)));
    }

    #[test]
    fn test_spheroid_nodes_lie_on_surface() {
        let center = Vector3::new(300.0, 200.0, 20.0);
        let radii = Vector3::new(160.0, 120.0, 80.0);
        let mesh = spheroid(center, radii, 12, Rgb::WHITE).unwrap();
        for node in &mesh.nodes {
            let offset = node.xyz() - center;
            let unit = (offset.x / radii.x).powi(2)
                + (offset.y / radii.y).powi(2)
                + (offset.z / radii.z).powi(2);
            assert_relative_eq!(unit, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_spheroid_faces_wind_outward() {
        let center = Vector3::new(5.0, -3.0, 40.0);
        let mesh = spheroid(center, Vector3::new(20.0, 20.0, 20.0), 12, Rgb::WHITE).unwrap();
        for alignment in outward_alignments(&mesh, center) {
            assert!(alignment > 0.0, "face winds inward: {alignment}");
        }
    }

    #[test]
    fn test_cuboid_counts() {
        let mesh = cuboid(
            Vector3::zeros(),
            Vector3::new(2.0, 3.0, 4.0),
            Rgb::new(100, 100, 100),
        );
        assert_eq!(mesh.nodes.len(), 8);
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.edges.len(), 12);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn test_cuboid_faces_wind_outward() {
        let origin = Vector3::new(-1.0, 2.0, 5.0);
        let size = Vector3::new(4.0, 2.0, 6.0);
        let mesh = cuboid(origin, size, Rgb::WHITE);
        for alignment in outward_alignments(&mesh, origin + size / 2.0) {
            assert!(alignment > 0.0, "face winds inward: {alignment}");
        }
    }
}

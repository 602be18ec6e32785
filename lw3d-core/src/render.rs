/// Painter's algorithm frame renderer
use std::io;

use crate::canvas::Canvas;
use crate::shading;
use crate::viewer::Viewer;

/// Paint one frame of the whole scene onto `canvas`.
///
/// The surface is cleared once, then meshes are drawn in their scene
/// order. Within a mesh, shaded faces go down first in back-to-front
/// order, then edge lines, then node markers, so overlays always sit on
/// top of fills. Face fills use the plain orthographic node positions;
/// edges and nodes go through the configured projection, and endpoints
/// the projection rejects drop out of the frame. The projection centers
/// on the size the canvas reports for itself. The finished frame is
/// presented before returning.
pub fn render_frame<C: Canvas>(viewer: &Viewer, canvas: &mut C) -> io::Result<()> {
    let config = viewer.config();
    let projection = config.projection();
    let (width, height) = canvas.size();
    let width = width as f32;
    let height = height as f32;

    canvas.clear(config.background);

    for entry in viewer.meshes() {
        let mesh = &entry.wireframe;

        if entry.show_faces {
            for face in mesh.faces_back_to_front() {
                let shaded = shading::shade_face(
                    mesh.nodes[face.nodes[0]].xyz(),
                    mesh.nodes[face.nodes[1]].xyz(),
                    mesh.nodes[face.nodes[2]].xyz(),
                    face.color,
                    viewer.light_vector(),
                    &config.light_color,
                    &config.view_vector,
                );
                if let Some(color) = shaded {
                    let points: Vec<(f32, f32)> = face
                        .nodes
                        .iter()
                        .map(|&node| (mesh.nodes[node].x, mesh.nodes[node].y))
                        .collect();
                    canvas.fill_polygon(&points, color);
                }
            }
        }

        if entry.show_edges {
            for edge in &mesh.edges {
                let start = projection.to_screen(&mesh.nodes[edge.start], width, height);
                let end = projection.to_screen(&mesh.nodes[edge.end], width, height);
                if let (Some(start), Some(end)) = (start, end) {
                    canvas.draw_line(start, end, edge.color);
                }
            }
        }

        if entry.show_nodes {
            for node in &mesh.nodes {
                if let Some(center) = projection.to_screen(node, width, height) {
                    canvas.fill_circle(center, config.node_radius, config.node_color);
                }
            }
        }
    }

    canvas.present()
}

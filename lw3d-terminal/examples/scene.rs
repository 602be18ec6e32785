/// Example: a composed scene, a spheroid beside a tilted cuboid under
/// one movable light.
///
/// Usage: cargo run --example scene
use anyhow::Result;
use crossterm::terminal;
use lw3d_core::{shapes, Rgb, Viewer, ViewerConfig};
use lw3d_terminal::TerminalApp;
use nalgebra::Vector3;

fn main() -> Result<()> {
    env_logger::init();

    let (columns, rows) = terminal::size()?;
    let width = u32::from(columns);
    let height = u32::from(rows.saturating_sub(1)) * 2;
    let w = width as f32;
    let h = height as f32;

    let config = ViewerConfig {
        width,
        height,
        focal_length: Some(4.0 * h),
        show_edges: true,
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config)?;

    let mut ball = shapes::spheroid(
        Vector3::new(w * 0.35, h * 0.5, 0.0),
        Vector3::new(h * 0.3, h * 0.3, h * 0.3),
        26,
        Rgb::new(250, 120, 40),
    )?;
    ball.add_edges_from_faces(Rgb::new(90, 90, 90));
    viewer.add_mesh("ball", ball)?;

    let size = h * 0.45;
    let mut block = shapes::cuboid(
        Vector3::new(w * 0.6, (h - size) / 2.0, 0.0),
        Vector3::new(size, size, size),
        Rgb::new(90, 170, 250),
    );
    if let Some(center) = block.center() {
        // Tilt the cuboid so three of its faces catch the light
        block.rotate_y_about(center, 0.5);
        block.rotate_x_about(center, 0.35);
    }
    block.add_edges_from_faces(Rgb::new(90, 90, 90));
    viewer.add_mesh("block", block)?;

    let mut app = TerminalApp::new(viewer);
    app.run()?;
    Ok(())
}

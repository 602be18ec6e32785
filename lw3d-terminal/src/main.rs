/// LW3D terminal viewer
///
/// Renders an OBJ or STL mesh, or a striped demo sphere when no file is
/// given, with interactive light rotation.
use std::{env, fs, process};

use anyhow::{bail, Context, Result};
use crossterm::terminal;
use lw3d_core::{obj, shapes, stl, Rgb, Viewer, ViewerConfig, Wireframe};
use lw3d_terminal::TerminalApp;
use nalgebra::Vector3;

const USAGE: &str = "lw3d [mesh.obj | mesh.stl] [--edges] [--nodes] [--no-faces] [--perspective <focal>]";

/// Tessellation bands of the demo sphere.
const DEMO_RESOLUTION: usize = 52;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

struct Options {
    path: Option<String>,
    show_nodes: bool,
    show_edges: bool,
    show_faces: bool,
    focal_length: Option<f32>,
}

fn run() -> Result<()> {
    let options = parse_args()?;

    // One terminal row is reserved for the status line; every other row
    // shows two pixel rows.
    let (columns, rows) = terminal::size().context("failed to query terminal size")?;
    let width = u32::from(columns);
    let height = u32::from(rows.saturating_sub(1)) * 2;

    let mut mesh = match &options.path {
        Some(path) => {
            let mut mesh = load_mesh(path)?;
            fit_to_surface(&mut mesh, width, height)
                .with_context(|| format!("{path} contains no vertices"))?;
            mesh
        }
        None => demo_sphere(width, height)?,
    };
    if options.show_edges {
        mesh.add_edges_from_faces(Rgb::new(90, 90, 90));
    }

    let config = ViewerConfig {
        width,
        height,
        node_radius: 1.5,
        focal_length: options.focal_length,
        show_nodes: options.show_nodes,
        show_edges: options.show_edges,
        show_faces: options.show_faces,
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config)?;
    viewer.add_mesh(options.path.as_deref().unwrap_or("sphere"), mesh)?;

    let mut app = TerminalApp::new(viewer);
    app.run()?;
    Ok(())
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        path: None,
        show_nodes: false,
        show_edges: false,
        show_faces: true,
        focal_length: None,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--nodes" => options.show_nodes = true,
            "--edges" => options.show_edges = true,
            "--no-faces" => options.show_faces = false,
            "--perspective" => {
                let focal = args.next().context("--perspective needs a focal length")?;
                options.focal_length = Some(
                    focal
                        .parse()
                        .with_context(|| format!("bad focal length {focal:?}"))?,
                );
            }
            "--help" | "-h" => bail!("LW3D terminal mesh viewer\n\nUsage:\n  {USAGE}"),
            _ if arg.starts_with('-') => bail!("unknown option {arg:?}\n\nUsage:\n  {USAGE}"),
            _ => {
                if options.path.is_some() {
                    bail!("more than one mesh file given\n\nUsage:\n  {USAGE}");
                }
                options.path = Some(arg);
            }
        }
    }

    Ok(options)
}

fn load_mesh(path: &str) -> Result<Wireframe> {
    let lower = path.to_lowercase();
    let mesh = if lower.ends_with(".obj") {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        obj::parse_obj(&text).with_context(|| format!("failed to parse {path}"))?
    } else if lower.ends_with(".stl") {
        let data = fs::read(path).with_context(|| format!("failed to read {path}"))?;
        stl::parse_stl(&data).with_context(|| format!("failed to parse {path}"))?
    } else {
        bail!("unsupported mesh format {path:?}, expected .obj or .stl");
    };

    log::info!(
        "loaded {}: {} nodes, {} faces",
        path,
        mesh.nodes.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Flip the model's y-up axis into surface orientation, then center and
/// scale it to sit on the surface with a margin.
fn fit_to_surface(mesh: &mut Wireframe, width: u32, height: u32) -> Option<()> {
    let (low, high) = mesh.bounds()?;
    let center = (low + high) * 0.5;
    mesh.mirror_y(center.y);

    let target = Vector3::new(width as f32 / 2.0, height as f32 / 2.0, 0.0);
    mesh.translate(target - center);

    let extent = high - low;
    let widest = (extent.x / width as f32).max(extent.y / height as f32);
    if widest > f32::EPSILON {
        mesh.scale_about(target, 0.8 / widest);
    }
    Some(())
}

/// Sphere with red bands two quad rings tall, shown when no mesh file is
/// given.
fn demo_sphere(width: u32, height: u32) -> Result<Wireframe> {
    let center = Vector3::new(width as f32 / 2.0, height as f32 / 2.0, 20.0);
    let radius = 0.4 * width.min(height) as f32;
    let mut sphere = shapes::spheroid(
        center,
        Vector3::new(radius, radius, radius),
        DEMO_RESOLUTION,
        Rgb::new(250, 250, 250),
    )?;

    for (index, face) in sphere.faces.iter_mut().enumerate() {
        if (index / DEMO_RESOLUTION) % 4 < 2 {
            face.color = Rgb::new(250, 0, 0);
        }
    }

    Ok(sphere)
}

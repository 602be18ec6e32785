/// LW3D Core Library - mesh model, shading and projection logic
///
/// This library provides the stateless core of the viewer: wireframe
/// meshes with colored edges and faces, flat shading under a movable
/// light, screen projection, the painter's algorithm frame renderer,
/// and OBJ/STL import.

pub mod canvas;
pub mod color;
pub mod error;
pub mod light;
pub mod obj;
pub mod projection;
pub mod render;
pub mod shading;
pub mod shapes;
pub mod stl;
pub mod transform;
pub mod viewer;
pub mod wireframe;

// Re-export commonly used types
pub use canvas::Canvas;
pub use color::Rgb;
pub use error::{ConfigError, GeometryError, ObjError, StlError};
pub use light::{LightControl, LIGHT_STEP};
pub use projection::Projection;
pub use render::render_frame;
pub use viewer::{MeshEntry, Viewer, ViewerConfig};
pub use wireframe::{Edge, Face, Wireframe};

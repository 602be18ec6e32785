/// Viewer state: validated configuration, scene meshes and the movable light
use log::debug;
use nalgebra::Vector3;

use crate::color::Rgb;
use crate::error::{ConfigError, GeometryError};
use crate::light::{self, LightControl};
use crate::projection::Projection;
use crate::wireframe::Wireframe;

/// Static viewer settings, validated when the viewer is built.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Surface size in pixels.
    pub width: u32,
    pub height: u32,
    /// Fill color behind all meshes.
    pub background: Rgb,
    /// Color and radius of node markers, when shown.
    pub node_color: Rgb,
    pub node_radius: f32,
    /// Direction from the scene toward the viewer.
    pub view_vector: Vector3<f32>,
    /// Starting light direction.
    pub light_vector: Vector3<f32>,
    /// Per-channel light intensity in 0..=1.
    pub light_color: Vector3<f32>,
    /// Perspective focal length; `None` projects orthographically.
    pub focal_length: Option<f32>,
    /// Display toggles copied onto meshes as they are added.
    pub show_nodes: bool,
    pub show_edges: bool,
    pub show_faces: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            background: Rgb::new(10, 10, 50),
            node_color: Rgb::new(250, 250, 250),
            node_radius: 4.0,
            view_vector: Vector3::new(0.0, 0.0, -1.0),
            light_vector: Vector3::new(0.0, 0.0, -1.0),
            light_color: Vector3::new(1.0, 1.0, 1.0),
            focal_length: None,
            show_nodes: false,
            show_edges: true,
            show_faces: true,
        }
    }
}

impl ViewerConfig {
    /// Projection selected by the config.
    pub fn projection(&self) -> Projection {
        match self.focal_length {
            Some(focal) => Projection::Perspective { focal },
            None => Projection::Orthographic,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(focal) = self.focal_length {
            if !focal.is_finite() || focal <= 0.0 {
                return Err(ConfigError::FocalLength(focal));
            }
        }
        let channels = self.light_color;
        if !channels.iter().all(|channel| (0.0..=1.0).contains(channel)) {
            return Err(ConfigError::LightColor(channels.x, channels.y, channels.z));
        }
        if self.view_vector.norm() <= f32::EPSILON {
            return Err(ConfigError::ZeroViewVector);
        }
        if self.light_vector.norm() <= f32::EPSILON {
            return Err(ConfigError::ZeroLightVector);
        }
        Ok(())
    }
}

/// One mesh in the scene, carrying its own display toggles.
#[derive(Debug, Clone)]
pub struct MeshEntry {
    pub name: String,
    pub wireframe: Wireframe,
    pub show_nodes: bool,
    pub show_edges: bool,
    pub show_faces: bool,
}

/// The whole session state the renderer reads each frame.
///
/// Meshes keep their insertion order; only the light direction mutates
/// between frames, and only through [`Viewer::control_light`].
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    light_vector: Vector3<f32>,
    meshes: Vec<MeshEntry>,
}

impl Viewer {
    /// Build a viewer, normalizing the view and light directions.
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut config = config;
        config.view_vector = config.view_vector.normalize();
        config.light_vector = config.light_vector.normalize();
        let light_vector = config.light_vector;
        Ok(Self {
            config,
            light_vector,
            meshes: Vec::new(),
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Current light direction.
    pub fn light_vector(&self) -> &Vector3<f32> {
        &self.light_vector
    }

    /// Nudge the light direction by one control step.
    pub fn control_light(&mut self, control: LightControl) {
        light::rotate_light(&mut self.light_vector, control);
    }

    /// Add a mesh to the scene under `name`, validating its indices
    /// first. Display toggles start from the config defaults; the
    /// returned entry can be used to adjust them.
    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        wireframe: Wireframe,
    ) -> Result<&mut MeshEntry, GeometryError> {
        wireframe.validate()?;
        let name = name.into();
        debug!(
            "mesh {:?}: {} nodes, {} edges, {} faces",
            name,
            wireframe.nodes.len(),
            wireframe.edges.len(),
            wireframe.faces.len()
        );
        self.meshes.push(MeshEntry {
            name,
            wireframe,
            show_nodes: self.config.show_nodes,
            show_edges: self.config.show_edges,
            show_faces: self.config.show_faces,
        });
        let added = self.meshes.len() - 1;
        Ok(&mut self.meshes[added])
    }

    /// Scene meshes in insertion order.
    pub fn meshes(&self) -> &[MeshEntry] {
        &self.meshes
    }

    /// First mesh registered under `name`.
    pub fn mesh(&self, name: &str) -> Option<&MeshEntry> {
        self.meshes.iter().find(|entry| entry.name == name)
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut MeshEntry> {
        self.meshes.iter_mut().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Wireframe {
        let mut mesh = Wireframe::new();
        mesh.add_nodes([(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)]);
        mesh.add_face(vec![0, 1, 2], Rgb::WHITE);
        mesh
    }

    #[test]
    fn test_default_config_builds() {
        let viewer = Viewer::new(ViewerConfig::default()).unwrap();
        assert_eq!(viewer.config().projection(), Projection::Orthographic);
        assert_relative_eq!(*viewer.light_vector(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let config = ViewerConfig {
            width: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(
            Viewer::new(config).err(),
            Some(ConfigError::EmptySurface {
                width: 0,
                height: 400,
            })
        );
    }

    #[test]
    fn test_non_positive_focal_length_is_rejected() {
        let config = ViewerConfig {
            focal_length: Some(0.0),
            ..ViewerConfig::default()
        };
        assert_eq!(Viewer::new(config).err(), Some(ConfigError::FocalLength(0.0)));
    }

    #[test]
    fn test_out_of_range_light_color_is_rejected() {
        let config = ViewerConfig {
            light_color: Vector3::new(0.5, 1.5, 0.5),
            ..ViewerConfig::default()
        };
        assert!(matches!(
            Viewer::new(config).err(),
            Some(ConfigError::LightColor(_, _, _))
        ));
    }

    #[test]
    fn test_zero_view_vector_is_rejected() {
        let config = ViewerConfig {
            view_vector: Vector3::zeros(),
            ..ViewerConfig::default()
        };
        assert_eq!(Viewer::new(config).err(), Some(ConfigError::ZeroViewVector));
    }

    #[test]
    fn test_directions_are_normalized() {
        let config = ViewerConfig {
            view_vector: Vector3::new(0.0, 0.0, -5.0),
            light_vector: Vector3::new(0.0, 3.0, 0.0),
            ..ViewerConfig::default()
        };
        let viewer = Viewer::new(config).unwrap();
        assert_relative_eq!(viewer.config().view_vector.norm(), 1.0);
        assert_relative_eq!(viewer.light_vector().norm(), 1.0);
    }

    #[test]
    fn test_add_mesh_validates_geometry() {
        let mut viewer = Viewer::new(ViewerConfig::default()).unwrap();
        let mut bad = triangle();
        bad.add_face(vec![0, 1, 7], Rgb::WHITE);
        assert!(viewer.add_mesh("bad", bad).is_err());
        assert!(viewer.meshes().is_empty());
    }

    #[test]
    fn test_add_mesh_rejects_overflowed_file_coordinates() {
        // "1e999" parses to infinity; insertion is where it must stop.
        let mesh = crate::obj::parse_obj("v 1e999 0 0\nv 0 1 0\nl 1 2\n").unwrap();
        let mut viewer = Viewer::new(ViewerConfig::default()).unwrap();
        assert_eq!(
            viewer.add_mesh("overflow", mesh).err(),
            Some(GeometryError::NodeNotFinite(0))
        );
        assert!(viewer.meshes().is_empty());
    }

    #[test]
    fn test_add_mesh_copies_config_toggles() {
        let config = ViewerConfig {
            show_nodes: true,
            show_edges: false,
            ..ViewerConfig::default()
        };
        let mut viewer = Viewer::new(config).unwrap();
        viewer.add_mesh("tri", triangle()).unwrap();
        let entry = viewer.mesh("tri").unwrap();
        assert!(entry.show_nodes);
        assert!(!entry.show_edges);
        assert!(entry.show_faces);
    }

    #[test]
    fn test_control_light_moves_only_the_light() {
        let mut viewer = Viewer::new(ViewerConfig::default()).unwrap();
        let view_before = viewer.config().view_vector;
        viewer.control_light(LightControl::YawLeft);
        assert!(viewer.light_vector().x < 0.0);
        assert_eq!(viewer.config().view_vector, view_before);
    }

    #[test]
    fn test_mesh_lookup_by_name() {
        let mut viewer = Viewer::new(ViewerConfig::default()).unwrap();
        viewer.add_mesh("a", triangle()).unwrap();
        viewer.add_mesh("b", triangle()).unwrap();
        viewer.mesh_mut("b").unwrap().show_faces = false;
        assert!(viewer.mesh("a").unwrap().show_faces);
        assert!(!viewer.mesh("b").unwrap().show_faces);
    }
}

/// Node projection from mesh space onto the drawing surface
use nalgebra::Vector4;

/// How nodes land on the surface.
///
/// Mesh space is already surface-aligned: x right, y down, z away from
/// the viewer. Orthographic projection keeps x and y as they are;
/// perspective pulls them toward the surface center by
/// `focal / (focal + z)`, so deeper nodes crowd inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic,
    Perspective { focal: f32 },
}

impl Projection {
    /// Screen position of a node, or `None` when perspective places the
    /// node at or behind the eye plane `z = -focal`.
    pub fn to_screen(&self, node: &Vector4<f32>, width: f32, height: f32) -> Option<(f32, f32)> {
        match *self {
            Projection::Orthographic => Some((node.x, node.y)),
            Projection::Perspective { focal } => {
                if node.z <= -focal {
                    return None;
                }
                let factor = focal / (focal + node.z);
                let x = width / 2.0 + factor * (node.x - width / 2.0);
                let y = height / 2.0 + factor * (node.y - height / 2.0);
                Some((x, y))
            }
        }
    }
}

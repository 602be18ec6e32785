/// Homogeneous transformation matrices for meshes and the light vector
use nalgebra::{Matrix4, Vector3};

/// Rotation about the x axis by `theta` radians.
pub fn rotation_x(theta: f32) -> Matrix4<f32> {
    Matrix4::new_rotation(Vector3::x() * theta)
}

/// Rotation about the y axis by `theta` radians.
pub fn rotation_y(theta: f32) -> Matrix4<f32> {
    Matrix4::new_rotation(Vector3::y() * theta)
}

/// Rotation about the z axis by `theta` radians.
pub fn rotation_z(theta: f32) -> Matrix4<f32> {
    Matrix4::new_rotation(Vector3::z() * theta)
}

/// Translation by `offset`.
pub fn translation(offset: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(&offset)
}

/// Uniform scaling by `factor` about the origin.
pub fn scaling(factor: f32) -> Matrix4<f32> {
    Matrix4::new_scaling(factor)
}

/// Conjugate a transform so it acts about `center` instead of the origin.
pub fn about(center: Vector3<f32>, transform: &Matrix4<f32>) -> Matrix4<f32> {
    translation(center) * transform * translation(-center)
}

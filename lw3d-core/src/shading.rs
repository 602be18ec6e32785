/// Flat shading: ambient, diffuse and specular terms per face
use nalgebra::Vector3;

use crate::color::Rgb;

/// Ambient reflection coefficient.
pub const K_AMBIENT: f32 = 0.1;
/// Diffuse reflection coefficient.
pub const K_DIFFUSE: f32 = 0.2;
/// Specular reflection coefficient.
pub const K_SPECULAR: f32 = 0.7;
/// Specular exponent.
pub const GLOSS: i32 = 5;

/// Unit normal of the plane spanned by three points, taken from the
/// cross product of the edges leaving `p0`.
///
/// Returns `None` when the points are colinear or coincident.
pub fn face_normal(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
) -> Option<Vector3<f32>> {
    (p1 - p0).cross(&(p2 - p0)).try_normalize(f32::EPSILON)
}

/// Shade one face, or return `None` when it must not be drawn.
///
/// `p0..p2` are the first three nodes of the face and `base` its
/// intrinsic color with channels in 0..=255. `light_color` carries
/// per-channel intensities in 0..=1. The face is culled unless its
/// normal points strictly toward the viewer; a degenerate face with no
/// normal is culled too.
///
/// Every face keeps the ambient floor. Faces turned toward the light
/// also gain a diffuse term and a gloss-5 specular highlight off the
/// mirror reflection of the light about the normal. Each term is clamped
/// into the displayable range on its own before the terms are summed,
/// and the sum is clamped again, so one overbright term cannot borrow
/// headroom from another.
pub fn shade_face(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    base: Rgb,
    light_vector: &Vector3<f32>,
    light_color: &Vector3<f32>,
    view_vector: &Vector3<f32>,
) -> Option<Rgb> {
    let normal = face_normal(p0, p1, p2)?;
    if normal.dot(view_vector) <= 0.0 {
        return None;
    }

    let tinted = light_color.component_mul(&base.to_vector());
    let mut total = K_AMBIENT * tinted;

    let brightness = normal.dot(light_vector);
    if brightness >= 0.0 {
        let diffuse = clamp_channels(K_DIFFUSE * brightness * tinted);

        let reflection = normal * (2.0 * brightness) - light_vector;
        // A reflection pointing away from the viewer contributes no
        // highlight; the alignment is floored at zero before the power.
        let alignment = view_vector.dot(&reflection).max(0.0);
        let specular = clamp_channels(K_SPECULAR * alignment.powi(GLOSS) * tinted);

        total += diffuse + specular;
    }

    Some(Rgb::from_vector_clamped(&total))
}

fn clamp_channels(channels: Vector3<f32>) -> Vector3<f32> {
    channels.map(|channel| channel.clamp(0.0, 255.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Points spanning the z = 0 plane with the normal on +z.
    fn facing_plane() -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        (
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_face_normal_is_unit_length() {
        let normal = face_normal(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 10.0, 0.0),
        )
        .unwrap();
        assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_face_normal_of_colinear_points_is_none() {
        let normal = face_normal(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        assert!(normal.is_none());
    }

    #[test]
    fn test_backface_is_culled() {
        let (p0, p1, p2) = facing_plane();
        let shaded = shade_face(
            p0,
            p1,
            p2,
            Rgb::WHITE,
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(0.0, 0.0, -1.0),
        );
        assert!(shaded.is_none());
    }

    #[test]
    fn test_grazing_face_is_culled() {
        let (p0, p1, p2) = facing_plane();
        // View at exactly 90 degrees to the normal.
        let shaded = shade_face(
            p0,
            p1,
            p2,
            Rgb::WHITE,
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(1.0, 0.0, 0.0),
        );
        assert!(shaded.is_none());
    }

    #[test]
    fn test_full_alignment_reproduces_base_color() {
        let (p0, p1, p2) = facing_plane();
        let shaded = shade_face(
            p0,
            p1,
            p2,
            Rgb::new(200, 0, 0),
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(0.0, 0.0, 1.0),
        );
        // 0.1 ambient + 0.2 diffuse + 0.7 specular, all fully aligned.
        assert_eq!(shaded, Some(Rgb::new(200, 0, 0)));
    }

    #[test]
    fn test_shadowed_face_keeps_ambient_only() {
        let (p0, p1, p2) = facing_plane();
        let shaded = shade_face(
            p0,
            p1,
            p2,
            Rgb::new(200, 0, 0),
            &Vector3::new(0.0, 0.0, -1.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(shaded, Some(Rgb::new(20, 0, 0)));
    }

    #[test]
    fn test_light_color_tints_every_term() {
        let (p0, p1, p2) = facing_plane();
        let shaded = shade_face(
            p0,
            p1,
            p2,
            Rgb::new(200, 200, 200),
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(1.0, 0.5, 0.0),
            &Vector3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(shaded, Some(Rgb::new(200, 100, 0)));
    }
}

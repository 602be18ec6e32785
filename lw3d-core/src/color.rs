/// RGB color type shared by meshes, lights and drawing surfaces
use nalgebra::Vector3;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel values as floats in the 0..=255 range, for shading math.
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Build a color from float channels, clamping each into 0..=255.
    pub fn from_vector_clamped(channels: &Vector3<f32>) -> Self {
        Self {
            r: clamp_channel(channels.x),
            g: clamp_channel(channels.y),
            b: clamp_channel(channels.z),
        }
    }

    /// Blend `other` over this color with the given opacity in 0..=1.
    pub fn blend(self, other: Rgb, opacity: f32) -> Rgb {
        let opacity = opacity.clamp(0.0, 1.0);
        let mix = |under: u8, over: u8| {
            clamp_channel(under as f32 * (1.0 - opacity) + over as f32 * opacity)
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

fn clamp_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

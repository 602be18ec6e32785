/// Drawing surface abstraction used by the frame renderer
use std::io;

use crate::color::Rgb;

/// A 2D surface the renderer paints meshes onto.
///
/// Coordinates are surface pixels, x growing right and y growing down;
/// fractional positions are meaningful to implementations that
/// anti-alias. Primitives clip silently at the surface boundary.
pub trait Canvas {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Flood the whole surface with one color.
    fn clear(&mut self, color: Rgb);

    /// Fill the polygon spanned by `points` in order.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb);

    /// Draw an anti-aliased line between two points.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb);

    /// Fill a circle of `radius` pixels around `center`.
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb);

    /// Make the drawn frame visible.
    fn present(&mut self) -> io::Result<()>;
}

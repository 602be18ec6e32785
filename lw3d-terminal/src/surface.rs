/// Terminal pixel surface drawn with half-block glyphs
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use lw3d_core::{Canvas, Rgb};
use std::io::{self, Write};

/// Upper-half-block glyph. The foreground color paints the upper pixel
/// of a cell and the background color the lower one, so every terminal
/// row carries two rows of roughly square pixels.
const HALF_BLOCK: char = '▀';

/// Color pixel buffer flushed to a terminal writer as half-block cells.
pub struct TerminalCanvas<W: Write> {
    writer: W,
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    background: Rgb,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(writer: W, width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            writer,
            width,
            height,
            pixels: vec![Rgb::BLACK; size],
            background: Rgb::BLACK,
        }
    }

    /// Terminal rows needed to show the full pixel grid.
    pub fn cell_rows(&self) -> u16 {
        ((self.height + 1) / 2) as u16
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = self.pixels[index].blend(color, coverage);
        }
    }

    /// Paint the pixels of row `y` whose centers lie in `[left, right)`.
    fn fill_span(&mut self, y: i32, left: f32, right: f32, color: Rgb) {
        let first = ((left - 0.5).ceil() as i32).max(0);
        for x in first..self.width as i32 {
            if x as f32 + 0.5 >= right {
                break;
            }
            self.set_pixel(x, y, color);
        }
    }

    fn plot(&mut self, steep: bool, x: i32, y: i32, color: Rgb, coverage: f32) {
        if steep {
            self.blend_pixel(y, x, color, coverage);
        } else {
            self.blend_pixel(x, y, color, coverage);
        }
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.pixels.fill(color);
    }

    /// Even-odd scanline fill sampled at pixel centers.
    ///
    /// Edges crossing a scanline are tested on a half-open interval so a
    /// vertex shared by two edges counts once, and each sorted crossing
    /// pair becomes a half-open pixel span. Adjacent faces that share an
    /// edge therefore never paint the same pixel twice.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        if points.len() < 3 {
            return;
        }

        let min_y = points.iter().fold(f32::INFINITY, |low, p| low.min(p.1));
        let max_y = points.iter().fold(f32::NEG_INFINITY, |high, p| high.max(p.1));
        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(self.height as i32 - 1);

        let mut crossings = Vec::new();
        for y in y_start..=y_end {
            let y_center = y as f32 + 0.5;

            crossings.clear();
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= y_center && y_center < y1) || (y1 <= y_center && y_center < y0) {
                    let t = (y_center - y0) / (y1 - y0);
                    crossings.push(x0 + (x1 - x0) * t);
                }
            }

            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                self.fill_span(y, pair[0], pair[1], color);
            }
        }
    }

    /// Wu's anti-aliased line: fractional coverage of the two pixels
    /// straddling the ideal line is blended over whatever is beneath.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb) {
        let (mut x0, mut y0) = from;
        let (mut x1, mut y1) = to;

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

        // First endpoint
        let x_end = x0.round();
        let y_end = y0 + gradient * (x_end - x0);
        let x_gap = 1.0 - fractional(x0 + 0.5);
        let x_pixel_1 = x_end as i32;
        let y_pixel_1 = y_end.floor() as i32;
        self.plot(steep, x_pixel_1, y_pixel_1, color, (1.0 - fractional(y_end)) * x_gap);
        self.plot(steep, x_pixel_1, y_pixel_1 + 1, color, fractional(y_end) * x_gap);
        let mut intercept = y_end + gradient;

        // Second endpoint
        let x_end = x1.round();
        let y_end = y1 + gradient * (x_end - x1);
        let x_gap = fractional(x1 + 0.5);
        let x_pixel_2 = x_end as i32;
        let y_pixel_2 = y_end.floor() as i32;
        self.plot(steep, x_pixel_2, y_pixel_2, color, (1.0 - fractional(y_end)) * x_gap);
        self.plot(steep, x_pixel_2, y_pixel_2 + 1, color, fractional(y_end) * x_gap);

        // Interior columns, clamped to the grid along the major axis.
        // Endpoints far outside the surface must not stretch the walk.
        let limit = if steep { self.height as i32 } else { self.width as i32 };
        let start = x_pixel_1 + 1;
        let first = start.max(0);
        intercept += gradient * (first - start) as f32;
        for x in first..x_pixel_2.min(limit) {
            let row = intercept.floor() as i32;
            self.plot(steep, x, row, color, 1.0 - fractional(intercept));
            self.plot(steep, x, row + 1, color, fractional(intercept));
            intercept += gradient;
        }
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }

        let (cx, cy) = center;
        let y_start = ((cy - radius).floor() as i32).max(0);
        let y_end = ((cy + radius).ceil() as i32).min(self.height as i32 - 1);

        for y in y_start..=y_end {
            let offset = y as f32 + 0.5 - cy;
            let reach = radius * radius - offset * offset;
            if reach < 0.0 {
                continue;
            }
            let reach = reach.sqrt();
            self.fill_span(y, cx - reach, cx + reach, color);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut foreground = None;
        let mut background = None;

        for row in 0..self.cell_rows() {
            self.writer.queue(MoveTo(0, row))?;
            let upper_y = row as u32 * 2;
            for x in 0..self.width {
                let upper = self.pixel(x, upper_y);
                let lower = if upper_y + 1 < self.height {
                    self.pixel(x, upper_y + 1)
                } else {
                    self.background
                };
                if foreground != Some(upper) {
                    self.writer.queue(SetForegroundColor(terminal_color(upper)))?;
                    foreground = Some(upper);
                }
                if background != Some(lower) {
                    self.writer.queue(SetBackgroundColor(terminal_color(lower)))?;
                    background = Some(lower);
                }
                self.writer.queue(Print(HALF_BLOCK))?;
            }
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}

fn terminal_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Fractional part measured from the floor, non-negative for any input.
fn fractional(value: f32) -> f32 {
    value - value.floor()
}

//! Software RGBA drawing surface.
//!
//! `PixelCanvas` follows the observable behavior of a 2D canvas context
//! closely enough for a generator module not to notice the difference:
//! unparseable styles are ignored, out-of-range geometry is clipped, and a
//! resize wipes both the pixels and the current styles.
//!
//! Rasterization is aliased: a pixel is painted when its center falls
//! inside the shape. Painting replaces pixels; there is no blending.

use std::io::{self, Write};

use crate::color::{self, Rgba};
use crate::traits::DrawingSurface;

/// Initial width of a fresh canvas.
pub const DEFAULT_WIDTH: u32 = 300;
/// Initial height of a fresh canvas.
pub const DEFAULT_HEIGHT: u32 = 150;
/// Stroke width used by `draw_line`.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
/// Largest accepted side length; larger requests are clamped.
pub const MAX_DIMENSION: u32 = 16_384;
/// Default cap on `width * height` (64 MiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 24;

/// RGBA pixel surface.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    fill: Rgba,
    stroke: Rgba,
    line_width: f64,
    max_pixels: u64,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl PixelCanvas {
    /// Create a transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::sized(width, height, DEFAULT_LINE_WIDTH, MAX_PIXELS)
    }

    /// Allocate a blank canvas, clamping each side to `MAX_DIMENSION` and
    /// then the height so the area stays within `max_pixels`.
    fn sized(width: u32, height: u32, line_width: f64, max_pixels: u64) -> Self {
        let width = width.min(MAX_DIMENSION);
        let height = match max_pixels.checked_div(width as u64) {
            Some(rows) => height.min(MAX_DIMENSION).min(rows.min(u32::MAX as u64) as u32),
            None => height.min(MAX_DIMENSION),
        };
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width,
            max_pixels,
        }
    }

    /// Cap the pixel count of every later resize. The current buffer is
    /// reallocated under the new cap.
    pub fn with_max_pixels(self, max_pixels: u64) -> Self {
        Self::sized(self.width, self.height, self.line_width, max_pixels)
    }

    pub fn max_pixels(&self) -> u64 {
        self.max_pixels
    }

    /// Use a different fixed stroke width. Non-positive widths are ignored.
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        if line_width.is_finite() && line_width > 0.0 {
            self.line_width = line_width;
        }
        self
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn fill_style(&self) -> Rgba {
        self.fill
    }

    pub fn stroke_style(&self) -> Rgba {
        self.stroke
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let p = &self.pixels[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Number of pixels currently equal to `color`.
    pub fn count(&self, color: Rgba) -> usize {
        let wanted = color.to_array();
        self.pixels.chunks_exact(4).filter(|p| **p == wanted[..]).count()
    }

    /// Write the surface as a binary PPM (P6), composited over white.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks_exact(self.width.max(1) as usize * 4) {
            row.clear();
            for p in line.chunks_exact(4) {
                let a = p[3] as u32;
                for &c in &p[..3] {
                    row.push(((c as u32 * a + 255 * (255 - a)) / 255) as u8);
                }
            }
            out.write_all(&row)?;
        }
        out.flush()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Pixel index range whose centers lie in `[lo, hi)` along one axis.
    fn covered(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
        let clamp = |v: f64| v.max(0.0).min(limit as f64) as u32;
        (clamp((lo - 0.5).ceil()), clamp((hi - 0.5).ceil()))
    }
}

impl DrawingSurface for PixelCanvas {
    fn set_fill_style(&mut self, style: &str) {
        if let Some(c) = color::parse(style) {
            self.fill = c;
        }
    }

    fn set_stroke_style(&mut self, style: &str) {
        if let Some(c) = color::parse(style) {
            self.stroke = c;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            return;
        }
        let (x0, x1) = Self::covered(x.min(x + w), x.max(x + w), self.width);
        let (y0, y1) = Self::covered(y.min(y + h), y.max(y + h), self.height);
        let fill = self.fill;
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, fill);
            }
        }
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return;
        }
        let (dx, dy) = (x2 - x1, y2 - y1);
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return;
        }
        let half = self.line_width / 2.0;
        let (bx0, bx1) = Self::covered(x1.min(x2) - half, x1.max(x2) + half + 1.0, self.width);
        let (by0, by1) = Self::covered(y1.min(y2) - half, y1.max(y2) + half + 1.0, self.height);
        let stroke = self.stroke;
        for py in by0..by1 {
            for px in bx0..bx1 {
                let (cx, cy) = (px as f64 + 0.5, py as f64 + 0.5);
                // butt caps: nothing past either endpoint
                let t = ((cx - x1) * dx + (cy - y1) * dy) / len_sq;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let (ex, ey) = (cx - (x1 + t * dx), cy - (y1 + t * dy));
                if ex * ex + ey * ey <= half * half {
                    self.put(px, py, stroke);
                }
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::sized(width, height, self.line_width, self.max_pixels);
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    #[test]
    fn test_default_canvas() {
        let canvas = PixelCanvas::default();
        assert_eq!((canvas.width(), canvas.height()), (300, 150));
        assert_eq!(canvas.count(Rgba::TRANSPARENT), 300 * 150);
        assert_eq!(canvas.fill_style(), Rgba::BLACK);
    }

    #[test]
    fn test_resize_then_fill_all_paints_whole_surface() {
        let mut canvas = PixelCanvas::default();
        canvas.set_fill_style("red");
        canvas.fill_rect(0.0, 0.0, 50.0, 50.0);

        canvas.resize(300, 200);
        canvas.set_fill_style("blue");
        canvas.fill_all();

        assert_eq!((canvas.width(), canvas.height()), (300, 200));
        assert_eq!(canvas.count(BLUE), 300 * 200);
    }

    #[test]
    fn test_resize_clears_and_resets_styles() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_fill_style("blue");
        canvas.fill_all();
        canvas.resize(4, 4);
        assert_eq!(canvas.count(Rgba::TRANSPARENT), 16);
        assert_eq!(canvas.fill_style(), Rgba::BLACK);
    }

    #[test]
    fn test_fill_rect_clips_and_normalizes() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_fill_style("blue");
        canvas.fill_rect(8.0, 8.0, 100.0, 100.0);
        assert_eq!(canvas.count(BLUE), 4);

        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_fill_style("blue");
        canvas.fill_rect(4.0, 4.0, -2.0, -2.0);
        assert_eq!(canvas.count(BLUE), 4);
        assert_eq!(canvas.pixel(2, 2), Some(BLUE));
        assert_eq!(canvas.pixel(4, 4), Some(Rgba::TRANSPARENT));

        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_rect(-50.0, -50.0, 10.0, 10.0);
        canvas.fill_rect(f64::NAN, 0.0, 5.0, 5.0);
        assert_eq!(canvas.count(Rgba::TRANSPARENT), 100);
    }

    #[test]
    fn test_invalid_style_is_ignored() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.set_fill_style("blue");
        canvas.set_fill_style("not a color");
        canvas.set_fill_style("");
        assert_eq!(canvas.fill_style(), BLUE);
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = PixelCanvas::new(10, 10).with_line_width(1.0);
        canvas.set_stroke_style("white");
        canvas.draw_line(0.0, 5.5, 10.0, 5.5);
        assert_eq!(canvas.count(Rgba::WHITE), 10);
        assert_eq!(canvas.pixel(3, 5), Some(Rgba::WHITE));
        assert_eq!(canvas.pixel(3, 4), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_line_respects_endpoints_and_clipping() {
        let mut canvas = PixelCanvas::new(10, 10).with_line_width(1.0);
        canvas.set_stroke_style("white");
        canvas.draw_line(2.0, 0.5, 4.0, 0.5);
        assert_eq!(canvas.count(Rgba::WHITE), 2);

        canvas.draw_line(-1000.0, 9.5, 1000.0, 9.5);
        assert_eq!(canvas.count(Rgba::WHITE), 12);

        canvas.draw_line(3.0, 3.0, 3.0, 3.0);
        assert_eq!(canvas.count(Rgba::WHITE), 12);
    }

    #[test]
    fn test_huge_resize_is_clamped() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.resize(u32::MAX, 1);
        assert_eq!(canvas.width(), MAX_DIMENSION);
    }

    #[test]
    fn test_resize_is_capped_by_area() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.resize(u32::MAX, u32::MAX);
        assert_eq!(canvas.width(), MAX_DIMENSION);
        assert_eq!(canvas.height(), (MAX_PIXELS / MAX_DIMENSION as u64) as u32);
        assert_eq!(canvas.as_rgba().len() as u64, MAX_PIXELS * 4);

        let mut small = PixelCanvas::default().with_max_pixels(100);
        assert_eq!((small.width(), small.height()), (300, 0));
        small.resize(10, 50);
        assert_eq!((small.width(), small.height()), (10, 10));
        small.set_fill_style("blue");
        small.fill_all();
        assert_eq!(small.count(Rgba::rgb(0, 0, 255)), 100);
        assert_eq!(small.max_pixels(), 100);
    }

    #[test]
    fn test_write_ppm() {
        let mut canvas = PixelCanvas::new(2, 1);
        canvas.set_fill_style("blue");
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        let mut out = Vec::new();
        canvas.write_ppm(&mut out).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        // painted pixel, then untouched pixel composited over white
        assert_eq!(&out[header.len()..], &[0, 0, 255, 255, 255, 255]);
    }
}

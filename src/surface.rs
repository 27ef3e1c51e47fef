//! Drawing surfaces the rasterizer paints into and the sampler reads from.
//!
//! [`PixelBuffer`] is the software implementation used by the widgets: a
//! straight-alpha RGBA8 buffer, the same layout the views hand to the
//! renderer as a `peniko::Image`.

use crate::color::Rgba;
use crate::error::SampleError;
use crate::gradient::ColorStop;
use crate::math;
use crate::point::Point;

/// A 2D surface supporting solid fills, linear-gradient fills and
/// single-pixel reads.
///
/// Fills cover the whole surface and blend with what is already there using
/// the surface's own compositing rule.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn fill_solid(&mut self, color: Rgba);

    /// Fill with a gradient running from `start` to `end` (surface units).
    /// `stops` are ordered by offset.
    fn fill_linear_gradient(&mut self, start: (f64, f64), end: (f64, f64), stops: &[ColorStop]);

    /// The stored RGBA of one pixel.
    fn read_pixel(&self, point: Point) -> Result<[u8; 4], SampleError>;
}

/// Software RGBA8 surface. Starts fully transparent; every fill composites
/// source-over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Raw RGBA8 rows, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn offset(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    fn blend_at(&mut self, offset: usize, src: [f64; 4]) {
        let dst = [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ];
        self.pixels[offset..offset + 4].copy_from_slice(&math::source_over(src, dst));
    }
}

/// Color of the gradient at axis position `t`, padded outside 0.0–1.0.
fn color_at(stops: &[ColorStop], t: f64) -> [f64; 4] {
    let t = t.clamp(0.0, 1.0);
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return [0.0; 4],
    };
    if t <= first.offset {
        return first.color.to_unit();
    }
    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if t <= to.offset {
            let span = to.offset - from.offset;
            let f = if span > 0.0 { (t - from.offset) / span } else { 1.0 };
            return math::mix_premultiplied(from.color.to_unit(), to.color.to_unit(), f);
        }
    }
    last.color.to_unit()
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_solid(&mut self, color: Rgba) {
        let src = color.to_unit();
        for offset in (0..self.pixels.len()).step_by(4) {
            self.blend_at(offset, src);
        }
    }

    fn fill_linear_gradient(&mut self, start: (f64, f64), end: (f64, f64), stops: &[ColorStop]) {
        let dx = end.0 - start.0;
        let dy = end.1 - start.1;
        let len2 = dx * dx + dy * dy;
        if stops.is_empty() || len2 == 0.0 {
            return;
        }
        for py in 0..self.height {
            let cy = py as f64 + 0.5 - start.1;
            let row = py as usize * self.width as usize * 4;
            for px in 0..self.width {
                let cx = px as f64 + 0.5 - start.0;
                let t = (cx * dx + cy * dy) / len2;
                self.blend_at(row + px as usize * 4, color_at(stops, t));
            }
        }
    }

    fn read_pixel(&self, point: Point) -> Result<[u8; 4], SampleError> {
        let offset = self.offset(point).ok_or(SampleError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        })?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Ok(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(colors: &[Rgba]) -> Vec<ColorStop> {
        let step = 1.0 / (colors.len() - 1) as f64;
        colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop { offset: i as f64 * step, color })
            .collect()
    }

    #[test]
    fn test_new_buffer_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_solid_fill() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill_solid(Rgba::rgb(10, 20, 30));
        assert_eq!(buf.read_pixel(Point::new(1, 1)), Ok([10, 20, 30, 255]));
        // A transparent fill leaves the pixel alone.
        buf.fill_solid(Rgba::WHITE_TRANSPARENT);
        assert_eq!(buf.read_pixel(Point::new(0, 0)), Ok([10, 20, 30, 255]));
    }

    #[test]
    fn test_out_of_bounds_read() {
        let buf = PixelBuffer::new(4, 3);
        for point in [Point::new(4, 0), Point::new(0, 3), Point::new(-1, 0), Point::UNSET] {
            assert_eq!(
                buf.read_pixel(point),
                Err(SampleError::OutOfBounds { x: point.x, y: point.y, width: 4, height: 3 })
            );
        }
    }

    #[test]
    fn test_horizontal_gradient_runs_left_to_right() {
        let mut buf = PixelBuffer::new(100, 4);
        buf.fill_linear_gradient((0.0, 0.0), (100.0, 0.0), &stops(&[Rgba::RED, Rgba::BLUE]));
        let left = buf.read_pixel(Point::new(0, 0)).unwrap();
        let right = buf.read_pixel(Point::new(99, 3)).unwrap();
        assert!(left[0] > 250 && left[2] < 5, "{left:?}");
        assert!(right[2] > 250 && right[0] < 5, "{right:?}");
        // Every row of a horizontal gradient is identical.
        assert_eq!(buf.read_pixel(Point::new(42, 0)), buf.read_pixel(Point::new(42, 3)));
        // Red falls off monotonically.
        let reds: Vec<u8> = (0..100).map(|x| buf.read_pixel(Point::new(x, 0)).unwrap()[0]).collect();
        assert!(reds.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_vertical_gradient_runs_top_to_bottom() {
        let mut buf = PixelBuffer::new(2, 50);
        buf.fill_linear_gradient((0.0, 0.0), (0.0, 50.0), &stops(&[Rgba::BLACK, Rgba::WHITE]));
        let top = buf.read_pixel(Point::new(0, 0)).unwrap();
        let bottom = buf.read_pixel(Point::new(1, 49)).unwrap();
        assert!(top[0] < 5);
        assert!(bottom[0] > 250);
    }

    #[test]
    fn test_degenerate_gradient_paints_nothing() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill_linear_gradient((0.0, 0.0), (0.0, 0.0), &stops(&[Rgba::RED, Rgba::BLUE]));
        buf.fill_linear_gradient((0.0, 0.0), (2.0, 0.0), &[]);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_gradient_pads_beyond_last_stop() {
        let half = vec![
            ColorStop { offset: 0.0, color: Rgba::RED },
            ColorStop { offset: 0.5, color: Rgba::BLUE },
        ];
        let mut buf = PixelBuffer::new(10, 1);
        buf.fill_linear_gradient((0.0, 0.0), (10.0, 0.0), &half);
        assert_eq!(buf.read_pixel(Point::new(9, 0)), Ok([0, 0, 255, 255]));
    }
}

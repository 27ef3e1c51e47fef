//! Reading colors back from a rendered surface.
//!
//! Forward sampling turns a pixel coordinate into a color. Inverse sampling
//! walks the top row and returns the column whose color is closest to a
//! target, which is how a hue strip finds where an existing color sits.

use log::debug;

use crate::color::Rgba;
use crate::error::SampleError;
use crate::point::Point;
use crate::surface::Surface;

/// Starting minimum for [`locate_closest`]. A pixel must be strictly closer
/// than this to count as a match.
pub const NO_MATCH_THRESHOLD: f64 = 255.0;

/// The color at `point`. The stored alpha is not sampled; the result is
/// always opaque.
pub fn sample_at<S: Surface + ?Sized>(surface: &S, point: Point) -> Result<Rgba, SampleError> {
    let [r, g, b, _] = surface.read_pixel(point)?;
    Ok(Rgba::rgb(r.into(), g.into(), b.into()))
}

/// Scan row `y = 0` for `x` in `0..row_width` and return the column closest
/// to `target`, paired with `fixed_y`.
///
/// Ties go to the leftmost column. If no column is closer than
/// [`NO_MATCH_THRESHOLD`], `previous.x` is kept. A `row_width` past the
/// surface (or past `i32::MAX`) is an out-of-bounds error.
pub fn locate_closest<S: Surface + ?Sized>(
    surface: &S,
    row_width: u32,
    target: Rgba,
    previous: Point,
    fixed_y: i32,
) -> Result<Point, SampleError> {
    let columns = i32::try_from(row_width).map_err(|_| SampleError::OutOfBounds {
        x: i32::MAX,
        y: 0,
        width: surface.width(),
        height: surface.height(),
    })?;
    let mut min = NO_MATCH_THRESHOLD;
    let mut closest_x = previous.x;
    for x in 0..columns {
        let distance = target.distance(&sample_at(surface, Point::new(x, 0))?);
        if distance < min {
            min = distance;
            closest_x = x;
        }
    }
    debug!(
        "closest to {} is x={} (distance {:.2})",
        target.to_hex(),
        closest_x,
        min
    );
    Ok(Point::new(closest_x, fixed_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::Gradient;
    use crate::rasterizer::draw_gradients;
    use crate::surface::PixelBuffer;

    fn red_to_blue(width: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, 10);
        let gradient = Gradient::to_right([Rgba::RED, Rgba::BLUE]).unwrap();
        draw_gradients(&mut buf, Rgba::WHITE_TRANSPARENT, &[gradient]);
        buf
    }

    #[test]
    fn test_sample_ignores_alpha() {
        let mut buf = PixelBuffer::new(2, 2);
        draw_gradients(&mut buf, Rgba::new(10, 20, 30, 0.5), &[]);
        let color = sample_at(&buf, Point::new(0, 0)).unwrap();
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (10, 20, 30, 1.0));
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let buf = PixelBuffer::new(2, 2);
        assert!(matches!(
            sample_at(&buf, Point::new(2, 0)),
            Err(SampleError::OutOfBounds { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn test_locate_exact_pixel() {
        let buf = red_to_blue(100);
        let target = sample_at(&buf, Point::new(50, 0)).unwrap();
        let found = locate_closest(&buf, 100, target, Point::UNSET, 7).unwrap();
        assert_eq!(found, Point::new(50, 7));
    }

    #[test]
    fn test_locate_every_column_of_distinct_strip() {
        let buf = red_to_blue(64);
        for x in [0, 1, 17, 32, 63] {
            let target = sample_at(&buf, Point::new(x, 0)).unwrap();
            assert_eq!(locate_closest(&buf, 64, target, Point::UNSET, 0).unwrap().x, x);
        }
    }

    #[test]
    fn test_locate_ties_go_left() {
        let mut buf = PixelBuffer::new(8, 1);
        draw_gradients(&mut buf, Rgba::GREEN, &[]);
        let found = locate_closest(&buf, 8, Rgba::GREEN, Point::new(5, 5), 3).unwrap();
        assert_eq!(found, Point::new(0, 3));
    }

    #[test]
    fn test_locate_keeps_previous_without_match() {
        let mut buf = PixelBuffer::new(8, 1);
        draw_gradients(&mut buf, Rgba::BLACK, &[]);
        // White is ~441.7 away from black, above the 255 threshold.
        let found = locate_closest(&buf, 8, Rgba::WHITE, Point::new(5, 9), 2).unwrap();
        assert_eq!(found, Point::new(5, 2));
    }

    #[test]
    fn test_locate_wider_than_surface_fails() {
        let buf = red_to_blue(10);
        assert!(locate_closest(&buf, 11, Rgba::RED, Point::UNSET, 0).is_err());
    }

    #[test]
    fn test_locate_row_width_beyond_i32_fails() {
        let buf = red_to_blue(10);
        for width in [i32::MAX as u32 + 1, u32::MAX] {
            assert!(matches!(
                locate_closest(&buf, width, Rgba::RED, Point::new(3, 0), 0),
                Err(SampleError::OutOfBounds { width: 10, height: 10, .. })
            ));
        }
    }
}

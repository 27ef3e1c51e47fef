//! Pointer and touch handling for one gradient surface.
//!
//! [`GradientCanvas`] owns the rendered buffer and the picker position. It
//! turns device coordinates into buffer coordinates, samples the buffer and
//! hands colors back to the caller: `pointer_move` yields the live "change"
//! color and `pointer_up` yields the committed "select" color. `reflect`
//! runs the other way, from a color to a position.

use log::debug;

use crate::color::Rgba;
use crate::gradient::Gradient;
use crate::point::Point;
use crate::rasterizer::draw_gradients;
use crate::sampler::{locate_closest, sample_at};
use crate::surface::{PixelBuffer, Surface};

/// Everything needed to draw and drive one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub gradients: Vec<Gradient>,
    /// Pointer input never moves the picker horizontally.
    pub fixed_horizontal: bool,
    /// Pointer input never moves the picker vertically.
    pub fixed_vertical: bool,
    pub initial_position: Point,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            background: Rgba::WHITE_TRANSPARENT,
            gradients: Vec::new(),
            fixed_horizontal: false,
            fixed_vertical: false,
            initial_position: Point::UNSET,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GradientCanvas {
    options: CanvasOptions,
    surface: Option<PixelBuffer>,
    position: Point,
    held: bool,
}

impl GradientCanvas {
    /// A detached canvas. Nothing is drawn or sampled until [`attach`].
    ///
    /// [`attach`]: GradientCanvas::attach
    pub fn new(options: CanvasOptions) -> Self {
        let position = options.initial_position;
        Self {
            options,
            surface: None,
            position,
            held: false,
        }
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&PixelBuffer> {
        self.surface.as_ref()
    }

    /// Allocate the buffer and draw into it.
    pub fn attach(&mut self) {
        self.surface = Some(PixelBuffer::new(self.options.width, self.options.height));
        self.redraw();
    }

    pub fn detach(&mut self) {
        self.surface = None;
        self.held = false;
    }

    /// Repaint background and gradients. No-op while detached.
    pub fn redraw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        draw_gradients(surface, self.options.background, &self.options.gradients);
    }

    pub fn set_background(&mut self, background: Rgba) {
        self.options.background = background;
        self.redraw();
    }

    /// The color under `point`, or `None` while detached or out of bounds.
    pub fn sample(&self, point: Point) -> Option<Rgba> {
        let surface = self.surface.as_ref()?;
        match sample_at(surface, point) {
            Ok(color) => Some(color),
            Err(e) => {
                debug!("sample skipped: {}", e);
                None
            }
        }
    }

    /// Map device coordinates into the buffer, keeping pinned axes, and
    /// store the result as the picker position.
    fn move_to(&mut self, device: (f64, f64), origin: (f64, f64)) -> Point {
        let Some(surface) = self.surface.as_ref() else {
            return self.position;
        };
        let clamp = |v: f64, len: u32| -> i32 {
            let max = len.saturating_sub(1) as f64;
            v.floor().clamp(0.0, max) as i32
        };
        let mut next = self.position;
        if !self.options.fixed_horizontal {
            next.x = clamp(device.0 - origin.0, surface.width());
        }
        if !self.options.fixed_vertical {
            next.y = clamp(device.1 - origin.1, surface.height());
        }
        self.position = next;
        next
    }

    /// Start a drag at `device`. `origin` is the surface's on-screen offset.
    pub fn pointer_down(&mut self, device: (f64, f64), origin: (f64, f64)) -> Point {
        if !self.is_attached() {
            return self.position;
        }
        self.held = true;
        self.move_to(device, origin)
    }

    /// Follow a drag. Returns the color under the new position while held.
    pub fn pointer_move(&mut self, device: (f64, f64), origin: (f64, f64)) -> Option<Rgba> {
        if !self.held {
            return None;
        }
        let position = self.move_to(device, origin);
        self.sample(position)
    }

    /// End a drag and return the color under the last position.
    pub fn pointer_up(&mut self) -> Option<Rgba> {
        self.held = false;
        self.sample(self.position)
    }

    /// Drop a drag without committing, e.g. when focus is lost.
    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn touch_start(&mut self, touches: &[(f64, f64)], origin: (f64, f64)) -> Option<Point> {
        let &first = touches.first()?;
        Some(self.pointer_down(first, origin))
    }

    pub fn touch_move(&mut self, touches: &[(f64, f64)], origin: (f64, f64)) -> Option<Rgba> {
        let &first = touches.first()?;
        self.pointer_move(first, origin)
    }

    pub fn touch_end(&mut self) -> Option<Rgba> {
        self.pointer_up()
    }

    /// Move the picker to the top-row column closest to `color`, on the
    /// initial row.
    pub fn locate(&mut self, color: Rgba) -> Option<Point> {
        let surface = self.surface.as_ref()?;
        let found = locate_closest(
            surface,
            surface.width(),
            color,
            self.position,
            self.options.initial_position.y,
        );
        match found {
            Ok(point) => {
                self.position = point;
                Some(point)
            }
            Err(e) => {
                debug!("locate skipped: {}", e);
                None
            }
        }
    }

    /// [`locate`](GradientCanvas::locate) `color`, then sample where the
    /// picker landed.
    pub fn reflect(&mut self, color: Rgba) -> Option<Rgba> {
        let position = self.locate(color)?;
        self.sample(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> GradientCanvas {
        GradientCanvas::new(CanvasOptions {
            width: 100,
            height: 10,
            gradients: vec![Gradient::to_right([Rgba::RED, Rgba::BLUE]).unwrap()],
            fixed_vertical: true,
            initial_position: Point::new(45, 5),
            ..CanvasOptions::default()
        })
    }

    #[test]
    fn test_detached_canvas_is_inert() {
        let mut canvas = strip();
        assert!(!canvas.is_attached());
        assert_eq!(canvas.pointer_down((10.0, 2.0), (0.0, 0.0)), Point::new(45, 5));
        assert_eq!(canvas.pointer_move((20.0, 2.0), (0.0, 0.0)), None);
        assert_eq!(canvas.pointer_up(), None);
        assert_eq!(canvas.locate(Rgba::RED), None);
        assert_eq!(canvas.reflect(Rgba::RED), None);
        assert_eq!(canvas.position(), Point::new(45, 5));
    }

    #[test]
    fn test_drag_samples_and_commits() {
        let mut canvas = strip();
        canvas.attach();

        // Not held yet: moves are ignored.
        assert_eq!(canvas.pointer_move((30.0, 3.0), (0.0, 0.0)), None);

        assert_eq!(canvas.pointer_down((110.0, 53.0), (100.0, 50.0)), Point::new(10, 5));
        let changed = canvas.pointer_move((112.5, 58.0), (100.0, 50.0)).unwrap();
        assert_eq!(canvas.position(), Point::new(12, 5));
        assert_eq!(Some(changed), canvas.sample(Point::new(12, 5)));

        let selected = canvas.pointer_up().unwrap();
        assert_eq!(selected, changed);
        assert_eq!(canvas.pointer_move((50.0, 0.0), (0.0, 0.0)), None);
    }

    #[test]
    fn test_pointer_is_clamped_into_surface() {
        let mut canvas = GradientCanvas::new(CanvasOptions {
            width: 20,
            height: 10,
            background: Rgba::RED,
            ..CanvasOptions::default()
        });
        canvas.attach();
        assert_eq!(canvas.pointer_down((-5.0, 400.0), (0.0, 0.0)), Point::new(0, 9));
        assert_eq!(canvas.pointer_move((500.0, -3.0), (0.0, 0.0)), Some(Rgba::RED));
        assert_eq!(canvas.position(), Point::new(19, 0));
    }

    #[test]
    fn test_fixed_horizontal_keeps_x() {
        let mut canvas = GradientCanvas::new(CanvasOptions {
            width: 20,
            height: 10,
            fixed_horizontal: true,
            initial_position: Point::new(7, 0),
            ..CanvasOptions::default()
        });
        canvas.attach();
        assert_eq!(canvas.pointer_down((15.0, 4.0), (0.0, 0.0)), Point::new(7, 4));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut canvas = strip();
        canvas.attach();
        assert_eq!(canvas.touch_start(&[], (0.0, 0.0)), None);
        assert_eq!(
            canvas.touch_start(&[(30.0, 1.0), (80.0, 1.0)], (0.0, 0.0)),
            Some(Point::new(30, 5))
        );
        assert!(canvas.touch_move(&[(31.0, 1.0)], (0.0, 0.0)).is_some());
        assert_eq!(canvas.touch_move(&[], (0.0, 0.0)), None);
        assert_eq!(canvas.touch_end(), canvas.sample(Point::new(31, 5)));
    }

    #[test]
    fn test_reflect_finds_color_on_initial_row() {
        let mut canvas = strip();
        canvas.attach();
        let target = canvas.sample(Point::new(70, 0)).unwrap();
        assert_eq!(canvas.reflect(target), Some(target));
        assert_eq!(canvas.position(), Point::new(70, 5));
    }

    #[test]
    fn test_unset_position_samples_nothing() {
        let mut canvas = GradientCanvas::new(CanvasOptions {
            width: 4,
            height: 4,
            background: Rgba::RED,
            ..CanvasOptions::default()
        });
        canvas.attach();
        assert_eq!(canvas.position(), Point::UNSET);
        assert_eq!(canvas.pointer_up(), None);
    }

    #[test]
    fn test_set_background_redraws() {
        let mut canvas = GradientCanvas::new(CanvasOptions {
            width: 4,
            height: 4,
            background: Rgba::RED,
            ..CanvasOptions::default()
        });
        canvas.attach();
        assert_eq!(canvas.sample(Point::new(1, 1)), Some(Rgba::RED));
        canvas.set_background(Rgba::new(0, 0, 255, 0.5));
        // The old fill is cleared first, so half-transparent blue stays blue.
        assert_eq!(canvas.sample(Point::new(1, 1)), Some(Rgba::BLUE));
        assert_eq!(canvas.surface().unwrap().read_pixel(Point::new(1, 1)), Ok([0, 0, 255, 128]));
    }
}

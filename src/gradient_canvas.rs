//! Floem view hosting a [`GradientCanvas`].
//!
//! The canvas buffer is handed to the renderer as an RGBA8 image and scaled
//! to the view's layout size. Pointer positions are mapped back into buffer
//! pixels before they reach the controller.

use std::sync::Arc;

use floem::kurbo::{Circle, Rect, Stroke};
use floem::peniko::{self, Blob, Color};

use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Rgba;
use crate::constants;
use crate::controller::{CanvasOptions, GradientCanvas};

enum CanvasUpdate {
    Background(Rgba),
    Reflect(Rgba),
}

type ColorCallback = Box<dyn Fn(Rgba)>;

pub struct GradientCanvasView {
    id: ViewId,
    canvas: GradientCanvas,
    picker_size: f64,
    picker_border_width: f64,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<ColorCallback>,
    on_select: Option<ColorCallback>,
    on_reflect: Option<ColorCallback>,
    /// Image of the current buffer; rebuilt after every redraw.
    img: Option<peniko::Image>,
    img_hash: Vec<u8>,
    dirty: bool,
}

/// Creates a view drawing `options` and tracking a ring picker on it.
///
/// The view is laid out at the buffer's size; any other size stretches the
/// image and scales pointer input to match.
pub fn gradient_canvas(
    options: CanvasOptions,
    picker_size: f64,
    picker_border_width: f64,
) -> GradientCanvasView {
    let width = options.width as f32;
    let height = options.height as f32;
    let mut canvas = GradientCanvas::new(options);
    canvas.attach();

    GradientCanvasView {
        id: ViewId::new(),
        canvas,
        picker_size,
        picker_border_width,
        size: Default::default(),
        on_change: None,
        on_select: None,
        on_reflect: None,
        img: None,
        img_hash: Vec::new(),
        dirty: true,
    }
    .style(move |s| {
        s.width(width)
            .height(height)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl GradientCanvasView {
    /// Called with the color under the picker while it is dragged.
    pub fn on_change(mut self, f: impl Fn(Rgba) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called with the color under the picker when it is released.
    pub fn on_select(mut self, f: impl Fn(Rgba) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Called with the color found after a reflect request.
    pub fn on_reflect(mut self, f: impl Fn(Rgba) + 'static) -> Self {
        self.on_reflect = Some(Box::new(f));
        self
    }

    /// Repaint under a new background whenever `background` changes.
    pub fn background(self, background: impl Fn() -> Rgba + 'static) -> Self {
        let id = self.id;
        create_effect(move |_| {
            id.update_state(CanvasUpdate::Background(background()));
        });
        self
    }

    /// Move the picker to wherever `color` sits whenever it changes.
    pub fn reflect(self, color: impl Fn() -> Rgba + 'static) -> Self {
        let id = self.id;
        create_effect(move |_| {
            id.update_state(CanvasUpdate::Reflect(color()));
        });
        self
    }

    /// Put the picker on the top-row column closest to `color`, once.
    /// Unlike [`reflect`](Self::reflect) this does not call `on_reflect`.
    pub fn locate(mut self, color: Rgba) -> Self {
        self.canvas.locate(color);
        self
    }

    /// Buffer pixels per layout unit, per axis.
    fn buffer_ratio(&self) -> (f64, f64) {
        let opts = self.canvas.options();
        let ratio = |buffer: u32, layout: f32| {
            if layout > 0.0 {
                buffer as f64 / layout as f64
            } else {
                1.0
            }
        };
        (
            ratio(opts.width, self.size.width),
            ratio(opts.height, self.size.height),
        )
    }

    fn to_device(&self, pos: floem::kurbo::Point) -> (f64, f64) {
        let (rx, ry) = self.buffer_ratio();
        (pos.x * rx, pos.y * ry)
    }

    fn ensure_image(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(surface) = self.canvas.surface() else {
            return;
        };
        let opts = self.canvas.options();
        if opts.width == 0 || opts.height == 0 {
            return;
        }
        let blob = Blob::new(Arc::new(surface.as_bytes().to_vec()));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, opts.width, opts.height);
        self.img_hash = blob.id().to_le_bytes().to_vec();
        self.img = Some(img);
        self.dirty = false;
    }

    fn emit(callback: &Option<ColorCallback>, color: Option<Rgba>) {
        if let (Some(cb), Some(color)) = (callback, color) {
            cb(color);
        }
    }
}

impl View for GradientCanvasView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<CanvasUpdate>() {
            match *update {
                CanvasUpdate::Background(color) => {
                    if self.canvas.options().background != color {
                        self.canvas.set_background(color);
                        self.dirty = true;
                    }
                }
                CanvasUpdate::Reflect(color) => {
                    let found = self.canvas.reflect(color);
                    Self::emit(&self.on_reflect, found);
                }
            }
            self.id.request_paint();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                let device = self.to_device(e.pos);
                self.canvas.pointer_down(device, (0.0, 0.0));
                self.id.request_paint();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                let device = self.to_device(e.pos);
                match self.canvas.pointer_move(device, (0.0, 0.0)) {
                    Some(color) => {
                        Self::emit(&self.on_change, Some(color));
                        self.id.request_paint();
                        EventPropagation::Stop
                    }
                    None => EventPropagation::Continue,
                }
            }
            Event::PointerUp(_) => {
                let selected = self.canvas.pointer_up();
                Self::emit(&self.on_select, selected);
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.canvas.release();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);

        self.ensure_image();
        if let Some(ref img) = self.img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.img_hash,
                },
                rect,
            );
        }

        let position = self.canvas.position();
        if position.is_unset() {
            return;
        }

        // Ring picker: a white circle of `picker_size`, its left edge kept
        // inside the canvas.
        let (rx, ry) = self.buffer_ratio();
        let size = self.picker_size;
        let max_left = (w - 2.0 * size - constants::PICKER_INSET).max(constants::PICKER_INSET);
        let left = (position.x as f64 / rx).clamp(constants::PICKER_INSET, max_left);
        let center = (left + size / 2.0, position.y as f64 / ry);
        let radius = (size + self.picker_border_width) / 2.0;

        cx.stroke(
            &Circle::new(center, radius + self.picker_border_width / 2.0),
            Color::rgba8(0, 0, 0, 60),
            &Stroke::new(1.0),
        );
        cx.stroke(
            &Circle::new(center, radius),
            Color::WHITE,
            &Stroke::new(self.picker_border_width),
        );
    }
}

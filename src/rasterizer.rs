//! Paints a background and a stack of gradients onto a [`Surface`].

use log::trace;

use crate::color::Rgba;
use crate::gradient::{ColorStop, Gradient};
use crate::surface::Surface;

/// Fill `surface` with `background`, then paint each gradient over the whole
/// surface in declaration order.
///
/// Later gradients land on top of earlier ones; how they blend is up to the
/// surface. Gradients always carry two or more stops (enforced by
/// [`Gradient::new`]).
pub fn draw_gradients<S: Surface + ?Sized>(surface: &mut S, background: Rgba, gradients: &[Gradient]) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;

    trace!("background {}", background.to_hex());
    surface.fill_solid(background);

    for gradient in gradients {
        let (start, end) = gradient.endpoints(width, height);
        let stops: Vec<ColorStop> = gradient.stops().collect();
        trace!(
            "{} gradient: {}",
            gradient.direction().as_str(),
            stops
                .iter()
                .map(|s| format!("{} {}", s.color.to_css_string(), s.offset))
                .collect::<Vec<_>>()
                .join(", ")
        );
        surface.fill_linear_gradient(start, end, &stops);
    }
}

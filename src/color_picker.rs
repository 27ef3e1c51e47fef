//! The full picker: hue strip, shade area, preset selector, hex entry and
//! swatch grid.
//!
//! Data flow between the parts:
//! - dragging on the hue strip sets the shade background;
//! - an outside change to `color` moves the hue picker to the closest hue
//!   and, unless that hue reads as opaque black, sets the shade background;
//! - releasing on the shade area, clicking a swatch or typing a hex value
//!   writes `color`;
//! - every new `color` is pushed onto the persisted history.

use std::cell::RefCell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use log::warn;

use crate::color::Rgba;
use crate::config::PickerConfig;
use crate::constants;
use crate::controller::GradientCanvas;
use crate::gradient_canvas::gradient_canvas;
use crate::inputs::{copy_button, hex_input};
use crate::preset_grid::{preset_grid, preset_selector};
use crate::presets::{FileBackend, MemoryBackend, PresetBackend, PresetStore};

/// Picker whose history lives in the per-user data directory, or in memory
/// when no such directory exists.
pub(crate) fn color_picker(color: RwSignal<Rgba>, config: PickerConfig) -> impl IntoView {
    let backend: Box<dyn PresetBackend> = match FileBackend::user_default() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!("Preset history will not persist: {}", e);
            Box::new(MemoryBackend::new())
        }
    };
    color_picker_with_store(color, config, PresetStore::new(backend))
}

pub(crate) fn color_picker_with_store<B: PresetBackend + 'static>(
    color: RwSignal<Rgba>,
    config: PickerConfig,
    store: PresetStore<B>,
) -> impl IntoView {
    let config = Rc::new(config);
    let store = Rc::new(RefCell::new(store));

    // Background of the shade area: the hue under the hue picker.
    let shade_background = RwSignal::new(initial_hue(&config, color.get_untracked()));
    let current_preset = RwSignal::new(
        config
            .default_preset_index
            .min(config.presets.len().saturating_sub(1)),
    );
    let history_revision = RwSignal::new(0_u64);

    // Color → history
    {
        let store = store.clone();
        let key = config.storage_key.clone();
        create_effect(move |_| {
            let c = color.get();
            if let Err(e) = store.borrow_mut().add(&key, c) {
                warn!("Failed to record {} in preset history: {}", c.to_hex(), e);
            }
            history_revision.update(|r| *r += 1);
        });
    }

    let hue = gradient_canvas(
        config.hue_canvas_options(),
        config.picker_size,
        config.picker_border_width,
    )
    .on_change(move |c| shade_background.set(c))
    .on_reflect(move |c| {
        if !c.is_opaque_black() {
            shade_background.set(c);
        }
    })
    .reflect(move || color.get());

    let shade = gradient_canvas(
        config.shade_canvas_options(shade_background.get_untracked()),
        config.picker_size,
        config.picker_border_width,
    )
    .locate(color.get_untracked())
    .on_select(move |c| color.set(c))
    .background(move || shade_background.get());

    let select: Rc<dyn Fn(Rgba)> = Rc::new(move |c| color.set(c));
    let width = config.hue_gradient_width.max(config.shade_gradient_width) as f32;

    v_stack((
        hue,
        shade,
        h_stack((
            preset_selector(config.clone(), current_preset),
            empty().style(|s| s.flex_grow(1.0)),
            empty().style(move |s| {
                s.width(18.0)
                    .height(18.0)
                    .border_radius(constants::RADIUS)
                    .border(1.0)
                    .border_color(Color::rgb8(180, 180, 180))
                    .background(Color::from(color.get()))
            }),
            hex_input(color),
            copy_button(move || color.get_untracked().to_hex()),
        ))
        .style(|s| s.gap(constants::GAP).items_center()),
        preset_grid(config.clone(), current_preset, store, history_revision, select),
    ))
    .style(move |s| {
        s.gap(constants::GAP)
            .width(width + 2.0 * constants::PADDING)
            .padding(constants::PADDING)
            .background(Color::rgb8(242, 242, 242))
    })
}

/// The hue the hue strip settles on for `color`, or `color` itself when that
/// hue reads as opaque black.
fn initial_hue(config: &PickerConfig, color: Rgba) -> Rgba {
    let mut strip = GradientCanvas::new(config.hue_canvas_options());
    strip.attach();
    match strip.reflect(color) {
        Some(hue) if !hue.is_opaque_black() => hue,
        _ => color,
    }
}

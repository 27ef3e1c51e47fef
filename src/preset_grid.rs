//! Preset selector and the swatch grid below it.

use std::cell::RefCell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::color::Rgba;
use crate::config::PickerConfig;
use crate::constants;
use crate::presets::{PresetBackend, PresetStore};

/// One tab per preset; clicking a tab makes it `current`.
pub(crate) fn preset_selector(config: Rc<PickerConfig>, current: RwSignal<usize>) -> impl IntoView {
    let tabs = config
        .presets
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            let text = preset.label.clone();
            label(move || text.clone())
                .style(move |s| {
                    let selected = current.get() == index;
                    let s = s
                        .font_size(constants::LABEL_FONT)
                        .padding_horiz(4.0)
                        .padding_vert(2.0)
                        .border_radius(constants::RADIUS)
                        .cursor(floem::style::CursorStyle::Pointer);
                    if selected {
                        s.background(Color::WHITE)
                            .color(Color::rgb8(40, 40, 40))
                    } else {
                        s.color(Color::rgb8(120, 120, 120))
                            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
                    }
                })
                .on_click_stop(move |_| current.set(index))
        })
        .collect::<Vec<_>>();

    h_stack_from_iter(tabs).style(|s| s.gap(2.0).items_center())
}

/// The visible colors of the current preset as clickable swatches.
///
/// Rebuilt whenever `current` or `revision` changes; bump `revision` after
/// writing to the store so a history preset shows the new entry.
pub(crate) fn preset_grid<B: PresetBackend + 'static>(
    config: Rc<PickerConfig>,
    current: RwSignal<usize>,
    store: Rc<RefCell<PresetStore<B>>>,
    revision: RwSignal<u64>,
    on_select: Rc<dyn Fn(Rgba)>,
) -> impl IntoView {
    dyn_container(
        move || (current.get(), revision.get()),
        move |(index, _)| {
            let colors = config
                .presets
                .get(index)
                .or_else(|| config.initial_preset())
                .map(|preset| {
                    preset.visible_colors(
                        &store.borrow(),
                        &config.storage_key,
                        config.visible_preset_colors,
                    )
                })
                .unwrap_or_default();
            let size = config.preset_item_size;
            let swatches = colors
                .into_iter()
                .map(|color| {
                    let on_select = on_select.clone();
                    empty()
                        .style(move |s| {
                            s.width(size)
                                .height(size)
                                .background(Color::from(color))
                                .cursor(floem::style::CursorStyle::Pointer)
                        })
                        .on_click_stop(move |_| on_select(color))
                })
                .collect::<Vec<_>>();
            h_stack_from_iter(swatches).style(|s| {
                s.flex_wrap(floem::taffy::FlexWrap::Wrap)
                    .gap(constants::SWATCH_GAP)
            })
        },
    )
}

//! Text entry and clipboard components.

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::Rgba;
use crate::constants;

/// A hex input field that syncs bidirectionally with an `RwSignal<Rgba>`.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` or a CSS color name. The color
/// follows every keystroke that resolves; Enter or focus loss rewrites the
/// text as `#rrggbbaa`, or restores it when the text does not resolve.
pub(crate) fn hex_input(color: RwSignal<Rgba>) -> impl IntoView {
    let text = RwSignal::new(color.get_untracked().to_hex());

    // External color → text, unless the text already means that color
    create_effect(move |_| {
        let c = color.get();
        let current = text.get_untracked();
        if Rgba::resolve_input(&current) != Some(c) {
            text.set(c.to_hex());
        }
    });

    // Dynamic: text → color on every resolvable keystroke
    create_effect(move |_| {
        let raw = text.get();
        if let Some(c) = Rgba::resolve_input(&raw) {
            if color.get_untracked() != c {
                color.set(c);
            }
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let normalized = match Rgba::resolve_input(&raw) {
            Some(c) => {
                if color.get_untracked() != c {
                    color.set(c);
                }
                c.to_hex()
            }
            None => color.get_untracked().to_hex(),
        };
        if raw != normalized {
            text.set(normalized);
        }
    };
    let on_commit_clone = on_commit;

    text_input(text)
        .style(|s| {
            s.width(constants::HEX_INPUT_WIDTH)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(constants::RADIUS)
        })
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event_stop(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                {
                    on_commit_clone();
                }
            }
        })
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("Failed to copy {:?} to the clipboard: {}", text, e);
            }
        }
        Err(e) => log::warn!("Clipboard unavailable: {}", e),
    }
}

//! Standalone demo: opens a window with the color picker.
//!
//! Pass a JSON config path as the first argument to override the defaults.

use anyhow::Context;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_shade::{color_picker, init_logging, LoggingConfig, PickerConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = match std::env::args_os().nth(1) {
        Some(path) => PickerConfig::load_from_path(path.as_ref())
            .with_context(|| format!("loading picker config from {:?}", path))?,
        None => PickerConfig::default(),
    };
    let color = RwSignal::new(config.color);
    let width = config.hue_gradient_width.max(config.shade_gradient_width) as f64 + 16.0;
    let height = (config.hue_gradient_height + config.shade_gradient_height) as f64 + 160.0;

    floem::Application::new()
        .window(
            move |_| {
                color_picker(color, config.clone()).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((width, height))
                    .title("floem-shade"),
            ),
        )
        .run();
    Ok(())
}

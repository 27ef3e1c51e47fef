//! # floem-shade
//!
//! A gradient color picker for [Floem](https://github.com/lapce/floem).
//!
//! A horizontal hue strip feeds a saturation/brightness shade area. Both are
//! software-rasterized gradients that the picker samples directly, so the
//! color under the ring is exactly the color you get. Below them sit a
//! preset selector, hex entry and a grid of preset swatches, one of which
//! is a persisted history of recently used colors.
//!
//! The rendering and sampling core ([`Rgba`], [`Gradient`], [`PixelBuffer`],
//! [`GradientCanvas`], [`PresetStore`]) has no UI dependencies of its own
//! and can be driven headlessly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_shade::{color_picker, PickerConfig, Rgba};
//!
//! let color = RwSignal::new(Rgba::from_hex("#3b82f6"));
//! // Use `color_picker(color, PickerConfig::default())` in your Floem view tree.
//! ```

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod gradient;
pub mod logging;
pub mod named;
pub mod point;
pub mod presets;
pub mod rasterizer;
pub mod sampler;
pub mod surface;

mod color_picker;
mod constants;
mod gradient_canvas;
mod inputs;
mod math;
mod preset_grid;

pub use color::Rgba;
pub use config::PickerConfig;
pub use controller::{CanvasOptions, GradientCanvas};
pub use error::{ConfigError, GradientError, ParseHexError, SampleError, StoreError};
pub use gradient::{ColorStop, Direction, Gradient};
pub use gradient_canvas::{gradient_canvas, GradientCanvasView};
pub use logging::{init_logging, LoggingConfig};
pub use point::Point;
pub use presets::{FileBackend, MemoryBackend, Preset, PresetBackend, PresetStore};
pub use surface::{PixelBuffer, Surface};

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

fn load_icon_font() {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
}

/// Creates the top-level color picker view.
///
/// The picker reads from and writes to `color`. External changes to the
/// signal move the hue picker; releasing on the shade area, picking a
/// swatch or entering a hex value update the signal. The history is stored
/// in the per-user data directory.
pub fn color_picker(color: RwSignal<Rgba>, config: PickerConfig) -> impl IntoView {
    load_icon_font();
    color_picker::color_picker(color, config)
}

/// Like [`color_picker`], with the preset history kept in `store`.
pub fn color_picker_with_store<B: PresetBackend + 'static>(
    color: RwSignal<Rgba>,
    config: PickerConfig,
    store: PresetStore<B>,
) -> impl IntoView {
    load_icon_font();
    color_picker::color_picker_with_store(color, config, store)
}

//! Picker configuration: colors, canvas sizes and preset groups.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::controller::CanvasOptions;
use crate::error::ConfigError;
use crate::gradient::Gradient;
use crate::point::Point;
use crate::presets::Preset;

/// Everything the picker needs besides the color signal itself.
///
/// Missing fields deserialize to their defaults, so a config file only has
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Initial color when none is supplied.
    pub color: Rgba,
    pub hue_gradient_width: u32,
    pub hue_gradient_height: u32,
    pub shade_gradient_width: u32,
    pub shade_gradient_height: u32,
    /// Swatches shown per preset, padded with white.
    pub visible_preset_colors: usize,
    /// Swatch edge length.
    pub preset_item_size: f64,
    /// Diameter of the ring picker.
    pub picker_size: f64,
    pub picker_border_width: f64,
    /// Namespace of the persisted history.
    pub storage_key: String,
    pub default_preset_index: usize,
    pub presets: Vec<Preset>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            color: Rgba::new(0, 255, 0, 1.0),
            hue_gradient_width: 320,
            hue_gradient_height: 30,
            shade_gradient_width: 320,
            shade_gradient_height: 200,
            visible_preset_colors: 40,
            preset_item_size: 14.0,
            picker_size: 10.0,
            picker_border_width: 3.0,
            storage_key: "color-picker-with-presets".to_string(),
            default_preset_index: 0,
            presets: Preset::defaults(),
        }
    }
}

impl PickerConfig {
    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The hue strip: horizontal rainbow, picker pinned to the middle row.
    pub fn hue_canvas_options(&self) -> CanvasOptions {
        let w = self.hue_gradient_width;
        let h = self.hue_gradient_height;
        CanvasOptions {
            width: w,
            height: h,
            background: Rgba::WHITE_TRANSPARENT,
            gradients: vec![Gradient::hue()],
            fixed_horizontal: false,
            fixed_vertical: true,
            initial_position: Point::new(
                (w as f64 / 2.0 - self.picker_size / 2.0) as i32,
                (h / 2) as i32,
            ),
        }
    }

    /// The shade area over a hue `background`: white fades out to the
    /// right, black fades in to the bottom.
    pub fn shade_canvas_options(&self, background: Rgba) -> CanvasOptions {
        let w = self.shade_gradient_width;
        CanvasOptions {
            width: w,
            height: self.shade_gradient_height,
            background,
            gradients: Gradient::shade_overlays(),
            fixed_horizontal: false,
            fixed_vertical: false,
            initial_position: Point::new(w as i32 - 5, (self.picker_size + 4.0) as i32),
        }
    }

    /// The preset selected at startup, or the first one when the index is
    /// out of range. `None` only when there are no presets.
    pub fn initial_preset(&self) -> Option<&Preset> {
        self.presets
            .get(self.default_preset_index)
            .or_else(|| self.presets.first())
    }
}

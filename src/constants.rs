//! Sizing, color, and styling constants for the picker.

/// Gap between picker rows
pub const GAP: f32 = 5.0;

/// Gap between preset swatches
pub const SWATCH_GAP: f32 = 2.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Border radius for inputs and the selector
pub const RADIUS: f32 = 3.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 96.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Distance the ring picker keeps from the canvas edges
pub const PICKER_INSET: f64 = 2.0;

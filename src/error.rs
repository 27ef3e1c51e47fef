//! Error types for the picker core.

/// Why a hex color string could not be decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseHexError {
    #[error("hex color must start with '#'")]
    MissingHash,
    #[error("hex color contains a non-hexadecimal digit")]
    InvalidDigit,
    #[error("hex color must have 3, 6 or 8 digits, found {0}")]
    Length(usize),
}

/// Rejected gradient definitions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GradientError {
    /// Stop offsets are `i / (n - 1)`, which needs `n >= 2`.
    #[error("a gradient needs at least two color stops, found {0}")]
    TooFewStops(usize),
}

/// An error that can occur when reading pixels back from a surface.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("sample coordinate ({x}, {y}) out-of-bounds for a {width}x{height} surface")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Failures writing the preset history.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("preset storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preset list could not be serialized: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine a data directory for presets")]
    NoDataDir,
}

/// Failures loading or saving a [`PickerConfig`](crate::PickerConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

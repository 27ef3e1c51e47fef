//! The color value the picker reads, writes and persists.
//!
//! Red, green and blue are integer channels in 0–255 and alpha is a float in
//! 0.0–1.0. Construction never clamps: whatever the caller passes is carried
//! through encoding and comparison unchanged. A failed hex decode produces
//! [`Rgba::INVALID`], the `(-1, -1, -1, -1)` sentinel.

use std::fmt;
use std::str::FromStr;

use floem::peniko;
use serde::{Deserialize, Serialize};

use crate::error::ParseHexError;
use crate::math;
use crate::named;

/// RGBA color with 0–255 color channels and a 0.0–1.0 alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    r: i32,
    g: i32,
    b: i32,
    a: f64,
}

impl Rgba {
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const AQUA: Rgba = Rgba::rgb(0, 255, 255);
    pub const CYAN: Rgba = Rgba::AQUA;
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const MAGENTA: Rgba = Rgba::rgb(255, 0, 255);
    pub const FUCHSIA: Rgba = Rgba::MAGENTA;
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const WHITE_OPAQUE: Rgba = Rgba::new(255, 255, 255, 1.0);
    pub const WHITE_TRANSPARENT: Rgba = Rgba::new(255, 255, 255, 0.0);
    pub const BLACK_OPAQUE: Rgba = Rgba::new(0, 0, 0, 1.0);
    pub const BLACK_TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    /// Result of decoding a malformed hex string.
    pub const INVALID: Rgba = Rgba::new(-1, -1, -1, -1.0);

    /// Create from all four channels. Values are not range-checked.
    pub const fn new(r: i32, g: i32, b: i32, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 0–255 RGB values with full opacity.
    pub const fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Red component (0–255).
    pub fn r(&self) -> i32 {
        self.r
    }
    /// Green component (0–255).
    pub fn g(&self) -> i32 {
        self.g
    }
    /// Blue component (0–255).
    pub fn b(&self) -> i32 {
        self.b
    }
    /// Alpha component (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Same color channels with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// True unless some channel sits at or below the `-1` sentinel.
    ///
    /// Upper bounds are not checked.
    pub fn is_valid(&self) -> bool {
        self.r > -1 && self.g > -1 && self.b > -1 && self.a > -1.0
    }

    /// True only for exactly `(0, 0, 0, 1)`.
    pub fn is_opaque_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0 && self.a == 1.0
    }

    /// Euclidean distance over red, green and blue. Alpha does not count.
    ///
    /// Ranges from 0 to `255 * sqrt(3)` (~441.7) for in-range colors.
    pub fn distance(&self, other: &Rgba) -> f64 {
        let dr = f64::from(self.r - other.r);
        let dg = f64::from(self.g - other.g);
        let db = f64::from(self.b - other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Format as `rgba(r,g,b,a)`, e.g. `rgba(171,205,239,0.5)`.
    pub fn to_css_string(&self) -> String {
        self.to_string()
    }

    /// Format as lowercase `#rrggbbaa`.
    ///
    /// Alpha is written as `round(a * 255)`. Every pair is zero-padded to two
    /// characters; negative channels keep their sign (`-1`, `-ff`).
    pub fn to_hex(&self) -> String {
        let alpha = (self.a * 255.0 + 0.5).floor() as i64;
        format!(
            "#{}{}{}{}",
            hex_pair(i64::from(self.r)),
            hex_pair(i64::from(self.g)),
            hex_pair(i64::from(self.b)),
            hex_pair(alpha),
        )
    }

    /// Decode `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// Three-digit input doubles each digit (`#abc` is `#aabbcc`). Eight-digit
    /// input maps the last pair to alpha as `aa / 255`; the shorter forms are
    /// opaque.
    pub fn parse_hex(input: &str) -> Result<Self, ParseHexError> {
        let digits = input.strip_prefix('#').ok_or(ParseHexError::MissingHash)?;
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseHexError::InvalidDigit);
        }
        let pair = |at: usize| -> Result<i32, ParseHexError> {
            u8::from_str_radix(&digits[at..at + 2], 16)
                .map(i32::from)
                .map_err(|_| ParseHexError::InvalidDigit)
        };
        let nibble = |at: usize| -> Result<i32, ParseHexError> {
            u8::from_str_radix(&digits[at..at + 1], 16)
                .map(|n| i32::from(n) * 17)
                .map_err(|_| ParseHexError::InvalidDigit)
        };
        match digits.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => {
                let a = f64::from(pair(6)?) / 255.0;
                Ok(Self::new(pair(0)?, pair(2)?, pair(4)?, a))
            }
            len => Err(ParseHexError::Length(len)),
        }
    }

    /// Like [`Rgba::parse_hex`], but fails closed to [`Rgba::INVALID`].
    pub fn from_hex(input: &str) -> Self {
        Self::parse_hex(input).unwrap_or(Self::INVALID)
    }

    /// Resolve text typed into the hex field: a CSS color name or a hex
    /// string. Returns `None` unless the result is a valid color.
    pub fn resolve_input(text: &str) -> Option<Self> {
        let color = match named::lookup(text) {
            Some(color) => color,
            None => Self::from_hex(text),
        };
        color.is_valid().then_some(color)
    }

    /// Normalized (r, g, b, a) in 0.0–1.0, clamped.
    pub fn to_unit(&self) -> [f64; 4] {
        [
            math::channel_unit(self.r),
            math::channel_unit(self.g),
            math::channel_unit(self.b),
            self.a.clamp(0.0, 1.0),
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::GREEN
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<Rgba> for peniko::Color {
    fn from(color: Rgba) -> Self {
        let [r, g, b, a] = color.to_unit();
        peniko::Color::rgba(r, g, b, a)
    }
}

fn hex_pair(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{:02x}", value)
    }
}

/// The fixed named colors offered by the picker.
pub static PALETTE: [(&str, Rgba); 14] = [
    ("red", Rgba::RED),
    ("yellow", Rgba::YELLOW),
    ("green", Rgba::GREEN),
    ("aqua", Rgba::AQUA),
    ("cyan", Rgba::CYAN),
    ("blue", Rgba::BLUE),
    ("magenta", Rgba::MAGENTA),
    ("fuchsia", Rgba::FUCHSIA),
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("white-opaque", Rgba::WHITE_OPAQUE),
    ("white-transparent", Rgba::WHITE_TRANSPARENT),
    ("black-opaque", Rgba::BLACK_OPAQUE),
    ("black-transparent", Rgba::BLACK_TRANSPARENT),
];

//! Directional linear gradients with evenly spaced stops.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::GradientError;

/// Which way a gradient runs across the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    /// Left edge to right edge.
    ToRight,
    /// Top edge to bottom edge. Unrecognized names fall back to this.
    #[default]
    ToBottom,
}

impl Direction {
    /// `"to-right"` is [`Direction::ToRight`]; any other name is
    /// [`Direction::ToBottom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "to-right" => Direction::ToRight,
            _ => Direction::ToBottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToRight => "to-right",
            Direction::ToBottom => "to-bottom",
        }
    }
}

impl From<String> for Direction {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

/// A color at a fractional position (0.0–1.0) along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// A linear gradient over two or more colors.
///
/// The stop count is checked on construction and on deserialization, so a
/// `Gradient` always has at least two colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradient")]
pub struct Gradient {
    direction: Direction,
    colors: Vec<Rgba>,
}

#[derive(Deserialize)]
struct RawGradient {
    #[serde(default)]
    direction: Direction,
    colors: Vec<Rgba>,
}

impl TryFrom<RawGradient> for Gradient {
    type Error = GradientError;

    fn try_from(raw: RawGradient) -> Result<Self, Self::Error> {
        Gradient::new(raw.direction, raw.colors)
    }
}

impl Gradient {
    pub fn new(direction: Direction, colors: impl Into<Vec<Rgba>>) -> Result<Self, GradientError> {
        let colors = colors.into();
        if colors.len() < 2 {
            return Err(GradientError::TooFewStops(colors.len()));
        }
        Ok(Self { direction, colors })
    }

    pub fn to_right(colors: impl Into<Vec<Rgba>>) -> Result<Self, GradientError> {
        Self::new(Direction::ToRight, colors)
    }

    pub fn to_bottom(colors: impl Into<Vec<Rgba>>) -> Result<Self, GradientError> {
        Self::new(Direction::ToBottom, colors)
    }

    /// Red → yellow → green → aqua → blue → magenta, left to right.
    pub fn hue() -> Self {
        Self {
            direction: Direction::ToRight,
            colors: vec![
                Rgba::RED,
                Rgba::YELLOW,
                Rgba::GREEN,
                Rgba::AQUA,
                Rgba::BLUE,
                Rgba::MAGENTA,
            ],
        }
    }

    /// Overlays that turn a solid hue fill into a saturation/brightness area:
    /// white fading out to the right, then black fading in to the bottom.
    pub fn shade_overlays() -> Vec<Self> {
        vec![
            Self {
                direction: Direction::ToRight,
                colors: vec![Rgba::WHITE_OPAQUE, Rgba::WHITE_TRANSPARENT],
            },
            Self {
                direction: Direction::ToBottom,
                colors: vec![Rgba::BLACK_TRANSPARENT, Rgba::BLACK_OPAQUE],
            },
        ]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Stops at offsets `i / (n - 1)`.
    pub fn stops(&self) -> impl Iterator<Item = ColorStop> + '_ {
        let step = 1.0 / (self.colors.len() - 1) as f64;
        self.colors
            .iter()
            .enumerate()
            .map(move |(i, &color)| ColorStop {
                offset: i as f64 * step,
                color,
            })
    }

    /// Start and end of the gradient axis on a `width` x `height` surface.
    pub fn endpoints(&self, width: f64, height: f64) -> ((f64, f64), (f64, f64)) {
        match self.direction {
            Direction::ToRight => ((0.0, 0.0), (width, 0.0)),
            Direction::ToBottom => ((0.0, 0.0), (0.0, height)),
        }
    }
}

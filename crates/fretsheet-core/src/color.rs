//! Paint colors for diagrams and pages.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate. Colors come
//! from CSS color strings in sheet and config files (`"gray"`, `"#336699"`,
//! `"rgb(0 0 0 / 50%)"`) and are written back out as CSS for SVG.

use std::{fmt, str::FromStr};

use color::{DynamicColor, palette::css};
use thiserror::Error;

/// A CSS color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ParseColorError {
    input: String,
    reason: String,
}

/// An sRGB or CSS color space color with alpha.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use fretsheet_core::color::Color;
    ///
    /// let dot = Color::new("#808080").unwrap();
    /// assert_eq!(dot.alpha(), 1.0);
    /// assert!(Color::new("plaid").is_err());
    /// ```
    pub fn new(input: &str) -> Result<Self, ParseColorError> {
        DynamicColor::from_str(input)
            .map(|color| Self { color })
            .map_err(|err| ParseColorError {
                input: input.to_string(),
                reason: err.to_string(),
            })
    }

    pub fn black() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::BLACK),
        }
    }

    pub fn white() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::WHITE),
        }
    }

    pub fn gray() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::GRAY),
        }
    }

    /// The same color with its alpha replaced.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Opacity between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

//! Strokes for fretboard lines.
//!
//! Strings and frets of a diagram grid are drawn as independent line
//! segments, so a stroke only needs a paint, a width and an end cap.

use serde::Deserialize;
use svg::Node;

use crate::color::Color;

/// How the ends of a line segment are drawn (SVG `stroke-linecap`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    /// Extends each end by half the width, closing the grid corners.
    #[default]
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Paint, width and cap of a line.
///
/// # Examples
///
/// ```
/// use fretsheet_core::{color::Color, draw::{StrokeCap, StrokeDefinition}};
///
/// let grid = StrokeDefinition::hairline();
/// assert_eq!(grid.width(), 0.2);
/// assert_eq!(grid.cap(), StrokeCap::Round);
///
/// let bold = StrokeDefinition::new(Color::gray(), 1.0).with_cap(StrokeCap::Butt);
/// assert_eq!(bold.cap(), StrokeCap::Butt);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: StrokeCap,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::default(),
        }
    }

    /// Thin black line with round caps, the default fretboard grid.
    pub fn hairline() -> Self {
        Self::new(Color::black(), 0.2)
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Writes the stroke attributes onto an SVG node.
    pub fn apply_to<N: Node>(&self, mut node: N) -> N {
        node.assign("stroke", self.color.to_string());
        node.assign("stroke-opacity", self.color.alpha());
        node.assign("stroke-width", self.width);
        node.assign("stroke-linecap", self.cap.to_svg_value());
        node
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::hairline()
    }
}

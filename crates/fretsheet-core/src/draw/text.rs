//! Text styling and measurement.
//!
//! Fretsheet does not lay out rich text itself. It asks a [`TextMeasure`]
//! implementation for the bounding size of a string and only decides where
//! that box goes on the page.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`TextAlign`] - Horizontal alignment inside the text box
//! - [`TextMeasure`] - The measurement primitive used by the layout engine
//! - [`CosmicTextMeasure`] - Font-accurate measurement backed by `cosmic-text`
//! - [`MonospaceMeasure`] - A deterministic fixed-advance measurer
//!
//! # Quick Start
//!
//! ```
//! # use fretsheet_core::draw::{MonospaceMeasure, TextDefinition, TextMeasure};
//! let mut style = TextDefinition::new();
//! style.set_font_size(10);
//!
//! let size = MonospaceMeasure.measure("Am7", &style, None);
//! assert!(size.width() > 0.0);
//! assert!(size.height() > 0.0);
//! ```
//!
//! Measurement never fails: a measurer that cannot shape a string reports a
//! zero size so that layout can always complete.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};

use crate::{
    color::Color,
    geometry::{Insets, Size},
};

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Horizontal alignment of text within its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Returns the SVG `text-anchor` value for this alignment
    pub fn to_svg_anchor(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: left, center, right"
            )),
        }
    }
}

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Text color | `None` (SVG default, typically black) |
/// | Padding | Zero on all sides |
/// | Alignment | [`TextAlign::Left`] |
///
/// # Examples
///
/// ```
/// # use fretsheet_core::draw::{TextAlign, TextDefinition};
/// # use fretsheet_core::color::Color;
/// # use fretsheet_core::geometry::Insets;
/// let mut style = TextDefinition::new();
/// style.set_font_family("Helvetica");
/// style.set_font_size(6);
/// style.set_color(Some(Color::new("white").unwrap()));
/// style.set_padding(Insets::uniform(1.0));
/// style.set_align(TextAlign::Center);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    padding: Insets,
    align: TextAlign,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "Arial", "Times New Roman", "monospace")
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the renderer default (usually black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the padding around the text content.
    ///
    /// Padding is part of the vertical space a text element consumes.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Sets the horizontal alignment.
    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    /// Returns a copy of this definition with a different alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns a reference to the text color, if set.
    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Returns the current padding configuration.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Returns the height of one line of text in this style.
    pub fn line_height(&self) -> f32 {
        self.font_size as f32 * LINE_HEIGHT_FACTOR
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            color: None,
            padding: Insets::default(),
            align: TextAlign::default(),
        }
    }
}

/// The text-measurement primitive used by the layout engine.
///
/// Implementations return the bounding size of `text` rendered in
/// `definition`, excluding padding, wrapped to `max_width` when given.
/// They must be deterministic: the same inputs always produce the same size,
/// which is what allows measurement and drawing passes to agree.
pub trait TextMeasure: fmt::Debug + Send + Sync {
    fn measure(&self, text: &str, definition: &TextDefinition, max_width: Option<f32>) -> Size;
}

/// Font-accurate text measurement using `cosmic-text`.
///
/// Holds a single `FontSystem`, which is expensive to create, behind a mutex.
/// Use [`CosmicTextMeasure::shared`] to reuse the process-wide instance.
pub struct CosmicTextMeasure {
    font_system: Mutex<FontSystem>,
}

impl fmt::Debug for CosmicTextMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmicTextMeasure").finish_non_exhaustive()
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED_MEASURE: OnceLock<CosmicTextMeasure> = OnceLock::new();

impl CosmicTextMeasure {
    /// Create a new measurer with its own `FontSystem`
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Returns the process-wide measurer, creating it on first use.
    pub fn shared() -> &'static Self {
        SHARED_MEASURE.get_or_init(Self::new)
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure(&self, text: &str, definition: &TextDefinition, max_width: Option<f32>) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!(text; "FontSystem lock poisoned, measuring as zero size");
            return Size::default();
        };

        // Page units are points and map 1:1 to SVG user units.
        let font_size = definition.font_size() as f32;
        let metrics = Metrics::new(font_size, definition.line_height());

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(definition.font_family()));

        buffer.set_size(max_width, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_line_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            return Size::default();
        }

        for last in layout_runs.iter().map(|run| run.glyphs.last()) {
            if let Some(last) = last {
                max_line_width = max_line_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        Size::new(max_line_width, total_height)
    }
}

/// A deterministic measurer with a fixed advance per character.
///
/// Each character is `0.6 × font size` wide and each line is one
/// [`TextDefinition::line_height`] tall. Lines wrap by character count when a
/// maximum width is given. Useful where reproducible metrics matter more than
/// typographic accuracy, such as layout tests and environments without fonts.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonospaceMeasure;

impl MonospaceMeasure {
    const ADVANCE_FACTOR: f32 = 0.6;
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, definition: &TextDefinition, max_width: Option<f32>) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let advance = definition.font_size() as f32 * Self::ADVANCE_FACTOR;
        let chars_per_line = max_width
            .filter(|_| advance > 0.0)
            .map(|width| ((width / advance).floor() as usize).max(1));

        let mut width: f32 = 0.0;
        let mut lines = 0usize;
        for line in text.lines() {
            let count = line.chars().count();
            match chars_per_line {
                Some(limit) if count > limit => {
                    lines += count.div_ceil(limit);
                    width = width.max(limit as f32 * advance);
                }
                _ => {
                    lines += 1;
                    width = width.max(count as f32 * advance);
                }
            }
        }

        Size::new(width, lines as f32 * definition.line_height())
    }
}

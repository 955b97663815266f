//! Configuration types for Fretsheet rendering.
//!
//! All types implement [`serde::Deserialize`] and fill every missing field
//! with its default, so a config file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PageConfig`] - Page size, margin and background.
//! - [`DiagramConfig`] - Chord diagram geometry, colors, markers and fonts.
//! - [`TextConfig`] - Title and section text styling.
//!
//! # Example
//!
//! ```
//! # use fretsheet::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [page]
//!     margin = 24
//!
//!     [diagram]
//!     dot_color = "#336699"
//!     "##,
//! )
//! .unwrap();
//!
//! assert_eq!(config.page().margin(), 24.0);
//! assert!(config.diagram().to_style().is_ok());
//! ```

use serde::Deserialize;

use fretsheet_core::{
    color::Color,
    draw::{StrokeCap, TextAlign, TextDefinition},
    geometry::{Insets, Size},
};

use crate::{diagram::DiagramStyle, document::PageSetup};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Page geometry section.
    #[serde(default)]
    page: PageConfig,

    /// Chord diagram section.
    #[serde(default)]
    diagram: DiagramConfig,

    /// Body text section.
    #[serde(default)]
    text: TextConfig,
}

impl AppConfig {
    pub fn new(page: PageConfig, diagram: DiagramConfig, text: TextConfig) -> Self {
        Self {
            page,
            diagram,
            text,
        }
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    pub fn text(&self) -> &TextConfig {
        &self.text
    }
}

/// Page geometry, in points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    width: f32,
    height: f32,
    margin: f32,
    /// Page background as a CSS color string; transparent when unset.
    background_color: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 36.0,
            background_color: None,
        }
    }
}

impl PageConfig {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Builds the page geometry used for pagination.
    ///
    /// # Errors
    ///
    /// Returns an error for a page size that is not a positive number, a
    /// margin that is negative, not a number or leaves no content area, or an
    /// invalid background color.
    pub fn to_setup(&self) -> Result<PageSetup, String> {
        positive("page width", self.width)?;
        positive("page height", self.height)?;
        non_negative("page margin", self.margin)?;
        if 2.0 * self.margin >= self.width.min(self.height) {
            return Err(format!(
                "Page margin {} leaves no room on a {}x{} page",
                self.margin, self.width, self.height
            ));
        }
        Ok(
            PageSetup::new(Size::new(self.width, self.height), self.margin)
                .with_background(self.background_color()?),
        )
    }
}

/// Chord diagram settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    grid_width: f32,
    grid_height: f32,
    fret_rows: u32,
    name_scale: f32,
    dot_color: String,
    line_color: String,
    line_width: f32,
    line_cap: StrokeCap,
    muted_marker: String,
    open_marker: String,
    font_family: Option<String>,
    name_size: u16,
    finger_size: u16,
    marker_size: u16,
    base_fret_size: u16,
    note_size: u16,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            grid_width: 50.0,
            grid_height: 60.0,
            fret_rows: 5,
            name_scale: 0.8,
            dot_color: "gray".to_string(),
            line_color: "black".to_string(),
            line_width: 0.2,
            line_cap: StrokeCap::Round,
            muted_marker: "×".to_string(),
            open_marker: "○".to_string(),
            font_family: None,
            name_size: 10,
            finger_size: 6,
            marker_size: 4,
            base_fret_size: 4,
            note_size: 4,
        }
    }
}

impl DiagramConfig {
    pub fn fret_rows(&self) -> u32 {
        self.fret_rows
    }

    /// Builds the diagram style from this section.
    ///
    /// # Errors
    ///
    /// Returns an error for a grid size or name scale that is not a positive
    /// number, a negative line width, zero fret rows, or an invalid color.
    pub fn to_style(&self) -> Result<DiagramStyle, String> {
        positive("diagram grid_width", self.grid_width)?;
        positive("diagram grid_height", self.grid_height)?;
        positive("diagram name_scale", self.name_scale)?;
        non_negative("diagram line_width", self.line_width)?;
        if self.fret_rows == 0 {
            return Err("Diagram needs at least one fret row".to_string());
        }

        let dot_color = Color::new(&self.dot_color)
            .map_err(|err| format!("Invalid dot color in config: {err}"))?;
        let line_color = Color::new(&self.line_color)
            .map_err(|err| format!("Invalid line color in config: {err}"))?;

        let mut style = DiagramStyle::new();
        style.set_grid_size(Size::new(self.grid_width, self.grid_height));
        style.set_fret_rows(self.fret_rows);
        style.set_name_scale(self.name_scale);
        style.set_dot_color(dot_color);
        style.set_line(line_color, self.line_width);
        style.set_line_cap(self.line_cap);
        style.set_markers(self.muted_marker.as_str(), self.open_marker.as_str());
        if let Some(family) = &self.font_family {
            style.set_font_family(family);
        }
        style.name_text_mut().set_font_size(self.name_size);
        style.finger_text_mut().set_font_size(self.finger_size);
        style.marker_text_mut().set_font_size(self.marker_size);
        style.base_fret_text_mut().set_font_size(self.base_fret_size);
        style.note_text_mut().set_font_size(self.note_size);
        Ok(style)
    }
}

/// Styling of titles and section text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    font_family: String,
    font_size: u16,
    title_size: u16,
    padding: f32,
    color: Option<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            title_size: 18,
            padding: 2.0,
            color: None,
        }
    }
}

impl TextConfig {
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn title_size(&self) -> u16 {
        self.title_size
    }

    /// Text style for paragraphs and section labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color or padding is invalid.
    pub fn body_style(&self) -> Result<TextDefinition, String> {
        self.style(self.font_size, TextAlign::Left)
    }

    /// Text style for the sheet title.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color or padding is invalid.
    pub fn title_style(&self) -> Result<TextDefinition, String> {
        self.style(self.title_size, TextAlign::Center)
    }

    fn style(&self, size: u16, align: TextAlign) -> Result<TextDefinition, String> {
        non_negative("text padding", self.padding)?;
        let color = self
            .color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid text color in config: {err}"))?;

        let mut style = TextDefinition::new();
        style.set_font_family(&self.font_family);
        style.set_font_size(size);
        style.set_padding(Insets::uniform(self.padding));
        style.set_color(color);
        Ok(style.with_align(align))
    }
}

/// Accepts finite values greater than zero.
fn positive(name: &str, value: f32) -> Result<f32, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{name} must be a positive number, got {value}"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<f32, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{name} must be zero or a positive number, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_a4() {
        let config = AppConfig::default();
        let setup = config.page().to_setup().unwrap();
        assert_eq!(setup.size(), Size::new(595.0, 842.0));
        assert_eq!(setup.margin(), Insets::uniform(36.0));
        assert!(setup.background().is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [diagram]
            fret_rows = 4
            font_family = "Helvetica"
            line_cap = "square"
            "#,
        )
        .unwrap();

        let style = config.diagram().to_style().unwrap();
        assert_eq!(style.fret_rows(), 4);
        assert_eq!(style.grid_size(), Size::new(50.0, 60.0));
        assert_eq!(style.name_text().font_family(), "Helvetica");
        assert_eq!(style.grid_stroke().cap(), StrokeCap::Square);
        assert_eq!(config.text().font_size(), 12);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let bad_color: AppConfig = toml::from_str(
            r#"
            [diagram]
            dot_color = "not-a-color"
            "#,
        )
        .unwrap();
        assert!(bad_color.diagram().to_style().unwrap_err().contains("dot color"));

        let bad_margin: AppConfig = toml::from_str(
            r#"
            [page]
            width = 100
            height = 100
            margin = 60
            "#,
        )
        .unwrap();
        assert!(bad_margin.page().to_setup().is_err());

        let no_rows: AppConfig = toml::from_str("[diagram]\nfret_rows = 0").unwrap();
        assert!(no_rows.diagram().to_style().is_err());
    }

    #[test]
    fn test_diagram_lengths_must_be_positive_numbers() {
        for source in [
            "[diagram]\nname_scale = -3.0",
            "[diagram]\nname_scale = 0.0",
            "[diagram]\nname_scale = nan",
            "[diagram]\ngrid_width = nan",
            "[diagram]\ngrid_height = inf",
            "[diagram]\nline_width = -0.5",
        ] {
            let config: AppConfig = toml::from_str(source).unwrap();
            assert!(
                config.diagram().to_style().is_err(),
                "{source:?} should be rejected"
            );
        }

        let hairless: AppConfig = toml::from_str("[diagram]\nline_width = 0.0").unwrap();
        assert!(hairless.diagram().to_style().is_ok());
    }

    #[test]
    fn test_page_and_text_lengths_must_be_numbers() {
        for source in [
            "[page]\nmargin = nan",
            "[page]\nmargin = -1.0",
            "[page]\nwidth = nan",
            "[page]\nheight = -inf",
        ] {
            let config: AppConfig = toml::from_str(source).unwrap();
            assert!(config.page().to_setup().is_err(), "{source:?} should be rejected");
        }

        let padding: AppConfig = toml::from_str("[text]\npadding = -2.0").unwrap();
        assert!(padding.text().body_style().is_err());
        assert!(padding.text().title_style().is_err());
    }

    #[test]
    fn test_background_and_text_color() {
        let config: AppConfig = toml::from_str(
            r##"
            [page]
            background_color = "#fffff0"

            [text]
            color = "navy"
            title_size = 20
            "##,
        )
        .unwrap();

        assert!(config.page().background_color().unwrap().is_some());
        let title = config.text().title_style().unwrap();
        assert_eq!(title.font_size(), 20);
        assert_eq!(title.align(), TextAlign::Center);
        assert!(title.color().is_some());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: Result<AppConfig, _> = toml::from_str("[diagram]\nsparkles = true");
        assert!(config.is_ok());
    }
}

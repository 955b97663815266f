//! Fretsheet - chord diagram layout and paginated chord sheets.
//!
//! Chord definitions are laid out as fretboard diagrams by a small element
//! engine that measures and draws with the same code path, flowed onto
//! fixed-size pages, and exported as SVG.
//!
//! ```text
//! TOML sheet ──parse──▶ Sheet ──build──▶ Document ──paginate──▶ Pages ──export──▶ SVG
//! ```

pub mod chord;
pub mod config;
pub mod diagram;
pub mod document;
pub mod element;
pub mod export;
pub mod sheet;

mod error;

pub use fretsheet_core::{color, draw, geometry};

pub use error::FretsheetError;

use std::sync::Arc;

use log::{debug, info, trace};

use config::AppConfig;
use diagram::{ChordDiagram, DiagramRow, DiagramStyle};
use document::{Document, Page};
use draw::{CosmicTextMeasure, TextAlign, TextMeasure};
use element::{Spacer, TextElement};
use export::Exporter;
use sheet::{Sheet, SheetError};

/// Builder for parsing and rendering chord sheets.
///
/// # Examples
///
/// ```rust,no_run
/// use fretsheet::{SheetBuilder, config::AppConfig};
///
/// let source = r#"
/// title = "Demo"
///
/// [[chord]]
/// name = "Em"
/// frets = [0, 2, 2, 0, 0, 0]
/// "#;
///
/// let builder = SheetBuilder::new(AppConfig::default());
/// let sheet = builder.parse(source).expect("Failed to parse");
/// let pages = builder.render_svg_pages(&sheet).expect("Failed to render");
/// assert_eq!(pages.len(), 1);
/// ```
#[derive(Default)]
pub struct SheetBuilder {
    config: AppConfig,
    measurer: Option<&'static dyn TextMeasure>,
}

impl SheetBuilder {
    /// Create a new sheet builder with the given configuration.
    ///
    /// Text is measured with the shared `cosmic-text` font system unless
    /// [`with_measurer`](Self::with_measurer) picks another measurer.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            measurer: None,
        }
    }

    /// Use `measurer` for all text measurement.
    pub fn with_measurer(mut self, measurer: &'static dyn TextMeasure) -> Self {
        self.measurer = Some(measurer);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse TOML source into a validated sheet.
    ///
    /// # Errors
    ///
    /// Returns [`FretsheetError::Sheet`] when the source is not a valid sheet
    /// (including chord definitions that fail validation) and
    /// [`FretsheetError::Invalid`] for duplicate or unknown chord names.
    pub fn parse(&self, source: &str) -> Result<Sheet, FretsheetError> {
        info!("Parsing sheet");

        let sheet: Sheet =
            toml::from_str(source).map_err(|err| FretsheetError::new_sheet_error(err, source))?;
        sheet.validate()?;

        debug!(chords = sheet.chords().len(), sections = sheet.sections().len(); "Sheet parsed");
        trace!(sheet:?; "Parsed sheet");
        Ok(sheet)
    }

    /// Turn a sheet into a document of blocks: title, subtitle, then each
    /// section's label, text and diagram lines. A sheet without sections
    /// shows all of its chords. Each line of diagrams is a block of its own,
    /// so a long section continues on the next page.
    ///
    /// # Errors
    ///
    /// Returns [`FretsheetError::Config`] when the configuration holds an
    /// invalid value and [`FretsheetError::Invalid`] for unknown chord names.
    pub fn build_document(&self, sheet: &Sheet) -> Result<Document, FretsheetError> {
        info!(title = sheet.title().unwrap_or_default(); "Building document");

        let setup = self
            .config
            .page()
            .to_setup()
            .map_err(FretsheetError::Config)?;
        let style = Arc::new(
            self.config
                .diagram()
                .to_style()
                .map_err(FretsheetError::Config)?,
        );
        let text = self.config.text();
        let body = text.body_style().map_err(FretsheetError::Config)?;
        let title = text.title_style().map_err(FretsheetError::Config)?;
        let gap = f32::from(text.font_size());
        let line_width = setup.content_area().width();

        let mut document = Document::new(setup);

        if let Some(content) = sheet.title() {
            document.push(TextElement::new(content, title));
        }
        if let Some(content) = sheet.subtitle() {
            document.push(TextElement::new(
                content,
                body.clone().with_align(TextAlign::Center),
            ));
        }
        if sheet.title().is_some() || sheet.subtitle().is_some() {
            document.push(Spacer::new(gap));
        }

        if sheet.sections().is_empty() {
            let names = sheet.chords().iter().map(|chord| chord.name());
            for line in chord_row(sheet, names, 0, &style)?.into_lines(line_width) {
                document.push(line);
            }
        }

        for (index, section) in sheet.sections().iter().enumerate() {
            if index > 0 {
                document.push(Spacer::new(gap));
            }
            if let Some(label) = section.label() {
                document.push(TextElement::new(label, body.clone()));
            }
            if let Some(content) = section.text() {
                document.push(TextElement::new(content, body.clone()));
            }
            let names = section.chords().iter().map(String::as_str);
            for line in chord_row(sheet, names, index + 1, &style)?.into_lines(line_width) {
                document.push(line);
            }
        }

        debug!(blocks = document.len(); "Document built");
        Ok(document)
    }

    /// Build and paginate a sheet.
    ///
    /// # Errors
    ///
    /// See [`build_document`](Self::build_document).
    pub fn paginate(&self, sheet: &Sheet) -> Result<(Document, Vec<Page>), FretsheetError> {
        let document = self.build_document(sheet)?;
        let pages = document.paginate(self.measurer());
        Ok((document, pages))
    }

    /// Render a sheet to one SVG string per page.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`build_document`](Self::build_document) and
    /// [`FretsheetError::Export`] if a page cannot be exported.
    pub fn render_svg_pages(&self, sheet: &Sheet) -> Result<Vec<String>, FretsheetError> {
        let (document, pages) = self.paginate(sheet)?;

        let mut exporter = export::svg::Svg::new(document.page_setup().clone());
        let svgs = exporter.export_pages(&pages)?;

        info!(pages = svgs.len(); "SVG rendered successfully");
        Ok(svgs)
    }

    fn measurer(&self) -> &'static dyn TextMeasure {
        match self.measurer {
            Some(measurer) => measurer,
            None => CosmicTextMeasure::shared(),
        }
    }
}

/// Diagrams for the named chords of `sheet`, in order.
fn chord_row<'a>(
    sheet: &Sheet,
    names: impl Iterator<Item = &'a str>,
    section: usize,
    style: &Arc<DiagramStyle>,
) -> Result<DiagramRow, SheetError> {
    let options = sheet.options();
    names
        .map(|name| {
            sheet
                .chord(name)
                .map(|chord| ChordDiagram::new(chord, options, Arc::clone(style)))
                .ok_or_else(|| SheetError::UnknownChord {
                    name: name.to_string(),
                    section,
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DiagramRow::new)
}

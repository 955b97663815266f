//! Chord sheets: the input document of the renderer.
//!
//! A sheet is a title, a library of chord definitions and an ordered list of
//! sections. Sections print a label, free text and a row of diagrams for
//! the chords they reference by name.
//!
//! ```toml
//! title = "House of the Rising Sun"
//!
//! [options]
//! show_notes = true
//!
//! [[chord]]
//! name = "Am"
//! frets = [-1, 0, 2, 2, 1, 0]
//! fingers = [0, 0, 2, 3, 1, 0]
//!
//! [[section]]
//! label = "Verse"
//! text = "There is a house in New Orleans"
//! chords = ["Am"]
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::{chord::ChordDefinition, diagram::DiagramDisplayOptions};

/// Reference problems found after a sheet was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("section {section} uses chord `{name}`, which is not defined")]
    UnknownChord { name: String, section: usize },

    #[error("chord `{0}` is defined more than once")]
    DuplicateChord(String),
}

/// A titled section of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Section {
    label: Option<String>,
    text: Option<String>,
    chords: Vec<String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_chords<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chords = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Names of the chords shown in this section, in order.
    pub fn chords(&self) -> &[String] {
        &self.chords
    }
}

/// A decoded chord sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sheet {
    title: Option<String>,
    subtitle: Option<String>,
    options: DiagramDisplayOptions,
    #[serde(rename = "chord")]
    chords: Vec<ChordDefinition>,
    #[serde(rename = "section")]
    sections: Vec<Section>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_chord(mut self, chord: ChordDefinition) -> Self {
        self.chords.push(chord);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn options(&self) -> DiagramDisplayOptions {
        self.options
    }

    pub fn set_options(&mut self, options: DiagramDisplayOptions) {
        self.options = options;
    }

    pub fn chords(&self) -> &[ChordDefinition] {
        &self.chords
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a chord definition by name.
    pub fn chord(&self, name: &str) -> Option<&ChordDefinition> {
        self.chords.iter().find(|chord| chord.name() == name)
    }

    /// Checks that chord names are unique and every section reference
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns the first [`SheetError`] found.
    pub fn validate(&self) -> Result<(), SheetError> {
        let mut seen = HashSet::new();
        for chord in &self.chords {
            if !seen.insert(chord.name()) {
                return Err(SheetError::DuplicateChord(chord.name().to_string()));
            }
        }

        for (index, section) in self.sections.iter().enumerate() {
            if let Some(name) = section.chords().iter().find(|name| !seen.contains(name.as_str())) {
                return Err(SheetError::UnknownChord {
                    name: name.clone(),
                    section: index + 1,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Instrument;

    const SOURCE: &str = r#"
        title = "Test"

        [options]
        mirror_diagram = true

        [[chord]]
        name = "C"
        instrument = "ukulele"
        frets = [0, 0, 0, 3]

        [[chord]]
        name = "G"
        instrument = "ukulele"
        frets = [0, 2, 3, 2]
        fingers = [0, 1, 3, 2]

        [[section]]
        label = "Intro"
        chords = ["C", "G"]

        [[section]]
        text = "Just words"
    "#;

    #[test]
    fn test_decode_sheet() {
        let sheet: Sheet = toml::from_str(SOURCE).unwrap();
        assert_eq!(sheet.title(), Some("Test"));
        assert!(sheet.options().mirror_diagram);
        assert!(sheet.options().show_fingers);
        assert_eq!(sheet.chords().len(), 2);
        assert_eq!(sheet.sections()[0].chords(), &["C", "G"]);
        assert_eq!(sheet.sections()[1].text(), Some("Just words"));
        assert_eq!(sheet.chord("G").unwrap().fingers(), &[0, 1, 3, 2]);
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_unknown_reference() {
        let sheet = Sheet::new().with_section(Section::new().with_chords(["Dm"]));
        assert_eq!(
            sheet.validate(),
            Err(SheetError::UnknownChord {
                name: "Dm".to_string(),
                section: 1
            })
        );
    }

    #[test]
    fn test_duplicate_chord() {
        let chord = ChordDefinition::new(
            "A",
            Instrument::ukulele(),
            vec![2, 1, 0, 0],
            vec![2, 1, 0, 0],
            vec![],
            1,
        )
        .unwrap();
        let sheet = Sheet::new().with_chord(chord.clone()).with_chord(chord);
        assert_eq!(
            sheet.validate(),
            Err(SheetError::DuplicateChord("A".to_string()))
        );
    }

    #[test]
    fn test_invalid_chord_fails_decoding() {
        let source = r#"
            [[chord]]
            name = "Bad"
            frets = [0, 0]
        "#;
        let err = toml::from_str::<Sheet>(source).unwrap_err();
        assert!(err.message().contains("chord `Bad`"));
        assert!(err.span().is_some());
    }
}

//! Fretted instruments and their tunings.

use serde::Deserialize;

use super::Note;

/// A fretted instrument: a name and the open-string tuning.
///
/// Strings are ordered the way diagrams draw them for a right-handed player,
/// lowest-pitched string first.
///
/// In sheet files an instrument is either a preset name or a custom table:
///
/// ```toml
/// instrument = "ukulele"
/// # or
/// instrument = { name = "dadgad", tuning = ["D", "A", "D", "G", "A", "D"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "InstrumentSpec")]
pub struct Instrument {
    name: String,
    tuning: Vec<Note>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstrumentSpec {
    Preset(String),
    Custom { name: String, tuning: Vec<Note> },
}

impl TryFrom<InstrumentSpec> for Instrument {
    type Error = String;

    fn try_from(spec: InstrumentSpec) -> Result<Self, Self::Error> {
        match spec {
            InstrumentSpec::Preset(name) => Self::preset(&name).ok_or_else(|| {
                format!(
                    "unknown instrument `{name}`, presets: guitar, ukulele, bass, mandolin, banjo"
                )
            }),
            InstrumentSpec::Custom { name, tuning } => Ok(Self::new(name, tuning)),
        }
    }
}

impl Instrument {
    pub fn new(name: impl Into<String>, tuning: Vec<Note>) -> Self {
        Self {
            name: name.into(),
            tuning,
        }
    }

    /// Six-string guitar in standard tuning.
    pub fn guitar() -> Self {
        use Note::*;
        Self::new("guitar", vec![E, A, D, G, B, E])
    }

    /// Soprano/concert/tenor ukulele in standard (re-entrant) tuning.
    pub fn ukulele() -> Self {
        use Note::*;
        Self::new("ukulele", vec![G, C, E, A])
    }

    /// Looks up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        use Note::*;
        match name.to_ascii_lowercase().as_str() {
            "guitar" => Some(Self::guitar()),
            "ukulele" => Some(Self::ukulele()),
            "bass" => Some(Self::new("bass", vec![E, A, D, G])),
            "mandolin" => Some(Self::new("mandolin", vec![G, D, A, E])),
            "banjo" => Some(Self::new("banjo", vec![G, D, G, B, D])),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the open-string notes, lowest string first.
    pub fn tuning(&self) -> &[Note] {
        &self.tuning
    }

    /// Number of strings.
    pub fn strings(&self) -> usize {
        self.tuning.len()
    }

    /// Returns the same instrument with the string order reversed.
    pub fn reversed(&self) -> Self {
        Self {
            name: self.name.clone(),
            tuning: self.tuning.iter().rev().copied().collect(),
        }
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::guitar()
    }
}

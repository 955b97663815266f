//! Chord definitions: the fretboard positions a diagram displays.
//!
//! A [`ChordDefinition`] is produced by an outside collaborator (a ChordPro
//! parser, a chord database, or a sheet file) and is read-only to the layout
//! engine. Unlike the raw data such producers emit, a definition is validated
//! once at construction so that layout can index its arrays freely.

mod instrument;
mod note;

pub use instrument::Instrument;
pub use note::Note;

use serde::Deserialize;
use thiserror::Error;

/// Fret value of a string that is not played.
pub const MUTED: i32 = -1;
/// Fret value of a string that is played open.
pub const OPEN: i32 = 0;

/// Reasons a chord definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("an instrument needs at least 2 strings, got {0}")]
    TooFewStrings(usize),

    #[error("expected {expected} fret values (one per string), got {found}")]
    FretCount { expected: usize, found: usize },

    #[error("expected {expected} finger values (one per string), got {found}")]
    FingerCount { expected: usize, found: usize },

    #[error("string {string} has fret {fret}; frets must be -1 (muted), 0 (open) or positive")]
    InvalidFret { string: usize, fret: i32 },

    #[error("base fret must be 1 or higher")]
    InvalidBaseFret,

    #[error("barre at fret {fret} must sit on fret 1 or higher")]
    InvalidBarreFret { fret: i32 },

    #[error(
        "barre at fret {fret} covers strings {start}..{end} but the instrument has {strings} strings",
        end = start + length
    )]
    BarreOutOfRange {
        fret: i32,
        start: usize,
        length: usize,
        strings: usize,
    },
}

/// A single finger pressing several adjacent strings at one fret.
///
/// `start` is the 0-based index of the first covered string in as-stored
/// (right-handed) order and `length` the number of strings covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Barre {
    pub fret: i32,
    pub start: usize,
    pub length: usize,
    #[serde(default)]
    pub finger: u8,
}

impl Barre {
    pub fn new(fret: i32, start: usize, length: usize, finger: u8) -> Self {
        Self {
            fret,
            start,
            length,
            finger,
        }
    }

    /// Index one past the last covered string.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether the barre covers `string`.
    pub fn covers(&self, string: usize) -> bool {
        (self.start..self.end()).contains(&string)
    }
}

/// An immutable, validated chord shape.
///
/// Fret values are relative to [`base_fret`](Self::base_fret): fret `1` is
/// the first row of the diagram. `-1` marks a muted string and `0` an open
/// one. Fingers use `0` for "no finger assigned".
///
/// # Examples
///
/// ```
/// # use fretsheet::chord::{ChordDefinition, Instrument, Note};
/// let c_major = ChordDefinition::new(
///     "C",
///     Instrument::guitar(),
///     vec![-1, 3, 2, 0, 1, 0],
///     vec![0, 3, 2, 0, 1, 0],
///     vec![],
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(c_major.notes()[1], Some(Note::C));
/// assert_eq!(c_major.notes()[0], None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawChord")]
pub struct ChordDefinition {
    name: String,
    instrument: Instrument,
    frets: Vec<i32>,
    fingers: Vec<u8>,
    barres: Vec<Barre>,
    base_fret: u32,
}

/// Sheet-file form of a chord; `fingers` may be omitted.
#[derive(Deserialize)]
struct RawChord {
    name: String,
    #[serde(default)]
    instrument: Instrument,
    frets: Vec<i32>,
    #[serde(default)]
    fingers: Vec<u8>,
    #[serde(default)]
    barres: Vec<Barre>,
    #[serde(default = "default_base_fret")]
    base_fret: u32,
}

fn default_base_fret() -> u32 {
    1
}

impl TryFrom<RawChord> for ChordDefinition {
    type Error = String;

    fn try_from(raw: RawChord) -> Result<Self, Self::Error> {
        let fingers = if raw.fingers.is_empty() {
            vec![0; raw.instrument.strings()]
        } else {
            raw.fingers
        };
        Self::new(
            raw.name.clone(),
            raw.instrument,
            raw.frets,
            fingers,
            raw.barres,
            raw.base_fret,
        )
        .map_err(|err| format!("chord `{}`: {err}", raw.name))
    }
}

impl ChordDefinition {
    /// Builds a chord definition, validating it against the instrument.
    ///
    /// # Errors
    ///
    /// Returns a [`ChordError`] when the fret or finger arrays do not have
    /// one entry per string, a fret is below `-1`, the base fret is `0`, or
    /// a barre does not fit on the fretboard.
    pub fn new(
        name: impl Into<String>,
        instrument: Instrument,
        frets: Vec<i32>,
        fingers: Vec<u8>,
        barres: Vec<Barre>,
        base_fret: u32,
    ) -> Result<Self, ChordError> {
        let strings = instrument.strings();
        if strings < 2 {
            return Err(ChordError::TooFewStrings(strings));
        }
        if frets.len() != strings {
            return Err(ChordError::FretCount {
                expected: strings,
                found: frets.len(),
            });
        }
        if fingers.len() != strings {
            return Err(ChordError::FingerCount {
                expected: strings,
                found: fingers.len(),
            });
        }
        if let Some((string, &fret)) = frets.iter().enumerate().find(|(_, fret)| **fret < MUTED) {
            return Err(ChordError::InvalidFret { string, fret });
        }
        if base_fret == 0 {
            return Err(ChordError::InvalidBaseFret);
        }
        for barre in &barres {
            if barre.fret < 1 {
                return Err(ChordError::InvalidBarreFret { fret: barre.fret });
            }
            if barre.length == 0 || barre.end() > strings {
                return Err(ChordError::BarreOutOfRange {
                    fret: barre.fret,
                    start: barre.start,
                    length: barre.length,
                    strings,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            instrument,
            frets,
            fingers,
            barres,
            base_fret,
        })
    }

    /// The display name, e.g. `"Am7"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Number of strings of the instrument.
    pub fn strings(&self) -> usize {
        self.instrument.strings()
    }

    /// Per-string frets relative to the base fret.
    pub fn frets(&self) -> &[i32] {
        &self.frets
    }

    /// Per-string finger numbers, `0` for none.
    pub fn fingers(&self) -> &[u8] {
        &self.fingers
    }

    pub fn barres(&self) -> &[Barre] {
        &self.barres
    }

    /// The first fret shown by the diagram; `1` when the shape sits at the nut.
    pub fn base_fret(&self) -> u32 {
        self.base_fret
    }

    /// Returns the first barre at `fret`, if any.
    pub fn barre_at(&self, fret: i32) -> Option<&Barre> {
        self.barres.iter().find(|barre| barre.fret == fret)
    }

    /// Returns the sounded note of each string, `None` for muted strings.
    pub fn notes(&self) -> Vec<Option<Note>> {
        self.instrument
            .tuning()
            .iter()
            .zip(&self.frets)
            .map(|(open, &fret)| match fret {
                MUTED => None,
                OPEN => Some(*open),
                fret => Some(open.transpose(self.base_fret as i32 - 1 + fret)),
            })
            .collect()
    }

    /// Mirrors a barre span for left-handed display.
    ///
    /// A span covering strings `start..start + length` covers
    /// `strings - start - length..strings - start` once the string order is
    /// reversed. Applying the mirror twice yields the original barre. A
    /// barre reaching past the last string mirrors to start at string 0.
    pub fn mirror_barre(&self, barre: &Barre) -> Barre {
        Barre {
            start: self.strings().saturating_sub(barre.end()),
            ..*barre
        }
    }

    /// Returns the left-handed version of this chord: string order reversed
    /// for frets, fingers, tuning and barre spans.
    pub fn mirrored(&self) -> Self {
        Self {
            name: self.name.clone(),
            instrument: self.instrument.reversed(),
            frets: self.frets.iter().rev().copied().collect(),
            fingers: self.fingers.iter().rev().copied().collect(),
            barres: self
                .barres
                .iter()
                .map(|barre| self.mirror_barre(barre))
                .collect(),
            base_fret: self.base_fret,
        }
    }
}

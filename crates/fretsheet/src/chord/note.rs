//! Pitch classes used for tunings and the notes row.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// One of the twelve pitch classes.
///
/// Parsing accepts sharps and flats in ASCII (`C#`, `Db`) or with the music
/// symbols (`C♯`, `D♭`); display always uses sharps.
///
/// # Examples
///
/// ```
/// # use fretsheet::chord::Note;
/// let low_e: Note = "E".parse().unwrap();
/// assert_eq!(low_e.transpose(3), Note::G);
/// assert_eq!("Db".parse::<Note>().unwrap(), Note::CSharp);
/// assert_eq!(Note::FSharp.to_string(), "F♯");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Note {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Note {
    const ALL: [Note; 12] = [
        Note::C,
        Note::CSharp,
        Note::D,
        Note::DSharp,
        Note::E,
        Note::F,
        Note::FSharp,
        Note::G,
        Note::GSharp,
        Note::A,
        Note::ASharp,
        Note::B,
    ];

    /// Semitones above C.
    pub fn semitone(self) -> u8 {
        self as u8
    }

    /// Returns the note `semitones` above this one, wrapping at the octave.
    pub fn transpose(self, semitones: i32) -> Note {
        let index = (self.semitone() as i32 + semitones).rem_euclid(12);
        Self::ALL[index as usize]
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::CSharp => "C♯",
            Note::D => "D",
            Note::DSharp => "D♯",
            Note::E => "E",
            Note::F => "F",
            Note::FSharp => "F♯",
            Note::G => "G",
            Note::GSharp => "G♯",
            Note::A => "A",
            Note::ASharp => "A♯",
            Note::B => "B",
        };
        f.write_str(name)
    }
}

impl FromStr for Note {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let natural = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => Note::C,
            Some('D') => Note::D,
            Some('E') => Note::E,
            Some('F') => Note::F,
            Some('G') => Note::G,
            Some('A') => Note::A,
            Some('B') => Note::B,
            _ => return Err(format!("invalid note `{s}`")),
        };
        let offset = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(format!("invalid note `{s}`")),
        };
        Ok(natural.transpose(offset))
    }
}

impl TryFrom<String> for Note {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naturals_and_accidentals() {
        assert_eq!("A".parse::<Note>().unwrap(), Note::A);
        assert_eq!("f#".parse::<Note>().unwrap(), Note::FSharp);
        assert_eq!("Bb".parse::<Note>().unwrap(), Note::ASharp);
        assert_eq!("G♯".parse::<Note>().unwrap(), Note::GSharp);
        assert_eq!("Cb".parse::<Note>().unwrap(), Note::B);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("H".parse::<Note>().is_err());
        assert!("".parse::<Note>().is_err());
        assert!("C##".parse::<Note>().is_err());
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(Note::B.transpose(1), Note::C);
        assert_eq!(Note::C.transpose(-1), Note::B);
        assert_eq!(Note::E.transpose(24), Note::E);
        assert_eq!(Note::A.transpose(7), Note::E);
    }
}

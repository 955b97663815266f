use crate::chord::{Barre, ChordDefinition, Note};

/// Per-string chord data in the order the diagram draws it.
///
/// This is the only place where left-handed mirroring is resolved; the
/// layout code never looks at the as-stored order again.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    pub frets: Vec<i32>,
    pub fingers: Vec<u8>,
    pub barres: Vec<Barre>,
    pub notes: Vec<Option<Note>>,
}

impl Orientation {
    pub fn resolve(chord: &ChordDefinition, mirror: bool) -> Self {
        let notes = chord.notes();
        if !mirror {
            return Self {
                frets: chord.frets().to_vec(),
                fingers: chord.fingers().to_vec(),
                barres: chord.barres().to_vec(),
                notes,
            };
        }

        Self {
            frets: chord.frets().iter().rev().copied().collect(),
            fingers: chord.fingers().iter().rev().copied().collect(),
            barres: chord
                .barres()
                .iter()
                .map(|barre| chord.mirror_barre(barre))
                .collect(),
            notes: notes.into_iter().rev().collect(),
        }
    }
}

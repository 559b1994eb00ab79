// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretted instruments: notes under the fingers and chord shapes.
//!
//! Strings are numbered from the highest (0) to the lowest. Tabs are
//! written the other way round, lowest string first, with a negative fret
//! for a muted string.

pub mod shapes;

pub use shapes::{ShapeEntry, ShapeFile, ShapeLibrary};

use std::fmt;

use crate::error::{Result, TheoryError};
use crate::music::{identify_chord, Chord, Note};

/// Fret positions in tab order, lowest string first; negative = muted
pub type Tab = Vec<i32>;

/// Built-in instruments with bundled chord shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Guitar,
    Ukulele,
}

impl Instrument {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "guitar" => Some(Instrument::Guitar),
            "ukulele" | "uke" => Some(Instrument::Ukulele),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Ukulele => "ukulele",
        }
    }

    /// Bundled shape file for this instrument
    pub fn shape_file(self) -> anyhow::Result<ShapeFile> {
        match self {
            Instrument::Guitar => ShapeFile::from_yaml(shapes::GUITAR_SHAPES),
            Instrument::Ukulele => ShapeFile::from_yaml(shapes::UKULELE_SHAPES),
        }
    }

    /// Shape library built from the bundled shapes
    pub fn library(self) -> anyhow::Result<ShapeLibrary> {
        ShapeLibrary::from_file(&self.shape_file()?)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fretboard tuned to a set of open strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    open_notes: Vec<Note>,
}

impl Fretboard {
    /// Create a fretboard from open string notes, highest string first
    pub fn new(open_notes: Vec<Note>) -> Self {
        Self { open_notes }
    }

    pub fn open_notes(&self) -> &[Note] {
        &self.open_notes
    }

    pub fn string_count(&self) -> usize {
        self.open_notes.len()
    }

    /// Note on `string` (0 = highest) at `fret` (0 = open)
    pub fn note_at(&self, string: usize, fret: i32) -> Result<Note> {
        self.open_notes
            .get(string)
            .map(|open| open.transpose(fret))
            .ok_or(TheoryError::InvalidString {
                string,
                strings: self.string_count(),
            })
    }

    /// Notes for a tab, in tab order. Muted strings give `None`.
    pub fn notes_for_tab(&self, tab: &[i32]) -> Result<Vec<Option<Note>>> {
        let strings = self.string_count();
        if tab.len() > strings {
            return Err(TheoryError::InvalidString {
                string: tab.len() - 1,
                strings,
            });
        }
        tab.iter()
            .enumerate()
            .map(|(i, &fret)| {
                if fret < 0 {
                    Ok(None)
                } else {
                    self.note_at(tab.len() - 1 - i, fret).map(Some)
                }
            })
            .collect()
    }

    /// Identify the chord a tab plays. The lowest sounding string is the bass.
    pub fn chord_from_tab(&self, tab: &[i32]) -> Result<Option<Chord>> {
        let notes: Vec<Note> = self.notes_for_tab(tab)?.into_iter().flatten().collect();
        Ok(identify_chord(&notes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guitar() -> Fretboard {
        Instrument::Guitar.shape_file().unwrap().fretboard()
    }

    fn ukulele() -> Fretboard {
        Instrument::Ukulele.shape_file().unwrap().fretboard()
    }

    fn names(notes: &[Option<Note>]) -> Vec<String> {
        notes
            .iter()
            .map(|n| n.map(|n| n.to_string()).unwrap_or_else(|| "x".to_string()))
            .collect()
    }

    #[test]
    fn test_guitar_notes() {
        let guitar = guitar();
        assert_eq!(guitar.string_count(), 6);
        assert_eq!(guitar.note_at(0, 0).unwrap().to_string(), "E4");
        assert_eq!(guitar.note_at(5, 0).unwrap().to_string(), "E2");
        assert_eq!(guitar.note_at(5, 5).unwrap().to_string(), "A2");
        assert_eq!(guitar.note_at(1, 1).unwrap().to_string(), "C4");
        assert_eq!(guitar.note_at(2, 12).unwrap().to_string(), "G4");
        assert_eq!(
            guitar.note_at(6, 0),
            Err(TheoryError::InvalidString { string: 6, strings: 6 })
        );
    }

    #[test]
    fn test_ukulele_notes() {
        let uke = ukulele();
        assert_eq!(uke.note_at(3, 0).unwrap().name().as_str(), "G");
        assert_eq!(uke.note_at(2, 0).unwrap().name().as_str(), "C");
        assert_eq!(uke.note_at(1, 0).unwrap().name().as_str(), "E");
        assert_eq!(uke.note_at(0, 0).unwrap().name().as_str(), "A");
        assert_eq!(uke.note_at(3, 5).unwrap().name().as_str(), "C");
        assert_eq!(uke.note_at(2, 5).unwrap().name().as_str(), "F");
        assert_eq!(uke.note_at(1, 5).unwrap().name().as_str(), "A");
        assert_eq!(uke.note_at(0, 5).unwrap().name().as_str(), "D");
    }

    #[test]
    fn test_notes_for_tab() {
        let uke = ukulele();
        assert_eq!(names(&uke.notes_for_tab(&[0, 0, 0, 3]).unwrap()), vec!["G4", "C4", "E4", "C5"]);
        assert_eq!(names(&uke.notes_for_tab(&[0, 4, 3, 2]).unwrap()), vec!["G4", "E4", "G4", "B4"]);

        let guitar = guitar();
        assert_eq!(
            names(&guitar.notes_for_tab(&[-1, 3, 2, 0, 1, 0]).unwrap()),
            vec!["x", "C3", "E3", "G3", "C4", "E4"]
        );
        assert!(guitar.notes_for_tab(&[0; 7]).is_err());
    }

    #[test]
    fn test_chord_from_tab() {
        let uke = ukulele();
        let name = |tab: &[i32]| uke.chord_from_tab(tab).unwrap().map(|c| c.name());
        assert_eq!(name(&[0, 0, 0, 3]).as_deref(), Some("C/G"));
        assert_eq!(name(&[2, 2, 1, 0]).as_deref(), Some("Dm/A"));
        assert_eq!(name(&[4, 4, 4, 5]).as_deref(), Some("E7/B"));

        let guitar = guitar();
        let chord = guitar.chord_from_tab(&[-1, 0, 2, 2, 1, 0]).unwrap();
        assert_eq!(chord.map(|c| c.name()).as_deref(), Some("Am"));
        assert_eq!(guitar.chord_from_tab(&[-1, -1, -1, -1, -1, -1]).unwrap(), None);
    }

    #[test]
    fn test_instrument_names() {
        assert_eq!(Instrument::from_name("Uke"), Some(Instrument::Ukulele));
        assert_eq!(Instrument::from_name("banjo"), None);
        assert_eq!(Instrument::Guitar.to_string(), "guitar");
    }
}

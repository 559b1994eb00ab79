// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note identity: pitch classes, spelled names, octaves and enharmonic aliases.
//!
//! A `Note` is a spelled name plus an octave. Two spellings of the same pitch
//! class (C# and Db) are different values but compare equal through
//! `pitch_class_eq`, which is the engine's notion of musical sameness.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::format::format_accidentals;
use crate::error::{Result, TheoryError};

/// Octave used when none is given (middle C is C4)
pub const DEFAULT_OCTAVE: i32 = 4;

/// Accidental carried by a spelled note name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    #[serde(rename = "")]
    Natural,
    #[serde(rename = "#")]
    Sharp,
    #[serde(rename = "b")]
    Flat,
}

impl Accidental {
    /// ASCII form: "", "#" or "b"
    pub fn as_str(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    pub fn is_natural(self) -> bool {
        self == Accidental::Natural
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 21 spellings known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteName {
    C,
    #[serde(rename = "C#")]
    Cs,
    Db,
    D,
    #[serde(rename = "D#")]
    Ds,
    Eb,
    E,
    #[serde(rename = "E#")]
    Es,
    Fb,
    F,
    #[serde(rename = "F#")]
    Fs,
    Gb,
    G,
    #[serde(rename = "G#")]
    Gs,
    Ab,
    A,
    #[serde(rename = "A#")]
    As,
    Bb,
    B,
    #[serde(rename = "B#")]
    Bs,
    Cb,
}

impl NoteName {
    /// Every spelling, grouped by pitch class
    pub const ALL: [NoteName; 21] = [
        NoteName::Bs,
        NoteName::C,
        NoteName::Cs,
        NoteName::Db,
        NoteName::D,
        NoteName::Ds,
        NoteName::Eb,
        NoteName::E,
        NoteName::Fb,
        NoteName::Es,
        NoteName::F,
        NoteName::Fs,
        NoteName::Gb,
        NoteName::G,
        NoteName::Gs,
        NoteName::Ab,
        NoteName::A,
        NoteName::As,
        NoteName::Bb,
        NoteName::B,
        NoteName::Cb,
    ];

    /// Default spelling for each pitch class (index = pitch class)
    pub const STANDARD: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Eb,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Ab,
        NoteName::A,
        NoteName::Bb,
        NoteName::B,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::Db => "Db",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::Eb => "Eb",
            NoteName::E => "E",
            NoteName::Es => "E#",
            NoteName::Fb => "Fb",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::Gb => "Gb",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::Ab => "Ab",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::Bb => "Bb",
            NoteName::B => "B",
            NoteName::Bs => "B#",
            NoteName::Cb => "Cb",
        }
    }

    /// Get the pitch class (0-11) for this spelling
    pub fn pitch_class(self) -> u8 {
        match self {
            NoteName::Bs | NoteName::C => 0,
            NoteName::Cs | NoteName::Db => 1,
            NoteName::D => 2,
            NoteName::Ds | NoteName::Eb => 3,
            NoteName::E | NoteName::Fb => 4,
            NoteName::Es | NoteName::F => 5,
            NoteName::Fs | NoteName::Gb => 6,
            NoteName::G => 7,
            NoteName::Gs | NoteName::Ab => 8,
            NoteName::A => 9,
            NoteName::As | NoteName::Bb => 10,
            NoteName::B | NoteName::Cb => 11,
        }
    }

    /// The other spelling of this pitch class, if the table has one.
    /// D, G and A have none.
    pub fn alias(self) -> Option<NoteName> {
        match self {
            NoteName::Bs => Some(NoteName::C),
            NoteName::C => Some(NoteName::Bs),
            NoteName::Cs => Some(NoteName::Db),
            NoteName::Db => Some(NoteName::Cs),
            NoteName::Ds => Some(NoteName::Eb),
            NoteName::Eb => Some(NoteName::Ds),
            NoteName::E => Some(NoteName::Fb),
            NoteName::Fb => Some(NoteName::E),
            NoteName::Es => Some(NoteName::F),
            NoteName::F => Some(NoteName::Es),
            NoteName::Fs => Some(NoteName::Gb),
            NoteName::Gb => Some(NoteName::Fs),
            NoteName::Gs => Some(NoteName::Ab),
            NoteName::Ab => Some(NoteName::Gs),
            NoteName::As => Some(NoteName::Bb),
            NoteName::Bb => Some(NoteName::As),
            NoteName::B => Some(NoteName::Cb),
            NoteName::Cb => Some(NoteName::B),
            NoteName::D | NoteName::G | NoteName::A => None,
        }
    }

    /// Accidental taken from the second character of the name
    pub fn accidental(self) -> Accidental {
        match self.as_str().as_bytes().get(1) {
            Some(b'#') => Accidental::Sharp,
            Some(b'b') => Accidental::Flat,
            _ => Accidental::Natural,
        }
    }

    /// Letter name without the accidental
    pub fn letter(self) -> char {
        self.as_str().chars().next().unwrap_or('C')
    }

    /// Default spelling for a pitch class; any integer is folded into 0-11
    pub fn from_pitch_class(number: i32) -> Self {
        NoteName::STANDARD[number.rem_euclid(12) as usize]
    }
}

impl FromStr for NoteName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        NoteName::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| TheoryError::InvalidNoteName(s.to_string()))
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spelled note at an octave.
///
/// `==` compares spelling and octave. Use `pitch_eq` or `pitch_class_eq`
/// to compare by sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    name: NoteName,
    octave: i32,
}

impl Note {
    pub fn new(name: NoteName, octave: i32) -> Self {
        Self { name, octave }
    }

    /// Look up a note by spelled name, failing with `InvalidNoteName`
    pub fn from_name(name: &str, octave: i32) -> Result<Self> {
        Ok(Self::new(name.parse()?, octave))
    }

    /// Get a note using integer notation where 0 = C.
    ///
    /// Numbers outside 0-11 roll over into the octave, so -1 at octave 4 is B3
    /// and 25 at octave 4 is C#6.
    pub fn from_pitch_class(number: i32, octave: i32) -> Self {
        Self {
            name: NoteName::from_pitch_class(number),
            octave: octave + number.div_euclid(12),
        }
    }

    /// Parse a note string such as "C#6"; the octave defaults to 4.
    /// Returns `None` for anything that is not `[A-G](#|b)?<digits>?`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (name, rest) = split_note_name(text)?;
        let octave = if rest.is_empty() {
            DEFAULT_OCTAVE
        } else if rest.bytes().all(|b| b.is_ascii_digit()) {
            rest.parse().ok()?
        } else {
            return None;
        };
        Some(Self::new(name, octave))
    }

    pub fn name(&self) -> NoteName {
        self.name
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Number of the note in integer notation where C=0 and B=11
    pub fn pitch_class(&self) -> u8 {
        self.name.pitch_class()
    }

    /// Same pitch with the other spelling, at the same octave
    pub fn alias(&self) -> Option<Note> {
        self.name.alias().map(|name| Note::new(name, self.octave))
    }

    pub fn accidental(&self) -> Accidental {
        self.name.accidental()
    }

    pub fn has_accidental(&self) -> bool {
        !self.accidental().is_natural()
    }

    pub fn is_sharp(&self) -> bool {
        self.accidental() == Accidental::Sharp
    }

    pub fn is_flat(&self) -> bool {
        self.accidental() == Accidental::Flat
    }

    /// MIDI number where A0 = 21 and C4 = 60
    pub fn midi_number(&self) -> i32 {
        self.octave * 12 + self.pitch_class() as i32 + 12
    }

    /// Piano key number where A0 = 1 and C4 = 40
    pub fn key_number(&self) -> i32 {
        self.midi_number() - 20
    }

    /// Name with ♯/♭ glyphs
    pub fn formatted_name(&self) -> String {
        format_accidentals(self.name.as_str())
    }

    /// Transpose by half steps. The result uses the default spelling for
    /// its pitch class and crosses octaves as needed.
    pub fn transpose(&self, steps: i32) -> Note {
        let number = self.pitch_class() as i32 + steps.rem_euclid(12);
        let octave = self
            .octave
            .saturating_add(steps.div_euclid(12))
            .saturating_add(number.div_euclid(12));
        Note::new(NoteName::from_pitch_class(number), octave)
    }

    /// Same pitch class and octave, regardless of spelling (A#4 == Bb4)
    pub fn pitch_eq(&self, other: &Note) -> bool {
        self.pitch_class() == other.pitch_class() && self.octave == other.octave
    }

    /// Same pitch class, regardless of spelling and octave (A#5 == Bb4)
    pub fn pitch_class_eq(&self, other: &Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    /// Re-spell against a reference context.
    ///
    /// The alias is used only when this spelling's accidental differs from
    /// `reference` and the alias carries exactly `preferred`. Chords pass the
    /// root's accidental for both; scales pass the tonic's and the
    /// signature's.
    pub fn respelled(&self, reference: Accidental, preferred: Accidental) -> Note {
        match self.alias() {
            Some(alias) if self.accidental() != reference && alias.accidental() == preferred => alias,
            _ => *self,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

impl TryFrom<String> for Note {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Note::parse(&value).ok_or_else(|| format!("invalid note: {value}"))
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

/// Split a leading `[A-G](#|b)?` off `text`
pub(crate) fn split_note_name(text: &str) -> Option<(NoteName, &str)> {
    let bytes = text.as_bytes();
    if !matches!(bytes.first(), Some(b'A'..=b'G')) {
        return None;
    }
    let len = if matches!(bytes.get(1), Some(b'#') | Some(b'b')) { 2 } else { 1 };
    let name = text[..len].parse().ok()?;
    Some((name, &text[len..]))
}

/// Sort notes into natural order starting at `root`.
///
/// Notes below the root's pitch class are treated as an octave up. The sort
/// is stable, so equal pitch classes keep their input order.
pub fn sort_notes(notes: &mut [Note], root: Note) {
    let base = root.pitch_class();
    notes.sort_by_key(|n| {
        let pc = n.pitch_class();
        if pc < base {
            pc + 12
        } else {
            pc
        }
    });
}

/// Interning cache for notes keyed by name and octave.
///
/// Purely an identity optimization: two pooled notes are the same `Arc`
/// when their name and octave match, but equality never depends on it.
#[derive(Debug, Default)]
pub struct NotePool {
    notes: HashMap<(NoteName, i32), Arc<Note>>,
}

impl NotePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, name: NoteName, octave: i32) -> Arc<Note> {
        self.notes
            .entry((name, octave))
            .or_insert_with(|| Arc::new(Note::new(name, octave)))
            .clone()
    }

    pub fn get_by_pitch_class(&mut self, number: i32, octave: i32) -> Arc<Note> {
        self.intern(Note::from_pitch_class(number, octave))
    }

    pub fn intern(&mut self, note: Note) -> Arc<Note> {
        self.get(note.name(), note.octave())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

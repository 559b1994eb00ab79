// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord qualities and chords built from a root, quality and bass note.
//!
//! Chord tones are spelled to agree with the root: an Eb chord spells its
//! tones with flats and a C# chord with sharps wherever an alias allows it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::format::format_accidentals;
use super::note::{split_note_name, Accidental, Note, NoteName, DEFAULT_OCTAVE};
use crate::error::{Result, TheoryError};

/// Supported chord qualities, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    #[serde(rename = "M")]
    Major,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "7")]
    Dominant7,
    #[serde(rename = "M7")]
    Major7,
    #[serde(rename = "m7")]
    Minor7,
    #[serde(rename = "dim")]
    Diminished,
    #[serde(rename = "dim7")]
    Diminished7,
    #[serde(rename = "sus4")]
    Sus4,
    #[serde(rename = "sus2")]
    Sus2,
    #[serde(rename = "aug")]
    Augmented,
    #[serde(rename = "5")]
    Power,
    #[serde(rename = "M6")]
    Major6,
    #[serde(rename = "m6")]
    Minor6,
    #[serde(rename = "add2")]
    Add2,
    #[serde(rename = "9")]
    Dominant9,
    #[serde(rename = "M9")]
    Major9,
    #[serde(rename = "m9")]
    Minor9,
}

impl ChordQuality {
    /// All qualities in declaration order. Recognition tries them in this
    /// order, so reordering changes which name wins for ambiguous note sets.
    pub const ALL: [ChordQuality; 17] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Diminished,
        ChordQuality::Diminished7,
        ChordQuality::Sus4,
        ChordQuality::Sus2,
        ChordQuality::Augmented,
        ChordQuality::Power,
        ChordQuality::Major6,
        ChordQuality::Minor6,
        ChordQuality::Add2,
        ChordQuality::Dominant9,
        ChordQuality::Major9,
        ChordQuality::Minor9,
    ];

    /// Get the intervals (semitones from root) for this quality
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Power => &[0, 7],
            ChordQuality::Major6 => &[0, 4, 7, 9],
            ChordQuality::Minor6 => &[0, 3, 7, 9],
            ChordQuality::Add2 => &[0, 2, 4, 7],
            ChordQuality::Dominant9 => &[0, 4, 7, 10, 14],
            ChordQuality::Major9 => &[0, 4, 7, 11, 14],
            ChordQuality::Minor9 => &[0, 3, 7, 10, 14],
        }
    }

    /// Quality token as written in chord names ("M", "m7", "sus4", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            ChordQuality::Major => "M",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "M7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Augmented => "aug",
            ChordQuality::Power => "5",
            ChordQuality::Major6 => "M6",
            ChordQuality::Minor6 => "m6",
            ChordQuality::Add2 => "add2",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Major9 => "M9",
            ChordQuality::Minor9 => "m9",
        }
    }

    /// Suffix used in a chord name; major is written as nothing
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            other => other.as_str(),
        }
    }

    /// True if `pitch_class` (0-11, relative to the root) is a tone of this quality
    fn contains_interval(self, pitch_class: u8) -> bool {
        self.intervals().iter().any(|&i| i % 12 == pitch_class)
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| TheoryError::UnknownChordQuality(s.to_string()))
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chord: root, quality and bass note.
///
/// Equality (`==`) is by display name, so `C#` and `Db` are different
/// chords. See `equals_ignore_bass` and `is_same_as` for looser checks.
#[derive(Debug, Clone)]
pub struct Chord {
    root: Note,
    quality: ChordQuality,
    bass: Note,
    notes: OnceLock<Vec<Note>>,
}

impl Chord {
    /// Create a chord in root position
    pub fn new(root: Note, quality: ChordQuality) -> Self {
        Self::unchecked(root, quality, root)
    }

    /// Create a chord over `bass`, failing with `InvalidBassNote` if the
    /// bass is not one of the chord's tones
    pub fn with_bass(root: Note, quality: ChordQuality, bass: Note) -> Result<Self> {
        let offset = (bass.pitch_class() + 12 - root.pitch_class()) % 12;
        if !quality.contains_interval(offset) {
            let chord = Self::new(root, quality);
            return Err(TheoryError::InvalidBassNote {
                bass: bass.name().to_string(),
                chord: chord.name(),
            });
        }
        Ok(Self::unchecked(root, quality, bass))
    }

    /// Create a chord from note names, e.g. `("D", "dim", Some("Ab"))`
    pub fn from_names(root: &str, quality: &str, bass: Option<&str>) -> Result<Self> {
        let root = Note::from_name(root, DEFAULT_OCTAVE)?;
        let quality = quality.parse()?;
        match bass {
            Some(bass) => Self::with_bass(root, quality, Note::from_name(bass, DEFAULT_OCTAVE)?),
            None => Ok(Self::new(root, quality)),
        }
    }

    fn unchecked(root: Note, quality: ChordQuality, bass: Note) -> Self {
        Self {
            root,
            quality,
            bass,
            notes: OnceLock::new(),
        }
    }

    /// Parse a chord name such as "C#sus4/G#".
    ///
    /// Returns `Ok(None)` when the text does not start with a note name or
    /// the text after `/` is not a note name. A recognizable name with an
    /// unknown quality token or a bass outside the chord is an error.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let Some((root, rest)) = split_note_name(text.trim()) else {
            return Ok(None);
        };
        let (token, bass) = match rest.split_once('/') {
            Some((token, bass)) => (token, Some(bass)),
            None => (rest, None),
        };
        let quality = if token.is_empty() {
            ChordQuality::Major
        } else {
            token.parse()?
        };
        let root = Note::new(root, DEFAULT_OCTAVE);
        match bass {
            Some(bass) => {
                let Ok(bass) = bass.parse::<NoteName>() else {
                    return Ok(None);
                };
                Self::with_bass(root, quality, Note::new(bass, DEFAULT_OCTAVE)).map(Some)
            }
            None => Ok(Some(Self::new(root, quality))),
        }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn bass(&self) -> Note {
        self.bass
    }

    /// True when the bass is not the root
    pub fn is_inverted(&self) -> bool {
        !self.root.pitch_class_eq(&self.bass)
    }

    /// Display name, e.g. "C#m/G#"
    pub fn name(&self) -> String {
        let mut name = format!("{}{}", self.root.name(), self.quality.suffix());
        if self.is_inverted() {
            name.push('/');
            name.push_str(self.bass.name().as_str());
        }
        name
    }

    /// Name with ♯/♭ glyphs
    pub fn formatted_name(&self) -> String {
        format_accidentals(&self.name())
    }

    /// Chord tones, starting from the bass.
    ///
    /// Only the root keeps its own octave; every other tone is placed at
    /// `DEFAULT_OCTAVE`, so compare tones by pitch class rather than by pitch.
    pub fn notes(&self) -> &[Note] {
        self.notes.get_or_init(|| self.compute_notes())
    }

    fn compute_notes(&self) -> Vec<Note> {
        let accidental = self.accidental();
        let root_pc = self.root.pitch_class() as i32;
        let mut notes: Vec<Note> = self
            .quality
            .intervals()
            .iter()
            .map(|&interval| {
                if interval == 0 {
                    self.root
                } else {
                    Note::new(NoteName::from_pitch_class(root_pc + interval as i32), DEFAULT_OCTAVE)
                        .respelled(accidental, accidental)
                }
            })
            .collect();

        if self.is_inverted() {
            if let Some(position) = notes.iter().position(|n| n.pitch_class_eq(&self.bass)) {
                notes.rotate_left(position);
            }
        }
        notes
    }

    pub fn intervals(&self) -> &'static [u8] {
        self.quality.intervals()
    }

    /// Number of inversions, which is the number of tones
    pub fn inversion_count(&self) -> usize {
        self.quality.intervals().len()
    }

    pub fn accidental(&self) -> Accidental {
        self.root.accidental()
    }

    pub fn has_accidental(&self) -> bool {
        self.root.has_accidental()
    }

    pub fn is_sharp(&self) -> bool {
        self.root.is_sharp()
    }

    pub fn is_flat(&self) -> bool {
        self.root.is_flat()
    }

    /// The same chord spelled from the root's alias (C# -> Db).
    /// Returns a copy of this chord when the root has no alias.
    pub fn alias_chord(&self) -> Chord {
        match self.root.alias() {
            Some(root) => {
                let bass = if self.is_inverted() {
                    self.bass.alias().unwrap_or(self.bass)
                } else {
                    root
                };
                Self::unchecked(root, self.quality, bass)
            }
            None => self.clone(),
        }
    }

    /// The chord with the tone at position `inversion` as the bass,
    /// e.g. C 0 = C E G, 1 = E G C, 2 = G C E. Wraps modulo the tone count.
    pub fn get_inversion(&self, inversion: usize) -> Chord {
        let notes = self.notes();
        let bass = notes[inversion % notes.len()];
        Self::unchecked(self.root, self.quality, bass)
    }

    /// Transpose root and bass by half steps
    pub fn transpose(&self, steps: i32) -> Chord {
        Self::unchecked(self.root.transpose(steps), self.quality, self.bass.transpose(steps))
    }

    /// Same root pitch class and quality
    pub fn equals_ignore_bass(&self, other: &Chord) -> bool {
        self.root.pitch_class_eq(&other.root) && self.quality == other.quality
    }

    /// Same sound: root pitch class, quality and bass pitch class
    /// (C#M/G# is the same as DbM/Ab)
    pub fn is_same_as(&self, other: &Chord) -> bool {
        self.equals_ignore_bass(other) && self.bass.pitch_class_eq(&other.bass)
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Chord {}

impl Hash for Chord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

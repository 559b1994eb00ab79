// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and key system.
//!
//! Provides the diatonic modes, pentatonic and blues scales, key signatures,
//! and the enharmonic spelling of scale notes and chords under a signature.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::chord::{Chord, ChordQuality};
use super::format::format_accidentals;
use super::note::{split_note_name, Accidental, Note, DEFAULT_OCTAVE};
use crate::error::{Result, TheoryError};

/// Natural notes in circle of fifths order starting with F
const NATURALS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// Chord qualities for each degree of the major scale
const DIATONIC_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];

/// Blues signatures by tonic pitch class
const MAJOR_BLUES_SIGNATURES: [(Accidental, u8); 12] = [
    (Accidental::Flat, 1),  // C
    (Accidental::Sharp, 4), // C#
    (Accidental::Sharp, 1), // D
    (Accidental::Flat, 3),  // Eb
    (Accidental::Sharp, 3), // E
    (Accidental::Flat, 1),  // F
    (Accidental::Sharp, 5), // F#
    (Accidental::Flat, 1),  // G
    (Accidental::Flat, 3),  // Ab
    (Accidental::Sharp, 2), // A
    (Accidental::Flat, 2),  // Bb
    (Accidental::Sharp, 4), // B
];

const MINOR_BLUES_SIGNATURES: [(Accidental, u8); 12] = [
    (Accidental::Flat, 3),  // C
    (Accidental::Sharp, 3), // C#
    (Accidental::Flat, 1),  // D
    (Accidental::Flat, 5),  // Eb
    (Accidental::Flat, 1),  // E
    (Accidental::Flat, 3),  // F
    (Accidental::Sharp, 2), // F#
    (Accidental::Flat, 2),  // G
    (Accidental::Flat, 4),  // Ab
    (Accidental::Flat, 1),  // A
    (Accidental::Flat, 5),  // Bb
    (Accidental::Sharp, 1), // B
];

/// Scale modes. `Major` and `Minor` are aliases of `Ionian` and `Aeolian`
/// that keep their own display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lydian,
    Major,
    Ionian,
    Mixolydian,
    Dorian,
    Minor,
    Aeolian,
    Phrygian,
    Locrian,
}

impl Mode {
    /// The seven diatonic modes in circle of fifths order, brightest first
    pub const CIRCLE: [Mode; 7] = [
        Mode::Lydian,
        Mode::Ionian,
        Mode::Mixolydian,
        Mode::Dorian,
        Mode::Aeolian,
        Mode::Phrygian,
        Mode::Locrian,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Lydian => "lydian",
            Mode::Major => "major",
            Mode::Ionian => "ionian",
            Mode::Mixolydian => "mixolydian",
            Mode::Dorian => "dorian",
            Mode::Minor => "minor",
            Mode::Aeolian => "aeolian",
            Mode::Phrygian => "phrygian",
            Mode::Locrian => "locrian",
        }
    }

    /// Parse mode from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lydian" => Some(Mode::Lydian),
            "major" => Some(Mode::Major),
            "ionian" => Some(Mode::Ionian),
            "mixolydian" => Some(Mode::Mixolydian),
            "dorian" => Some(Mode::Dorian),
            "minor" => Some(Mode::Minor),
            "aeolian" => Some(Mode::Aeolian),
            "phrygian" => Some(Mode::Phrygian),
            "locrian" => Some(Mode::Locrian),
            _ => None,
        }
    }

    /// major => ionian, minor => aeolian, others unchanged
    pub fn normalized(self) -> Self {
        match self {
            Mode::Major => Mode::Ionian,
            Mode::Minor => Mode::Aeolian,
            other => other,
        }
    }

    /// The other name for this mode, if it has one
    pub fn alias(self) -> Option<Self> {
        match self {
            Mode::Major => Some(Mode::Ionian),
            Mode::Ionian => Some(Mode::Major),
            Mode::Minor => Some(Mode::Aeolian),
            Mode::Aeolian => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Position on the circle where lydian is 0, ionian is 1, and so on
    pub fn circle_index(self) -> usize {
        match self.normalized() {
            Mode::Lydian => 0,
            Mode::Mixolydian => 2,
            Mode::Dorian => 3,
            Mode::Aeolian => 4,
            Mode::Phrygian => 5,
            Mode::Locrian => 6,
            _ => 1,
        }
    }

    /// Degree of the major scale this mode starts on (ionian = 0)
    fn major_offset(self) -> usize {
        match self.normalized() {
            Mode::Dorian => 1,
            Mode::Phrygian => 2,
            Mode::Lydian => 3,
            Mode::Mixolydian => 4,
            Mode::Aeolian => 5,
            Mode::Locrian => 6,
            _ => 0,
        }
    }

    /// Get the intervals (semitones from tonic) for this diatonic mode
    pub fn intervals(self) -> &'static [u8] {
        match self.normalized() {
            Mode::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Mode::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            _ => &[0, 2, 4, 5, 7, 9, 11],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Families of scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFamily {
    Diatonic,
    Pentatonic,
    Blues,
}

impl ScaleFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleFamily::Diatonic => "diatonic",
            ScaleFamily::Pentatonic => "pentatonic",
            ScaleFamily::Blues => "blues",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "diatonic" => Some(ScaleFamily::Diatonic),
            "pentatonic" | "pent" => Some(ScaleFamily::Pentatonic),
            "blues" => Some(ScaleFamily::Blues),
            _ => None,
        }
    }

    /// Mode used when none is given
    pub fn default_mode(self) -> Mode {
        match self {
            ScaleFamily::Blues => Mode::Minor,
            _ => Mode::Major,
        }
    }
}

impl fmt::Display for ScaleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scale family together with its mode.
///
/// Pentatonic and blues scales only come in major and minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Diatonic(Mode),
    Pentatonic(Mode),
    Blues(Mode),
}

impl ScaleType {
    /// Combine a family and mode, failing with `InvalidScaleMode` for
    /// combinations such as a dorian pentatonic
    pub fn new(family: ScaleFamily, mode: Mode) -> Result<Self> {
        match (family, mode) {
            (ScaleFamily::Diatonic, mode) => Ok(ScaleType::Diatonic(mode)),
            (ScaleFamily::Pentatonic, Mode::Major | Mode::Minor) => Ok(ScaleType::Pentatonic(mode)),
            (ScaleFamily::Blues, Mode::Major | Mode::Minor) => Ok(ScaleType::Blues(mode)),
            (family, mode) => Err(TheoryError::InvalidScaleMode {
                family: family.to_string(),
                mode: mode.to_string(),
            }),
        }
    }

    pub fn major() -> Self {
        ScaleType::Diatonic(Mode::Major)
    }

    pub fn minor() -> Self {
        ScaleType::Diatonic(Mode::Minor)
    }

    pub fn family(self) -> ScaleFamily {
        match self {
            ScaleType::Diatonic(_) => ScaleFamily::Diatonic,
            ScaleType::Pentatonic(_) => ScaleFamily::Pentatonic,
            ScaleType::Blues(_) => ScaleFamily::Blues,
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            ScaleType::Diatonic(mode) | ScaleType::Pentatonic(mode) | ScaleType::Blues(mode) => mode,
        }
    }

    /// Same type with major/minor folded into ionian/aeolian for diatonic scales
    pub fn normalized(self) -> Self {
        match self {
            ScaleType::Diatonic(mode) => ScaleType::Diatonic(mode.normalized()),
            other => other,
        }
    }

    /// Get the intervals (semitones from tonic) for this scale type
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Diatonic(mode) => mode.intervals(),
            ScaleType::Pentatonic(Mode::Minor) => &[0, 3, 5, 7, 10],
            ScaleType::Pentatonic(_) => &[0, 2, 4, 7, 9],
            ScaleType::Blues(Mode::Major) => &[0, 2, 3, 4, 7, 9],
            ScaleType::Blues(_) => &[0, 3, 5, 6, 7, 10],
        }
    }
}

/// Key signature: which accidental and how many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySignature {
    pub accidental: Accidental,
    pub count: u8,
}

impl KeySignature {
    pub fn new(accidental: Accidental, count: u8) -> Self {
        Self { accidental, count }
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.accidental)
    }
}

/// A scale with tonic and type.
///
/// Notes, chords and signature are derived on first use and cached.
/// `==` compares display names; `is_same_as` compares by sound.
#[derive(Debug, Clone)]
pub struct Scale {
    tonic: Note,
    scale_type: ScaleType,
    signature: OnceLock<KeySignature>,
    notes: OnceLock<Vec<Note>>,
    chords: OnceLock<Vec<Chord>>,
}

impl Scale {
    /// Create a new scale from tonic and type
    pub fn new(tonic: Note, scale_type: ScaleType) -> Self {
        Self {
            tonic,
            scale_type,
            signature: OnceLock::new(),
            notes: OnceLock::new(),
            chords: OnceLock::new(),
        }
    }

    /// Major scale on `tonic`
    pub fn major(tonic: Note) -> Self {
        Self::new(tonic, ScaleType::major())
    }

    /// Natural minor scale on `tonic`
    pub fn minor(tonic: Note) -> Self {
        Self::new(tonic, ScaleType::minor())
    }

    /// Create a scale from names, e.g. `("F#", "dorian", "diatonic")`
    pub fn from_names(tonic: &str, mode: &str, family: &str) -> Result<Self> {
        let tonic = Note::from_name(tonic, DEFAULT_OCTAVE)?;
        let family =
            ScaleFamily::from_name(family).ok_or_else(|| TheoryError::UnknownScaleType(family.to_string()))?;
        let mode = Mode::from_name(mode).ok_or_else(|| TheoryError::InvalidScaleMode {
            family: family.to_string(),
            mode: mode.to_string(),
        })?;
        Ok(Self::new(tonic, ScaleType::new(family, mode)?))
    }

    /// Parse a major or minor key name such as "C#m", "EbM" or "A".
    /// Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let (name, rest) = split_note_name(text.trim())?;
        let scale_type = match rest {
            "" | "M" => ScaleType::major(),
            "m" => ScaleType::minor(),
            _ => return None,
        };
        Some(Self::new(Note::new(name, DEFAULT_OCTAVE), scale_type))
    }

    pub fn tonic(&self) -> Note {
        self.tonic
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn mode(&self) -> Mode {
        self.scale_type.mode()
    }

    pub fn family(&self) -> ScaleFamily {
        self.scale_type.family()
    }

    pub fn normalized_mode(&self) -> Mode {
        self.scale_type.normalized().mode()
    }

    /// Display name, e.g. "CM", "Ebm", "F(lyd)", "AM Pentatonic", "Cm Blues"
    pub fn name(&self) -> String {
        let tonic = self.tonic.name();
        match self.scale_type {
            ScaleType::Diatonic(Mode::Major) => format!("{tonic}M"),
            ScaleType::Diatonic(Mode::Minor) => format!("{tonic}m"),
            ScaleType::Diatonic(mode) => format!("{tonic}({})", &mode.as_str()[..3]),
            ScaleType::Pentatonic(mode) => format!("{tonic}{} Pentatonic", major_minor_suffix(mode)),
            ScaleType::Blues(mode) => format!("{tonic}{} Blues", major_minor_suffix(mode)),
        }
    }

    pub fn formatted_name(&self) -> String {
        format_accidentals(&self.name())
    }

    /// Other name for the mode (ionian <-> major, aeolian <-> minor).
    /// Only diatonic scales have one.
    pub fn mode_alias(&self) -> Option<Mode> {
        match self.scale_type {
            ScaleType::Diatonic(mode) => mode.alias(),
            _ => None,
        }
    }

    pub fn intervals(&self) -> &'static [u8] {
        self.scale_type.intervals()
    }

    pub fn has_accidental(&self) -> bool {
        self.tonic.has_accidental()
    }

    pub fn is_sharp(&self) -> bool {
        self.tonic.is_sharp()
    }

    pub fn is_flat(&self) -> bool {
        self.tonic.is_flat()
    }

    /// Key signature of the scale
    pub fn signature(&self) -> KeySignature {
        *self.signature.get_or_init(|| self.compute_signature())
    }

    fn compute_signature(&self) -> KeySignature {
        match self.scale_type {
            ScaleType::Diatonic(mode) => diatonic_signature(self.tonic, mode),
            ScaleType::Pentatonic(_) => {
                let count = self.notes().iter().filter(|n| n.has_accidental()).count() as u8;
                KeySignature::new(self.spelling_accidental(), count)
            }
            ScaleType::Blues(mode) => blues_signature(self.tonic, mode),
        }
    }

    /// Accidental that scale notes are spelled toward. Pentatonic scales
    /// borrow it from the parallel major or minor key.
    fn spelling_accidental(&self) -> Accidental {
        match self.scale_type {
            ScaleType::Diatonic(mode) | ScaleType::Pentatonic(mode) => {
                diatonic_signature(self.tonic, mode.normalized()).accidental
            }
            ScaleType::Blues(mode) => blues_signature(self.tonic, mode).accidental,
        }
    }

    /// Get the notes in this scale, spelled for the key
    pub fn notes(&self) -> &[Note] {
        self.notes.get_or_init(|| {
            let accidental = self.spelling_accidental();
            self.intervals()
                .iter()
                .map(|&i| {
                    let note = self.tonic.transpose(i as i32);
                    let spelled = note.respelled(self.tonic.accidental(), accidental);
                    if spelled != note {
                        trace!("{}: spelling {} as {}", self.name(), note.name(), spelled.name());
                    }
                    spelled
                })
                .collect()
        })
    }

    /// Chords built on each degree. Only diatonic scales have chords.
    pub fn chords(&self) -> &[Chord] {
        self.chords.get_or_init(|| match self.scale_type {
            ScaleType::Diatonic(mode) => {
                let offset = mode.major_offset();
                self.notes()
                    .iter()
                    .enumerate()
                    .map(|(i, &note)| Chord::new(note, DIATONIC_QUALITIES[(i + offset) % 7]))
                    .collect()
            }
            _ => Vec::new(),
        })
    }

    /// Respell a note for this scale, e.g. Ab becomes G# in C# major
    pub fn get_note_in_scale(&self, note: Note) -> Note {
        note.respelled(self.tonic.accidental(), self.signature().accidental)
    }

    /// Respell a chord for this scale, e.g. Ab becomes G# in C# major.
    /// Chords outside the scale are only respelled, never rejected.
    pub fn get_chord_in_scale(&self, chord: &Chord) -> Chord {
        let root = self.get_note_in_scale(chord.root());
        if chord.accidental() != root.accidental() {
            chord.alias_chord()
        } else {
            chord.clone()
        }
    }

    /// Same tonic pitch class and same mode, counting aliases
    /// (C#M and DbM are the same; CM and C(ion) are the same)
    pub fn is_same_as(&self, other: &Scale) -> bool {
        self.tonic.pitch_class_eq(&other.tonic) && self.scale_type.normalized() == other.scale_type.normalized()
    }
}

fn major_minor_suffix(mode: Mode) -> &'static str {
    match mode {
        Mode::Minor => "m",
        _ => "M",
    }
}

/// Signature from the tonic's letter on the circle and the mode's offset.
/// Sharp or flat tonics invert the count (F has 1 flat, F# has 6 sharps).
fn diatonic_signature(tonic: Note, mode: Mode) -> KeySignature {
    let letter = tonic.name().letter();
    let tonic_idx = NATURALS.iter().position(|&c| c == letter).unwrap_or(1) as i32 - 1;
    let count = tonic_idx - mode.circle_index() as i32 + 1;

    if tonic.has_accidental() {
        KeySignature::new(tonic.accidental(), (7 - count.abs()).unsigned_abs() as u8)
    } else {
        let accidental = match count {
            c if c < 0 => Accidental::Flat,
            c if c > 0 => Accidental::Sharp,
            _ => Accidental::Natural,
        };
        KeySignature::new(accidental, count.unsigned_abs() as u8)
    }
}

fn blues_signature(tonic: Note, mode: Mode) -> KeySignature {
    let table = match mode {
        Mode::Major => &MAJOR_BLUES_SIGNATURES,
        _ => &MINOR_BLUES_SIGNATURES,
    };
    let (accidental, count) = table[tonic.pitch_class() as usize];
    if tonic.has_accidental() && tonic.accidental() != accidental {
        KeySignature::new(tonic.accidental(), count)
    } else {
        KeySignature::new(accidental, count)
    }
}

impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Scale {}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diatonic(tonic: &str, mode: &str) -> Scale {
        Scale::from_names(tonic, mode, "diatonic").unwrap()
    }

    fn note_names(scale: &Scale) -> Vec<&'static str> {
        scale.notes().iter().map(|n| n.name().as_str()).collect()
    }

    fn chord_names(scale: &Scale) -> Vec<String> {
        scale.chords().iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_mode_intervals() {
        assert_eq!(Mode::Major.intervals(), &[0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(Mode::Minor.intervals(), Mode::Aeolian.intervals());
        assert_eq!(Mode::Locrian.intervals(), &[0, 1, 3, 5, 6, 8, 10]);
        assert_eq!(Mode::from_name("Dorian"), Some(Mode::Dorian));
        assert_eq!(Mode::from_name("harmonic"), None);
    }

    #[test]
    fn test_major_signatures() {
        let expected = [
            ("C", Accidental::Natural, 0),
            ("G", Accidental::Sharp, 1),
            ("D", Accidental::Sharp, 2),
            ("A", Accidental::Sharp, 3),
            ("E", Accidental::Sharp, 4),
            ("B", Accidental::Sharp, 5),
            ("F#", Accidental::Sharp, 6),
            ("F", Accidental::Flat, 1),
            ("Bb", Accidental::Flat, 2),
            ("Eb", Accidental::Flat, 3),
            ("Ab", Accidental::Flat, 4),
            ("Db", Accidental::Flat, 5),
        ];
        for (tonic, accidental, count) in expected {
            let scale = diatonic(tonic, "major");
            assert_eq!(scale.signature(), KeySignature::new(accidental, count), "{}", tonic);
        }
    }

    fn accidental(symbol: &str) -> Accidental {
        match symbol {
            "#" => Accidental::Sharp,
            "b" => Accidental::Flat,
            _ => Accidental::Natural,
        }
    }

    #[test]
    fn test_major_scale_table() {
        let expected = [
            ("C", "CM", ["C", "D", "E", "F", "G", "A", "B"], "", 0),
            ("C#", "C#M", ["C#", "D#", "E#", "F#", "G#", "A#", "B#"], "#", 7),
            ("Db", "DbM", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"], "b", 5),
            ("D", "DM", ["D", "E", "F#", "G", "A", "B", "C#"], "#", 2),
            ("D#", "D#M", ["D#", "E#", "G", "G#", "A#", "B#", "D"], "#", 5),
            ("Eb", "EbM", ["Eb", "F", "G", "Ab", "Bb", "C", "D"], "b", 3),
            ("E", "EM", ["E", "F#", "G#", "A", "B", "C#", "D#"], "#", 4),
            ("F", "FM", ["F", "G", "A", "Bb", "C", "D", "E"], "b", 1),
            ("F#", "F#M", ["F#", "G#", "A#", "B", "C#", "D#", "E#"], "#", 6),
            ("Gb", "GbM", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"], "b", 6),
            ("G", "GM", ["G", "A", "B", "C", "D", "E", "F#"], "#", 1),
            ("G#", "G#M", ["G#", "A#", "B#", "C#", "D#", "E#", "G"], "#", 6),
            ("Ab", "AbM", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"], "b", 4),
            ("A", "AM", ["A", "B", "C#", "D", "E", "F#", "G#"], "#", 3),
            ("A#", "A#M", ["A#", "B#", "D", "D#", "E#", "G", "A"], "#", 4),
            ("Bb", "BbM", ["Bb", "C", "D", "Eb", "F", "G", "A"], "b", 2),
            ("B", "BM", ["B", "C#", "D#", "E", "F#", "G#", "A#"], "#", 5),
        ];
        for (tonic, name, notes, symbol, count) in expected {
            let scale = diatonic(tonic, "major");
            assert_eq!(scale.name(), name);
            assert_eq!(scale.mode_alias(), Some(Mode::Ionian), "{}", name);
            assert_eq!(note_names(&scale), notes, "{}", name);
            assert_eq!(scale.signature(), KeySignature::new(accidental(symbol), count), "{}", name);
        }
    }

    #[test]
    fn test_pentatonic_table() {
        let expected = [
            ("C", "major", "CM Pentatonic", ["C", "D", "E", "G", "A"], "", 0),
            ("C#", "major", "C#M Pentatonic", ["C#", "D#", "E#", "G#", "A#"], "#", 5),
            ("Db", "major", "DbM Pentatonic", ["Db", "Eb", "F", "Ab", "Bb"], "b", 4),
            ("D", "major", "DM Pentatonic", ["D", "E", "F#", "A", "B"], "#", 1),
            ("D#", "major", "D#M Pentatonic", ["D#", "E#", "G", "A#", "B#"], "#", 4),
            ("Eb", "major", "EbM Pentatonic", ["Eb", "F", "G", "Bb", "C"], "b", 2),
            ("E", "major", "EM Pentatonic", ["E", "F#", "G#", "B", "C#"], "#", 3),
            ("F", "major", "FM Pentatonic", ["F", "G", "A", "C", "D"], "b", 0),
            ("F#", "major", "F#M Pentatonic", ["F#", "G#", "A#", "C#", "D#"], "#", 5),
            ("Gb", "major", "GbM Pentatonic", ["Gb", "Ab", "Bb", "Db", "Eb"], "b", 5),
            ("G", "major", "GM Pentatonic", ["G", "A", "B", "D", "E"], "#", 0),
            ("G#", "major", "G#M Pentatonic", ["G#", "A#", "B#", "D#", "E#"], "#", 5),
            ("Ab", "major", "AbM Pentatonic", ["Ab", "Bb", "C", "Eb", "F"], "b", 3),
            ("A", "major", "AM Pentatonic", ["A", "B", "C#", "E", "F#"], "#", 2),
            ("A#", "major", "A#M Pentatonic", ["A#", "B#", "D", "E#", "G"], "#", 3),
            ("Bb", "major", "BbM Pentatonic", ["Bb", "C", "D", "F", "G"], "b", 1),
            ("B", "major", "BM Pentatonic", ["B", "C#", "D#", "F#", "G#"], "#", 4),
            ("C", "minor", "Cm Pentatonic", ["C", "Eb", "F", "G", "Bb"], "b", 2),
            ("C#", "minor", "C#m Pentatonic", ["C#", "E", "F#", "G#", "B"], "#", 3),
            ("Db", "minor", "Dbm Pentatonic", ["Db", "Fb", "Gb", "Ab", "Cb"], "b", 5),
            ("D", "minor", "Dm Pentatonic", ["D", "F", "G", "A", "C"], "b", 0),
            ("D#", "minor", "D#m Pentatonic", ["D#", "F#", "G#", "A#", "C#"], "#", 5),
            ("Eb", "minor", "Ebm Pentatonic", ["Eb", "Gb", "Ab", "Bb", "Db"], "b", 5),
            ("E", "minor", "Em Pentatonic", ["E", "G", "A", "B", "D"], "#", 0),
            ("F", "minor", "Fm Pentatonic", ["F", "Ab", "Bb", "C", "Eb"], "b", 3),
            ("F#", "minor", "F#m Pentatonic", ["F#", "A", "B", "C#", "E"], "#", 2),
            ("Gb", "minor", "Gbm Pentatonic", ["Gb", "A", "Cb", "Db", "Fb"], "b", 4),
            ("G", "minor", "Gm Pentatonic", ["G", "Bb", "C", "D", "F"], "b", 1),
            ("G#", "minor", "G#m Pentatonic", ["G#", "B", "C#", "D#", "F#"], "#", 4),
            ("Ab", "minor", "Abm Pentatonic", ["Ab", "Cb", "Db", "Eb", "Gb"], "b", 5),
            ("A", "minor", "Am Pentatonic", ["A", "C", "D", "E", "G"], "", 0),
            ("A#", "minor", "A#m Pentatonic", ["A#", "C#", "D#", "E#", "G#"], "#", 5),
            ("Bb", "minor", "Bbm Pentatonic", ["Bb", "Db", "Eb", "F", "Ab"], "b", 4),
            ("B", "minor", "Bm Pentatonic", ["B", "D", "E", "F#", "A"], "#", 1),
        ];
        for (tonic, mode, name, notes, symbol, count) in expected {
            let scale = Scale::from_names(tonic, mode, "pentatonic").unwrap();
            assert_eq!(scale.tonic().name().as_str(), tonic);
            assert_eq!(scale.name(), name);
            assert_eq!(scale.mode_alias(), None, "{}", name);
            assert_eq!(note_names(&scale), notes, "{}", name);
            assert_eq!(scale.signature(), KeySignature::new(accidental(symbol), count), "{}", name);
        }
    }

    #[test]
    fn test_mode_table() {
        let expected = [
            ("C", "major", "ionian", "CM", ["C", "D", "E", "F", "G", "A", "B"], ["C", "Dm", "Em", "F", "G", "Am", "Bdim"], "", 0),
            ("G", "major", "ionian", "GM", ["G", "A", "B", "C", "D", "E", "F#"], ["G", "Am", "Bm", "C", "D", "Em", "F#dim"], "#", 1),
            ("D", "major", "ionian", "DM", ["D", "E", "F#", "G", "A", "B", "C#"], ["D", "Em", "F#m", "G", "A", "Bm", "C#dim"], "#", 2),
            ("Eb", "minor", "aeolian", "Ebm", ["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"], ["Ebm", "Fdim", "Gb", "Abm", "Bbm", "Cb", "Db"], "b", 6),
            ("F", "lydian", "lydian", "F(lyd)", ["F", "G", "A", "B", "C", "D", "E"], ["F", "G", "Am", "Bdim", "C", "Dm", "Em"], "", 0),
            ("F#", "dorian", "dorian", "F#(dor)", ["F#", "G#", "A", "B", "C#", "D#", "E"], ["F#m", "G#m", "A", "B", "C#m", "D#dim", "E"], "#", 4),
            ("C#", "lydian", "lydian", "C#(lyd)", ["C#", "D#", "E#", "G", "G#", "A#", "B#"], ["C#", "D#", "E#m", "Gdim", "G#", "A#m", "B#m"], "#", 6),
            ("C#", "locrian", "locrian", "C#(loc)", ["C#", "D", "E", "F#", "G", "A", "B"], ["C#dim", "D", "Em", "F#m", "G", "A", "Bm"], "#", 2),
            ("Cb", "lydian", "lydian", "Cb(lyd)", ["Cb", "Db", "Eb", "F", "Gb", "Ab", "Bb"], ["Cb", "Db", "Ebm", "Fdim", "Gb", "Abm", "Bbm"], "b", 6),
            ("E#", "major", "ionian", "E#M", ["E#", "G", "A", "A#", "B#", "D", "E"], ["E#", "Gm", "Am", "A#", "B#", "Dm", "Edim"], "#", 3),
        ];
        for (tonic, mode, normalized, name, notes, chords, symbol, count) in expected {
            let scale = diatonic(tonic, mode);
            assert_eq!(scale.normalized_mode().as_str(), normalized, "{}", name);
            assert_eq!(scale.name(), name);
            assert_eq!(note_names(&scale), notes, "{}", name);
            assert_eq!(chord_names(&scale), chords, "{}", name);
            assert_eq!(scale.signature(), KeySignature::new(accidental(symbol), count), "{}", name);
        }
    }

    #[test]
    fn test_minor_scale() {
        let g_minor = diatonic("G", "minor");
        assert_eq!(note_names(&g_minor), vec!["G", "A", "Bb", "C", "D", "Eb", "F"]);
        assert_eq!(g_minor.signature(), KeySignature::new(Accidental::Flat, 2));
        assert_eq!(chord_names(&g_minor), vec!["Gm", "Adim", "Bb", "Cm", "Dm", "Eb", "F"]);

        let eb_minor = diatonic("Eb", "minor");
        assert_eq!(note_names(&eb_minor), vec!["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"]);
        assert_eq!(eb_minor.signature(), KeySignature::new(Accidental::Flat, 6));
    }

    #[test]
    fn test_major_scale_spelling() {
        assert_eq!(note_names(&diatonic("C", "major")), vec!["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(note_names(&diatonic("F", "major")), vec!["F", "G", "A", "Bb", "C", "D", "E"]);
        assert_eq!(note_names(&diatonic("Gb", "major")), vec!["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]);
        assert_eq!(note_names(&diatonic("F#", "major")), vec!["F#", "G#", "A#", "B", "C#", "D#", "E#"]);
    }

    #[test]
    fn test_modes() {
        let c_lydian = diatonic("C#", "lydian");
        assert_eq!(note_names(&c_lydian), vec!["C#", "D#", "E#", "G", "G#", "A#", "B#"]);

        let f_dorian = diatonic("F#", "dorian");
        assert_eq!(f_dorian.signature(), KeySignature::new(Accidental::Sharp, 4));
        assert_eq!(note_names(&f_dorian), vec!["F#", "G#", "A", "B", "C#", "D#", "E"]);

        let d_dorian = diatonic("D", "dorian");
        assert_eq!(d_dorian.signature(), KeySignature::new(Accidental::Natural, 0));
        assert_eq!(chord_names(&d_dorian), vec!["Dm", "Em", "F", "G", "Am", "Bdim", "C"]);
    }

    #[test]
    fn test_major_chords() {
        let c_major = diatonic("C", "major");
        assert_eq!(chord_names(&c_major), vec!["C", "Dm", "Em", "F", "G", "Am", "Bdim"]);
    }

    #[test]
    fn test_scale_names() {
        assert_eq!(diatonic("C", "major").name(), "CM");
        assert_eq!(diatonic("C", "minor").name(), "Cm");
        assert_eq!(diatonic("F", "lydian").name(), "F(lyd)");
        assert_eq!(diatonic("C", "ionian").name(), "C(ion)");
        assert_eq!(diatonic("A", "aeolian").name(), "A(aeo)");
        assert_eq!(Scale::from_names("C", "major", "pentatonic").unwrap().name(), "CM Pentatonic");
        assert_eq!(Scale::from_names("C", "minor", "blues").unwrap().name(), "Cm Blues");
        assert_eq!(diatonic("Bb", "major").formatted_name(), "B♭M");
    }

    #[test]
    fn test_mode_alias() {
        assert_eq!(diatonic("C", "major").mode_alias(), Some(Mode::Ionian));
        assert_eq!(diatonic("C", "aeolian").mode_alias(), Some(Mode::Minor));
        assert_eq!(diatonic("C", "dorian").mode_alias(), None);
        assert_eq!(Scale::from_names("C", "major", "blues").unwrap().mode_alias(), None);
    }

    #[test]
    fn test_invalid_scale_mode() {
        assert_eq!(
            ScaleType::new(ScaleFamily::Pentatonic, Mode::Dorian),
            Err(TheoryError::InvalidScaleMode {
                family: "pentatonic".to_string(),
                mode: "dorian".to_string(),
            })
        );
        assert!(Scale::from_names("C", "lydian", "blues").is_err());
        assert_eq!(
            Scale::from_names("C", "major", "bebop").unwrap_err(),
            TheoryError::UnknownScaleType("bebop".to_string())
        );
    }

    #[test]
    fn test_pentatonic() {
        let f = Scale::from_names("F", "major", "pentatonic").unwrap();
        assert_eq!(note_names(&f), vec!["F", "G", "A", "C", "D"]);
        assert_eq!(f.signature(), KeySignature::new(Accidental::Flat, 0));
        assert!(f.chords().is_empty());

        let cs = Scale::from_names("C#", "major", "pentatonic").unwrap();
        assert_eq!(note_names(&cs), vec!["C#", "D#", "E#", "G#", "A#"]);
        assert_eq!(cs.signature(), KeySignature::new(Accidental::Sharp, 5));

        let gb = Scale::from_names("Gb", "minor", "pentatonic").unwrap();
        assert_eq!(note_names(&gb), vec!["Gb", "A", "Cb", "Db", "Fb"]);
        assert_eq!(gb.signature(), KeySignature::new(Accidental::Flat, 4));
    }

    #[test]
    fn test_blues() {
        let c = Scale::from_names("C", "minor", "blues").unwrap();
        assert_eq!(note_names(&c), vec!["C", "Eb", "F", "Gb", "G", "Bb"]);
        assert_eq!(c.signature(), KeySignature::new(Accidental::Flat, 3));
        assert!(c.chords().is_empty());

        let a = Scale::from_names("A", "major", "blues").unwrap();
        assert_eq!(note_names(&a), vec!["A", "B", "C", "C#", "E", "F#"]);
        assert_eq!(a.signature(), KeySignature::new(Accidental::Sharp, 2));

        // A flat tonic overrides the table's sharps
        let db = Scale::from_names("Db", "major", "blues").unwrap();
        assert_eq!(db.signature(), KeySignature::new(Accidental::Flat, 4));
        assert_eq!(note_names(&db), vec!["Db", "Eb", "Fb", "F", "Ab", "Bb"]);
    }

    #[test]
    fn test_note_in_scale() {
        let cs = diatonic("C#", "major");
        let ab = Note::from_name("Ab", 4).unwrap();
        assert_eq!(cs.get_note_in_scale(ab).name().as_str(), "G#");

        let db = diatonic("Db", "major");
        let fs = Note::from_name("F#", 4).unwrap();
        assert_eq!(db.get_note_in_scale(fs).name().as_str(), "Gb");
    }

    #[test]
    fn test_chord_in_scale() {
        let cs = diatonic("C#", "major");
        let ab = Chord::parse("Ab").unwrap().unwrap();
        assert_eq!(cs.get_chord_in_scale(&ab).name(), "G#");

        let db = diatonic("Db", "major");
        let fsm = Chord::parse("F#m").unwrap().unwrap();
        assert_eq!(db.get_chord_in_scale(&fsm).name(), "Gbm");

        // Not in the key, spelling already agrees
        let c = diatonic("C", "major");
        let eb = Chord::parse("Eb").unwrap().unwrap();
        assert_eq!(c.get_chord_in_scale(&eb).name(), "Eb");
    }

    #[test]
    fn test_scale_equality() {
        let cs = diatonic("C#", "major");
        let db = diatonic("Db", "major");
        assert_ne!(cs, db);
        assert!(cs.is_same_as(&db));

        let c = diatonic("C", "major");
        let c_ion = diatonic("C", "ionian");
        assert_ne!(c, c_ion);
        assert!(c.is_same_as(&c_ion));
        assert!(!c.is_same_as(&diatonic("C", "minor")));
        assert!(!c.is_same_as(&Scale::from_names("C", "major", "pentatonic").unwrap()));
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(Scale::parse("C#m").unwrap().name(), "C#m");
        assert_eq!(Scale::parse("EbM").unwrap().name(), "EbM");
        assert_eq!(Scale::parse("A").unwrap().name(), "AM");
        assert!(Scale::parse("Hm").is_none());
        assert!(Scale::parse("Cdorian").is_none());
    }

    #[test]
    fn test_derived_values_cached() {
        let scale = diatonic("E", "phrygian");
        let notes = scale.notes().to_vec();
        assert_eq!(scale.notes(), notes.as_slice());
        assert_eq!(scale.signature(), scale.signature());
        assert_eq!(scale.chords().len(), 7);
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Circle of fifths view of a scale.
//!
//! Lays the seven degrees of a diatonic scale out in circle order (F, C, G,
//! D, A, E, B for C major) with their quality and roman numeral.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::music::{Note, NoteName, Scale, DEFAULT_OCTAVE};

/// Chord quality of a degree as shown on the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeQuality {
    #[serde(rename = "M")]
    Major,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "d")]
    Diminished,
}

impl ModeQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeQuality::Major => "M",
            ModeQuality::Minor => "m",
            ModeQuality::Diminished => "d",
        }
    }
}

impl fmt::Display for ModeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional name of a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeName {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    #[serde(rename = "Leading Tone")]
    LeadingTone,
    /// Seventh degree a whole step below the tonic
    Subtonic,
}

impl DegreeName {
    const BY_DEGREE: [DegreeName; 7] = [
        DegreeName::Tonic,
        DegreeName::Supertonic,
        DegreeName::Mediant,
        DegreeName::Subdominant,
        DegreeName::Dominant,
        DegreeName::Submediant,
        DegreeName::LeadingTone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DegreeName::Tonic => "Tonic",
            DegreeName::Supertonic => "Supertonic",
            DegreeName::Mediant => "Mediant",
            DegreeName::Subdominant => "Subdominant",
            DegreeName::Dominant => "Dominant",
            DegreeName::Submediant => "Submediant",
            DegreeName::LeadingTone => "Leading Tone",
            DegreeName::Subtonic => "Subtonic",
        }
    }
}

impl fmt::Display for DegreeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One degree of a scale placed on the circle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FifthInfo {
    pub note: Note,
    /// Position on the circle relative to C (F = -1, C = 0, G = 1)
    pub position: i32,
    pub quality: ModeQuality,
    /// Scale degree, 1 = tonic
    pub degree_number: u8,
    pub degree_name: DegreeName,
    pub degree_roman: String,
}

const MODE_QUALITIES: [ModeQuality; 7] = [
    ModeQuality::Major,
    ModeQuality::Major,
    ModeQuality::Major,
    ModeQuality::Minor,
    ModeQuality::Minor,
    ModeQuality::Minor,
    ModeQuality::Diminished,
];

const DEGREE_NUMBERS: [u8; 7] = [1, 5, 2, 6, 3, 7, 4];

const ROMAN_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Note at any position on the circle, wrapping in both directions
/// (0 = C, 1 = G, -1 = F, 8 = Ab)
pub fn circle_note(position: i32) -> Note {
    Note::new(NoteName::from_pitch_class(position * 7), DEFAULT_OCTAVE)
}

/// Circle position (0-11) of a pitch class; 7 is its own inverse mod 12
fn circle_index(note: &Note) -> i32 {
    (note.pitch_class() as i32 * 7) % 12
}

/// Roman numeral for a degree: upper case major, lower case minor,
/// lower case with ° for diminished
pub fn degree_roman_numeral(degree: u8, quality: ModeQuality) -> String {
    let roman = ROMAN_NUMERALS[(degree as usize).saturating_sub(1) % 7];
    match quality {
        ModeQuality::Major => roman.to_string(),
        ModeQuality::Minor => roman.to_lowercase(),
        ModeQuality::Diminished => format!("{}°", roman.to_lowercase()),
    }
}

/// Circle of fifths for a scale, computed once on first use
#[derive(Debug, Clone)]
pub struct CircleOfFifths {
    scale: Scale,
    fifths: OnceLock<Vec<FifthInfo>>,
    ordered: OnceLock<Vec<FifthInfo>>,
}

impl CircleOfFifths {
    pub fn new(scale: &Scale) -> Self {
        Self {
            scale: scale.clone(),
            fifths: OnceLock::new(),
            ordered: OnceLock::new(),
        }
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Degrees in circle order, e.g. CM = F, C, G, D, A, E, B
    pub fn fifths(&self) -> &[FifthInfo] {
        self.fifths.get_or_init(|| {
            let tonic = circle_index(&self.scale.tonic());
            let start = -(self.scale.mode().circle_index() as i32);
            (0..7).map(|i| self.fifth_info(i, tonic, start)).collect()
        })
    }

    /// Degrees in scale order starting with the tonic, e.g. CM = C, D, E, F, G, A, B
    pub fn ordered_fifths(&self) -> &[FifthInfo] {
        self.ordered.get_or_init(|| {
            let mut ordered = self.fifths().to_vec();
            ordered.sort_by_key(|f| f.degree_number);
            ordered
        })
    }

    fn fifth_info(&self, index: i32, tonic: i32, start: i32) -> FifthInfo {
        let position = tonic + start + index;
        let degree_number = DEGREE_NUMBERS[(start + index).rem_euclid(7) as usize];
        let quality = MODE_QUALITIES[index as usize];

        let degree_name = if degree_number == 7 && quality == ModeQuality::Major {
            DegreeName::Subtonic
        } else {
            DegreeName::BY_DEGREE[degree_number as usize - 1]
        };

        FifthInfo {
            note: self.scale.get_note_in_scale(circle_note(position)),
            position,
            quality,
            degree_number,
            degree_name,
            degree_roman: degree_roman_numeral(degree_number, quality),
        }
    }
}

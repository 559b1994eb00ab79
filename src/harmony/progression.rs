// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic chord progression suggestions for major and minor keys.

use tracing::debug;

use crate::error::{Result, TheoryError};
use crate::music::{Chord, Mode, Scale, ScaleType};

/// Degrees that may follow each degree in a major key (0 = I)
const MAJOR_PROGRESSIONS: [&[usize]; 7] = [
    &[0, 1, 2, 3, 4, 5, 6], // I => any
    &[0, 1, 4, 6],          // ii => V, vii°
    &[0, 2, 3, 5],          // iii => IV, vi
    &[0, 1, 3, 4, 6],       // IV => ii, V, vii°
    &[0, 4, 5],             // V => vi
    &[0, 1, 2, 3, 4, 5],    // vi => ii, iii, IV, V
    &[0, 6],                // vii° => I
];

/// Degrees that may follow each degree in a minor key (0 = i)
const MINOR_PROGRESSIONS: [&[usize]; 7] = [
    &[0, 1, 2, 3, 4, 5, 6], // i => any
    &[0, 1, 4, 6],          // ii° => V, vii°
    &[0, 2, 3, 5, 6],       // III => iv, VI, vii°
    &[0, 3, 4, 6],          // iv => V, vii°
    &[0, 4, 5],             // V => VI
    &[0, 2, 3, 4, 5, 6],    // VI => III, iv, V, vii°
    &[0, 6],                // vii° => i
];

/// Suggests which chords of a key can follow a given chord
#[derive(Debug, Clone)]
pub struct ChordProgression {
    scale: Scale,
    progressions: &'static [&'static [usize]; 7],
}

impl ChordProgression {
    /// Create a calculator for a major or minor key.
    /// Any other scale fails with `UnsupportedProgressionScale`.
    pub fn new(scale: &Scale) -> Result<Self> {
        let progressions = match scale.scale_type().normalized() {
            ScaleType::Diatonic(Mode::Ionian) => &MAJOR_PROGRESSIONS,
            ScaleType::Diatonic(Mode::Aeolian) => &MINOR_PROGRESSIONS,
            _ => return Err(TheoryError::UnsupportedProgressionScale(scale.name())),
        };
        Ok(Self {
            scale: scale.clone(),
            progressions,
        })
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Chord on the tonic
    pub fn root_chord(&self) -> &Chord {
        &self.scale.chords()[0]
    }

    /// Chord on a degree of the key, 0 = tonic
    pub fn chord_at(&self, number: usize) -> Option<&Chord> {
        self.scale.chords().get(number)
    }

    /// Degree of a chord in the key (0 = tonic), matched by name
    pub fn chord_number(&self, chord: &Chord) -> Option<usize> {
        self.scale.chords().iter().position(|c| c == chord)
    }

    /// Chords that can follow `chord`. A chord outside the key is treated
    /// as the tonic.
    pub fn next_chords(&self, chord: &Chord) -> Vec<Chord> {
        let number = self.chord_number(chord).unwrap_or_else(|| {
            debug!("{} is not in {}, using the tonic", chord, self.scale);
            0
        });
        let chords = self.scale.chords();
        self.progressions[number].iter().map(|&i| chords[i].clone()).collect()
    }
}

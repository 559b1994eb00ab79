// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Western tonal music theory.
//!
//! Notes with enharmonic spellings, chords and reverse chord lookup,
//! diatonic, pentatonic and blues scales with key signatures, the circle
//! of fifths, chord progressions, and fretted-instrument chord shapes.

pub mod error;
pub mod fretboard;
pub mod harmony;
pub mod music;

pub use error::{Result, TheoryError};
pub use fretboard::{Fretboard, Instrument, ShapeFile, ShapeLibrary};
pub use harmony::{ChordProgression, CircleOfFifths};
pub use music::{
    identify_chord, identify_chord_from_names, identify_chord_with_bass, Accidental, Chord, ChordQuality,
    KeySignature, Mode, Note, NoteName, NotePool, Scale, ScaleFamily, ScaleType,
};

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Notes and their enharmonic spellings, chords, reverse chord lookup,
//! and scales with key signatures.

pub mod chord;
pub mod format;
pub mod lookup;
pub mod note;
pub mod scale;

pub use chord::{Chord, ChordQuality};
pub use format::{format_accidentals, unformat_accidentals};
pub use lookup::{identify_chord, identify_chord_from_names, identify_chord_with_bass};
pub use note::{sort_notes, Accidental, Note, NoteName, NotePool, DEFAULT_OCTAVE};
pub use scale::{KeySignature, Mode, ScaleFamily, Scale, ScaleType};

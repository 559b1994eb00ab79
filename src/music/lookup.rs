// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Reverse chord lookup: find the chord that a set of notes spells.

use tracing::{debug, trace};

use super::chord::{Chord, ChordQuality};
use super::note::{sort_notes, Note, DEFAULT_OCTAVE};

/// Identify the chord formed by `notes`, taking the first note as the bass.
pub fn identify_chord(notes: &[Note]) -> Option<Chord> {
    let bass = *notes.first()?;
    identify_chord_with_bass(notes, bass)
}

/// Identify the chord formed by `notes` over `bass`.
///
/// Duplicate pitch classes are dropped (first occurrence wins) and fewer
/// than two distinct pitch classes never form a chord. The notes are put
/// in natural order from the bass, then each rotation is compared against
/// every quality in declaration order; the first match wins. A bass that
/// is not one of the chord's tones finds nothing.
pub fn identify_chord_with_bass(notes: &[Note], bass: Note) -> Option<Chord> {
    let mut distinct: Vec<Note> = Vec::with_capacity(notes.len());
    for note in notes {
        if !distinct.iter().any(|n| n.pitch_class_eq(note)) {
            distinct.push(*note);
        }
    }
    if distinct.len() < 2 {
        trace!("Too few pitch classes to identify a chord: {}", distinct.len());
        return None;
    }

    sort_notes(&mut distinct, bass);

    for rotation in 0..distinct.len() {
        let intervals = intervals_from_first(&distinct);
        if let Some(quality) = quality_for_intervals(&intervals) {
            let root = distinct[0];
            debug!(
                "Identified {}{} over {} at rotation {}",
                root.name(),
                quality.suffix(),
                bass.name(),
                rotation
            );
            return Chord::with_bass(root, quality, bass).ok();
        }
        distinct.rotate_left(1);
    }

    debug!("No chord matches {} notes", distinct.len());
    None
}

/// Identify a chord from note names, e.g. `["E", "G", "B", "D"]`.
/// Returns `None` if any name is invalid.
pub fn identify_chord_from_names(names: &[&str]) -> Option<Chord> {
    let notes = names
        .iter()
        .map(|name| Note::from_name(name, DEFAULT_OCTAVE).ok())
        .collect::<Option<Vec<_>>>()?;
    identify_chord(&notes)
}

/// Semitones from the first note to each note, wrapping notes below it up an octave
fn intervals_from_first(notes: &[Note]) -> Vec<u8> {
    let base = notes[0].pitch_class();
    notes
        .iter()
        .map(|n| (n.pitch_class() + 12 - base) % 12)
        .collect()
}

/// First quality whose tones, folded into one octave, match `intervals`
fn quality_for_intervals(intervals: &[u8]) -> Option<ChordQuality> {
    ChordQuality::ALL.iter().copied().find(|quality| {
        let mut folded: Vec<u8> = quality.intervals().iter().map(|i| i % 12).collect();
        folded.sort_unstable();
        folded == intervals
    })
}

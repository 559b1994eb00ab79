// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Views derived from a key: the circle of fifths and chord progressions.

pub mod circle;
pub mod progression;

pub use circle::{circle_note, degree_roman_numeral, CircleOfFifths, DegreeName, FifthInfo, ModeQuality};
pub use progression::ChordProgression;

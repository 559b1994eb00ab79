// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.
//!
//! These are raised by constructors that take already-typed values and
//! represent programmer error. Text parsers (`Note::parse`, `Scale::parse`,
//! `Chord::parse`) signal garbage input with `None` instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// The name is not one of the 21 known spellings.
    #[error("{0} is not a valid note name")]
    InvalidNoteName(String),

    /// The quality token does not name one of the 17 chord qualities.
    #[error("Unknown chord quality {0}")]
    UnknownChordQuality(String),

    /// The requested bass does not share a pitch class with any chord tone.
    #[error("Bass note '{bass}' is not a member of chord {chord}")]
    InvalidBassNote { bass: String, chord: String },

    /// The mode is not supported by the scale family, e.g. a dorian pentatonic.
    #[error("Invalid mode for {family} scale: {mode}")]
    InvalidScaleMode { family: String, mode: String },

    #[error("Unknown scale type {0}")]
    UnknownScaleType(String),

    /// Progression tables only exist for major and minor keys.
    #[error("Only major and minor scales are supported, got {0}")]
    UnsupportedProgressionScale(String),

    #[error("String {string} is out of range for an instrument with {strings} strings")]
    InvalidString { string: usize, strings: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TheoryError>;

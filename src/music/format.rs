// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Accidental glyph formatting for display.

/// Replace ASCII accidentals (`#`, `b`) with ♯ and ♭
pub fn format_accidentals(text: &str) -> String {
    text.replace('b', "♭").replace('#', "♯")
}

/// Replace ♯ and ♭ with their ASCII forms
pub fn unformat_accidentals(text: &str) -> String {
    text.replace('♭', "b").replace('♯', "#")
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord shape libraries.
//!
//! A shape file lists open shapes, which are used as written, and barre
//! shapes, which are slid up the neck through all twelve frets. Files can
//! be YAML or TOML.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Fretboard, Tab};
use crate::music::{Chord, ChordQuality, Note};

/// Bundled guitar shapes (EADGBE)
pub const GUITAR_SHAPES: &str = include_str!("../../shapes/guitar.yaml");

/// Bundled ukulele shapes (GCEA)
pub const UKULELE_SHAPES: &str = include_str!("../../shapes/ukulele.yaml");

/// Number of frets a barre shape is moved through
const BARRE_FRETS: i32 = 12;

/// A chord name and its frets in tab order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShapeEntry {
    /// Chord name, e.g. "F#m7"
    pub chord: String,
    /// Frets, lowest string first; negative = muted
    pub frets: Tab,
}

/// Root of a chord shape document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShapeFile {
    /// Open string notes, highest string first
    pub tuning: Vec<Note>,
    /// Shapes used only where written
    #[serde(default)]
    pub open: Vec<ShapeEntry>,
    /// Moveable shapes
    #[serde(default)]
    pub barre: Vec<ShapeEntry>,
}

impl ShapeFile {
    /// Load a shape file, choosing the format from the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read shape file: {:?}", path))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => bail!("Unsupported shape file format: {:?}", path),
        }
    }

    /// Parse a shape file from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML shape file")
    }

    /// Parse a shape file from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML shape file")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize shape file to YAML")
    }

    /// Save shape file as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write shape file: {:?}", path.as_ref()))
    }

    pub fn fretboard(&self) -> Fretboard {
        Fretboard::new(self.tuning.clone())
    }
}

/// Every shape for every chord an instrument can reach, grouped by root
/// pitch class and quality so that C# and Db share their shapes
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    fretboard: Fretboard,
    shapes: HashMap<(u8, ChordQuality), Vec<Tab>>,
}

impl ShapeLibrary {
    /// Build a library from a shape file. Each family is sorted from the
    /// nut up the neck.
    pub fn from_file(file: &ShapeFile) -> Result<Self> {
        let strings = file.tuning.len();
        let mut shapes: HashMap<(u8, ChordQuality), Vec<Tab>> = HashMap::new();

        for entry in &file.open {
            let chord = parse_entry(entry, strings)?;
            shapes.entry(family_key(&chord)).or_default().push(entry.frets.clone());
        }

        for entry in &file.barre {
            let chord = parse_entry(entry, strings)?;
            for fret in 0..BARRE_FRETS {
                let moved = chord.transpose(fret);
                shapes
                    .entry(family_key(&moved))
                    .or_default()
                    .push(move_shape(&entry.frets, fret));
            }
        }

        for family in shapes.values_mut() {
            family.sort_by_key(|tab| lowest_fret(tab));
        }

        debug!(
            "Loaded {} chord families from {} open and {} barre shapes",
            shapes.len(),
            file.open.len(),
            file.barre.len()
        );

        Ok(Self {
            fretboard: file.fretboard(),
            shapes,
        })
    }

    pub fn fretboard(&self) -> &Fretboard {
        &self.fretboard
    }

    /// All shapes for a chord, nearest the nut first
    pub fn tabs(&self, root: Note, quality: ChordQuality) -> &[Tab] {
        self.shapes
            .get(&(root.pitch_class(), quality))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// One variation of a chord, if there are that many
    pub fn tab(&self, root: Note, quality: ChordQuality, variation: usize) -> Option<&[i32]> {
        self.tabs(root, quality).get(variation).map(Vec::as_slice)
    }

    pub fn variation_count(&self, root: Note, quality: ChordQuality) -> usize {
        self.tabs(root, quality).len()
    }

    /// Shapes for a chord; the bass note is ignored
    pub fn tabs_for_chord(&self, chord: &Chord) -> &[Tab] {
        self.tabs(chord.root(), chord.quality())
    }

    pub fn chord_from_tab(&self, tab: &[i32]) -> crate::error::Result<Option<Chord>> {
        self.fretboard.chord_from_tab(tab)
    }
}

fn parse_entry(entry: &ShapeEntry, strings: usize) -> Result<Chord> {
    if entry.frets.len() != strings {
        bail!(
            "Shape for {} has {} frets but the tuning has {} strings",
            entry.chord,
            entry.frets.len(),
            strings
        );
    }
    match Chord::parse(&entry.chord).with_context(|| format!("Invalid chord in shape file: {}", entry.chord))? {
        Some(chord) => Ok(chord),
        None => bail!("Invalid chord in shape file: {}", entry.chord),
    }
}

fn family_key(chord: &Chord) -> (u8, ChordQuality) {
    (chord.root().pitch_class(), chord.quality())
}

/// Move every fretted or open string up by `amount`; muted strings stay muted
fn move_shape(frets: &[i32], amount: i32) -> Tab {
    frets
        .iter()
        .map(|&f| if f >= 0 { f + amount } else { -1 })
        .collect()
}

/// Lowest fret used by a shape; any open string makes it 0
fn lowest_fret(tab: &[i32]) -> i32 {
    if tab.contains(&0) {
        return 0;
    }
    tab.iter().copied().filter(|&f| f > 0).min().unwrap_or(i32::MAX)
}

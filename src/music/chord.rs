// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord qualities and chord spelling.
//!
//! A chord is built from semitone offsets above a root. Each tone carries a
//! scale-degree label (I..VII) used to colour its role on the fretboard.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::key;
use super::pitch::{resolve_note, NoteName, PitchClass};
use crate::error::{TheoryError, TheoryResult};

/// Scale-degree role of a chord tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Degree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl Degree {
    pub const ALL: [Degree; 7] = [
        Degree::I,
        Degree::II,
        Degree::III,
        Degree::IV,
        Degree::V,
        Degree::VI,
        Degree::VII,
    ];

    /// Zero-based index (I = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Degree::ALL.get(index).copied()
    }

    /// Degree label for a semitone offset above the root.
    ///
    /// Sixths have no offset of their own here: 8 reads as an augmented
    /// fifth and 9 as a diminished seventh. Chord types that mean a sixth
    /// carry explicit degrees instead.
    pub fn from_interval(offset: u8) -> Self {
        match offset % 12 {
            0 => Degree::I,
            1 | 2 => Degree::II,
            3 | 4 => Degree::III,
            5 => Degree::IV,
            6..=8 => Degree::V,
            _ => Degree::VII,
        }
    }

    pub fn roman(self) -> &'static str {
        match self {
            Degree::I => "I",
            Degree::II => "II",
            Degree::III => "III",
            Degree::IV => "IV",
            Degree::V => "V",
            Degree::VI => "VI",
            Degree::VII => "VII",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.roman())
    }
}

/// Pitch class to degree, as produced by chord generation
pub type DegreeMap = HashMap<PitchClass, Degree>;

/// A registered chord quality
#[derive(Debug, PartialEq, Eq)]
pub struct ChordType {
    name: &'static str,
    symbol: &'static str,
    offsets: &'static [u8],
    degrees: Option<&'static [Degree]>,
}

impl ChordType {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Chord-symbol suffix (e.g. "m7")
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Semitone offsets from the root, ascending
    pub fn offsets(&self) -> &'static [u8] {
        self.offsets
    }

    /// Degree of each tone, in offset order
    pub fn degrees(&self) -> Vec<Degree> {
        match self.degrees {
            Some(degrees) => degrees.to_vec(),
            None => self.offsets.iter().map(|&o| Degree::from_interval(o)).collect(),
        }
    }

    /// Find a chord type by exact name
    pub fn find(name: &str) -> Option<&'static ChordType> {
        let name = name.trim();
        CHORD_TYPES.iter().find(|ct| ct.name == name)
    }

    /// Like [`ChordType::find`], failing with `UnknownChordType`
    pub fn get(name: &str) -> TheoryResult<&'static ChordType> {
        Self::find(name).ok_or_else(|| TheoryError::UnknownChordType(name.to_string()))
    }

    pub fn all() -> &'static [ChordType] {
        &CHORD_TYPES
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const fn chord(name: &'static str, symbol: &'static str, offsets: &'static [u8]) -> ChordType {
    ChordType {
        name,
        symbol,
        offsets,
        degrees: None,
    }
}

static CHORD_TYPES: [ChordType; 16] = [
    // Triads
    chord("major", "", &[0, 4, 7]),
    chord("minor", "m", &[0, 3, 7]),
    chord("diminished", "dim", &[0, 3, 6]),
    chord("augmented", "aug", &[0, 4, 8]),
    chord("sus2", "sus2", &[0, 2, 7]),
    chord("sus4", "sus4", &[0, 5, 7]),
    chord("add9", "add9", &[0, 2, 4, 7]),
    // Sixths
    ChordType {
        name: "major6",
        symbol: "6",
        offsets: &[0, 4, 7, 9],
        degrees: Some(&[Degree::I, Degree::III, Degree::V, Degree::VI]),
    },
    ChordType {
        name: "minor6",
        symbol: "m6",
        offsets: &[0, 3, 7, 9],
        degrees: Some(&[Degree::I, Degree::III, Degree::V, Degree::VI]),
    },
    // Sevenths
    chord("dominant7", "7", &[0, 4, 7, 10]),
    chord("major7", "maj7", &[0, 4, 7, 11]),
    chord("minor7", "m7", &[0, 3, 7, 10]),
    chord("minor_major7", "m(maj7)", &[0, 3, 7, 11]),
    chord("half_diminished7", "m7b5", &[0, 3, 6, 10]),
    chord("dim7", "dim7", &[0, 3, 6, 9]),
    chord("augmented7", "aug7", &[0, 4, 8, 10]),
];

/// One tone of a generated chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordTone {
    pub note: NoteName,
    pub degree: Degree,
}

/// A spelled chord
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: NoteName,
    chord_type: &'static ChordType,
    tones: Vec<ChordTone>,
}

impl Chord {
    pub fn root(&self) -> NoteName {
        self.root
    }

    pub fn chord_type(&self) -> &'static ChordType {
        self.chord_type
    }

    pub fn tones(&self) -> &[ChordTone] {
        &self.tones
    }

    /// Chord notes in offset order
    pub fn notes(&self) -> Vec<NoteName> {
        self.tones.iter().map(|t| t.note).collect()
    }

    /// Degrees in offset order
    pub fn degrees(&self) -> Vec<Degree> {
        self.tones.iter().map(|t| t.degree).collect()
    }

    /// Degree of each chord tone, keyed by pitch class
    pub fn degree_map(&self) -> DegreeMap {
        self.tones
            .iter()
            .map(|t| (t.note.pitch_class(), t.degree))
            .collect()
    }

    /// Chord symbol (e.g. "Am7")
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.chord_type.symbol())
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.chord_type)
    }
}

/// Spell a chord of type `chord_type` on `root`.
///
/// Minor chords take the spelling of the root's minor key; every other
/// quality takes the spelling of the root's major key.
pub fn generate(root: &str, chord_type: &str) -> TheoryResult<Chord> {
    let chord_type = ChordType::get(chord_type)?;
    let root_name = NoteName::parse(root)?;

    let tonality = if chord_type.name() == "minor" {
        key::minor_tonality(root)
    } else {
        root.trim().to_string()
    };
    let spelling = key::lookup(&tonality).spelling();
    trace!(%root_name, chord = chord_type.name(), ?spelling, "generating chord");

    let tones = chord_type
        .offsets()
        .iter()
        .zip(chord_type.degrees())
        .map(|(&offset, degree)| {
            Ok(ChordTone {
                note: resolve_note(root, offset as i8, spelling)?,
                degree,
            })
        })
        .collect::<TheoryResult<Vec<_>>>()?;

    Ok(Chord {
        root: root_name,
        chord_type,
        tones,
    })
}

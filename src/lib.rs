// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale, chord and key-signature engine for fretboard diagrams.
//!
//! The functions in this module are the query surface used by the
//! presentation layer: generate a scale or chord, walk the cycle of fifths,
//! and map a pattern onto a fretboard.
//!
//! ```
//! use fretlab::{generate_chord, map_fretboard, Pattern, Tuning};
//!
//! let chord = generate_chord("A", "minor").unwrap();
//! let tuning = Tuning::standard(6).unwrap();
//! let positions = map_fretboard(&tuning, 12, &Pattern::from_chord(&chord)).unwrap();
//! assert!(positions.iter().any(|p| p.is_root));
//! ```

pub mod config;
pub mod error;
pub mod fretboard;
pub mod music;
pub mod view;

use std::fmt;

pub use error::{TheoryError, TheoryResult};
pub use fretboard::{FretPosition, Fretboard, Pattern, Tuning};
pub use music::{
    resolve_note, Chord, ChordTone, ChordType, CycleEntry, Degree, DegreeMap, KeySignature,
    NoteName, PitchClass, ScaleType, Spelling,
};

use music::{chord, cycle, key, scale};

/// What to generate on each tonality of a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Scale(String),
    Chord(String),
}

impl Selection {
    pub fn name(&self) -> &str {
        match self {
            Selection::Scale(name) | Selection::Chord(name) => name,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Scale(name) => write!(f, "scale '{}'", name),
            Selection::Chord(name) => write!(f, "chord '{}'", name),
        }
    }
}

/// Generate a scale for a tonality ("G", "F# minor").
///
/// The scale starts on the tonality's root and is spelled per the
/// tonality's key signature.
pub fn generate_scale(tonality: &str, scale_type: &str) -> TheoryResult<Vec<NoteName>> {
    let scale_type = ScaleType::get(scale_type)?;
    let (root, _) = key::split_tonality(tonality);
    let root = NoteName::parse(root)?;
    let spelling = key::lookup(tonality).spelling();
    Ok(scale::generate(root, scale_type.steps(), spelling))
}

/// Generate a chord on `root`
pub fn generate_chord(root: &str, chord_type: &str) -> TheoryResult<Chord> {
    chord::generate(root, chord_type)
}

/// Generate a scale or chord on every tonality of the cycle of fifths
pub fn enumerate_cycle(selection: &Selection, is_minor: bool) -> TheoryResult<Vec<CycleEntry<Pattern>>> {
    match selection {
        Selection::Scale(name) => Ok(cycle::generate_all(name, is_minor)?
            .into_iter()
            .map(|entry| CycleEntry {
                tonality: entry.tonality,
                root: entry.root,
                value: Pattern::from_notes(entry.value),
            })
            .collect()),
        Selection::Chord(name) => Ok(cycle::generate_all_chords(name, is_minor)?
            .into_iter()
            .map(|entry| CycleEntry {
                tonality: entry.tonality,
                root: entry.root,
                value: Pattern::from_chord(&entry.value),
            })
            .collect()),
    }
}

/// Map a pattern onto a fretboard with `fret_count` frets
pub fn map_fretboard(tuning: &Tuning, fret_count: usize, pattern: &Pattern) -> TheoryResult<Vec<FretPosition>> {
    fretboard::map_positions(tuning, fret_count, pattern.notes(), pattern.degrees())
}

/// Registered scale type names
pub fn scale_names() -> Vec<&'static str> {
    ScaleType::all().iter().map(|st| st.name()).collect()
}

/// Registered chord type names
pub fn chord_names() -> Vec<&'static str> {
    ChordType::all().iter().map(|ct| ct.name()).collect()
}

/// Registered tonality names
pub fn tonality_names() -> Vec<&'static str> {
    key::tonalities()
}

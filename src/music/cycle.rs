// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Cycle-of-fifths enumeration.
//!
//! Walks the twelve major (or minor) tonalities by ascending fifths, sharp
//! keys first and flat keys after, producing one scale or chord per key.

use serde::Serialize;

use super::chord::{self, Chord};
use super::key;
use super::pitch::NoteName;
use super::scale::{self, ScaleType};
use crate::error::TheoryResult;

/// Major tonalities in display order
pub const MAJOR_CYCLE: [&str; 12] = ["C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F"];

/// Roots of the minor tonalities in display order
pub const MINOR_CYCLE: [&str; 12] = ["A", "E", "B", "F#", "C#", "G#", "Eb", "Bb", "F", "C", "G", "D"];

/// One tonality's result in a cycle walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleEntry<T> {
    /// Tonality name ("G", "F# minor")
    pub tonality: String,
    /// Root of the tonality
    pub root: String,
    pub value: T,
}

/// Tonality names and roots of the requested cycle
pub fn tonalities(is_minor: bool) -> Vec<(String, &'static str)> {
    if is_minor {
        MINOR_CYCLE
            .iter()
            .map(|&root| (key::minor_tonality(root), root))
            .collect()
    } else {
        MAJOR_CYCLE.iter().map(|&root| (root.to_string(), root)).collect()
    }
}

/// Generate `scale_type` on every tonality of the cycle.
///
/// Each scale is spelled per its own tonality's key signature.
pub fn generate_all(scale_type: &str, is_minor: bool) -> TheoryResult<Vec<CycleEntry<Vec<NoteName>>>> {
    let scale_type = ScaleType::get(scale_type)?;
    tonalities(is_minor)
        .into_iter()
        .map(|(tonality, root)| {
            let spelling = key::lookup(&tonality).spelling();
            let notes = scale::generate(NoteName::parse(root)?, scale_type.steps(), spelling);
            Ok(CycleEntry {
                tonality,
                root: root.to_string(),
                value: notes,
            })
        })
        .collect()
}

/// Generate `chord_type` on the root of every tonality of the cycle
pub fn generate_all_chords(chord_type: &str, is_minor: bool) -> TheoryResult<Vec<CycleEntry<Chord>>> {
    tonalities(is_minor)
        .into_iter()
        .map(|(tonality, root)| {
            Ok(CycleEntry {
                tonality,
                root: root.to_string(),
                value: chord::generate(root, chord_type)?,
            })
        })
        .collect()
}

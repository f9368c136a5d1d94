// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard note mapping.
//!
//! Given a tuning and a fret count, finds every (string, fret) position whose
//! pitch belongs to a pattern of notes, and labels its role in the pattern.
//! String 0 is the highest-pitched string.

pub mod diagram;

use serde::Serialize;

use crate::error::{TheoryError, TheoryResult};
use crate::music::chord::{Chord, Degree, DegreeMap};
use crate::music::pitch::{NoteName, PitchClass, Spelling};

/// Ten-string reference tuning, highest string first
pub const REFERENCE_TUNING: [&str; 10] = ["E", "B", "G", "D", "A", "E", "B", "F#", "C#", "G#"];

/// Where 4- and 5-string tunings start within the reference tuning
pub const SHORT_TUNING_OFFSET: usize = 2;

pub const MIN_STRINGS: usize = 4;
pub const MAX_STRINGS: usize = 10;
pub const MAX_FRETS: usize = 24;

/// Open-string notes of an instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tuning {
    strings: Vec<NoteName>,
}

impl Tuning {
    /// Build a tuning from open-string notes, highest string first
    pub fn new(strings: Vec<NoteName>) -> TheoryResult<Self> {
        if !(MIN_STRINGS..=MAX_STRINGS).contains(&strings.len()) {
            return Err(TheoryError::InvalidStringCount(strings.len()));
        }
        Ok(Self { strings })
    }

    /// Parse a tuning from note names, highest string first
    pub fn parse<S: AsRef<str>>(names: &[S]) -> TheoryResult<Self> {
        let strings = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                NoteName::parse(name.as_ref()).map_err(|e| TheoryError::InvalidTuning {
                    string: i,
                    message: e.to_string(),
                })
            })
            .collect::<TheoryResult<Vec<_>>>()?;
        Self::new(strings)
    }

    /// Standard tuning for `string_count` strings.
    ///
    /// Six to ten strings take the top of the reference tuning. Four and
    /// five strings take a slice starting at [`SHORT_TUNING_OFFSET`], which
    /// gives G D A E (B) like a bass.
    pub fn standard(string_count: usize) -> TheoryResult<Self> {
        let start = match string_count {
            4 | 5 => SHORT_TUNING_OFFSET,
            6..=MAX_STRINGS => 0,
            _ => return Err(TheoryError::InvalidStringCount(string_count)),
        };
        Self::parse(&REFERENCE_TUNING[start..start + string_count])
    }

    pub fn strings(&self) -> &[NoteName] {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Open note of a string
    pub fn open(&self, string: usize) -> Option<NoteName> {
        self.strings.get(string).copied()
    }
}

/// A set of notes to place on the fretboard, optionally with explicit degrees.
///
/// The first note is the root. Chords carry their own degree labels; scales
/// are labelled by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    notes: Vec<NoteName>,
    degrees: Option<DegreeMap>,
}

impl Pattern {
    pub fn from_notes(notes: Vec<NoteName>) -> Self {
        Self {
            notes,
            degrees: None,
        }
    }

    pub fn from_chord(chord: &Chord) -> Self {
        Self {
            notes: chord.notes(),
            degrees: Some(chord.degree_map()),
        }
    }

    /// All twelve pitch classes, starting from C
    pub fn chromatic(spelling: Spelling) -> Self {
        Self::from_notes(spelling.table().to_vec())
    }

    pub fn notes(&self) -> &[NoteName] {
        &self.notes
    }

    pub fn degrees(&self) -> Option<&DegreeMap> {
        self.degrees.as_ref()
    }

    pub fn root(&self) -> Option<NoteName> {
        self.notes.first().copied()
    }
}

/// A pattern note found on the fretboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FretPosition {
    pub string: usize,
    pub fret: usize,
    pub note: NoteName,
    pub is_root: bool,
    /// Role in the pattern; `None` past the seventh pattern note
    pub degree: Option<Degree>,
}

/// A tuning with a fret count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    fret_count: usize,
}

impl Fretboard {
    pub fn new(tuning: Tuning, fret_count: usize) -> TheoryResult<Self> {
        if fret_count > MAX_FRETS {
            return Err(TheoryError::InvalidFretCount(fret_count));
        }
        Ok(Self { tuning, fret_count })
    }

    /// Standard-tuned board with `string_count` strings
    pub fn standard(string_count: usize, fret_count: usize) -> TheoryResult<Self> {
        Self::new(Tuning::standard(string_count)?, fret_count)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn fret_count(&self) -> usize {
        self.fret_count
    }

    /// Pitch class sounding at a position
    pub fn pitch_class_at(&self, string: usize, fret: usize) -> Option<PitchClass> {
        let open = self.tuning.open(string)?;
        Some(open.normalize().pitch_class().transpose((fret % 12) as i8))
    }

    /// Spelled note sounding at a position
    pub fn spelled_note(&self, string: usize, fret: usize, spelling: Spelling) -> Option<NoteName> {
        self.pitch_class_at(string, fret).map(|pc| pc.spell(spelling))
    }

    /// Every position whose note is in `pattern`, by string then fret
    pub fn positions(&self, pattern: &Pattern) -> Vec<FretPosition> {
        collect_positions(self, pattern.notes(), pattern.degrees())
    }
}

/// Map `pattern` onto a fretboard.
///
/// Notes are spelled as the pattern spells them. `explicit_degrees` overrides
/// the positional degree for the notes it contains.
pub fn map_positions(
    tuning: &Tuning,
    fret_count: usize,
    pattern: &[NoteName],
    explicit_degrees: Option<&DegreeMap>,
) -> TheoryResult<Vec<FretPosition>> {
    let board = Fretboard::new(tuning.clone(), fret_count)?;
    Ok(collect_positions(&board, pattern, explicit_degrees))
}

fn collect_positions(
    board: &Fretboard,
    pattern: &[NoteName],
    explicit_degrees: Option<&DegreeMap>,
) -> Vec<FretPosition> {
    let root = pattern.first().map(|n| n.pitch_class());
    let mut positions = Vec::new();

    for string in 0..board.tuning.len() {
        for fret in 0..=board.fret_count {
            let Some(pc) = board.pitch_class_at(string, fret) else {
                continue;
            };
            let Some(index) = pattern.iter().position(|n| n.pitch_class() == pc) else {
                continue;
            };
            let degree = explicit_degrees
                .and_then(|map| map.get(&pc).copied())
                .or_else(|| Degree::from_index(index));

            positions.push(FretPosition {
                string,
                fret,
                note: pattern[index],
                is_root: Some(pc) == root,
                degree,
            });
        }
    }

    positions
}

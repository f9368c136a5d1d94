// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale definitions and scale generation.
//!
//! Scales are stored as step patterns (semitone increments between
//! successive degrees) rather than offsets from the root, so a pattern's
//! length is its degree count and its sum is always one octave.

use std::fmt;

use tracing::trace;

use super::key;
use super::pitch::{NoteName, PitchClass, Spelling};
use crate::error::{TheoryError, TheoryResult};

/// A registered scale type
#[derive(Debug, PartialEq, Eq)]
pub struct ScaleType {
    name: &'static str,
    label: &'static str,
    aliases: &'static [&'static str],
    steps: &'static [u8],
}

impl ScaleType {
    /// Registry name (e.g. "harmonic_minor")
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable name (e.g. "Harmonic Minor")
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Semitone increments between successive degrees
    pub fn steps(&self) -> &'static [u8] {
        self.steps
    }

    /// Number of degrees
    pub fn degree_count(&self) -> usize {
        self.steps.len()
    }

    /// Offsets of each degree from the root
    pub fn intervals(&self) -> Vec<u8> {
        self.steps
            .iter()
            .scan(0u8, |offset, &step| {
                let current = *offset;
                *offset += step;
                Some(current)
            })
            .collect()
    }

    /// Find a scale type by name or alias.
    ///
    /// Matching ignores case, spaces, hyphens and underscores.
    pub fn find(name: &str) -> Option<&'static ScaleType> {
        let wanted = normalize_name(name);
        SCALE_TYPES.iter().find(|st| {
            normalize_name(st.name) == wanted
                || st.aliases.iter().any(|alias| normalize_name(alias) == wanted)
        })
    }

    /// Like [`ScaleType::find`], failing with `UnknownScaleType`
    pub fn get(name: &str) -> TheoryResult<&'static ScaleType> {
        Self::find(name).ok_or_else(|| TheoryError::UnknownScaleType(name.to_string()))
    }

    /// All registered scale types
    pub fn all() -> &'static [ScaleType] {
        &SCALE_TYPES
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

static SCALE_TYPES: [ScaleType; 17] = [
    // Major scale and modes
    ScaleType {
        name: "major",
        label: "Major",
        aliases: &["ionian"],
        steps: &[2, 2, 1, 2, 2, 2, 1],
    },
    ScaleType {
        name: "minor",
        label: "Natural Minor",
        aliases: &["natural_minor", "aeolian"],
        steps: &[2, 1, 2, 2, 1, 2, 2],
    },
    ScaleType {
        name: "dorian",
        label: "Dorian",
        aliases: &[],
        steps: &[2, 1, 2, 2, 2, 1, 2],
    },
    ScaleType {
        name: "phrygian",
        label: "Phrygian",
        aliases: &[],
        steps: &[1, 2, 2, 2, 1, 2, 2],
    },
    ScaleType {
        name: "lydian",
        label: "Lydian",
        aliases: &[],
        steps: &[2, 2, 2, 1, 2, 2, 1],
    },
    ScaleType {
        name: "mixolydian",
        label: "Mixolydian",
        aliases: &[],
        steps: &[2, 2, 1, 2, 2, 1, 2],
    },
    ScaleType {
        name: "locrian",
        label: "Locrian",
        aliases: &[],
        steps: &[1, 2, 2, 1, 2, 2, 2],
    },
    // Other minor scales
    ScaleType {
        name: "harmonic_minor",
        label: "Harmonic Minor",
        aliases: &[],
        steps: &[2, 1, 2, 2, 1, 3, 1],
    },
    ScaleType {
        name: "melodic_minor",
        label: "Melodic Minor",
        aliases: &[],
        steps: &[2, 1, 2, 2, 2, 2, 1],
    },
    // Pentatonic
    ScaleType {
        name: "major_pentatonic",
        label: "Major Pentatonic",
        aliases: &["pentatonic_major"],
        steps: &[2, 2, 3, 2, 3],
    },
    ScaleType {
        name: "minor_pentatonic",
        label: "Minor Pentatonic",
        aliases: &["pentatonic_minor", "pentatonic"],
        steps: &[3, 2, 2, 3, 2],
    },
    // Blues
    ScaleType {
        name: "blues",
        label: "Blues",
        aliases: &["minor_blues"],
        steps: &[3, 2, 1, 1, 3, 2],
    },
    ScaleType {
        name: "major_blues",
        label: "Major Blues",
        aliases: &[],
        steps: &[2, 1, 1, 3, 2, 3],
    },
    ScaleType {
        name: "whole_tone",
        label: "Whole Tone",
        aliases: &[],
        steps: &[2, 2, 2, 2, 2, 2],
    },
    // Double harmonic family
    ScaleType {
        name: "byzantine",
        label: "Byzantine",
        aliases: &["double_harmonic"],
        steps: &[1, 3, 1, 2, 1, 3, 1],
    },
    ScaleType {
        name: "hungarian_minor",
        label: "Hungarian Minor",
        aliases: &[],
        steps: &[2, 1, 3, 1, 1, 3, 1],
    },
    ScaleType {
        name: "phrygian_dominant",
        label: "Phrygian Dominant",
        aliases: &[],
        steps: &[1, 3, 1, 2, 1, 2, 2],
    },
];

/// Walk `steps` from `root`, spelling each degree with `spelling`.
///
/// Returns one note per step; the octave is never appended.
pub fn generate(root: NoteName, steps: &[u8], spelling: Spelling) -> Vec<NoteName> {
    trace!(%root, ?steps, ?spelling, "generating scale");
    let mut current: PitchClass = root.normalize().pitch_class();
    let mut notes = Vec::with_capacity(steps.len());
    for &step in steps {
        notes.push(current.spell(spelling));
        current = current.transpose((step % 12) as i8);
    }
    notes
}

/// Generate a named scale on `root`, spelled per the root's major key signature
pub fn generate_by_mode(root: &str, mode_name: &str) -> TheoryResult<Scale> {
    let scale_type = ScaleType::get(mode_name)?;
    let spelling = key::lookup(root).spelling();
    Scale::new(root, scale_type, spelling)
}

/// A generated scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: NoteName,
    scale_type: &'static ScaleType,
    notes: Vec<NoteName>,
}

impl Scale {
    /// Create a new scale from root name, type and spelling
    pub fn new(root: &str, scale_type: &'static ScaleType, spelling: Spelling) -> TheoryResult<Self> {
        let root = NoteName::parse(root)?;
        let notes = generate(root, scale_type.steps(), spelling);
        Ok(Self {
            root,
            scale_type,
            notes,
        })
    }

    /// Get the root as supplied
    pub fn root(&self) -> NoteName {
        self.root
    }

    pub fn scale_type(&self) -> &'static ScaleType {
        self.scale_type
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[NoteName] {
        &self.notes
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a note (in any spelling) is in this scale
    pub fn contains(&self, note: NoteName) -> bool {
        self.notes.iter().any(|n| n.is_enharmonic(note))
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(notes: &[NoteName]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    fn note(s: &str) -> NoteName {
        NoteName::parse(s).unwrap()
    }

    #[test]
    fn test_registry_invariants() {
        for st in ScaleType::all() {
            let total: u32 = st.steps().iter().map(|&s| s as u32).sum();
            assert_eq!(total, 12, "{} does not span an octave", st.name());
            assert!((5..=7).contains(&st.degree_count()), "{}", st.name());
        }
    }

    #[test]
    fn test_scale_type_find() {
        assert_eq!(ScaleType::find("major").unwrap().name(), "major");
        assert_eq!(ScaleType::find("Ionian").unwrap().name(), "major");
        assert_eq!(ScaleType::find("Natural Minor").unwrap().name(), "minor");
        assert_eq!(ScaleType::find("harmonic-minor").unwrap().name(), "harmonic_minor");
        assert!(ScaleType::find("zzz").is_none());
        assert_eq!(
            ScaleType::get("zzz"),
            Err(TheoryError::UnknownScaleType("zzz".to_string()))
        );
    }

    #[test]
    fn test_scale_type_intervals() {
        let major = ScaleType::find("major").unwrap();
        assert_eq!(major.intervals(), vec![0, 2, 4, 5, 7, 9, 11]);

        let pentatonic = ScaleType::find("minor_pentatonic").unwrap();
        assert_eq!(pentatonic.intervals(), vec![0, 3, 5, 7, 10]);
    }

    #[test]
    fn test_generate_c_major() {
        let major = ScaleType::find("major").unwrap();
        let notes = generate(note("C"), major.steps(), Spelling::Sharps);
        assert_eq!(names(&notes), vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_generate_length_matches_steps() {
        for st in ScaleType::all() {
            for root in ["C", "F#", "Bb", "E"] {
                let notes = generate(note(root), st.steps(), Spelling::Flats);
                assert_eq!(notes.len(), st.steps().len(), "{} on {}", st.name(), root);
                assert!(notes[0].is_enharmonic(note(root)));
            }
        }
    }

    #[test]
    fn test_generate_by_mode_uses_key_spelling() {
        let f_major = generate_by_mode("F", "major").unwrap();
        assert_eq!(names(f_major.notes()), vec!["F", "G", "A", "Bb", "C", "D", "E"]);

        let d_major = generate_by_mode("D", "major").unwrap();
        assert_eq!(names(d_major.notes()), vec!["D", "E", "F#", "G", "A", "B", "C#"]);

        let eb_blues = generate_by_mode("Eb", "blues").unwrap();
        assert_eq!(names(eb_blues.notes()), vec!["Eb", "Gb", "Ab", "A", "Bb", "Db"]);
    }

    #[test]
    fn test_generate_by_mode_errors() {
        assert_eq!(
            generate_by_mode("C", "zzz"),
            Err(TheoryError::UnknownScaleType("zzz".to_string()))
        );
        assert_eq!(
            generate_by_mode("H", "major"),
            Err(TheoryError::InvalidNoteName("H".to_string()))
        );
    }

    #[test]
    fn test_alias_root_is_normalized() {
        let major = ScaleType::find("major").unwrap();
        let notes = generate(note("Cb"), major.steps(), Spelling::Sharps);
        assert_eq!(notes[0], note("B"));
    }

    #[test]
    fn test_scale_queries() {
        let c_major = generate_by_mode("C", "major").unwrap();
        assert_eq!(c_major.len(), 7);
        assert!(c_major.contains(note("G")));
        assert!(!c_major.contains(note("F#")));
        assert_eq!(c_major.to_string(), "C Major");
    }
}

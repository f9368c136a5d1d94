// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and their spellings.
//!
//! A [`PitchClass`] is one of the twelve chromatic tones. A [`NoteName`] is
//! the letter-plus-accidental used to write one down. Every pitch class has a
//! sharp spelling and a flat spelling (identical for the naturals), chosen by
//! a [`Spelling`] convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};

/// Semitone offset type
pub type Semitones = i8;

/// Pitch classes in chromatic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Chromatic index (C = 0)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get pitch class from a chromatic index (wraps)
    pub fn from_index(index: u8) -> Self {
        PitchClass::ALL[(index % 12) as usize]
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let index = (self.index() as i16 + semitones as i16).rem_euclid(12) as u8;
        PitchClass::from_index(index)
    }

    /// Ascending interval in semitones to another pitch class
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.index() as i16 - self.index() as i16).rem_euclid(12) as u8
    }

    /// Spell this pitch class with the given convention
    pub fn spell(self, spelling: Spelling) -> NoteName {
        spelling.table()[self.index() as usize]
    }

    /// Whether both spellings agree (no accidental needed)
    pub fn is_natural(self) -> bool {
        SHARP_NAMES[self.index() as usize] == FLAT_NAMES[self.index() as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spell(Spelling::Sharps))
    }
}

/// Sharp-or-flat spelling convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    pub fn from_use_sharps(use_sharps: bool) -> Self {
        if use_sharps {
            Spelling::Sharps
        } else {
            Spelling::Flats
        }
    }

    /// The 12-entry spelling table for this convention
    pub fn table(self) -> &'static [NoteName; 12] {
        match self {
            Spelling::Sharps => &SHARP_NAMES,
            Spelling::Flats => &FLAT_NAMES,
        }
    }
}

/// Note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Pitch class of the natural note
    pub fn natural(self) -> PitchClass {
        match self {
            Letter::C => PitchClass::C,
            Letter::D => PitchClass::D,
            Letter::E => PitchClass::E,
            Letter::F => PitchClass::F,
            Letter::G => PitchClass::G,
            Letter::A => PitchClass::A,
            Letter::B => PitchClass::B,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn offset(self) -> Semitones {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "" => Some(Accidental::Natural),
            "#" | "♯" => Some(Accidental::Sharp),
            "b" | "♭" => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A spelled note: a letter with at most one accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteName {
    letter: Letter,
    accidental: Accidental,
}

impl NoteName {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    const fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    pub(crate) const fn sharp(letter: Letter) -> Self {
        Self::new(letter, Accidental::Sharp)
    }

    pub(crate) const fn flat(letter: Letter) -> Self {
        Self::new(letter, Accidental::Flat)
    }

    /// Parse a note name (e.g. "C", "f#", "Bb", "E♭")
    pub fn parse(s: &str) -> TheoryResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| TheoryError::InvalidNoteName(s.to_string()))?;
        let accidental = Accidental::from_str(chars.as_str())
            .ok_or_else(|| TheoryError::InvalidNoteName(s.to_string()))?;
        Ok(Self::new(letter, accidental))
    }

    pub fn letter(self) -> Letter {
        self.letter
    }

    pub fn accidental(self) -> Accidental {
        self.accidental
    }

    pub fn pitch_class(self) -> PitchClass {
        self.letter.natural().transpose(self.accidental.offset())
    }

    /// Replace a rarely-used spelling (Cb, Fb, B#, E#) with its common equivalent
    pub fn normalize(self) -> Self {
        match (self.letter, self.accidental) {
            (Letter::C, Accidental::Flat) => NoteName::natural(Letter::B),
            (Letter::F, Accidental::Flat) => NoteName::natural(Letter::E),
            (Letter::B, Accidental::Sharp) => NoteName::natural(Letter::C),
            (Letter::E, Accidental::Sharp) => NoteName::natural(Letter::F),
            _ => self,
        }
    }

    /// Whether this name appears in the given spelling table
    pub fn is_spelled(self, spelling: Spelling) -> bool {
        spelling.table().contains(&self)
    }

    /// Respell this note with the given convention
    pub fn respell(self, spelling: Spelling) -> Self {
        self.pitch_class().spell(spelling)
    }

    /// Same pitch class, regardless of spelling
    pub fn is_enharmonic(self, other: NoteName) -> bool {
        self.pitch_class() == other.pitch_class()
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accidental {
            Accidental::Natural => write!(f, "{}", self.letter.as_char()),
            Accidental::Sharp => write!(f, "{}#", self.letter.as_char()),
            Accidental::Flat => write!(f, "{}b", self.letter.as_char()),
        }
    }
}

impl FromStr for NoteName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteName::parse(s)
    }
}

impl TryFrom<String> for NoteName {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NoteName::parse(&value)
    }
}

impl From<NoteName> for String {
    fn from(note: NoteName) -> Self {
        note.to_string()
    }
}

/// Sharp spellings in chromatic order
pub const SHARP_NAMES: [NoteName; 12] = [
    NoteName::natural(Letter::C),
    NoteName::sharp(Letter::C),
    NoteName::natural(Letter::D),
    NoteName::sharp(Letter::D),
    NoteName::natural(Letter::E),
    NoteName::natural(Letter::F),
    NoteName::sharp(Letter::F),
    NoteName::natural(Letter::G),
    NoteName::sharp(Letter::G),
    NoteName::natural(Letter::A),
    NoteName::sharp(Letter::A),
    NoteName::natural(Letter::B),
];

/// Flat spellings in chromatic order
pub const FLAT_NAMES: [NoteName; 12] = [
    NoteName::natural(Letter::C),
    NoteName::flat(Letter::D),
    NoteName::natural(Letter::D),
    NoteName::flat(Letter::E),
    NoteName::natural(Letter::E),
    NoteName::natural(Letter::F),
    NoteName::flat(Letter::G),
    NoteName::natural(Letter::G),
    NoteName::flat(Letter::A),
    NoteName::natural(Letter::A),
    NoteName::flat(Letter::B),
    NoteName::natural(Letter::B),
];

/// Spell the note `interval` semitones above `root`.
///
/// The root may use either spelling (or an enharmonic alias such as `Cb`);
/// the result always comes from the `spelling` table.
pub fn resolve_note(root: &str, interval: Semitones, spelling: Spelling) -> TheoryResult<NoteName> {
    let root = NoteName::parse(root)?.normalize();
    Ok(root.pitch_class().transpose(interval).spell(spelling))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(s: &str) -> NoteName {
        NoteName::parse(s).unwrap()
    }

    #[test]
    fn test_pitch_class_index() {
        assert_eq!(PitchClass::C.index(), 0);
        assert_eq!(PitchClass::A.index(), 9);
        assert_eq!(PitchClass::B.index(), 11);
        assert_eq!(PitchClass::from_index(13), PitchClass::Cs);
    }

    #[test]
    fn test_pitch_class_transpose() {
        assert_eq!(PitchClass::C.transpose(2), PitchClass::D);
        assert_eq!(PitchClass::C.transpose(12), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
        assert_eq!(PitchClass::G.transpose(5), PitchClass::C);
        assert_eq!(PitchClass::G.interval_to(PitchClass::C), 5);
    }

    #[test]
    fn test_parse_note_names() {
        assert_eq!(note("C").pitch_class(), PitchClass::C);
        assert_eq!(note("c#").pitch_class(), PitchClass::Cs);
        assert_eq!(note(" Db ").pitch_class(), PitchClass::Cs);
        assert_eq!(note("E♭").pitch_class(), PitchClass::Ds);
        assert_eq!(note("F♯").to_string(), "F#");
        assert_eq!(note("Cb").pitch_class(), PitchClass::B);
        assert_eq!(note("E#").pitch_class(), PitchClass::F);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "H", "C##", "Cx", "#", "Bbb", "do"] {
            assert_eq!(
                NoteName::parse(bad),
                Err(TheoryError::InvalidNoteName(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(note("Cb").normalize(), note("B"));
        assert_eq!(note("Fb").normalize(), note("E"));
        assert_eq!(note("B#").normalize(), note("C"));
        assert_eq!(note("E#").normalize(), note("F"));
        assert_eq!(note("Bb").normalize(), note("Bb"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for alias in ["Cb", "Fb", "B#", "E#", "C", "F#", "Gb"] {
            let once = note(alias).normalize();
            assert_eq!(once.normalize(), once);
        }
    }

    #[test]
    fn test_spelling_tables() {
        let sharps: Vec<String> = SHARP_NAMES.iter().map(|n| n.to_string()).collect();
        let flats: Vec<String> = FLAT_NAMES.iter().map(|n| n.to_string()).collect();
        assert_eq!(sharps.join(" "), "C C# D D# E F F# G G# A A# B");
        assert_eq!(flats.join(" "), "C Db D Eb E F Gb G Ab A Bb B");

        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(SHARP_NAMES[i].pitch_class(), *pc);
            assert_eq!(FLAT_NAMES[i].pitch_class(), *pc);
        }
    }

    #[test]
    fn test_resolve_fifth_is_unambiguous() {
        assert_eq!(resolve_note("C", 7, Spelling::Sharps).unwrap(), note("G"));
        assert_eq!(resolve_note("C", 7, Spelling::Flats).unwrap(), note("G"));
    }

    #[test]
    fn test_resolve_uses_requested_table() {
        assert_eq!(resolve_note("C", 1, Spelling::Sharps).unwrap().to_string(), "C#");
        assert_eq!(resolve_note("C", 1, Spelling::Flats).unwrap().to_string(), "Db");
        // Roots spelled against the convention still resolve
        assert_eq!(resolve_note("F#", 0, Spelling::Flats).unwrap().to_string(), "Gb");
        assert_eq!(resolve_note("Eb", 0, Spelling::Sharps).unwrap().to_string(), "D#");
        assert_eq!(resolve_note("D#", 2, Spelling::Flats).unwrap().to_string(), "F");
        assert_eq!(resolve_note("Cb", 1, Spelling::Sharps).unwrap().to_string(), "C");
        assert_eq!(resolve_note("E", 24, Spelling::Sharps).unwrap().to_string(), "E");
    }

    #[test]
    fn test_resolve_invalid_root() {
        assert_eq!(
            resolve_note("X", 0, Spelling::Sharps),
            Err(TheoryError::InvalidNoteName("X".to_string()))
        );
    }

    #[test]
    fn test_note_serde_as_string() {
        let yaml = serde_yaml::to_string(&note("Bb")).unwrap();
        assert_eq!(yaml.trim(), "Bb");
        let parsed: NoteName = serde_yaml::from_str("F#").unwrap();
        assert_eq!(parsed, note("F#"));
        assert!(serde_yaml::from_str::<NoteName>("Q").is_err());
    }

    #[test]
    fn test_respell_and_enharmonic() {
        assert_eq!(note("A#").respell(Spelling::Flats), note("Bb"));
        assert!(note("A#").is_enharmonic(note("Bb")));
        assert!(!note("A#").is_enharmonic(note("B")));
        assert!(note("Bb").is_spelled(Spelling::Flats));
        assert!(!note("Bb").is_spelled(Spelling::Sharps));
        assert!(PitchClass::E.is_natural());
        assert!(!PitchClass::Gs.is_natural());
    }
}

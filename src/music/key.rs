// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signature registry.
//!
//! Maps a tonality name ("G", "Eb", "F# minor") to its spelling convention
//! and the accidentals of its signature. Covers the 13 major keys from Gb to
//! F# and their relative natural minors.

use std::fmt;

use tracing::debug;

use super::pitch::{Letter, NoteName, Spelling};

/// Suffix marking a minor tonality
pub const MINOR_SUFFIX: &str = " minor";

/// Key signature of a tonality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    tonality: &'static str,
    use_sharps: bool,
    accidentals: &'static [NoteName],
}

impl KeySignature {
    const fn new(
        tonality: &'static str,
        use_sharps: bool,
        accidentals: &'static [NoteName],
    ) -> Self {
        Self {
            tonality,
            use_sharps,
            accidentals,
        }
    }

    /// Tonality name (empty for the fallback signature)
    pub fn tonality(&self) -> &'static str {
        self.tonality
    }

    pub fn use_sharps(&self) -> bool {
        self.use_sharps
    }

    pub fn spelling(&self) -> Spelling {
        Spelling::from_use_sharps(self.use_sharps)
    }

    /// Signature accidentals in conventional order
    pub fn accidentals(&self) -> &'static [NoteName] {
        self.accidentals
    }

    pub fn accidental_count(&self) -> usize {
        self.accidentals.len()
    }

    pub fn is_minor(&self) -> bool {
        self.tonality.ends_with(MINOR_SUFFIX)
    }

    /// Whether this is the fallback used for unknown tonalities
    pub fn is_default(&self) -> bool {
        self.tonality.is_empty()
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accidentals.is_empty() {
            write!(f, "{}: no accidentals", self.tonality)
        } else {
            let names: Vec<String> = self.accidentals.iter().map(|n| n.to_string()).collect();
            write!(f, "{}: {}", self.tonality, names.join(" "))
        }
    }
}

/// Signature returned for unknown tonalities
pub static DEFAULT_SIGNATURE: KeySignature = KeySignature::new("", true, &[]);

const F_SHARP: NoteName = NoteName::sharp(Letter::F);
const C_SHARP: NoteName = NoteName::sharp(Letter::C);
const G_SHARP: NoteName = NoteName::sharp(Letter::G);
const D_SHARP: NoteName = NoteName::sharp(Letter::D);
const A_SHARP: NoteName = NoteName::sharp(Letter::A);
const E_SHARP: NoteName = NoteName::sharp(Letter::E);
const B_FLAT: NoteName = NoteName::flat(Letter::B);
const E_FLAT: NoteName = NoteName::flat(Letter::E);
const A_FLAT: NoteName = NoteName::flat(Letter::A);
const D_FLAT: NoteName = NoteName::flat(Letter::D);
const G_FLAT: NoteName = NoteName::flat(Letter::G);
const C_FLAT: NoteName = NoteName::flat(Letter::C);

static MAJOR_KEYS: [KeySignature; 13] = [
    KeySignature::new("C", true, &[]),
    KeySignature::new("G", true, &[F_SHARP]),
    KeySignature::new("D", true, &[F_SHARP, C_SHARP]),
    KeySignature::new("A", true, &[F_SHARP, C_SHARP, G_SHARP]),
    KeySignature::new("E", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP]),
    KeySignature::new("B", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP, A_SHARP]),
    KeySignature::new("F#", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP, A_SHARP, E_SHARP]),
    KeySignature::new("F", false, &[B_FLAT]),
    KeySignature::new("Bb", false, &[B_FLAT, E_FLAT]),
    KeySignature::new("Eb", false, &[B_FLAT, E_FLAT, A_FLAT]),
    KeySignature::new("Ab", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT]),
    KeySignature::new("Db", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT, G_FLAT]),
    KeySignature::new("Gb", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT, G_FLAT, C_FLAT]),
];

static MINOR_KEYS: [KeySignature; 13] = [
    KeySignature::new("A minor", true, &[]),
    KeySignature::new("E minor", true, &[F_SHARP]),
    KeySignature::new("B minor", true, &[F_SHARP, C_SHARP]),
    KeySignature::new("F# minor", true, &[F_SHARP, C_SHARP, G_SHARP]),
    KeySignature::new("C# minor", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP]),
    KeySignature::new("G# minor", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP, A_SHARP]),
    KeySignature::new("D# minor", true, &[F_SHARP, C_SHARP, G_SHARP, D_SHARP, A_SHARP, E_SHARP]),
    KeySignature::new("D minor", false, &[B_FLAT]),
    KeySignature::new("G minor", false, &[B_FLAT, E_FLAT]),
    KeySignature::new("C minor", false, &[B_FLAT, E_FLAT, A_FLAT]),
    KeySignature::new("F minor", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT]),
    KeySignature::new("Bb minor", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT, G_FLAT]),
    KeySignature::new("Eb minor", false, &[B_FLAT, E_FLAT, A_FLAT, D_FLAT, G_FLAT, C_FLAT]),
];

/// Look up a tonality, falling back to [`DEFAULT_SIGNATURE`] when unknown
pub fn lookup(tonality: &str) -> &'static KeySignature {
    match find(tonality) {
        Some(signature) => signature,
        None => {
            debug!(tonality, "unknown tonality, using default signature");
            &DEFAULT_SIGNATURE
        }
    }
}

/// Look up a tonality, returning `None` when unknown
pub fn find(tonality: &str) -> Option<&'static KeySignature> {
    let wanted = canonical_name(tonality)?;
    MAJOR_KEYS
        .iter()
        .chain(MINOR_KEYS.iter())
        .find(|sig| sig.tonality == wanted)
}

/// All registered tonality names, majors first
pub fn tonalities() -> Vec<&'static str> {
    MAJOR_KEYS
        .iter()
        .chain(MINOR_KEYS.iter())
        .map(|sig| sig.tonality)
        .collect()
}

/// Name of the minor tonality on `root`
pub fn minor_tonality(root: &str) -> String {
    format!("{}{}", root.trim(), MINOR_SUFFIX)
}

/// Split a tonality into its root and whether it is minor
pub fn split_tonality(tonality: &str) -> (&str, bool) {
    let trimmed = tonality.trim();
    match trimmed.strip_suffix(MINOR_SUFFIX) {
        Some(root) => (root.trim(), true),
        None => (trimmed, false),
    }
}

/// Canonical registry key for a tonality: parsed root plus optional suffix
fn canonical_name(tonality: &str) -> Option<String> {
    let (root, minor) = split_tonality(tonality);
    let root = NoteName::parse(root).ok()?;
    if minor {
        Some(minor_tonality(&root.to_string()))
    } else {
        Some(root.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::{Accidental, PitchClass};

    #[test]
    fn test_registry_size() {
        assert_eq!(tonalities().len(), 26);
        assert_eq!(MAJOR_KEYS.len(), 13);
        assert_eq!(MINOR_KEYS.len(), 13);
    }

    #[test]
    fn test_lookup_known_keys() {
        let g = lookup("G");
        assert!(g.use_sharps());
        assert_eq!(g.accidentals(), &[NoteName::parse("F#").unwrap()]);

        let f = lookup("F");
        assert!(!f.use_sharps());
        assert_eq!(f.spelling(), Spelling::Flats);
        assert_eq!(f.accidental_count(), 1);

        let a_minor = lookup("A minor");
        assert!(a_minor.use_sharps());
        assert!(a_minor.accidentals().is_empty());
        assert!(a_minor.is_minor());
    }

    #[test]
    fn test_lookup_unknown_falls_back() {
        let sig = lookup("Z");
        assert_eq!(*sig, DEFAULT_SIGNATURE);
        assert!(sig.use_sharps());
        assert!(sig.accidentals().is_empty());
        assert!(sig.is_default());

        // Enharmonic roots outside the table fall back too
        assert!(lookup("C#").is_default());
        assert!(find("C#").is_none());
        assert!(find("Z").is_none());
    }

    #[test]
    fn test_lookup_tolerates_case_and_spacing() {
        assert_eq!(lookup(" bb ").tonality(), "Bb");
        assert_eq!(lookup("f# minor").tonality(), "F# minor");
    }

    #[test]
    fn test_accidentals_follow_key_direction() {
        for sig in MAJOR_KEYS.iter().chain(MINOR_KEYS.iter()) {
            let expected = if sig.use_sharps() { Accidental::Sharp } else { Accidental::Flat };
            assert!(
                sig.accidentals().iter().all(|n| n.accidental() == expected),
                "{sig}"
            );
        }
        assert_eq!(lookup("Gb").accidentals().last(), Some(&NoteName::parse("Cb").unwrap()));
        assert_eq!(lookup("D# minor").to_string(), "D# minor: F# C# G# D# A# E#");
    }

    #[test]
    fn test_relative_keys_share_signatures() {
        for (major, minor) in MAJOR_KEYS.iter().zip(MINOR_KEYS.iter()) {
            let major_root = NoteName::parse(major.tonality()).unwrap().pitch_class();
            let (minor_root, is_minor) = split_tonality(minor.tonality());
            assert!(is_minor);
            let minor_root = NoteName::parse(minor_root).unwrap().pitch_class();

            assert_eq!(minor_root.transpose(3), major_root, "{major} / {minor}");
            assert_eq!(major.use_sharps(), minor.use_sharps());
            assert_eq!(major.accidentals(), minor.accidentals());
        }
    }

    #[test]
    fn test_sharp_keys_use_sharp_accidentals() {
        let e_major = lookup("E");
        let pcs: Vec<PitchClass> = e_major
            .accidentals()
            .iter()
            .map(|n| n.pitch_class())
            .collect();
        assert_eq!(
            pcs,
            vec![PitchClass::Fs, PitchClass::Cs, PitchClass::Gs, PitchClass::Ds]
        );
    }

    #[test]
    fn test_split_tonality() {
        assert_eq!(split_tonality("G"), ("G", false));
        assert_eq!(split_tonality("F# minor"), ("F#", true));
        assert_eq!(minor_tonality("C"), "C minor");
    }
}

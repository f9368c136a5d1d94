// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory engine.
//!
//! Pitch spelling, key signatures, scales, chords and the cycle of fifths.
//! Every registry here is static data; all operations are pure.

pub mod chord;
pub mod cycle;
pub mod key;
pub mod pitch;
pub mod scale;

pub use chord::{Chord, ChordTone, ChordType, Degree, DegreeMap};
pub use cycle::CycleEntry;
pub use key::KeySignature;
pub use pitch::{resolve_note, NoteName, PitchClass, Spelling};
pub use scale::{Scale, ScaleType};

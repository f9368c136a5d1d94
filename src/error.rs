// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.
//!
//! Every failure is local to the query that produced it. Unknown tonalities
//! are not errors: key-signature lookup falls back to a default signature.

use thiserror::Error;

/// Result alias used throughout the engine
pub type TheoryResult<T> = Result<T, TheoryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// A note name could not be resolved to a pitch class.
    ///
    /// # Example
    /// ```
    /// # use fretlab::TheoryError;
    /// let err = TheoryError::InvalidNoteName("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: 'H'");
    /// ```
    #[error("Invalid note name: '{0}'")]
    InvalidNoteName(String),

    /// The scale type is not registered.
    #[error("Unknown scale type: '{0}'")]
    UnknownScaleType(String),

    /// The chord type is not registered.
    #[error("Unknown chord type: '{0}'")]
    UnknownChordType(String),

    /// Tunings support between 4 and 10 strings.
    #[error("Unsupported string count {0} (expected 4-10)")]
    InvalidStringCount(usize),

    /// Fretboards support at most 24 frets.
    #[error("Unsupported fret count {0} (expected 0-24)")]
    InvalidFretCount(usize),

    /// A tuning string failed to parse.
    #[error("Invalid tuning at string {string}: {message}")]
    InvalidTuning { string: usize, message: String },
}

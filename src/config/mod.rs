// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! View configuration.
//!
//! A view file says what to put on the fretboard: a tonality with a scale
//! or chord, optionally walked around the cycle of fifths, and the shape of
//! the instrument. YAML is the primary format; `.toml` files are accepted.

pub mod watcher;

pub use watcher::{validate_config, ConfigEvent, ConfigWatcher};

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TheoryResult;
use crate::fretboard::{Fretboard, Tuning};
use crate::music::{key, ChordType, NoteName, ScaleType};
use crate::Selection;

/// Root of a view file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewFile {
    #[serde(default)]
    pub view: ViewConfig,
}

impl ViewFile {
    /// Load a view file, choosing the format from the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read view file: {:?}", path))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Parse a view from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML view")
    }

    /// Parse a view from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML view")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize view to YAML")
    }

    /// Save the view to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write view file: {:?}", path.as_ref()))
    }
}

/// What to display and on which instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewConfig {
    /// Tonality (e.g. "C", "Bb", "F# minor")
    #[serde(default = "default_tonality")]
    pub tonality: String,
    /// Scale type name (defaults to major when no chord is given)
    #[serde(default)]
    pub scale: Option<String>,
    /// Chord type name
    #[serde(default)]
    pub chord: Option<String>,
    /// Use the minor tonality on the root
    #[serde(default)]
    pub minor: bool,
    /// Show every tonality of the cycle of fifths
    #[serde(default)]
    pub cycle: bool,
    /// Number of strings (4-10)
    #[serde(default = "default_strings")]
    pub strings: usize,
    /// Number of frets (0-24)
    #[serde(default = "default_frets")]
    pub frets: usize,
    /// Diagrams per row
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Open-string notes, highest first; overrides the standard tuning
    #[serde(default)]
    pub tuning: Option<Vec<String>>,
}

fn default_tonality() -> String {
    "C".to_string()
}
fn default_strings() -> usize {
    7
}
fn default_frets() -> usize {
    12
}
fn default_columns() -> usize {
    3
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tonality: default_tonality(),
            scale: None,
            chord: None,
            minor: false,
            cycle: false,
            strings: default_strings(),
            frets: default_frets(),
            columns: default_columns(),
            tuning: None,
        }
    }
}

impl ViewConfig {
    /// Scale or chord to display
    pub fn selection(&self) -> Selection {
        match (&self.chord, &self.scale) {
            (Some(chord), _) => Selection::Chord(chord.clone()),
            (None, Some(scale)) => Selection::Scale(scale.clone()),
            (None, None) => Selection::Scale("major".to_string()),
        }
    }

    /// Root of the tonality
    pub fn root(&self) -> &str {
        key::split_tonality(&self.tonality).0
    }

    /// Tonality with the minor flag applied
    pub fn effective_tonality(&self) -> String {
        let (root, is_minor) = key::split_tonality(&self.tonality);
        if is_minor || self.minor {
            key::minor_tonality(root)
        } else {
            root.to_string()
        }
    }

    pub fn is_minor(&self) -> bool {
        self.minor || key::split_tonality(&self.tonality).1
    }

    /// Tuning from the explicit list, or the standard one for `strings`
    pub fn tuning(&self) -> TheoryResult<Tuning> {
        match &self.tuning {
            Some(names) => Tuning::parse(names.as_slice()),
            None => Tuning::standard(self.strings),
        }
    }

    pub fn fretboard(&self) -> TheoryResult<Fretboard> {
        Fretboard::new(self.tuning()?, self.frets)
    }

    /// Check every name in the view against the engine
    pub fn validate(&self) -> Result<()> {
        if self.scale.is_some() && self.chord.is_some() {
            bail!("A view shows either a scale or a chord, not both");
        }
        if !self.cycle {
            NoteName::parse(self.root())
                .with_context(|| format!("Invalid tonality '{}'", self.tonality))?;
        }
        match self.selection() {
            Selection::Scale(name) => {
                ScaleType::get(&name)?;
            }
            Selection::Chord(name) => {
                ChordType::get(&name)?;
            }
        }
        self.fretboard()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TheoryError;

    #[test]
    fn test_parse_view() {
        let yaml = r#"
view:
  tonality: "G"
  scale: "mixolydian"
  strings: 6
  frets: 15
"#;

        let file = ViewFile::from_yaml(yaml).unwrap();
        assert_eq!(file.view.tonality, "G");
        assert_eq!(file.view.selection(), Selection::Scale("mixolydian".to_string()));
        assert_eq!(file.view.strings, 6);
        assert_eq!(file.view.frets, 15);
        assert_eq!(file.view.columns, 3);
        assert!(file.view.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let file = ViewFile::from_yaml("view: {}").unwrap();
        assert_eq!(file.view, ViewConfig::default());
        assert_eq!(file.view.tonality, "C");
        assert_eq!(file.view.selection(), Selection::Scale("major".to_string()));
        assert_eq!(file.view.strings, 7);
        assert_eq!(file.view.frets, 12);
        assert!(!file.view.cycle);
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
[view]
tonality = "D"
chord = "minor7"
cycle = true
minor = true
"#;
        let file = ViewFile::from_toml(text).unwrap();
        assert_eq!(file.view.selection(), Selection::Chord("minor7".to_string()));
        assert!(file.view.cycle);
        assert!(file.view.is_minor());
        assert_eq!(file.view.effective_tonality(), "D minor");
    }

    #[test]
    fn test_custom_tuning() {
        let yaml = r#"
view:
  tuning: ["D", "A", "F#", "D", "A", "D"]
"#;
        let view = ViewFile::from_yaml(yaml).unwrap().view;
        let tuning = view.tuning().unwrap();
        assert_eq!(tuning.len(), 6);
        assert_eq!(tuning.open(2), Some(NoteName::parse("F#").unwrap()));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let view = ViewConfig {
            scale: Some("zzz".to_string()),
            ..Default::default()
        };
        let err = view.validate().unwrap_err();
        assert_eq!(
            err.downcast_ref::<TheoryError>(),
            Some(&TheoryError::UnknownScaleType("zzz".to_string()))
        );

        let view = ViewConfig {
            tonality: "H".to_string(),
            ..Default::default()
        };
        assert!(view.validate().is_err());

        let view = ViewConfig {
            scale: Some("major".to_string()),
            chord: Some("major".to_string()),
            ..Default::default()
        };
        assert!(view.validate().is_err());

        let view = ViewConfig {
            strings: 12,
            ..Default::default()
        };
        assert!(view.validate().is_err());
    }

    #[test]
    fn test_effective_tonality() {
        let view = ViewConfig {
            tonality: "E minor".to_string(),
            ..Default::default()
        };
        assert_eq!(view.root(), "E");
        assert_eq!(view.effective_tonality(), "E minor");

        let view = ViewConfig {
            tonality: "E".to_string(),
            minor: true,
            ..Default::default()
        };
        assert_eq!(view.effective_tonality(), "E minor");
    }

    #[test]
    fn test_round_trip() {
        let original = ViewFile {
            view: ViewConfig {
                tonality: "Bb".to_string(),
                chord: Some("dominant7".to_string()),
                strings: 4,
                frets: 24,
                ..Default::default()
            },
        };

        let yaml = original.to_yaml().unwrap();
        let parsed = ViewFile::from_yaml(&yaml).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.yaml");
        let file = ViewFile::default();
        file.save(&path).unwrap();
        assert_eq!(ViewFile::load(&path).unwrap(), file);

        assert!(ViewFile::load(dir.path().join("missing.yaml")).is_err());
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Builds the fretboards a view asks for.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::config::ViewConfig;
use crate::error::TheoryResult;
use crate::fretboard::diagram;
use crate::fretboard::{FretPosition, Fretboard, Pattern};
use crate::music::{ChordType, NoteName, ScaleType};
use crate::{enumerate_cycle, generate_chord, generate_scale, Selection};

/// One titled fretboard's worth of positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub title: String,
    pub notes: Vec<NoteName>,
    pub positions: Vec<FretPosition>,
}

/// Every board of a view, on a shared fretboard
#[derive(Debug, Clone)]
pub struct RenderedView {
    pub fretboard: Fretboard,
    pub boards: Vec<BoardView>,
    pub columns: usize,
}

impl RenderedView {
    /// Text diagrams laid out in columns
    pub fn to_text(&self) -> String {
        let diagrams: Vec<String> = self
            .boards
            .iter()
            .map(|board| diagram::render(&self.fretboard, &board.positions, &board.heading()))
            .collect();
        diagram::render_columns(&diagrams, self.columns)
    }

    /// Boards as YAML, for consumers that draw their own diagrams
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.boards).context("Failed to serialize positions to YAML")
    }
}

impl BoardView {
    fn heading(&self) -> String {
        let notes: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        format!("{}: {}", self.title, notes.join(" "))
    }
}

/// Generate the patterns of a view and map them onto its fretboard
pub fn build(config: &ViewConfig) -> TheoryResult<RenderedView> {
    let fretboard = config.fretboard()?;
    let selection = config.selection();

    let patterns: Vec<(String, Pattern)> = if config.cycle {
        let label = selection_label(&selection)?;
        enumerate_cycle(&selection, config.is_minor())?
            .into_iter()
            .map(|entry| {
                let title = match &selection {
                    Selection::Scale(_) => format!("{} {}", entry.tonality, label),
                    Selection::Chord(_) => format!("{}{}", entry.root, label),
                };
                (title, entry.value)
            })
            .collect()
    } else {
        match &selection {
            Selection::Scale(name) => {
                let tonality = config.effective_tonality();
                let notes = generate_scale(&tonality, name)?;
                let title = format!("{} {}", tonality, selection_label(&selection)?);
                vec![(title, Pattern::from_notes(notes))]
            }
            Selection::Chord(name) => {
                let chord = generate_chord(config.root(), name)?;
                vec![(chord.symbol(), Pattern::from_chord(&chord))]
            }
        }
    };

    let boards: Vec<BoardView> = patterns
        .into_iter()
        .map(|(title, pattern)| BoardView {
            positions: fretboard.positions(&pattern),
            notes: pattern.notes().to_vec(),
            title,
        })
        .collect();
    debug!(boards = boards.len(), strings = fretboard.tuning().len(), "built view");

    Ok(RenderedView {
        fretboard,
        boards,
        columns: config.columns,
    })
}

/// Scale label or chord symbol suffix
fn selection_label(selection: &Selection) -> TheoryResult<&'static str> {
    match selection {
        Selection::Scale(name) => Ok(ScaleType::get(name)?.label()),
        Selection::Chord(name) => Ok(ChordType::get(name)?.symbol()),
    }
}

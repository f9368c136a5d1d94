// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Plain-text fretboard diagrams.

use super::{FretPosition, Fretboard};

/// Frets that get a number in the header
pub const FRET_MARKERS: [usize; 11] = [0, 3, 5, 7, 9, 12, 15, 17, 19, 21, 24];

const CELL_WIDTH: usize = 5;
const COLUMN_GAP: &str = "    ";

/// Render one fretboard with its title.
///
/// Pattern notes are drawn in their cell, roots in brackets. The open-string
/// column is separated from fret 1 by a double bar.
pub fn render(board: &Fretboard, positions: &[FretPosition], title: &str) -> String {
    let mut lines = vec![title.to_string(), header(board.fret_count())];

    for (string, open) in board.tuning().strings().iter().enumerate() {
        let mut line = format!("{:<3}", open.to_string());
        for fret in 0..=board.fret_count() {
            let text = positions
                .iter()
                .find(|p| p.string == string && p.fret == fret)
                .map(|p| {
                    if p.is_root {
                        format!("[{}]", p.note)
                    } else {
                        p.note.to_string()
                    }
                })
                .unwrap_or_default();
            line.push_str(&format!("{:-^width$}", text, width = CELL_WIDTH));
            line.push_str(if fret == 0 { "||" } else { "|" });
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn header(fret_count: usize) -> String {
    let mut line = " ".repeat(3);
    for fret in 0..=fret_count {
        let label = if FRET_MARKERS.contains(&fret) {
            fret.to_string()
        } else {
            String::new()
        };
        line.push_str(&format!("{:^width$}", label, width = CELL_WIDTH));
        line.push_str(if fret == 0 { "  " } else { " " });
    }
    line.trim_end().to_string()
}

/// Lay rendered diagrams out side by side, `columns` per row
pub fn render_columns(diagrams: &[String], columns: usize) -> String {
    let columns = columns.max(1);
    diagrams
        .chunks(columns)
        .map(join_row)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_row(row: &[String]) -> String {
    let blocks: Vec<Vec<&str>> = row.iter().map(|d| d.lines().collect()).collect();
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();
    let height = blocks.iter().map(|b| b.len()).max().unwrap_or(0);

    (0..height)
        .map(|i| {
            let cells: Vec<String> = blocks
                .iter()
                .zip(&widths)
                .map(|(block, &width)| {
                    let line = block.get(i).copied().unwrap_or("");
                    format!("{:<width$}", line, width = width)
                })
                .collect();
            cells.join(COLUMN_GAP).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

use crate::model::Table;
use crate::units::round_pt;

use super::spans::MergeSpans;

/// Measured content height of every drawn cell, without padding. Placeholder
/// slots stay `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasuredHeights {
    cells: Vec<Vec<Option<f32>>>,
}

impl MeasuredHeights {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![vec![None; columns]; rows],
        }
    }

    pub fn set(&mut self, row: usize, column: usize, height: f32) {
        self.cells[row][column] = Some(height);
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.cells
            .get(row)
            .and_then(|cols| cols.get(column))
            .copied()
            .flatten()
    }
}

/// Height of every row.
///
/// Each row starts at the tallest of its explicit height and its unmerged
/// cells. A merge span whose top cell needs more than its rows provide adds
/// the shortfall to its last row, so only the boundary below the span moves.
pub fn compute_row_heights(
    table: &Table,
    spans: &MergeSpans,
    measured: &MeasuredHeights,
) -> Vec<f32> {
    let pad = table.padding.top + table.padding.bottom;
    let ncols = table.columns.len();

    let mut heights: Vec<f32> = table
        .rows
        .iter()
        .enumerate()
        .map(|(ri, row)| {
            let floor = row.height.unwrap_or(0.0);
            let content = (0..ncols)
                .filter(|&ci| spans.span_at(ri, ci).is_none())
                .filter_map(|ci| measured.get(ri, ci))
                .map(|h| h + pad)
                .fold(0.0f32, f32::max);
            round_pt(floor.max(content))
        })
        .collect();

    for span in spans.iter() {
        let Some(content) = measured.get(span.start_row, span.column) else {
            continue;
        };
        let required = round_pt(content + pad);
        let available: f32 = heights[span.start_row..=span.last_row()].iter().sum();
        if required > available {
            let last = span.last_row();
            heights[last] = round_pt(heights[last] + (required - available));
            log::debug!(
                "TABLE merge col={} rows={}..={} required={:.2} available={:.2} -> row {} h={:.2}",
                span.column,
                span.start_row,
                last,
                required,
                available,
                last,
                heights[last]
            );
        }
    }

    heights
}

use crate::error::{LayoutError, MergeProblem};
use crate::model::Table;

/// A vertical merge: the cell at (`start_row`, `column`) covers `row_count` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeSpan {
    pub column: usize,
    pub start_row: usize,
    pub row_count: usize,
}

impl MergeSpan {
    pub fn last_row(&self) -> usize {
        self.start_row + self.row_count - 1
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start_row && row <= self.last_row()
    }
}

/// Side table of merge spans derived from the cells' `merge_down` values.
/// Cells are never mutated; a placeholder is any cell covered by a span it
/// does not start.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeSpans {
    spans: Vec<MergeSpan>,
    // [row][column] -> index into `spans`
    cover: Vec<Vec<Option<usize>>>,
}

impl MergeSpans {
    pub fn from_table(table: &Table) -> Result<Self, LayoutError> {
        let row_count = table.rows.len();
        let ncols = table.columns.len();
        let mut spans = Vec::new();
        let mut cover = vec![vec![None; ncols]; row_count];

        for (ri, row) in table.rows.iter().enumerate() {
            for (ci, cell) in row.cells.iter().enumerate().take(ncols) {
                if cell.merge_down == 0 {
                    continue;
                }
                let invalid = |problem| LayoutError::InvalidMergeConfiguration {
                    row: ri,
                    column: ci,
                    merge_down: cell.merge_down,
                    problem,
                };
                if let Some(other) = cover[ri][ci] {
                    let other: &MergeSpan = &spans[other];
                    return Err(invalid(MergeProblem::Overlaps {
                        other_row: other.start_row,
                    }));
                }
                if ri + cell.merge_down >= row_count {
                    return Err(invalid(MergeProblem::RunsPastTable { row_count }));
                }

                let span = MergeSpan {
                    column: ci,
                    start_row: ri,
                    row_count: cell.merge_down + 1,
                };
                let idx = spans.len();
                for slot in cover.iter_mut().skip(ri).take(span.row_count) {
                    slot[ci] = Some(idx);
                }
                spans.push(span);
            }
        }

        Ok(Self { spans, cover })
    }

    /// All spans, ordered by start row then column.
    pub fn iter(&self) -> impl Iterator<Item = &MergeSpan> {
        self.spans.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The span covering (`row`, `column`), whether it starts there or not.
    pub fn span_at(&self, row: usize, column: usize) -> Option<MergeSpan> {
        self.cover
            .get(row)
            .and_then(|cols| cols.get(column))
            .copied()
            .flatten()
            .map(|idx| self.spans[idx])
    }

    pub fn is_placeholder(&self, row: usize, column: usize) -> bool {
        self.span_at(row, column).is_some_and(|s| s.start_row != row)
    }

    /// Row of the cell that draws (`row`, `column`).
    pub fn anchor(&self, row: usize, column: usize) -> usize {
        self.span_at(row, column).map_or(row, |s| s.start_row)
    }

    /// Spans starting at `row`, in column order.
    pub fn starting_in_row(&self, row: usize) -> impl Iterator<Item = &MergeSpan> {
        self.spans.iter().filter(move |s| s.start_row == row)
    }

    /// Spans open across the boundary just above `row`.
    pub fn open_at(&self, row: usize) -> Vec<MergeSpan> {
        self.spans
            .iter()
            .filter(|s| s.start_row < row && s.last_row() >= row)
            .copied()
            .collect()
    }
}

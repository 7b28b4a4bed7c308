//! Turning one page's rows into paint operations.
//!
//! Drawing order on a page is: cell shading, cell text, horizontal
//! boundaries top to bottom, vertical boundaries left to right. Each boundary
//! segment is stroked once; neighbouring segments with the same style are
//! joined into one stroke.
//!
//! A merged cell split over pages places as many of its lines as fit in each
//! page's part of the cell and carries the rest to the next part.

use std::collections::HashMap;

use crate::model::{Alignment, CellVAlign};
use crate::ops::{DrawOp, Rect, StrokeStyle};
use crate::text::{FlowedBlock, FlowedLine};
use crate::units::round_pt;

use super::PreparedTable;
use super::paginate::{LayoutWarning, PageRows};
use super::spans::MergeSpan;

/// A cell as drawn on one page: a single row, or the rows of a merge span
/// that landed on this page.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CellBlock {
    column: usize,
    // positions in the page's drawn row list
    first: usize,
    last: usize,
    anchor: usize,
    /// Set when only part of the span's rows are on this page.
    split: Option<SplitPart>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SplitPart {
    span: MergeSpan,
    /// This part holds the span's last row.
    last: bool,
}

pub(crate) struct DrawnPage {
    pub(crate) ops: Vec<DrawOp>,
    /// y of the table's bottom edge on this page.
    pub(crate) bottom: f32,
}

/// Lines of split merged cells placed so far, carried from page to page.
pub(crate) struct SplitText {
    epsilon: f32,
    // (start row, column) -> lines already placed
    placed: HashMap<(usize, usize), usize>,
    warnings: Vec<LayoutWarning>,
}

impl SplitText {
    pub(crate) fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            placed: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<LayoutWarning> {
        self.warnings
    }
}

pub(crate) fn draw_page(
    table: &PreparedTable<'_>,
    page: &PageRows,
    left: f32,
    split_text: &mut SplitText,
) -> DrawnPage {
    let rows: Vec<usize> = page.drawn_rows().collect();
    let tops = row_tops(&table.heights, &rows, page.top);
    let col_x = column_edges(table, left);

    let blocks = cell_blocks(table, &rows);
    let mut ops = Vec::new();

    for block in &blocks {
        draw_shading(table, block, &tops, &col_x, &mut ops);
    }
    for block in &blocks {
        draw_text(table, block, &tops, &col_x, split_text, &mut ops);
    }
    draw_horizontal_boundaries(table, &rows, &tops, &col_x, &mut ops);
    draw_vertical_boundaries(table, &rows, &tops, &col_x, &mut ops);

    DrawnPage {
        ops,
        bottom: tops[rows.len()],
    }
}

/// y of every row top on the page plus the bottom of the last row.
fn row_tops(heights: &[f32], rows: &[usize], top: f32) -> Vec<f32> {
    let mut tops = Vec::with_capacity(rows.len() + 1);
    let mut y = top;
    tops.push(round_pt(y));
    for &r in rows {
        y -= heights[r];
        tops.push(round_pt(y));
    }
    tops
}

fn column_edges(table: &PreparedTable<'_>, left: f32) -> Vec<f32> {
    let mut xs = Vec::with_capacity(table.table.columns.len() + 1);
    let mut x = left;
    xs.push(round_pt(x));
    for col in &table.table.columns {
        x += col.width;
        xs.push(round_pt(x));
    }
    xs
}

fn cell_blocks(table: &PreparedTable<'_>, rows: &[usize]) -> Vec<CellBlock> {
    let ncols = table.table.columns.len();
    let mut blocks = Vec::new();
    for (p, &r) in rows.iter().enumerate() {
        for c in 0..ncols {
            let Some(span) = table.spans.span_at(r, c) else {
                blocks.push(CellBlock {
                    column: c,
                    first: p,
                    last: p,
                    anchor: r,
                    split: None,
                });
                continue;
            };
            let drawn_above = p > 0 && rows[p - 1] + 1 == r && span.contains(rows[p - 1]);
            if drawn_above {
                continue;
            }
            let mut q = p;
            while q + 1 < rows.len() && rows[q + 1] == rows[q] + 1 && span.contains(rows[q + 1]) {
                q += 1;
            }
            let whole = r == span.start_row && rows[q] == span.last_row();
            blocks.push(CellBlock {
                column: c,
                first: p,
                last: q,
                anchor: span.start_row,
                split: (!whole).then_some(SplitPart {
                    span,
                    last: rows[q] == span.last_row(),
                }),
            });
        }
    }
    blocks
}

fn block_rect(block: &CellBlock, tops: &[f32], col_x: &[f32]) -> Rect {
    let bottom = tops[block.last + 1];
    Rect {
        x: col_x[block.column],
        y: bottom,
        width: col_x[block.column + 1] - col_x[block.column],
        height: tops[block.first] - bottom,
    }
}

fn draw_shading(
    table: &PreparedTable<'_>,
    block: &CellBlock,
    tops: &[f32],
    col_x: &[f32],
    ops: &mut Vec<DrawOp>,
) {
    let row = &table.table.rows[block.anchor];
    let shading = row.cells[block.column]
        .shading
        .or(row.shading)
        .or(table.table.shading);
    if let Some(color) = shading {
        ops.push(DrawOp::Fill {
            rect: block_rect(block, tops, col_x),
            color,
        });
    }
}

fn draw_text(
    table: &PreparedTable<'_>,
    block: &CellBlock,
    tops: &[f32],
    col_x: &[f32],
    split_text: &mut SplitText,
    ops: &mut Vec<DrawOp>,
) {
    let Some(flowed) = table.flowed(block.anchor, block.column) else {
        return;
    };
    if flowed.lines.is_empty() {
        return;
    }
    let pad = &table.table.padding;
    let rect = block_rect(block, tops, col_x);
    let avail = rect.height - pad.top - pad.bottom;
    let text_top = tops[block.first] - pad.top;

    let Some(part) = block.split else {
        let offset = match table.table.rows[block.anchor].cells[block.column].v_align {
            CellVAlign::Top => 0.0,
            CellVAlign::Center => ((avail - flowed.height) / 2.0).max(0.0),
            CellVAlign::Bottom => (avail - flowed.height).max(0.0),
        };
        for line in &flowed.lines {
            push_line(line, &rect, text_top - offset - line.baseline_offset(), table, ops);
        }
        return;
    };

    // Split merges are top aligned: each part continues where the last one stopped.
    let key = (part.span.start_row, block.column);
    let start = split_text.placed.get(&key).copied().unwrap_or(0);
    let remaining = &flowed.lines[start..];
    let origin = remaining.first().map_or(0.0, |l| l.offset);
    let fitting = remaining
        .iter()
        .take_while(|l| l.offset - origin + l.height <= avail + split_text.epsilon)
        .count();
    for line in &remaining[..fitting] {
        let baseline = text_top - (line.baseline_offset() - origin);
        push_line(line, &rect, baseline, table, ops);
    }
    split_text.placed.insert(key, start + fitting);

    let unplaced = remaining.len() - fitting;
    if part.last && unplaced > 0 {
        split_text
            .warnings
            .push(overflow_warning(table, part.span, flowed, unplaced));
    }
}

fn push_line(
    line: &FlowedLine,
    rect: &Rect,
    baseline: f32,
    table: &PreparedTable<'_>,
    ops: &mut Vec<DrawOp>,
) {
    if line.text.is_empty() {
        return;
    }
    let pad = &table.table.padding;
    let text_x = rect.x + pad.left;
    let text_w = (rect.width - pad.left - pad.right).max(0.0);
    let x = match line.alignment {
        Alignment::Left => text_x,
        Alignment::Center => text_x + (text_w - line.width) / 2.0,
        Alignment::Right => text_x + text_w - line.width,
    };
    ops.push(DrawOp::Text {
        x: round_pt(x),
        y: round_pt(baseline),
        text: line.text.clone(),
        font: line.font,
        size: line.font_size,
        color: line.color,
    });
}

fn overflow_warning(
    table: &PreparedTable<'_>,
    span: MergeSpan,
    flowed: &FlowedBlock,
    unplaced: usize,
) -> LayoutWarning {
    let pad = &table.table.padding;
    LayoutWarning::MergedTextOverflow {
        first_row: span.start_row,
        last_row: span.last_row(),
        column: span.column,
        unplaced_lines: unplaced,
        height: flowed.height + pad.top + pad.bottom,
        available: table.heights[span.start_row..=span.last_row()].iter().sum(),
    }
}

/// Stroke style of the boundary above drawn position `p` in `column`.
fn horizontal_style(
    table: &PreparedTable<'_>,
    rows: &[usize],
    p: usize,
    column: usize,
) -> Option<StrokeStyle> {
    let spans = &table.spans;
    let borders = &table.borders;
    let upper = p.checked_sub(1).map(|i| rows[i]);
    let lower = rows.get(p).copied();

    let style = match (upper, lower) {
        (Some(u), Some(l)) if l == u + 1 => borders.between(Some(u), Some(l), column),
        // A repeated heading above the first row of the page: a merge continued
        // from the previous page contributes no top edge.
        (Some(u), Some(l)) if spans.is_placeholder(l, column) => {
            borders.between(Some(u), None, column)
        }
        (Some(u), Some(l)) => borders.between(Some(u), Some(l), column),
        (None, Some(l)) if spans.is_placeholder(l, column) => None,
        // A table continued on a new page keeps the style of the boundary it was split at.
        (None, Some(l)) if l > 0 => borders.between(Some(l - 1), Some(l), column),
        (None, Some(l)) => borders.between(None, Some(l), column),
        (Some(u), None) if spans.span_at(u, column).is_some_and(|s| s.last_row() > u) => None,
        (Some(u), None) => borders.between(Some(u), None, column),
        (None, None) => None,
    };
    style.and_then(|s| s.stroke())
}

fn draw_horizontal_boundaries(
    table: &PreparedTable<'_>,
    rows: &[usize],
    tops: &[f32],
    col_x: &[f32],
    ops: &mut Vec<DrawOp>,
) {
    let ncols = table.table.columns.len();
    for (p, &y) in tops.iter().enumerate() {
        let styles: Vec<Option<StrokeStyle>> = (0..ncols)
            .map(|c| horizontal_style(table, rows, p, c))
            .collect();
        for (first, last, style) in runs(&styles) {
            ops.push(DrawOp::Stroke {
                from: (col_x[first], y),
                to: (col_x[last + 1], y),
                style,
            });
        }
    }
}

fn draw_vertical_boundaries(
    table: &PreparedTable<'_>,
    rows: &[usize],
    tops: &[f32],
    col_x: &[f32],
    ops: &mut Vec<DrawOp>,
) {
    for (k, &x) in col_x.iter().enumerate() {
        let styles: Vec<Option<StrokeStyle>> = rows
            .iter()
            .map(|&r| table.borders.vertical(r, k).stroke())
            .collect();
        for (first, last, style) in runs(&styles) {
            ops.push(DrawOp::Stroke {
                from: (x, tops[first]),
                to: (x, tops[last + 1]),
                style,
            });
        }
    }
}

/// Maximal runs of equal drawn styles as (first, last, style).
fn runs(styles: &[Option<StrokeStyle>]) -> Vec<(usize, usize, StrokeStyle)> {
    let mut out: Vec<(usize, usize, StrokeStyle)> = Vec::new();
    for (i, style) in styles.iter().enumerate() {
        let Some(style) = *style else {
            continue;
        };
        match out.last_mut() {
            Some((_, last, prev)) if *last + 1 == i && *prev == style => *last = i,
            _ => out.push((i, i, style)),
        }
    }
    out
}

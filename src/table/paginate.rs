//! Splitting a table's rows over pages.
//!
//! Rows are placed in order against a vertical cursor. A row is placed
//! together with the rows it is connected to (its keep-with rows, the rows a
//! merge starting in it spans, and for heading rows the row after it); when
//! that group does not fit on the current page but fits on a fresh one, the
//! page breaks before the group. Groups too tall for any page fall back to
//! row-by-row placement, and rows too tall for any page are placed anyway and
//! reported.

use crate::config::{LayoutOptions, OverflowPolicy};
use crate::error::LayoutError;
use crate::model::{PageGeometry, Table};

use super::spans::{MergeSpan, MergeSpans};

/// Vertical space available to a table, in PDF coordinates (y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageFrame {
    /// Where the table starts on its first page.
    pub start: f32,
    pub content_top: f32,
    pub content_bottom: f32,
}

impl PageFrame {
    /// A table starting at the top of an empty page.
    pub fn fresh(page: &PageGeometry) -> Self {
        Self {
            start: page.content_top(),
            content_top: page.content_top(),
            content_bottom: page.content_bottom(),
        }
    }

    pub fn content_height(&self) -> f32 {
        self.content_top - self.content_bottom
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutWarning {
    /// A row taller than a page was placed overflowing the page bottom.
    OversizedRow {
        row: usize,
        page: usize,
        height: f32,
        available: f32,
    },
    /// Rows that should stay together do not fit on one page and were split.
    GroupSplit {
        first_row: usize,
        last_row: usize,
        height: f32,
        available: f32,
    },
    /// A merged cell split over pages ran out of room for its last lines,
    /// which were not drawn.
    MergedTextOverflow {
        first_row: usize,
        last_row: usize,
        column: usize,
        unplaced_lines: usize,
        height: f32,
        available: f32,
    },
}

impl LayoutWarning {
    pub fn to_error(&self) -> LayoutError {
        match *self {
            LayoutWarning::OversizedRow {
                row,
                height,
                available,
                ..
            } => LayoutError::OversizedRow {
                first_row: row,
                last_row: row,
                height,
                available,
            },
            LayoutWarning::GroupSplit {
                first_row,
                last_row,
                height,
                available,
            }
            | LayoutWarning::MergedTextOverflow {
                first_row,
                last_row,
                height,
                available,
                ..
            } => LayoutError::OversizedRow {
                first_row,
                last_row,
                height,
                available,
            },
        }
    }
}

/// Rows assigned to one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRows {
    /// Heading rows repeated at the top of this page, in table order.
    pub headings: Vec<usize>,
    /// Rows whose primary emission is on this page.
    pub rows: Vec<usize>,
    /// Merge spans continued from the previous page.
    pub continued_merges: Vec<MergeSpan>,
    /// y of the table's top edge on this page.
    pub top: f32,
}

impl PageRows {
    /// Headings followed by primary rows, in drawing order.
    pub fn drawn_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.headings.iter().chain(self.rows.iter()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.rows.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PagePlan {
    pub pages: Vec<PageRows>,
    pub warnings: Vec<LayoutWarning>,
}

struct Paginator<'a> {
    table: &'a Table,
    heights: &'a [f32],
    spans: &'a MergeSpans,
    frame: PageFrame,
    options: &'a LayoutOptions,

    pages: Vec<PageRows>,
    current: PageRows,
    cursor: f32,
    headings_seen: Vec<usize>,
    warnings: Vec<LayoutWarning>,
    split_reported_until: Option<usize>,
}

impl<'a> Paginator<'a> {
    fn new(
        table: &'a Table,
        heights: &'a [f32],
        spans: &'a MergeSpans,
        frame: PageFrame,
        options: &'a LayoutOptions,
    ) -> Self {
        Self {
            table,
            heights,
            spans,
            frame,
            options,
            pages: Vec::new(),
            current: PageRows {
                top: frame.start,
                ..Default::default()
            },
            cursor: frame.start,
            headings_seen: Vec::new(),
            warnings: Vec::new(),
            split_reported_until: None,
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor - height >= self.frame.content_bottom - self.options.epsilon
    }

    /// Whether breaking before the next row would gain any room.
    fn can_break(&self) -> bool {
        if !self.current.rows.is_empty() {
            return true;
        }
        // Other content above the table on its first page.
        self.pages.is_empty() && self.frame.start < self.frame.content_top - self.options.epsilon
    }

    fn span_height(&self, first: usize, last: usize) -> f32 {
        self.heights[first..=last].iter().sum()
    }

    fn headings_before(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.headings_seen.iter().copied().filter(move |&h| h < row)
    }

    /// Room on a page that starts with `row`, after repeated headings.
    fn fresh_capacity(&self, row: usize) -> f32 {
        let headings: f32 = self.headings_before(row).map(|h| self.heights[h]).sum();
        self.frame.content_height() - headings
    }

    /// Last row connected to `row`, closed over keep-with, merge spans and
    /// heading rows.
    fn connected_end(&self, row: usize) -> usize {
        let last = self.table.rows.len() - 1;
        let mut end = row;
        let mut r = row;
        while r <= end {
            let table_row = &self.table.rows[r];
            end = end.max((r + table_row.keep_with).min(last));
            for span in self.spans.starting_in_row(r) {
                end = end.max(span.last_row());
            }
            if table_row.heading_format && r < last {
                end = end.max(r + 1);
            }
            r += 1;
        }
        end
    }

    fn break_page(&mut self, before: usize) {
        let headings: Vec<usize> = self.headings_before(before).collect();
        let open = self.spans.open_at(before);
        log::debug!(
            "TABLE page break before row={} y={:.2} headings={:?} open_merges={}",
            before,
            self.cursor,
            headings,
            open.len()
        );

        let next = PageRows {
            headings,
            rows: Vec::new(),
            continued_merges: open,
            top: self.frame.content_top,
        };
        self.pages.push(std::mem::replace(&mut self.current, next));
        self.cursor = self.frame.content_top
            - self
                .current
                .headings
                .iter()
                .map(|&h| self.heights[h])
                .sum::<f32>();
    }

    fn place(&mut self, row: usize) {
        let h = self.heights[row];
        log::debug!(
            "TABLE row={} h={:.2} y={:.2} page={}",
            row,
            h,
            self.cursor,
            self.pages.len()
        );
        self.current.rows.push(row);
        self.cursor -= h;
        if self.table.rows[row].heading_format {
            self.headings_seen.push(row);
        }
    }

    fn place_single(&mut self, row: usize) -> Result<(), LayoutError> {
        let h = self.heights[row];
        if !self.fits(h) && self.can_break() {
            self.break_page(row);
        }
        if !self.fits(h) {
            let warning = LayoutWarning::OversizedRow {
                row,
                page: self.pages.len(),
                height: h,
                available: self.cursor - self.frame.content_bottom,
            };
            self.report(warning)?;
        }
        self.place(row);
        Ok(())
    }

    fn report(&mut self, warning: LayoutWarning) -> Result<(), LayoutError> {
        report(self.options, warning, &mut self.warnings)
    }

    fn run(mut self) -> Result<PagePlan, LayoutError> {
        let n = self.table.rows.len();
        let mut row = 0;
        while row < n {
            let end = self.connected_end(row);
            if end == row {
                self.place_single(row)?;
                row += 1;
                continue;
            }

            let group_h = self.span_height(row, end);
            if !self.fits(group_h)
                && self.can_break()
                && group_h <= self.fresh_capacity(row) + self.options.epsilon
            {
                self.break_page(row);
            }

            if self.fits(group_h) {
                for r in row..=end {
                    self.place(r);
                }
                row = end + 1;
            } else {
                if self.split_reported_until.is_none_or(|until| end > until) {
                    let warning = LayoutWarning::GroupSplit {
                        first_row: row,
                        last_row: end,
                        height: group_h,
                        available: self.fresh_capacity(row),
                    };
                    self.report(warning)?;
                    self.split_reported_until = Some(end);
                }
                self.place_single(row)?;
                row += 1;
            }
        }

        self.pages.push(self.current);
        Ok(PagePlan {
            pages: self.pages,
            warnings: self.warnings,
        })
    }
}

/// Record `warning`, or fail with it under [`OverflowPolicy::Reject`].
pub(crate) fn report(
    options: &LayoutOptions,
    warning: LayoutWarning,
    warnings: &mut Vec<LayoutWarning>,
) -> Result<(), LayoutError> {
    if options.overflow == OverflowPolicy::Reject {
        return Err(warning.to_error());
    }
    log::warn!("table overflow: {}", warning.to_error());
    warnings.push(warning);
    Ok(())
}

/// Assign every row of `table` to a page.
pub fn plan_pages(
    table: &Table,
    heights: &[f32],
    spans: &MergeSpans,
    frame: PageFrame,
    options: &LayoutOptions,
) -> Result<PagePlan, LayoutError> {
    Paginator::new(table, heights, spans, frame, options).run()
}

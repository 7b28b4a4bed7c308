//! Table layout: border resolution, row heights, pagination and drawing.

pub mod borders;
mod geometry;
pub mod heights;
pub mod paginate;
pub mod spans;

use crate::config::LayoutOptions;
use crate::error::LayoutError;
use crate::model::{PageGeometry, ResolvedFormat, Table};
use crate::ops::{PageOp, optimize};
use crate::text::{FlowedBlock, StandardTextFlow, TextFlow};

use borders::ResolvedBorders;
use heights::{MeasuredHeights, compute_row_heights};
use paginate::{LayoutWarning, PageFrame, PagePlan, plan_pages, report};
use spans::{MergeSpan, MergeSpans};

use geometry::{DrawnPage, SplitText, draw_page};

static STANDARD_FLOW: StandardTextFlow = StandardTextFlow {
    line_height_ratio: 1.2,
};

/// Everything a table layout depends on besides the table itself.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub page: PageGeometry,
    pub options: LayoutOptions,
    /// Text format the table's own format is applied on top of.
    pub base_format: ResolvedFormat,
    pub flow: &'a dyn TextFlow,
}

impl Default for LayoutContext<'static> {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            options: LayoutOptions::default(),
            base_format: ResolvedFormat::default(),
            flow: &STANDARD_FLOW,
        }
    }
}

impl<'a> LayoutContext<'a> {
    pub fn with_flow(flow: &'a dyn TextFlow) -> Self {
        Self {
            flow,
            ..LayoutContext::default()
        }
    }
}

/// One page of a laid out table.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryPage {
    /// Heading rows repeated at the top of this page.
    pub heading_rows: Vec<usize>,
    /// Rows first drawn on this page.
    pub rows: Vec<usize>,
    /// Merge spans whose top cell is on an earlier page.
    pub continued_merges: Vec<MergeSpan>,
    pub top: f32,
    pub bottom: f32,
    pub ops: Vec<PageOp>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PagedGeometry {
    pub pages: Vec<GeometryPage>,
    pub row_heights: Vec<f32>,
    pub warnings: Vec<LayoutWarning>,
}

impl PagedGeometry {
    /// Sum of all row heights, without repeated headings.
    pub fn table_height(&self) -> f32 {
        self.row_heights.iter().sum()
    }
}

/// A table with its derived geometry: merge spans, resolved borders, row
/// heights and the flowed text of every drawn cell. The table is only read.
pub struct PreparedTable<'t> {
    pub table: &'t Table,
    pub spans: MergeSpans,
    pub borders: ResolvedBorders,
    pub heights: Vec<f32>,
    flowed: Vec<Vec<Option<FlowedBlock>>>,
}

impl<'t> PreparedTable<'t> {
    pub fn prepare(
        table: &'t Table,
        flow: &dyn TextFlow,
        base: ResolvedFormat,
    ) -> Result<Self, LayoutError> {
        validate(table)?;
        let spans = MergeSpans::from_table(table)?;
        let borders = ResolvedBorders::resolve(table, &spans);

        let ncols = table.columns.len();
        let pad = &table.padding;
        let table_format = base.overlay(&table.format);
        let mut measured = MeasuredHeights::new(table.rows.len(), ncols);
        let mut flowed = Vec::with_capacity(table.rows.len());

        for (ri, row) in table.rows.iter().enumerate() {
            let row_format = table_format.overlay(&row.format);
            let mut row_flowed = Vec::with_capacity(ncols);
            for (ci, cell) in row.cells.iter().enumerate() {
                if spans.is_placeholder(ri, ci) {
                    if cell.has_content() {
                        log::debug!(
                            "TABLE cell ({ri}, {ci}) is covered by a merge; its content is ignored"
                        );
                    }
                    row_flowed.push(None);
                    continue;
                }
                let width = table.columns[ci].width - pad.left - pad.right;
                let block = flow
                    .flow(&cell.paragraphs, row_format.overlay(&cell.format), width)
                    .map_err(|source| LayoutError::UnmeasurableContent {
                        row: ri,
                        column: ci,
                        source,
                    })?;
                measured.set(ri, ci, block.height);
                row_flowed.push(Some(block));
            }
            flowed.push(row_flowed);
        }

        let heights = compute_row_heights(table, &spans, &measured);
        log::debug!(
            "TABLE rows={} cols={} merges={} height={:.2}",
            table.rows.len(),
            ncols,
            spans.iter().count(),
            heights.iter().sum::<f32>()
        );

        Ok(Self {
            table,
            spans,
            borders,
            heights,
            flowed,
        })
    }

    pub(crate) fn flowed(&self, row: usize, column: usize) -> Option<&FlowedBlock> {
        self.flowed.get(row)?.get(column)?.as_ref()
    }

    pub fn plan(&self, frame: PageFrame, options: &LayoutOptions) -> Result<PagePlan, LayoutError> {
        plan_pages(self.table, &self.heights, &self.spans, frame, options)
    }

    /// Draw every page of `plan`. Merged text that no page could hold is
    /// reported like any other overflow.
    pub(crate) fn draw(
        &self,
        plan: &PagePlan,
        left: f32,
        options: &LayoutOptions,
    ) -> Result<(Vec<DrawnPage>, Vec<LayoutWarning>), LayoutError> {
        let mut split_text = SplitText::new(options.epsilon);
        let drawn = plan
            .pages
            .iter()
            .map(|page| draw_page(self, page, left, &mut split_text))
            .collect();

        let mut warnings = plan.warnings.clone();
        for warning in split_text.into_warnings() {
            report(options, warning, &mut warnings)?;
        }
        Ok((drawn, warnings))
    }
}

fn validate(table: &Table) -> Result<(), LayoutError> {
    if table.columns.is_empty() {
        return Err(LayoutError::NoColumns);
    }
    let columns = table.columns.len();
    for (row, r) in table.rows.iter().enumerate() {
        if r.cells.len() != columns {
            return Err(LayoutError::RowCellCount {
                row,
                cells: r.cells.len(),
                columns,
            });
        }
    }
    Ok(())
}

/// Lay out `table` on A4 pages with the standard text flow.
pub fn layout_table(table: &Table) -> Result<PagedGeometry, LayoutError> {
    layout_table_with(table, &LayoutContext::default())
}

/// Lay out `table` starting at the top of a fresh page.
pub fn layout_table_with(
    table: &Table,
    ctx: &LayoutContext<'_>,
) -> Result<PagedGeometry, LayoutError> {
    let prepared = PreparedTable::prepare(table, ctx.flow, ctx.base_format)?;
    let plan = prepared.plan(PageFrame::fresh(&ctx.page), &ctx.options)?;
    let left = ctx.page.margin_left + table.indent;
    let (drawn, warnings) = prepared.draw(&plan, left, &ctx.options)?;

    let pages = plan
        .pages
        .iter()
        .zip(drawn)
        .map(|(page, drawn)| GeometryPage {
            heading_rows: page.headings.clone(),
            rows: page.rows.clone(),
            continued_merges: page.continued_merges.clone(),
            top: page.top,
            bottom: drawn.bottom,
            ops: optimize(&drawn.ops),
        })
        .collect();

    Ok(PagedGeometry {
        pages,
        row_heights: prepared.heights,
        warnings,
    })
}

mod config;
mod error;
mod fonts;
mod model;
mod ops;
mod pdf;
mod table;
mod text;
pub mod units;

pub use config::{LayoutOptions, OverflowPolicy, RenderOptions};
pub use error::{Error, LayoutError, MeasureError, MergeProblem};
pub use fonts::StandardFont;
pub use model::{
    Alignment, Block, Border, Borders, Cell, CellPadding, CellVAlign, Color, Column, Document,
    Edge, PageGeometry, Paragraph, ResolvedFormat, Row, Section, Table, TextFormat,
};
pub use ops::{DrawOp, PageOp, Rect, StreamState, StrokeStyle, optimize, optimize_from};
pub use pdf::RenderedDocument;
pub use table::borders::{
    BorderLevel, CellEdges, EdgeStyle, ResolvedBorders, resolve_borders, resolve_edge,
};
pub use table::heights::{MeasuredHeights, compute_row_heights};
pub use table::paginate::{LayoutWarning, PageFrame, PagePlan, PageRows, plan_pages};
pub use table::spans::{MergeSpan, MergeSpans};
pub use table::{
    GeometryPage, LayoutContext, PagedGeometry, PreparedTable, layout_table, layout_table_with,
};
pub use text::{FlowedBlock, FlowedLine, StandardTextFlow, TextFlow};

/// Lay out and write `doc` as PDF with the standard text flow.
pub fn render_document(doc: &Document, options: &RenderOptions) -> Result<RenderedDocument, Error> {
    render_document_with(doc, options, &StandardTextFlow::default())
}

pub fn render_document_with(
    doc: &Document,
    options: &RenderOptions,
    text_flow: &dyn TextFlow,
) -> Result<RenderedDocument, Error> {
    let t0 = std::time::Instant::now();
    let rendered = pdf::render(doc, options, text_flow)?;
    log::info!(
        "Timing: total={:.1}ms (output {} bytes, {} pages, {} warnings)",
        t0.elapsed().as_secs_f64() * 1000.0,
        rendered.bytes.len(),
        rendered.page_count,
        rendered.warnings.len(),
    );
    Ok(rendered)
}

mod flow;
mod writer;

use crate::config::RenderOptions;
use crate::error::Error;
use crate::model::Document;
use crate::ops::{PageOp, optimize};
use crate::table::paginate::LayoutWarning;
use crate::text::TextFlow;

use flow::DocumentFlow;

#[derive(Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<LayoutWarning>,
}

pub fn render(
    doc: &Document,
    options: &RenderOptions,
    text_flow: &dyn TextFlow,
) -> Result<RenderedDocument, Error> {
    let t0 = std::time::Instant::now();

    let mut flow = DocumentFlow::new(text_flow, doc.base_format(), &options.layout);
    for section in &doc.sections {
        flow.start_section(section.page)?;
        for block in &section.blocks {
            flow.add_block(block)?;
        }
    }
    let (pages, warnings) = flow.finish();
    let t_layout = t0.elapsed();

    // Each page is its own content stream, so drawing state starts over.
    let page_ops: Vec<_> = pages
        .into_iter()
        .map(|page| {
            let ops: Vec<PageOp> = optimize(&page.ops);
            (page.geometry, ops)
        })
        .collect();
    let t_optimize = t0.elapsed();

    let bytes = writer::assemble(&page_ops, options.compress_content_streams);
    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, optimize={:.1}ms, assembly={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_optimize - t_layout).as_secs_f64() * 1000.0,
        (t_assembly - t_optimize).as_secs_f64() * 1000.0,
        page_ops.len(),
        bytes.len(),
    );

    Ok(RenderedDocument {
        bytes,
        page_count: page_ops.len(),
        warnings,
    })
}

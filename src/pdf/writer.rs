use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::fonts::{StandardFont, to_winansi_bytes};
use crate::model::PageGeometry;
use crate::ops::PageOp;

/// Replay `ops` into a content stream verbatim, in order.
pub(super) fn write_ops(content: &mut Content, ops: &[PageOp]) {
    for op in ops {
        match op {
            PageOp::SetStrokeWidth(w) => {
                content.set_line_width(*w);
            }
            PageOp::SetStrokeColor(c) => {
                let [r, g, b] = c.to_unit();
                content.set_stroke_rgb(r, g, b);
            }
            PageOp::SetFillColor(c) => {
                let [r, g, b] = c.to_unit();
                content.set_fill_rgb(r, g, b);
            }
            PageOp::StrokeLine { x1, y1, x2, y2 } => {
                content.move_to(*x1, *y1);
                content.line_to(*x2, *y2);
                content.stroke();
            }
            PageOp::FillRect(rect) => {
                content.rect(rect.x, rect.y, rect.width, rect.height);
                content.fill_nonzero();
            }
            PageOp::PlaceText {
                x,
                y,
                text,
                font,
                size,
            } => {
                content.begin_text();
                content.set_font(Name(font.resource_name()), *size);
                content.next_line(*x, *y);
                content.show(Str(&to_winansi_bytes(text)));
                content.end_text();
            }
        }
    }
}

/// Assemble the document: catalog, page tree, standard fonts and one content
/// stream per page.
pub(super) fn assemble(pages: &[(PageGeometry, Vec<PageOp>)], compress: bool) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let font_refs: Vec<(StandardFont, Ref)> = StandardFont::ALL
        .iter()
        .map(|&font| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (font, font_ref)
        })
        .collect();

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, (_, ops)) in pages.iter().enumerate() {
        let mut content = Content::new();
        write_ops(&mut content, ops);
        let raw = content.finish();
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[i], raw.as_slice());
        }
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for (i, (geometry, _)) in pages.iter().enumerate() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (font, font_ref) in &font_refs {
            fonts.pair(Name(font.resource_name()), *font_ref);
        }
    }

    pdf.finish()
}

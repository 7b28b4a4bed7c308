mod common;

use docflow_pdf::{
    Block, Document, Error, LayoutError, LayoutWarning, OverflowPolicy, PageGeometry, RenderOptions,
    render_document, render_document_with, units::{cm, mm},
};

fn uncompressed() -> RenderOptions {
    RenderOptions {
        compress_content_streams: false,
        ..Default::default()
    }
}

fn document_with(blocks: Vec<Block>) -> Document {
    let mut doc = Document::new();
    doc.add_section().blocks = blocks;
    doc
}

fn lines_ending(stream: &str, operator: &str) -> usize {
    let suffix = format!(" {operator}");
    stream.lines().filter(|l| l.ends_with(&suffix)).count()
}

#[test]
fn repeated_heading_table_renders_two_pages() {
    common::init_logger();
    let doc = document_with(vec![Block::Table(common::repeated_heading_table())]);
    let rendered = render_document(&doc, &uncompressed()).expect("render");

    assert!(rendered.bytes.starts_with(b"%PDF-"));
    assert_eq!(rendered.page_count, 2);
    assert!(rendered.warnings.is_empty());

    let streams = common::content_streams(&rendered.bytes);
    assert_eq!(streams.len(), 2);
    for stream in &streams {
        // Heading bottom and the blue table bottom: one width change each.
        assert_eq!(lines_ending(stream, "w"), 2);
        assert_eq!(lines_ending(stream, "RG"), 2);
        assert!(stream.contains("(Heading) Tj"));
    }
}

#[test]
fn compressed_streams_decode_to_the_same_content() {
    let doc = document_with(vec![Block::Table(common::border_inheritance_table())]);
    let plain = render_document(&doc, &uncompressed()).unwrap();
    let packed = render_document(&doc, &RenderOptions::default()).unwrap();

    assert!(packed.bytes.len() < plain.bytes.len());
    let text = String::from_utf8_lossy(&packed.bytes);
    assert!(text.contains("/FlateDecode"));
    assert_eq!(common::content_streams(&packed.bytes), common::content_streams(&plain.bytes));
}

#[test]
fn paragraphs_and_tables_share_the_page() {
    let mut doc = Document::new();
    let section = doc.add_section();
    section.add_paragraph("Before the table");
    let table = section.add_table();
    table.add_column(mm(80.0));
    table.borders.set_width(0.5);
    for i in 0..3 {
        table.add_row()[0].add_paragraph(format!("Cell {i}"));
    }
    section.add_paragraph("After the table");

    let rendered = render_document(&doc, &uncompressed()).unwrap();
    assert_eq!(rendered.page_count, 1);
    let streams = common::content_streams(&rendered.bytes);
    let before = streams[0].find("(Before the table) Tj").unwrap();
    let cell = streams[0].find("(Cell 0) Tj").unwrap();
    let after = streams[0].find("(After the table) Tj").unwrap();
    assert!(before < cell && cell < after);
    assert_eq!(lines_ending(&streams[0], "w"), 1);
}

#[test]
fn each_section_starts_a_page() {
    let mut doc = Document::new();
    doc.add_section().add_paragraph("one");
    let second = doc.add_section();
    second.page = PageGeometry {
        width: 400.0,
        height: 300.0,
        ..Default::default()
    };
    second.add_paragraph("two");

    let rendered = render_document(&doc, &uncompressed()).unwrap();
    assert_eq!(rendered.page_count, 2);
    let text = String::from_utf8_lossy(&rendered.bytes);
    assert!(text.contains("/MediaBox [0 0 400 300]"));
}

#[test]
fn empty_document_has_one_blank_page() {
    let rendered = render_document(&Document::new(), &uncompressed()).unwrap();
    assert_eq!(rendered.page_count, 1);
}

#[test]
fn invalid_merge_fails_the_render() {
    let mut table = common::single_column_table(2);
    table.rows[1][0].merge_down = 1;
    let doc = document_with(vec![Block::Table(table)]);

    let err = render_document(&doc, &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Layout(LayoutError::InvalidMergeConfiguration { row: 1, .. })
    ));
}

#[test]
fn overflow_policy_decides_between_warning_and_error() {
    let mut table = common::single_column_table(2);
    table.rows[1].height = Some(cm(40.0));
    let doc = document_with(vec![Block::Table(table)]);

    let rendered = render_document(&doc, &RenderOptions::default()).unwrap();
    assert!(matches!(
        rendered.warnings.as_slice(),
        [LayoutWarning::OversizedRow { row: 1, .. }]
    ));

    let mut options = RenderOptions::default();
    options.layout.overflow = OverflowPolicy::Reject;
    let err = render_document(&doc, &options).unwrap_err();
    assert!(matches!(err, Error::Layout(LayoutError::OversizedRow { .. })));
}

#[test]
fn measurement_errors_surface_from_custom_flows() {
    let mut table = common::single_column_table(1);
    table.rows[0][0].add_paragraph("UNMEASURABLE");
    let doc = document_with(vec![Block::Table(table)]);

    let err =
        render_document_with(&doc, &RenderOptions::default(), &common::line_flow()).unwrap_err();
    assert!(matches!(
        err,
        Error::Layout(LayoutError::UnmeasurableContent { row: 0, column: 0, .. })
    ));
}

#[test]
fn page_without_content_area_is_rejected() {
    let mut doc = Document::new();
    doc.add_section().page = PageGeometry {
        width: 100.0,
        height: 100.0,
        margin_top: 60.0,
        margin_bottom: 60.0,
        margin_left: 10.0,
        margin_right: 10.0,
    };
    let err = render_document(&doc, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Pdf(_)));
}

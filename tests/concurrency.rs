mod common;

use docflow_pdf::{Block, Document, RenderOptions, layout_table, render_document};
use rayon::prelude::*;

#[test]
fn independent_tables_lay_out_in_parallel() {
    let tables = vec![
        common::repeated_heading_table(),
        common::border_inheritance_table(),
        common::merge_line_break_table(),
        common::single_column_table(80),
    ];

    let sequential: Vec<_> = tables.iter().map(|t| layout_table(t).unwrap()).collect();
    let parallel: Vec<_> = tables.par_iter().map(|t| layout_table(t).unwrap()).collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn documents_render_identically_across_threads() {
    let mut doc = Document::new();
    doc.add_section().blocks = vec![
        Block::Table(common::repeated_heading_table()),
        Block::Table(common::single_column_table(60)),
    ];
    let options = RenderOptions::default();

    let outputs: Vec<Vec<u8>> = (0..8)
        .into_par_iter()
        .map(|_| render_document(&doc, &options).unwrap().bytes)
        .collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}

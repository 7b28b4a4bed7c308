#![allow(dead_code)]

use docflow_pdf::{
    Border, Color, FlowedBlock, FlowedLine, MeasureError, PageGeometry, PageOp, Paragraph,
    ResolvedFormat, StandardFont, StrokeStyle, Table, TextFlow, units::cm,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Text flow with one fixed-height line per `\n`-separated piece and no
/// wrapping, so heights are exact multiples of `line_height`.
pub struct LineFlow {
    pub line_height: f32,
}

pub const LINE: f32 = 12.0;

pub fn line_flow() -> LineFlow {
    LineFlow { line_height: LINE }
}

impl TextFlow for LineFlow {
    fn flow(
        &self,
        paragraphs: &[Paragraph],
        base: ResolvedFormat,
        _width: f32,
    ) -> Result<FlowedBlock, MeasureError> {
        let mut block = FlowedBlock::default();
        let mut y = 0.0;
        for para in paragraphs {
            let format = base.overlay(&para.format);
            if para.text.contains("UNMEASURABLE") {
                return Err(MeasureError::Other("refused".into()));
            }
            for text in para.text.split('\n') {
                let font = StandardFont::for_weight(format.bold);
                block.lines.push(FlowedLine {
                    text: text.to_string(),
                    width: font.word_width(text, format.font_size),
                    font,
                    font_size: format.font_size,
                    color: format.color,
                    alignment: format.alignment,
                    offset: y,
                    height: self.line_height,
                });
                y += self.line_height;
            }
        }
        block.height = y;
        Ok(block)
    }
}

/// 300x120pt page with 10pt margins: content from y=110 down to y=10.
pub fn small_page() -> PageGeometry {
    PageGeometry {
        width: 300.0,
        height: 120.0,
        margin_top: 10.0,
        margin_bottom: 10.0,
        margin_left: 10.0,
        margin_right: 10.0,
    }
}

/// One column, `n` rows with one line of text each.
pub fn single_column_table(n: usize) -> Table {
    let mut table = Table::new();
    table.add_column(cm(16.0));
    for i in 0..n {
        let row = table.add_row();
        row[0].add_paragraph(format!("Row {i}"));
    }
    table
}

/// Heading row with a red 4.6pt bottom border, table bottom borders blue
/// 2.3pt, four 10cm data rows.
pub fn repeated_heading_table() -> Table {
    let mut table = Table::new();
    table.borders.bottom = Border::new(2.3, Color::BLUE);
    table.add_column(cm(16.0));

    let heading = table.add_row();
    heading.heading_format = true;
    heading[0].add_paragraph("Heading");
    heading.borders.bottom = Border::new(4.6, Color::RED);

    for nr in 1..=4 {
        let row = table.add_row();
        row[0].add_paragraph(format!("Row {nr}"));
        row.height = Some(cm(10.0));
    }
    table
}

/// Three 5cm columns, gray 1.5pt table borders, shaded heading row whose
/// first two cells override only their right border color.
pub fn border_inheritance_table() -> Table {
    let mut table = Table::new();
    table.borders.set_color(Color::GRAY);
    table.borders.set_width(1.5);
    for _ in 0..3 {
        table.add_column(cm(5.0));
    }

    let heading = table.add_row();
    heading.heading_format = true;
    heading.shading = Some(Color::GRAY);
    heading.format.color = Some(Color::WHITE);
    heading[0].add_paragraph("Heading 0");
    heading[0].borders.right.color = Some(Color::WHITE);
    heading[1].add_paragraph("Heading 1");
    heading[1].borders.right.color = Some(Color::WHITE);
    heading[2].add_paragraph("Heading 2");

    let data = table.add_row();
    for i in 0..3 {
        data[i].add_paragraph(format!("Item 1 Cell {i}"));
    }
    table
}

/// Two columns; rows 1-2 and 3-4 merge in the first column, the first merged
/// cell holding two lines.
pub fn merge_line_break_table() -> Table {
    let mut table = Table::new();
    table.borders.set_width(1.0);
    table.add_column(cm(10.0));
    table.add_column(cm(5.0));

    let row0 = table.add_row();
    row0[0].add_paragraph("Row 0 Cell 0");
    row0[1].add_paragraph("Row 0 Cell 1");

    let row1 = table.add_row();
    row1[0].add_paragraph("Row 1 Cell 0 MergeDown 1 with\nline break ID#1");
    row1[0].merge_down = 1;
    row1[1].add_paragraph("Row 1 Cell 1");
    let comment1 = table.add_row();
    comment1[1].add_paragraph("Comment 1 Cell 1 ID#2");

    let row2 = table.add_row();
    row2[0].add_paragraph("Row 2 Cell 0 MergeDown 1");
    row2[0].merge_down = 1;
    row2[1].add_paragraph("Row 2 Cell 1");
    let comment2 = table.add_row();
    comment2[1].add_paragraph("Comment 2 Cell 1");
    table
}

pub fn count<F: Fn(&PageOp) -> bool>(ops: &[PageOp], pred: F) -> usize {
    ops.iter().filter(|op| pred(op)).count()
}

pub fn width_sets(ops: &[PageOp]) -> Vec<f32> {
    ops.iter()
        .filter_map(|op| match op {
            PageOp::SetStrokeWidth(w) => Some(*w),
            _ => None,
        })
        .collect()
}

/// Every stroke with the style in effect when it was drawn.
pub fn styled_strokes(ops: &[PageOp]) -> Vec<((f32, f32, f32, f32), StrokeStyle)> {
    let mut width = None;
    let mut color = None;
    let mut out = Vec::new();
    for op in ops {
        match op {
            PageOp::SetStrokeWidth(w) => width = Some(*w),
            PageOp::SetStrokeColor(c) => color = Some(*c),
            PageOp::StrokeLine { x1, y1, x2, y2 } => out.push((
                (*x1, *y1, *x2, *y2),
                StrokeStyle {
                    width: width.expect("width set before stroke"),
                    color: color.expect("color set before stroke"),
                },
            )),
            _ => {}
        }
    }
    out
}

/// Horizontal strokes as (y, x1, x2).
pub fn horizontal_strokes(ops: &[PageOp]) -> Vec<(f32, f32, f32)> {
    styled_strokes(ops)
        .into_iter()
        .filter(|((_, y1, _, y2), _)| y1 == y2)
        .map(|((x1, y, x2, _), _)| (y, x1, x2))
        .collect()
}

pub fn texts(ops: &[PageOp]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            PageOp::PlaceText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Content streams of a PDF, in page order, decompressed when needed.
pub fn content_streams(pdf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(found) = find(&pdf[pos..], b"stream\n") {
        let start = pos + found;
        if start >= 3 && &pdf[start - 3..start] == b"end" {
            pos = start + 7;
            continue;
        }
        let data_start = start + 7;
        let Some(len) = find(&pdf[data_start..], b"\nendstream") else {
            break;
        };
        let data = &pdf[data_start..data_start + len];
        let text = match miniz_oxide::inflate::decompress_to_vec_zlib(data) {
            Ok(raw) => String::from_utf8_lossy(&raw).into_owned(),
            Err(_) => String::from_utf8_lossy(data).into_owned(),
        };
        out.push(text);
        pos = data_start + len + 10;
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

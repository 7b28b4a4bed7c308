use std::ops::{Index, IndexMut};

use crate::units::cm;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0..=1 for PDF color operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CellVAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// One edge as declared on a table, row or cell. Unset properties inherit
/// from the next level out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Border {
    pub width: Option<f32>,
    pub color: Option<Color>,
    pub visible: Option<bool>,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            width: Some(width),
            color: Some(color),
            visible: None,
        }
    }

    /// Explicitly cancels any inherited border on this edge.
    pub fn hidden() -> Self {
        Self {
            width: None,
            color: None,
            visible: Some(false),
        }
    }

    pub fn is_set(&self) -> bool {
        self.width.is_some() || self.color.is_some() || self.visible.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Borders {
    pub top: Border,
    pub bottom: Border,
    pub left: Border,
    pub right: Border,
}

impl Borders {
    pub fn all(width: f32, color: Color) -> Self {
        let b = Border::new(width, color);
        Self {
            top: b,
            bottom: b,
            left: b,
            right: b,
        }
    }

    /// Sets the width of all four edges, leaving colors alone.
    pub fn set_width(&mut self, width: f32) {
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            self.edge_mut(edge).width = Some(width);
        }
    }

    /// Sets the color of all four edges, leaving widths alone.
    pub fn set_color(&mut self, color: Color) {
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            self.edge_mut(edge).color = Some(color);
        }
    }

    pub fn edge(&self, edge: Edge) -> &Border {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
            Edge::Right => &self.right,
        }
    }

    pub fn edge_mut(&mut self, edge: Edge) -> &mut Border {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
        }
    }
}

/// Character and paragraph attributes. `None` means "inherit".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextFormat {
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub color: Option<Color>,
    pub alignment: Option<Alignment>,
    pub line_spacing: Option<f32>, // multiplier, 1.0 = single
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFormat {
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
    pub alignment: Alignment,
    pub line_spacing: f32,
}

impl Default for ResolvedFormat {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            bold: false,
            color: Color::BLACK,
            alignment: Alignment::Left,
            line_spacing: 1.0,
        }
    }
}

impl ResolvedFormat {
    /// Applies the set fields of `format` on top of `self`.
    pub fn overlay(self, format: &TextFormat) -> Self {
        Self {
            font_size: format.font_size.unwrap_or(self.font_size),
            bold: format.bold.unwrap_or(self.bold),
            color: format.color.unwrap_or(self.color),
            alignment: format.alignment.unwrap_or(self.alignment),
            line_spacing: format.line_spacing.unwrap_or(self.line_spacing),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    /// Plain text; `\n` forces a line break.
    pub text: String,
    pub format: TextFormat,
    pub space_before: f32,
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    /// Number of rows below this one the cell spans in its column.
    pub merge_down: usize,
    pub borders: Borders,
    pub shading: Option<Color>,
    pub format: TextFormat,
    pub v_align: CellVAlign,
}

impl Cell {
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(text));
        self.paragraphs.last_mut().expect("just pushed")
    }

    pub fn has_content(&self) -> bool {
        self.paragraphs.iter().any(|p| !p.text.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Minimum height; taller content still grows the row.
    pub height: Option<f32>,
    /// Repeat this row at the top of every following page the table spans.
    pub heading_format: bool,
    /// Keep this row on the same page as the next `keep_with` rows.
    pub keep_with: usize,
    pub borders: Borders,
    pub shading: Option<Color>,
    pub format: TextFormat,
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, column: usize) -> &Cell {
        &self.cells[column]
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, column: usize) -> &mut Cell {
        &mut self.cells[column]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    pub width: f32, // points
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPadding {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 5.4,
            bottom: 0.0,
            right: 5.4,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub borders: Borders,
    pub shading: Option<Color>,
    pub format: TextFormat,
    pub padding: CellPadding,
    /// Offset of the table's left edge from the left margin.
    pub indent: f32,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column; existing rows get an empty cell for it.
    pub fn add_column(&mut self, width: f32) -> &mut Column {
        self.columns.push(Column { width });
        for row in &mut self.rows {
            row.cells.push(Cell::default());
        }
        self.columns.last_mut().expect("just pushed")
    }

    /// Appends a row with one empty cell per column.
    pub fn add_row(&mut self) -> &mut Row {
        self.rows.push(Row {
            cells: vec![Cell::default(); self.columns.len()],
            ..Default::default()
        });
        self.rows.last_mut().expect("just pushed")
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// Page size and margins in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageGeometry {
    /// A4 with 2.5cm margins.
    fn default() -> Self {
        Self {
            width: 595.2756,
            height: 841.8898,
            margin_top: cm(2.5),
            margin_bottom: cm(2.5),
            margin_left: cm(2.5),
            margin_right: cm(2.5),
        }
    }
}

impl PageGeometry {
    /// y of the first line of content (PDF coordinates, origin bottom-left).
    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn content_bottom(&self) -> f32 {
        self.margin_bottom
    }

    pub fn content_height(&self) -> f32 {
        self.content_top() - self.content_bottom()
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub page: PageGeometry,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(Paragraph::new(text)));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    pub fn add_table(&mut self) -> &mut Table {
        self.blocks.push(Block::Table(Table::new()));
        match self.blocks.last_mut() {
            Some(Block::Table(t)) => t,
            _ => unreachable!(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
    /// Base text format every paragraph and table inherits from.
    pub format: TextFormat,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        self.sections.last_mut().expect("just pushed")
    }

    pub fn base_format(&self) -> ResolvedFormat {
        ResolvedFormat::default().overlay(&self.format)
    }
}

use std::slice;

use crate::config::LayoutOptions;
use crate::error::Error;
use crate::model::{Alignment, Block, Paragraph, PageGeometry, ResolvedFormat, Table};
use crate::ops::DrawOp;
use crate::table::PreparedTable;
use crate::table::paginate::{LayoutWarning, PageFrame};
use crate::text::TextFlow;
use crate::units::round_pt;

pub(super) struct Page {
    pub(super) geometry: PageGeometry,
    pub(super) ops: Vec<DrawOp>,
}

/// Places blocks one after another, starting new pages as they fill up.
pub(super) struct DocumentFlow<'a> {
    flow: &'a dyn TextFlow,
    base: ResolvedFormat,
    options: &'a LayoutOptions,
    pages: Vec<Page>,
    geometry: PageGeometry,
    cursor: f32,
    warnings: Vec<LayoutWarning>,
}

impl<'a> DocumentFlow<'a> {
    pub(super) fn new(
        flow: &'a dyn TextFlow,
        base: ResolvedFormat,
        options: &'a LayoutOptions,
    ) -> Self {
        let geometry = PageGeometry::default();
        Self {
            flow,
            base,
            options,
            pages: Vec::new(),
            geometry,
            cursor: geometry.content_top(),
            warnings: Vec::new(),
        }
    }

    /// Every section starts on a new page.
    pub(super) fn start_section(&mut self, geometry: PageGeometry) -> Result<(), Error> {
        if geometry.content_height() <= 0.0 || geometry.content_width() <= 0.0 {
            return Err(Error::Pdf(format!(
                "page {}x{} has no room inside its margins",
                geometry.width, geometry.height
            )));
        }
        self.geometry = geometry;
        self.new_page();
        Ok(())
    }

    fn new_page(&mut self) {
        self.pages.push(Page {
            geometry: self.geometry,
            ops: Vec::new(),
        });
        self.cursor = self.geometry.content_top();
    }

    fn at_page_top(&self) -> bool {
        (self.cursor - self.geometry.content_top()).abs() < self.options.epsilon
    }

    fn ops(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.new_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last].ops
    }

    pub(super) fn add_block(&mut self, block: &Block) -> Result<(), Error> {
        match block {
            Block::Paragraph(p) => self.add_paragraph(p),
            Block::Table(t) => self.add_table(t),
        }
    }

    fn add_paragraph(&mut self, para: &Paragraph) -> Result<(), Error> {
        let width = self.geometry.content_width();
        let flowed = self
            .flow
            .flow(slice::from_ref(para), self.base, width)
            .map_err(Error::Measure)?;

        if !self.at_page_top() {
            self.cursor -= para.space_before;
        }
        let left = self.geometry.margin_left;
        for line in &flowed.lines {
            if self.cursor - line.height < self.geometry.content_bottom() - self.options.epsilon
                && !self.at_page_top()
            {
                self.new_page();
            }
            if !line.text.is_empty() {
                let x = match line.alignment {
                    Alignment::Left => left,
                    Alignment::Center => left + (width - line.width) / 2.0,
                    Alignment::Right => left + width - line.width,
                };
                let y = self.cursor - line.font_size * line.font.ascender_ratio();
                let op = DrawOp::Text {
                    x: round_pt(x),
                    y: round_pt(y),
                    text: line.text.clone(),
                    font: line.font,
                    size: line.font_size,
                    color: line.color,
                };
                self.ops().push(op);
            }
            self.cursor -= line.height;
        }
        self.cursor -= para.space_after;
        Ok(())
    }

    fn add_table(&mut self, table: &Table) -> Result<(), Error> {
        let prepared = PreparedTable::prepare(table, self.flow, self.base)?;
        let frame = PageFrame {
            start: self.cursor.max(self.geometry.content_bottom()),
            content_top: self.geometry.content_top(),
            content_bottom: self.geometry.content_bottom(),
        };
        let plan = prepared.plan(frame, self.options)?;
        let left = self.geometry.margin_left + table.indent;
        let (drawn, warnings) = prepared.draw(&plan, left, self.options)?;

        for (i, (page, drawn)) in plan.pages.iter().zip(drawn).enumerate() {
            if i > 0 {
                self.new_page();
            }
            if page.is_empty() {
                continue;
            }
            self.ops().extend(drawn.ops);
            self.cursor = drawn.bottom;
        }
        self.warnings.extend(warnings);
        Ok(())
    }

    pub(super) fn finish(mut self) -> (Vec<Page>, Vec<LayoutWarning>) {
        if self.pages.is_empty() {
            self.new_page();
        }
        (self.pages, self.warnings)
    }
}

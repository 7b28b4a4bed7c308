//! Text flow: breaking paragraphs into lines and measuring the block they fill.
//!
//! The table engine only needs a height per cell, but the writer needs the
//! lines too, so [`TextFlow::flow`] returns both and [`TextFlow::measure`] is
//! derived from it.

use crate::error::MeasureError;
use crate::fonts::StandardFont;
use crate::model::{Alignment, Color, Paragraph, ResolvedFormat};

#[derive(Clone, Debug, PartialEq)]
pub struct FlowedLine {
    pub text: String,
    pub width: f32,
    pub font: StandardFont,
    pub font_size: f32,
    pub color: Color,
    pub alignment: Alignment,
    /// Distance from the top of the block to the top of this line.
    pub offset: f32,
    pub height: f32,
}

impl FlowedLine {
    /// Distance from the top of the block to this line's baseline.
    pub fn baseline_offset(&self) -> f32 {
        self.offset + self.font_size * self.font.ascender_ratio()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowedBlock {
    pub lines: Vec<FlowedLine>,
    pub height: f32,
}

/// The text-flow collaborator. Implementations must be deterministic: the same
/// input always yields the same lines and height.
pub trait TextFlow {
    fn flow(
        &self,
        paragraphs: &[Paragraph],
        base: ResolvedFormat,
        width: f32,
    ) -> Result<FlowedBlock, MeasureError>;

    fn measure(
        &self,
        paragraphs: &[Paragraph],
        base: ResolvedFormat,
        width: f32,
    ) -> Result<f32, MeasureError> {
        Ok(self.flow(paragraphs, base, width)?.height)
    }
}

impl<T: TextFlow + ?Sized> TextFlow for &T {
    fn flow(
        &self,
        paragraphs: &[Paragraph],
        base: ResolvedFormat,
        width: f32,
    ) -> Result<FlowedBlock, MeasureError> {
        (**self).flow(paragraphs, base, width)
    }
}

/// Greedy word wrap with standard Helvetica metrics.
#[derive(Clone, Copy, Debug)]
pub struct StandardTextFlow {
    /// Line height as a multiple of the font size at single spacing.
    pub line_height_ratio: f32,
}

impl Default for StandardTextFlow {
    fn default() -> Self {
        Self {
            line_height_ratio: 1.2,
        }
    }
}

impl StandardTextFlow {
    pub fn line_height(&self, format: &ResolvedFormat) -> f32 {
        format.font_size * self.line_height_ratio * format.line_spacing
    }
}

impl TextFlow for StandardTextFlow {
    fn flow(
        &self,
        paragraphs: &[Paragraph],
        base: ResolvedFormat,
        width: f32,
    ) -> Result<FlowedBlock, MeasureError> {
        if paragraphs.is_empty() {
            return Ok(FlowedBlock::default());
        }
        if width <= 0.0 {
            return Err(MeasureError::NonPositiveWidth { width });
        }

        let mut block = FlowedBlock::default();
        let mut y = 0.0f32;
        for para in paragraphs {
            let format = base.overlay(&para.format);
            let font = StandardFont::for_weight(format.bold);
            let line_h = self.line_height(&format);

            y += para.space_before;
            for text in wrap_paragraph(&para.text, font, format.font_size, width) {
                let line_w = font.word_width(&text, format.font_size);
                block.lines.push(FlowedLine {
                    text,
                    width: line_w,
                    font,
                    font_size: format.font_size,
                    color: format.color,
                    alignment: format.alignment,
                    offset: y,
                    height: line_h,
                });
                y += line_h;
            }
            y += para.space_after;
        }
        block.height = y;
        Ok(block)
    }
}

/// Break `text` into lines no wider than `max_width`. Explicit `\n` always
/// starts a new line; a word wider than the line stays whole on its own line.
pub(crate) fn wrap_paragraph(
    text: &str,
    font: StandardFont,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let space_w = font.space_width(font_size);
    let mut lines = Vec::new();

    for hard_line in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0.0f32;
        for word in hard_line.split_whitespace() {
            let word_w = font.word_width(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
            } else if current_w + space_w + word_w <= max_width {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_w = word_w;
            }
        }
        lines.push(current);
    }

    lines
}

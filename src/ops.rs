//! Drawing operations and the stream emission optimizer.
//!
//! Layout produces [`DrawOp`]s, each carrying the full style it needs. The
//! optimizer folds them into [`PageOp`]s, emitting a state-setting operation
//! only when the value differs from what is already in effect.

use crate::fonts::StandardFont;
use crate::model::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
}

/// A paint operation with its resolved style.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Stroke {
        from: (f32, f32),
        to: (f32, f32),
        style: StrokeStyle,
    },
    Fill {
        rect: Rect,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: StandardFont,
        size: f32,
        color: Color,
    },
}

/// An operation for the page writer. Order is significant and must be kept.
#[derive(Clone, Debug, PartialEq)]
pub enum PageOp {
    SetStrokeWidth(f32),
    SetStrokeColor(Color),
    SetFillColor(Color),
    StrokeLine { x1: f32, y1: f32, x2: f32, y2: f32 },
    FillRect(Rect),
    PlaceText {
        x: f32,
        y: f32,
        text: String,
        font: StandardFont,
        size: f32,
    },
}

/// Drawing attributes last emitted in the current content stream. `None`
/// means nothing was emitted yet, so the first use always sets the value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamState {
    pub stroke_width: Option<f32>,
    pub stroke_color: Option<Color>,
    pub fill_color: Option<Color>,
}

/// Optimize one page's operations starting from a fresh drawing context.
pub fn optimize(ops: &[DrawOp]) -> Vec<PageOp> {
    optimize_from(StreamState::default(), ops).1
}

/// Left fold over `ops` threading the emitted state through.
pub fn optimize_from(state: StreamState, ops: &[DrawOp]) -> (StreamState, Vec<PageOp>) {
    ops.iter().fold(
        (state, Vec::with_capacity(ops.len())),
        |(state, mut out), op| {
            let state = emit(state, op, &mut out);
            (state, out)
        },
    )
}

fn emit(mut state: StreamState, op: &DrawOp, out: &mut Vec<PageOp>) -> StreamState {
    match op {
        DrawOp::Stroke { from, to, style } => {
            if state.stroke_width != Some(style.width) {
                out.push(PageOp::SetStrokeWidth(style.width));
                state.stroke_width = Some(style.width);
            }
            if state.stroke_color != Some(style.color) {
                out.push(PageOp::SetStrokeColor(style.color));
                state.stroke_color = Some(style.color);
            }
            out.push(PageOp::StrokeLine {
                x1: from.0,
                y1: from.1,
                x2: to.0,
                y2: to.1,
            });
        }
        DrawOp::Fill { rect, color } => {
            state = set_fill(state, *color, out);
            out.push(PageOp::FillRect(*rect));
        }
        DrawOp::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        } => {
            state = set_fill(state, *color, out);
            out.push(PageOp::PlaceText {
                x: *x,
                y: *y,
                text: text.clone(),
                font: *font,
                size: *size,
            });
        }
    }
    state
}

fn set_fill(mut state: StreamState, color: Color, out: &mut Vec<PageOp>) -> StreamState {
    if state.fill_color != Some(color) {
        out.push(PageOp::SetFillColor(color));
        state.fill_color = Some(color);
    }
    state
}

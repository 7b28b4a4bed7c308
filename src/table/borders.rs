//! Border resolution.
//!
//! Every edge property (width, color, visibility) is looked up along the chain
//! cell → row → table and the first level that sets it wins. Two cells that
//! touch share one boundary; [`ResolvedBorders`] decides which side's edge is
//! drawn there so each boundary is stroked once.

use crate::model::{Border, Color, Edge, Table};
use crate::ops::StrokeStyle;

use super::spans::MergeSpans;

/// The declaring level an edge style came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderLevel {
    Cell,
    Row,
    Table,
    /// Nothing set on any level.
    Default,
}

impl BorderLevel {
    /// Set on the cell or its row, rather than inherited from the table.
    pub fn is_explicit(self) -> bool {
        matches!(self, BorderLevel::Cell | BorderLevel::Row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub width: f32,
    pub color: Color,
    pub visible: bool,
    pub source: BorderLevel,
}

impl EdgeStyle {
    pub const NONE: EdgeStyle = EdgeStyle {
        width: 0.0,
        color: Color::BLACK,
        visible: false,
        source: BorderLevel::Default,
    };

    /// Zero width or hidden edges still take part in inheritance but are never drawn.
    pub fn is_drawn(&self) -> bool {
        self.visible && self.width > 0.0
    }

    pub fn stroke(&self) -> Option<StrokeStyle> {
        self.is_drawn().then_some(StrokeStyle {
            width: self.width,
            color: self.color,
        })
    }
}

/// Fold one edge over its precedence chain, most specific first.
pub fn resolve_edge(chain: &[(BorderLevel, &Border)]) -> EdgeStyle {
    let width = chain.iter().find_map(|(_, b)| b.width).unwrap_or(0.0);
    let color = chain.iter().find_map(|(_, b)| b.color).unwrap_or(Color::BLACK);
    // Setting a width on a level makes the edge visible unless that same level hides it.
    let visible = chain
        .iter()
        .find_map(|(_, b)| b.visible.or(b.width.map(|_| true)))
        .unwrap_or(true);
    let source = chain
        .iter()
        .find(|(_, b)| b.is_set())
        .map_or(BorderLevel::Default, |(level, _)| *level);
    EdgeStyle {
        width,
        color,
        visible,
        source,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellEdges {
    pub top: EdgeStyle,
    pub bottom: EdgeStyle,
    pub left: EdgeStyle,
    pub right: EdgeStyle,
}

impl CellEdges {
    pub fn edge(&self, edge: Edge) -> EdgeStyle {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedBorders {
    // [row][column], placeholders hold their anchor cell's edges
    cells: Vec<Vec<CellEdges>>,
    // [boundary above row r, r == rows.len() is the table bottom][column]
    horizontal: Vec<Vec<Option<EdgeStyle>>>,
    // [row][boundary left of column k, k == ncols is the right side]
    vertical: Vec<Vec<EdgeStyle>>,
    spans: MergeSpans,
}

impl ResolvedBorders {
    pub fn resolve(table: &Table, spans: &MergeSpans) -> Self {
        let nrows = table.rows.len();
        let ncols = table.columns.len();

        let own: Vec<Vec<CellEdges>> = table
            .rows
            .iter()
            .map(|row| {
                (0..ncols)
                    .map(|ci| {
                        let cell = &row.cells[ci];
                        let edge = |e: Edge| {
                            resolve_edge(&[
                                (BorderLevel::Cell, cell.borders.edge(e)),
                                (BorderLevel::Row, row.borders.edge(e)),
                                (BorderLevel::Table, table.borders.edge(e)),
                            ])
                        };
                        CellEdges {
                            top: edge(Edge::Top),
                            bottom: edge(Edge::Bottom),
                            left: edge(Edge::Left),
                            right: edge(Edge::Right),
                        }
                    })
                    .collect()
            })
            .collect();

        let cells: Vec<Vec<CellEdges>> = (0..nrows)
            .map(|ri| (0..ncols).map(|ci| own[spans.anchor(ri, ci)][ci]).collect())
            .collect();

        let mut resolved = Self {
            cells,
            horizontal: Vec::new(),
            vertical: Vec::new(),
            spans: spans.clone(),
        };

        resolved.horizontal = (0..=nrows)
            .map(|ri| {
                let upper = ri.checked_sub(1);
                let lower = (ri < nrows).then_some(ri);
                (0..ncols)
                    .map(|ci| resolved.between(upper, lower, ci))
                    .collect()
            })
            .collect();
        resolved.vertical = (0..nrows)
            .map(|ri| (0..=ncols).map(|k| resolved.column_boundary(ri, k)).collect())
            .collect();

        resolved
    }

    /// Edges of the cell drawn at (`row`, `column`); the top cell of a merge
    /// span answers for all its placeholders.
    pub fn cell(&self, row: usize, column: usize) -> &CellEdges {
        &self.cells[row][column]
    }

    /// Style of the boundary above `row` (or the table bottom for
    /// `row == rows.len()`) in `column`, for rows that are adjacent in the table.
    /// `None` inside a merge span.
    pub fn row_boundary(&self, row: usize, column: usize) -> Option<EdgeStyle> {
        self.horizontal[row][column]
    }

    /// Style of the vertical boundary left of column `k` in `row`.
    pub fn vertical(&self, row: usize, k: usize) -> EdgeStyle {
        self.vertical[row][k]
    }

    /// The authoritative style where `upper`'s bottom edge meets `lower`'s top
    /// edge in `column`. Either side may be absent at a page or table edge.
    /// The lower edge wins only when set on its cell or row; otherwise the
    /// upper edge is used for both. `None` when both rows lie inside the same
    /// merge span, where no line is drawn.
    pub fn between(
        &self,
        upper: Option<usize>,
        lower: Option<usize>,
        column: usize,
    ) -> Option<EdgeStyle> {
        match (upper, lower) {
            (Some(u), Some(l)) => {
                if let Some(span) = self.spans.span_at(u, column) {
                    if span.contains(l) {
                        return None;
                    }
                }
                let top = self.cells[l][column].top;
                if top.source.is_explicit() {
                    Some(top)
                } else {
                    Some(self.cells[u][column].bottom)
                }
            }
            (Some(u), None) => Some(self.cells[u][column].bottom),
            (None, Some(l)) => Some(self.cells[l][column].top),
            (None, None) => None,
        }
    }

    fn column_boundary(&self, row: usize, k: usize) -> EdgeStyle {
        let ncols = self.cells[row].len();
        if k == 0 {
            return self.cells[row][0].left;
        }
        if k == ncols {
            return self.cells[row][ncols - 1].right;
        }
        let left = self.cells[row][k].left;
        if left.source.is_explicit() {
            left
        } else {
            self.cells[row][k - 1].right
        }
    }
}

/// Resolve every edge of every cell of `table`.
pub fn resolve_borders(table: &Table, spans: &MergeSpans) -> ResolvedBorders {
    ResolvedBorders::resolve(table, spans)
}

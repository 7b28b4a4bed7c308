use std::fmt;

/// Failure reported by a [`TextFlow`](crate::text::TextFlow) implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    NonPositiveWidth { width: f32 },
    Other(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::NonPositiveWidth { width } => {
                write!(f, "no room for text: available width is {width:.2}pt")
            }
            MeasureError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for MeasureError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeProblem {
    /// The span runs past the last row of the table.
    RunsPastTable { row_count: usize },
    /// The span covers a row already covered by the span starting at `other_row`.
    Overlaps { other_row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    NoColumns,
    RowCellCount {
        row: usize,
        cells: usize,
        columns: usize,
    },
    InvalidMergeConfiguration {
        row: usize,
        column: usize,
        merge_down: usize,
        problem: MergeProblem,
    },
    UnmeasurableContent {
        row: usize,
        column: usize,
        source: MeasureError,
    },
    OversizedRow {
        first_row: usize,
        last_row: usize,
        height: f32,
        available: f32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoColumns => write!(f, "table has no columns"),
            LayoutError::RowCellCount {
                row,
                cells,
                columns,
            } => write!(f, "row {row} has {cells} cells but the table has {columns} columns"),
            LayoutError::InvalidMergeConfiguration {
                row,
                column,
                merge_down,
                problem,
            } => match problem {
                MergeProblem::RunsPastTable { row_count } => write!(
                    f,
                    "cell ({row}, {column}) merges down {merge_down} rows \
                     past the end of a {row_count}-row table"
                ),
                MergeProblem::Overlaps { other_row } => write!(
                    f,
                    "cell ({row}, {column}) merges down {merge_down} rows \
                     into the span starting at row {other_row}"
                ),
            },
            LayoutError::UnmeasurableContent {
                row,
                column,
                source,
            } => write!(f, "cannot measure cell ({row}, {column}): {source}"),
            LayoutError::OversizedRow {
                first_row,
                last_row,
                height,
                available,
            } => {
                if first_row == last_row {
                    write!(
                        f,
                        "row {first_row} is {height:.2}pt tall but a page holds {available:.2}pt"
                    )
                } else {
                    write!(
                        f,
                        "rows {first_row}..={last_row} are {height:.2}pt tall \
                         but a page holds {available:.2}pt"
                    )
                }
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::UnmeasurableContent { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Layout(LayoutError),
    /// A paragraph outside any table could not be flowed.
    Measure(MeasureError),
    Pdf(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Layout(e) => write!(f, "layout failed: {e}"),
            Error::Measure(e) => write!(f, "cannot flow paragraph: {e}"),
            Error::Pdf(msg) => write!(f, "PDF generation failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Layout(e) => Some(e),
            Error::Measure(e) => Some(e),
            Error::Pdf(_) => None,
        }
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}
